/// Next index in a circular list of `len` entries
///
/// An empty list always yields 0.
#[inline]
pub fn next_index(cursor: usize, len: usize) -> usize {
    if len == 0 || cursor + 1 >= len {
        0
    } else {
        cursor + 1
    }
}

/// Result of advancing the cursor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub index: usize,
    pub wrapped: bool,
}

/// Position of the displayed candidate within a circular deck
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueueCursor {
    index: usize,
    len: usize,
}

impl QueueCursor {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn advance(&mut self) -> Step {
        let index = next_index(self.index, self.len);
        let wrapped = self.len > 0 && index == 0;
        self.index = index;
        Step { index, wrapped }
    }
}
