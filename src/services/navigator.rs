use tracing::info;

use crate::core::Navigator;
use crate::models::Destination;

/// Navigator that keeps every destination it was sent to
#[derive(Debug, Clone, Default)]
pub struct RecordingNavigator {
    visited: Vec<Destination>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> &[Destination] {
        &self.visited
    }

    pub fn last(&self) -> Option<&Destination> {
        self.visited.last()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&mut self, destination: Destination) {
        info!(%destination, "navigation requested");
        self.visited.push(destination);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_in_order() {
        let mut navigator = RecordingNavigator::new();
        navigator.navigate(Destination::Schedule);
        navigator.navigate(Destination::Chat { candidate_id: 1 });

        assert_eq!(navigator.visited().len(), 2);
        assert_eq!(navigator.last(), Some(&Destination::Chat { candidate_id: 1 }));
    }

    #[test]
    fn test_closure_navigator() {
        let mut seen = Vec::new();
        {
            let mut navigator = |d: Destination| seen.push(d);
            navigator.navigate(Destination::Gyms);
        }
        assert_eq!(seen, vec![Destination::Gyms]);
    }
}
