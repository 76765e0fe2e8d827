use crate::models::{Decision, GestureState, SwipeConfig, Transform};

/// Classify a final horizontal displacement against the swipe threshold
///
/// Displacements with `|delta| <= threshold` produce no decision.
#[inline]
pub fn classify(delta_x: f64, threshold: f64) -> Option<Decision> {
    if delta_x > threshold {
        Some(Decision::Like)
    } else if delta_x < -threshold {
        Some(Decision::Reject)
    } else {
        None
    }
}

/// Card transform while dragging: follow the pointer and tilt by `delta / divisor` degrees
#[inline]
pub fn drag_transform(delta_x: f64, rotation_divisor: f64) -> Transform {
    Transform {
        translate_x: delta_x,
        rotate_deg: delta_x / rotation_divisor,
    }
}

/// Turns a pointer-down/move/up sequence into a swipe decision
///
/// # Lifecycle
/// 1. `begin` records the origin and marks the gesture active
/// 2. `track` updates the delta while active
/// 3. `release` ends the gesture and classifies the last delta
/// 4. `reset` clears everything back to neutral
#[derive(Debug, Clone)]
pub struct SwipeInterpreter {
    threshold: f64,
    rotation_divisor: f64,
    state: GestureState,
}

impl SwipeInterpreter {
    pub fn new(threshold: f64, rotation_divisor: f64) -> Self {
        Self {
            threshold,
            rotation_divisor,
            state: GestureState::default(),
        }
    }

    pub fn from_config(config: &SwipeConfig) -> Self {
        Self::new(config.threshold, config.rotation_divisor)
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn begin(&mut self, x: f64) {
        self.state = GestureState {
            origin_x: Some(x),
            delta_x: 0.0,
            is_active: true,
        };
    }

    /// Update the drag with a new pointer position
    ///
    /// Returns the new card transform, or `None` if no gesture is active.
    pub fn track(&mut self, x: f64) -> Option<Transform> {
        if !self.state.is_active {
            return None;
        }
        let origin = self.state.origin_x?;
        self.state.delta_x = x - origin;
        Some(self.transform())
    }

    /// End the gesture at the last known position
    ///
    /// The delta is kept until `reset` so the caller decides when the card returns to neutral.
    pub fn release(&mut self) -> Option<Decision> {
        if !self.state.is_active {
            return None;
        }
        self.state.is_active = false;
        classify(self.state.delta_x, self.threshold)
    }

    pub fn reset(&mut self) {
        self.state = GestureState::default();
    }

    pub fn transform(&self) -> Transform {
        if self.state.is_active {
            drag_transform(self.state.delta_x, self.rotation_divisor)
        } else {
            Transform::NEUTRAL
        }
    }
}

impl Default for SwipeInterpreter {
    fn default() -> Self {
        Self::from_config(&SwipeConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(100.0, 100.0), None);
        assert_eq!(classify(-100.0, 100.0), None);
        assert_eq!(classify(100.5, 100.0), Some(Decision::Like));
        assert_eq!(classify(-100.5, 100.0), Some(Decision::Reject));
        assert_eq!(classify(0.0, 100.0), None);
    }

    #[test]
    fn test_drag_rotation_unbounded() {
        let t = drag_transform(60.0, 20.0);
        assert_eq!(t.translate_x, 60.0);
        assert_eq!(t.rotate_deg, 3.0);

        let far = drag_transform(-2000.0, 20.0);
        assert_eq!(far.rotate_deg, -100.0);
    }

    #[test]
    fn test_move_ignored_when_inactive() {
        let mut interpreter = SwipeInterpreter::default();
        assert!(interpreter.track(50.0).is_none());
        assert_eq!(interpreter.state().delta_x, 0.0);
    }

    #[test]
    fn test_full_gesture() {
        let mut interpreter = SwipeInterpreter::default();
        interpreter.begin(200.0);
        interpreter.track(260.0);
        let t = interpreter.track(340.0).unwrap();
        assert_eq!(t.translate_x, 140.0);
        assert_eq!(interpreter.release(), Some(Decision::Like));
        assert!(!interpreter.is_active());
        assert_eq!(interpreter.release(), None);

        interpreter.reset();
        assert_eq!(*interpreter.state(), GestureState::default());
    }

    #[test]
    fn test_release_without_move() {
        let mut interpreter = SwipeInterpreter::default();
        interpreter.begin(10.0);
        assert_eq!(interpreter.release(), None);
    }
}
