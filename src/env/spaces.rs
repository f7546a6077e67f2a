use serde::{Deserialize, Serialize};

use crate::utils::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Axis-aligned bounds for a fixed-shape numeric vector.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxSpace {
    pub low: f64,
    pub high: f64,
    pub shape: usize,
}

impl BoxSpace {
    pub fn new(low: f64, high: f64, shape: usize) -> Self {
        Self { low, high, shape }
    }

    pub fn contains(&self, value: &[f64]) -> bool {
        value.len() == self.shape
            && value
                .iter()
                .all(|v| v.is_finite() && *v >= self.low && *v <= self.high)
    }
}

/// Declared bounds of the (left, right) force pair. Symmetric about zero
/// so the brake preset's negative forces are in-schema.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActionSpace {
    pub force: BoxSpace,
}

impl ActionSpace {
    pub fn new(act_limit: f64) -> Self {
        Self {
            force: BoxSpace::new(-act_limit, act_limit, 2),
        }
    }
}

/// Declared bounds of the five observation fields.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationSpace {
    pub pose: BoxSpace,
    pub velocity: BoxSpace,
    pub acceleration: BoxSpace,
    pub trans_coef: BoxSpace,
    pub rot_coef: BoxSpace,
}

impl Default for ObservationSpace {
    fn default() -> Self {
        let extent = SCREEN_WIDTH.max(SCREEN_HEIGHT) as f64;
        Self {
            pose: BoxSpace::new(0.0, extent, 3),
            velocity: BoxSpace::new(0.0, 100.0, 1),
            acceleration: BoxSpace::new(0.0, 100.0, 1),
            trans_coef: BoxSpace::new(0.0, 100.0, 1),
            rot_coef: BoxSpace::new(0.0, 100.0, 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_checks_shape_and_bounds() {
        let space = BoxSpace::new(-50.0, 50.0, 2);
        assert!(space.contains(&[10.0, -10.0]));
        assert!(space.contains(&[-50.0, 50.0]));
        assert!(!space.contains(&[60.0, 0.0]));
        assert!(!space.contains(&[10.0]));
        assert!(!space.contains(&[f64::NAN, 0.0]));
    }

    #[test]
    fn action_space_is_symmetric_about_zero() {
        let space = ActionSpace::new(50.0);
        assert!(space.force.contains(&[-50.0, 50.0]));
        assert!(!space.force.contains(&[-51.0, 0.0]));
    }
}
