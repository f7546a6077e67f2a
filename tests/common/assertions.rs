use driver::Observation;

/// Every observation field must be present, finite, and correctly shaped.
pub fn assert_observation_valid(observation: &Observation) {
    assert_eq!(observation.pose.len(), 3);
    for value in observation.pose {
        assert!(value.is_finite(), "pose contains non-finite value");
    }
    assert!(observation.velocity.is_finite());
    assert!(observation.acceleration.is_finite());
    assert!(observation.trans_coef.is_finite());
    assert!(observation.rot_coef.is_finite());
    assert!(observation.trans_coef > 0.0, "friction must be positive");
    assert!(observation.rot_coef > 0.0, "friction must be positive");
}
