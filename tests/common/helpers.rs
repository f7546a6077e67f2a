use driver::{CarEnv, EnvConfig, EnvMode, Environment, Observation};

pub fn test_config(crop_size: u32, act_limit: f64, fps: u32) -> EnvConfig {
    EnvConfig {
        mode: EnvMode::Agent,
        crop_size,
        act_limit,
        fps,
        seed: 0,
    }
}

/// Environment after one reset, together with the initial observation.
pub fn ready_env(config: EnvConfig) -> (CarEnv, Observation) {
    let mut env = CarEnv::new(config).expect("config should be valid");
    let observation = env.reset().expect("reset should succeed");
    (env, observation)
}
