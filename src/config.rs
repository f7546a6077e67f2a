use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::Path;

use crate::utils::constants::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::utils::errors::SimError;

/// Which canvas the agent observes.
///
/// `Human` exposes the full fixed-size world view; `Agent` exposes a square
/// car-centered crop of `crop_size` pixels per side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnvMode {
    Human,
    Agent,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    pub mode: EnvMode,
    /// Side length of the square observation canvas in `Agent` mode.
    pub crop_size: u32,
    /// Magnitude bound for each action-force component.
    pub act_limit: f64,
    /// Physics tick rate forwarded to the car integration.
    pub fps: u32,
    /// Master seed for road surface placement.
    pub seed: u64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            mode: EnvMode::Agent,
            crop_size: 84,
            act_limit: 100.0,
            fps: 30,
            seed: 0,
        }
    }
}

impl EnvConfig {
    pub fn from_yaml(path: &Path) -> Result<Self, SimError> {
        let file = File::open(path)?;
        let config: EnvConfig = serde_yaml::from_reader(file)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if self.crop_size == 0 || self.crop_size > SCREEN_HEIGHT.min(SCREEN_WIDTH) {
            return Err(SimError::InvalidConfig(format!(
                "crop_size must be in 1..={}, got {}",
                SCREEN_HEIGHT.min(SCREEN_WIDTH),
                self.crop_size
            )));
        }
        if !(self.act_limit > 0.0) || !self.act_limit.is_finite() {
            return Err(SimError::InvalidConfig(format!(
                "act_limit must be a positive finite force, got {}",
                self.act_limit
            )));
        }
        if self.fps == 0 {
            return Err(SimError::InvalidConfig("fps must be non-zero".into()));
        }
        Ok(())
    }

    /// Dimensions of the agent-visible screen canvas.
    pub fn screen_dims(&self) -> (u32, u32) {
        match self.mode {
            EnvMode::Human => (SCREEN_WIDTH, SCREEN_HEIGHT),
            EnvMode::Agent => (self.crop_size, self.crop_size),
        }
    }
}
