pub mod car;
pub mod config;
pub mod env;
pub mod rendering;
pub mod road;
pub mod utils;

pub use car::Car;
pub use config::{EnvConfig, EnvMode};
pub use env::{CarEnv, Environment, Observation, RenderFrame, RenderMode, StepInfo, StepResult};
pub use rendering::{Camera, PixelMask, Renderer};
pub use road::{Road, SurfaceKind};
pub use utils::errors::SimError;
