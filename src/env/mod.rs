pub mod input;
pub mod spaces;

use serde::Serialize;
use tiny_skia::Pixmap;
use tracing::{debug, info, trace};

use crate::car::Car;
use crate::config::EnvConfig;
use crate::rendering::Renderer;
use crate::road::Road;
use crate::utils::constants::{SCREEN_HEIGHT, SCREEN_WIDTH, START_X, START_Y};
use crate::utils::errors::SimError;
use crate::utils::rng::RngManager;

use input::{InputSource, ScriptedInput};
use spaces::{ActionSpace, ObservationSpace};

/// Fixed-schema observation, rebuilt fresh from car state every step.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Observation {
    pub pose: [f64; 3],
    pub velocity: f64,
    pub acceleration: f64,
    pub trans_coef: f64,
    pub rot_coef: f64,
}

/// Per-step diagnostic record.
#[derive(Debug, Clone, Serialize)]
pub struct StepInfo {
    pub action: [f64; 2],
    pub pose: [f64; 3],
    /// Velocity and acceleration pair.
    pub moments: [f64; 2],
    /// Translational and rotational friction coefficients.
    pub friction: [f64; 2],
    /// Cumulative episode reward.
    pub reward: f64,
    pub done: bool,
}

#[derive(Debug, Clone)]
pub struct StepResult {
    pub observation: Observation,
    pub reward: f64,
    pub done: bool,
    pub info: StepInfo,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    Human,
    RgbArray,
}

/// A frame returned by `render`.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderFrame {
    /// Row-major RGBA pixel buffer.
    Pixels {
        width: u32,
        height: u32,
        data: Vec<u8>,
    },
}

/// The "drivable by an RL loop" contract.
pub trait Environment {
    fn reset(&mut self) -> Result<Observation, SimError>;
    fn step(&mut self, action: Option<[f64; 2]>, mode: RenderMode)
        -> Result<StepResult, SimError>;
    fn render(&mut self, mode: RenderMode) -> Result<Option<RenderFrame>, SimError>;
    fn close(&mut self);
    fn action_space(&self) -> &ActionSpace;
    fn observation_space(&self) -> &ObservationSpace;
}

struct Episode {
    car: Car,
    road: Road,
}

/// The car-driving environment core.
///
/// Owns a Car and a Road, advances simulation time, composes the rendered
/// frame, and derives the agent-visible observation. Lifecycle: configured
/// at construction, ready after `reset`, terminal after `close`.
pub struct CarEnv {
    config: EnvConfig,
    action_space: ActionSpace,
    observation_space: ObservationSpace,
    rng: RngManager,
    input: Box<dyn InputSource>,
    // None once closed.
    renderer: Option<Renderer>,
    episode: Option<Episode>,
    reward: f64,
}

impl CarEnv {
    pub fn new(config: EnvConfig) -> Result<Self, SimError> {
        config.validate()?;
        let renderer = Renderer::new(config.screen_dims())?;
        debug!(
            mode = ?config.mode,
            crop_size = config.crop_size,
            act_limit = config.act_limit,
            fps = config.fps,
            seed = config.seed,
            "environment configured"
        );
        Ok(Self {
            action_space: ActionSpace::new(config.act_limit),
            observation_space: ObservationSpace::default(),
            rng: RngManager::new(config.seed),
            input: Box::new(ScriptedInput::default()),
            renderer: Some(renderer),
            episode: None,
            reward: 0.0,
            config,
        })
    }

    /// Attach the manual-play input source polled when no action is given.
    pub fn with_input(mut self, input: Box<dyn InputSource>) -> Self {
        self.input = input;
        self
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Accumulate reward; the hook for future shaping terms. The step path
    /// currently reports zero step reward.
    pub fn update_reward(&mut self, step_reward: f64) {
        self.reward += step_reward;
    }

    /// Composed screen canvas, for callers that export frames directly.
    pub fn frame(&self) -> Result<&Pixmap, SimError> {
        Ok(self.renderer.as_ref().ok_or(SimError::Closed)?.screen())
    }

    /// Mutable access to the car, used by manual loops and tests to place
    /// the vehicle.
    pub fn car_mut(&mut self) -> Result<&mut Car, SimError> {
        match self.episode.as_mut() {
            Some(episode) => Ok(&mut episode.car),
            None => Err(SimError::NotReady("reset() has not run".into())),
        }
    }

    fn episode(&self) -> Result<&Episode, SimError> {
        self.episode
            .as_ref()
            .ok_or_else(|| SimError::NotReady("reset() has not run".into()))
    }

    /// Range test of the car position against the world canvas; touching
    /// the boundary counts as out.
    pub fn out_of_bounds(&self) -> Result<bool, SimError> {
        let [x, y, _] = self.episode()?.car.pose();
        Ok(!(0.0 < x && x < SCREEN_WIDTH as f64) || !(0.0 < y && y < SCREEN_HEIGHT as f64))
    }

    /// Pixel-mask overlap between the car and the off-road field, at the
    /// rounded pose.
    pub fn collision(&self) -> Result<bool, SimError> {
        let episode = self.episode()?;
        let mask = episode.car.mask()?;
        Ok(episode
            .road
            .field_mask()
            .overlap(&mask, episode.car.mask_offset()))
    }

    fn observe(car: &Car) -> Observation {
        Observation {
            pose: car.pose(),
            velocity: car.velocity(),
            acceleration: car.acceleration(),
            trans_coef: car.trans_coef(),
            rot_coef: car.rot_coef(),
        }
    }
}

impl Environment for CarEnv {
    /// Discard any existing episode, construct a fresh Car and Road at the
    /// fixed start pose, and render the initial frame (road, then car).
    fn reset(&mut self) -> Result<Observation, SimError> {
        let renderer = self.renderer.as_mut().ok_or(SimError::Closed)?;

        self.reward = 0.0;
        let mut rng = self.rng.get_rng("road");
        let road = Road::new(&mut rng)?;
        let car = Car::new(0.0, START_X, START_Y, self.config.fps, self.config.act_limit)?;

        renderer.clear_world();
        road.draw(renderer.world_mut());
        car.draw(renderer.world_mut());
        renderer.compose(car.position(), car.heading())?;

        let observation = Self::observe(&car);
        self.episode = Some(Episode { car, road });
        info!(seed = self.rng.master_seed(), "episode reset");
        Ok(observation)
    }

    fn step(
        &mut self,
        action: Option<[f64; 2]>,
        mode: RenderMode,
    ) -> Result<StepResult, SimError> {
        if self.renderer.is_none() {
            return Err(SimError::Closed);
        }
        if self.episode.is_none() {
            return Err(SimError::NotReady("reset() must run before step()".into()));
        }

        // In interactive play, or when the caller supplies no action, the
        // action is derived from the current keyboard state.
        let action = if mode == RenderMode::Human || action.is_none() {
            let keys = self.input.poll();
            if keys.quit {
                self.close();
                return Err(SimError::QuitRequested);
            }
            input::action_from_keys(keys)
        } else {
            let action = action.unwrap_or_default();
            if !self.action_space.force.contains(&action) {
                return Err(SimError::InvalidAction(format!(
                    "force pair {action:?} outside [{}, {}]",
                    self.action_space.force.low, self.action_space.force.high
                )));
            }
            action
        };

        let renderer = self.renderer.as_mut().ok_or(SimError::Closed)?;
        let episode = match self.episode.as_mut() {
            Some(episode) => episode,
            None => return Err(SimError::NotReady("reset() must run before step()".into())),
        };

        renderer.clear_world();

        // Surface friction under the current pose, then advance and redraw.
        let mask = episode.car.mask()?;
        let (bv, bw) = episode.road.friction_at(&mask, episode.car.mask_offset());
        episode.car.set_friction(bv, bw);

        episode.road.draw(renderer.world_mut());
        episode.car.apply_force(action);
        episode.car.draw(renderer.world_mut());

        match mode {
            RenderMode::RgbArray => {
                renderer.compose(episode.car.position(), episode.car.heading())?
            }
            RenderMode::Human => renderer.mirror_world(),
        }

        let done = false;
        let step_reward = 0.0;
        let observation = Self::observe(&episode.car);
        let info = StepInfo {
            action,
            pose: observation.pose,
            moments: [observation.velocity, observation.acceleration],
            friction: [observation.trans_coef, observation.rot_coef],
            reward: self.reward,
            done,
        };
        trace!(pose = ?observation.pose, v = observation.velocity, "step");

        Ok(StepResult {
            observation,
            reward: step_reward,
            done,
            info,
        })
    }

    /// In human mode, flip the screen canvas composed during `step` into
    /// the display buffer; in rgb mode, return the pixel frame.
    fn render(&mut self, mode: RenderMode) -> Result<Option<RenderFrame>, SimError> {
        let renderer = self.renderer.as_mut().ok_or(SimError::Closed)?;
        match mode {
            RenderMode::Human => {
                renderer.present();
                Ok(None)
            }
            RenderMode::RgbArray => {
                let (width, height) = renderer.screen_dims();
                Ok(Some(RenderFrame::Pixels {
                    width,
                    height,
                    data: renderer.rgb_frame(),
                }))
            }
        }
    }

    /// Release the render surfaces. Terminal: every later call fails with
    /// `SimError::Closed`.
    fn close(&mut self) {
        if self.renderer.take().is_some() {
            info!("environment closed");
        }
        self.episode = None;
    }

    fn action_space(&self) -> &ActionSpace {
        &self.action_space
    }

    fn observation_space(&self) -> &ObservationSpace {
        &self.observation_space
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EnvMode;

    #[test]
    fn step_before_reset_is_a_typed_error() {
        let mut env = CarEnv::new(EnvConfig::default()).unwrap();
        let result = env.step(Some([0.0, 0.0]), RenderMode::RgbArray);
        assert!(matches!(result, Err(SimError::NotReady(_))));
    }

    #[test]
    fn out_of_range_actions_are_rejected() {
        let mut env = CarEnv::new(EnvConfig {
            act_limit: 50.0,
            ..Default::default()
        })
        .unwrap();
        env.reset().unwrap();
        let result = env.step(Some([60.0, 0.0]), RenderMode::RgbArray);
        assert!(matches!(result, Err(SimError::InvalidAction(_))));
    }

    #[test]
    fn quit_key_closes_the_environment() {
        use super::input::{KeyState, ScriptedInput};

        let quit = KeyState {
            quit: true,
            ..Default::default()
        };
        let mut env = CarEnv::new(EnvConfig {
            mode: EnvMode::Human,
            ..Default::default()
        })
        .unwrap()
        .with_input(Box::new(ScriptedInput::new([quit])));

        env.reset().unwrap();
        let result = env.step(None, RenderMode::Human);
        assert!(matches!(result, Err(SimError::QuitRequested)));
        assert!(matches!(
            env.step(None, RenderMode::Human),
            Err(SimError::Closed)
        ));
    }
}
