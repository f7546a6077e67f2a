use std::collections::VecDeque;

use crate::utils::constants::{FORWARD_FORCE, LATERAL_FORCE};

/// Pressed-key snapshot polled once per interactive frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub quit: bool,
}

/// Source of manual control input, polled by the environment when no
/// action is supplied in human mode. This is the "drivable by a manual
/// game loop" contract; window toolkits implement it by draining their
/// event queue.
pub trait InputSource {
    fn poll(&mut self) -> KeyState;
}

/// Scripted input for tests and headless play; replays a fixed sequence of
/// key states, then reports nothing pressed.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    frames: VecDeque<KeyState>,
}

impl ScriptedInput {
    pub fn new(frames: impl IntoIterator<Item = KeyState>) -> Self {
        Self {
            frames: frames.into_iter().collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> KeyState {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Map a key state to the discrete force presets. Later presets override
/// earlier ones when several keys are held, so throttle and brake take
/// priority over steering.
pub fn action_from_keys(keys: KeyState) -> [f64; 2] {
    let mut action = [0.0, 0.0];
    if keys.left {
        action = [10.0, LATERAL_FORCE];
    }
    if keys.right {
        action = [LATERAL_FORCE, 0.0];
    }
    if keys.up {
        action = [FORWARD_FORCE, FORWARD_FORCE];
    }
    if keys.down {
        action = [-FORWARD_FORCE, -FORWARD_FORCE];
    }
    action
}
