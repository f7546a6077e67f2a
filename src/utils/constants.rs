/// World canvas dimensions in pixels.
pub const SCREEN_WIDTH: u32 = 1280;
pub const SCREEN_HEIGHT: u32 = 720;

/// Car sprite dimensions in pixels.
pub const CAR_WIDTH: u32 = 10;
pub const CAR_LENGTH: u32 = 10;

pub const CAR_MASS: f64 = 2.0;
pub const CAR_INERTIA: f64 = 1.0;

/// Fixed start pose, on the top straight of the circuit.
pub const START_X: f64 = 740.0;
pub const START_Y: f64 = 240.0;

/// Discrete force presets used for keyboard-derived actions.
pub const LATERAL_FORCE: f64 = 20.0;
pub const FORWARD_FORCE: f64 = 100.0;

/// Friction pair applied when no surface texture is under the car.
pub const DEFAULT_TRANS_COEF: f64 = 1.0;
pub const DEFAULT_ROT_COEF: f64 = 10.0;

pub const ICY_FRICTION: f64 = 0.01;
pub const ROCKY_FRICTION: f64 = 3.0;

// Palette
pub const WHITE: (u8, u8, u8) = (255, 255, 255);
pub const RED: (u8, u8, u8) = (255, 0, 0);
pub const GRAY: (u8, u8, u8) = (100, 100, 100);
pub const YELLOW: (u8, u8, u8) = (255, 255, 0);
pub const GREEN: (u8, u8, u8) = (0, 255, 0);
pub const ICY: (u8, u8, u8) = (225, 225, 240);
pub const ROCKY: (u8, u8, u8) = (120, 72, 36);
