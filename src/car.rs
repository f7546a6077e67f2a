use glam::DVec2;
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, PixmapPaint, Rect, Transform};

use crate::rendering::mask::PixelMask;
use crate::utils::constants::{
    CAR_INERTIA, CAR_LENGTH, CAR_MASS, CAR_WIDTH, DEFAULT_ROT_COEF, DEFAULT_TRANS_COEF, RED,
    YELLOW,
};
use crate::utils::errors::SimError;
use crate::utils::math::{deg_to_rad, wrap_degrees};

/// Kinematic two-force car.
///
/// The action is a (left, right) force pair: the sum accelerates the car
/// along its heading, the difference produces a yaw torque. Surface
/// friction opposes both, with coefficients set per step from the road's
/// texture map.
pub struct Car {
    x: f64,
    y: f64,
    /// Heading in degrees, 0 pointing along +x, counter-clockwise positive.
    theta: f64,
    /// Forward speed in pixels per second.
    v: f64,
    /// Yaw rate in degrees per second.
    w: f64,
    /// Forward acceleration from the last tick.
    dv: f64,
    /// Translational friction coefficient.
    bv: f64,
    /// Rotational friction coefficient.
    bw: f64,
    dt: f64,
    act_limit: f64,
    sprite: Pixmap,
}

impl Car {
    pub fn new(theta: f64, x: f64, y: f64, fps: u32, act_limit: f64) -> Result<Self, SimError> {
        Ok(Self {
            x,
            y,
            theta: wrap_degrees(theta),
            v: 0.0,
            w: 0.0,
            dv: 0.0,
            bv: DEFAULT_TRANS_COEF,
            bw: DEFAULT_ROT_COEF,
            dt: 1.0 / fps as f64,
            act_limit,
            sprite: Self::build_sprite()?,
        })
    }

    /// Red body with a yellow nose strip marking the forward edge; drawn
    /// pointing "up" and rotated to the heading at blit time.
    fn build_sprite() -> Result<Pixmap, SimError> {
        let mut sprite = Pixmap::new(CAR_WIDTH, CAR_LENGTH)
            .ok_or_else(|| SimError::RenderError("failed to allocate car sprite".into()))?;

        let body = Rect::from_xywh(0.0, 0.0, CAR_WIDTH as f32, CAR_LENGTH as f32)
            .ok_or_else(|| SimError::RenderError("invalid car body rect".into()))?;
        let nose = Rect::from_xywh(0.0, 0.0, CAR_WIDTH as f32, 3.0)
            .ok_or_else(|| SimError::RenderError("invalid car nose rect".into()))?;

        let mut paint = Paint::default();
        paint.anti_alias = false;

        let (r, g, b) = RED;
        paint.set_color_rgba8(r, g, b, 255);
        sprite.fill_path(
            &PathBuilder::from_rect(body),
            &paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );

        let (r, g, b) = YELLOW;
        paint.set_color_rgba8(r, g, b, 255);
        sprite.fill_path(
            &PathBuilder::from_rect(nose),
            &paint,
            FillRule::Winding,
            Transform::identity(),
            None,
        );

        Ok(sprite)
    }

    pub fn pose(&self) -> [f64; 3] {
        [self.x, self.y, self.theta]
    }

    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.y)
    }

    pub fn heading(&self) -> f64 {
        self.theta
    }

    pub fn velocity(&self) -> f64 {
        self.v
    }

    pub fn acceleration(&self) -> f64 {
        self.dv
    }

    pub fn trans_coef(&self) -> f64 {
        self.bv
    }

    pub fn rot_coef(&self) -> f64 {
        self.bw
    }

    pub fn set_pose(&mut self, x: f64, y: f64, theta: f64) {
        self.x = x;
        self.y = y;
        self.theta = wrap_degrees(theta);
    }

    pub fn set_friction(&mut self, bv: f64, bw: f64) {
        self.bv = bv;
        self.bw = bw;
    }

    /// Advance one physics tick under the given (left, right) force pair.
    /// Components are clamped to the action limit.
    pub fn apply_force(&mut self, action: [f64; 2]) {
        let left = action[0].clamp(-self.act_limit, self.act_limit);
        let right = action[1].clamp(-self.act_limit, self.act_limit);

        let thrust = left + right;
        let torque = (right - left) * CAR_WIDTH as f64 / 2.0;

        self.dv = (thrust - self.bv * self.v) / CAR_MASS;
        let dw = (torque - self.bw * self.w) / CAR_INERTIA;

        self.v += self.dv * self.dt;
        self.w += dw * self.dt;
        self.theta = wrap_degrees(self.theta + self.w * self.dt);

        let heading = deg_to_rad(self.theta);
        self.x += self.v * heading.cos() * self.dt;
        self.y -= self.v * heading.sin() * self.dt;
    }

    /// Blit the rotated sprite centered at the pose.
    pub fn draw(&self, canvas: &mut Pixmap) {
        let transform = Transform::from_translate(
            (self.x - CAR_WIDTH as f64 / 2.0) as f32,
            (self.y - CAR_LENGTH as f64 / 2.0) as f32,
        )
        .post_rotate_at((90.0 - self.theta) as f32, self.x as f32, self.y as f32);

        canvas.draw_pixmap(
            0,
            0,
            self.sprite.as_ref(),
            &PixmapPaint::default(),
            transform,
            None,
        );
    }

    /// Pixel mask of the sprite at the current heading. The mask is square
    /// with the sprite diagonal as side length so any rotation fits.
    pub fn mask(&self) -> Result<PixelMask, SimError> {
        let diag = ((CAR_WIDTH.pow(2) + CAR_LENGTH.pow(2)) as f64).sqrt().ceil() as u32;
        let mut scratch = Pixmap::new(diag, diag)
            .ok_or_else(|| SimError::RenderError("failed to allocate mask scratch".into()))?;

        let center = diag as f32 / 2.0;
        let transform = Transform::from_translate(
            center - CAR_WIDTH as f32 / 2.0,
            center - CAR_LENGTH as f32 / 2.0,
        )
        .post_rotate_at((90.0 - self.theta) as f32, center, center);

        scratch.draw_pixmap(
            0,
            0,
            self.sprite.as_ref(),
            &PixmapPaint::default(),
            transform,
            None,
        );

        Ok(PixelMask::from_pixmap(&scratch))
    }

    /// Top-left offset of `mask()` within the world canvas, at the rounded
    /// pose.
    pub fn mask_offset(&self) -> (i64, i64) {
        let diag = ((CAR_WIDTH.pow(2) + CAR_LENGTH.pow(2)) as f64).sqrt().ceil() as i64;
        (
            self.x.round() as i64 - diag / 2,
            self.y.round() as i64 - diag / 2,
        )
    }
}
