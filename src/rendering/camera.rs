use glam::DVec2;
use tiny_skia::{Color, Pixmap, PixmapPaint, PremultipliedColorU8, Transform};

use crate::utils::constants::{CAR_LENGTH, CAR_WIDTH, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::utils::errors::SimError;
use crate::utils::math::rotate_point;

/// Car-centered, heading-aligned view of the world canvas.
///
/// The world canvas is rotated so the car points "up", composited onto a
/// double-size buffer to avoid clipping at the edges, and a fixed window is
/// cropped so the car's rotated position sits at a constant anchor point.
pub struct Camera {
    buffer: Pixmap,
}

impl Camera {
    pub fn new() -> Result<Self, SimError> {
        let buffer = Pixmap::new(SCREEN_WIDTH * 2, SCREEN_HEIGHT * 2)
            .ok_or_else(|| SimError::RenderError("failed to allocate camera buffer".into()))?;
        Ok(Self { buffer })
    }

    /// Rotation that aligns the car's heading with "up" in the output view.
    pub fn view_angle(heading_degrees: f64) -> f64 {
        90.0 - heading_degrees
    }

    /// Pixel offset within the screen canvas where the car is pinned,
    /// tuned by the car dimensions.
    pub fn anchor(screen_dims: (u32, u32)) -> DVec2 {
        DVec2::new(
            screen_dims.0 as f64 / 2.0 - CAR_WIDTH as f64,
            2.0 * screen_dims.1 as f64 / 3.0 + CAR_LENGTH as f64,
        )
    }

    /// Compose the car-centered view of `world` into `screen`.
    ///
    /// The world canvas and the car's world position are rotated by the
    /// same angle about the same pivot; the crop window is then anchored on
    /// the transformed point. Keeping both rotations in one convention is
    /// what holds the crop anchor on the rendered car.
    pub fn compose(
        &mut self,
        world: &Pixmap,
        car_pos: DVec2,
        heading_degrees: f64,
        screen: &mut Pixmap,
    ) -> Result<(), SimError> {
        let angle = Self::view_angle(heading_degrees);
        let origin = DVec2::new(
            world.width() as f64 / 2.0,
            world.height() as f64 / 2.0,
        );
        // Re-center the rotated world at the middle of the double-size buffer.
        let offset = origin;

        let background = world
            .pixel(0, 0)
            .ok_or_else(|| SimError::RenderError("world canvas is empty".into()))?;

        self.buffer.fill(Color::BLACK);
        let pivot = origin + offset;
        // tiny-skia rotates clockwise for positive angles on a y-down
        // canvas; negate to match the counter-clockwise point rotation.
        let transform = Transform::from_translate(offset.x as f32, offset.y as f32)
            .post_rotate_at(-angle as f32, pivot.x as f32, pivot.y as f32);
        self.buffer
            .draw_pixmap(0, 0, world.as_ref(), &PixmapPaint::default(), transform, None);

        let rotated = rotate_point(car_pos, origin, angle) + offset;

        let crop = DVec2::new(
            rotated.x + CAR_WIDTH as f64 - screen.width() as f64 / 2.0,
            rotated.y - CAR_LENGTH as f64 - 2.0 * screen.height() as f64 / 3.0,
        );

        screen.fill(Color::BLACK);
        screen.draw_pixmap(
            0,
            0,
            self.buffer.as_ref(),
            &PixmapPaint::default(),
            Transform::from_translate(-crop.x as f32, -crop.y as f32),
            None,
        );

        // Rotation leaves uncovered border regions; substitute them with
        // the world's background sample so they read as open field.
        replace_black(screen, background);

        Ok(())
    }
}

fn replace_black(pixmap: &mut Pixmap, to: PremultipliedColorU8) {
    for pixel in pixmap.pixels_mut() {
        if pixel.red() == 0 && pixel.green() == 0 && pixel.blue() == 0 && pixel.alpha() == 255 {
            *pixel = to;
        }
    }
}
