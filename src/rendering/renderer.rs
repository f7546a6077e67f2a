use glam::DVec2;
use tiny_skia::{Color, Pixmap, PixmapPaint, Transform};

use crate::rendering::camera::Camera;
use crate::utils::constants::{SCREEN_HEIGHT, SCREEN_WIDTH, WHITE};
use crate::utils::errors::SimError;

/// Instance-owned render surfaces.
///
/// Holds the fixed-orientation world canvas, the agent-visible screen
/// canvas, and the display buffer flipped by `render("human")`. Each
/// environment instance owns its own `Renderer`, so setup and teardown
/// never touch process-wide state.
pub struct Renderer {
    world: Pixmap,
    screen: Pixmap,
    display: Pixmap,
    camera: Camera,
}

impl Renderer {
    pub fn new(screen_dims: (u32, u32)) -> Result<Self, SimError> {
        let world = Self::create_canvas(SCREEN_WIDTH, SCREEN_HEIGHT)?;
        let screen = Self::create_canvas(screen_dims.0, screen_dims.1)?;
        let display = Self::create_canvas(screen_dims.0, screen_dims.1)?;
        Ok(Self {
            world,
            screen,
            display,
            camera: Camera::new()?,
        })
    }

    fn create_canvas(width: u32, height: u32) -> Result<Pixmap, SimError> {
        Pixmap::new(width, height)
            .ok_or_else(|| SimError::RenderError("failed to create canvas".into()))
    }

    pub fn clear_world(&mut self) {
        let (r, g, b) = WHITE;
        self.world.fill(Color::from_rgba8(r, g, b, 255));
    }

    pub fn world(&self) -> &Pixmap {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut Pixmap {
        &mut self.world
    }

    pub fn screen(&self) -> &Pixmap {
        &self.screen
    }

    pub fn display(&self) -> &Pixmap {
        &self.display
    }

    pub fn screen_dims(&self) -> (u32, u32) {
        (self.screen.width(), self.screen.height())
    }

    /// Camera-composed, car-centered view of the world canvas.
    pub fn compose(&mut self, car_pos: DVec2, heading_degrees: f64) -> Result<(), SimError> {
        self.camera
            .compose(&self.world, car_pos, heading_degrees, &mut self.screen)
    }

    /// Copy the world canvas onto the screen canvas unrotated, used in
    /// human mode where the full fixed-orientation view is shown.
    pub fn mirror_world(&mut self) {
        self.screen.draw_pixmap(
            0,
            0,
            self.world.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Flip the composed screen canvas into the display buffer.
    pub fn present(&mut self) {
        self.display.draw_pixmap(
            0,
            0,
            self.screen.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
    }

    /// Row-major RGBA copy of the screen canvas.
    pub fn rgb_frame(&self) -> Vec<u8> {
        let mut frame = Vec::with_capacity(self.screen.pixels().len() * 4);
        for pixel in self.screen.pixels() {
            let color = pixel.demultiply();
            frame.extend_from_slice(&[color.red(), color.green(), color.blue(), color.alpha()]);
        }
        frame
    }
}
