pub mod camera;
pub mod mask;
pub mod renderer;

pub use camera::Camera;
pub use mask::PixelMask;
pub use renderer::Renderer;
