mod color_mode;
mod renderer;
mod theme;

pub use color_mode::ColorMode;
pub use renderer::Renderer;
