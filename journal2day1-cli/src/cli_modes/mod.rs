mod convert_mode;
mod progress;
mod use_color;
mod version_mode;

pub use convert_mode::convert_mode;
pub use use_color::use_color;
pub use version_mode::version_mode;
