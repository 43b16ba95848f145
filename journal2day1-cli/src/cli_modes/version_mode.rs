use crate::render::Renderer;

const VERSION: &str = env!("CARGO_PKG_VERSION");
const COMMIT: Option<&str> = option_env!("JOURNAL2DAY1_COMMIT");
const BUILD_DATE: Option<&str> = option_env!("JOURNAL2DAY1_BUILD_DATE");

pub fn version_mode(renderer: &Renderer) {
    renderer.print_header(&format!("journal2day1 {VERSION}"));
    renderer.print_key_value("Commit", COMMIT.unwrap_or("none"));
    renderer.print_key_value("Built", BUILD_DATE.unwrap_or("unknown"));
}
