use super::theme::OneDark;
use termimad::{MadSkin, crossterm::style::Stylize};

pub struct Renderer {
    skin: MadSkin,
    use_color: bool,
}

impl Renderer {
    pub fn new(use_color: bool) -> Self {
        Self {
            skin: OneDark::default_onedark_skin(),
            use_color,
        }
    }

    pub fn use_color(&self) -> bool {
        self.use_color
    }

    pub fn print_header(&self, title: &str) {
        if self.use_color {
            self.skin.print_text(&format!("# {title}"));
        } else {
            println!("{title}");
            println!("{}", "=".repeat(title.chars().count()));
        }
    }

    pub fn print_key_value(&self, key: &str, value: &str) {
        println!("{}", self.key_value_line(key, value));
    }

    pub fn print_success(&self, message: &str) {
        if self.use_color {
            println!("{}", format!("✓ {message}").with(OneDark::GREEN));
        } else {
            println!("✓ {message}");
        }
    }

    pub fn print_error(&self, message: &str) {
        if self.use_color {
            eprintln!("{}", format!("✗ {message}").with(OneDark::RED));
        } else {
            eprintln!("✗ {message}");
        }
    }

    fn key_value_line(&self, key: &str, value: &str) -> String {
        let label = format!("{key}:");
        if self.use_color {
            format!(
                "{} {}",
                format!("{label:<10}").with(OneDark::COMMENT),
                value.with(OneDark::CYAN)
            )
        } else {
            format!("{label:<10} {value}")
        }
    }
}
