use std::io::{self, IsTerminal};

use crate::cli::Cli;

pub fn use_color(cli: &Cli) -> bool {
    let no_color = std::env::var_os("NO_COLOR").is_some();
    cli.color.enabled(no_color, io::stdout().is_terminal())
}
