mod cli;
mod cli_modes;
mod logging;
mod render;

use anyhow::Result;
use cli::{Cli, Command};
use cli_modes::{convert_mode, use_color, version_mode};
use render::Renderer;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("journal2day1: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::new();
    logging::init_tracing(cli.verbose);
    let renderer = Renderer::new(use_color(&cli));

    match &cli.command {
        Command::Convert(args) => convert_mode(args, &renderer),
        Command::Version => {
            version_mode(&renderer);
            Ok(())
        }
    }
}
