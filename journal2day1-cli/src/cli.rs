use crate::render::ColorMode;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// journal2day1: convert Apple Journal exports to Day One
///
/// Reads an Apple Journal export directory (with `Entries/` and `Resources/`) and writes a
/// ZIP archive that Day One can import.
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, global = true, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
    /// More log output on stderr (`-v` info, `-vv` debug). `RUST_LOG` takes precedence.
    #[arg(long, short, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert an Apple Journal export to a Day One archive
    /// (e.g. `journal2day1 convert -i ~/AppleJournalEntries -o ~/dayone-import.zip`)
    Convert(ConvertArgs),
    /// Print version information
    Version,
}

#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Path to the Apple Journal export directory
    #[arg(long, short)]
    pub input: PathBuf,
    /// Path of the ZIP file to create. Its directory must already exist.
    #[arg(long, short)]
    pub output: PathBuf,
    /// Name of the journal in Day One [default: config file, then "Journal"]
    #[arg(long, short, env = "JOURNAL2DAY1_NAME")]
    pub name: Option<String>,
    /// Time zone label stored on entries [default: config file, then "Europe/Sofia"]
    #[arg(long, short, env = "JOURNAL2DAY1_TIMEZONE")]
    pub timezone: Option<String>,
}

impl Cli {
    pub fn new() -> Self {
        Cli::parse()
    }
}
