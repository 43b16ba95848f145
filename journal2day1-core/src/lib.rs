pub mod apple_journal;
pub mod archive;
pub mod config;
pub mod day_one;
pub mod error;
pub mod utils;

#[cfg(test)]
mod tests;

pub use apple_journal::{AppleJournal, Asset, AssetKind, ParsedEntry, ResourceMeta};
pub use config::Config;
pub use day_one::{Converter, DayOneExport, IdGenerator, UuidGenerator};
pub use error::{ConvertError, Result};
