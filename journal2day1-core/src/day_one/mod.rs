mod converter;
mod day_one_entry;
mod id_generator;
mod media;

pub use converter::{Converter, ProgressFn};
pub use day_one_entry::{DayOneEntry, DayOneExport, DayOneMetadata, DayOnePhoto, DayOneVideo};
pub use id_generator::{IdGenerator, UuidGenerator};
