mod apple_journal;
mod apple_journal_entry;
mod extract;
mod html_tree;

pub use apple_journal::{AppleJournal, ENTRIES_DIR, RESOURCES_DIR};
pub use apple_journal_entry::{Asset, AssetKind, ParsedEntry, ResourceMeta};
pub use html_tree::{Element, Node, Visitor, parse_document};
