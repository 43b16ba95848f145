//! Field extraction from an entry document.
//!
//! Every `<div>` is matched against [`DIV_MARKERS`] by class substring; the first marker
//! found in the class attribute decides which field the block feeds.

use super::apple_journal::AppleJournal;
use super::apple_journal_entry::{Asset, AssetKind};
use super::html_tree::{Element, Visitor};
use crate::utils::date_utils::parse_page_header_date;
use crate::utils::path_utils::lowercase_extension;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::debug;

type Handler = fn(&mut EntryFields<'_>, &Element);

const DIV_MARKERS: &[(&str, Handler)] = &[
    ("pageHeader", read_page_header),
    ("title", read_title),
    ("gridItem", read_grid_item),
    ("bodyText", read_body_text),
];

/// Fields collected while walking one entry document.
pub(super) struct EntryFields<'a> {
    journal: &'a AppleJournal,
    /// Directory of the document, used to resolve relative media sources.
    document_dir: &'a Path,
    pub date: Option<DateTime<Utc>>,
    pub title: String,
    pub body: String,
    pub assets: Vec<Asset>,
}

impl<'a> EntryFields<'a> {
    pub fn new(journal: &'a AppleJournal, document_dir: &'a Path) -> Self {
        Self {
            journal,
            document_dir,
            date: None,
            title: String::new(),
            body: String::new(),
            assets: Vec::new(),
        }
    }

    fn parse_grid_item(&self, element: &Element) -> Option<Asset> {
        let id = element.attr("id").filter(|id| !id.is_empty())?;
        let kind = AssetKind::from_class(element.class());

        let source_file = match element.find_map(&mut media_source) {
            Some(src) => Some(self.document_dir.join(src)),
            None => self.journal.resource_file_path(id),
        };
        let extension = source_file
            .as_deref()
            .map(lowercase_extension)
            .unwrap_or_default();

        debug!(id, kind = kind.as_ref(), ?source_file, "found asset");
        Some(Asset {
            id: id.to_string(),
            kind,
            source_file,
            extension,
        })
    }
}

impl Visitor for EntryFields<'_> {
    fn visit_element(&mut self, element: &Element) {
        if element.name != "div" {
            return;
        }
        let class = element.class();
        if let Some((_, handler)) = DIV_MARKERS.iter().find(|(marker, _)| class.contains(marker)) {
            handler(self, element);
        }
    }
}

fn read_page_header(fields: &mut EntryFields<'_>, element: &Element) {
    fields.date = parse_page_header_date(&element.text_content());
}

fn read_title(fields: &mut EntryFields<'_>, element: &Element) {
    fields.title = element.text_content().trim().to_string();
}

fn read_grid_item(fields: &mut EntryFields<'_>, element: &Element) {
    if let Some(asset) = fields.parse_grid_item(element) {
        fields.assets.push(asset);
    }
}

fn read_body_text(fields: &mut EntryFields<'_>, element: &Element) {
    let text = body_text(element);
    if !text.is_empty() {
        fields.body = text;
    }
}

/// `src` of the first usable `<img>` or `<video>` at or below `element`.
///
/// Inline `data:` images do not count. A video may carry its source on the element itself
/// or on its first `<source>` child.
fn media_source(element: &Element) -> Option<PathBuf> {
    let src = match element.name.as_str() {
        "img" => element.attr("src").filter(|src| !src.contains("data:")),
        "video" => element.attr("src").filter(|src| !src.is_empty()).or_else(|| {
            element
                .child_elements()
                .find(|child| child.name == "source")
                .and_then(|source| source.attr("src"))
        }),
        _ => None,
    };
    src.filter(|src| !src.is_empty()).map(PathBuf::from)
}

/// Trimmed, non-blank descendant text of a body block, one text node per line.
fn body_text(element: &Element) -> String {
    element
        .text_nodes()
        .into_iter()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}
