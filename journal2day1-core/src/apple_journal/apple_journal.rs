//! Reader for an Apple Journal HTML export.
//!
//! ```text
//! <root>/Entries/*.html     one document per entry
//! <root>/Resources/<id>.*   media backing an asset
//! <root>/Resources/<id>.json optional sidecar with the asset's date and place
//! ```

use super::apple_journal_entry::{ParsedEntry, ResourceMeta};
use super::extract::EntryFields;
use super::html_tree::parse_document;
use crate::error::{ConvertError, Result};
use crate::utils::date_utils::{date_from_file_name, zero_time};
use crate::utils::path_utils::{has_extension, is_plain_file_stem};
use chrono::{DateTime, Utc};
use std::{
    borrow::Cow,
    fs,
    io,
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

pub const ENTRIES_DIR: &str = "Entries";
pub const RESOURCES_DIR: &str = "Resources";
const ENTRY_EXTENSION: &str = "html";
const METADATA_EXTENSION: &str = "json";

#[derive(Debug, Clone)]
pub struct AppleJournal {
    root: PathBuf,
}

impl AppleJournal {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn entries_dir(&self) -> PathBuf {
        self.root.join(ENTRIES_DIR)
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.root.join(RESOURCES_DIR)
    }

    /// Checks that both `Entries/` and `Resources/` exist under the root.
    pub fn validate(&self) -> Result<()> {
        for dir in [ENTRIES_DIR, RESOURCES_DIR] {
            if !self.root.join(dir).is_dir() {
                return Err(ConvertError::InputStructure {
                    path: self.root.clone(),
                    dir,
                });
            }
        }
        Ok(())
    }

    /// Parses every `.html` document directly inside `Entries/` (subdirectories are skipped),
    /// ordered by file name.
    ///
    /// A single document that fails to parse aborts the whole batch.
    pub fn parse_all(&self) -> Result<Vec<ParsedEntry>> {
        let entries_dir = self.entries_dir();
        let mut documents = list_dir(&entries_dir)?
            .into_iter()
            .filter(|path| !path.is_dir() && has_extension(path, ENTRY_EXTENSION))
            .collect::<Vec<_>>();
        documents.sort();

        let entries = documents
            .iter()
            .map(|path| {
                self.parse_entry(path).map_err(|source| ConvertError::Parse {
                    name: file_name(path),
                    source: Box::new(source),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        info!(count = entries.len(), dir = %entries_dir.display(), "parsed entries");
        Ok(entries)
    }

    /// Parses a single entry document.
    ///
    /// When the page header carries no usable date, the first asset's metadata date is tried,
    /// then a `YYYY-MM-DD_` prefix in the file name, and finally the zero time.
    pub fn parse_entry(&self, path: &Path) -> Result<ParsedEntry> {
        let bytes = fs::read(path).map_err(|source| ConvertError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let source = String::from_utf8_lossy(&bytes);
        if let Cow::Owned(_) = source {
            warn!(path = %path.display(), "document is not valid UTF-8, replacing bad bytes");
        }

        let root = parse_document(&source);
        let document_dir = path.parent().unwrap_or(Path::new(""));
        let mut fields = EntryFields::new(self, document_dir);
        root.accept(&mut fields);

        let date = fields
            .date
            .or_else(|| self.date_from_first_asset(&fields))
            .or_else(|| date_from_file_name(path))
            .unwrap_or_else(zero_time);

        debug!(
            path = %path.display(),
            %date,
            assets = fields.assets.len(),
            "parsed entry"
        );
        Ok(ParsedEntry {
            date,
            title: fields.title,
            body: fields.body,
            assets: fields.assets,
            source_path: path.to_path_buf(),
        })
    }

    fn date_from_first_asset(&self, fields: &EntryFields<'_>) -> Option<DateTime<Utc>> {
        let first = fields.assets.first()?;
        self.load_resource_meta(&first.id).ok()?.date_utc()
    }

    /// Reads `Resources/<id>.json`.
    pub fn load_resource_meta(&self, id: &str) -> Result<ResourceMeta> {
        if !is_plain_file_stem(id) {
            return Err(ConvertError::MetadataRead {
                path: self.resources_dir().join(id),
                source: io::Error::new(io::ErrorKind::InvalidInput, "asset id is not a file name"),
            });
        }
        let path = self
            .resources_dir()
            .join(format!("{id}.{METADATA_EXTENSION}"));
        let data = fs::read(&path).map_err(|source| ConvertError::MetadataRead {
            path: path.clone(),
            source,
        })?;
        serde_json::from_slice(&data).map_err(|source| ConvertError::MetadataParse { path, source })
    }

    /// Path of the first non-metadata file in `Resources/` whose name starts with `id`.
    ///
    /// Ids containing a path separator or `..` never resolve.
    ///
    /// Candidates are compared by file name, so the result does not depend on the order the
    /// file system lists them in. An unreadable directory counts as "not found".
    pub fn resource_file_path(&self, id: &str) -> Option<PathBuf> {
        if !is_plain_file_stem(id) {
            warn!(id, "asset id is not a plain file name, ignoring it");
            return None;
        }
        let resources_dir = self.resources_dir();
        let mut candidates = list_dir(&resources_dir)
            .ok()?
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .and_then(|name| name.to_str())
                    .is_some_and(|name| name.starts_with(id))
                    && !has_extension(path, METADATA_EXTENSION)
                    && path.is_file()
            })
            .collect::<Vec<_>>();
        candidates.sort();
        candidates.into_iter().next()
    }
}

fn list_dir(dir: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |source| ConvertError::DirectoryRead {
        path: dir.to_path_buf(),
        source,
    };
    fs::read_dir(dir)
        .map_err(read_error)?
        .map(|entry| entry.map(|entry| entry.path()).map_err(read_error))
        .collect()
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::apple_journal::AssetKind;
    use crate::tests::common::{ExportFixture, ymd};
    use chrono::TimeZone;

    #[test]
    fn validate_requires_both_subdirectories() {
        let fixture = ExportFixture::new();
        assert!(fixture.journal().validate().is_ok());

        fs::remove_dir(fixture.resources_dir()).unwrap();
        let err = fixture.journal().validate().unwrap_err();
        assert!(matches!(
            err,
            ConvertError::InputStructure {
                dir: RESOURCES_DIR,
                ..
            }
        ));
    }

    #[test]
    fn parse_all_reads_only_html_documents_in_name_order() {
        let fixture = ExportFixture::new();
        fixture.entry("2025-01-02_B.html", r#"<div class="title">B</div>"#);
        fixture.entry("2025-01-01_A.html", r#"<div class="title">A</div>"#);
        fixture.entry("notes.txt", "not an entry");
        fs::create_dir(fixture.entries_dir().join("nested.html")).unwrap();

        let entries = fixture.journal().parse_all().unwrap();
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    #[test]
    fn parse_all_fails_without_entries_dir() {
        let fixture = ExportFixture::new();
        fs::remove_dir(fixture.entries_dir()).unwrap();
        let err = fixture.journal().parse_all().unwrap_err();
        assert!(matches!(err, ConvertError::DirectoryRead { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn parse_all_aborts_on_an_unreadable_document() {
        let fixture = ExportFixture::new();
        fixture.entry("good.html", r#"<div class="title">Fine</div>"#);
        std::os::unix::fs::symlink(
            fixture.root().join("gone.html"),
            fixture.entries_dir().join("bad.html"),
        )
        .unwrap();

        let err = fixture.journal().parse_all().unwrap_err();
        match err {
            ConvertError::Parse { name, source } => {
                assert_eq!(name, "bad.html");
                assert!(matches!(*source, ConvertError::FileOpen { .. }));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn parse_all_skips_subdirectories() {
        let fixture = ExportFixture::new();
        fixture.entry("a.html", r#"<div class="title">A</div>"#);
        fs::create_dir(fixture.entries_dir().join("nested.html")).unwrap();

        let entries = fixture.journal().parse_all().unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let fixture = ExportFixture::new();
        let path = fixture.entries_dir().join("latin1.html");
        let mut html = b"<html><body><div class=\"title\">Caf".to_vec();
        html.push(0xE9);
        html.extend_from_slice(b"</div><div class=\"bodyText\"><p>Ok</p></div></body></html>");
        fs::write(&path, html).unwrap();

        let entries = fixture.journal().parse_all().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Caf\u{FFFD}");
        assert_eq!(entries[0].body, "Ok");
    }

    #[test]
    fn parse_entry_fails_on_missing_file() {
        let fixture = ExportFixture::new();
        let err = fixture
            .journal()
            .parse_entry(&fixture.entries_dir().join("missing.html"))
            .unwrap_err();
        assert!(matches!(err, ConvertError::FileOpen { .. }));
    }

    #[test]
    fn page_header_date_wins() {
        let fixture = ExportFixture::new();
        fixture.resource("P-1", "jpg", b"jpeg", Some(784_043_393.0));
        let path = fixture.entry(
            "2024-02-02_Entry.html",
            r#"<div class="pageHeader">Monday, 15 December 2025</div>
               <div id="P-1" class="gridItem assetType_photo"></div>"#,
        );

        let entry = fixture.journal().parse_entry(&path).unwrap();
        assert_eq!(entry.date, ymd(2025, 12, 15));
        assert_eq!(entry.source_path, path);
    }

    #[test]
    fn date_falls_back_to_first_asset_metadata() {
        let fixture = ExportFixture::new();
        fixture.resource("P-1", "jpg", b"jpeg", Some(784_043_393.0));
        let path = fixture.entry(
            "2024-02-02_Entry.html",
            r#"<div id="P-1" class="gridItem assetType_photo"></div>"#,
        );

        let entry = fixture.journal().parse_entry(&path).unwrap();
        assert_eq!(
            entry.date,
            Utc.with_ymd_and_hms(2025, 11, 5, 13, 49, 53).unwrap()
        );
        assert_eq!(entry.assets[0].kind, AssetKind::Photo);
        assert_eq!(
            entry.assets[0].source_file,
            Some(fixture.resources_dir().join("P-1.jpg"))
        );
    }

    #[test]
    fn date_falls_back_to_file_name_then_zero() {
        let fixture = ExportFixture::new();
        fixture.resource("P-0", "jpg", b"jpeg", Some(0.0));
        let named = fixture.entry(
            "2024-02-02_Entry.html",
            r#"<div id="P-0" class="gridItem assetType_photo"></div>"#,
        );
        let unnamed = fixture.entry("Entry.html", r#"<div class="title">x</div>"#);

        let journal = fixture.journal();
        assert_eq!(journal.parse_entry(&named).unwrap().date, ymd(2024, 2, 2));
        assert_eq!(journal.parse_entry(&unnamed).unwrap().date, zero_time());
    }

    #[test]
    fn resource_meta_errors_are_typed() {
        let fixture = ExportFixture::new();
        let journal = fixture.journal();
        assert!(matches!(
            journal.load_resource_meta("nope").unwrap_err(),
            ConvertError::MetadataRead { .. }
        ));

        fs::write(fixture.resources_dir().join("BROKEN.json"), "{ not json").unwrap();
        assert!(matches!(
            journal.load_resource_meta("BROKEN").unwrap_err(),
            ConvertError::MetadataParse { .. }
        ));
    }

    #[test]
    fn resource_file_path_skips_metadata() {
        let fixture = ExportFixture::new();
        fixture.resource("ABC", "heic", b"img", Some(1.0));
        let journal = fixture.journal();

        assert_eq!(
            journal.resource_file_path("ABC"),
            Some(fixture.resources_dir().join("ABC.heic"))
        );
        assert_eq!(journal.resource_file_path("XYZ"), None);
    }

    #[test]
    fn ids_with_path_components_never_resolve() {
        let fixture = ExportFixture::new();
        fixture.resource("ABC", "heic", b"img", Some(1.0));
        fs::write(fixture.root().join("outside.json"), r#"{"date": 1.0}"#).unwrap();
        fs::write(fixture.root().join("outside.jpg"), b"secret").unwrap();
        let journal = fixture.journal();

        assert_eq!(journal.resource_file_path("../outside"), None);
        assert_eq!(journal.resource_file_path("sub/ABC"), None);
        assert!(matches!(
            journal.load_resource_meta("../outside"),
            Err(ConvertError::MetadataRead { .. })
        ));
    }
}
