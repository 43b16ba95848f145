use crate::apple_journal::{AppleJournal, ENTRIES_DIR, RESOURCES_DIR};
use chrono::{DateTime, NaiveDate, Utc};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tempfile::{TempDir, tempdir};

/// Midnight UTC of the given day.
pub fn ymd(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .expect("valid date")
        .and_hms_opt(0, 0, 0)
        .expect("valid time")
        .and_utc()
}

/// An on-disk export (`Entries/` + `Resources/`) inside a temporary directory.
///
/// This is the single place tests build exports from; the directory is removed on drop.
pub struct ExportFixture {
    tmp: TempDir,
}

impl ExportFixture {
    pub fn new() -> Self {
        let tmp = tempdir().expect("create temp dir");
        fs::create_dir_all(tmp.path().join(ENTRIES_DIR)).expect("create Entries");
        fs::create_dir_all(tmp.path().join(RESOURCES_DIR)).expect("create Resources");
        Self { tmp }
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn journal(&self) -> AppleJournal {
        AppleJournal::new(self.root())
    }

    pub fn entries_dir(&self) -> PathBuf {
        self.root().join(ENTRIES_DIR)
    }

    pub fn resources_dir(&self) -> PathBuf {
        self.root().join(RESOURCES_DIR)
    }

    /// Writes `Entries/<name>` with `body` wrapped in a minimal export page.
    pub fn entry(&self, name: &str, body: &str) -> PathBuf {
        let html = format!(
            "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"></head>\n<body>\n{body}\n</body>\n</html>\n"
        );
        let path = self.entries_dir().join(name);
        fs::write(&path, html).expect("write entry");
        path
    }

    /// Writes `Resources/<id>.<ext>` and, when `date` is given, its JSON sidecar.
    pub fn resource(&self, id: &str, ext: &str, bytes: &[u8], date: Option<f64>) -> PathBuf {
        let path = self.resources_dir().join(format!("{id}.{ext}"));
        fs::write(&path, bytes).expect("write resource");
        if let Some(date) = date {
            let meta = format!(r#"{{"date": {date}, "placeName": "Sofia, Bulgaria"}}"#);
            fs::write(self.resources_dir().join(format!("{id}.json")), meta)
                .expect("write resource metadata");
        }
        path
    }
}

/// Grid item markup for an asset, referencing its file the way the export does.
pub fn grid_item(id: &str, asset_type: &str, file: Option<&str>) -> String {
    let media = match (asset_type, file) {
        ("video", Some(file)) => format!(r#"<video><source src="../Resources/{file}"></video>"#),
        (_, Some(file)) => format!(r#"<img src="../Resources/{file}" class="asset_image"/>"#),
        (_, None) => String::new(),
    };
    format!(r#"<div id="{id}" class="gridItem assetType_{asset_type}">{media}</div>"#)
}
