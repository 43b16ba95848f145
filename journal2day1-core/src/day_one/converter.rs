//! Maps parsed Apple Journal entries onto the Day One schema and packs the result.

use super::day_one_entry::{Attachment, CREATION_DEVICE, DayOneEntry, DayOneExport};
use super::id_generator::{IdGenerator, UuidGenerator};
use super::media::{StagingDirs, stage_media};
use crate::apple_journal::{AppleJournal, ParsedEntry};
use crate::archive::write_archive;
use crate::config::DEFAULT_TIME_ZONE;
use crate::error::{ConvertError, Result};
use crate::utils::date_utils::format_day_one_date;
use crate::utils::format_utils::{
    build_entry_text, compact_identifier, is_video_extension, normalize_media_type,
    photo_placeholder,
};
use chrono::Utc;
use std::{
    fs::File,
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::{debug, info, warn};

/// Called with `(current, total)` after each entry has been mapped.
pub type ProgressFn = Box<dyn FnMut(usize, usize)>;

/// One-shot Apple Journal → Day One conversion.
///
/// A converter owns no state between runs besides its settings; every [`Converter::convert`]
/// re-reads the export and builds a fresh staging area, which is removed when the call returns.
pub struct Converter {
    journal: AppleJournal,
    journal_name: String,
    time_zone: String,
    ids: Box<dyn IdGenerator>,
    on_progress: Option<ProgressFn>,
    staging_parent: Option<PathBuf>,
}

/// Output of mapping one entry's assets.
#[derive(Default)]
struct EntryMedia {
    photos: Vec<Attachment>,
    videos: Vec<Attachment>,
    photo_refs: Vec<String>,
}

impl Converter {
    pub fn new(export_root: impl Into<PathBuf>, journal_name: impl Into<String>) -> Self {
        Self {
            journal: AppleJournal::new(export_root),
            journal_name: journal_name.into(),
            time_zone: DEFAULT_TIME_ZONE.to_string(),
            ids: Box::new(UuidGenerator),
            on_progress: None,
            staging_parent: None,
        }
    }

    /// Zone label stored on every entry. It is not interpreted; all dates are written in UTC.
    pub fn set_time_zone(&mut self, time_zone: impl Into<String>) {
        self.time_zone = time_zone.into();
    }

    /// Names the JSON file inside the archive (`<name>.json`).
    pub fn set_journal_name(&mut self, journal_name: impl Into<String>) {
        self.journal_name = journal_name.into();
    }

    pub fn set_progress(&mut self, on_progress: impl FnMut(usize, usize) + 'static) {
        self.on_progress = Some(Box::new(on_progress));
    }

    /// Directory the per-run staging area is created in. Defaults to the system temp dir.
    pub fn set_staging_parent(&mut self, dir: impl Into<PathBuf>) {
        self.staging_parent = Some(dir.into());
    }

    pub fn with_id_generator(mut self, ids: impl IdGenerator + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    pub fn journal(&self) -> &AppleJournal {
        &self.journal
    }

    pub fn journal_name(&self) -> &str {
        &self.journal_name
    }

    pub fn time_zone(&self) -> &str {
        &self.time_zone
    }

    /// Converts the whole export into a Day One archive at `output`.
    ///
    /// Any error aborts the run; the archive only exists afterwards if the call succeeded.
    pub fn convert(&mut self, output: &Path) -> Result<()> {
        let entries = self.journal.parse_all()?;

        let staging_parent = self
            .staging_parent
            .clone()
            .unwrap_or_else(std::env::temp_dir);
        let staging = tempfile::Builder::new()
            .prefix("journal2day1-")
            .tempdir_in(&staging_parent)
            .map_err(|err| ConvertError::staging(&staging_parent, err))?;
        let dirs = StagingDirs::create(staging.path())?;

        let export = self.convert_entries(&entries, &dirs)?;
        self.write_json(staging.path(), &export)?;

        info!(entries = export.entries.len(), output = %output.display(), "writing archive");
        write_archive(staging.path(), output)
    }

    fn convert_entries(&mut self, entries: &[ParsedEntry], dirs: &StagingDirs) -> Result<DayOneExport> {
        let total = entries.len();
        let mut export = DayOneExport::with_capacity(total);

        for (i, entry) in entries.iter().enumerate() {
            export.entries.push(self.convert_entry(entry, dirs)?);
            if let Some(on_progress) = self.on_progress.as_mut() {
                on_progress(i + 1, total);
            }
        }
        Ok(export)
    }

    fn convert_entry(&mut self, entry: &ParsedEntry, dirs: &StagingDirs) -> Result<DayOneEntry> {
        let uuid = compact_identifier(&self.ids.next_id().to_string());
        let creation_date = format_day_one_date(entry.date);
        let modified_date = format_day_one_date(Utc::now());

        let media = self.convert_assets(entry, dirs, &creation_date)?;
        let text = build_entry_text(&entry.title, &entry.body, &media.photo_refs);

        debug!(
            source = %entry.source_path.display(),
            %uuid,
            photos = media.photos.len(),
            videos = media.videos.len(),
            "mapped entry"
        );
        Ok(DayOneEntry {
            uuid,
            creation_date,
            modified_date,
            text,
            starred: false,
            is_pinned: false,
            is_all_day: false,
            duration: 0,
            time_zone: self.time_zone.clone(),
            creation_device: CREATION_DEVICE.to_string(),
            photos: media.photos.into_iter().map(Into::into).collect(),
            videos: media.videos.into_iter().map(Into::into).collect(),
        })
    }

    /// Stages every convertible asset of `entry`, in document order.
    ///
    /// `orderInEntry` is a single counter shared by photos and videos that only advances for
    /// assets that made it into the output.
    fn convert_assets(
        &self,
        entry: &ParsedEntry,
        dirs: &StagingDirs,
        creation_date: &str,
    ) -> Result<EntryMedia> {
        let mut media = EntryMedia::default();

        for asset in &entry.assets {
            if asset.kind.is_excluded() {
                debug!(id = %asset.id, kind = asset.kind.as_ref(), "skipping asset kind");
                continue;
            }
            let Some(resource) = self.journal.resource_file_path(&asset.id) else {
                warn!(
                    id = %asset.id,
                    entry = %entry.source_path.display(),
                    "no resource file for asset, dropping it"
                );
                continue;
            };

            let is_video = is_video_extension(&asset.extension);
            let media_type = normalize_media_type(&asset.extension);
            let target_dir = if is_video { &dirs.videos } else { &dirs.photos };
            let staged = stage_media(&resource, &media_type, target_dir)?;

            let attachment = Attachment {
                identifier: compact_identifier(&asset.id),
                media_type,
                md5: staged.md5,
                file_size: staged.size,
                order_in_entry: media.photos.len() + media.videos.len(),
                date: self.asset_date(&asset.id, creation_date),
            };

            if is_video {
                media.videos.push(attachment);
            } else {
                media.photo_refs.push(photo_placeholder(&attachment.identifier));
                media.photos.push(attachment);
            }
        }
        Ok(media)
    }

    /// The asset's own date from its metadata, or `fallback` when there is none worth using.
    fn asset_date(&self, id: &str, fallback: &str) -> String {
        match self.journal.load_resource_meta(id) {
            Ok(meta) => meta
                .date_utc()
                .map(format_day_one_date)
                .unwrap_or_else(|| fallback.to_string()),
            Err(err) => {
                debug!(id, error = %err, "no usable metadata, using entry date");
                fallback.to_string()
            }
        }
    }

    fn write_json(&self, staging: &Path, export: &DayOneExport) -> Result<()> {
        let path = staging.join(format!("{}.json", self.journal_name));
        let file = File::create(&path).map_err(|err| ConvertError::staging(&path, err))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, export)
            .map_err(std::io::Error::from)
            .and_then(|()| writer.flush())
            .map_err(|err| ConvertError::staging(&path, err))
    }
}
