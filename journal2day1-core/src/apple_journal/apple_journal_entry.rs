use crate::utils::date_utils::cocoa_timestamp_to_utc;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::PathBuf;
use strum_macros::{AsRefStr, EnumIter};

/// One entry recovered from a single exported HTML document.
#[derive(Debug, Clone)]
pub struct ParsedEntry {
    pub date: DateTime<Utc>,
    pub title: String,
    pub body: String,
    /// Media references in document order.
    pub assets: Vec<Asset>,
    pub source_path: PathBuf,
}

/// A media reference found in an entry's asset grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Asset {
    /// The export's identifier for the resource, also the prefix of its file names in `Resources/`.
    pub id: String,
    pub kind: AssetKind,
    /// Backing file, when one could be located.
    pub source_file: Option<PathBuf>,
    /// Lowercased, without the leading dot. Empty when no file was located.
    pub extension: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumIter)]
#[strum(serialize_all = "kebab-case")]
pub enum AssetKind {
    Photo,
    Video,
    Map,
    MotionActivity,
    Audio,
    StateOfMind,
    Unknown,
}

impl AssetKind {
    /// Class markers of the export's asset grid, tested in order; the first contained marker wins.
    const CLASS_MARKERS: &'static [(&'static str, AssetKind)] = &[
        ("assetType_photo", AssetKind::Photo),
        ("assetType_livePhoto", AssetKind::Photo),
        ("assetType_video", AssetKind::Video),
        ("assetType_genericMap", AssetKind::Map),
        ("assetType_motionActivity", AssetKind::MotionActivity),
        ("assetType_audio", AssetKind::Audio),
        ("assetType_stateOfMind", AssetKind::StateOfMind),
    ];

    pub fn from_class(class: &str) -> Self {
        Self::CLASS_MARKERS
            .iter()
            .find(|(marker, _)| class.contains(marker))
            .map(|(_, kind)| *kind)
            .unwrap_or(AssetKind::Unknown)
    }

    /// Kinds that have no Day One counterpart and never reach the output.
    pub fn is_excluded(self) -> bool {
        matches!(
            self,
            AssetKind::Map | AssetKind::MotionActivity | AssetKind::StateOfMind
        )
    }
}

/// Contents of a `Resources/<id>.json` sidecar.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResourceMeta {
    /// Seconds since 2001-01-01T00:00:00Z; `<= 0` means unknown.
    #[serde(default)]
    pub date: f64,
    #[serde(default, rename = "placeName")]
    pub place_name: String,
}

impl ResourceMeta {
    pub fn date_utc(&self) -> Option<DateTime<Utc>> {
        (self.date > 0.0).then(|| cocoa_timestamp_to_utc(self.date))
    }
}
