//! Day One JSON import schema. Field names must match what Day One reads.

use serde::{Deserialize, Serialize};

pub const DAY_ONE_VERSION: &str = "1.0";

/// Label written as `creationDevice` on entries and attachments.
pub const CREATION_DEVICE: &str = "journal2day1";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOneExport {
    pub metadata: DayOneMetadata,
    pub entries: Vec<DayOneEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayOneMetadata {
    pub version: String,
}

impl DayOneExport {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            metadata: DayOneMetadata {
                version: DAY_ONE_VERSION.to_string(),
            },
            entries: Vec::with_capacity(capacity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOneEntry {
    pub uuid: String,
    pub creation_date: String,
    pub modified_date: String,
    /// Markdown body, with photos embedded as `dayone-moment://` links.
    pub text: String,
    pub starred: bool,
    pub is_pinned: bool,
    pub is_all_day: bool,
    pub duration: u32,
    pub time_zone: String,
    pub creation_device: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub photos: Vec<DayOnePhoto>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub videos: Vec<DayOneVideo>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOnePhoto {
    pub identifier: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub md5: String,
    pub file_size: u64,
    pub order_in_entry: usize,
    pub creation_device: String,
    pub duration: u32,
    pub favorite: bool,
    pub is_sketch: bool,
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOneVideo {
    pub identifier: String,
    #[serde(rename = "type")]
    pub media_type: String,
    pub md5: String,
    pub file_size: u64,
    pub order_in_entry: usize,
    pub creation_device: String,
    pub duration: u32,
    pub favorite: bool,
    pub date: String,
}

/// What photos and videos have in common before they are split by media class.
#[derive(Debug, Clone)]
pub(super) struct Attachment {
    pub identifier: String,
    pub media_type: String,
    pub md5: String,
    pub file_size: u64,
    pub order_in_entry: usize,
    pub date: String,
}

impl From<Attachment> for DayOnePhoto {
    fn from(attachment: Attachment) -> Self {
        Self {
            identifier: attachment.identifier,
            media_type: attachment.media_type,
            md5: attachment.md5,
            file_size: attachment.file_size,
            order_in_entry: attachment.order_in_entry,
            creation_device: CREATION_DEVICE.to_string(),
            duration: 0,
            favorite: false,
            is_sketch: false,
            date: attachment.date,
        }
    }
}

impl From<Attachment> for DayOneVideo {
    fn from(attachment: Attachment) -> Self {
        Self {
            identifier: attachment.identifier,
            media_type: attachment.media_type,
            md5: attachment.md5,
            file_size: attachment.file_size,
            order_in_entry: attachment.order_in_entry,
            creation_device: CREATION_DEVICE.to_string(),
            duration: 0,
            favorite: false,
            date: attachment.date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn attachment() -> Attachment {
        Attachment {
            identifier: "ABC".to_string(),
            media_type: "jpeg".to_string(),
            md5: "d41d8cd98f00b204e9800998ecf8427e".to_string(),
            file_size: 0,
            order_in_entry: 2,
            date: "2025-01-05T00:00:00Z".to_string(),
        }
    }

    fn entry() -> DayOneEntry {
        DayOneEntry {
            uuid: "U".to_string(),
            creation_date: "2025-01-05T00:00:00Z".to_string(),
            modified_date: "2025-01-06T00:00:00Z".to_string(),
            text: String::new(),
            starred: false,
            is_pinned: false,
            is_all_day: false,
            duration: 0,
            time_zone: "Europe/Sofia".to_string(),
            creation_device: CREATION_DEVICE.to_string(),
            photos: Vec::new(),
            videos: Vec::new(),
        }
    }

    #[test]
    fn entry_without_media_omits_photos_and_videos() {
        let value = serde_json::to_value(entry()).unwrap();
        assert_eq!(
            value,
            json!({
                "uuid": "U",
                "creationDate": "2025-01-05T00:00:00Z",
                "modifiedDate": "2025-01-06T00:00:00Z",
                "text": "",
                "starred": false,
                "isPinned": false,
                "isAllDay": false,
                "duration": 0,
                "timeZone": "Europe/Sofia",
                "creationDevice": "journal2day1"
            })
        );
    }

    #[test]
    fn photo_fields_use_day_one_names() {
        let mut entry = entry();
        entry.photos.push(attachment().into());
        entry.videos.push(attachment().into());
        let value = serde_json::to_value(entry).unwrap();

        assert_eq!(
            value["photos"][0],
            json!({
                "identifier": "ABC",
                "type": "jpeg",
                "md5": "d41d8cd98f00b204e9800998ecf8427e",
                "fileSize": 0,
                "orderInEntry": 2,
                "creationDevice": "journal2day1",
                "duration": 0,
                "favorite": false,
                "isSketch": false,
                "date": "2025-01-05T00:00:00Z"
            })
        );
        assert_eq!(value["videos"][0].get("isSketch"), None::<&Value>);
        assert_eq!(value["videos"][0]["type"], "jpeg");
    }

    #[test]
    fn export_root_carries_version() {
        let value = serde_json::to_value(DayOneExport::with_capacity(0)).unwrap();
        assert_eq!(value, json!({"metadata": {"version": "1.0"}, "entries": []}));
    }
}
