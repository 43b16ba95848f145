//! Error taxonomy for the conversion pipeline.
//!
//! Every variant carries the path (or entry name) it failed on, so a message surfaced to the
//! user is enough to find the offending file.

use std::{io, path::PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConvertError>;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("input directory {} is missing the {dir} subdirectory", path.display())]
    InputStructure { path: PathBuf, dir: &'static str },

    #[error("failed to read directory {}", path.display())]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse entry {name}")]
    Parse {
        name: String,
        #[source]
        source: Box<ConvertError>,
    },

    #[error("failed to open {}", path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Not produced by the html5ever-backed parser, which recovers from any input.
    #[error("failed to parse markup in {}: {reason}", path.display())]
    MarkupParse { path: PathBuf, reason: String },

    #[error("failed to read metadata {}", path.display())]
    MetadataRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse metadata {}", path.display())]
    MetadataParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to write staging file {}", path.display())]
    StagingIo {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to create archive {}", path.display())]
    Archive {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
}

impl ConvertError {
    pub(crate) fn staging(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::StagingIo {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn archive(path: impl Into<PathBuf>, source: impl Into<zip::result::ZipError>) -> Self {
        Self::Archive {
            path: path.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn parse_error_names_the_entry_and_keeps_the_cause() {
        let inner = ConvertError::FileOpen {
            path: PathBuf::from("/export/Entries/a.html"),
            source: io::Error::new(io::ErrorKind::NotFound, "gone"),
        };
        let err = ConvertError::Parse {
            name: "a.html".to_string(),
            source: Box::new(inner),
        };

        assert_eq!(err.to_string(), "failed to parse entry a.html");
        let cause = err.source().unwrap().to_string();
        assert!(cause.contains("/export/Entries/a.html"));
    }

    #[test]
    fn input_structure_names_missing_dir() {
        let err = ConvertError::InputStructure {
            path: PathBuf::from("/export"),
            dir: "Entries",
        };
        assert_eq!(
            err.to_string(),
            "input directory /export is missing the Entries subdirectory"
        );
    }
}
