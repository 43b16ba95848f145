//! Copies media into the staging area under checksum-addressed names.

use crate::error::{ConvertError, Result};
use md5::{Digest, Md5};
use std::{
    fs::{self, File},
    io::{self, Write},
    path::{Path, PathBuf},
};
use tempfile::NamedTempFile;
use tracing::debug;

pub(super) const PHOTOS_DIR: &str = "photos";
pub(super) const VIDEOS_DIR: &str = "videos";

pub(super) struct StagingDirs {
    pub photos: PathBuf,
    pub videos: PathBuf,
}

impl StagingDirs {
    pub fn create(staging: &Path) -> Result<Self> {
        let dirs = Self {
            photos: staging.join(PHOTOS_DIR),
            videos: staging.join(VIDEOS_DIR),
        };
        for dir in [&dirs.photos, &dirs.videos] {
            fs::create_dir_all(dir).map_err(|source| ConvertError::staging(dir, source))?;
        }
        Ok(dirs)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct StagedMedia {
    /// Lowercase hex MD5 of the file contents.
    pub md5: String,
    pub size: u64,
    pub path: PathBuf,
}

/// Streams `source` once into `<dir>/<md5>.<media_type>`, hashing it on the way.
///
/// A file already staged under the same name is replaced.
pub(super) fn stage_media(source: &Path, media_type: &str, dir: &Path) -> Result<StagedMedia> {
    let mut input = File::open(source).map_err(|source_err| ConvertError::FileOpen {
        path: source.to_path_buf(),
        source: source_err,
    })?;
    let staged = NamedTempFile::new_in(dir).map_err(|err| ConvertError::staging(dir, err))?;

    let mut writer = HashingWriter {
        inner: staged,
        hasher: Md5::new(),
    };
    let size =
        io::copy(&mut input, &mut writer).map_err(|err| ConvertError::staging(dir, err))?;
    writer
        .flush()
        .map_err(|err| ConvertError::staging(dir, err))?;

    let md5 = hex::encode(writer.hasher.finalize());
    let path = dir.join(format!("{md5}.{media_type}"));
    writer
        .inner
        .persist(&path)
        .map_err(|err| ConvertError::staging(&path, err.error))?;

    debug!(source = %source.display(), staged = %path.display(), size, "staged media");
    Ok(StagedMedia { md5, size, path })
}

struct HashingWriter<W> {
    inner: W,
    hasher: Md5,
}

impl<W: Write> Write for HashingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let written = self.inner.write(buf)?;
        self.hasher.update(&buf[..written]);
        Ok(written)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}
