//! Packs a staging directory into a deflated zip archive.

use crate::error::{ConvertError, Result};
use crate::utils::path_utils::archive_member_name;
use std::{
    fs::{self, File},
    io,
    path::Path,
};
use tracing::{debug, info, warn};
use walkdir::WalkDir;
use zip::{CompressionMethod, ZipWriter, result::ZipResult, write::SimpleFileOptions};

/// Members at or above this size need the zip64 extension.
const LARGE_FILE_THRESHOLD: u64 = u32::MAX as u64;

/// Writes every regular file below `staging` into a new archive at `destination`.
///
/// Members are named by their `/`-separated path relative to `staging` and appear in walk
/// order (siblings sorted by file name). Directories get no member of their own. The parent
/// of `destination` must already exist. On failure no archive is left behind.
pub fn write_archive(staging: &Path, destination: &Path) -> Result<()> {
    let file = File::create(destination).map_err(|err| ConvertError::archive(destination, err))?;

    match write_members(staging, file) {
        Ok(count) => {
            info!(members = count, archive = %destination.display(), "wrote archive");
            Ok(())
        }
        Err(err) => {
            remove_partial_archive(destination);
            Err(ConvertError::archive(destination, err))
        }
    }
}

fn remove_partial_archive(destination: &Path) {
    match fs::remove_file(destination) {
        Ok(()) => debug!(archive = %destination.display(), "removed partial archive"),
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => warn!(
            archive = %destination.display(),
            error = %err,
            "failed to remove partial archive"
        ),
    }
}

fn write_members(staging: &Path, file: File) -> ZipResult<usize> {
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut count = 0;

    for entry in WalkDir::new(staging).sort_by_file_name() {
        let entry = entry.map_err(io::Error::from)?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = archive_member_name(staging, entry.path()) else {
            continue;
        };

        let size = entry.metadata().map_err(io::Error::from)?.len();
        debug!(member = %name, size, "adding archive member");
        zip.start_file(name, options.large_file(size >= LARGE_FILE_THRESHOLD))?;
        let mut input = File::open(entry.path())?;
        io::copy(&mut input, &mut zip)?;
        count += 1;
    }

    zip.finish()?;
    Ok(count)
}
