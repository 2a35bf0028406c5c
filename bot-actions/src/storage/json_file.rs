//! JSON file primitives
//!
//! - [`atomic_write`]: tmp file in the same directory + rename, so readers
//!   never observe a partially written document.
//! - [`load_document`]: missing → write default; corrupt → quarantine to
//!   `<path>.bak` (or `<path>.bak.<timestamp>` when that is taken) and reset
//!   to default. Corruption never reaches the caller.
//! - [`read_document`]: side-effect free read for operator-authored files.

use chrono::Utc;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::ffi::OsString;
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::utils::{AppError, AppResult};

/// Suffix of the temporary file used by [`atomic_write`]
pub const TMP_SUFFIX: &str = ".tmp";

/// Suffix of a quarantined (corrupt) document
pub const BACKUP_SUFFIX: &str = ".bak";

/// `bookings.json` + `.bak` → `bookings.json.bak`
pub fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}

fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Write `document` as pretty JSON, atomically replacing `path`.
///
/// On failure the temporary file is removed best-effort and the target is
/// left untouched.
pub fn atomic_write<T: Serialize + ?Sized>(path: &Path, document: &T) -> io::Result<()> {
    ensure_parent_dir(path)?;
    let tmp_path = sibling_path(path, TMP_SUFFIX);

    let written = (|| -> io::Result<()> {
        let file = fs::File::create(&tmp_path)?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, document).map_err(io::Error::other)?;
        writer.write_all(b"\n")?;
        let file = writer.into_inner().map_err(|e| e.into_error())?;
        file.sync_all()
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    if let Err(e) = fs::rename(&tmp_path, path) {
        tracing::warn!(path = %path.display(), error = %e, "Failed to rename tmp document");
        let _ = fs::remove_file(&tmp_path);
        return Err(e);
    }

    Ok(())
}

/// First free backup name: `<path>.bak`, then `<path>.bak.<timestamp>`.
/// Existing backups are never overwritten.
pub fn backup_path(path: &Path) -> PathBuf {
    let first = sibling_path(path, BACKUP_SUFFIX);
    if !first.exists() {
        return first;
    }

    let stamp = Utc::now().format("%Y%m%dT%H%M%S%3f").to_string();
    let mut candidate = sibling_path(path, &format!("{BACKUP_SUFFIX}.{stamp}"));
    let mut attempt = 1u32;
    while candidate.exists() {
        candidate = sibling_path(path, &format!("{BACKUP_SUFFIX}.{stamp}.{attempt}"));
        attempt += 1;
    }
    candidate
}

/// Rename a corrupt document to a fresh backup name. Failure is logged and ignored.
pub fn quarantine(path: &Path) -> Option<PathBuf> {
    let backup = backup_path(path);
    match fs::rename(path, &backup) {
        Ok(()) => {
            tracing::warn!(
                path = %path.display(),
                backup = %backup.display(),
                "Corrupt document moved aside"
            );
            Some(backup)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to back up corrupt document");
            None
        }
    }
}

/// Copy a document to a fresh backup name, leaving the original in place.
pub fn preserve_copy(path: &Path) -> Option<PathBuf> {
    let backup = backup_path(path);
    match fs::copy(path, &backup) {
        Ok(_) => {
            tracing::info!(path = %path.display(), backup = %backup.display(), "Document copied aside");
            Some(backup)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to copy document aside");
            None
        }
    }
}

fn write_default<T: Serialize>(path: &Path, document: &T) {
    if let Err(e) = atomic_write(path, document) {
        tracing::warn!(path = %path.display(), error = %e, "Failed to write default document");
    }
}

/// Load a JSON document, parsed as `D` and converted into `T`.
///
/// - missing file → `default` is written and returned
/// - parse failure or shape mismatch → file moved to [`backup_path`],
///   `default` written and returned
/// - any other read failure (permissions, I/O) → `StorageReadFailed`,
///   so a caller never overwrites a store it could not read
pub fn load_document<D, T>(path: &Path, default: impl FnOnce() -> T) -> AppResult<T>
where
    D: DeserializeOwned + Into<T>,
    T: Serialize,
{
    ensure_parent_dir(path).map_err(|e| {
        AppError::storage_read(format!("Cannot create data directory: {}", e))
            .with_detail("path", path.display().to_string())
    })?;

    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::info!(path = %path.display(), "Document not found, creating default");
            let document = default();
            write_default(path, &document);
            return Ok(document);
        }
        Err(e) => {
            return Err(AppError::storage_read(format!("Cannot read document: {}", e))
                .with_detail("path", path.display().to_string()));
        }
    };

    match serde_json::from_slice::<D>(&bytes) {
        Ok(parsed) => Ok(parsed.into()),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to parse document, resetting");
            quarantine(path);
            let document = default();
            write_default(path, &document);
            Ok(document)
        }
    }
}

/// Read a JSON document without side effects. Missing or unreadable → `None`.
pub fn read_document<D: DeserializeOwned>(path: &Path) -> Option<D> {
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "Document not found");
            return None;
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read document");
            return None;
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(document) => Some(document),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to parse document");
            None
        }
    }
}
