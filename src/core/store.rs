//! Reading and writing locale artifacts on disk.
//!
//! Overwrites go through [`write_atomic`]: the current file is copied to a
//! timestamped backup first, then the new content is written to a temporary
//! file in the same directory and renamed over the original. A failed backup
//! aborts the write.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use chrono::{DateTime, Local};
use tempfile::NamedTempFile;
use thiserror::Error;

use super::{
    parsers::{LocaleDocument, ParseError, parse_locale_source},
    serialize::serialize_document,
};

const BACKUP_TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S%.3f";

#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },
    #[error("failed to back up {} to {}: {source}", path.display(), backup.display())]
    Backup {
        path: PathBuf,
        backup: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Result of a successful [`write_atomic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteReceipt {
    pub path: PathBuf,
    /// Where the previous content was copied, if the file existed.
    pub backup: Option<PathBuf>,
}

/// Read and parse a locale module.
pub fn load(path: &Path) -> Result<LocaleDocument, ArtifactError> {
    let source = fs::read_to_string(path).map_err(|source| ArtifactError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document = parse_locale_source(&source).map_err(|source| ArtifactError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    tracing::debug!(path = %path.display(), leaves = document.tree.leaf_count(), "loaded locale");
    Ok(document)
}

/// Serialize `document` and write it to `path` with [`write_atomic`].
pub fn save(
    path: &Path,
    document: &LocaleDocument,
    backup_dir: Option<&Path>,
) -> Result<WriteReceipt, ArtifactError> {
    write_atomic(path, &serialize_document(document), backup_dir)
}

/// `<dir>/<file name>.<YYYYMMDD-HHMMSS.mmm>.bak`, where `<dir>` is
/// `backup_dir` or the artifact's own directory.
pub fn backup_path(path: &Path, backup_dir: Option<&Path>, at: DateTime<Local>) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "locale".to_string());
    let name = format!("{}.{}.bak", file_name, at.format(BACKUP_TIMESTAMP_FORMAT));
    match backup_dir {
        Some(dir) => dir.join(name),
        None => parent_dir(path).join(name),
    }
}

fn parent_dir(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Copy `path` to a fresh backup file. Never overwrites an earlier backup.
fn backup(path: &Path, backup_dir: Option<&Path>) -> Result<PathBuf, ArtifactError> {
    let base = backup_path(path, backup_dir, Local::now());
    let fail = |backup: &Path, source: io::Error| ArtifactError::Backup {
        path: path.to_path_buf(),
        backup: backup.to_path_buf(),
        source,
    };

    if let Some(dir) = backup_dir {
        fs::create_dir_all(dir).map_err(|e| fail(&base, e))?;
    }

    let mut candidate = base.clone();
    let mut attempt = 1;
    while candidate.exists() {
        candidate = base.with_extension(format!("{}.bak", attempt));
        attempt += 1;
    }

    fs::copy(path, &candidate).map_err(|e| fail(&candidate, e))?;
    Ok(candidate)
}

/// Replace the content of `path` without ever leaving a partial file.
pub fn write_atomic(
    path: &Path,
    contents: &str,
    backup_dir: Option<&Path>,
) -> Result<WriteReceipt, ArtifactError> {
    let backup = if path.exists() {
        let backup = backup(path, backup_dir)?;
        tracing::info!(path = %path.display(), backup = %backup.display(), "backed up locale");
        Some(backup)
    } else {
        None
    };

    let write_error = |source: io::Error| ArtifactError::Write {
        path: path.to_path_buf(),
        source,
    };

    let mut temp = NamedTempFile::new_in(parent_dir(path)).map_err(write_error)?;
    temp.write_all(contents.as_bytes()).map_err(write_error)?;
    temp.as_file().sync_all().map_err(write_error)?;
    // The rename replaces metadata too, so carry the original mode over.
    if backup.is_some() {
        let permissions = fs::metadata(path).map_err(write_error)?.permissions();
        temp.as_file()
            .set_permissions(permissions)
            .map_err(write_error)?;
    }
    temp.persist(path).map_err(|e| write_error(e.error))?;

    tracing::info!(path = %path.display(), bytes = contents.len(), "wrote locale");
    Ok(WriteReceipt {
        path: path.to_path_buf(),
        backup,
    })
}
