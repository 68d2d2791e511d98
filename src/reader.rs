//! Directory enumeration.
//!
//! [`read_entries`] opens a directory and yields its children lazily. The
//! `.` and `..` pseudo-entries are always removed, and so is every other
//! name starting with `.`.

use crate::data::DirectoryEntry;
use crate::error::{ListingError, Result};
use std::fs::{self, ReadDir};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Lazy, single-pass sequence of the visible entries of one directory.
pub struct Entries {
    dir: PathBuf,
    inner: ReadDir,
}

/// Opens `path` for enumeration.
///
/// # Errors
/// Returns [`ListingError::DirectoryUnreadable`] when the path does not exist,
/// is not a directory, or cannot be opened.
pub fn read_entries(path: &Path) -> Result<Entries> {
    let inner = fs::read_dir(path).map_err(|source| ListingError::DirectoryUnreadable {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(Entries {
        dir: path.to_path_buf(),
        inner,
    })
}

/// Enumerates `path` fully into an owned buffer.
pub fn collect_entries(path: &Path) -> Result<Vec<DirectoryEntry>> {
    Ok(read_entries(path)?.collect())
}

/// `.` and `..` are never listed.
pub fn is_pseudo_entry(name: &[u8]) -> bool {
    name == b"." || name == b".."
}

/// Hidden entries are excluded from every listing.
pub fn is_hidden(entry: &DirectoryEntry) -> bool {
    entry.is_hidden
}

impl Iterator for Entries {
    type Item = DirectoryEntry;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let dirent = match self.inner.next()? {
                Ok(d) => d,
                Err(e) => {
                    debug!(dir = %self.dir.display(), error = %e, "skipping unreadable directory entry");
                    continue;
                }
            };
            let entry = DirectoryEntry::new(dirent.file_name());
            if is_pseudo_entry(entry.name_bytes()) || is_hidden(&entry) {
                continue;
            }
            return Some(entry);
        }
    }
}
