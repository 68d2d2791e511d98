//! Error taxonomy for the listing pipeline.
//!
//! Directory-level failures are reported to the caller; entry-level failures
//! are skipped or replaced with a fallback value by the code that sees them.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ListingError {
    /// The directory does not exist, is not a directory, or could not be opened.
    #[error("cannot open directory '{}': {source}", .path.display())]
    DirectoryUnreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Link-aware status failed for a single entry.
    #[error("cannot access '{}': {source}", .path.display())]
    StatUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A uid or gid has no name in the user/group databases.
    #[error("no {kind} name for id {id}")]
    IdentityLookupFailed { kind: IdentityKind, id: u32 },

    /// Rendered lines could not be written out.
    #[error("write error: {0}")]
    Output(#[from] io::Error),
}

/// Which identity database a lookup was made against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentityKind {
    User,
    Group,
}

impl std::fmt::Display for IdentityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IdentityKind::User => f.write_str("user"),
            IdentityKind::Group => f.write_str("group"),
        }
    }
}

impl ListingError {
    /// The path this error occurred at, if applicable.
    pub fn path(&self) -> Option<&PathBuf> {
        match self {
            Self::DirectoryUnreadable { path, .. } | Self::StatUnavailable { path, .. } => {
                Some(path)
            }
            Self::IdentityLookupFailed { .. } | Self::Output(_) => None,
        }
    }

    /// Whether the surrounding batch carries on after this error.
    ///
    /// Entry-level failures never stop a directory listing. An unreadable
    /// directory ends that directory's listing; recursive callers still move
    /// on to its siblings.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::StatUnavailable { .. } | Self::IdentityLookupFailed { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ListingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directory_unreadable_message() {
        let err = ListingError::DirectoryUnreadable {
            path: PathBuf::from("/nope"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        assert!(err.to_string().starts_with("cannot open directory '/nope': "));
        assert_eq!(err.path(), Some(&PathBuf::from("/nope")));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_entry_level_errors_are_recoverable() {
        let stat = ListingError::StatUnavailable {
            path: PathBuf::from("gone.txt"),
            source: io::Error::from(io::ErrorKind::NotFound),
        };
        let ident = ListingError::IdentityLookupFailed {
            kind: IdentityKind::Group,
            id: 4242,
        };
        assert!(stat.is_recoverable());
        assert!(ident.is_recoverable());
        assert_eq!(ident.path(), None);
        assert_eq!(ident.to_string(), "no group name for id 4242");
    }
}
