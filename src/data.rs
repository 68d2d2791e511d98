//! Data structures for representing directory entries and their metadata.
//!
//! This module defines the core values that flow through the listing pipeline:
//! raw names from enumeration, link-aware file status, and the immutable
//! request describing how one directory should be listed.

use std::borrow::Cow;
use std::ffi::{OsStr, OsString};
use std::fs::FileType;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::FileTypeExt;
use std::path::PathBuf;
use std::time::SystemTime;

/// A single name returned by directory enumeration.
///
/// # Fields
/// * `name` - The raw entry name, exactly as the filesystem returned it
/// * `is_hidden` - Whether the name begins with `.`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryEntry {
    pub name: OsString,
    pub is_hidden: bool,
}

impl DirectoryEntry {
    pub fn new(name: impl Into<OsString>) -> Self {
        let name = name.into();
        let is_hidden = name.as_bytes().first() == Some(&b'.');
        DirectoryEntry { name, is_hidden }
    }

    /// Name as printable text. Invalid UTF-8 is replaced, never dropped.
    pub fn display_name(&self) -> Cow<'_, str> {
        self.name.to_string_lossy()
    }

    /// Raw name bytes, used for ordinal comparison.
    pub fn name_bytes(&self) -> &[u8] {
        self.name.as_bytes()
    }
}

impl From<&str> for DirectoryEntry {
    fn from(name: &str) -> Self {
        DirectoryEntry::new(OsStr::new(name))
    }
}

/// The type of a filesystem object as reported by the link-aware status call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Regular,
    Directory,
    Symlink,
    CharDevice,
    BlockDevice,
    Fifo,
    Socket,
    Unknown,
}

impl FileKind {
    /// Returns the single character `ls -l` shows in the first column.
    pub fn indicator(&self) -> char {
        match self {
            FileKind::Regular => '-',
            FileKind::Directory => 'd',
            FileKind::Symlink => 'l',
            FileKind::CharDevice => 'c',
            FileKind::BlockDevice => 'b',
            FileKind::Fifo => 'p',
            FileKind::Socket => 's',
            FileKind::Unknown => '?',
        }
    }
}

impl From<FileType> for FileKind {
    fn from(ft: FileType) -> Self {
        if ft.is_symlink() {
            FileKind::Symlink
        } else if ft.is_dir() {
            FileKind::Directory
        } else if ft.is_file() {
            FileKind::Regular
        } else if ft.is_char_device() {
            FileKind::CharDevice
        } else if ft.is_block_device() {
            FileKind::BlockDevice
        } else if ft.is_fifo() {
            FileKind::Fifo
        } else if ft.is_socket() {
            FileKind::Socket
        } else {
            FileKind::Unknown
        }
    }
}

/// Link-aware metadata for one entry.
///
/// # Fields
/// * `kind` - Object type; symbolic links are reported as links
/// * `mode` - Permission bits including setuid/setgid/sticky (lower 12 bits)
/// * `nlink` - Hard link count
/// * `uid` / `gid` - Numeric owner and group
/// * `owner` / `group` - Resolved names, or the numeric id when lookup failed
/// * `size` - Logical size in bytes
/// * `blocks` - Allocated 512-byte blocks
/// * `modified` - Last modification time
/// * `link_target` - Target of a symbolic link, when it could be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileStatus {
    pub kind: FileKind,
    pub mode: u32,
    pub nlink: u64,
    pub uid: u32,
    pub gid: u32,
    pub owner: String,
    pub group: String,
    pub size: u64,
    pub blocks: u64,
    pub modified: SystemTime,
    pub link_target: Option<PathBuf>,
}

impl FileStatus {
    pub fn is_dir(&self) -> bool {
        self.kind == FileKind::Directory
    }
}

/// An enumerated entry paired with its status, if one was resolved.
///
/// `status` is `None` when metadata was not needed for the selected mode,
/// or when the status call failed for this entry.
#[derive(Debug, Clone)]
pub struct ListedEntry {
    pub entry: DirectoryEntry,
    pub status: Option<FileStatus>,
}

impl ListedEntry {
    pub fn bare(entry: DirectoryEntry) -> Self {
        ListedEntry {
            entry,
            status: None,
        }
    }
}

/// How the names of one directory are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Column grid, filled top-to-bottom then left-to-right.
    #[default]
    Grid,
    /// Column grid, filled left-to-right then top-to-bottom.
    Across,
    /// One name per line.
    SingleColumn,
    /// Permissions, counts, owner, group, size, time and name per line.
    Long,
}

/// Comparison key used to order entries within one directory.
///
/// # Variants
/// * `Name` - Byte-wise ordering of entry names
/// * `Size` - Largest first, ties ordered by name
/// * `Time` - Newest first, ties ordered by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Size,
    Time,
}

/// Default recursion limit for `-R` listings.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Everything the pipeline needs to list one directory tree.
///
/// Built once by the CLI layer and passed by reference through every call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingRequest {
    pub path: PathBuf,
    pub mode: DisplayMode,
    pub recursive: bool,
    pub sort: SortKey,
    pub reverse: bool,
    pub max_depth: usize,
}

impl ListingRequest {
    pub fn new(path: impl Into<PathBuf>, mode: DisplayMode) -> Self {
        ListingRequest {
            path: path.into(),
            mode,
            recursive: false,
            sort: SortKey::Name,
            reverse: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    /// Whether entries must be stat'ed before they can be laid out.
    pub fn needs_status(&self) -> bool {
        self.mode == DisplayMode::Long || self.recursive || self.sort != SortKey::Name
    }
}

/// Rendering knobs that do not change which entries are listed.
///
/// # Fields
/// * `width` - Terminal width in columns used by the grid layouts
/// * `special_bits` - Overlay setuid/setgid/sticky onto the execute positions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: usize,
    pub special_bits: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            width: crate::output::grid::FALLBACK_WIDTH,
            special_bits: true,
        }
    }
}
