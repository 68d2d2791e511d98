//! Library crate for lsv
//!
//! This exposes the listing pipeline for the binary, for tests and for
//! potential library usage.
//!
//! # Features
//!
//! - **Directory Enumeration**: Lazy, filtered reading of one directory
//! - **Link-Aware Metadata**: `lstat`-style status with cached owner/group names
//! - **Byte-wise Sorting**: Total, locale-independent ordering of entries
//! - **Layouts**: Down-then-across and across grids, single column, long format
//! - **Recursion**: Depth-first `-R` walks that skip unreadable sub-directories
//!
//! # Modules
//!
//! - [`data`]: Core data structures (`DirectoryEntry`, `FileStatus`, `ListingRequest`)
//! - [`cli`]: Command-line interface definitions
//! - [`error`]: The `ListingError` taxonomy
//! - [`reader`]: Directory enumeration
//! - [`metadata`]: File status and identity resolution
//! - [`sort`]: Entry ordering
//! - [`output`]: Grid and long-format renderers
//! - [`listing`]: The pipeline tying the above together

pub mod cli;
pub mod data;
pub mod error;
pub mod listing;
pub mod metadata;
pub mod output;
pub mod reader;
pub mod sort;

pub use cli::Args;
pub use data::{DirectoryEntry, DisplayMode, FileKind, FileStatus, ListingRequest, RenderOptions};
pub use error::ListingError;
pub use listing::{RunSummary, run};
