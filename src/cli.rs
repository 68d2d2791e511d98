//! CLI interface definitions for the `lsv` application.
//!
//! This module defines command-line arguments using [`clap`] and exposes:
//!
//! - [`Args`]: the main struct parsed from CLI inputs
//! - [`SortArg`]: the `--sort` value
//!
//! `Args` is turned into an immutable [`ListingRequest`] and [`RenderOptions`]
//! before the pipeline runs; nothing below `main` sees the parsed flags.
//!
//! # Example
//!
//! ```bash
//! lsv -l --sort size -R src
//! ```

use crate::data::{DisplayMode, ListingRequest, RenderOptions, SortKey, DEFAULT_MAX_DEPTH};
use crate::output::grid::terminal_width;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Command-line arguments for `lsv`.
///
/// The layout flags `-l`, `-x`, `-C` and `-1` are mutually exclusive;
/// passing more than one is a usage error.
#[derive(Parser, Debug)]
#[command(name = "lsv", author = "Sam Green", version, about)]
pub struct Args {
    /// Directory to list (defaults to current directory)
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Long listing: permissions, links, owner, group, size, time
    #[arg(short = 'l', conflicts_with_all = ["across", "columns", "one"])]
    pub long: bool,

    /// List entries across rows instead of down columns
    #[arg(short = 'x', conflicts_with_all = ["columns", "one"])]
    pub across: bool,

    /// List entries down columns (default)
    #[arg(short = 'C', conflicts_with = "one")]
    pub columns: bool,

    /// One entry per line
    #[arg(short = '1')]
    pub one: bool,

    /// List subdirectories recursively
    #[arg(short = 'R', long)]
    pub recursive: bool,

    /// Do not descend more than N directories below PATH with -R
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_DEPTH)]
    pub max_depth: usize,

    /// Sort entries by name, size or modification time
    #[arg(long, value_enum, default_value_t = SortArg::Name)]
    pub sort: SortArg,

    /// Reverse the sort order
    #[arg(short = 'r', long)]
    pub reverse: bool,

    /// Assume the screen is COLS columns wide (otherwise COLUMNS, then the terminal)
    #[arg(short = 'w', long, value_name = "COLS")]
    pub width: Option<usize>,

    /// Show plain x/- instead of s/t for setuid, setgid and sticky bits
    #[arg(long, default_value_t = false)]
    pub no_special_bits: bool,
}

/// Enum for specifying how to order entries.
///
/// # Variants
/// * `Name` - Byte-wise name order
/// * `Size` - Largest first
/// * `Time` - Newest first
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum, Debug)]
pub enum SortArg {
    Name,
    Size,
    Time,
}

impl From<SortArg> for SortKey {
    fn from(arg: SortArg) -> Self {
        match arg {
            SortArg::Name => SortKey::Name,
            SortArg::Size => SortKey::Size,
            SortArg::Time => SortKey::Time,
        }
    }
}

impl Args {
    pub fn mode(&self) -> DisplayMode {
        if self.long {
            DisplayMode::Long
        } else if self.across {
            DisplayMode::Across
        } else if self.one {
            DisplayMode::SingleColumn
        } else {
            DisplayMode::Grid
        }
    }

    /// The listing request described by these arguments.
    pub fn request(&self) -> ListingRequest {
        ListingRequest {
            path: self.path.clone(),
            mode: self.mode(),
            recursive: self.recursive,
            sort: self.sort.into(),
            reverse: self.reverse,
            max_depth: self.max_depth,
        }
    }

    /// Rendering options; queries the terminal width unless `-w` was given.
    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            width: terminal_width(self.width),
            special_bits: !self.no_special_bits,
        }
    }
}
