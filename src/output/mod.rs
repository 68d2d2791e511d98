//! Output formatters for one directory listing.
//!
//! # Available Formatters
//!
//! - **Grid**: names in columns, filled down then across (`-C`, the default)
//! - **Across**: names in columns, filled across then down (`-x`)
//! - **Single column**: one name per line (`-1`)
//! - **Long**: per-entry metadata with a block total header (`-l`)
//!
//! Formatters receive entries that are already filtered and sorted and
//! return finished lines. They do no I/O.

pub mod grid;
pub mod long;

use crate::data::{DisplayMode, ListedEntry, RenderOptions};

/// Renders one directory's entries in the selected mode.
pub fn render(entries: &[ListedEntry], mode: DisplayMode, options: &RenderOptions) -> Vec<String> {
    let names = || -> Vec<_> { entries.iter().map(|e| e.entry.display_name()).collect() };
    match mode {
        DisplayMode::Long => long::render_long(entries, options.special_bits),
        DisplayMode::Grid => grid::down_then_across(&names(), options.width),
        DisplayMode::Across => grid::across(&names(), options.width),
        DisplayMode::SingleColumn => grid::single_column(&names()),
    }
}

/// Long-format renderer.
///
/// See [`long::render_long`] for full documentation.
pub use long::render_long;
