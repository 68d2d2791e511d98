//! Entry ordering.
//!
//! Names compare byte-wise, never through locale collation. Size and time
//! keys fall back to the name comparison, so every key is a total order.

use crate::data::{ListedEntry, SortKey};
use std::cmp::Ordering;
use std::time::SystemTime;

/// Sorts entries based on the provided sort key.
///
/// # Arguments
/// * `entries` - The entries of one directory
/// * `sort_key` - The sorting criterion to use
/// * `reverse` - Invert the resulting order
///
/// # Behavior
/// * `SortKey::Name` - Ascending byte-wise name order
/// * `SortKey::Size` - Largest first
/// * `SortKey::Time` - Most recently modified first
///
/// Entries without a status sort as size 0 / the epoch.
pub fn sort_entries(entries: &mut [ListedEntry], sort_key: SortKey, reverse: bool) {
    entries.sort_by(|a, b| {
        let ord = compare(a, b, sort_key);
        if reverse { ord.reverse() } else { ord }
    });
}

fn compare(a: &ListedEntry, b: &ListedEntry, sort_key: SortKey) -> Ordering {
    let by_name = || a.entry.name_bytes().cmp(b.entry.name_bytes());
    match sort_key {
        SortKey::Name => by_name(),
        SortKey::Size => size_of(b).cmp(&size_of(a)).then_with(by_name),
        SortKey::Time => mtime_of(b).cmp(&mtime_of(a)).then_with(by_name),
    }
}

fn size_of(e: &ListedEntry) -> u64 {
    e.status.as_ref().map(|s| s.size).unwrap_or(0)
}

fn mtime_of(e: &ListedEntry) -> SystemTime {
    e.status
        .as_ref()
        .map(|s| s.modified)
        .unwrap_or(SystemTime::UNIX_EPOCH)
}
