//! Long-format (`-l`) rendering.
//!
//! Output is a `total <N>` header followed by one line per entry:
//!
//! ```text
//! drwxr-xr-x  2 sam  staff  4096 Mar 04 09:12 src
//! ```
//!
//! All statuses are buffered before anything is printed, so the total and the
//! column widths come from the same single metadata pass.

use crate::data::{FileKind, FileStatus, ListedEntry};
use chrono::{DateTime, Local, Utc};
use std::time::{SystemTime, UNIX_EPOCH};

/// `st_blocks` counts 512-byte units; the header reports 1 KiB units.
pub const BLOCKS_PER_KIB: u64 = 2;

/// `strftime` pattern for the modification time column.
pub const TIME_FORMAT: &str = "%b %d %H:%M";

const PERMISSION_BITS: [(u32, char); 9] = [
    (0o400, 'r'),
    (0o200, 'w'),
    (0o100, 'x'),
    (0o040, 'r'),
    (0o020, 'w'),
    (0o010, 'x'),
    (0o004, 'r'),
    (0o002, 'w'),
    (0o001, 'x'),
];

/// Builds the 10-character mode string, e.g. `-rw-r--r--`.
///
/// With `special_bits` set, setuid and setgid replace the owner and group
/// execute characters with `s` (`S` when the execute bit is clear) and the
/// sticky bit replaces the other execute character with `t` (`T`).
pub fn permission_string(kind: FileKind, mode: u32, special_bits: bool) -> String {
    let mut perms = [kind.indicator(); 10];
    for (i, (bit, ch)) in PERMISSION_BITS.iter().enumerate() {
        perms[i + 1] = if mode & bit != 0 { *ch } else { '-' };
    }

    if special_bits {
        let overlay = |c: char, set: char| if c == 'x' { set } else { set.to_ascii_uppercase() };
        if mode & 0o4000 != 0 {
            perms[3] = overlay(perms[3], 's');
        }
        if mode & 0o2000 != 0 {
            perms[6] = overlay(perms[6], 's');
        }
        if mode & 0o1000 != 0 {
            perms[9] = overlay(perms[9], 't');
        }
    }

    perms.iter().collect()
}

/// Sum of the listed entries' blocks in kilobyte units.
///
/// The 512-byte to 1 KiB conversion is applied once, to the sum.
pub fn total_blocks<'a>(statuses: impl IntoIterator<Item = &'a FileStatus>) -> u64 {
    statuses.into_iter().map(|s| s.blocks).sum::<u64>() / BLOCKS_PER_KIB
}

/// Shown in place of a time chrono cannot represent. Same width as `TIME_FORMAT`.
pub const UNKNOWN_TIME: &str = "           ?";

/// Formats a modification time in the local timezone, e.g. `Jan 05 14:03`.
///
/// Filesystems accept timestamps far outside chrono's range; those render
/// as [`UNKNOWN_TIME`] instead of failing the listing.
pub fn format_mtime(time: SystemTime) -> String {
    unix_timestamp(time)
        .and_then(|(secs, nanos)| DateTime::<Utc>::from_timestamp(secs, nanos))
        .map(|utc| utc.with_timezone(&Local).format(TIME_FORMAT).to_string())
        .unwrap_or_else(|| UNKNOWN_TIME.to_string())
}

/// Seconds and nanoseconds relative to the epoch, nanoseconds always positive.
fn unix_timestamp(time: SystemTime) -> Option<(i64, u32)> {
    match time.duration_since(UNIX_EPOCH) {
        Ok(d) => Some((i64::try_from(d.as_secs()).ok()?, d.subsec_nanos())),
        Err(e) => {
            let d = e.duration();
            let secs = -i64::try_from(d.as_secs()).ok()?;
            match d.subsec_nanos() {
                0 => Some((secs, 0)),
                n => Some((secs.checked_sub(1)?, 1_000_000_000 - n)),
            }
        }
    }
}

struct Widths {
    nlink: usize,
    owner: usize,
    group: usize,
    size: usize,
}

impl Widths {
    fn measure<'a>(statuses: impl Iterator<Item = &'a FileStatus>) -> Self {
        let mut w = Widths {
            nlink: 1,
            owner: 1,
            group: 1,
            size: 1,
        };
        for s in statuses {
            w.nlink = w.nlink.max(s.nlink.to_string().len());
            w.owner = w.owner.max(s.owner.chars().count());
            w.group = w.group.max(s.group.chars().count());
            w.size = w.size.max(s.size.to_string().len());
        }
        w
    }
}

/// Renders the long listing of one directory.
///
/// Entries without a status (the status call failed) are left out of both
/// the total and the listing.
pub fn render_long(entries: &[ListedEntry], special_bits: bool) -> Vec<String> {
    let resolved: Vec<(&ListedEntry, &FileStatus)> = entries
        .iter()
        .filter_map(|e| e.status.as_ref().map(|s| (e, s)))
        .collect();

    let widths = Widths::measure(resolved.iter().map(|(_, s)| *s));
    let mut lines = Vec::with_capacity(resolved.len() + 1);
    lines.push(format!("total {}", total_blocks(resolved.iter().map(|(_, s)| *s))));

    for (entry, status) in resolved {
        let mut line = format!(
            "{} {:>nw$} {:<ow$} {:<gw$} {:>sw$} {} {}",
            permission_string(status.kind, status.mode, special_bits),
            status.nlink,
            status.owner,
            status.group,
            status.size,
            format_mtime(status.modified),
            entry.entry.display_name(),
            nw = widths.nlink,
            ow = widths.owner,
            gw = widths.group,
            sw = widths.size,
        );
        if let Some(target) = &status.link_target {
            line.push_str(" -> ");
            line.push_str(&target.to_string_lossy());
        }
        lines.push(line);
    }

    lines
}
