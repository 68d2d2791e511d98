//! The listing pipeline.
//!
//! For each directory: enumerate, resolve status where the request needs it,
//! sort, render. With recursion enabled the same steps run again for every
//! child directory, depth-first, in the order the parent was printed.
//!
//! The main entry point is [`run`], which writes finished lines to any
//! [`Write`] sink and returns a [`RunSummary`] of sub-directories that could
//! not be read.

use crate::data::{ListedEntry, ListingRequest, RenderOptions};
use crate::error::{ListingError, Result};
use crate::metadata::{IdentityCache, resolve_status};
use crate::output;
use crate::reader::read_entries;
use crate::sort::sort_entries;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// One directory, enumerated, sorted and rendered.
#[derive(Debug)]
pub struct DirectoryListing {
    pub path: PathBuf,
    pub entries: Vec<ListedEntry>,
    pub lines: Vec<String>,
}

impl DirectoryListing {
    /// Children whose link-aware type is a directory, in listing order.
    ///
    /// Symbolic links to directories are not included.
    pub fn subdirectories(&self) -> impl Iterator<Item = PathBuf> + '_ {
        self.entries
            .iter()
            .filter(|e| e.status.as_ref().is_some_and(|s| s.is_dir()))
            .map(|e| self.path.join(&e.entry.name))
    }
}

/// Outcome of a completed run.
///
/// # Fields
/// * `directories` - Number of directories listed
/// * `failures` - Sub-directories skipped because they could not be read
#[derive(Debug, Default)]
pub struct RunSummary {
    pub directories: usize,
    pub failures: Vec<ListingError>,
}

impl RunSummary {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Lists a single directory.
///
/// Entries whose status call fails keep `status: None`; the long renderer
/// leaves them out, the name-only layouts still show them.
///
/// # Errors
/// Returns [`ListingError::DirectoryUnreadable`] if `dir` cannot be opened.
pub fn list_directory(
    dir: &Path,
    request: &ListingRequest,
    options: &RenderOptions,
    identities: &mut IdentityCache,
) -> Result<DirectoryListing> {
    let needs_status = request.needs_status();
    let mut entries: Vec<ListedEntry> = read_entries(dir)?
        .map(|entry| {
            let status = if needs_status {
                match resolve_status(dir, &entry, identities) {
                    Ok(status) => Some(status),
                    Err(e) => {
                        debug!(error = %e, "skipping entry");
                        None
                    }
                }
            } else {
                None
            };
            ListedEntry { entry, status }
        })
        .collect();

    sort_entries(&mut entries, request.sort, request.reverse);
    let lines = output::render(&entries, request.mode, options);

    Ok(DirectoryListing {
        path: dir.to_path_buf(),
        entries,
        lines,
    })
}

struct Walker<'a, W: Write> {
    request: &'a ListingRequest,
    options: &'a RenderOptions,
    out: &'a mut W,
    identities: IdentityCache,
    summary: RunSummary,
    report: &'a mut dyn FnMut(&ListingError),
}

impl<W: Write> Walker<'_, W> {
    fn emit(&mut self, listing: &DirectoryListing) -> Result<()> {
        if self.request.recursive {
            if self.summary.directories > 0 {
                writeln!(self.out)?;
            }
            writeln!(self.out, "{}:", listing.path.display())?;
        }
        for line in &listing.lines {
            writeln!(self.out, "{}", line)?;
        }
        self.summary.directories += 1;
        Ok(())
    }

    fn descend(&mut self, parent: &DirectoryListing, depth: usize) -> Result<()> {
        for child in parent.subdirectories() {
            if depth > self.request.max_depth {
                warn!(
                    path = %child.display(),
                    max_depth = self.request.max_depth,
                    "not descending past depth limit"
                );
                continue;
            }

            let listed = list_directory(&child, self.request, self.options, &mut self.identities);
            let listing = match listed {
                Ok(listing) => listing,
                Err(e @ ListingError::DirectoryUnreadable { .. }) => {
                    debug!(error = %e, "skipping unreadable directory");
                    (*self.report)(&e);
                    self.summary.failures.push(e);
                    continue;
                }
                Err(e) => return Err(e),
            };

            self.emit(&listing)?;
            self.descend(&listing, depth + 1)?;
        }
        Ok(())
    }
}

/// Runs the pipeline for `request`, writing every rendered line to `out`.
///
/// Sub-directories that cannot be opened during a recursive run are passed
/// to `report`, recorded in the summary and skipped.
///
/// # Errors
/// * [`ListingError::DirectoryUnreadable`] when the root path cannot be listed
/// * [`ListingError::Output`] when writing to `out` fails
pub fn run<W: Write>(
    request: &ListingRequest,
    options: &RenderOptions,
    out: &mut W,
    report: &mut dyn FnMut(&ListingError),
) -> Result<RunSummary> {
    let mut walker = Walker {
        request,
        options,
        out,
        identities: IdentityCache::new(),
        summary: RunSummary::default(),
        report,
    };

    let root = list_directory(&request.path, request, options, &mut walker.identities)?;
    walker.emit(&root)?;
    if request.recursive {
        walker.descend(&root, 1)?;
    }
    walker.out.flush()?;

    Ok(walker.summary)
}

/// Runs the pipeline and collects the output as lines.
pub fn run_to_lines(request: &ListingRequest, options: &RenderOptions) -> Result<Vec<String>> {
    let mut buf = Vec::new();
    run(request, options, &mut buf, &mut |_| {})?;
    Ok(String::from_utf8_lossy(&buf)
        .lines()
        .map(str::to_string)
        .collect())
}
