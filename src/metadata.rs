//! Link-aware metadata resolution.
//!
//! This module provides:
//! - [`resolve_status`]: `lstat`-style status for one entry of a directory
//! - [`IdentityCache`]: uid/gid to name resolution via `getpwuid_r`/`getgrgid_r`,
//!   memoised for the lifetime of one run
//!
//! Name lookups fail independently of the status call. A failed lookup is
//! replaced with the numeric id and never fails the entry.

use crate::data::{DirectoryEntry, FileKind, FileStatus};
use crate::error::{IdentityKind, ListingError, Result};
use fnv::FnvHashMap;
use libc::{c_char, getgrgid_r, getpwuid_r, group, passwd};
use std::ffi::CStr;
use std::fs;
use std::mem::MaybeUninit;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use std::time::SystemTime;
use tracing::debug;

/// Starting buffer size for the reentrant passwd/group calls.
const LOOKUP_BUF_LEN: usize = 1024;
/// The buffer is doubled on `ERANGE` up to this size.
const LOOKUP_BUF_MAX: usize = 1 << 20;

/// Returns the status of `dir/entry` without following symbolic links.
///
/// # Arguments
/// * `dir` - Directory the entry was enumerated from
/// * `entry` - The entry to resolve
/// * `identities` - Cache used to turn uid/gid into names
///
/// # Errors
/// Returns [`ListingError::StatUnavailable`] when the entry cannot be stat'ed,
/// for example when it was removed after enumeration.
pub fn resolve_status(
    dir: &Path,
    entry: &DirectoryEntry,
    identities: &mut IdentityCache,
) -> Result<FileStatus> {
    let path = dir.join(&entry.name);
    let meta = fs::symlink_metadata(&path).map_err(|source| ListingError::StatUnavailable {
        path: path.clone(),
        source,
    })?;

    let kind = FileKind::from(meta.file_type());
    let link_target = if kind == FileKind::Symlink {
        fs::read_link(&path).ok()
    } else {
        None
    };

    Ok(FileStatus {
        kind,
        mode: meta.mode() & 0o7777,
        nlink: meta.nlink(),
        uid: meta.uid(),
        gid: meta.gid(),
        owner: identities.user_name(meta.uid()),
        group: identities.group_name(meta.gid()),
        size: meta.size(),
        blocks: meta.blocks(),
        modified: meta.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        link_target,
    })
}

/// Memoised uid/gid name lookups.
///
/// Failed lookups are cached too, as the numeric id.
#[derive(Debug, Default)]
pub struct IdentityCache {
    users: FnvHashMap<u32, String>,
    groups: FnvHashMap<u32, String>,
}

impl IdentityCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// User name for `uid`, or `uid` as a string when it has none.
    pub fn user_name(&mut self, uid: u32) -> String {
        self.users
            .entry(uid)
            .or_insert_with(|| substitute(lookup_user(uid), uid))
            .clone()
    }

    /// Group name for `gid`, or `gid` as a string when it has none.
    pub fn group_name(&mut self, gid: u32) -> String {
        self.groups
            .entry(gid)
            .or_insert_with(|| substitute(lookup_group(gid), gid))
            .clone()
    }
}

fn substitute(lookup: Result<String>, id: u32) -> String {
    lookup.unwrap_or_else(|e| {
        debug!(error = %e, "using numeric id");
        id.to_string()
    })
}

/// Resolves a uid to a user name with the thread-safe `getpwuid_r`.
pub fn lookup_user(uid: u32) -> Result<String> {
    let failed = || ListingError::IdentityLookupFailed {
        kind: IdentityKind::User,
        id: uid,
    };
    let mut buf = vec![0u8; LOOKUP_BUF_LEN];
    loop {
        let mut pwd = MaybeUninit::<passwd>::uninit();
        let mut result: *mut passwd = std::ptr::null_mut();

        let ret = unsafe {
            getpwuid_r(
                uid,
                pwd.as_mut_ptr(),
                buf.as_mut_ptr() as *mut c_char,
                buf.len(),
                &mut result,
            )
        };

        if ret == libc::ERANGE && buf.len() < LOOKUP_BUF_MAX {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if ret != 0 || result.is_null() {
            return Err(failed());
        }

        // `result` points into `pwd`, whose strings live in `buf`.
        let name = unsafe {
            let pw_name = (*result).pw_name;
            if pw_name.is_null() {
                return Err(failed());
            }
            CStr::from_ptr(pw_name)
        };
        return Ok(name.to_string_lossy().into_owned());
    }
}

/// Resolves a gid to a group name with the thread-safe `getgrgid_r`.
pub fn lookup_group(gid: u32) -> Result<String> {
    let failed = || ListingError::IdentityLookupFailed {
        kind: IdentityKind::Group,
        id: gid,
    };
    let mut buf = vec![0u8; LOOKUP_BUF_LEN];
    loop {
        let mut grp = MaybeUninit::<group>::uninit();
        let mut result: *mut group = std::ptr::null_mut();

        let ret = unsafe {
            getgrgid_r(
                gid,
                grp.as_mut_ptr(),
                buf.as_mut_ptr() as *mut c_char,
                buf.len(),
                &mut result,
            )
        };

        if ret == libc::ERANGE && buf.len() < LOOKUP_BUF_MAX {
            buf.resize(buf.len() * 2, 0);
            continue;
        }
        if ret != 0 || result.is_null() {
            return Err(failed());
        }

        let name = unsafe {
            let gr_name = (*result).gr_name;
            if gr_name.is_null() {
                return Err(failed());
            }
            CStr::from_ptr(gr_name)
        };
        return Ok(name.to_string_lossy().into_owned());
    }
}
