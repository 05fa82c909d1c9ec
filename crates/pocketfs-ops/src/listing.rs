//! Directory enumeration.

use std::ffi::OsString;
use std::fs;
use std::path::Path;

use pocketfs_core::{DirectoryEntry, DirectoryEntryEx};

use crate::path::is_directory;

/// `dir` with a trailing `/`.
fn with_slash(dir: &Path) -> OsString {
    let mut dir = OsString::from(dir.as_os_str());
    if !dir.as_encoded_bytes().ends_with(b"/") {
        dir.push("/");
    }
    dir
}

/// Every child of `dir` in enumeration order, or nothing if `dir` cannot be opened.
///
/// Entry paths keep the raw name bytes, so they stay valid for names that
/// are not UTF-8.
pub fn list_raw<P: AsRef<Path>>(dir: P) -> Vec<DirectoryEntry> {
    let dir = with_slash(dir.as_ref());
    let Ok(entries) = fs::read_dir(&dir) else {
        return Vec::new();
    };

    entries
        .flatten()
        .map(|entry| DirectoryEntry::new(&dir, entry.file_name()))
        .collect()
}

/// Children of `dir` without `.`/`..`, directories first, then by name
/// ignoring ASCII case.
pub fn list_ex<P: AsRef<Path>>(dir: P) -> Vec<DirectoryEntryEx> {
    let mut result: Vec<DirectoryEntryEx> = list_raw(dir)
        .into_iter()
        .filter(|entry| !entry.is_pseudo())
        .map(|entry| {
            let is_dir = is_directory(&entry.path);
            DirectoryEntryEx::from_entry(entry, is_dir)
        })
        .collect();

    result.sort_by(|a, b| a.listing_order(b));
    result
}
