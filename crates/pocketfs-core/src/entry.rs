//! Directory listing entry types.

use std::ffi::{OsStr, OsString};
use std::path::PathBuf;

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// A raw directory child as produced by enumeration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    /// Slash-terminated parent directory followed by the raw entry name.
    pub path: PathBuf,
    /// Entry name for display and sorting; lossy when the raw name is not UTF-8.
    pub name: CompactString,
}

impl DirectoryEntry {
    /// Create an entry for `name` inside `dir_with_slash`.
    pub fn new(dir_with_slash: impl AsRef<OsStr>, name: impl AsRef<OsStr>) -> Self {
        let name = name.as_ref();
        let mut path = OsString::from(dir_with_slash.as_ref());
        path.push(name);
        Self {
            path: PathBuf::from(path),
            name: CompactString::from(name.to_string_lossy()),
        }
    }

    /// The raw name, exactly as enumerated.
    pub fn raw_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }

    /// Check if this is the `.` or `..` pseudo-entry.
    pub fn is_pseudo(&self) -> bool {
        self.name == "." || self.name == ".."
    }
}

/// A directory child with its type resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntryEx {
    /// Slash-terminated parent directory followed by the raw entry name.
    pub path: PathBuf,
    /// Entry name for display and sorting.
    pub name: CompactString,
    /// Whether the entry opens as a directory.
    pub is_directory: bool,
}

impl DirectoryEntryEx {
    /// Attach a directory flag to a raw entry.
    pub fn from_entry(entry: DirectoryEntry, is_directory: bool) -> Self {
        Self {
            path: entry.path,
            name: entry.name,
            is_directory,
        }
    }

    /// The raw name, exactly as enumerated.
    pub fn raw_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or(self.path.as_os_str())
    }

    /// Listing order: directories first, then case-insensitive by name.
    pub fn listing_order(&self, other: &Self) -> std::cmp::Ordering {
        other
            .is_directory
            .cmp(&self.is_directory)
            .then_with(|| cmp_ignore_ascii_case(&self.name, &other.name))
    }
}

fn cmp_ignore_ascii_case(a: &str, b: &str) -> std::cmp::Ordering {
    a.bytes()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.bytes().map(|c| c.to_ascii_lowercase()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_path_joins_name() {
        let entry = DirectoryEntry::new("/sd/music/", "song.mp3");
        assert_eq!(entry.path, PathBuf::from("/sd/music/song.mp3"));
        assert_eq!(entry.name.as_str(), "song.mp3");
        assert_eq!(entry.raw_name(), OsStr::new("song.mp3"));
        assert!(!entry.is_pseudo());
        assert!(DirectoryEntry::new("/sd/", "..").is_pseudo());
    }

    #[test]
    fn test_listing_order() {
        let dir = |name: &str| DirectoryEntryEx::from_entry(DirectoryEntry::new("/", name), true);
        let file = |name: &str| DirectoryEntryEx::from_entry(DirectoryEntry::new("/", name), false);

        let mut entries = vec![file("b.txt"), dir("B"), file("a.txt"), dir("a")];
        entries.sort_by(|a, b| a.listing_order(b));

        let names: Vec<_> = entries.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, ["a", "B", "a.txt", "b.txt"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_name_keeps_raw_path() {
        use std::os::unix::ffi::OsStrExt;

        let raw = OsStr::from_bytes(b"song\xe9.mp3");
        let entry = DirectoryEntry::new("/sd/", raw);

        assert_eq!(entry.raw_name(), raw);
        assert_eq!(entry.path.as_os_str().as_bytes(), b"/sd/song\xe9.mp3");
        assert_eq!(entry.name.as_str(), "song\u{fffd}.mp3");
    }
}
