//! Stat-like path queries.
//!
//! Every query here is total: failures collapse to `false` or `0`.

use std::ffi::{OsStr, OsString};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::volume::VolumeResourceQuery;

/// Check if `path` opens as a plain file or as a directory.
pub fn exists<P: AsRef<Path>>(path: P) -> bool {
    let path = path.as_ref();
    File::open(path).is_ok() || is_directory(path)
}

/// Check if `path` can be opened as a directory.
pub fn is_directory<P: AsRef<Path>>(path: P) -> bool {
    fs::read_dir(path).is_ok()
}

/// The part of `path` after the last `/`, or the whole path.
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(pos) => &path[pos + 1..],
        None => path,
    }
}

/// The part of `path` after the last `.`, or empty.
pub fn extension(path: &str) -> &str {
    match path.rfind('.') {
        Some(pos) => &path[pos + 1..],
        None => "",
    }
}

/// Case-insensitive extension check. An empty `ext` matches everything.
pub fn has_extension(path: &str, ext: &str) -> bool {
    ext.is_empty() || extension(path).eq_ignore_ascii_case(ext)
}

/// Check `path` against a set of extensions. An empty set matches everything.
pub fn has_any_extension<S: AsRef<str>>(path: &str, exts: &[S]) -> bool {
    if exts.is_empty() {
        return true;
    }

    let actual = extension(path);
    exts.iter().any(|ext| actual.eq_ignore_ascii_case(ext.as_ref()))
}

/// Size of `path` in bytes, or 0 if its metadata cannot be read.
pub fn file_size<P: AsRef<Path>>(path: P) -> u64 {
    fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}

/// Free bytes on the volume behind `volume`, or 0 if the query fails.
pub fn free_space<Q: VolumeResourceQuery + ?Sized>(volume: &Q) -> u64 {
    volume
        .query_free_space()
        .map(|resource| resource.free_bytes())
        .unwrap_or(0)
}

/// Lexical self-containment check: is `src + "/"` a substring of `dest`?
///
/// Does not resolve links or `..` components.
pub fn is_inside(dest: &str, src: &str) -> bool {
    dest.contains(&format!("{src}/"))
}

/// [`is_inside`] over filesystem paths, compared by their display form.
pub(crate) fn path_is_inside(dest: &Path, src: &Path) -> bool {
    is_inside(&dest.to_string_lossy(), &src.to_string_lossy())
}

/// `dir` followed by `/` and the raw `name`.
pub(crate) fn child_path(dir: &Path, name: &OsStr) -> PathBuf {
    let mut path = OsString::from(dir.as_os_str());
    path.push("/");
    path.push(name);
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocketfs_core::FsError;
    use tempfile::TempDir;

    use crate::volume::VolumeResource;

    struct FixedVolume(Option<VolumeResource>);

    impl VolumeResourceQuery for FixedVolume {
        fn query_free_space(&self) -> Result<VolumeResource, FsError> {
            self.0
                .ok_or_else(|| FsError::unsupported("/", "no volume"))
        }
    }

    #[test]
    fn test_file_name() {
        assert_eq!(file_name("/sd/music/song.mp3"), "song.mp3");
        assert_eq!(file_name("song.mp3"), "song.mp3");
        assert_eq!(file_name("/sd/music/"), "");
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("a/b.TXT"), "TXT");
        assert_eq!(extension("a/b"), "");
        assert_eq!(extension("archive.tar.gz"), "gz");
    }

    #[test]
    fn test_has_extension() {
        assert!(has_extension("a/b.TXT", "txt"));
        assert!(!has_extension("a/b.TXT", "bin"));
        assert!(has_extension("a/b", ""));
        assert!(has_extension("", ""));
    }

    #[test]
    fn test_has_any_extension() {
        let none: [&str; 0] = [];
        assert!(has_any_extension("a/b.cia", &none));
        assert!(has_any_extension("a/b.CIA", &["3dsx", "cia"]));
        assert!(!has_any_extension("a/b.png", &["3dsx", "cia"]));
    }

    #[test]
    fn test_queries_on_real_paths() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().to_str().unwrap();
        let file = format!("{dir}/data.bin");
        std::fs::write(&file, [0u8; 123]).unwrap();

        assert!(exists(dir));
        assert!(is_directory(dir));
        assert!(exists(&file));
        assert!(!is_directory(&file));
        assert_eq!(file_size(&file), 123);

        let missing = format!("{dir}/missing");
        assert!(!exists(&missing));
        assert!(!is_directory(&missing));
        assert_eq!(file_size(&missing), 0);
    }

    #[test]
    fn test_free_space() {
        let volume = FixedVolume(Some(VolumeResource::new(32 * 1024, 10)));
        assert_eq!(free_space(&volume), 320 * 1024);
        assert_eq!(free_space(&FixedVolume(None)), 0);
    }

    #[test]
    fn test_child_path_keeps_separator_convention() {
        assert_eq!(
            child_path(Path::new("/sd/dest"), OsStr::new("a.txt")),
            PathBuf::from("/sd/dest/a.txt")
        );
        assert!(path_is_inside(Path::new("/sd/a/b"), Path::new("/sd/a")));
    }

    #[test]
    fn test_is_inside() {
        assert!(is_inside("/sd/a/b", "/sd/a"));
        assert!(!is_inside("/sd/ab", "/sd/a"));
        assert!(!is_inside("/sd/a", "/sd/a"));
    }
}
