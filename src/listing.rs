//! Source directory listing.
//!
//! Produces the candidate entries shown in the picker.

use crate::error::Result;
use std::path::Path;
use tracing::debug;

/// List the subdirectory names of `dir`, sorted.
///
/// Symlinks that point at directories are included. `.` and `..` never
/// appear. Entries whose names are not valid UTF-8 are skipped.
///
/// # Errors
///
/// Returns [`crate::OpError::IoError`] if `dir` cannot be read.
pub fn list_entries(dir: &Path) -> Result<Vec<String>> {
    let mut entries = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        // metadata() follows symlinks, unlike DirEntry::file_type().
        let is_dir = std::fs::metadata(entry.path())
            .map(|m| m.is_dir())
            .unwrap_or(false);
        if !is_dir {
            continue;
        }

        match entry.file_name().into_string() {
            Ok(name) if name != "." && name != ".." => entries.push(name),
            Ok(_) => {}
            Err(name) => debug!(?name, "skipping non-UTF-8 entry"),
        }
    }

    entries.sort();
    debug!(dir = %dir.display(), count = entries.len(), "listed source directory");
    Ok(entries)
}

/// Join entries into the newline-separated form the picker reads.
pub fn join_entries(entries: &[String]) -> String {
    let mut joined = String::new();
    for entry in entries {
        joined.push_str(entry);
        joined.push('\n');
    }
    joined
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_lists_only_directories_sorted() {
        let root = tempfile::tempdir().unwrap();
        fs::create_dir(root.path().join("zeta")).unwrap();
        fs::create_dir(root.path().join("alpha")).unwrap();
        fs::create_dir(root.path().join(".dotfiles")).unwrap();
        fs::write(root.path().join("notes.txt"), "x").unwrap();

        let entries = list_entries(root.path()).unwrap();
        assert_eq!(entries, vec![".dotfiles", "alpha", "zeta"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_follows_directory_symlinks() {
        let root = tempfile::tempdir().unwrap();
        let target = tempfile::tempdir().unwrap();
        std::os::unix::fs::symlink(target.path(), root.path().join("linked")).unwrap();
        std::os::unix::fs::symlink("/nonexistent/op", root.path().join("dangling")).unwrap();

        assert_eq!(list_entries(root.path()).unwrap(), vec!["linked"]);
    }

    #[test]
    fn test_missing_dir_is_error() {
        let root = tempfile::tempdir().unwrap();
        assert!(list_entries(&root.path().join("missing")).is_err());
    }

    #[test]
    fn test_join_entries() {
        let entries = vec!["a".to_string(), "b c".to_string()];
        assert_eq!(join_entries(&entries), "a\nb c\n");
        assert_eq!(join_entries(&[]), "");
    }
}
