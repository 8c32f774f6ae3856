//! Recursive discovery of supported files under a root directory

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::types::FileType;

/// Recursively enumerate files of one type under a root directory.
///
/// Matching is by extension, case-insensitive, at any nesting depth. A
/// pattern that matches nothing yields an empty list, not an error.
/// Traversal order is not contractual.
pub fn find_files(root: &Path, file_type: FileType) -> Result<Vec<PathBuf>> {
    let mut matches = Vec::new();

    for entry in WalkDir::new(root).follow_links(true) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(err) => {
                tracing::warn!("Skipping unreadable entry under {}: {}", root.display(), err);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        if FileType::for_path(entry.path()) == Some(file_type) {
            matches.push(entry.into_path());
        }
    }

    Ok(matches)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn empty_directory_yields_no_matches() {
        let dir = tempfile::tempdir().unwrap();
        for file_type in FileType::ALL {
            let found = find_files(dir.path(), file_type).unwrap();
            assert!(found.is_empty(), "{:?} matched in an empty dir", file_type);
        }
    }

    #[test]
    fn finds_nested_files_of_one_type() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).unwrap();

        fs::write(dir.path().join("top.md"), "# top").unwrap();
        fs::write(nested.join("deep.md"), "# deep").unwrap();
        fs::write(nested.join("data.csv"), "x,y\n1,2\n").unwrap();

        let mut md = find_files(dir.path(), FileType::Markdown).unwrap();
        md.sort();
        assert_eq!(md.len(), 2);
        assert!(md.iter().all(|p| p.extension().unwrap() == "md"));

        let csv = find_files(dir.path(), FileType::Csv).unwrap();
        assert_eq!(csv, vec![nested.join("data.csv")]);
    }

    #[test]
    fn extension_match_is_case_insensitive() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("NOTES.MD"), "# shouting").unwrap();

        let found = find_files(dir.path(), FileType::Markdown).unwrap();
        assert_eq!(found.len(), 1);
    }

    #[test]
    fn ignores_unrelated_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("archive.tar"), b"tar").unwrap();
        fs::write(dir.path().join("doc.txt"), "text").unwrap();

        for file_type in FileType::ALL {
            assert!(find_files(dir.path(), file_type).unwrap().is_empty());
        }
    }
}
