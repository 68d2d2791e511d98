use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Creates a scratch directory holding the given files and directories.
///
/// Names ending in `/` become directories; everything else becomes a file
/// whose contents are its own name. Parents are created as needed.
///
/// # Example
/// ```
/// let temp = build_tree(&["a.txt", "sub/", "sub/b.txt"]).unwrap();
/// ```
#[allow(dead_code)]
pub fn build_tree(paths: &[&str]) -> std::io::Result<TempDir> {
    let dir = tempfile::tempdir()?;
    for p in paths {
        let full = dir.path().join(p.trim_end_matches('/'));
        if p.ends_with('/') {
            fs::create_dir_all(&full)?;
        } else {
            if let Some(parent) = full.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::write(&full, p.as_bytes())?;
        }
    }
    Ok(dir)
}

/// Header line `-R` prints before a directory's listing.
#[allow(dead_code)]
pub fn header(path: &Path) -> String {
    format!("{}:", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_tree() {
        let temp = build_tree(&["a.txt", "sub/", "deep/nested/c.txt"]).unwrap();
        assert!(temp.path().join("a.txt").is_file());
        assert!(temp.path().join("sub").is_dir());
        assert!(temp.path().join("deep/nested/c.txt").is_file());
    }
}
