//! Source discovery: a single `.jack` file, or the top-level `.jack` entries
//! of a directory.

use std::io;
use std::path::{Path, PathBuf};

/// Resolves `path` to the list of `.jack` files to compile, in a
/// deterministic (sorted) order. A directory is not searched recursively —
/// only its direct entries are considered, matching the reference tool.
pub fn discover_jack_files(path: &Path) -> io::Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(path)?;

    if metadata.is_dir() {
        let mut files: Vec<PathBuf> = std::fs::read_dir(path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().map(|ext| ext == "jack").unwrap_or(false))
            .collect();
        files.sort();
        Ok(files)
    } else if path.extension().map(|ext| ext == "jack").unwrap_or(false) {
        Ok(vec![path.to_path_buf()])
    } else {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn single_jack_file_resolves_to_itself() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("Main.jack");
        fs::write(&file, "class Main {}").unwrap();

        let found = discover_jack_files(&file).unwrap();
        assert_eq!(found, vec![file]);
    }

    #[test]
    fn directory_collects_only_top_level_jack_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("B.jack"), "class B {}").unwrap();
        fs::write(dir.path().join("A.jack"), "class A {}").unwrap();
        fs::write(dir.path().join("readme.txt"), "not jack").unwrap();
        let nested = dir.path().join("nested");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("C.jack"), "class C {}").unwrap();

        let found = discover_jack_files(dir.path()).unwrap();
        assert_eq!(
            found,
            vec![dir.path().join("A.jack"), dir.path().join("B.jack")]
        );
    }

    #[test]
    fn non_jack_file_yields_no_sources() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("notes.txt");
        fs::write(&file, "hello").unwrap();
        assert_eq!(discover_jack_files(&file).unwrap(), Vec::<PathBuf>::new());
    }
}
