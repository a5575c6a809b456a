use crate::utils::error::Result;
use std::path::Path;

/// File names in `dir`, sorted lexicographically. Subdirectories are skipped.
pub fn sorted_file_names(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for dir_entry in std::fs::read_dir(dir)? {
        let dir_entry = dir_entry?;
        if dir_entry.file_type()?.is_file() {
            names.push(dir_entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}
