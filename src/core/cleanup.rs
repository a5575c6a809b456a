use crate::core::listing::sorted_file_names;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// Delete intermediate artifacts from `outdir`: every csv that is not a
/// concat output and every zip. No confirmation and no dry-run; a file
/// that cannot be removed is logged and left behind.
pub fn remove_intermediates(outdir: &Path) -> Result<usize> {
    let mut removed = 0;
    for name in sorted_file_names(outdir)? {
        let is_tmp_csv = name.contains(".csv") && !name.contains("concat");
        if is_tmp_csv || name.contains(".zip") {
            let path = outdir.join(&name);
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => tracing::warn!(file = %path.display(), "Could not delete: {}", e),
            }
        }
    }
    Ok(removed)
}
