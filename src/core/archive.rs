use crate::core::listing::sorted_file_names;
use crate::domain::model::CityCsv;
use crate::utils::error::{JushoError, Result};
use regex::Regex;
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::sync::OnceLock;
use zip::ZipArchive;

/// Upper bound on one extracted CSV entry. The uncompressed size declared in
/// a zip header is attacker-controlled, so the copy itself is capped too.
pub const MAX_ENTRY_BYTES: u64 = 256 * 1024 * 1024;

const ZIP_NAME_PATTERN: &str = r"^(\d+)_(.+)_(.+)\.zip$";

static ZIP_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn zip_name_re() -> &'static Regex {
    ZIP_NAME_RE
        .get_or_init(|| Regex::new(ZIP_NAME_PATTERN).expect("ZIP_NAME_PATTERN is a valid regex"))
}

/// Unzip every archive in `outdir`. A broken archive is logged and skipped;
/// sibling CSVs it already produced stay on disk.
pub fn extract_all(outdir: &Path) -> Result<Vec<CityCsv>> {
    let mut extracted = Vec::new();
    for name in sorted_file_names(outdir)? {
        if !name.contains(".zip") {
            continue;
        }
        match extract_csv(&outdir.join(&name), outdir) {
            Ok(mut csvs) => extracted.append(&mut csvs),
            Err(e) => tracing::warn!(archive = %name, "Extraction failed: {}", e),
        }
    }
    Ok(extracted)
}

/// Extract every `.csv` member of one `<code>_<prefecture>_<city>.zip` into
/// `outdir`, renamed to `<entry-stem>_<prefecture>_<city>.csv`. The first
/// failing entry aborts this archive.
pub fn extract_csv(zip_path: &Path, outdir: &Path) -> Result<Vec<CityCsv>> {
    let zip_name = zip_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let captures = zip_name_re()
        .captures(&zip_name)
        .ok_or_else(|| JushoError::PatternError {
            name: zip_name.clone(),
            pattern: ZIP_NAME_PATTERN,
        })?;
    let code = captures[1].to_string();
    let prefecture = captures[2].to_string();
    let city = captures[3].to_string();

    let mut archive = ZipArchive::new(File::open(zip_path)?)?;
    let mut extracted = Vec::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if !entry.is_file() {
            continue;
        }
        // Rename by base name only; member directories are flattened away.
        let Some(entry_name) = Path::new(entry.name())
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
        else {
            continue;
        };
        if !entry_name.contains(".csv") {
            continue;
        }
        if entry.size() > MAX_ENTRY_BYTES {
            return Err(JushoError::OversizeEntryError {
                name: entry_name,
                size: entry.size(),
                limit: MAX_ENTRY_BYTES,
            });
        }
        tracing::info!("{}", entry_name);

        let save_name = entry_name.replace(".csv", &format!("_{}_{}.csv", prefecture, city));
        let path = outdir.join(&save_name);
        let mut out = File::create(&path)?;
        let copied = io::copy(&mut (&mut entry).take(MAX_ENTRY_BYTES + 1), &mut out)?;
        if copied > MAX_ENTRY_BYTES {
            return Err(JushoError::OversizeEntryError {
                name: entry_name,
                size: copied,
                limit: MAX_ENTRY_BYTES,
            });
        }

        #[cfg(unix)]
        if let Some(mode) = entry.unix_mode() {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(&path, std::fs::Permissions::from_mode(mode))?;
        }

        extracted.push(CityCsv {
            code: code.clone(),
            prefecture: prefecture.clone(),
            city: city.clone(),
            path,
        });
    }
    Ok(extracted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::{FileOptions, ZipWriter};

    fn write_zip(path: &Path, members: &[(&str, &[u8])]) {
        let mut zip = ZipWriter::new(File::create(path).unwrap());
        for (name, content) in members {
            zip.start_file::<_, ()>(*name, FileOptions::default())
                .unwrap();
            zip.write_all(content).unwrap();
        }
        zip.finish().unwrap();
    }

    #[test]
    fn test_extracts_only_csv_members_with_original_bytes() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("00001_Tokyo_Shibuya.zip");
        write_zip(
            &zip_path,
            &[
                ("00001.csv", b"1,alpha\n2,beta\n".as_slice()),
                ("readme.txt", b"not a csv".as_slice()),
                ("00001-extra.csv", b"3,gamma\n".as_slice()),
            ],
        );

        let extracted = extract_csv(&zip_path, temp_dir.path()).unwrap();
        assert_eq!(extracted.len(), 2);
        assert_eq!(extracted[0].prefecture, "Tokyo");
        assert_eq!(extracted[0].city, "Shibuya");
        assert_eq!(extracted[0].code, "00001");

        let first = std::fs::read(temp_dir.path().join("00001_Tokyo_Shibuya.csv")).unwrap();
        assert_eq!(first, b"1,alpha\n2,beta\n");
        let second = std::fs::read(temp_dir.path().join("00001-extra_Tokyo_Shibuya.csv")).unwrap();
        assert_eq!(second, b"3,gamma\n");
        assert!(!temp_dir.path().join("readme.txt").exists());
    }

    #[test]
    fn test_rejects_archive_name_without_context() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("plain.zip");
        write_zip(&zip_path, &[("00001.csv", b"1,x\n".as_slice())]);

        let err = extract_csv(&zip_path, temp_dir.path()).unwrap_err();
        assert!(matches!(err, JushoError::PatternError { .. }));
    }

    #[test]
    fn test_rejects_corrupt_archive() {
        let temp_dir = TempDir::new().unwrap();
        let zip_path = temp_dir.path().join("00002_Tokyo_Meguro.zip");
        std::fs::write(&zip_path, b"definitely not a zip file").unwrap();

        assert!(extract_csv(&zip_path, temp_dir.path()).is_err());
    }

    #[test]
    fn test_extract_all_skips_broken_archive_and_keeps_going() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("00001_Aomori_Hirosaki.zip"), b"junk").unwrap();
        let good = temp_dir.path().join("00002_Aomori_Misawa.zip");
        write_zip(&good, &[("00002.csv", b"9,ok\n".as_slice())]);

        let extracted = extract_all(temp_dir.path()).unwrap();
        assert_eq!(extracted.len(), 1);
        assert_eq!(extracted[0].city, "Misawa");
        assert!(temp_dir.path().join("00002_Aomori_Misawa.csv").exists());
    }
}
