use crate::core::listing::sorted_file_names;
use crate::domain::model::CityCsv;
use crate::utils::error::{JushoError, Result};
use encoding_rs::SHIFT_JIS;
use regex::Regex;
use std::fs::{self, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub const CONCAT_SUFFIX: &str = "_jukyo-jusho-concat.csv";

const CSV_NAME_PATTERN: &str = r"^(.+)_(.+)_(.+)\.csv$";

static CSV_NAME_RE: OnceLock<Regex> = OnceLock::new();

fn csv_name_re() -> &'static Regex {
    CSV_NAME_RE
        .get_or_init(|| Regex::new(CSV_NAME_PATTERN).expect("CSV_NAME_PATTERN is a valid regex"))
}

/// Rebuild municipality records from the extracted files in `dir`, in
/// lexicographic order. The `<stem>_<prefecture>_<city>.csv` naming
/// convention is the contract with the extractor; a csv that does not
/// follow it fails the whole pass.
pub fn scan_extracted(dir: &Path) -> Result<Vec<CityCsv>> {
    let mut csvs = Vec::new();
    for name in sorted_file_names(dir)? {
        if !name.contains(".csv") || name.contains("concat") {
            continue;
        }
        let captures = csv_name_re()
            .captures(&name)
            .ok_or_else(|| JushoError::PatternError {
                name: name.clone(),
                pattern: CSV_NAME_PATTERN,
            })?;
        csvs.push(CityCsv {
            code: captures[1].to_string(),
            prefecture: captures[2].to_string(),
            city: captures[3].to_string(),
            path: dir.join(&name),
        });
    }
    Ok(csvs)
}

/// Append every record's rows to a fresh `<unixtime>_jukyo-jusho-concat.csv`
/// in `outdir` and return its path.
///
/// Input files are decoded as Shift_JIS. Each row is split on its first
/// comma and rewritten as `first-field,prefecture,city,rest`; a row with no
/// comma gets the two columns appended. Unlike the crawl, any error here is
/// fatal: a half-written aggregate is worse than no aggregate.
pub fn concatenate(csvs: &[CityCsv], outdir: &Path) -> Result<PathBuf> {
    let timestamp = chrono::Utc::now().timestamp();
    let out_path = outdir.join(format!("{}{}", timestamp, CONCAT_SUFFIX));
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&out_path)?;
    let mut writer = BufWriter::new(file);

    for record in csvs {
        tracing::info!("open: {}", record.path.display());
        let raw = fs::read(&record.path)?;
        let (text, _, _) = SHIFT_JIS.decode(&raw);
        for line in text.lines() {
            match line.split_once(',') {
                Some((first, rest)) => writeln!(
                    writer,
                    "{},{},{},{}",
                    first, record.prefecture, record.city, rest
                )?,
                None => writeln!(writer, "{},{},{}", line, record.prefecture, record.city)?,
            }
        }
        tracing::info!("close: {}", record.path.display());
    }
    writer.flush()?;
    Ok(out_path)
}
