use std::path::PathBuf;

/// Hyperlink scraped from a page: target reference plus visible text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Anchor {
    pub href: String,
    pub text: String,
}

/// One archive to fetch, derived from a `.zip` anchor on a prefecture page.
/// Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTask {
    pub prefecture: String,
    pub city: String,
    pub code: String,
    pub url: String,
    pub save_name: String,
}

/// Extracted CSV on disk together with the municipality it came from.
/// The `<stem>_<prefecture>_<city>.csv` naming convention lets this record
/// be rebuilt from a directory listing alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CityCsv {
    pub code: String,
    pub prefecture: String,
    pub city: String,
    pub path: PathBuf,
}
