use crate::domain::model::CityCsv;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

#[async_trait]
pub trait Pipeline: Send + Sync {
    /// DOWNLOAD phase: crawl the index, fetch every per-city archive.
    /// Returns the number of archives downloaded.
    async fn crawl(&self) -> Result<usize>;

    /// Unzip every downloaded archive into the output directory.
    fn extract_archives(&self) -> Result<Vec<CityCsv>>;

    /// Concatenate every extracted CSV into one timestamped file.
    fn concatenate(&self) -> Result<PathBuf>;

    /// Delete intermediate zip/csv artifacts. Returns the number removed.
    fn cleanup(&self) -> Result<usize>;
}
