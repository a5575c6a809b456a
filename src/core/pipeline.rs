use crate::config::CliConfig;
use crate::core::crawler::Crawler;
use crate::core::{archive, cleanup, concat};
use crate::domain::model::CityCsv;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use std::time::Duration;
use url::Url;

/// Filesystem-backed pipeline over one output directory. The directory is
/// the only state shared between phases, carried here instead of any
/// process-wide variable.
pub struct JushoPipeline {
    crawler: Crawler,
    outdir: PathBuf,
}

impl JushoPipeline {
    pub fn new(config: &CliConfig) -> Result<Self> {
        let index_url = Url::parse(&config.base_url)?;
        let outdir = PathBuf::from(&config.outdir);
        let crawler = Crawler::new(
            index_url,
            outdir.clone(),
            Duration::from_secs(config.wait_secs),
        )?;
        Ok(Self { crawler, outdir })
    }
}

#[async_trait]
impl Pipeline for JushoPipeline {
    async fn crawl(&self) -> Result<usize> {
        self.crawler.run().await
    }

    fn extract_archives(&self) -> Result<Vec<CityCsv>> {
        archive::extract_all(&self.outdir)
    }

    fn concatenate(&self) -> Result<PathBuf> {
        // Scan rather than reuse the extraction result so csvs left by
        // earlier runs are concatenated too.
        let csvs = concat::scan_extracted(&self.outdir)?;
        concat::concatenate(&csvs, &self.outdir)
    }

    fn cleanup(&self) -> Result<usize> {
        cleanup::remove_intermediates(&self.outdir)
    }
}
