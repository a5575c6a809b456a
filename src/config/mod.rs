use crate::utils::error::Result;
use crate::utils::validation::{validate_path, validate_url, Validate};
use clap::Parser;
use serde::{Deserialize, Serialize};

pub const GSI_DOWNLOAD_URL: &str = "https://saigai.gsi.go.jp/jusho/download/";

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "jusho-dl")]
#[command(about = "Download GSI jukyo-jusho archives and concatenate them into one CSV")]
pub struct CliConfig {
    /// Output destination directory
    #[arg(long, default_value = "./")]
    pub outdir: String,

    /// Skip the download phase (zip files are already present)
    #[arg(long)]
    pub nodownload: bool,

    /// Skip extraction and concatenation
    #[arg(long)]
    pub nounzip: bool,

    /// Delete intermediate zip/csv files at the end of the run
    #[arg(long)]
    pub del: bool,

    /// Index page to crawl for prefecture links
    #[arg(long, default_value = GSI_DOWNLOAD_URL)]
    pub base_url: String,

    /// Politeness delay in seconds after each page visit and download
    #[arg(long, default_value = "2")]
    pub wait_secs: u64,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("outdir", &self.outdir)?;
        validate_url("base_url", &self.base_url)?;
        Ok(())
    }
}
