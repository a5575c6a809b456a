use crate::config::CliConfig;
use crate::domain::ports::Pipeline;
use crate::utils::error::Result;
use std::path::PathBuf;

/// Which phases of a run are enabled.
#[derive(Debug, Clone, Copy)]
pub struct Phases {
    pub download: bool,
    pub postprocess: bool,
    pub delete_intermediates: bool,
}

impl From<&CliConfig> for Phases {
    fn from(config: &CliConfig) -> Self {
        Self {
            download: !config.nodownload,
            postprocess: !config.nounzip,
            delete_intermediates: config.del,
        }
    }
}

pub struct Engine<P: Pipeline> {
    pipeline: P,
    phases: Phases,
}

impl<P: Pipeline> Engine<P> {
    pub fn new(pipeline: P, phases: Phases) -> Self {
        Self { pipeline, phases }
    }

    /// Run the enabled phases in order. Cleanup runs even when
    /// post-processing was skipped. Returns the concat file path when the
    /// post-processing phase produced one.
    pub async fn run(&self) -> Result<Option<PathBuf>> {
        let mut concat_path = None;

        if self.phases.download {
            println!("Downloading archives...");
            let downloaded = self.pipeline.crawl().await?;
            println!("Downloaded {} archives", downloaded);
        } else {
            println!("NO DOWNLOAD MODE");
        }

        if self.phases.postprocess {
            println!("Extracting csv files...");
            let extracted = self.pipeline.extract_archives()?;
            println!("Extracted {} csv files", extracted.len());
            println!("========================");

            println!("Concatenating...");
            let path = self.pipeline.concatenate()?;
            println!("Concat file: {}", path.display());
            concat_path = Some(path);
        } else {
            println!("NO UNZIP MODE");
        }

        if self.phases.delete_intermediates {
            println!("DELETE TMP FILES");
            let removed = self.pipeline.cleanup()?;
            println!("Removed {} files", removed);
        }

        Ok(concat_path)
    }
}
