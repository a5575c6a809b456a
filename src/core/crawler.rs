use crate::core::links::extract_anchors;
use crate::domain::model::{Anchor, DownloadTask};
use crate::utils::error::Result;
use reqwest::Client;
use std::path::PathBuf;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use url::Url;

/// Drives the DOWNLOAD phase: index page -> prefecture pages -> city archives.
///
/// Crawling is fail-open: a page that cannot be fetched or a single failed
/// download is logged and skipped, never aborting the run. The delay is a
/// politeness pause observed after every successful page visit and download.
pub struct Crawler {
    client: Client,
    index_url: Url,
    data_url: Url,
    outdir: PathBuf,
    delay: Duration,
}

impl Crawler {
    pub fn new(index_url: Url, outdir: impl Into<PathBuf>, delay: Duration) -> Result<Self> {
        // Archives live under data/ next to the index page.
        let data_url = index_url.join("data/")?;
        Ok(Self {
            client: Client::new(),
            index_url,
            data_url,
            outdir: outdir.into(),
            delay,
        })
    }

    /// Returns the number of archives downloaded.
    pub async fn run(&self) -> Result<usize> {
        let html = match self.fetch_page(self.index_url.clone()).await {
            Ok(html) => html,
            Err(e) => {
                tracing::warn!("Connection error fetching index page: {}", e);
                return Ok(0);
            }
        };

        let mut downloaded = 0;
        for anchor in extract_anchors(&html, "pref/") {
            match self.visit_prefecture(&anchor).await {
                Ok(count) => {
                    downloaded += count;
                    tokio::time::sleep(self.delay).await;
                }
                Err(e) => {
                    tracing::warn!(prefecture = %anchor.text, "Skipping prefecture page: {}", e)
                }
            }
        }
        Ok(downloaded)
    }

    async fn visit_prefecture(&self, pref: &Anchor) -> Result<usize> {
        let page_url = self.index_url.join(&pref.href)?;
        tracing::info!(prefecture = %pref.text, url = %page_url, "Visiting prefecture page");
        let html = self.fetch_page(page_url).await?;

        let mut downloaded = 0;
        for anchor in extract_anchors(&html, ".zip") {
            let Some(task) = self.build_task(&pref.text, &anchor) else {
                tracing::warn!(href = %anchor.href, "Ignoring zip link with no usable file name");
                continue;
            };
            tracing::info!("{}{} {}", task.prefecture, task.city, task.url);
            match self.download(&task).await {
                Ok(()) => downloaded += 1,
                Err(e) => tracing::warn!(city = %task.city, "Download failed: {}", e),
            }
        }
        Ok(downloaded)
    }

    /// Derive a task from a `.zip` anchor. The save name is deterministic:
    /// `<code>_<prefecture>_<city>.zip`, code being the remote file name
    /// minus its extension.
    fn build_task(&self, prefecture: &str, anchor: &Anchor) -> Option<DownloadTask> {
        let file_name = anchor.href.rsplit('/').next()?;
        let code = file_name.strip_suffix(".zip")?;
        if code.is_empty() {
            return None;
        }
        let url = self.data_url.join(file_name).ok()?;
        Some(DownloadTask {
            save_name: format!("{}_{}_{}.zip", code, prefecture, anchor.text),
            prefecture: prefecture.to_string(),
            city: anchor.text.clone(),
            code: code.to_string(),
            url: url.to_string(),
        })
    }

    /// Stream the response body straight to disk, then pause.
    async fn download(&self, task: &DownloadTask) -> Result<()> {
        let mut response = self
            .client
            .get(&task.url)
            .send()
            .await?
            .error_for_status()?;

        let path = self.outdir.join(&task.save_name);
        let mut file = tokio::fs::File::create(&path).await?;
        while let Some(chunk) = response.chunk().await? {
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        tracing::debug!(file = %path.display(), "Done. Waiting");
        tokio::time::sleep(self.delay).await;
        Ok(())
    }

    async fn fetch_page(&self, url: Url) -> Result<String> {
        let text = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(text)
    }
}
