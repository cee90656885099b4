//! Archive downloading over HTTP.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;

use crate::archive::filename_from_url;
use crate::ui::DownloadProgress;

/// Default User-Agent; some release hosts refuse obviously non-browser
/// clients.
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Read/write chunk size for streaming downloads.
const CHUNK_SIZE: usize = 8192;

/// Streams archive downloads to disk.
pub struct HttpFetcher {
    client: Client,
    show_progress: bool,
}

impl HttpFetcher {
    /// Create a fetcher.
    ///
    /// Redirects are followed by the client. No request timeout is set:
    /// downloads run to completion or connection error.
    pub fn new(show_progress: bool) -> Self {
        Self {
            client: Client::builder()
                .build()
                .expect("failed to build HTTP client"),
            show_progress,
        }
    }

    /// Download `url` to `dest`, streaming in fixed-size chunks.
    ///
    /// When a redirect lands on a different filename the destination is
    /// renamed to match the final URL. Failures of any kind are soft:
    /// they are logged as warnings and reported as `None` so the caller
    /// can count an error and move on to the next dependency.
    pub fn download(&self, url: &str, dest: &Path, user_agent: Option<&str>) -> Option<PathBuf> {
        match self.try_download(url, dest, user_agent) {
            Ok(path) => Some(path),
            Err(e) => {
                tracing::warn!("failed to download {url}: {e:#}");
                None
            }
        }
    }

    fn try_download(
        &self,
        url: &str,
        dest: &Path,
        user_agent: Option<&str>,
    ) -> anyhow::Result<PathBuf> {
        let mut response = self
            .client
            .get(url)
            .header(USER_AGENT, user_agent.unwrap_or(DEFAULT_USER_AGENT))
            .send()?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP {} fetching {url}", response.status());
        }

        // A redirect can resolve to a different filename than the
        // manifest URL suggested; keep the server's name.
        let mut target = dest.to_path_buf();
        let final_name = filename_from_url(response.url().as_str());
        if !final_name.is_empty()
            && dest.file_name().and_then(|n| n.to_str()) != Some(final_name.as_str())
        {
            target = dest.with_file_name(&final_name);
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let progress = DownloadProgress::new(response.content_length(), self.show_progress);

        let mut writer = BufWriter::new(File::create(&target)?);
        let mut buffer = [0u8; CHUNK_SIZE];
        let mut downloaded: u64 = 0;

        loop {
            let read = response.read(&mut buffer)?;
            if read == 0 {
                break;
            }
            writer.write_all(&buffer[..read])?;
            downloaded += read as u64;
            progress.update(downloaded);
        }

        writer.flush()?;
        progress.finish();

        tracing::debug!("downloaded {} ({downloaded} bytes)", target.display());
        Ok(target)
    }
}
