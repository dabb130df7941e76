// src/bundle/http.rs

use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::time::Duration;

use anyhow::Context;
use reqwest::Client;
use tracing::{error, info, warn};

use crate::bundle::BundleUpdater;
use crate::bundle::archive::unpack_archive;
use crate::config::BundleSettings;
use crate::errors::Result;
use crate::retry::retry;

/// Downloads the tool bundle over HTTP(S) and unpacks it.
#[derive(Debug, Clone)]
pub struct HttpBundleUpdater {
    client: Client,
    bundle_path: String,
    download_timeout: Duration,
    retry_pause: Duration,
}

impl HttpBundleUpdater {
    pub fn new(settings: &BundleSettings) -> Result<Self> {
        let client = Client::builder()
            .timeout(settings.download_timeout)
            .build()
            .context("building HTTP client")?;

        Ok(Self {
            client,
            bundle_path: settings.path.clone(),
            download_timeout: settings.download_timeout,
            retry_pause: settings.retry_pause,
        })
    }

    /// URL of the bundle on the given server.
    pub fn bundle_url(&self, server_url: &str) -> String {
        format!(
            "{}/{}",
            server_url.trim_end_matches('/'),
            self.bundle_path.trim_start_matches('/')
        )
    }

    async fn update(&self, server_url: &str, target_dir: &Path) -> bool {
        let url = self.bundle_url(server_url);
        info!(%url, target = %target_dir.display(), "fetching tool bundle");

        match retry(self.download_timeout, self.retry_pause, || {
            self.attempt(&url, target_dir)
        })
        .await
        {
            Ok(outcome) if outcome.succeeded => {
                info!(attempts = outcome.attempts, "tool bundle ready");
                true
            }
            Ok(outcome) => {
                error!(
                    %url,
                    attempts = outcome.attempts,
                    elapsed = ?outcome.elapsed,
                    "could not fetch tool bundle"
                );
                false
            }
            Err(e) => {
                error!(%url, error = %e, "could not fetch tool bundle");
                false
            }
        }
    }

    /// One download + unpack attempt. Failures are logged and reported as
    /// `Ok(false)` so the retry loop tries again.
    async fn attempt(&self, url: &str, target_dir: &Path) -> Result<bool> {
        let bytes = match self.download(url).await {
            Ok(bytes) => bytes,
            Err(e) => {
                let reason = format!("{e:#}");
                warn!(%url, error = %reason, "bundle download failed");
                return Ok(false);
            }
        };

        let target = PathBuf::from(target_dir);
        let unpacked = tokio::task::spawn_blocking(move || unpack_archive(&bytes, &target))
            .await
            .context("bundle unpack task")?;

        match unpacked {
            Ok(entries) => {
                info!(entries, target = %target_dir.display(), "unpacked tool bundle");
                Ok(true)
            }
            Err(e) => {
                let reason = format!("{e:#}");
                warn!(error = %reason, "bundle unpack failed");
                Ok(false)
            }
        }
    }

    async fn download(&self, url: &str) -> anyhow::Result<Vec<u8>> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .with_context(|| format!("requesting {url}"))?
            .error_for_status()
            .with_context(|| format!("requesting {url}"))?;

        let body = response
            .bytes()
            .await
            .with_context(|| format!("reading body of {url}"))?;

        Ok(body.to_vec())
    }
}

impl BundleUpdater for HttpBundleUpdater {
    fn try_update<'a>(
        &'a self,
        server_url: &'a str,
        target_dir: &'a Path,
    ) -> Pin<Box<dyn Future<Output = bool> + Send + 'a>> {
        Box::pin(self.update(server_url, target_dir))
    }
}
