//! HTTP implementation of the remote source seam

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::header;
use std::path::Path;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::debug;
use url::Url;
use webmirror_config::Config;
use webmirror_types::{Error, RemoteSource, Result};

/// Remote source backed by an HTTP(S) index page.
///
/// Listed filenames resolve relative to the configured base URL, so the
/// validated URL always carries a trailing slash.
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    base_url: Url,
}

impl HttpSource {
    /// Build a source from the validated configuration
    pub fn new(config: &Config) -> Result<Self> {
        let base_url = Url::parse(&config.remote.url).map_err(|e| {
            Error::config(format!("{} is not a valid URL: {e}", config.remote.url))
        })?;

        let mut builder = reqwest::Client::builder().user_agent(config.remote.user_agent.clone());
        if let Some(secs) = config.remote.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| Error::network(format!("could not build HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// Base URL requests resolve against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl RemoteSource for HttpSource {
    async fn fetch_listing(&self) -> Result<String> {
        debug!("fetching listing from {}", self.base_url);

        let response = self
            .client
            .get(self.base_url.clone())
            .header(header::ACCEPT, "text/html")
            .send()
            .await
            .map_err(|e| Error::network(format!("listing request failed: {e}")))?
            .error_for_status()
            .map_err(|e| Error::network(format!("listing request failed: {e}")))?;

        response
            .text()
            .await
            .map_err(|e| Error::network(format!("could not read listing body: {e}")))
    }

    async fn fetch_file(&self, filename: &str, dest: &Path) -> Result<()> {
        let url = self.base_url.join(filename).map_err(|e| {
            Error::network(format!(
                "cannot resolve {filename} against {}: {e}",
                self.base_url
            ))
        })?;
        debug!("downloading {url} into {}", dest.display());

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::network(format!("download of {filename} failed: {e}")))?
            .error_for_status()
            .map_err(|e| Error::network(format!("download of {filename} failed: {e}")))?;

        let mut file = tokio::fs::File::create(dest).await?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk
                .map_err(|e| Error::network(format!("download of {filename} interrupted: {e}")))?;
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        Ok(())
    }
}
