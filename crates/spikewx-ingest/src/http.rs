//! HTTP snapshot source: `GET {base}/api/weather/{slug}`

use anyhow::{anyhow, Context, Result};
use reqwest::{header, Client};
use std::time::Duration;
use url::Url;

use crate::wire::decode_snapshot;
use spikewx_core::{FetchError, FetchResult, SnapshotSource, WeatherSnapshot};

/// Build the weather endpoint below `base`, keeping any path prefix
pub fn weather_endpoint(base: &Url, location_slug: &str) -> Result<Url> {
    if location_slug.is_empty() {
        return Err(anyhow!("location slug must not be empty"));
    }
    let mut endpoint = base.clone();
    endpoint.set_query(None);
    endpoint.set_fragment(None);
    endpoint
        .path_segments_mut()
        .map_err(|_| anyhow!("backend URL cannot be a base: {base}"))?
        .pop_if_empty()
        .extend(["api", "weather", location_slug]);
    Ok(endpoint)
}

pub struct HttpSource {
    client: Client,
    endpoint: Url,
}

impl HttpSource {
    pub fn new(base_url: &Url, location_slug: &str, timeout: Duration) -> Result<Self> {
        let endpoint = weather_endpoint(base_url, location_slug)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

fn network_error(err: &reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Network(format!("request timed out: {err}"))
    } else {
        FetchError::Network(err.to_string())
    }
}

#[async_trait::async_trait]
impl SnapshotSource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_snapshot(&self) -> FetchResult<WeatherSnapshot> {
        let resp = self
            .client
            .get(self.endpoint.clone())
            .header(header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| network_error(&e))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Protocol {
                status: status.as_u16(),
            });
        }

        let body = resp.bytes().await.map_err(|e| network_error(&e))?;
        let snapshot = decode_snapshot(&body)?;
        tracing::debug!(endpoint = %self.endpoint, location = %snapshot.location, "snapshot fetched");
        Ok(snapshot)
    }
}
