//! Source used when no backend is configured; every fetch fails so the
//! dashboard stays in degraded mode on the fallback snapshot.

use spikewx_core::{FetchError, FetchResult, SnapshotSource, WeatherSnapshot};

pub struct OfflineSource {
    reason: String,
}

impl OfflineSource {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait::async_trait]
impl SnapshotSource for OfflineSource {
    fn name(&self) -> &str {
        "offline"
    }

    async fn fetch_snapshot(&self) -> FetchResult<WeatherSnapshot> {
        Err(FetchError::Network(self.reason.clone()))
    }
}
