use crate::domain::model::WorkUnit;
use crate::domain::ports::PageFetcher;
use crate::utils::error::{EtlError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("schedule-etl/", env!("CARGO_PKG_VERSION"));

/// Plain GET of a unit's URL. Pages that need script execution come back
/// without their schedule blocks and fail validation like any short page.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self> {
        let client = Client::builder().timeout(timeout).user_agent(user_agent).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, unit: &WorkUnit) -> Result<String> {
        tracing::debug!("🌐 GET {}", unit.url);
        let response = self.client.get(&unit.url).send().await?;
        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if !status.is_success() {
            return Err(EtlError::FetchError {
                unit: unit.label.clone(),
                message: format!("HTTP {}", status),
            });
        }
        Ok(response.text().await?)
    }
}
