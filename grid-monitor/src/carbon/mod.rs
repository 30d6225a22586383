use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use std::time::Duration;

pub const DEFAULT_CARBON_API_URL: &str = "https://api.electricitymap.org";
pub const DEFAULT_ZONE: &str = "US-CAL-CISO";

const LATEST_INTENSITY_PATH: &str = "v3/carbon-intensity/latest";
const AUTH_HEADER: &str = "auth-token";

static USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Carbon intensity of one grid zone, in gCO2eq/kWh.
#[derive(Debug, Clone, PartialEq)]
pub struct CarbonReading {
    pub zone: String,
    pub intensity: f64,
    pub datetime: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LatestIntensity {
    zone: Option<String>,
    carbon_intensity: f64,
    datetime: Option<String>,
}

#[async_trait]
pub trait CarbonSource: Send + Sync {
    async fn latest(&self) -> anyhow::Result<CarbonReading>;
}

/// Client for the Electricity Maps latest carbon intensity endpoint.
pub struct ElectricityMaps {
    client: reqwest::Client,
    url: Url,
    zone: String,
    token: String,
}

impl ElectricityMaps {
    pub fn new(base_url: &str, zone: &str, token: &str, timeout: Duration) -> anyhow::Result<Self> {
        let mut base = base_url.trim().to_string();
        if !base.ends_with('/') {
            base.push('/');
        }
        let url = Url::parse(&base)
            .and_then(|u| u.join(LATEST_INTENSITY_PATH))
            .map_err(|e| anyhow::format_err!("Failed to build carbon API url from {base_url}: {e}"))?;
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| anyhow::format_err!("Failed to create http client: {e}"))?;
        tracing::info!("Carbon intensity source: {url} zone={zone}");
        Ok(Self {
            client,
            url,
            zone: zone.to_string(),
            token: token.to_string(),
        })
    }

    #[cfg(test)]
    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl CarbonSource for ElectricityMaps {
    async fn latest(&self) -> anyhow::Result<CarbonReading> {
        let response = self
            .client
            .get(self.url.clone())
            .query(&[("zone", self.zone.as_str())])
            .header(AUTH_HEADER, &self.token)
            .send()
            .await
            .map_err(|e| anyhow::format_err!("Failed to query carbon intensity: {e}"))?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("Carbon intensity API responded with {status}");
        }

        let body: LatestIntensity = response
            .json()
            .await
            .map_err(|e| anyhow::format_err!("Failed to decode carbon intensity: {e}"))?;
        tracing::debug!("carbon intensity response: {body:?}");

        Ok(CarbonReading {
            zone: body.zone.unwrap_or_else(|| self.zone.clone()),
            intensity: body.carbon_intensity,
            datetime: body.datetime,
        })
    }
}
