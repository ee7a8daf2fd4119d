use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::{AddressDetail, GeoError, ReverseGeocoder};

/// Reverse geocoder backed by a Nominatim instance (OpenStreetMap by default).
///
/// Nominatim's usage policy requires an identifying `User-Agent`.
#[derive(Clone)]
pub struct NominatimGeocoder {
    client: Client,
    base_url: String,
    language: String,
}

/// Successful lookups carry `address`; misses carry `error` with status 200.
#[derive(Debug, Deserialize)]
struct ReverseResponse {
    #[serde(default)]
    address: Option<AddressDetail>,
    #[serde(default)]
    error: Option<String>,
}

impl NominatimGeocoder {
    pub fn new(
        base_url: impl Into<String>,
        user_agent: &str,
        language: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, GeoError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            language: language.into(),
        })
    }
}

#[async_trait]
impl ReverseGeocoder for NominatimGeocoder {
    async fn reverse(&self, lat: f64, lon: f64) -> Result<AddressDetail, GeoError> {
        let url = format!("{}/reverse", self.base_url);
        let lat_param = lat.to_string();
        let lon_param = lon.to_string();
        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "jsonv2"),
                ("lat", lat_param.as_str()),
                ("lon", lon_param.as_str()),
                ("addressdetails", "1"),
                ("accept-language", self.language.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::Status {
                status: status.as_u16(),
            });
        }

        let body: ReverseResponse = response.json().await?;
        debug!("Nominatim lookup for ({lat}, {lon}) complete");
        address_from(body)
    }
}

fn address_from(body: ReverseResponse) -> Result<AddressDetail, GeoError> {
    match body.address {
        Some(address) => Ok(address),
        None => Err(GeoError::NoResult(
            body.error.unwrap_or_else(|| "empty response".to_string()),
        )),
    }
}
