use crate::domain::model::{Coordinate, Geocoded};
use crate::domain::ports::{ConfigProvider, Geocoder};
use crate::utils::error::{ProfileError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api-adresse.data.gouv.fr";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    features: Vec<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Feature {
    geometry: Geometry,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    /// GeoJSON order: longitude first.
    coordinates: Vec<f64>,
}

/// Geocoder backed by a GeoJSON search endpoint (`GET {base}/search/?q=...`).
pub struct HttpGeocoder {
    client: Client,
    base_url: String,
}

impl HttpGeocoder {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.geocoder_base_url(),
            Duration::from_secs(config.geocoder_timeout_seconds()),
        )
    }

    fn search_url(&self, address: &str) -> Result<Url> {
        let raw = format!("{}/search/", self.base_url.trim_end_matches('/'));
        let mut url = Url::parse(&raw).map_err(|e| ProfileError::InvalidConfigValueError {
            field: "geocoder.base_url".to_string(),
            value: self.base_url.clone(),
            reason: e.to_string(),
        })?;
        url.query_pairs_mut().append_pair("q", address);
        Ok(url)
    }

    async fn lookup(&self, address: &str) -> Result<Geocoded> {
        let url = self.search_url(address)?;
        tracing::debug!("Geocoding request: {}", url);

        let response = self.client.get(url).send().await?.error_for_status()?;
        let body: SearchResponse = response.json().await?;

        let Some(first) = body.features.into_iter().next() else {
            return Ok(Geocoded::NotFound);
        };

        let feature: Feature = serde_json::from_value(first)?;
        match feature.geometry.coordinates.as_slice() {
            [lng, lat, ..] => Ok(Geocoded::Found(Coordinate::new(*lat, *lng)?)),
            other => Err(ProfileError::MalformedResponse {
                message: format!("expected [longitude, latitude], got {:?}", other),
            }),
        }
    }
}

#[async_trait]
impl Geocoder for HttpGeocoder {
    async fn resolve(&self, address: &str) -> Geocoded {
        match self.lookup(address).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Error validating address {:?}: {}", address, e);
                Geocoded::NotFound
            }
        }
    }
}
