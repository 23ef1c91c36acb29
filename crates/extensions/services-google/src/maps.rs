//! Google Maps directions.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use highlighter_protocols::{AdapterError, Directions, DirectionsQuery, DirectionsService};

use crate::http::{read_json, transport_error};

/// Maps adapter settings.
#[derive(Debug, Clone)]
pub struct MapsSettings {
    /// Directions API key. Without it only the map URL is produced.
    pub api_key: Option<String>,
    pub base_url: String,
    pub travel_mode: String,
    pub directions_url: String,
}

impl Default for MapsSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://www.google.com/maps/dir/".to_string(),
            travel_mode: "driving".to_string(),
            directions_url: "https://maps.googleapis.com/maps/api/directions/json".to_string(),
        }
    }
}

pub struct GoogleMaps {
    client: Client,
    settings: MapsSettings,
}

impl GoogleMaps {
    pub fn new(settings: MapsSettings) -> Self {
        Self {
            client: Client::new(),
            settings,
        }
    }

    /// Map URL for `query`. The origin is added only when it is known and
    /// is not `current location`, so the map falls back to the device position.
    pub fn map_url(&self, query: &DirectionsQuery) -> Result<String, AdapterError> {
        let mut url = Url::parse(&self.settings.base_url)
            .map_err(|e| AdapterError::InvalidInput(format!("bad maps URL: {}", e)))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs
                .append_pair("api", "1")
                .append_pair("destination", query.destination.trim())
                .append_pair("travelmode", &self.settings.travel_mode);
            if let Some(origin) = known_origin(query) {
                pairs.append_pair("origin", origin);
            }
        }
        Ok(url.to_string())
    }

    async fn route(
        &self,
        api_key: &str,
        origin: &str,
        destination: &str,
    ) -> Result<Value, AdapterError> {
        debug!("Requesting route to {}", destination);
        let response = self
            .client
            .get(&self.settings.directions_url)
            .query(&[
                ("origin", origin),
                ("destination", destination),
                ("mode", self.settings.travel_mode.as_str()),
                ("key", api_key),
            ])
            .send()
            .await
            .map_err(transport_error)?;
        let payload: Value = read_json(response).await?;

        match payload.get("status").and_then(Value::as_str) {
            Some("OK") => Ok(payload),
            Some(status @ ("ZERO_RESULTS" | "NOT_FOUND")) => Err(AdapterError::InvalidInput(
                format!("No route found ({})", status),
            )),
            Some(status @ ("OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" | "UNKNOWN_ERROR")) => {
                Err(AdapterError::Unavailable(format!("Directions API: {}", status)))
            }
            Some(status) => Err(AdapterError::InvalidResponse(format!(
                "Directions API: {}",
                status
            ))),
            None => Err(AdapterError::InvalidResponse(
                "Directions API response has no status".to_string(),
            )),
        }
    }
}

fn known_origin(query: &DirectionsQuery) -> Option<&str> {
    query
        .origin
        .as_deref()
        .map(str::trim)
        .filter(|o| !o.is_empty() && !o.eq_ignore_ascii_case("current location"))
}

#[async_trait]
impl DirectionsService for GoogleMaps {
    fn name(&self) -> &str {
        "google-maps"
    }

    async fn directions(&self, query: &DirectionsQuery) -> Result<Directions, AdapterError> {
        let destination = query.destination.trim();
        if destination.is_empty() {
            return Err(AdapterError::InvalidInput("Destination is empty".to_string()));
        }
        let url = self.map_url(query)?;

        let route = match (self.settings.api_key.as_deref(), known_origin(query)) {
            (Some(key), Some(origin)) if !key.is_empty() => {
                match self.route(key, origin, destination).await {
                    Ok(route) => Some(route),
                    Err(e) => {
                        warn!("Route lookup failed, returning map link only: {}", e);
                        None
                    }
                }
            }
            _ => None,
        };

        Ok(Directions { url, route })
    }
}

#[cfg(test)]
#[path = "maps_tests.rs"]
mod tests;
