// crates/worldmap-core/src/search/geocode.rs

//! City geocoding against a Nominatim-compatible endpoint.

use super::SearchResultItem;
use crate::config::Config;
use crate::error::{MapError, Result};
use crate::geo::LatLng;
use crate::raw::PlaceRaw;
use serde::Serialize;
use url::Url;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeocoderSettings {
    pub url: String,
    /// Sent to the service; the rendered list is capped separately.
    pub limit: usize,
    pub timeout_ms: u64,
}

impl Default for GeocoderSettings {
    fn default() -> Self {
        Self {
            url: "https://nominatim.openstreetmap.org/search".into(),
            limit: 5,
            timeout_ms: 3000,
        }
    }
}

impl GeocoderSettings {
    pub fn from_config(cfg: &Config) -> Self {
        let d = Self::default();
        Self {
            url: cfg.text("search.citySearch.url", &d.url),
            limit: cfg.get_or("search.citySearch.limit", d.limit),
            timeout_ms: cfg.get_or("search.timeout", d.timeout_ms),
        }
    }

    /// Builds the GET URL for `query`.
    ///
    /// ```rust
    /// use worldmap_core::search::geocode::GeocoderSettings;
    ///
    /// let url = GeocoderSettings::default().request_url("São Paulo").unwrap();
    /// assert_eq!(
    ///     url,
    ///     "https://nominatim.openstreetmap.org/search?format=json&q=S%C3%A3o+Paulo&limit=5&addressdetails=1"
    /// );
    /// ```
    pub fn request_url(&self, query: &str) -> Result<String> {
        let limit = self.limit.to_string();
        let url = Url::parse_with_params(
            &self.url,
            &[
                ("format", "json"),
                ("q", query),
                ("limit", limit.as_str()),
                ("addressdetails", "1"),
            ],
        )
        .map_err(|e| MapError::Config(format!("geocoder url {}: {e}", self.url)))?;
        Ok(url.into())
    }
}

/// Parses the geocoder's JSON array.
///
/// Entries with unparsable coordinates are dropped. The city name is the
/// first comma-separated segment of `display_name`.
pub fn parse_response(body: &str) -> Result<Vec<SearchResultItem>> {
    let places: Vec<PlaceRaw> = serde_json::from_str(body)?;
    let items = places
        .into_iter()
        .filter_map(|p| {
            let (Ok(lat), Ok(lng)) = (p.lat.trim().parse::<f64>(), p.lon.trim().parse::<f64>())
            else {
                log::warn!("dropping geocoder hit with bad coordinates: {}", p.display_name);
                return None;
            };
            let name = p
                .display_name
                .split(',')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            let address = p.address.unwrap_or_default();
            Some(SearchResultItem::City {
                at: LatLng::new(lat, lng),
                name,
                country: address.country.filter(|s| !s.is_empty()),
                country_code: address.country_code.filter(|s| !s.is_empty()),
            })
        })
        .collect();
    Ok(items)
}

/// Blocking request with the configured timeout.
#[cfg(feature = "http")]
pub fn fetch(settings: &GeocoderSettings, url: &str) -> Result<String> {
    use std::time::Duration;

    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_millis(settings.timeout_ms))
        .user_agent(concat!("worldmap/", env!("CARGO_PKG_VERSION")))
        .build()?;
    let timed = |e: reqwest::Error| {
        if e.is_timeout() {
            MapError::Timeout(settings.timeout_ms)
        } else {
            MapError::from(e)
        }
    };
    let resp = client.get(url).send().map_err(timed)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(MapError::Network(format!("HTTP {status}")));
    }
    resp.text().map_err(timed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn url_carries_all_parameters() {
        let mut cfg = Config::empty();
        cfg.set("search.citySearch.url", json!("https://geo.example/search"));
        cfg.set("search.citySearch.limit", json!(3));
        let s = GeocoderSettings::from_config(&cfg);
        assert_eq!(
            s.request_url("paris").unwrap(),
            "https://geo.example/search?format=json&q=paris&limit=3&addressdetails=1"
        );
    }

    #[test]
    fn bad_base_url_is_a_config_error() {
        let s = GeocoderSettings {
            url: "not a url".into(),
            ..GeocoderSettings::default()
        };
        assert!(matches!(s.request_url("x"), Err(MapError::Config(_))));
    }

    #[test]
    fn parses_places() {
        let body = json!([
            {
                "display_name": "Paris, Île-de-France, France métropolitaine, France",
                "lat": "48.8588897",
                "lon": "2.3200410",
                "address": {"city": "Paris", "country": "France", "country_code": "fr"}
            },
            {"display_name": "Nowhere", "lat": "north", "lon": "0"},
            {"display_name": "Sea", "lat": "1.5", "lon": "2.5"}
        ])
        .to_string();
        let items = parse_response(&body).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(
            items[0],
            SearchResultItem::City {
                at: LatLng::new(48.8588897, 2.3200410),
                name: "Paris".into(),
                country: Some("France".into()),
                country_code: Some("fr".into()),
            }
        );
        assert!(matches!(&items[1], SearchResultItem::City { country: None, .. }));
    }

    #[test]
    fn empty_array_is_no_results() {
        assert!(parse_response("[]").unwrap().is_empty());
        assert!(parse_response("{}").is_err());
    }
}
