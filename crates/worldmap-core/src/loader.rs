// crates/worldmap-core/src/loader.rs

//! # Boundary Loader
//!
//! One request at startup to the configured GeoJSON endpoint. The fetch
//! itself belongs to the front-end (browser `fetch`, or the blocking client
//! behind the `http` feature); the loader decides what happens before and
//! after it:
//!
//! 1. [`BoundaryLoader::begin`] shows the loading banner and asks for the
//!    FeatureCollection via [`Effect::FetchBoundaries`].
//! 2. [`BoundaryLoader::complete`] parses the body, registers one region per
//!    feature and removes the banner, or rewrites the banner into an error.
//!
//! There is no retry. Reloading the page is the recovery path.

use crate::config::Config;
use crate::effect::{BoundaryBinding, Effect, Effects, MapCommand, Tone};
use crate::error::{MapError, Result};
use crate::geo::Bounds;
use crate::raw::FeatureCollectionRaw;
use crate::region::{Geometry, Region, RegionLayer};
use crate::style::PathStyle;
use crate::viewport::Viewport;
use serde::Serialize;

/// A feature that survived parsing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundaryFeature {
    pub feature_index: usize,
    pub name: String,
    pub geometry: Geometry,
    pub bounds: Bounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct LoadReport {
    pub regions: usize,
    pub skipped: usize,
}

/// Parses a FeatureCollection.
///
/// Features without a renderable polygon are skipped with a warning; the
/// second value counts them. A feature without `properties.name` is kept
/// under the name `"Unknown"`.
pub fn parse_feature_collection(json: &str) -> Result<(Vec<BoundaryFeature>, usize)> {
    let raw: FeatureCollectionRaw = serde_json::from_str(json)?;
    let mut out = Vec::with_capacity(raw.features.len());
    let mut skipped = 0;

    for (feature_index, f) in raw.features.into_iter().enumerate() {
        let name = f
            .properties
            .and_then(|p| p.name)
            .unwrap_or_else(|| "Unknown".to_string());

        let Some(geometry_raw) = f.geometry else {
            log::warn!("feature #{feature_index} ({name}) has no geometry, skipped");
            skipped += 1;
            continue;
        };

        let geometry = match geometry_raw.to_geometry() {
            Ok(g) => g,
            Err(e) => {
                log::warn!("feature #{feature_index} ({name}) skipped: {e}");
                skipped += 1;
                continue;
            }
        };

        let Some(bounds) = geometry.bounds() else {
            log::warn!("feature #{feature_index} ({name}) has an empty polygon, skipped");
            skipped += 1;
            continue;
        };

        out.push(BoundaryFeature {
            feature_index,
            name,
            geometry,
            bounds,
        });
    }

    Ok((out, skipped))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryLoader {
    url: String,
    loading_text: String,
    error_text: String,
    state: LoadState,
}

impl BoundaryLoader {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            url: cfg.text(
                "geoJson.url",
                "https://raw.githubusercontent.com/johan/world.geo.json/master/countries.geo.json",
            ),
            loading_text: cfg.text("ui.loadingText", "Loading country data..."),
            error_text: cfg.text("ui.loadingErrorText", "Failed to load country data"),
            state: LoadState::Idle,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    /// Starts the one-shot load. Calling it again after the first time does
    /// nothing.
    pub fn begin(&mut self, viewport: &mut Viewport, fx: &mut Effects) {
        if self.state != LoadState::Idle {
            log::debug!("boundary load already {:?}", self.state);
            return;
        }
        self.state = LoadState::Loading;
        viewport.show_transient_banner(&self.loading_text, fx);
        fx.push(Effect::FetchBoundaries {
            url: self.url.clone(),
        });
        log::info!("fetching boundaries from {}", self.url);
    }

    /// Finishes the load with the response body, or the fetch error.
    ///
    /// On success the regions are appended to `layer` and the layer is marked
    /// loaded. Parse failures are reported the same way as network failures.
    pub fn complete(
        &mut self,
        body: Result<String>,
        layer: &mut RegionLayer,
        viewport: &mut Viewport,
        default_style: &PathStyle,
        fx: &mut Effects,
    ) -> Result<LoadReport> {
        if self.state == LoadState::Loaded {
            log::warn!("boundaries already loaded, response ignored");
            return Ok(LoadReport::default());
        }

        let parsed = body.and_then(|json| parse_feature_collection(&json));
        let (features, skipped) = match parsed {
            Ok(v) => v,
            Err(e) => {
                log::error!("boundary load failed: {e}");
                self.state = LoadState::Failed;
                viewport.update_banner(&self.error_text, Tone::Error, fx);
                return Err(match e {
                    MapError::Network(_) | MapError::Timeout(_) | MapError::Aborted => e,
                    other => MapError::Network(other.to_string()),
                });
            }
        };

        let mut bindings = Vec::with_capacity(features.len());
        for f in features {
            let region = Region::from_boundary(
                layer.next_id(),
                f.feature_index,
                &f.name,
                f.geometry,
                f.bounds,
            );
            let id = layer.insert(region);
            bindings.push(BoundaryBinding {
                region: id,
                feature_index: f.feature_index,
            });
        }
        layer.mark_boundaries_loaded();
        self.state = LoadState::Loaded;

        let report = LoadReport {
            regions: bindings.len(),
            skipped,
        };
        fx.map(MapCommand::AddBoundaries {
            bindings,
            style: default_style.clone(),
        });
        viewport.clear_transient_banner(fx);
        log::info!(
            "loaded {} boundary regions ({} skipped)",
            report.regions,
            report.skipped
        );
        Ok(report)
    }
}

/// Blocking GET of the boundary data. Non-success statuses are
/// [`MapError::Network`].
#[cfg(feature = "http")]
pub fn fetch(url: &str) -> Result<String> {
    let resp = reqwest::blocking::get(url)?;
    let status = resp.status();
    if !status.is_success() {
        return Err(MapError::Network(format!("HTTP {status} from {url}")));
    }
    Ok(resp.text()?)
}
