// crates/worldmap-core/src/app.rs

//! # Application Context
//!
//! [`MapApp`] owns every piece of page state: the viewport, the region
//! layer with its single selection, the boundary loader and the one search
//! session. Front-ends feed it [`AppEvent`]s and apply the [`Effect`]s it
//! returns, in order.
//!
//! ```rust
//! use worldmap_core::prelude::*;
//!
//! let mut app = MapApp::new(Config::default(), "map", &headless()).unwrap();
//! let startup = app.take_effects();
//! assert!(startup.iter().any(|e| matches!(e, Effect::FetchBoundaries { .. })));
//!
//! let fx = app.dispatch(AppEvent::SearchSubmit { input: "新加坡".into() });
//! assert!(!fx.iter().any(|e| matches!(e, Effect::Search(SearchEffect::Geocode { .. }))));
//! ```

use crate::config::Config;
use crate::effect::{Effect, Effects, MapCommand, SearchEffect};
use crate::error::{MapError, Result};
use crate::geo::LatLng;
use crate::loader::{BoundaryLoader, LoadReport};
use crate::overlay;
use crate::region::{RegionId, RegionLayer};
use crate::search::{KeyAction, SearchEngine, SearchKey, SearchResultItem, Ticket};
use crate::selection::{Framing, PointerTarget, SelectOutcome, SelectionEngine};
use crate::text::{bilingual, BilingualName};
use crate::viewport::{ElementProbe, Viewport};
use serde::{Deserialize, Serialize};

/// Page anchors the search box needs.
pub const SEARCH_ANCHORS: [&str; 3] = ["searchInput", "searchButton", "searchResults"];

/// Everything that can happen to the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum AppEvent {
    PointerEnter {
        region: RegionId,
        target: PointerTarget,
    },
    PointerLeave {
        region: RegionId,
        target: PointerTarget,
    },
    Click {
        region: RegionId,
    },
    SearchSubmit {
        input: String,
    },
    SearchKey {
        key: SearchKey,
        input: String,
    },
    SearchResultClicked {
        index: usize,
    },
    /// A click outside the search input and its result panel.
    SearchDismissed,
    GeocodeResponse {
        ticket: Ticket,
        body: String,
    },
    GeocodeFailed {
        ticket: Ticket,
        reason: String,
    },
    GeocodeAborted {
        ticket: Ticket,
    },
    SearchTimeout {
        ticket: Ticket,
    },
    BoundariesLoaded {
        body: String,
    },
    BoundariesFailed {
        reason: String,
    },
}

/// Counts describing the current page, for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MapStats {
    pub boundary_regions: usize,
    pub manual_regions: usize,
    pub proxy_markers: usize,
    pub boundaries_loaded: bool,
    pub selected: Option<String>,
}

#[derive(Debug)]
pub struct MapApp {
    config: Config,
    viewport: Viewport,
    layer: RegionLayer,
    loader: BoundaryLoader,
    selection: SelectionEngine,
    search: SearchEngine,
    city_zoom: f64,
    search_marker: Option<LatLng>,
    fx: Effects,
}

impl MapApp {
    /// Builds the page state and queues the startup effects: map surface,
    /// manual markers, default status line, loading banner and the boundary
    /// fetch.
    ///
    /// Only a missing map container is fatal. Missing search anchors disable
    /// search and nothing else.
    pub fn new(config: Config, container_id: &str, probe: &dyn ElementProbe) -> Result<Self> {
        let mut fx = Effects::new();
        let mut viewport = Viewport::initialize(&config, container_id, probe, &mut fx)?;

        let selection = SelectionEngine::from_config(&config);
        let mut layer = RegionLayer::with_manual_regions();
        let radius: f64 = config.get_or("countries.manualMarkerRadius", 15.0);
        let n = overlay::add_manual_markers(&mut layer, radius, selection.palette(), &mut fx);
        log::info!("{n} manual regions registered");

        let mut search = SearchEngine::from_config(&config);
        if let Some(missing) = SEARCH_ANCHORS.iter().find(|id| !probe.has_element(id)) {
            let e = MapError::MissingElement((*missing).to_string());
            log::error!("search disabled: {e}");
            search.disable();
        }
        search.init_controls(&mut fx);

        fx.status(config.text("ui.currentCountryDefaultText", ""));

        let mut loader = BoundaryLoader::from_config(&config);
        loader.begin(&mut viewport, &mut fx);

        Ok(Self {
            city_zoom: config.get_or("search.cityZoom", 12.0),
            config,
            viewport,
            layer,
            loader,
            selection,
            search,
            search_marker: None,
            fx,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn layer(&self) -> &RegionLayer {
        &self.layer
    }

    pub fn selection(&self) -> &SelectionEngine {
        &self.selection
    }

    pub fn search(&self) -> &SearchEngine {
        &self.search
    }

    pub fn boundary_url(&self) -> &str {
        self.loader.url()
    }

    /// Drains effects queued outside of [`Self::dispatch`] (startup).
    pub fn take_effects(&mut self) -> Vec<Effect> {
        self.fx.take()
    }

    /// Applies one event and returns the effects it caused, including any
    /// still queued from startup.
    pub fn dispatch(&mut self, event: AppEvent) -> Vec<Effect> {
        match event {
            AppEvent::PointerEnter { region, target } => {
                self.selection
                    .pointer_enter(&mut self.layer, region, target, &mut self.fx);
            }
            AppEvent::PointerLeave { region, target } => {
                self.selection
                    .pointer_leave(&mut self.layer, region, target, &mut self.fx);
            }
            AppEvent::Click { region } => {
                if let Err(e) = self.select(region) {
                    log::warn!("click ignored: {e}");
                }
            }
            AppEvent::SearchSubmit { input } => {
                self.search.submit(&input, &self.layer, &mut self.fx);
            }
            AppEvent::SearchKey { key, input } => match self.search.on_key(key, &mut self.fx) {
                KeyAction::None => {}
                KeyAction::Submit => {
                    self.search.submit(&input, &self.layer, &mut self.fx);
                }
                KeyAction::Activate(item) => self.activate_result(&item),
            },
            AppEvent::SearchResultClicked { index } => {
                if let Some(item) = self.search.activate(index, &mut self.fx) {
                    self.activate_result(&item);
                }
            }
            AppEvent::SearchDismissed => self.search.dismiss(&mut self.fx),
            AppEvent::GeocodeResponse { ticket, body } => {
                self.search.on_geocode_response(ticket, &body, &mut self.fx);
            }
            AppEvent::GeocodeFailed { ticket, reason } => {
                self.search
                    .on_geocode_failed(ticket, &MapError::Network(reason), &mut self.fx);
            }
            AppEvent::GeocodeAborted { ticket } => {
                self.search
                    .on_geocode_failed(ticket, &MapError::Aborted, &mut self.fx);
            }
            AppEvent::SearchTimeout { ticket } => self.search.on_timeout(ticket, &mut self.fx),
            AppEvent::BoundariesLoaded { body } => {
                if let Err(e) = self.boundaries_loaded(Ok(body)) {
                    log::warn!("boundaries unavailable: {e}");
                }
            }
            AppEvent::BoundariesFailed { reason } => {
                let _ = self.boundaries_loaded(Err(MapError::Network(reason)));
            }
        }
        self.fx.take()
    }

    /// Completes the startup fetch and, on success, runs the small-region
    /// overlay over the new boundaries.
    pub fn boundaries_loaded(&mut self, body: Result<String>) -> Result<LoadReport> {
        let report = self.loader.complete(
            body,
            &mut self.layer,
            &mut self.viewport,
            &self.selection.palette().country_default,
            &mut self.fx,
        )?;
        overlay::add_small_region_markers(
            &mut self.layer,
            self.selection.policy(),
            self.selection.palette(),
            &mut self.fx,
        );
        Ok(report)
    }

    /// Direct selection, as from a click on a boundary or marker.
    pub fn select(&mut self, region: RegionId) -> Result<SelectOutcome> {
        self.selection.select(
            &mut self.layer,
            &mut self.viewport,
            region,
            Framing::Fit,
            &mut self.fx,
        )
    }

    pub fn select_by_name(&mut self, english: &str) -> Result<SelectOutcome> {
        self.selection.select_by_name(
            &mut self.layer,
            &mut self.viewport,
            english,
            None,
            Framing::Fit,
            &mut self.fx,
        )
    }

    /// Routes a picked search result.
    ///
    /// A country goes to the manual registry or the boundary layer,
    /// whichever holds the name. A city gets the search marker, a close
    /// zoom and, when boundaries are loaded, its country highlighted.
    pub fn activate_result(&mut self, item: &SearchResultItem) {
        match item {
            SearchResultItem::Country { english, localized } => {
                let _ = self.selection.select_by_name(
                    &mut self.layer,
                    &mut self.viewport,
                    english,
                    localized.as_deref(),
                    Framing::Fit,
                    &mut self.fx,
                );
                self.fx.search(SearchEffect::SetInput {
                    text: bilingual(english, localized.as_deref()),
                });
            }
            SearchResultItem::City {
                at,
                name,
                country,
                country_code,
            } => {
                if self.search_marker.take().is_some() {
                    self.fx.map(MapCommand::RemoveSearchMarker);
                }
                self.fx.map(MapCommand::PlaceSearchMarker {
                    at: *at,
                    popup: name.clone(),
                });
                self.search_marker = Some(*at);
                self.viewport.pan_to_point(*at, self.city_zoom, &mut self.fx);
                self.selection.select_at_point(
                    &mut self.layer,
                    &mut self.viewport,
                    *at,
                    country.as_deref(),
                    country_code.as_deref(),
                    &mut self.fx,
                );
                self.fx.search(SearchEffect::SetInput { text: name.clone() });
            }
        }
    }

    pub fn search_marker(&self) -> Option<LatLng> {
        self.search_marker
    }

    pub fn stats(&self) -> MapStats {
        MapStats {
            boundary_regions: self.layer.boundary_regions().count(),
            manual_regions: self.layer.iter().filter(|r| !r.is_boundary()).count(),
            proxy_markers: self.layer.iter().filter(|r| r.marker.is_some()).count(),
            boundaries_loaded: self.layer.boundaries_loaded(),
            selected: self
                .selection
                .selected()
                .and_then(|id| self.layer.get(id))
                .map(|r| r.bilingual_label()),
        }
    }
}
