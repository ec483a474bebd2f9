// crates/worldmap-core/src/search.rs

//! # Search Engine
//!
//! One search session at a time, driven by explicit events:
//!
//! ```text
//! idle ─submit─▶ searching ─▶ resultsShown | timedOut | errored | aborted ─▶ idle
//! ```
//!
//! Every session gets a fresh [`Ticket`]. Network replies, failures and
//! timer expiries carry the ticket of the session that caused them; anything
//! that does not carry the active ticket is stale and dropped. That is the
//! whole cancellation story: superseding, timing out and dismissing all
//! clear the active ticket and tell the front-end to abort.

pub mod geocode;
pub mod local;

use crate::config::Config;
use crate::effect::{Effects, SearchEffect, Tone};
use crate::error::MapError;
use crate::geo::LatLng;
use crate::manual;
use crate::region::RegionLayer;
use crate::text::{bilingual, Query};
use geocode::GeocoderSettings;
use serde::{Deserialize, Serialize};

pub use local::search_local;

/// Identifies one search session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticket(pub u64);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SearchResultItem {
    Country {
        english: String,
        localized: Option<String>,
    },
    City {
        at: LatLng,
        name: String,
        country: Option<String>,
        country_code: Option<String>,
    },
}

impl SearchResultItem {
    pub fn country(english: &str, localized: Option<&str>) -> Self {
        SearchResultItem::Country {
            english: english.to_string(),
            localized: localized.map(str::to_string),
        }
    }

    /// First line of the rendered row.
    pub fn label(&self) -> String {
        match self {
            SearchResultItem::Country { english, localized } => {
                bilingual(english, localized.as_deref())
            }
            SearchResultItem::City { name, .. } => name.clone(),
        }
    }

    /// Second line of the rendered row, cities only.
    pub fn detail(&self) -> Option<&str> {
        match self {
            SearchResultItem::Country { .. } => None,
            SearchResultItem::City { country, .. } => country.as_deref(),
        }
    }
}

/// A result as the panel renders it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    pub item: SearchResultItem,
}

impl From<&SearchResultItem> for ResultRow {
    fn from(item: &SearchResultItem) -> Self {
        Self {
            label: item.label(),
            detail: item.detail().map(str::to_string),
            item: item.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchPhase {
    #[default]
    Idle,
    Searching,
    ResultsShown,
    TimedOut,
    Errored,
    Aborted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SearchKey {
    // Aliases accept DOM `KeyboardEvent.key` values as-is.
    #[serde(alias = "Enter")]
    Enter,
    #[serde(alias = "ArrowDown")]
    ArrowDown,
    #[serde(alias = "ArrowUp")]
    ArrowUp,
    #[serde(alias = "Escape")]
    Escape,
}

/// What the caller has to do after a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction {
    None,
    /// Enter with nothing highlighted: run a fresh search on the input.
    Submit,
    Activate(SearchResultItem),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSettings {
    pub timeout_ms: u64,
    pub limit: usize,
    pub manual_sample_size: usize,
    pub button_text: String,
    pub button_disabled_text: String,
    pub searching_text: String,
    pub timeout_text: String,
    pub no_results_text: String,
    pub network_error_text: String,
    pub data_loading_text: String,
    pub manual_hint_text: String,
    pub geocoder: GeocoderSettings,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self::from_config(&Config::empty())
    }
}

impl SearchSettings {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            timeout_ms: cfg.get_or("search.timeout", 3000),
            limit: cfg.get_or("search.limit", 8),
            manual_sample_size: cfg.get_or("search.manualSampleSize", 5),
            button_text: cfg.text("ui.searchButtonText", "Search"),
            button_disabled_text: cfg.text("ui.searchButtonDisabledText", "Search"),
            searching_text: cfg.text("ui.searchingText", "Searching..."),
            timeout_text: cfg.text("ui.timeoutText", "Request timed out, please retry"),
            no_results_text: cfg.text("ui.noResultsText", "No matching place"),
            network_error_text: cfg.text("ui.networkErrorText", "Network error, please retry"),
            data_loading_text: cfg.text(
                "ui.dataLoadingText",
                "Boundary data is still loading, please retry shortly...",
            ),
            manual_hint_text: cfg.text(
                "ui.manualHintText",
                "{count} regions are available already (e.g. {list})",
            ),
            geocoder: GeocoderSettings::from_config(cfg),
        }
    }

    /// The informational text shown when boundaries are not loaded yet.
    fn not_loaded_message(&self) -> String {
        let sample = manual::sample_localized(self.manual_sample_size).join("、");
        let hint = self
            .manual_hint_text
            .replace("{count}", &manual::entries().len().to_string())
            .replace("{list}", &sample);
        format!("{}\n{}", self.data_loading_text, hint)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchEngine {
    settings: SearchSettings,
    enabled: bool,
    last_ticket: u64,
    active: Option<Ticket>,
    phase: SearchPhase,
    results: Vec<SearchResultItem>,
    cursor: Option<usize>,
    panel_visible: bool,
}

impl SearchEngine {
    pub fn new(settings: SearchSettings) -> Self {
        Self {
            settings,
            enabled: true,
            last_ticket: 0,
            active: None,
            phase: SearchPhase::Idle,
            results: Vec::new(),
            cursor: None,
            panel_visible: false,
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(SearchSettings::from_config(cfg))
    }

    /// A search box whose page anchors are missing. Every handler is a
    /// no-op; the rest of the map keeps working.
    pub fn disable(&mut self) {
        self.enabled = false;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Labels the trigger control once at startup.
    pub fn init_controls(&self, fx: &mut Effects) {
        if self.enabled {
            fx.search(SearchEffect::SetButton {
                enabled: true,
                label: self.settings.button_text.clone(),
            });
        }
    }

    pub fn settings(&self) -> &SearchSettings {
        &self.settings
    }

    pub fn phase(&self) -> SearchPhase {
        self.phase
    }

    pub fn active_ticket(&self) -> Option<Ticket> {
        self.active
    }

    pub fn results(&self) -> &[SearchResultItem] {
        &self.results
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn panel_visible(&self) -> bool {
        self.panel_visible
    }

    /// Starts a session for `input`.
    ///
    /// Local country matches end the session on the spot; otherwise, with
    /// boundaries loaded, a [`SearchEffect::Geocode`] is emitted and the
    /// session waits for [`Self::on_geocode_response`],
    /// [`Self::on_geocode_failed`] or [`Self::on_timeout`].
    pub fn submit(&mut self, input: &str, layer: &RegionLayer, fx: &mut Effects) -> Option<Ticket> {
        if !self.enabled {
            return None;
        }
        let query = Query::new(input);
        if query.is_empty() {
            self.hide_panel(fx);
            return None;
        }

        self.cancel_active(fx);
        self.last_ticket += 1;
        let ticket = Ticket(self.last_ticket);
        self.active = Some(ticket);
        self.phase = SearchPhase::Searching;
        self.results.clear();
        self.cursor = None;
        self.panel_visible = true;

        fx.search(SearchEffect::SetButton {
            enabled: false,
            label: self.settings.searching_text.clone(),
        });
        fx.search(SearchEffect::ShowSearching {
            text: self.settings.searching_text.clone(),
        });
        fx.search(SearchEffect::StartTimer {
            ticket,
            after_ms: self.settings.timeout_ms,
        });
        log::debug!("search {ticket:?}: {:?}", query.as_str());

        let local = search_local(&query, layer, self.settings.limit);
        if !local.is_empty() {
            self.show_results(local, fx);
            self.finish(fx);
            return Some(ticket);
        }

        if !layer.boundaries_loaded() {
            self.show_message(
                self.settings.not_loaded_message(),
                Tone::Warning,
                SearchPhase::ResultsShown,
                fx,
            );
            self.finish(fx);
            return Some(ticket);
        }

        match self.settings.geocoder.request_url(query.as_str()) {
            Ok(url) => fx.search(SearchEffect::Geocode { ticket, url }),
            Err(e) => {
                log::error!("cannot build geocoder request: {e}");
                self.show_message(
                    self.settings.network_error_text.clone(),
                    Tone::Error,
                    SearchPhase::Errored,
                    fx,
                );
                self.finish(fx);
            }
        }
        Some(ticket)
    }

    /// `true` when `ticket` belongs to the running session.
    fn is_current(&self, ticket: Ticket) -> bool {
        if self.active == Some(ticket) {
            true
        } else {
            log::debug!("dropping stale event for {ticket:?}");
            false
        }
    }

    pub fn on_geocode_response(&mut self, ticket: Ticket, body: &str, fx: &mut Effects) {
        if !self.is_current(ticket) {
            return;
        }
        match geocode::parse_response(body) {
            Ok(items) if items.is_empty() => {
                self.show_message(
                    self.settings.no_results_text.clone(),
                    Tone::Error,
                    SearchPhase::ResultsShown,
                    fx,
                );
            }
            Ok(mut items) => {
                items.truncate(self.settings.limit);
                self.show_results(items, fx);
            }
            Err(e) => {
                log::error!("geocoder response unreadable: {e}");
                self.show_message(
                    self.settings.network_error_text.clone(),
                    Tone::Error,
                    SearchPhase::Errored,
                    fx,
                );
            }
        }
        self.finish(fx);
    }

    /// The request failed. Aborts end the session silently.
    pub fn on_geocode_failed(&mut self, ticket: Ticket, error: &MapError, fx: &mut Effects) {
        if !self.is_current(ticket) {
            return;
        }
        match error {
            e if e.is_silent() => {
                log::info!("search request aborted");
                self.phase = SearchPhase::Aborted;
            }
            MapError::Timeout(_) => {
                self.show_message(
                    self.settings.timeout_text.clone(),
                    Tone::Error,
                    SearchPhase::TimedOut,
                    fx,
                );
            }
            e => {
                log::error!("search failed: {e}");
                self.show_message(
                    self.settings.network_error_text.clone(),
                    Tone::Error,
                    SearchPhase::Errored,
                    fx,
                );
            }
        }
        self.finish(fx);
    }

    /// The session timer fired before a reply.
    pub fn on_timeout(&mut self, ticket: Ticket, fx: &mut Effects) {
        if !self.is_current(ticket) {
            return;
        }
        fx.search(SearchEffect::Abort { ticket });
        self.show_message(
            self.settings.timeout_text.clone(),
            Tone::Error,
            SearchPhase::TimedOut,
            fx,
        );
        self.finish(fx);
    }

    /// Ends the running session: timer cleared, handle dropped, control
    /// restored. Safe to call in any state.
    pub fn finish(&mut self, fx: &mut Effects) {
        if let Some(ticket) = self.active.take() {
            fx.search(SearchEffect::CancelTimer { ticket });
        }
        if self.enabled {
            fx.search(SearchEffect::SetButton {
                enabled: true,
                label: self.settings.button_text.clone(),
            });
        }
    }

    /// Keyboard contract of the search input.
    pub fn on_key(&mut self, key: SearchKey, fx: &mut Effects) -> KeyAction {
        if !self.enabled {
            return KeyAction::None;
        }
        match key {
            SearchKey::Enter => match self.cursor {
                Some(i) if self.panel_visible => self
                    .activate(i, fx)
                    .map_or(KeyAction::Submit, KeyAction::Activate),
                _ => KeyAction::Submit,
            },
            SearchKey::ArrowDown => {
                if let (true, Some(i)) = (self.panel_visible, self.cursor) {
                    if i + 1 < self.results.len() {
                        self.move_cursor(i + 1, fx);
                    }
                }
                KeyAction::None
            }
            SearchKey::ArrowUp => {
                if let (true, Some(i)) = (self.panel_visible, self.cursor) {
                    if i > 0 {
                        self.move_cursor(i - 1, fx);
                    }
                }
                KeyAction::None
            }
            SearchKey::Escape => {
                self.dismiss(fx);
                KeyAction::None
            }
        }
    }

    fn move_cursor(&mut self, i: usize, fx: &mut Effects) {
        self.cursor = Some(i);
        fx.search(SearchEffect::Highlight { index: Some(i) });
    }

    /// Escape or a click outside the search area.
    pub fn dismiss(&mut self, fx: &mut Effects) {
        if !self.enabled {
            return;
        }
        if let Some(ticket) = self.active {
            fx.search(SearchEffect::Abort { ticket });
        }
        self.hide_panel(fx);
        self.finish(fx);
        self.phase = SearchPhase::Idle;
    }

    /// Picks result `index`, closing the panel. The caller routes the item.
    pub fn activate(&mut self, index: usize, fx: &mut Effects) -> Option<SearchResultItem> {
        let item = self.results.get(index).cloned()?;
        self.hide_panel(fx);
        self.phase = SearchPhase::Idle;
        Some(item)
    }

    fn hide_panel(&mut self, fx: &mut Effects) {
        self.panel_visible = false;
        self.results.clear();
        self.cursor = None;
        fx.search(SearchEffect::HidePanel);
    }

    fn show_results(&mut self, items: Vec<SearchResultItem>, fx: &mut Effects) {
        fx.search(SearchEffect::ShowResults {
            items: items.iter().map(ResultRow::from).collect(),
        });
        self.results = items;
        self.panel_visible = true;
        self.phase = SearchPhase::ResultsShown;
        self.move_cursor(0, fx);
    }

    fn show_message(&mut self, text: String, tone: Tone, phase: SearchPhase, fx: &mut Effects) {
        self.results.clear();
        self.cursor = None;
        self.panel_visible = true;
        self.phase = phase;
        fx.search(SearchEffect::ShowMessage { text, tone });
    }

    fn cancel_active(&mut self, fx: &mut Effects) {
        if let Some(prev) = self.active.take() {
            fx.search(SearchEffect::Abort { ticket: prev });
            fx.search(SearchEffect::CancelTimer { ticket: prev });
        }
    }
}
