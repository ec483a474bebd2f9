// crates/worldmap-core/src/effect.rs

//! # Effects
//!
//! The core never touches a map library, a DOM or a socket. Every component
//! records what should happen as a typed [`Effect`] and the front-end applies
//! them in order. This keeps the state machines testable without a page.

use crate::geo::{Bounds, LatLng};
use crate::region::RegionId;
use crate::search::{ResultRow, Ticket};
use crate::style::PathStyle;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animation {
    pub animate: bool,
    pub duration_secs: f64,
}

impl Default for Animation {
    fn default() -> Self {
        Self {
            animate: true,
            duration_secs: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryBinding {
    pub region: RegionId,
    pub feature_index: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Info,
    Warning,
    Error,
}

/// Instructions for the map surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum MapCommand {
    CreateMap {
        container: String,
        center: LatLng,
        zoom: f64,
    },
    AddTileLayer {
        url: String,
        attribution: String,
        min_zoom: f64,
        max_zoom: f64,
    },
    AddScale {
        position: String,
        imperial: bool,
    },
    SetView {
        center: LatLng,
        zoom: f64,
        animation: Animation,
    },
    FitBounds {
        bounds: Bounds,
        padding: [u32; 2],
        animation: Animation,
    },
    ShowBanner {
        text: String,
        tone: Tone,
    },
    /// Replaces the banner content in place; the control itself stays.
    UpdateBanner {
        text: String,
        tone: Tone,
    },
    RemoveBanner,
    /// Render the fetched FeatureCollection; each binding ties a feature to
    /// the region id its pointer events must carry.
    AddBoundaries {
        bindings: Vec<BoundaryBinding>,
        style: PathStyle,
    },
    StyleRegion {
        region: RegionId,
        style: PathStyle,
        bring_to_front: bool,
    },
    AddMarker {
        region: RegionId,
        center: LatLng,
        radius: f64,
        style: PathStyle,
    },
    StyleMarker {
        region: RegionId,
        style: PathStyle,
        bring_to_front: bool,
    },
    ShowTooltip {
        region: RegionId,
        text: String,
    },
    HideTooltip {
        region: RegionId,
    },
    SetPointerCursor {
        pointer: bool,
    },
    PlaceSearchMarker {
        at: LatLng,
        popup: String,
    },
    RemoveSearchMarker,
}

/// Instructions for the search box, its result panel and the network.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SearchEffect {
    ShowSearching {
        text: String,
    },
    ShowResults {
        items: Vec<ResultRow>,
    },
    ShowMessage {
        text: String,
        tone: Tone,
    },
    HidePanel,
    Highlight {
        index: Option<usize>,
    },
    SetButton {
        enabled: bool,
        label: String,
    },
    SetInput {
        text: String,
    },
    StartTimer {
        ticket: Ticket,
        after_ms: u64,
    },
    CancelTimer {
        ticket: Ticket,
    },
    Geocode {
        ticket: Ticket,
        url: String,
    },
    Abort {
        ticket: Ticket,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "target", content = "effect", rename_all = "camelCase")]
pub enum Effect {
    Map(MapCommand),
    Search(SearchEffect),
    /// The single-line "current selection" display.
    Status(String),
    FetchBoundaries { url: String },
}

/// Ordered effect buffer shared by the components of one dispatch.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Effects(Vec<Effect>);

impl Effects {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn map(&mut self, cmd: MapCommand) {
        self.0.push(Effect::Map(cmd));
    }

    pub fn search(&mut self, fx: SearchEffect) {
        self.0.push(Effect::Search(fx));
    }

    pub fn status(&mut self, text: impl Into<String>) {
        self.0.push(Effect::Status(text.into()));
    }

    pub fn push(&mut self, e: Effect) {
        self.0.push(e);
    }

    pub fn take(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.0)
    }

    pub fn as_slice(&self) -> &[Effect] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn commands_serialize_with_type_tags() {
        let v = serde_json::to_value(MapCommand::SetView {
            center: LatLng::new(1.0, 2.0),
            zoom: 11.0,
            animation: Animation::default(),
        })
        .unwrap();
        assert_eq!(
            v,
            json!({
                "type": "setView",
                "center": {"lat": 1.0, "lng": 2.0},
                "zoom": 11.0,
                "animation": {"animate": true, "durationSecs": 1.0}
            })
        );
    }

    #[test]
    fn effects_are_drained_in_order() {
        let mut fx = Effects::new();
        fx.status("a");
        fx.map(MapCommand::RemoveBanner);
        let drained = fx.take();
        assert_eq!(
            drained,
            vec![Effect::Status("a".into()), Effect::Map(MapCommand::RemoveBanner)]
        );
        assert!(fx.is_empty());
    }
}
