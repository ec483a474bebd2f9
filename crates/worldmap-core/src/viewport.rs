// crates/worldmap-core/src/viewport.rs

//! # Viewport Controller
//!
//! Owns the single map surface. The surface itself lives in the front-end;
//! this type keeps the current view and turns every mutation into a
//! [`MapCommand`].

use crate::config::Config;
use crate::effect::{Animation, Effects, MapCommand, Tone};
use crate::error::{MapError, Result};
use crate::geo::{Bounds, LatLng};
use crate::region::Focus;
use serde::Serialize;

/// Answers whether a page anchor exists.
///
/// Implemented for any `Fn(&str) -> bool`, so a test can pass a closure and
/// the wasm front-end can pass a DOM lookup.
pub trait ElementProbe {
    fn has_element(&self, id: &str) -> bool;
}

impl<F> ElementProbe for F
where
    F: Fn(&str) -> bool,
{
    fn has_element(&self, id: &str) -> bool {
        self(id)
    }
}

/// A probe that reports every anchor as present. Used by the CLI.
pub fn headless() -> impl ElementProbe {
    |_: &str| true
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewState {
    pub center: LatLng,
    /// Zoom of the last point framing. A fit lets the map library choose
    /// the zoom, so this value is stale while `fitted` is `Some`.
    pub zoom: f64,
    /// Set when the last mutation framed a box rather than a point.
    pub fitted: Option<Bounds>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Viewport {
    container: String,
    view: ViewState,
    min_zoom: f64,
    max_zoom: f64,
    animation: Animation,
    banner_visible: bool,
}

impl Viewport {
    /// Creates the map surface with its tile layer and scale indicator.
    ///
    /// Fails with [`MapError::MissingElement`] when `container_id` is absent;
    /// nothing is emitted in that case.
    pub fn initialize(
        cfg: &Config,
        container_id: &str,
        probe: &dyn ElementProbe,
        fx: &mut Effects,
    ) -> Result<Self> {
        if !probe.has_element(container_id) {
            log::error!("map container #{container_id} not found");
            return Err(MapError::MissingElement(container_id.to_string()));
        }

        let center: [f64; 2] = cfg.get_or("map.initialView.center", [20.0, 0.0]);
        let zoom: f64 = cfg.get_or("map.initialView.zoom", 2.0);
        let min_zoom: f64 = cfg.get_or("map.zoom.min", 2.0);
        let max_zoom: f64 = cfg.get_or("map.zoom.max", 19.0);
        let duration: f64 = cfg.get_or("countries.animationSeconds", 1.0);

        let view = ViewState {
            center: LatLng::from(center),
            zoom: zoom.clamp(min_zoom, max_zoom),
            fitted: None,
        };

        fx.map(MapCommand::CreateMap {
            container: container_id.to_string(),
            center: view.center,
            zoom: view.zoom,
        });
        fx.map(MapCommand::AddTileLayer {
            url: cfg.text(
                "map.tileLayer.url",
                "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            ),
            attribution: cfg.text("map.tileLayer.attribution", ""),
            min_zoom,
            max_zoom,
        });
        fx.map(MapCommand::AddScale {
            position: "bottomleft".into(),
            imperial: false,
        });
        log::info!("map initialized in #{container_id} at zoom {}", view.zoom);

        Ok(Self {
            container: container_id.to_string(),
            view,
            min_zoom,
            max_zoom,
            animation: Animation {
                animate: true,
                duration_secs: duration,
            },
            banner_visible: false,
        })
    }

    pub fn container(&self) -> &str {
        &self.container
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn animation(&self) -> Animation {
        self.animation
    }

    pub fn banner_visible(&self) -> bool {
        self.banner_visible
    }

    fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    pub fn pan_to_bounds(&mut self, bounds: Bounds, padding: [u32; 2], fx: &mut Effects) {
        self.view = ViewState {
            center: bounds.center(),
            zoom: self.view.zoom,
            fitted: Some(bounds),
        };
        fx.map(MapCommand::FitBounds {
            bounds,
            padding,
            animation: self.animation,
        });
    }

    pub fn pan_to_point(&mut self, point: LatLng, zoom: f64, fx: &mut Effects) {
        let zoom = self.clamp_zoom(zoom);
        self.view = ViewState {
            center: point,
            zoom,
            fitted: None,
        };
        fx.map(MapCommand::SetView {
            center: point,
            zoom,
            animation: self.animation,
        });
    }

    pub fn frame(&mut self, focus: Focus, fx: &mut Effects) {
        match focus {
            Focus::Point { center, zoom } => self.pan_to_point(center, zoom, fx),
            Focus::Bounds { bounds, padding } => self.pan_to_bounds(bounds, padding, fx),
        }
    }

    pub fn show_transient_banner(&mut self, text: &str, fx: &mut Effects) {
        self.banner_visible = true;
        fx.map(MapCommand::ShowBanner {
            text: text.to_string(),
            tone: Tone::Info,
        });
    }

    /// Rewrites the banner in place. Without a visible banner there is
    /// nothing to rewrite and a fresh one is shown.
    pub fn update_banner(&mut self, text: &str, tone: Tone, fx: &mut Effects) {
        if self.banner_visible {
            fx.map(MapCommand::UpdateBanner {
                text: text.to_string(),
                tone,
            });
        } else {
            self.banner_visible = true;
            fx.map(MapCommand::ShowBanner {
                text: text.to_string(),
                tone,
            });
        }
    }

    pub fn clear_transient_banner(&mut self, fx: &mut Effects) {
        if self.banner_visible {
            self.banner_visible = false;
            fx.map(MapCommand::RemoveBanner);
        }
    }
}
