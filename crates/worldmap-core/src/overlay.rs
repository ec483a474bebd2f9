// crates/worldmap-core/src/overlay.rs

//! # Small-Region Overlay
//!
//! Boundaries too small to hit at world zoom get a circle marker at their
//! bounding-box center. The marker is a second handle on the same region:
//! pointer events on it carry the region's id, and the selection engine keeps
//! its style in step with the region (see [`crate::selection`]).
//!
//! Manual regions have no polygon at all, so every one of them gets a marker
//! of fixed radius.

use crate::effect::{Effects, MapCommand};
use crate::region::{MapRegion, ProxyMarker, RegionLayer, StyleState, ZoomPolicy};
use crate::style::Palette;
use serde::Serialize;

/// Radius floor in pixels.
pub const MIN_MARKER_RADIUS: f64 = 3.0;

/// Marker radius for a small region: five pixels per degree of the shorter
/// side, at least [`MIN_MARKER_RADIUS`].
pub fn marker_radius(width: f64, height: f64) -> f64 {
    (width.min(height) * 5.0).max(MIN_MARKER_RADIUS)
}

/// One line of the small-region listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SmallRegion {
    pub name: String,
    pub label: String,
    pub area: f64,
    pub radius: f64,
}

/// Scans the loaded boundaries once and attaches a proxy marker to every
/// region below the threshold. Regions that already carry one are left
/// alone. Returns the number of markers added.
pub fn add_small_region_markers(
    layer: &mut RegionLayer,
    policy: &ZoomPolicy,
    palette: &Palette,
    fx: &mut Effects,
) -> usize {
    let mut added = 0;
    for region in layer.boundary_regions_mut() {
        if region.marker.is_some() {
            continue;
        }
        let bounds = region.bounds();
        if !policy.is_small(&bounds) {
            continue;
        }
        let marker = ProxyMarker {
            center: bounds.center(),
            radius: marker_radius(bounds.width(), bounds.height()),
            style: StyleState::Default,
        };
        fx.map(MapCommand::AddMarker {
            region: region.id,
            center: marker.center,
            radius: marker.radius,
            style: palette.marker_default.clone(),
        });
        log::debug!("proxy marker for {} r={}", region.name, marker.radius);
        region.marker = Some(marker);
        added += 1;
    }
    log::info!("{added} small regions received proxy markers");
    added
}

/// Gives every manual region its clickable circle.
pub fn add_manual_markers(
    layer: &mut RegionLayer,
    radius: f64,
    palette: &Palette,
    fx: &mut Effects,
) -> usize {
    let ids: Vec<_> = layer
        .iter()
        .filter(|r| !r.is_boundary() && r.marker.is_none())
        .map(|r| r.id)
        .collect();

    for &id in &ids {
        let Some(region) = layer.get_mut(id) else {
            continue;
        };
        let center = region.centroid();
        fx.map(MapCommand::AddMarker {
            region: id,
            center,
            radius,
            style: palette.marker_default.clone(),
        });
        region.marker = Some(ProxyMarker {
            center,
            radius,
            style: StyleState::Default,
        });
    }
    ids.len()
}

/// Small regions of the layer, largest first.
pub fn small_regions(layer: &RegionLayer, policy: &ZoomPolicy) -> Vec<SmallRegion> {
    use crate::text::BilingualName;

    let mut out: Vec<SmallRegion> = layer
        .boundary_regions()
        .filter_map(|r| {
            let b = r.bounds();
            policy.is_small(&b).then(|| SmallRegion {
                name: r.name.clone(),
                label: r.bilingual_label(),
                area: b.area(),
                radius: marker_radius(b.width(), b.height()),
            })
        })
        .collect();
    out.sort_by(|a, b| b.area.total_cmp(&a.area));
    out
}
