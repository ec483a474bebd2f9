// crates/worldmap-core/src/region.rs

//! # Regions
//!
//! A [`Region`] is a country or territory, either backed by a boundary
//! polygon from the FeatureCollection or registered by hand from
//! [`crate::manual`]. Both kinds expose the same display contract through
//! [`MapRegion`], so selection and search never ask which kind they hold.

use crate::config::Config;
use crate::geo::{Bounds, LatLng};
use crate::manual::{self, ManualRegionEntry};
use crate::names;
use crate::text::BilingualName;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Sovereign country or dependent/disputed territory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegionKind {
    Country,
    Territory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StyleState {
    #[default]
    Default,
    Hovered,
    Selected,
}

/// Stable handle of a region inside a [`RegionLayer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub usize);

/// Polygon rings as `[lat, lng]` points; the first ring of each polygon is
/// the outer boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "rings")]
pub enum Geometry {
    Polygon(Vec<Vec<LatLng>>),
    MultiPolygon(Vec<Vec<Vec<LatLng>>>),
}

impl Geometry {
    /// Bounding box of all outer rings. `None` when there are no points.
    pub fn bounds(&self) -> Option<Bounds> {
        let outer: Box<dyn Iterator<Item = &Vec<LatLng>> + '_> = match self {
            Geometry::Polygon(rings) => Box::new(rings.first().into_iter()),
            Geometry::MultiPolygon(polys) => {
                Box::new(polys.iter().filter_map(|rings| rings.first()))
            }
        };
        Bounds::from_points(outer.flatten().copied())
    }

    pub fn polygon_count(&self) -> usize {
        match self {
            Geometry::Polygon(_) => 1,
            Geometry::MultiPolygon(p) => p.len(),
        }
    }
}

/// Where a region's shape comes from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", rename_all = "lowercase")]
pub enum RegionSource {
    Boundary {
        /// Position of the feature in the FeatureCollection, so a front-end
        /// can map the id back to the layer it rendered.
        feature_index: usize,
        geometry: Geometry,
        bounds: Bounds,
    },
    Manual {
        #[serde(skip)]
        entry: &'static ManualRegionEntry,
        center: LatLng,
        zoom: u8,
    },
}

/// The clickable circle drawn over a region that is hard to hit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProxyMarker {
    pub center: LatLng,
    pub radius: f64,
    pub style: StyleState,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    pub id: RegionId,
    pub name: String,
    pub localized: Option<String>,
    pub kind: RegionKind,
    pub style: StyleState,
    pub source: RegionSource,
    pub marker: Option<ProxyMarker>,
}

impl Region {
    /// A boundary-backed region. Localized name and classification come from
    /// the name tables when the canonical name is known there.
    pub fn from_boundary(
        id: RegionId,
        feature_index: usize,
        name: &str,
        geometry: Geometry,
        bounds: Bounds,
    ) -> Self {
        let row = names::by_english(name);
        Self {
            id,
            name: name.to_string(),
            localized: row.map(|r| r.localized.to_string()),
            kind: row.map_or(RegionKind::Country, |r| r.kind),
            style: StyleState::Default,
            source: RegionSource::Boundary {
                feature_index,
                geometry,
                bounds,
            },
            marker: None,
        }
    }

    pub fn from_manual(id: RegionId, entry: &'static ManualRegionEntry) -> Self {
        Self {
            id,
            name: entry.name.to_string(),
            localized: Some(entry.localized.to_string()),
            kind: entry.kind,
            style: StyleState::Default,
            source: RegionSource::Manual {
                entry,
                center: entry.center,
                zoom: entry.zoom,
            },
            marker: None,
        }
    }

    pub fn is_boundary(&self) -> bool {
        matches!(self.source, RegionSource::Boundary { .. })
    }

    pub fn geometry(&self) -> Option<&Geometry> {
        match &self.source {
            RegionSource::Boundary { geometry, .. } => Some(geometry),
            RegionSource::Manual { .. } => None,
        }
    }
}

impl BilingualName for Region {
    fn english_name(&self) -> &str {
        &self.name
    }
    fn localized_name(&self) -> Option<&str> {
        self.localized.as_deref()
    }
}

/// How the viewport should frame a region.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Focus {
    Point { center: LatLng, zoom: f64 },
    Bounds { bounds: Bounds, padding: [u32; 2] },
}

/// Decides between "fit the box" and "centroid at a fixed zoom".
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoomPolicy {
    /// Square degrees. Strictly below this a region counts as small.
    pub small_threshold: f64,
    pub small_zoom: f64,
    pub padding: [u32; 2],
}

impl Default for ZoomPolicy {
    fn default() -> Self {
        Self {
            small_threshold: 0.5,
            small_zoom: 10.0,
            padding: [30, 30],
        }
    }
}

impl ZoomPolicy {
    pub fn from_config(cfg: &Config) -> Self {
        let d = Self::default();
        Self {
            small_threshold: cfg.get_or("countries.smallCountryThreshold", d.small_threshold),
            small_zoom: cfg.get_or("countries.smallCountryDefaultZoom", d.small_zoom),
            padding: cfg.get_or("countries.normalCountryPadding", d.padding),
        }
    }

    pub fn is_small(&self, bounds: &Bounds) -> bool {
        bounds.area() < self.small_threshold
    }

    pub fn focus_for(&self, bounds: &Bounds) -> Focus {
        if self.is_small(bounds) {
            Focus::Point {
                center: bounds.center(),
                zoom: self.small_zoom,
            }
        } else {
            Focus::Bounds {
                bounds: *bounds,
                padding: self.padding,
            }
        }
    }
}

/// The display contract shared by every kind of region.
pub trait MapRegion: BilingualName {
    fn kind(&self) -> RegionKind;

    /// Bounding box; a degenerate box at the centroid when no polygon exists.
    fn bounds(&self) -> Bounds;

    fn centroid(&self) -> LatLng {
        self.bounds().center()
    }

    fn focus(&self, policy: &ZoomPolicy) -> Focus;
}

impl MapRegion for ManualRegionEntry {
    fn kind(&self) -> RegionKind {
        self.kind
    }

    fn bounds(&self) -> Bounds {
        Bounds::from_point(self.center)
    }

    fn focus(&self, _policy: &ZoomPolicy) -> Focus {
        Focus::Point {
            center: self.center,
            zoom: f64::from(self.zoom),
        }
    }
}

impl MapRegion for Region {
    fn kind(&self) -> RegionKind {
        self.kind
    }

    fn bounds(&self) -> Bounds {
        match &self.source {
            RegionSource::Boundary { bounds, .. } => *bounds,
            RegionSource::Manual { center, .. } => Bounds::from_point(*center),
        }
    }

    fn focus(&self, policy: &ZoomPolicy) -> Focus {
        match &self.source {
            RegionSource::Boundary { bounds, .. } => policy.focus_for(bounds),
            RegionSource::Manual { entry, .. } => entry.focus(policy),
        }
    }
}

// -----------------------------------------------------------------------------
// LAYER
// -----------------------------------------------------------------------------

/// Every region known to the page, manual entries first.
#[derive(Debug, Clone, Default)]
pub struct RegionLayer {
    regions: Vec<Region>,
    by_name: HashMap<String, RegionId>,
    boundaries_loaded: bool,
}

impl RegionLayer {
    /// A layer holding only the manual registry.
    pub fn with_manual_regions() -> Self {
        let mut layer = Self::default();
        for entry in manual::entries() {
            let id = layer.next_id();
            layer.insert(Region::from_manual(id, entry));
        }
        layer
    }

    pub fn next_id(&self) -> RegionId {
        RegionId(self.regions.len())
    }

    /// Adds a region. The first region registered under a name keeps the
    /// name; later duplicates stay reachable by id and pointer only.
    pub fn insert(&mut self, region: Region) -> RegionId {
        let id = self.next_id();
        let mut region = region;
        region.id = id;
        self.by_name.entry(region.name.clone()).or_insert(id);
        self.regions.push(region);
        id
    }

    pub fn mark_boundaries_loaded(&mut self) {
        self.boundaries_loaded = true;
    }

    pub fn boundaries_loaded(&self) -> bool {
        self.boundaries_loaded
    }

    pub fn get(&self, id: RegionId) -> Option<&Region> {
        self.regions.get(id.0)
    }

    pub fn get_mut(&mut self, id: RegionId) -> Option<&mut Region> {
        self.regions.get_mut(id.0)
    }

    /// Exact canonical-name lookup.
    pub fn find_by_name(&self, name: &str) -> Option<RegionId> {
        self.by_name.get(name).copied()
    }

    /// First boundary region whose bounding box contains `p`.
    ///
    /// Box containment, not polygon containment: a point near a corner can
    /// land in a neighbour.
    pub fn boundary_at(&self, p: LatLng) -> Option<RegionId> {
        self.boundary_regions()
            .find(|r| r.bounds().contains(p))
            .map(|r| r.id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter()
    }

    pub fn boundary_regions(&self) -> impl Iterator<Item = &Region> {
        self.regions.iter().filter(|r| r.is_boundary())
    }

    pub fn boundary_regions_mut(&mut self) -> impl Iterator<Item = &mut Region> {
        self.regions.iter_mut().filter(|r| r.is_boundary())
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Regions currently painted as selected.
    pub fn selected_count(&self) -> usize {
        self.regions
            .iter()
            .filter(|r| r.style == StyleState::Selected)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(lat: f64, lng: f64, size: f64) -> Geometry {
        Geometry::Polygon(vec![vec![
            LatLng::new(lat, lng),
            LatLng::new(lat, lng + size),
            LatLng::new(lat + size, lng + size),
            LatLng::new(lat + size, lng),
            LatLng::new(lat, lng),
        ]])
    }

    fn boundary(name: &str, geometry: Geometry) -> Region {
        let bounds = geometry.bounds().unwrap();
        Region::from_boundary(RegionId(0), 0, name, geometry, bounds)
    }

    #[test]
    fn multipolygon_bounds_cover_every_part() {
        let g = Geometry::MultiPolygon(vec![
            vec![vec![LatLng::new(0.0, 0.0), LatLng::new(1.0, 1.0)]],
            vec![vec![LatLng::new(-5.0, 10.0), LatLng::new(-4.0, 11.0)]],
        ]);
        let b = g.bounds().unwrap();
        assert_eq!(b.south_west, LatLng::new(-5.0, 0.0));
        assert_eq!(b.north_east, LatLng::new(1.0, 11.0));
        assert_eq!(g.polygon_count(), 2);
    }

    #[test]
    fn threshold_is_strict() {
        let policy = ZoomPolicy::default();
        // exactly at the threshold: fit bounds
        let at = Bounds::new(LatLng::new(0.0, 0.0), LatLng::new(1.0, 0.5));
        assert!(matches!(policy.focus_for(&at), Focus::Bounds { .. }));
        // just below: centroid at the fixed zoom
        let below = Bounds::new(LatLng::new(0.0, 0.0), LatLng::new(0.7, 0.7));
        assert!((below.area() - 0.49).abs() < 1e-9);
        match policy.focus_for(&below) {
            Focus::Point { center, zoom } => {
                assert_eq!(center, LatLng::new(0.35, 0.35));
                assert_eq!(zoom, 10.0);
            }
            other => panic!("expected point focus, got {other:?}"),
        }
    }

    #[test]
    fn boundary_regions_pick_up_name_tables() {
        let r = boundary("France", square(42.0, -5.0, 9.0));
        assert_eq!(r.localized.as_deref(), Some("法国"));
        assert_eq!(r.bilingual_label(), "法国 (France)");
        let r = boundary("Greenland", square(60.0, -70.0, 20.0));
        assert_eq!(r.kind, RegionKind::Territory);
        let r = boundary("Nowhere", square(0.0, 0.0, 1.0));
        assert_eq!(r.localized, None);
        assert_eq!(r.kind, RegionKind::Country);
    }

    #[test]
    fn manual_regions_focus_on_their_centroid() {
        let layer = RegionLayer::with_manual_regions();
        let id = layer.find_by_name("Singapore").unwrap();
        let sg = layer.get(id).unwrap();
        assert!(!sg.is_boundary());
        assert_eq!(
            sg.focus(&ZoomPolicy::default()),
            Focus::Point {
                center: LatLng::new(1.3521, 103.8198),
                zoom: 11.0
            }
        );
        assert!(!layer.boundaries_loaded());
    }

    #[test]
    fn first_name_wins_and_point_lookup_uses_boxes() {
        let mut layer = RegionLayer::default();
        let a = layer.insert(boundary("A", square(0.0, 0.0, 10.0)));
        let _dup = layer.insert(boundary("A", square(50.0, 50.0, 1.0)));
        let b = layer.insert(boundary("B", square(5.0, 5.0, 10.0)));
        assert_eq!(layer.find_by_name("A"), Some(a));
        // inside both boxes: first match wins
        assert_eq!(layer.boundary_at(LatLng::new(7.0, 7.0)), Some(a));
        assert_eq!(layer.boundary_at(LatLng::new(14.0, 14.0)), Some(b));
        assert_eq!(layer.boundary_at(LatLng::new(-1.0, -1.0)), None);
    }
}
