// crates/worldmap-core/src/selection.rs

//! # Region Selection Engine
//!
//! Holds the one selected region of the page. All three lookup variants
//! (direct id from a pointer event, canonical name from a search result,
//! geographic point from a city hit) converge on [`SelectionEngine::select`].
//!
//! Invariant: at most one region in the layer has
//! [`StyleState::Selected`], and it is the one `selected` points at.

use crate::config::Config;
use crate::effect::{Effects, MapCommand};
use crate::error::{MapError, Result};
use crate::geo::LatLng;
use crate::names;
use crate::region::{MapRegion, RegionId, RegionLayer, StyleState, ZoomPolicy};
use crate::style::Palette;
use crate::text::BilingualName;
use crate::viewport::Viewport;
use serde::{Deserialize, Serialize};

/// Whether a selection also moves the viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Framing {
    /// Frame the region per the zoom policy.
    Fit,
    /// Highlight only; the current view stays.
    Keep,
}

/// Which rendered handle of a region a pointer event hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerTarget {
    Boundary,
    Marker,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "region", rename_all = "lowercase")]
pub enum SelectOutcome {
    Selected(RegionId),
    /// Already selected; nothing was emitted.
    Unchanged(RegionId),
}

impl SelectOutcome {
    pub fn region(&self) -> RegionId {
        match *self {
            SelectOutcome::Selected(id) | SelectOutcome::Unchanged(id) => id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SelectionEngine {
    selected: Option<RegionId>,
    policy: ZoomPolicy,
    palette: Palette,
    not_found_text: String,
    loading_region_text: String,
}

impl SelectionEngine {
    pub fn new(policy: ZoomPolicy, palette: Palette) -> Self {
        Self {
            selected: None,
            policy,
            palette,
            not_found_text: "Not found: {name}".into(),
            loading_region_text: "Loading data... ({name})".into(),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        let mut engine = Self::new(ZoomPolicy::from_config(cfg), Palette::from_config(cfg));
        engine.not_found_text = cfg.text("ui.notFoundText", &engine.not_found_text);
        engine.loading_region_text = cfg.text("ui.loadingRegionText", &engine.loading_region_text);
        engine
    }

    pub fn selected(&self) -> Option<RegionId> {
        self.selected
    }

    pub fn policy(&self) -> &ZoomPolicy {
        &self.policy
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Makes `id` the selected region.
    ///
    /// 1. no-op when `id` is already selected;
    /// 2. the previous region and its marker go back to default;
    /// 3. `id` is painted selected and raised;
    /// 4. the viewport frames it (unless [`Framing::Keep`]);
    /// 5. the status line shows its bilingual label;
    /// 6. its marker, if any, follows.
    pub fn select(
        &mut self,
        layer: &mut RegionLayer,
        viewport: &mut Viewport,
        id: RegionId,
        framing: Framing,
        fx: &mut Effects,
    ) -> Result<SelectOutcome> {
        if self.selected == Some(id) {
            return Ok(SelectOutcome::Unchanged(id));
        }
        if layer.get(id).is_none() {
            return Err(MapError::NotFound(format!("region #{}", id.0)));
        }

        if let Some(prev) = self.selected.take() {
            self.paint(layer, prev, StyleState::Default, fx);
        }

        self.paint(layer, id, StyleState::Selected, fx);
        self.selected = Some(id);

        let Some(region) = layer.get(id) else {
            return Err(MapError::NotFound(format!("region #{}", id.0)));
        };
        if framing == Framing::Fit {
            viewport.frame(region.focus(&self.policy), fx);
        }
        fx.status(region.bilingual_label());
        log::debug!("selected {}", region.name);

        Ok(SelectOutcome::Selected(id))
    }

    /// Applies `state` to the region and its marker, emitting style commands
    /// for whichever handles are rendered.
    fn paint(&self, layer: &mut RegionLayer, id: RegionId, state: StyleState, fx: &mut Effects) {
        let Some(region) = layer.get_mut(id) else {
            return;
        };
        region.style = state;
        let raise = state == StyleState::Selected;

        if region.is_boundary() {
            let style = match state {
                StyleState::Selected => &self.palette.country_selected,
                StyleState::Hovered => &self.palette.country_hover,
                StyleState::Default => &self.palette.country_default,
            };
            fx.map(MapCommand::StyleRegion {
                region: id,
                style: style.clone(),
                bring_to_front: raise,
            });
        }

        if let Some(marker) = region.marker.as_mut() {
            marker.style = state;
            let style = match state {
                StyleState::Selected => &self.palette.marker_selected,
                StyleState::Hovered => &self.palette.marker_hover,
                StyleState::Default => &self.palette.marker_default,
            };
            fx.map(MapCommand::StyleMarker {
                region: id,
                style: style.clone(),
                bring_to_front: raise,
            });
        }
    }

    /// Selects by canonical English name.
    ///
    /// Unlike [`Self::select`], an already selected region is framed again
    /// when `framing` is [`Framing::Fit`]; its style is left alone.
    ///
    /// A miss is reported on the status line: "loading" while boundary data
    /// has not arrived yet, "not found" afterwards. `localized_hint` is used
    /// in those messages when given.
    pub fn select_by_name(
        &mut self,
        layer: &mut RegionLayer,
        viewport: &mut Viewport,
        english: &str,
        localized_hint: Option<&str>,
        framing: Framing,
        fx: &mut Effects,
    ) -> Result<SelectOutcome> {
        if let Some(id) = layer.find_by_name(english) {
            let outcome = self.select(layer, viewport, id, framing, fx)?;
            // Selected earlier without framing (e.g. by a city hit): frame it now.
            if let (SelectOutcome::Unchanged(_), Framing::Fit) = (outcome, framing) {
                if let Some(region) = layer.get(id) {
                    viewport.frame(region.focus(&self.policy), fx);
                    fx.status(region.bilingual_label());
                }
            }
            return Ok(outcome);
        }

        let shown = localized_hint
            .or_else(|| names::localized_of(english))
            .unwrap_or(english);
        if layer.boundaries_loaded() {
            log::warn!("not found: {english}");
            fx.status(self.not_found_text.replace("{name}", shown));
        } else {
            log::warn!("boundary data not loaded yet, cannot select {english}");
            fx.status(self.loading_region_text.replace("{name}", shown));
        }
        Err(MapError::NotFound(english.to_string()))
    }

    /// Highlights the region a geocoded place belongs to.
    ///
    /// The country name/code reported by the geocoder is tried first against
    /// the name tables; failing that, the first boundary whose bounding box
    /// contains `point` wins. Box containment can attribute a point near a
    /// corner to a neighbour. The viewport is left where it is.
    pub fn select_at_point(
        &mut self,
        layer: &mut RegionLayer,
        viewport: &mut Viewport,
        point: LatLng,
        country: Option<&str>,
        country_code: Option<&str>,
        fx: &mut Effects,
    ) -> Option<RegionId> {
        if !layer.boundaries_loaded() {
            log::debug!("point lookup skipped, boundaries not loaded");
            return None;
        }

        if let Some(row) = names::resolve_country(country, country_code) {
            return self
                .select_by_name(layer, viewport, row.english, Some(row.localized), Framing::Keep, fx)
                .ok()
                .map(|o| o.region());
        }

        let id = layer.boundary_at(point)?;
        self.select(layer, viewport, id, Framing::Keep, fx)
            .ok()
            .map(|o| o.region())
    }

    /// Hover preview: highlight unless selected, tooltip, pointer cursor.
    pub fn pointer_enter(
        &mut self,
        layer: &mut RegionLayer,
        id: RegionId,
        target: PointerTarget,
        fx: &mut Effects,
    ) {
        let is_selected = self.selected == Some(id);
        let Some(region) = layer.get_mut(id) else {
            return;
        };

        if !is_selected {
            match target {
                PointerTarget::Boundary if region.is_boundary() => {
                    region.style = StyleState::Hovered;
                    fx.map(MapCommand::StyleRegion {
                        region: id,
                        style: self.palette.country_hover.clone(),
                        bring_to_front: true,
                    });
                }
                PointerTarget::Marker => {
                    if let Some(marker) = region.marker.as_mut() {
                        marker.style = StyleState::Hovered;
                        fx.map(MapCommand::StyleMarker {
                            region: id,
                            style: self.palette.marker_hover.clone(),
                            bring_to_front: false,
                        });
                    }
                }
                PointerTarget::Boundary => {}
            }
        }

        fx.map(MapCommand::ShowTooltip {
            region: id,
            text: region.bilingual_label(),
        });
        fx.map(MapCommand::SetPointerCursor { pointer: true });
    }

    pub fn pointer_leave(
        &mut self,
        layer: &mut RegionLayer,
        id: RegionId,
        target: PointerTarget,
        fx: &mut Effects,
    ) {
        let is_selected = self.selected == Some(id);
        let Some(region) = layer.get_mut(id) else {
            return;
        };

        if !is_selected {
            match target {
                PointerTarget::Boundary if region.is_boundary() => {
                    region.style = StyleState::Default;
                    fx.map(MapCommand::StyleRegion {
                        region: id,
                        style: self.palette.country_default.clone(),
                        bring_to_front: false,
                    });
                }
                PointerTarget::Marker => {
                    if let Some(marker) = region.marker.as_mut() {
                        marker.style = StyleState::Default;
                        fx.map(MapCommand::StyleMarker {
                            region: id,
                            style: self.palette.marker_default.clone(),
                            bring_to_front: false,
                        });
                    }
                }
                PointerTarget::Boundary => {}
            }
        }

        fx.map(MapCommand::HideTooltip { region: id });
        fx.map(MapCommand::SetPointerCursor { pointer: false });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::Effect;
    use crate::geo::Bounds;
    use crate::region::{Geometry, ProxyMarker, Region};
    use crate::viewport::headless;

    fn rect(name: &str, s: f64, w: f64, n: f64, e: f64) -> Region {
        let g = Geometry::Polygon(vec![vec![LatLng::new(s, w), LatLng::new(n, e)]]);
        let b = g.bounds().unwrap();
        Region::from_boundary(RegionId(0), 0, name, g, b)
    }

    struct Fixture {
        layer: RegionLayer,
        vp: Viewport,
        engine: SelectionEngine,
        fx: Effects,
    }

    fn fixture() -> Fixture {
        let cfg = Config::default();
        let mut fx = Effects::new();
        let vp = Viewport::initialize(&cfg, "map", &headless(), &mut fx).unwrap();
        fx.take();
        let mut layer = RegionLayer::with_manual_regions();
        layer.insert(rect("France", 42.0, -5.0, 51.0, 8.0));
        layer.insert(rect("Germany", 47.0, 6.0, 55.0, 15.0));
        let ad = layer.insert(rect("Andorra", 42.4, 1.4, 42.6, 1.8));
        if let Some(r) = layer.get_mut(ad) {
            r.marker = Some(ProxyMarker {
                center: LatLng::new(42.5, 1.6),
                radius: 3.0,
                style: StyleState::Default,
            });
        }
        layer.mark_boundaries_loaded();
        Fixture {
            layer,
            vp,
            engine: SelectionEngine::from_config(&cfg),
            fx,
        }
    }

    fn boundary_id(layer: &RegionLayer, name: &str) -> RegionId {
        layer
            .boundary_regions()
            .find(|r| r.name == name)
            .map(|r| r.id)
            .unwrap()
    }

    #[test]
    fn selecting_twice_is_a_no_op() {
        let mut f = fixture();
        let fr = boundary_id(&f.layer, "France");
        let first = f.engine.select(&mut f.layer, &mut f.vp, fr, Framing::Fit, &mut f.fx).unwrap();
        assert_eq!(first, SelectOutcome::Selected(fr));
        f.fx.take();
        let again = f.engine.select(&mut f.layer, &mut f.vp, fr, Framing::Fit, &mut f.fx).unwrap();
        assert_eq!(again, SelectOutcome::Unchanged(fr));
        assert!(f.fx.is_empty());
    }

    #[test]
    fn exactly_one_region_is_selected() {
        let mut f = fixture();
        let fr = boundary_id(&f.layer, "France");
        let de = boundary_id(&f.layer, "Germany");
        let sg = f.layer.find_by_name("Singapore").unwrap();
        for id in [fr, de, sg, fr, fr, de] {
            f.engine.select(&mut f.layer, &mut f.vp, id, Framing::Fit, &mut f.fx).unwrap();
            assert_eq!(f.layer.selected_count(), 1);
        }
        assert_eq!(f.engine.selected(), Some(de));
        assert_eq!(f.layer.get(fr).unwrap().style, StyleState::Default);
    }

    #[test]
    fn large_region_fits_bounds_and_updates_status() {
        let mut f = fixture();
        let fr = boundary_id(&f.layer, "France");
        f.engine.select(&mut f.layer, &mut f.vp, fr, Framing::Fit, &mut f.fx).unwrap();
        let fx = f.fx.take();
        assert!(fx.iter().any(|e| matches!(
            e,
            Effect::Map(MapCommand::FitBounds { padding: [30, 30], bounds, .. })
                if *bounds == Bounds::new(LatLng::new(42.0, -5.0), LatLng::new(51.0, 8.0))
        )));
        assert_eq!(fx.last(), Some(&Effect::Status("法国 (France)".into())));
    }

    #[test]
    fn marker_follows_its_region() {
        let mut f = fixture();
        let ad = boundary_id(&f.layer, "Andorra");
        let de = boundary_id(&f.layer, "Germany");
        f.engine.select(&mut f.layer, &mut f.vp, ad, Framing::Fit, &mut f.fx).unwrap();
        let fx = f.fx.take();
        assert!(fx.iter().any(|e| matches!(
            e,
            Effect::Map(MapCommand::SetView { zoom, .. }) if *zoom == 10.0
        )));
        assert!(fx.iter().any(|e| matches!(
            e,
            Effect::Map(MapCommand::StyleMarker { region, bring_to_front: true, .. }) if *region == ad
        )));
        assert_eq!(
            f.layer.get(ad).unwrap().marker.as_ref().unwrap().style,
            StyleState::Selected
        );

        f.engine.select(&mut f.layer, &mut f.vp, de, Framing::Fit, &mut f.fx).unwrap();
        assert_eq!(
            f.layer.get(ad).unwrap().marker.as_ref().unwrap().style,
            StyleState::Default
        );
    }

    #[test]
    fn manual_region_pans_to_its_zoom() {
        let mut f = fixture();
        f.engine
            .select_by_name(&mut f.layer, &mut f.vp, "Singapore", None, Framing::Fit, &mut f.fx)
            .unwrap();
        assert_eq!(f.vp.view().center, LatLng::new(1.3521, 103.8198));
        assert_eq!(f.vp.view().zoom, 11.0);
    }

    #[test]
    fn unknown_name_reports_not_found() {
        let mut f = fixture();
        let err = f
            .engine
            .select_by_name(&mut f.layer, &mut f.vp, "Atlantis", Some("亚特兰蒂斯"), Framing::Fit, &mut f.fx)
            .unwrap_err();
        assert!(matches!(err, MapError::NotFound(_)));
        assert_eq!(f.fx.take(), vec![Effect::Status("未找到: 亚特兰蒂斯".into())]);
        assert_eq!(f.engine.selected(), None);
    }

    #[test]
    fn name_before_load_reports_loading() {
        let cfg = Config::default();
        let mut fx = Effects::new();
        let mut vp = Viewport::initialize(&cfg, "map", &headless(), &mut fx).unwrap();
        fx.take();
        let mut layer = RegionLayer::with_manual_regions();
        let mut engine = SelectionEngine::from_config(&cfg);
        assert!(engine
            .select_by_name(&mut layer, &mut vp, "France", None, Framing::Fit, &mut fx)
            .is_err());
        assert_eq!(fx.take(), vec![Effect::Status("正在加载数据... (法国)".into())]);
    }

    #[test]
    fn point_lookup_prefers_country_code_then_boxes() {
        let mut f = fixture();
        // inside both France and Germany boxes; the code decides
        let p = LatLng::new(48.0, 7.0);
        let got = f.engine.select_at_point(&mut f.layer, &mut f.vp, p, None, Some("de"), &mut f.fx);
        assert_eq!(got, Some(boundary_id(&f.layer, "Germany")));
        // no usable name: first box in layer order
        let got = f.engine.select_at_point(&mut f.layer, &mut f.vp, p, Some("Gallia"), None, &mut f.fx);
        assert_eq!(got, Some(boundary_id(&f.layer, "France")));
        // the view was never moved
        assert!(!f.fx.take().iter().any(|e| matches!(
            e,
            Effect::Map(MapCommand::SetView { .. } | MapCommand::FitBounds { .. })
        )));
    }

    #[test]
    fn name_lookup_reframes_an_unframed_selection() {
        let mut f = fixture();
        let fr = boundary_id(&f.layer, "France");
        f.engine.select(&mut f.layer, &mut f.vp, fr, Framing::Keep, &mut f.fx).unwrap();
        f.fx.take();

        let got = f
            .engine
            .select_by_name(&mut f.layer, &mut f.vp, "France", None, Framing::Fit, &mut f.fx)
            .unwrap();
        assert_eq!(got, SelectOutcome::Unchanged(fr));
        let fx = f.fx.take();
        assert!(fx.iter().any(|e| matches!(e, Effect::Map(MapCommand::FitBounds { .. }))));
        assert!(!fx.iter().any(|e| matches!(e, Effect::Map(MapCommand::StyleRegion { .. }))));
        assert_eq!(fx.last(), Some(&Effect::Status("法国 (France)".into())));
        assert!(f.vp.view().fitted.is_some());
    }

    #[test]
    fn marker_hover_uses_marker_palette() {
        let mut f = fixture();
        let ad = boundary_id(&f.layer, "Andorra");
        let marker_style = |l: &RegionLayer| l.get(ad).unwrap().marker.as_ref().unwrap().style;

        f.engine.pointer_enter(&mut f.layer, ad, PointerTarget::Marker, &mut f.fx);
        assert_eq!(marker_style(&f.layer), StyleState::Hovered);
        // the boundary itself is untouched by a marker hover
        assert_eq!(f.layer.get(ad).unwrap().style, StyleState::Default);
        let hover = f.engine.palette().marker_hover.clone();
        assert_eq!(
            f.fx.take(),
            vec![
                Effect::Map(MapCommand::StyleMarker { region: ad, style: hover, bring_to_front: false }),
                Effect::Map(MapCommand::ShowTooltip { region: ad, text: "安道尔 (Andorra)".into() }),
                Effect::Map(MapCommand::SetPointerCursor { pointer: true }),
            ]
        );

        f.engine.pointer_leave(&mut f.layer, ad, PointerTarget::Marker, &mut f.fx);
        assert_eq!(marker_style(&f.layer), StyleState::Default);
        let default = f.engine.palette().marker_default.clone();
        assert!(f.fx.take().contains(&Effect::Map(MapCommand::StyleMarker {
            region: ad,
            style: default,
            bring_to_front: false
        })));

        f.engine.select(&mut f.layer, &mut f.vp, ad, Framing::Fit, &mut f.fx).unwrap();
        f.fx.take();
        f.engine.pointer_enter(&mut f.layer, ad, PointerTarget::Marker, &mut f.fx);
        f.engine.pointer_leave(&mut f.layer, ad, PointerTarget::Marker, &mut f.fx);
        assert_eq!(marker_style(&f.layer), StyleState::Selected);
        assert!(!f.fx.take().iter().any(|e| matches!(e, Effect::Map(MapCommand::StyleMarker { .. }))));
    }

    #[test]
    fn hover_skips_the_selected_region() {
        let mut f = fixture();
        let fr = boundary_id(&f.layer, "France");
        f.engine.pointer_enter(&mut f.layer, fr, PointerTarget::Boundary, &mut f.fx);
        assert_eq!(f.layer.get(fr).unwrap().style, StyleState::Hovered);
        f.engine.pointer_leave(&mut f.layer, fr, PointerTarget::Boundary, &mut f.fx);
        assert_eq!(f.layer.get(fr).unwrap().style, StyleState::Default);

        f.engine.select(&mut f.layer, &mut f.vp, fr, Framing::Fit, &mut f.fx).unwrap();
        f.fx.take();
        f.engine.pointer_enter(&mut f.layer, fr, PointerTarget::Boundary, &mut f.fx);
        assert_eq!(f.layer.get(fr).unwrap().style, StyleState::Selected);
        assert_eq!(
            f.fx.take(),
            vec![
                Effect::Map(MapCommand::ShowTooltip { region: fr, text: "法国 (France)".into() }),
                Effect::Map(MapCommand::SetPointerCursor { pointer: true }),
            ]
        );
    }
}
