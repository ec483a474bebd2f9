// crates/worldmap-core/src/style.rs
use crate::config::Config;
use serde::{Deserialize, Serialize};

/// A partial path style. Unset fields leave the current value untouched,
/// matching how the map library merges `setStyle` patches.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub border_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl PathStyle {
    fn full(fill: &str, border: &str, fill_opacity: f64, weight: f64) -> Self {
        Self {
            fill_color: Some(fill.into()),
            border_color: Some(border.into()),
            fill_opacity: Some(fill_opacity),
            weight: Some(weight),
        }
    }

    /// Reads `<path>.fillColor` etc., falling back field by field.
    fn from_config(cfg: &Config, path: &str, fallback: PathStyle) -> Self {
        let read: PathStyle = cfg.get_or(path, PathStyle::default());
        Self {
            fill_color: read.fill_color.or(fallback.fill_color),
            border_color: read.border_color.or(fallback.border_color),
            fill_opacity: read.fill_opacity.or(fallback.fill_opacity),
            weight: read.weight.or(fallback.weight),
        }
    }
}

/// The six styles a region or its marker can be painted with.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Palette {
    pub country_default: PathStyle,
    pub country_hover: PathStyle,
    pub country_selected: PathStyle,
    pub marker_default: PathStyle,
    pub marker_hover: PathStyle,
    pub marker_selected: PathStyle,
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_config(&Config::empty())
    }
}

impl Palette {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            country_default: PathStyle::from_config(
                cfg,
                "colors.country.default",
                PathStyle::full("#95a5a6", "white", 0.7, 1.0),
            ),
            country_hover: PathStyle::from_config(
                cfg,
                "colors.country.hover",
                PathStyle {
                    border_color: Some("#3498db".into()),
                    fill_opacity: Some(0.9),
                    weight: Some(2.0),
                    ..PathStyle::default()
                },
            ),
            country_selected: PathStyle::from_config(
                cfg,
                "colors.country.selected",
                PathStyle::full("#e74c3c", "#c0392b", 0.9, 2.0),
            ),
            marker_default: PathStyle::from_config(
                cfg,
                "colors.marker.default",
                PathStyle::full("#3498db", "#2980b9", 0.3, 2.0),
            ),
            marker_hover: PathStyle::from_config(
                cfg,
                "colors.marker.hover",
                PathStyle {
                    fill_color: Some("#e74c3c".into()),
                    fill_opacity: Some(0.6),
                    weight: Some(3.0),
                    ..PathStyle::default()
                },
            ),
            marker_selected: PathStyle::from_config(
                cfg,
                "colors.marker.selected",
                PathStyle::full("#e74c3c", "#c0392b", 0.7, 3.0),
            ),
        }
    }
}
