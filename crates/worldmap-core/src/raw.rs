// crates/worldmap-core/src/raw.rs

//! Wire structures exactly as the two external sources send them.
//!
//! Nothing here is exposed from the public API; loaders convert these into
//! [`crate::region::Region`] and [`crate::search::SearchResultItem`].

use crate::error::{MapError, Result};
use crate::geo::LatLng;
use crate::region::Geometry;
use serde::Deserialize;
use serde_json::Value;

/// GeoJSON FeatureCollection as served by the boundary source.
#[derive(Debug, Deserialize)]
pub struct FeatureCollectionRaw {
    #[serde(default)]
    pub features: Vec<FeatureRaw>,
}

#[derive(Debug, Deserialize)]
pub struct FeatureRaw {
    #[serde(default)]
    pub properties: Option<PropertiesRaw>,
    #[serde(default)]
    pub geometry: Option<GeometryRaw>,
}

#[derive(Debug, Deserialize)]
pub struct PropertiesRaw {
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct GeometryRaw {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub coordinates: Value,
}

impl GeometryRaw {
    /// Converts GeoJSON `[lng, lat]` positions into [`Geometry`].
    ///
    /// Only polygonal types render as regions; anything else is rejected
    /// with [`MapError::InvalidData`].
    pub fn to_geometry(&self) -> Result<Geometry> {
        match self.kind.as_str() {
            "Polygon" => {
                let rings: Vec<Vec<Vec<f64>>> = serde_json::from_value(self.coordinates.clone())?;
                Ok(Geometry::Polygon(convert_rings(rings)?))
            }
            "MultiPolygon" => {
                let polys: Vec<Vec<Vec<Vec<f64>>>> =
                    serde_json::from_value(self.coordinates.clone())?;
                let polys = polys
                    .into_iter()
                    .map(convert_rings)
                    .collect::<Result<Vec<_>>>()?;
                Ok(Geometry::MultiPolygon(polys))
            }
            other => Err(MapError::InvalidData(format!(
                "unsupported geometry type {other}"
            ))),
        }
    }
}

fn convert_rings(rings: Vec<Vec<Vec<f64>>>) -> Result<Vec<Vec<LatLng>>> {
    rings
        .into_iter()
        .map(|ring| ring.into_iter().map(position).collect::<Result<Vec<_>>>())
        .collect()
}

fn position(p: Vec<f64>) -> Result<LatLng> {
    match p.as_slice() {
        [lng, lat, ..] => Ok(LatLng::new(*lat, *lng)),
        _ => Err(MapError::InvalidData(format!(
            "position needs two coordinates, got {}",
            p.len()
        ))),
    }
}

/// One geocoder hit. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
pub struct PlaceRaw {
    pub display_name: String,
    pub lat: String,
    pub lon: String,
    #[serde(default)]
    pub address: Option<AddressRaw>,
}

#[derive(Debug, Default, Deserialize)]
pub struct AddressRaw {
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub country_code: Option<String>,
}
