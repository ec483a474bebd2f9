// crates/worldmap-core/src/geo.rs
use serde::{Deserialize, Serialize};

/// A WGS84 coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<[f64; 2]> for LatLng {
    /// `[lat, lng]`, the order the map library and the configuration use.
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}

/// An axis-aligned bounding box in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl Bounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self {
            south_west,
            north_east,
        }
    }

    /// A degenerate box around a single point.
    pub fn from_point(p: LatLng) -> Self {
        Self::new(p, p)
    }

    /// The smallest box containing every point, `None` for an empty input.
    pub fn from_points<I: IntoIterator<Item = LatLng>>(points: I) -> Option<Self> {
        let mut it = points.into_iter();
        let first = it.next()?;
        let mut b = Self::from_point(first);
        for p in it {
            b.extend(p);
        }
        Some(b)
    }

    pub fn extend(&mut self, p: LatLng) {
        self.south_west.lat = self.south_west.lat.min(p.lat);
        self.south_west.lng = self.south_west.lng.min(p.lng);
        self.north_east.lat = self.north_east.lat.max(p.lat);
        self.north_east.lng = self.north_east.lng.max(p.lng);
    }

    pub fn union(&self, other: &Bounds) -> Bounds {
        let mut b = *self;
        b.extend(other.south_west);
        b.extend(other.north_east);
        b
    }

    /// Longitude span in degrees.
    pub fn width(&self) -> f64 {
        (self.north_east.lng - self.south_west.lng).abs()
    }

    /// Latitude span in degrees.
    pub fn height(&self) -> f64 {
        (self.north_east.lat - self.south_west.lat).abs()
    }

    /// `width × height` in square degrees. Not a geodesic area; only used to
    /// rank regions as small or normal.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    pub fn center(&self) -> LatLng {
        LatLng::new(
            (self.south_west.lat + self.north_east.lat) / 2.0,
            (self.south_west.lng + self.north_east.lng) / 2.0,
        )
    }

    /// Inclusive containment test on the box, not on the polygon inside it.
    pub fn contains(&self, p: LatLng) -> bool {
        p.lat >= self.south_west.lat
            && p.lat <= self.north_east.lat
            && p.lng >= self.south_west.lng
            && p.lng <= self.north_east.lng
    }
}
