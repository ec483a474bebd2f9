// crates/worldmap-core/src/manual.rs

//! # Manual-Region Registry
//!
//! Countries and territories whose polygons are missing from the boundary
//! data. Each entry carries just enough to frame it on the map: a centroid
//! and a zoom level that shows the whole territory.

use crate::geo::LatLng;
use crate::region::RegionKind::{self, Country as C, Territory as T};
use crate::text::BilingualName;
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

/// A static, read-only registry row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ManualRegionEntry {
    pub name: &'static str,
    pub localized: &'static str,
    pub center: LatLng,
    pub zoom: u8,
    pub kind: RegionKind,
}

impl BilingualName for ManualRegionEntry {
    fn english_name(&self) -> &str {
        self.name
    }
    fn localized_name(&self) -> Option<&str> {
        Some(self.localized)
    }
}

const fn entry(
    name: &'static str,
    localized: &'static str,
    lat: f64,
    lng: f64,
    zoom: u8,
    kind: RegionKind,
) -> ManualRegionEntry {
    ManualRegionEntry {
        name,
        localized,
        center: LatLng::new(lat, lng),
        zoom,
        kind,
    }
}

pub static MANUAL_REGIONS: &[ManualRegionEntry] = &[
    // Asia
    entry("Singapore", "新加坡", 1.3521, 103.8198, 11, C),
    entry("Brunei", "文莱", 4.5353, 114.7277, 9, C),
    entry("Bahrain", "巴林", 26.0667, 50.5577, 10, C),
    entry("Qatar", "卡塔尔", 25.3548, 51.1839, 9, C),
    entry("Kuwait", "科威特", 29.3117, 47.4818, 9, C),
    entry("Maldives", "马尔代夫", 3.2028, 73.2207, 8, C),
    entry("East Timor", "东帝汶", -8.8742, 125.7275, 9, C),
    entry("Palestine", "巴勒斯坦", 31.9522, 35.2332, 9, T),
    // Europe
    entry("Monaco", "摩纳哥", 43.7384, 7.4246, 13, C),
    entry("Vatican", "梵蒂冈", 41.9029, 12.4534, 15, T),
    entry("San Marino", "圣马力诺", 43.9424, 12.4578, 12, C),
    entry("Malta", "马耳他", 35.9375, 14.3754, 10, C),
    entry("Liechtenstein", "列支敦士登", 47.1660, 9.5554, 10, C),
    entry("Andorra", "安道尔", 42.5063, 1.5218, 11, C),
    entry("Cyprus", "塞浦路斯", 35.1264, 33.4299, 9, C),
    entry("Luxembourg", "卢森堡", 49.8153, 6.1296, 9, C),
    // Africa
    entry("Comoros", "科摩罗", -11.6455, 43.3333, 9, C),
    entry("Mauritius", "毛里求斯", -20.3484, 57.5522, 9, C),
    entry("Seychelles", "塞舌尔", -4.6796, 55.4920, 9, C),
    entry("Sao Tome and Principe", "圣多美和普林西比", 0.3365, 6.6271, 9, C),
    entry("Cabo Verde", "佛得角", 16.5388, -23.0418, 8, C),
    // Caribbean
    entry("Antigua and Barbuda", "安提瓜和巴布达", 17.0608, -61.7964, 10, C),
    entry("Barbados", "巴巴多斯", 13.1939, -59.5432, 10, C),
    entry("Dominica", "多米尼克", 15.4150, -61.3710, 10, C),
    entry("Grenada", "格林纳达", 12.1165, -61.6790, 10, C),
    entry("Saint Kitts and Nevis", "圣基茨和尼维斯", 17.3578, -62.7830, 10, C),
    entry("Saint Lucia", "圣卢西亚", 13.9094, -60.9789, 10, C),
    entry("Saint Vincent and the Grenadines", "圣文森特和格林纳丁斯", 12.9843, -61.2872, 10, C),
    entry("Trinidad and Tobago", "特立尼达和多巴哥", 10.6918, -61.2225, 9, C),
    // Pacific
    entry("Fiji", "斐济", -17.7134, 178.0650, 8, C),
    entry("Kiribati", "基里巴斯", -3.3704, -168.7340, 7, C),
    entry("Marshall Islands", "马绍尔群岛", 7.1315, 171.1845, 8, C),
    entry("Micronesia", "密克罗尼西亚", 7.4256, 150.5508, 8, C),
    entry("Nauru", "瑙鲁", -0.5228, 166.9315, 11, C),
    entry("Palau", "帕劳", 7.5150, 134.5825, 9, C),
    entry("Samoa", "萨摩亚", -13.7590, -172.1046, 9, C),
    entry("Solomon Islands", "所罗门群岛", -9.6457, 160.1562, 8, C),
    entry("Tonga", "汤加", -21.1790, -175.1982, 8, C),
    entry("Tuvalu", "图瓦卢", -7.1095, 177.6493, 9, C),
    entry("Vanuatu", "瓦努阿图", -15.3767, 166.9592, 8, C),
];

static BY_NAME: Lazy<HashMap<&'static str, &'static ManualRegionEntry>> =
    Lazy::new(|| MANUAL_REGIONS.iter().map(|e| (e.name, e)).collect());

/// Exact canonical-name lookup. No fuzzy matching at this layer.
pub fn lookup(name: &str) -> Option<&'static ManualRegionEntry> {
    BY_NAME.get(name).copied()
}

pub fn entries() -> &'static [ManualRegionEntry] {
    MANUAL_REGIONS
}

/// The first `n` localized names, used to hint at what can be searched
/// before boundary data has arrived.
pub fn sample_localized(n: usize) -> Vec<&'static str> {
    MANUAL_REGIONS.iter().take(n).map(|e| e.localized).collect()
}
