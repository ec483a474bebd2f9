// crates/worldmap-core/src/search/local.rs

//! Country-name resolution without the network.

use super::SearchResultItem;
use crate::names;
use crate::region::RegionLayer;
use crate::text::{BilingualName, Query};
use std::collections::HashSet;

/// Matches `query` against the name tables, then against regions of the
/// layer the tables do not know.
///
/// English names match case-insensitively (accent-folded for Latin
/// queries), localized names by exact substring. Results are deduplicated by
/// canonical name and capped at `limit`; English hits come first, in table
/// order.
pub fn search_local(query: &Query, layer: &RegionLayer, limit: usize) -> Vec<SearchResultItem> {
    if query.is_empty() || limit == 0 {
        return Vec::new();
    }

    let mut seen: HashSet<&str> = HashSet::new();
    let mut out = Vec::new();

    for row in names::search(query) {
        if out.len() >= limit {
            return out;
        }
        if seen.insert(row.english) {
            out.push(SearchResultItem::country(row.english, Some(row.localized)));
        }
    }

    for region in layer.iter() {
        if out.len() >= limit {
            break;
        }
        if names::by_english(&region.name).is_some() || !region.matches_query(query) {
            continue;
        }
        if seen.insert(region.name.as_str()) {
            out.push(SearchResultItem::country(
                &region.name,
                region.localized.as_deref(),
            ));
        }
    }

    out
}
