//! worldmap-wasm: WebAssembly bindings for worldmap-core
//!
//! The page keeps the map library (tiles, polygons, markers, tooltips) and
//! the network. This crate keeps every decision: the page forwards events to
//! a [`WorldMap`] and applies the effect list it gets back, in order.
//!
//! What it provides
//! ----------------
//! - Panic hook and console logger installed on module load (via
//!   `#[wasm_bindgen(start)]`); core `log` records land in the browser console
//! - `new WorldMap(containerId, configJson?)` checks the page anchors and
//!   queues the startup effects
//! - `takeEffects()`, `dispatch(event)`, `boundariesLoaded(text)`,
//!   `boundariesFailed(reason)`, `stats()`
//! - Stateless helpers: `bilingual_name("France")`, `search_countries("岛")`
//!
//! Quick start (browser)
//! ---------------------
//! ```javascript
//! import init, { WorldMap } from 'worldmap-wasm';
//!
//! await init();
//! const map = new WorldMap('map');
//! apply(map.takeEffects());           // createMap, tile layer, markers, fetchBoundaries
//!
//! const res = await fetch(map.boundaryUrl());
//! apply(res.ok ? map.boundariesLoaded(await res.text())
//!              : map.boundariesFailed(`HTTP ${res.status}`));
//!
//! searchInput.addEventListener('keydown', (e) =>
//!   apply(map.dispatch({ type: 'searchKey', key: e.key, input: searchInput.value })));
//! ```
//!
//! Notes
//! -----
//! - Effects are plain objects tagged `{ target: "map" | "search", effect: {...} }`,
//!   `{ target: "status", effect: "..." }` or `{ target: "fetchBoundaries", ... }`.
//! - Geocoder requests come out as `geocode` effects carrying a ticket; answer
//!   them with `geocodeResponse` / `geocodeFailed` / `searchTimeout` events
//!   quoting the same ticket. Stale tickets are ignored.
use serde::Serialize;
use serde_wasm_bindgen::Serializer;
use wasm_bindgen::prelude::*;

use worldmap_core::names;
use worldmap_core::prelude::*;
use worldmap_core::region::RegionLayer;
use worldmap_core::search::{search_local, ResultRow};
use worldmap_core::text::Query;
use std::result::Result;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    console::init(log::LevelFilter::Info);
    web_sys::console::log_1(&"Initializing worldmap WASM module...".into());
}

/* --------------------------------------------------------------------------
   Console logging
-------------------------------------------------------------------------- */

/// `log` records from the core, routed to the browser console.
pub mod console {
    use log::{Level, LevelFilter, Log, Metadata, Record};

    struct ConsoleLogger;

    static LOGGER: ConsoleLogger = ConsoleLogger;

    impl Log for ConsoleLogger {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= log::max_level()
        }

        fn log(&self, record: &Record) {
            if !self.enabled(record.metadata()) {
                return;
            }
            let line = format!("[{}] {}", record.target(), record.args());
            write(record.level(), &line);
        }

        fn flush(&self) {}
    }

    #[cfg(target_arch = "wasm32")]
    fn write(level: Level, line: &str) {
        let line = wasm_bindgen::JsValue::from_str(line);
        match level {
            Level::Error => web_sys::console::error_1(&line),
            Level::Warn => web_sys::console::warn_1(&line),
            Level::Info => web_sys::console::info_1(&line),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&line),
        }
    }

    // Native test builds have no console object.
    #[cfg(not(target_arch = "wasm32"))]
    fn write(level: Level, line: &str) {
        eprintln!("{level} {line}");
    }

    /// Installs the console logger. Later calls only change the level.
    pub fn init(level: LevelFilter) {
        if log::set_logger(&LOGGER).is_ok() {
            log::debug!("console logger installed");
        }
        log::set_max_level(level);
    }
}

fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    value
        .serialize(&Serializer::json_compatible())
        .map_err(JsValue::from)
}

fn js_err(e: MapError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// `true` when the current document has an element with this id.
#[cfg(target_arch = "wasm32")]
fn dom_has(id: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(id))
        .is_some()
}

// Native test builds have no document; every anchor counts as present.
#[cfg(not(target_arch = "wasm32"))]
fn dom_has(_id: &str) -> bool {
    true
}

/* --------------------------------------------------------------------------
   Page state
-------------------------------------------------------------------------- */

#[wasm_bindgen]
pub struct WorldMap {
    app: MapApp,
}

#[wasm_bindgen]
impl WorldMap {
    /// Fails when `container_id` is not in the document or `config_json` is
    /// not a JSON object. A missing search box only disables search.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, config_json: Option<String>) -> Result<WorldMap, JsValue> {
        let config = match config_json {
            Some(json) => Config::from_json_str(&json).map_err(js_err)?,
            None => Config::default(),
        };
        let probe = |id: &str| dom_has(id);
        let app = MapApp::new(config, container_id, &probe).map_err(js_err)?;
        log::info!("worldmap attached to #{container_id}");
        Ok(WorldMap { app })
    }

    /// Startup effects not yet applied.
    #[wasm_bindgen(js_name = takeEffects)]
    pub fn take_effects(&mut self) -> Result<JsValue, JsValue> {
        to_js(&self.app.take_effects())
    }

    #[wasm_bindgen(js_name = boundaryUrl)]
    pub fn boundary_url(&self) -> String {
        self.app.boundary_url().to_string()
    }

    #[wasm_bindgen(js_name = boundariesLoaded)]
    pub fn boundaries_loaded(&mut self, geojson: String) -> Result<JsValue, JsValue> {
        to_js(&self.app.dispatch(AppEvent::BoundariesLoaded { body: geojson }))
    }

    #[wasm_bindgen(js_name = boundariesFailed)]
    pub fn boundaries_failed(&mut self, reason: String) -> Result<JsValue, JsValue> {
        to_js(&self.app.dispatch(AppEvent::BoundariesFailed { reason }))
    }

    /// Any `AppEvent` as a plain object, e.g. `{ type: "click", region: 3 }`.
    pub fn dispatch(&mut self, event: JsValue) -> Result<JsValue, JsValue> {
        let event: AppEvent = serde_wasm_bindgen::from_value(event)?;
        to_js(&self.app.dispatch(event))
    }

    pub fn stats(&self) -> Result<JsValue, JsValue> {
        to_js(&self.app.stats())
    }
}

/* --------------------------------------------------------------------------
   Stateless helpers
-------------------------------------------------------------------------- */

/// `"法国 (France)"` for `"France"`; unknown names come back unchanged.
#[wasm_bindgen]
pub fn bilingual_name(english: &str) -> String {
    names::bilingual_name(english)
}

/// Country and manual-region matches for a query, as result rows.
#[wasm_bindgen]
pub fn search_countries(query: &str) -> Result<JsValue, JsValue> {
    let layer = RegionLayer::with_manual_regions();
    let rows: Vec<ResultRow> = search_local(&Query::new(query), &layer, 8)
        .iter()
        .map(ResultRow::from)
        .collect();
    to_js(&rows)
}
