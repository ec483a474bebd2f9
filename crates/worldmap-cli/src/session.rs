// crates/worldmap-cli/src/session.rs
//
// Plays the browser's part for a MapApp: performs the network effects,
// feeds the outcomes back as events and prints what a page would show.

use worldmap_core::error::MapError;
use worldmap_core::prelude::*;

pub struct Session {
    pub app: MapApp,
    pub offline: bool,
    pub json: bool,
}

impl Session {
    pub fn new(app: MapApp, offline: bool, json: bool) -> Self {
        Self { app, offline, json }
    }

    /// Runs the startup effects, including the boundary download.
    pub fn start(&mut self) -> anyhow::Result<Vec<Effect>> {
        let fx = self.app.take_effects();
        self.run(fx)
    }

    /// Dispatches `event` and drives every effect it causes to completion.
    pub fn send(&mut self, event: AppEvent) -> anyhow::Result<Vec<Effect>> {
        let fx = self.app.dispatch(event);
        self.run(fx)
    }

    /// Selects by canonical name, as a search pick would. A miss shows up
    /// as a status line.
    pub fn select(&mut self, name: &str) -> anyhow::Result<Vec<Effect>> {
        if let Err(e) = self.app.select_by_name(name) {
            log::warn!("{e}");
        }
        let fx = self.app.take_effects();
        self.run(fx)
    }

    /// Prints and performs `fx` in order. Returns every effect handled,
    /// follow-ups included.
    fn run(&mut self, fx: Vec<Effect>) -> anyhow::Result<Vec<Effect>> {
        let mut handled = Vec::new();
        let mut queue = std::collections::VecDeque::from(fx);
        while let Some(effect) = queue.pop_front() {
            if self.json {
                println!("{}", serde_json::to_string(&effect)?);
            } else {
                print_effect(&effect);
            }
            let follow_up = match &effect {
                Effect::FetchBoundaries { url } => Some(self.fetch_boundaries(url)),
                Effect::Search(SearchEffect::Geocode { ticket, url }) => {
                    Some(self.geocode(*ticket, url))
                }
                _ => None,
            };
            handled.push(effect);
            if let Some(event) = follow_up {
                queue.extend(self.app.dispatch(event));
            }
        }
        Ok(handled)
    }

    fn fetch_boundaries(&self, url: &str) -> AppEvent {
        match self.guard(url).and_then(|_| http::boundaries(url)) {
            Ok(body) => AppEvent::BoundariesLoaded { body },
            Err(e) => AppEvent::BoundariesFailed {
                reason: e.to_string(),
            },
        }
    }

    fn geocode(&self, ticket: Ticket, url: &str) -> AppEvent {
        let settings = &self.app.search().settings().geocoder;
        match self.guard(url).and_then(|_| http::geocode(settings, url)) {
            Ok(body) => AppEvent::GeocodeResponse { ticket, body },
            Err(MapError::Timeout(_)) => AppEvent::SearchTimeout { ticket },
            Err(e) => AppEvent::GeocodeFailed {
                ticket,
                reason: e.to_string(),
            },
        }
    }

    fn guard(&self, url: &str) -> worldmap_core::Result<()> {
        if self.offline {
            return Err(MapError::Network("offline".into()));
        }
        log::info!("GET {url}");
        Ok(())
    }
}

#[cfg(feature = "http")]
mod http {
    use worldmap_core::search::geocode::{self, GeocoderSettings};
    use worldmap_core::Result;

    pub fn boundaries(url: &str) -> Result<String> {
        worldmap_core::loader::fetch(url)
    }

    pub fn geocode(settings: &GeocoderSettings, url: &str) -> Result<String> {
        geocode::fetch(settings, url)
    }
}

#[cfg(not(feature = "http"))]
mod http {
    use worldmap_core::error::MapError;
    use worldmap_core::search::geocode::GeocoderSettings;
    use worldmap_core::Result;

    pub fn boundaries(_url: &str) -> Result<String> {
        Err(MapError::Network("built without http".into()))
    }

    pub fn geocode(_settings: &GeocoderSettings, _url: &str) -> Result<String> {
        Err(MapError::Network("built without http".into()))
    }
}

fn print_effect(effect: &Effect) {
    match effect {
        Effect::Status(text) => println!("Current: {text}"),
        Effect::Map(MapCommand::SetView { center, zoom, .. }) => {
            println!("View: {:.4}, {:.4} @ zoom {zoom}", center.lat, center.lng)
        }
        Effect::Map(MapCommand::FitBounds {
            bounds, padding, ..
        }) => println!(
            "Fit: [{:.2}, {:.2}] .. [{:.2}, {:.2}] padding {:?}",
            bounds.south_west.lat,
            bounds.south_west.lng,
            bounds.north_east.lat,
            bounds.north_east.lng,
            padding
        ),
        Effect::Map(MapCommand::PlaceSearchMarker { at, popup }) => {
            println!("Marker: {popup} ({:.4}, {:.4})", at.lat, at.lng)
        }
        Effect::Map(MapCommand::ShowBanner { text, .. })
        | Effect::Map(MapCommand::UpdateBanner { text, .. }) => println!("Banner: {text}"),
        Effect::Search(SearchEffect::ShowSearching { text }) => println!("{text}"),
        Effect::Search(SearchEffect::ShowResults { items }) => {
            for (i, row) in items.iter().enumerate() {
                match &row.detail {
                    Some(detail) => println!("  [{i}] {}  ({detail})", row.label),
                    None => println!("  [{i}] {}", row.label),
                }
            }
        }
        Effect::Search(SearchEffect::ShowMessage { text, .. }) => println!("{text}"),
        _ => log::trace!("{effect:?}"),
    }
}
