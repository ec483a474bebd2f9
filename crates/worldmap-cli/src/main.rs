//! worldmap: Command-line driver for worldmap-core
//!
//! Runs the same state machines the browser page runs, with the terminal
//! standing in for the map: the CLI performs the boundary download and the
//! geocoder requests itself and prints the commands a page would apply.
//!
//! Usage examples
//! --------------
//!
//! - Read a configuration value
//!   $ worldmap config ui.searchButtonText
//!   $ worldmap --set search.limit=3 config search
//!
//! - List the manual registry
//!   $ worldmap manual
//!
//! - Search, then activate the first result
//!   $ worldmap search 新加坡 --pick 0
//!   $ worldmap search Paris --pick 0
//!
//! - Select a region by its canonical name
//!   $ worldmap select France
//!
//! - List small regions and their proxy-marker radii
//!   $ worldmap small
//!
//! Network
//! -------
//!
//! Boundaries are fetched once from `geoJson.url` at startup. Pass
//! `--offline` to skip every request; only the manual registry and the
//! built-in name table are available then. Set `RUST_LOG=info` to see the
//! requests as they go out.
mod args;
mod session;

use crate::args::{CliArgs, Commands};
use crate::session::Session;
use anyhow::{anyhow, Context};
use clap::Parser;
use worldmap_core::manual;
use worldmap_core::overlay;
use worldmap_core::prelude::*;

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = CliArgs::parse();
    let config = load_config(args.config.as_deref(), &args.set)?;

    // Commands that never touch the map state.
    match &args.command {
        Commands::Config { path } => {
            let value = match path.as_deref() {
                None | Some("") => config.as_value(),
                Some(p) => config
                    .get(p)
                    .ok_or_else(|| anyhow!("no configuration value at {p}"))?,
            };
            println!("{}", serde_json::to_string_pretty(value)?);
            return Ok(());
        }
        Commands::Manual => {
            for entry in manual::entries() {
                println!(
                    "{:<28} {:<10} {:>9.4} {:>10.4}  zoom {:>2}  {:?}",
                    entry.name,
                    entry.localized,
                    entry.center.lat,
                    entry.center.lng,
                    entry.zoom,
                    entry.kind
                );
            }
            println!("{} entries", manual::entries().len());
            return Ok(());
        }
        _ => {}
    }

    let app = MapApp::new(config, "map", &headless())?;
    let mut session = Session::new(app, args.offline, args.json);
    session.start()?;

    match args.command {
        Commands::Search { query, pick } => {
            session.send(AppEvent::SearchSubmit { input: query })?;
            if let Some(index) = pick {
                if index >= session.app.search().results().len() {
                    eprintln!("No result at index {index}");
                } else {
                    session.send(AppEvent::SearchResultClicked { index })?;
                }
            }
        }
        Commands::Select { name } => {
            session.select(&name)?;
        }
        Commands::Small => {
            let small =
                overlay::small_regions(session.app.layer(), session.app.selection().policy());
            for r in &small {
                println!(
                    "{:<32} area {:>8.4}  radius {:>5.1}px",
                    r.label, r.area, r.radius
                );
            }
            println!("{} small regions", small.len());
        }
        Commands::Stats => {
            let stats = session.app.stats();
            println!("Boundary regions: {}", stats.boundary_regions);
            println!("Manual regions:   {}", stats.manual_regions);
            println!("Proxy markers:    {}", stats.proxy_markers);
            println!("Loaded:           {}", stats.boundaries_loaded);
        }
        Commands::Config { .. } | Commands::Manual => {}
    }

    if let Some(selected) = session.app.stats().selected {
        println!("Selected: {selected}");
    }
    Ok(())
}

/// Built-in defaults, then the `--config` file, then each `--set`.
fn load_config(file: Option<&str>, overrides: &[String]) -> anyhow::Result<Config> {
    let mut config = match file {
        Some(path) => Config::load_from_path(path)
            .with_context(|| format!("loading configuration from {path}"))?,
        None => Config::default(),
    };
    for pair in overrides {
        let (path, raw) = pair
            .split_once('=')
            .ok_or_else(|| anyhow!("--set expects PATH=JSON, got {pair:?}"))?;
        // Bare words are taken as strings.
        let value = serde_json::from_str(raw)
            .unwrap_or_else(|_| serde_json::Value::String(raw.to_string()));
        config.set(path.trim(), value);
    }
    Ok(config)
}
