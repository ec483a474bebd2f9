//! worldmap-cli
//! ============
//!
//! Command-line driver for the `worldmap-core` interactive map state.
//!
//! This crate primarily provides a binary (`worldmap`). The library target
//! exists so that docs.rs renders a page with this overview.
//!
//! Quick start
//! -----------
//!
//! ```text
//! cargo install worldmap-cli
//! worldmap --help
//! worldmap manual
//! worldmap search Paris --pick 0
//! worldmap --offline search 新加坡 --pick 0
//! worldmap --set search.limit=3 config search
//! ```
//!
//! For programmatic access use [`worldmap-core`] directly; for the browser,
//! `worldmap-wasm`.
//!
//! Links
//! -----
//! - Core crate: <https://docs.rs/worldmap-core>
//!
#![cfg_attr(docsrs, feature(doc_cfg))]
