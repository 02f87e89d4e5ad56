//! gppd-cli library
//!
//! This crate provides the core functionality for the `gppd-cli` binary.
//! Keep the crate root minimal — implementation and tests live in their modules.
//!
//! ## Overview
//!
//! The library is organized into modules that handle different aspects of
//! browsing a pre-built Greek public-procurement dataset:
//!
//! - [`loader`] - Fetches the chunk manifest, record chunks, and CPV taxonomy from a directory or base URL
//! - [`session`] - Owning controller tying records, filters, taxonomy path, and pagination together
//! - [`filter`] - Pure filter predicates and the date-ordered filter engine
//! - [`cpv`] - CPV taxonomy index and hierarchical drill-down state
//! - [`classify`] - Award-mode classification of free-text procedure types
//! - [`view`] - "Load more" pagination window over the filtered results
//! - [`render`] - Plain-text result cards and counts
//! - [`cli`] - Command-line interface for one-shot listing and interactive browsing
//! - [`models`] - Data structures for records, CPV nodes, and the manifest
//! - [`config`] - Defaults and TOML configuration loading
//! - [`errors`] - Error types used throughout the application
//!
//! ## Example Usage
//!
//! The typical flow loads a dataset, builds a session, and narrows it down:
//!
//! ```no_run
//! use gppd_cli::{config::ResolvedConfig, errors::AppResult, filter::KindFilter};
//! use gppd_cli::loader::{self, DataSource};
//! use gppd_cli::session::BrowseSession;
//!
//! # async fn example() -> AppResult<()> {
//! let config = ResolvedConfig::default();
//! let source = DataSource::parse("data/web")?;
//! let dataset = loader::load_dataset(&source, &config).await?;
//!
//! let mut session = BrowseSession::new(dataset.records, dataset.nodes, config.page_size);
//! session.set_kind(KindFilter::from("contract"));
//! for record in session.visible() {
//!     println!("{}", record.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod classify;
pub mod cli;
pub mod config;
pub mod constants;
pub mod cpv;
pub mod errors;
pub mod filter;
pub mod loader;
pub mod models;
pub mod render;
pub mod session;
pub mod text;
pub mod view;
