//! Known persons dossier: record loading, backlink resolution and selector
//! search.
//!
//! This crate provides:
//! - Datafile parsing and per-record normalization against a story stage
//! - Reciprocal link injection between related records
//! - The selector search engine with its result-size policy
//!
//! # Quick Start
//!
//! ```ignore
//! use dossier_core::{DatasetLoader, DossierConfig, QueryStatus, SearchEngine};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DossierConfig::discover(None)?;
//!     let dataset = DatasetLoader::new(&config).load(&[])?;
//!
//!     let engine = SearchEngine::new(dataset.into_records(), config.search.clone());
//!     let outcome = engine.query("smith john");
//!     if outcome.status == QueryStatus::Ok {
//!         for record in &outcome.results {
//!             println!("{} {}", record.surname, record.forename);
//!         }
//!     }
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod dataset;
pub mod error;
pub mod links;
pub mod normalize;
pub mod record;
pub mod search;
pub mod testing;

// Primary public API
pub use config::{DossierConfig, SearchConfig};
pub use dataset::{Dataset, DatasetLoader};
pub use error::{ConfigError, LinkError, LoadError};
pub use record::{Datafile, EventEntry, RawRecord, Record, Relation};
pub use search::{QueryOutcome, QueryStatus, SearchEngine};
