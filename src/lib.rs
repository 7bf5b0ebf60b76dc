//! BeeVolve - genetic re-ranking of URL lists.
//!
//! This crate evolves permutations of a fixed item set (typically URLs) toward
//! a target ordering with a classic generational genetic algorithm:
//! binary-tournament or random selection from a mating pool, similarity-based
//! crossover over the ids two parents share, and window mutations.
//!
//! # Architecture
//!
//! - `schema`: configuration, item catalog, run history and results
//! - `compute`: the evolution engine and its operators
//! - `source`: where the items come from (URL list files, in-memory lists)
//! - `report`: run log and JSON statistics export
//! - `cli`: command-line argument surface
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use beevolve::{
//!     compute::EvolutionEngine,
//!     schema::EvolutionConfig,
//!     source::{ItemSource, UrlListFile},
//! };
//!
//! let config = EvolutionConfig::default();
//! let catalog = UrlListFile::new("urls.txt").load(config.population.strand_size)?;
//!
//! let mut engine = EvolutionEngine::new(config, Arc::new(catalog))?;
//! let result = engine.run();
//!
//! println!("Best fitness after {} generations: {}",
//!     result.stats.generations, result.best.fitness);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod cli;
pub mod compute;
pub mod report;
pub mod schema;
pub mod source;

// Re-export commonly used types
pub use compute::{EvolutionEngine, EvolutionError, Strand};
pub use schema::{EvolutionConfig, EvolutionResult, ItemCatalog};
