//! Genetic algorithm over item orderings.
//!
//! A strand is a permutation of a catalog's item ids. The engine evolves a
//! population of strands toward ascending id order, scored by
//! [`inversion_fitness`] (lower is better).
//!
//! # Overview
//!
//! - **Strands** (`strand`): permutation plus cached fitness
//! - **Storage** (`pool`): population slots and the per-generation mating pool
//! - **Operators** (`selection`, `crossover`, `mutation`): pluggable through
//!   [`ParentSelector`], [`CrossoverOperator`] and [`MutationOperator`]
//! - **Controller** (`search`): the generational loop and its statistics
//! - **Batches** (`batch`): independent repeated runs on the rayon pool
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use beevolve::schema::{EvolutionConfig, ItemCatalog};
//! use beevolve::compute::evolution::EvolutionEngine;
//!
//! let catalog = Arc::new(ItemCatalog::enumerate(
//!     (0..21).map(|i| format!("https://example.org/{i}")),
//! ));
//! let mut engine = EvolutionEngine::new(EvolutionConfig::default(), catalog)?;
//! let result = engine.run_with_callback(|progress| {
//!     println!("Generation {}: best fitness = {}",
//!         progress.generation, progress.best_fitness);
//! });
//! println!("Best ordering: {:?}", result.best.genes);
//! # Ok::<(), beevolve::compute::evolution::EvolutionError>(())
//! ```

mod batch;
mod crossover;
mod fitness;
mod mutation;
mod pool;
mod rng;
mod search;
mod selection;
mod strand;

pub use batch::{best_run, run_batch};
pub use crossover::{
    CrossoverOperator, SimilarityCrossover, build_crossover, common_subsequences,
    crossover_template, recombine, splice,
};
pub use fitness::inversion_fitness;
pub use mutation::{
    InversionMutation, MutationOperator, ScrambleMutation, build_mutation, mutation_window,
};
pub use pool::{MatingPool, Population};
pub use rng::StrandRng;
pub use search::{EvolutionEngine, EvolutionError, EvolutionState};
pub use selection::{BinaryTournament, ParentSelector, RandomSelection, build_selector};
pub use strand::{Strand, StrandError};
