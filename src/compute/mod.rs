//! Compute module - the evolutionary machinery.

pub mod evolution;

pub use evolution::{EvolutionEngine, EvolutionError, Strand, StrandRng};
