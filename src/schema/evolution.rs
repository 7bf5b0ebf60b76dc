//! Run history and result types for strand evolution.
//!
//! These are plain data records: the engine fills them, and external
//! consumers (run log, plot renderers) read them.

use serde::{Deserialize, Serialize};

use super::ItemId;

/// Statistics recorded for one generation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation number (1-based).
    pub generation: usize,
    /// Time spent selecting parents (seconds).
    pub selection_secs: f64,
    /// Time spent in crossover (seconds).
    pub crossover_secs: f64,
    /// Time spent in mutation (seconds).
    pub mutation_secs: f64,
    /// Time spent writing children back into the population (seconds).
    pub replacement_secs: f64,
    /// Best fitness seen so far (global best).
    pub best_fitness: u64,
    /// Best fitness in the mating pool used by this generation.
    pub pool_best_fitness: u64,
    /// Genes of the global best strand.
    pub best_genes: Vec<ItemId>,
}

/// Per-generation history of a run, in generation order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvolutionHistory {
    /// One entry per completed generation.
    pub generations: Vec<GenerationStats>,
}

impl EvolutionHistory {
    /// Append the statistics of a completed generation.
    pub fn record(&mut self, stats: GenerationStats) {
        self.generations.push(stats);
    }

    /// Number of recorded generations.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    /// Global best fitness per generation.
    pub fn best_fitness(&self) -> Vec<u64> {
        self.generations.iter().map(|g| g.best_fitness).collect()
    }

    /// Mating pool best fitness per generation.
    pub fn pool_fitness(&self) -> Vec<u64> {
        self.generations.iter().map(|g| g.pool_best_fitness).collect()
    }

    /// Total selection time over all generations.
    pub fn total_selection_secs(&self) -> f64 {
        self.generations.iter().map(|g| g.selection_secs).sum()
    }

    /// Total crossover time over all generations.
    pub fn total_crossover_secs(&self) -> f64 {
        self.generations.iter().map(|g| g.crossover_secs).sum()
    }

    /// Total mutation time over all generations.
    pub fn total_mutation_secs(&self) -> f64 {
        self.generations.iter().map(|g| g.mutation_secs).sum()
    }
}

/// Progress update emitted after each generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionProgress {
    /// Generations completed.
    pub generation: usize,
    /// Total generations planned.
    pub total_generations: usize,
    /// Best fitness seen so far.
    pub best_fitness: u64,
    /// Best fitness in the last mating pool.
    pub pool_best_fitness: u64,
    /// Whether the global best improved during this generation.
    pub improved: bool,
}

/// An item of a strand, in strand order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedItem {
    /// Item id (gene value).
    pub id: ItemId,
    /// Item payload.
    pub payload: String,
}

/// Serializable copy of a strand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrandSnapshot {
    /// Gene order.
    pub genes: Vec<ItemId>,
    /// Fitness of the gene order.
    pub fitness: u64,
    /// Payloads in gene order.
    pub items: Vec<RankedItem>,
}

/// Summary statistics of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionStats {
    /// Generations run.
    pub generations: usize,
    /// Realized population size.
    pub population_size: usize,
    /// Best fitness achieved.
    pub best_fitness: u64,
    /// Best fitness of the initial population.
    pub initial_best_fitness: u64,
    /// Seed the run's generator was created from.
    pub random_seed: u64,
    /// Population initialization time (seconds).
    pub init_seconds: f64,
    /// Total selection time (seconds).
    pub selection_seconds: f64,
    /// Total crossover time (seconds).
    pub crossover_seconds: f64,
    /// Total mutation time (seconds).
    pub mutation_seconds: f64,
    /// Wall time of the generational loop (seconds).
    pub elapsed_seconds: f64,
}

/// Final result of an evolution run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvolutionResult {
    /// Best strand found.
    pub best: StrandSnapshot,
    /// Statistics from the run.
    pub stats: EvolutionStats,
    /// Full history for analysis and plotting.
    pub history: EvolutionHistory,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats(generation: usize, best: u64, pool: u64) -> GenerationStats {
        GenerationStats {
            generation,
            selection_secs: 0.5,
            crossover_secs: 1.0,
            mutation_secs: 0.25,
            replacement_secs: 0.0,
            best_fitness: best,
            pool_best_fitness: pool,
            best_genes: vec![0, 1, 2],
        }
    }

    #[test]
    fn test_history_series() {
        let mut history = EvolutionHistory::default();
        assert!(history.is_empty());

        history.record(stats(1, 40, 45));
        history.record(stats(2, 30, 38));

        assert_eq!(history.len(), 2);
        assert_eq!(history.best_fitness(), vec![40, 30]);
        assert_eq!(history.pool_fitness(), vec![45, 38]);
        assert_eq!(history.total_selection_secs(), 1.0);
        assert_eq!(history.total_crossover_secs(), 2.0);
        assert_eq!(history.total_mutation_secs(), 0.5);
    }

    #[test]
    fn test_history_serialization() {
        let mut history = EvolutionHistory::default();
        history.record(stats(1, 12, 12));
        let json = serde_json::to_string(&history).unwrap();
        let parsed: EvolutionHistory = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, history);
    }
}
