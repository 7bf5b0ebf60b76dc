//! Generational controller for strand evolution.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::schema::{
    ConfigError, EvolutionConfig, EvolutionHistory, EvolutionProgress, EvolutionResult,
    EvolutionStats, GenerationStats, ItemCatalog,
};

use super::crossover::{CrossoverOperator, build_crossover};
use super::mutation::{MutationOperator, build_mutation};
use super::pool::{MatingPool, Population};
use super::rng::StrandRng;
use super::selection::{ParentSelector, build_selector};
use super::strand::Strand;

/// Everything the generational loop mutates.
///
/// The global best is a copy, never an alias of a population or pool
/// strand, and its fitness never increases.
#[derive(Debug, Clone)]
pub struct EvolutionState {
    /// Current generation, one strand per slot.
    pub population: Population,
    /// Selection source, refreshed at the start of every generation.
    pub pool: MatingPool,
    /// Fittest strand seen so far.
    pub best: Strand,
    /// Generations completed.
    pub generation: usize,
}

impl EvolutionState {
    /// Keep a copy of `candidate` if it beats the global best.
    pub fn offer_best(&mut self, candidate: &Strand) -> bool {
        if candidate.fitness() < self.best.fitness() {
            self.best = candidate.clone();
            true
        } else {
            false
        }
    }
}

/// Evolution engine that runs the search.
pub struct EvolutionEngine {
    config: EvolutionConfig,
    rng: StrandRng,
    catalog: Arc<ItemCatalog>,
    selector: Box<dyn ParentSelector>,
    crossover: Box<dyn CrossoverOperator>,
    mutator: Box<dyn MutationOperator>,
    state: EvolutionState,
    history: EvolutionHistory,
    init_seconds: f64,
    elapsed_seconds: f64,
    initial_best_fitness: u64,
}

impl EvolutionEngine {
    /// Validate the configuration, build the operators and initialize the
    /// population.
    pub fn new(config: EvolutionConfig, catalog: Arc<ItemCatalog>) -> Result<Self, EvolutionError> {
        config.validate()?;
        if catalog.is_empty() {
            return Err(EvolutionError::EmptyCatalog);
        }
        if catalog.len() != config.population.strand_size {
            return Err(EvolutionError::StrandSizeMismatch {
                expected: config.population.strand_size,
                found: catalog.len(),
            });
        }

        let ga = &config.algorithm;
        let selector = build_selector(ga.selection)?;
        let crossover = build_crossover(ga.crossover, ga.crossover_section_pct)?;
        let mutator = build_mutation(ga.mutation, ga.mutation_rate, ga.mutation_window_pct);

        let seed = config.random_seed.unwrap_or_else(rand::random);
        let mut rng = StrandRng::new(seed);

        let start = Instant::now();
        let population = Population::initialize(
            &catalog,
            config.population.size,
            config.population.initialization,
            &mut rng,
        );
        let best = population
            .best()
            .cloned()
            .ok_or(ConfigError::EmptyPopulation)?;
        let init_seconds = start.elapsed().as_secs_f64();

        log::info!(
            "Initialized {} strands of size {} in {:.3}s (seed {}, best fitness {})",
            population.len(),
            catalog.len(),
            init_seconds,
            seed,
            best.fitness()
        );

        let initial_best_fitness = best.fitness();
        Ok(Self {
            config,
            rng,
            catalog,
            selector,
            crossover,
            mutator,
            state: EvolutionState {
                population,
                pool: MatingPool::default(),
                best,
                generation: 0,
            },
            history: EvolutionHistory::default(),
            init_seconds,
            elapsed_seconds: 0.0,
            initial_best_fitness,
        })
    }

    /// Current loop state.
    pub fn state(&self) -> &EvolutionState {
        &self.state
    }

    /// Per-generation history so far.
    pub fn history(&self) -> &EvolutionHistory {
        &self.history
    }

    /// Configuration the engine runs with.
    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Catalog the strands are drawn from.
    pub fn catalog(&self) -> &Arc<ItemCatalog> {
        &self.catalog
    }

    /// Seed of the run's generator.
    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Whether the configured generation budget is spent.
    pub fn is_finished(&self) -> bool {
        self.state.generation >= self.config.population.max_generations
    }

    /// Run one generation: refresh the pool, then select, recombine, mutate
    /// and replace for every population slot in order.
    pub fn step_generation(&mut self) -> EvolutionProgress {
        self.state
            .pool
            .refresh(&self.state.population, self.config.algorithm.pool_policy);
        let pool_best_fitness = self
            .state
            .pool
            .best_fitness()
            .unwrap_or(self.state.best.fitness());
        let best_before = self.state.best.fitness();

        let mut selection = Duration::ZERO;
        let mut crossover = Duration::ZERO;
        let mut mutation = Duration::ZERO;
        let mut replacement = Duration::ZERO;

        for slot in 0..self.state.population.len() {
            let start = Instant::now();
            let Some((first, second)) = self
                .selector
                .select_pair(self.state.pool.as_slice(), &mut self.rng)
            else {
                continue;
            };
            selection += start.elapsed();

            let start = Instant::now();
            let mut child = self.crossover.crossover(first, second, &mut self.rng);
            self.state.offer_best(&child);
            crossover += start.elapsed();

            let start = Instant::now();
            if self.mutator.mutate(&mut child, &mut self.rng) {
                self.state.offer_best(&child);
            }
            mutation += start.elapsed();

            let start = Instant::now();
            self.state.population.replace(slot, child);
            replacement += start.elapsed();
        }

        self.state.generation += 1;
        let best_fitness = self.state.best.fitness();
        let improved = best_fitness < best_before;

        self.history.record(GenerationStats {
            generation: self.state.generation,
            selection_secs: selection.as_secs_f64(),
            crossover_secs: crossover.as_secs_f64(),
            mutation_secs: mutation.as_secs_f64(),
            replacement_secs: replacement.as_secs_f64(),
            best_fitness,
            pool_best_fitness,
            best_genes: self.state.best.genes().to_vec(),
        });

        if improved {
            log::info!(
                "Generation {}: best fitness {} -> {}",
                self.state.generation,
                best_before,
                best_fitness
            );
        }
        log::debug!(
            "Generation {}: best {}, pool best {}",
            self.state.generation,
            best_fitness,
            pool_best_fitness
        );

        EvolutionProgress {
            generation: self.state.generation,
            total_generations: self.config.population.max_generations,
            best_fitness,
            pool_best_fitness,
            improved,
        }
    }

    /// Run the remaining generations, reporting progress after each one.
    pub fn run_with_callback<F>(&mut self, mut callback: F) -> EvolutionResult
    where
        F: FnMut(&EvolutionProgress),
    {
        let start = Instant::now();
        while !self.is_finished() {
            let progress = self.step_generation();
            callback(&progress);
        }
        self.elapsed_seconds += start.elapsed().as_secs_f64();

        log::info!(
            "Finished {} generations in {:.3}s, best fitness {}",
            self.state.generation,
            self.elapsed_seconds,
            self.state.best.fitness()
        );
        self.result()
    }

    /// Run evolution (blocking).
    pub fn run(&mut self) -> EvolutionResult {
        self.run_with_callback(|_| {})
    }

    /// Snapshot of the run so far.
    pub fn result(&self) -> EvolutionResult {
        EvolutionResult {
            best: self.state.best.to_snapshot(),
            stats: EvolutionStats {
                generations: self.state.generation,
                population_size: self.state.population.len(),
                best_fitness: self.state.best.fitness(),
                initial_best_fitness: self.initial_best_fitness,
                random_seed: self.rng.seed(),
                init_seconds: self.init_seconds,
                selection_seconds: self.history.total_selection_secs(),
                crossover_seconds: self.history.total_crossover_secs(),
                mutation_seconds: self.history.total_mutation_secs(),
                elapsed_seconds: self.elapsed_seconds,
            },
            history: self.history.clone(),
        }
    }
}

/// Errors raised while setting up an evolution run.
#[derive(Debug, thiserror::Error)]
pub enum EvolutionError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Item catalog is empty")]
    EmptyCatalog,
    #[error("Strand size is {expected} but the catalog holds {found} items")]
    StrandSizeMismatch { expected: usize, found: usize },
}
