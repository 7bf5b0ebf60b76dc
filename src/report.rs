//! Run log and statistics export.
//!
//! The run log is the human-readable transcript of a run. It is written to an
//! optional file and echoed to stdout in verbose mode. The statistics export
//! is the JSON hand-off for external plotting.

use std::fmt::Display;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::schema::{EvolutionConfig, EvolutionProgress, EvolutionResult};

/// Line-oriented run transcript.
pub struct RunLog {
    file: Option<BufWriter<File>>,
    echo: bool,
}

impl RunLog {
    /// Create a log, truncating `outfile` if one is given. With `echo`, every
    /// line is also printed to stdout.
    pub fn new<P: AsRef<Path>>(outfile: Option<P>, echo: bool) -> Result<Self, ReportError> {
        let file = match outfile {
            Some(path) => Some(BufWriter::new(File::create(path)?)),
            None => None,
        };
        Ok(Self { file, echo })
    }

    /// Write one line.
    pub fn line(&mut self, message: impl Display) -> Result<(), ReportError> {
        if let Some(file) = self.file.as_mut() {
            writeln!(file, "{message}")?;
        }
        if self.echo {
            println!("{message}");
        }
        Ok(())
    }

    /// Run parameters, as resolved.
    pub fn parameters(&mut self, config: &EvolutionConfig) -> Result<(), ReportError> {
        let ga = &config.algorithm;
        self.line(format_args!(
            "[c] Num of iterations set to : {}",
            config.population.max_generations
        ))?;
        self.line(format_args!("[c] Population size set to : {}", config.population.size))?;
        self.line(format_args!("[c] Strand size set to : {}", config.population.strand_size))?;
        self.line(format_args!("[c] Mutation rate set to : {}", ga.mutation_rate))?;
        self.line(format_args!(
            "[c] Initialization type defined to : {}",
            config.population.initialization
        ))?;
        self.line(format_args!("[c] Selection operator defined to : {}", ga.selection))?;
        self.line(format_args!("[c] Crossover operator defined to : {}", ga.crossover))?;
        if let Some(pct) = ga.crossover_section_pct {
            self.line(format_args!("[c]     Crossover section size set to : {pct}"))?;
        }
        self.line(format_args!("[c] Mutation operator defined to : {}", ga.mutation))?;
        if let Some(pct) = ga.mutation_window_pct {
            self.line(format_args!("[c]     Mutation alter percentage set to : {pct}"))?;
        }
        self.line(format_args!("[c] Mating pool policy : {:?}", ga.pool_policy))?;
        if let Some(seed) = config.random_seed {
            self.line(format_args!("[c] Random seed : {seed}"))?;
        }
        Ok(())
    }

    /// Generation progress; only improvements of the global best are logged.
    pub fn progress(&mut self, progress: &EvolutionProgress) -> Result<(), ReportError> {
        if progress.improved {
            self.line(format_args!(
                "iteration: {} - best: {}",
                progress.generation, progress.best_fitness
            ))?;
        }
        Ok(())
    }

    /// Final outcome: iterations, best fitness, best ordering.
    pub fn summary(&mut self, result: &EvolutionResult) -> Result<(), ReportError> {
        self.line(format_args!("Total iterations: {}", result.stats.generations))?;
        self.line(format_args!("Population size: {}", result.stats.population_size))?;
        self.line(format_args!("Random seed: {}", result.stats.random_seed))?;
        self.line(format_args!("Initial best: {}", result.stats.initial_best_fitness))?;
        self.line(format_args!("Best Solution: {}", result.best.fitness))?;
        self.line("Best Strand Details:")?;
        for (rank, item) in result.best.items.iter().enumerate() {
            self.line(format_args!("  {:>3}. [{}] {}", rank + 1, item.id, item.payload))?;
        }
        self.line(format_args!("Best Strand Genes: {:?}", result.best.genes))?;
        Ok(())
    }

    /// Per-generation statistics and timing totals.
    pub fn statistics(&mut self, result: &EvolutionResult) -> Result<(), ReportError> {
        self.line("[s] Execution statistics :")?;
        for generation in &result.history.generations {
            self.line(format_args!(
                "    gen {:>5} | best {:>8} | pool {:>8} | slct {:.6}s | xovr {:.6}s | mutn {:.6}s",
                generation.generation,
                generation.best_fitness,
                generation.pool_best_fitness,
                generation.selection_secs,
                generation.crossover_secs,
                generation.mutation_secs
            ))?;
        }
        let stats = &result.stats;
        self.line("[s] Timed statistics for this run :")?;
        self.line(format_args!("    Total initialization time : {:.6}", stats.init_seconds))?;
        self.line(format_args!("    Total time for Selection : {:.6}", stats.selection_seconds))?;
        self.line(format_args!("    Total time for Crossover : {:.6}", stats.crossover_seconds))?;
        self.line(format_args!("    Total time for Mutations : {:.6}", stats.mutation_seconds))?;
        self.line(format_args!("    Total run time : {:.6}", stats.elapsed_seconds))?;
        Ok(())
    }

    /// Flush the log file.
    pub fn finish(mut self) -> Result<(), ReportError> {
        if let Some(file) = self.file.as_mut() {
            file.flush()?;
        }
        Ok(())
    }
}

/// Write run results as pretty JSON.
pub fn export_history<P: AsRef<Path>>(
    path: P,
    results: &[EvolutionResult],
) -> Result<(), ReportError> {
    let json = serde_json::to_string_pretty(results)?;
    fs::write(path, json)?;
    Ok(())
}

/// Report output errors.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to encode statistics: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compute::EvolutionEngine;
    use crate::schema::{ItemCatalog, PopulationConfig};
    use std::sync::Arc;

    fn run() -> (EvolutionConfig, EvolutionResult) {
        let config = EvolutionConfig {
            population: PopulationConfig {
                size: 6,
                max_generations: 4,
                strand_size: 5,
                ..Default::default()
            },
            random_seed: Some(3),
            ..Default::default()
        };
        let catalog = Arc::new(ItemCatalog::enumerate(
            (0..5).map(|i| format!("https://example.org/{i}")),
        ));
        let result = EvolutionEngine::new(config.clone(), catalog)
            .unwrap()
            .run();
        (config, result)
    }

    #[test]
    fn test_run_log_file() {
        let (config, result) = run();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");

        let mut log = RunLog::new(Some(&path), false).unwrap();
        log.parameters(&config).unwrap();
        log.summary(&result).unwrap();
        log.statistics(&result).unwrap();
        log.finish().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("[c] Population size set to : 6"));
        assert!(text.contains("[c] Selection operator defined to : BIN"));
        assert!(text.contains(&format!("Best Solution: {}", result.best.fitness)));
        assert!(text.contains("https://example.org/"));
        assert_eq!(text.matches("    gen ").count(), 4);
    }

    #[test]
    fn test_summary_records_drawn_seed() {
        let (mut config, _) = run();
        config.random_seed = None;
        let catalog = Arc::new(ItemCatalog::enumerate(
            (0..5).map(|i| format!("https://example.org/{i}")),
        ));
        let result = EvolutionEngine::new(config.clone(), catalog)
            .unwrap()
            .run();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("seed.log");
        let mut log = RunLog::new(Some(&path), false).unwrap();
        log.parameters(&config).unwrap();
        log.summary(&result).unwrap();
        log.finish().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert!(!text.contains("[c] Random seed"));
        assert!(text.contains(&format!("Random seed: {}", result.stats.random_seed)));
        assert!(text.contains("Population size: 6"));
    }

    #[test]
    fn test_progress_only_logs_improvements() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("progress.log");
        let mut log = RunLog::new(Some(&path), false).unwrap();

        let mut progress = EvolutionProgress {
            generation: 1,
            total_generations: 2,
            best_fitness: 10,
            pool_best_fitness: 12,
            improved: false,
        };
        log.progress(&progress).unwrap();
        progress.generation = 2;
        progress.improved = true;
        log.progress(&progress).unwrap();
        log.finish().unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "iteration: 2 - best: 10\n");
    }

    #[test]
    fn test_log_without_file() {
        let mut log = RunLog::new(None::<&Path>, false).unwrap();
        log.line("nothing to see").unwrap();
        log.finish().unwrap();
    }

    #[test]
    fn test_export_history() {
        let (_, result) = run();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stats.json");
        export_history(&path, std::slice::from_ref(&result)).unwrap();

        let parsed: Vec<EvolutionResult> =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].history, result.history);
        assert_eq!(parsed[0].best, result.best);
    }
}
