//! Command-line surface of the `beevolve` binary.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use clap::Parser;

use crate::schema::{ConfigError, EvolutionConfig, PoolPolicy, checked_percentage};

/// Evolve an ordering of a URL list with a genetic algorithm.
#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// URL list file, one "<id> <url>" pair per line.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Number of generations.
    #[arg(short, long)]
    pub niter: Option<usize>,

    /// Population size.
    #[arg(short, long)]
    pub psize: Option<usize>,

    /// Mutation rate (0.0-1.0).
    #[arg(short, long)]
    pub rate: Option<f64>,

    /// Number of items per strand (lines read from the list file).
    #[arg(short = 'z', long)]
    pub strandsize: Option<usize>,

    /// Initialization type: RGS (random) or NNI (seeded neighbor).
    #[arg(short, long)]
    pub inittype: Option<String>,

    /// Selection operator: RDM or BIN.
    #[arg(short, long)]
    pub selection: Option<String>,

    /// Crossover operator: SIM.
    #[arg(short, long)]
    pub crossover: Option<String>,

    /// Mutation operator: SCR or INV.
    #[arg(short, long)]
    pub mutation: Option<String>,

    /// Mutation window as a percentage (0-100) of the strand.
    #[arg(short, long, allow_negative_numbers = true)]
    pub alterpct: Option<i64>,

    /// Crossover section as a percentage (0-100) of the common genes.
    #[arg(short = 'x', long, allow_negative_numbers = true)]
    pub xovrpct: Option<i64>,

    /// Only replace mating pool entries with fitter strands.
    #[arg(short, long)]
    pub bestonly: bool,

    /// Echo the run log to stdout and log at info level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Write the run log to this file.
    #[arg(short = 'w', long)]
    pub outfile: Option<PathBuf>,

    /// Number of independent runs.
    #[arg(short, long, default_value_t = 1)]
    pub execs: usize,

    /// JSON configuration file; flags override its values.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Random seed.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write run statistics as JSON to this file.
    #[arg(long)]
    pub stats_json: Option<PathBuf>,

    /// Print an example JSON configuration and exit.
    #[arg(long)]
    pub example_config: bool,
}

impl Args {
    /// Input list file; required for a run.
    pub fn input_file(&self) -> Result<&Path, CliError> {
        self.file
            .as_deref()
            .ok_or(CliError::Missing("input file (-f/--file)"))
    }

    /// Default log filter for the verbosity flag.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "info" } else { "warn" }
    }

    /// Build the run configuration: the JSON file (if any) overlaid with
    /// flags, sanitized and validated.
    pub fn resolve(&self) -> Result<EvolutionConfig, CliError> {
        let base = self.config.as_deref().map(load_config).transpose()?;
        let mut config = base.clone().unwrap_or_default();

        config.population.size = self
            .psize
            .or(base.as_ref().map(|c| c.population.size))
            .ok_or(CliError::Missing("population size (-p/--psize)"))?;
        config.population.max_generations = self
            .niter
            .or(base.as_ref().map(|c| c.population.max_generations))
            .ok_or(CliError::Missing("generation count (-n/--niter)"))?;
        config.algorithm.mutation_rate = self
            .rate
            .or(base.as_ref().map(|c| c.algorithm.mutation_rate))
            .ok_or(CliError::Missing("mutation rate (-r/--rate)"))?;

        if let Some(size) = self.strandsize {
            config.population.strand_size = size;
        }

        let population = &mut config.population;
        let ga = &mut config.algorithm;
        population.initialization =
            parse_or_keep("initialization", self.inittype.as_deref(), population.initialization);
        ga.selection = parse_or_keep("selection", self.selection.as_deref(), ga.selection);
        ga.crossover = parse_or_keep("crossover", self.crossover.as_deref(), ga.crossover);
        ga.mutation = parse_or_keep("mutation", self.mutation.as_deref(), ga.mutation);

        if let Some(pct) = self.alterpct {
            ga.mutation_window_pct = checked_percentage("mutation window", pct);
        }
        if let Some(pct) = self.xovrpct {
            ga.crossover_section_pct = checked_percentage("crossover section", pct);
        }
        if self.bestonly {
            ga.pool_policy = PoolPolicy::ElitistPerSlot;
        }
        if self.seed.is_some() {
            config.random_seed = self.seed;
        }

        config.sanitize();
        config.validate()?;
        Ok(config)
    }
}

fn load_config(path: &Path) -> Result<EvolutionConfig, CliError> {
    let content = fs::read_to_string(path).map_err(|source| CliError::ReadConfig {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::ParseConfig {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse a strategy code, keeping `current` (with a warning) when the code
/// is not recognized.
fn parse_or_keep<T>(kind: &str, value: Option<&str>, current: T) -> T
where
    T: FromStr<Err = ConfigError> + std::fmt::Display,
{
    match value.map(str::parse::<T>) {
        None => current,
        Some(Ok(parsed)) => parsed,
        Some(Err(err)) => {
            log::warn!("{err}; keeping {kind} mode {current}");
            current
        }
    }
}

/// Command-line resolution errors.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Missing required parameter: {0}")]
    Missing(&'static str),
    #[error("Error reading config file {}: {source}", path.display())]
    ReadConfig {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Error parsing config {}: {source}", path.display())]
    ParseConfig {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
}
