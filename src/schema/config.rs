//! Configuration types for strand evolution runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level configuration for an evolution run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvolutionConfig {
    /// Population and generation settings.
    pub population: PopulationConfig,
    /// Operator selection and parameters.
    pub algorithm: GeneticAlgorithmConfig,
    /// Random seed for reproducibility. A fresh seed is drawn (and recorded)
    /// when unset.
    #[serde(default)]
    pub random_seed: Option<u64>,
}

/// Population and generation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationConfig {
    /// Number of strands in the population.
    pub size: usize,
    /// Number of generations to run.
    pub max_generations: usize,
    /// Number of items per strand (lines consumed from the input source).
    #[serde(default = "default_strand_size")]
    pub strand_size: usize,
    /// How the initial strands are built.
    #[serde(default)]
    pub initialization: InitializationMode,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            size: 50,
            max_generations: 100,
            strand_size: default_strand_size(),
            initialization: InitializationMode::default(),
        }
    }
}

fn default_strand_size() -> usize {
    21
}

/// Genetic operator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneticAlgorithmConfig {
    /// Parent selection strategy.
    #[serde(default)]
    pub selection: SelectionMethod,
    /// Crossover strategy.
    #[serde(default)]
    pub crossover: CrossoverMethod,
    /// Share (0-100) of the common genes whose template bits are randomized.
    /// Every template bit is random when unset.
    #[serde(default, deserialize_with = "crossover_section_pct")]
    pub crossover_section_pct: Option<u8>,
    /// Mutation strategy.
    #[serde(default)]
    pub mutation: MutationMethod,
    /// Probability (0.0-1.0) that a child gets mutated.
    pub mutation_rate: f64,
    /// Share (0-100) of the strand covered by the mutation window.
    /// A random window length is drawn when unset.
    #[serde(default, deserialize_with = "mutation_window_pct")]
    pub mutation_window_pct: Option<u8>,
    /// How the mating pool is refreshed each generation.
    #[serde(default)]
    pub pool_policy: PoolPolicy,
}

/// Accept a percentage from any integer, warning and falling back to `None`
/// outside `0..=100`.
pub fn checked_percentage(name: &str, value: i64) -> Option<u8> {
    match u8::try_from(value) {
        Ok(pct) if pct <= 100 => Some(pct),
        _ => {
            log::warn!("Invalid {name} percentage {value}, will be set to None");
            None
        }
    }
}

fn lenient_percentage<'de, D>(name: &str, deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<i64>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| checked_percentage(name, value)))
}

fn crossover_section_pct<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_percentage("crossover section", deserializer)
}

fn mutation_window_pct<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_percentage("mutation window", deserializer)
}

impl Default for GeneticAlgorithmConfig {
    fn default() -> Self {
        Self {
            selection: SelectionMethod::default(),
            crossover: CrossoverMethod::default(),
            crossover_section_pct: None,
            mutation: MutationMethod::default(),
            mutation_rate: 0.01,
            mutation_window_pct: None,
            pool_policy: PoolPolicy::default(),
        }
    }
}

/// Initial strand construction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum InitializationMode {
    /// Uniformly shuffled permutation (RGS).
    #[default]
    Random,
    /// Keep one contiguous run of the catalog order, shuffle the rest (NNI).
    SeededNeighbor,
}

/// Parent selection strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMethod {
    /// Two uniform draws with replacement (RDM).
    Random,
    /// Two binary tournaments (BIN).
    #[default]
    BinaryTournament,
    /// Parents picked by a curating user (USR). Reserved.
    UserCurated,
    /// Parents picked from relational information (FRD). Reserved.
    Relational,
}

/// Crossover strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum CrossoverMethod {
    /// Uniform crossover restricted to the genes both parents share (SIM).
    #[default]
    Similarity,
    /// Children arbitrated by a curating user (STG). Reserved.
    UserCurated,
}

/// Mutation strategy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum MutationMethod {
    /// Shuffle the genes of a window (SCR).
    #[default]
    Scramble,
    /// Reverse the genes of a window (INV).
    Inversion,
}

/// Mating pool refresh policy.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PoolPolicy {
    /// Pool becomes a copy of the population.
    #[default]
    FullReplace,
    /// A pool slot is only replaced by a strictly fitter population strand.
    ElitistPerSlot,
}

impl SelectionMethod {
    /// Whether the variant is reserved for a future curation mode.
    pub fn is_reserved(self) -> bool {
        matches!(self, Self::UserCurated | Self::Relational)
    }
}

impl CrossoverMethod {
    /// Whether the variant is reserved for a future curation mode.
    pub fn is_reserved(self) -> bool {
        matches!(self, Self::UserCurated)
    }
}

fn normalized(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace('_', "-")
}

impl FromStr for InitializationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "rgs" | "rgt" | "random" => Ok(Self::Random),
            "nni" | "seeded-neighbor" | "neighbor" => Ok(Self::SeededNeighbor),
            _ => Err(ConfigError::UnknownVariant {
                kind: "initialization",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for SelectionMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "rdm" | "random" => Ok(Self::Random),
            "bin" | "binary-tournament" | "tournament" => Ok(Self::BinaryTournament),
            "usr" | "user" | "user-curated" => Ok(Self::UserCurated),
            "frd" | "rel" | "relational" => Ok(Self::Relational),
            _ => Err(ConfigError::UnknownVariant {
                kind: "selection",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for CrossoverMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "sim" | "uni" | "similarity" => Ok(Self::Similarity),
            "stg" | "usr" | "user" | "user-curated" => Ok(Self::UserCurated),
            _ => Err(ConfigError::UnknownVariant {
                kind: "crossover",
                value: s.to_string(),
            }),
        }
    }
}

impl FromStr for MutationMethod {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "scr" | "scramble" => Ok(Self::Scramble),
            "inv" | "inversion" => Ok(Self::Inversion),
            _ => Err(ConfigError::UnknownVariant {
                kind: "mutation",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for InitializationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Random => "RGS",
            Self::SeededNeighbor => "NNI",
        })
    }
}

impl fmt::Display for SelectionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Random => "RDM",
            Self::BinaryTournament => "BIN",
            Self::UserCurated => "USR",
            Self::Relational => "FRD",
        })
    }
}

impl fmt::Display for CrossoverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Similarity => "SIM",
            Self::UserCurated => "STG",
        })
    }
}

impl fmt::Display for MutationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scramble => "SCR",
            Self::Inversion => "INV",
        })
    }
}

impl EvolutionConfig {
    /// Reset out-of-range optional settings to `None`, logging a warning for
    /// each one. Returns the names of the fields that were reset.
    pub fn sanitize(&mut self) -> Vec<&'static str> {
        let mut reset = Vec::new();

        if let Some(pct) = self.algorithm.crossover_section_pct
            && pct > 100
        {
            log::warn!("Invalid crossover section percentage {pct}, will be set to None");
            self.algorithm.crossover_section_pct = None;
            reset.push("crossover_section_pct");
        }

        if let Some(pct) = self.algorithm.mutation_window_pct
            && pct > 100
        {
            log::warn!("Invalid mutation window percentage {pct}, will be set to None");
            self.algorithm.mutation_window_pct = None;
            reset.push("mutation_window_pct");
        }

        reset
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.population.size == 0 {
            return Err(ConfigError::EmptyPopulation);
        }
        if self.population.strand_size == 0 {
            return Err(ConfigError::EmptyStrand);
        }

        let rate = self.algorithm.mutation_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::InvalidMutationRate(rate));
        }

        let check_pct = |pct: Option<u8>, name: &'static str| match pct {
            Some(value) if value > 100 => Err(ConfigError::InvalidPercentage { name, value }),
            _ => Ok(()),
        };
        check_pct(self.algorithm.crossover_section_pct, "crossover_section_pct")?;
        check_pct(self.algorithm.mutation_window_pct, "mutation_window_pct")?;

        if self.algorithm.selection.is_reserved() {
            return Err(ConfigError::Unsupported {
                kind: "selection",
                variant: self.algorithm.selection.to_string(),
            });
        }
        if self.algorithm.crossover.is_reserved() {
            return Err(ConfigError::Unsupported {
                kind: "crossover",
                variant: self.algorithm.crossover.to_string(),
            });
        }

        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("Population size must be non-zero")]
    EmptyPopulation,
    #[error("Strand size must be non-zero")]
    EmptyStrand,
    #[error("Mutation rate must lie in [0, 1], got {0}")]
    InvalidMutationRate(f64),
    #[error("{name} must lie in 0..=100, got {value}")]
    InvalidPercentage { name: &'static str, value: u8 },
    #[error("Unrecognized {kind} mode '{value}'")]
    UnknownVariant { kind: &'static str, value: String },
    #[error("{kind} mode {variant} is reserved and not supported yet")]
    Unsupported { kind: &'static str, variant: String },
}
