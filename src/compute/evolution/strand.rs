//! Strand: one candidate ordering of a catalog's items.

use std::collections::HashSet;
use std::ops::Range;
use std::sync::Arc;

use crate::schema::{InitializationMode, ItemCatalog, ItemId, RankedItem, StrandSnapshot};

use super::fitness::inversion_fitness;
use super::rng::StrandRng;

/// A chromosome: a permutation of the catalog ids plus its fitness.
///
/// The gene order is always a permutation of the catalog's ids and the
/// fitness always matches the current gene order. `Clone` is the strand
/// copy: it duplicates the genes, shares the catalog and carries the
/// already-computed fitness over.
#[derive(Debug, Clone)]
pub struct Strand {
    catalog: Arc<ItemCatalog>,
    genes: Vec<ItemId>,
    fitness: u64,
}

impl Strand {
    /// Uniformly shuffled permutation of the catalog ids.
    pub fn random(catalog: Arc<ItemCatalog>, rng: &mut StrandRng) -> Self {
        let mut genes: Vec<ItemId> = catalog.ids().collect();
        rng.shuffle(&mut genes);
        Self::from_permutation(catalog, genes)
    }

    /// Keep one random contiguous run of the catalog order in place and
    /// shuffle the remaining ids into the remaining positions.
    pub fn seeded_neighbor(catalog: Arc<ItemCatalog>, rng: &mut StrandRng) -> Self {
        let mut genes: Vec<ItemId> = catalog.ids().collect();
        let size = genes.len();
        if size < 2 {
            return Self::from_permutation(catalog, genes);
        }

        let start = rng.index(size);
        let run = rng.range_inclusive(1, size - start);
        let kept = start..start + run;

        let mut rest: Vec<ItemId> = genes[..kept.start]
            .iter()
            .chain(&genes[kept.end..])
            .copied()
            .collect();
        rng.shuffle(&mut rest);

        let mut rest = rest.into_iter();
        for (pos, gene) in genes.iter_mut().enumerate() {
            if !kept.contains(&pos)
                && let Some(id) = rest.next()
            {
                *gene = id;
            }
        }

        Self::from_permutation(catalog, genes)
    }

    /// Build a strand in the requested initialization mode.
    pub fn initialize(
        catalog: Arc<ItemCatalog>,
        mode: InitializationMode,
        rng: &mut StrandRng,
    ) -> Self {
        match mode {
            InitializationMode::Random => Self::random(catalog, rng),
            InitializationMode::SeededNeighbor => Self::seeded_neighbor(catalog, rng),
        }
    }

    /// Strand with explicitly supplied genes, which are checked to be a
    /// permutation of the catalog ids.
    pub fn with_genes(catalog: Arc<ItemCatalog>, genes: Vec<ItemId>) -> Result<Self, StrandError> {
        if genes.len() != catalog.len() {
            return Err(StrandError::LengthMismatch {
                expected: catalog.len(),
                found: genes.len(),
            });
        }
        let mut seen = HashSet::with_capacity(genes.len());
        for &id in &genes {
            if !catalog.contains(id) {
                return Err(StrandError::UnknownId(id));
            }
            if !seen.insert(id) {
                return Err(StrandError::DuplicateId(id));
            }
        }
        Ok(Self::from_permutation(catalog, genes))
    }

    /// Build from genes the caller guarantees to be a permutation.
    pub(crate) fn from_permutation(catalog: Arc<ItemCatalog>, genes: Vec<ItemId>) -> Self {
        debug_assert_eq!(genes.len(), catalog.len());
        let fitness = inversion_fitness(&genes);
        Self {
            catalog,
            genes,
            fitness,
        }
    }

    /// Number of genes.
    #[inline]
    pub fn size(&self) -> usize {
        self.genes.len()
    }

    /// Gene order.
    #[inline]
    pub fn genes(&self) -> &[ItemId] {
        &self.genes
    }

    /// Fitness of the current gene order (lower is better).
    #[inline]
    pub fn fitness(&self) -> u64 {
        self.fitness
    }

    /// Catalog the genes are drawn from.
    pub fn catalog(&self) -> &Arc<ItemCatalog> {
        &self.catalog
    }

    /// Reorder the genes inside `window` with `reorder` and refresh the
    /// fitness. The window is checked against the strand bounds first.
    ///
    /// `reorder` must only permute the slice it is given.
    pub fn reorder_window<F>(&mut self, window: Range<usize>, reorder: F) -> Result<(), StrandError>
    where
        F: FnOnce(&mut [ItemId]),
    {
        if window.start > window.end || window.end > self.genes.len() {
            return Err(StrandError::WindowOutOfBounds {
                start: window.start,
                end: window.end,
                size: self.genes.len(),
            });
        }
        reorder(&mut self.genes[window]);
        debug_assert!(self.is_permutation());
        self.fitness = inversion_fitness(&self.genes);
        Ok(())
    }

    /// Whether the genes are exactly the catalog ids, each once.
    pub fn is_permutation(&self) -> bool {
        if self.genes.len() != self.catalog.len() {
            return false;
        }
        let mut seen = HashSet::with_capacity(self.genes.len());
        self.genes
            .iter()
            .all(|&id| self.catalog.contains(id) && seen.insert(id))
    }

    /// Payloads in gene order.
    pub fn ranked_items(&self) -> impl Iterator<Item = (ItemId, &str)> + '_ {
        self.genes
            .iter()
            .map(|&id| (id, self.catalog.get(id).unwrap_or_default()))
    }

    /// Convert to snapshot for serialization.
    pub fn to_snapshot(&self) -> StrandSnapshot {
        StrandSnapshot {
            genes: self.genes.clone(),
            fitness: self.fitness,
            items: self
                .ranked_items()
                .map(|(id, payload)| RankedItem {
                    id,
                    payload: payload.to_string(),
                })
                .collect(),
        }
    }
}

/// Strand construction and manipulation errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StrandError {
    #[error("Strand has {found} genes, catalog has {expected} items")]
    LengthMismatch { expected: usize, found: usize },
    #[error("Gene {0} is not part of the catalog")]
    UnknownId(ItemId),
    #[error("Gene {0} appears more than once")]
    DuplicateId(ItemId),
    #[error("Window {start}..{end} does not fit a strand of size {size}")]
    WindowOutOfBounds {
        start: usize,
        end: usize,
        size: usize,
    },
}
