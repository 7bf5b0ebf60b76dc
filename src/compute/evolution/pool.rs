//! Population and mating pool storage.

use std::sync::Arc;

use crate::schema::{InitializationMode, ItemCatalog, PoolPolicy};

use super::rng::StrandRng;
use super::strand::Strand;

/// The current generation's strands, addressed by slot.
#[derive(Debug, Clone, Default)]
pub struct Population {
    strands: Vec<Strand>,
}

impl Population {
    /// Build `size` strands from the shared catalog.
    pub fn initialize(
        catalog: &Arc<ItemCatalog>,
        size: usize,
        mode: InitializationMode,
        rng: &mut StrandRng,
    ) -> Self {
        let strands = (0..size)
            .map(|_| Strand::initialize(Arc::clone(catalog), mode, rng))
            .collect();
        Self { strands }
    }

    /// Wrap existing strands.
    pub fn from_strands(strands: Vec<Strand>) -> Self {
        Self { strands }
    }

    /// Number of slots.
    #[inline]
    pub fn len(&self) -> usize {
        self.strands.len()
    }

    /// Whether the population holds no strands.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strands.is_empty()
    }

    /// Strand in a slot.
    pub fn get(&self, slot: usize) -> Option<&Strand> {
        self.strands.get(slot)
    }

    /// All strands in slot order.
    pub fn as_slice(&self) -> &[Strand] {
        &self.strands
    }

    /// Overwrite a slot, returning the previous occupant.
    pub fn replace(&mut self, slot: usize, strand: Strand) -> Option<Strand> {
        self.strands
            .get_mut(slot)
            .map(|current| std::mem::replace(current, strand))
    }

    /// Fittest strand; ties keep the first one found.
    pub fn best(&self) -> Option<&Strand> {
        fittest(&self.strands)
    }
}

/// Selection source for one generation, refreshed from the population.
///
/// Pool entries are independent copies: mutating a population strand never
/// touches the pool and vice versa.
#[derive(Debug, Clone, Default)]
pub struct MatingPool {
    strands: Vec<Strand>,
}

impl MatingPool {
    /// Refresh the pool from the population according to `policy`.
    pub fn refresh(&mut self, population: &Population, policy: PoolPolicy) {
        match policy {
            PoolPolicy::FullReplace => {
                self.strands.clear();
                self.strands.extend(population.as_slice().iter().cloned());
            }
            PoolPolicy::ElitistPerSlot => {
                for (slot, strand) in population.as_slice().iter().enumerate() {
                    match self.strands.get_mut(slot) {
                        Some(current) if strand.fitness() < current.fitness() => {
                            *current = strand.clone();
                        }
                        Some(_) => {}
                        None => self.strands.push(strand.clone()),
                    }
                }
                self.strands.truncate(population.len());
            }
        }
    }

    /// Number of pooled strands.
    #[inline]
    pub fn len(&self) -> usize {
        self.strands.len()
    }

    /// Whether the pool is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.strands.is_empty()
    }

    /// Pooled strands in slot order.
    pub fn as_slice(&self) -> &[Strand] {
        &self.strands
    }

    /// Lowest fitness in the pool.
    pub fn best_fitness(&self) -> Option<u64> {
        self.strands.iter().map(Strand::fitness).min()
    }
}

fn fittest(strands: &[Strand]) -> Option<&Strand> {
    strands.iter().reduce(|best, candidate| {
        if candidate.fitness() < best.fitness() {
            candidate
        } else {
            best
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ItemId;

    fn catalog(n: usize) -> Arc<ItemCatalog> {
        Arc::new(ItemCatalog::enumerate((0..n).map(|i| format!("item-{i}"))))
    }

    fn strand(catalog: &Arc<ItemCatalog>, genes: &[ItemId]) -> Strand {
        Strand::with_genes(Arc::clone(catalog), genes.to_vec()).unwrap()
    }

    #[test]
    fn test_initialize_population() {
        let mut rng = StrandRng::new(42);
        let catalog = catalog(8);
        let population = Population::initialize(&catalog, 12, InitializationMode::Random, &mut rng);
        assert_eq!(population.len(), 12);
        assert!(population.as_slice().iter().all(Strand::is_permutation));

        let best = population.best().unwrap();
        let min = population.as_slice().iter().map(Strand::fitness).min().unwrap();
        assert_eq!(best.fitness(), min);
    }

    #[test]
    fn test_best_ties_keep_first() {
        let catalog = catalog(3);
        let population = Population::from_strands(vec![
            strand(&catalog, &[2, 1, 0]),
            strand(&catalog, &[0, 2, 1]),
            strand(&catalog, &[0, 2, 1]),
        ]);
        let best = population.best().unwrap();
        assert!(std::ptr::eq(best, population.get(1).unwrap()));
    }

    #[test]
    fn test_full_replace_copies_population() {
        let catalog = catalog(3);
        let mut population = Population::from_strands(vec![
            strand(&catalog, &[2, 1, 0]),
            strand(&catalog, &[0, 1, 2]),
        ]);
        let mut pool = MatingPool::default();
        pool.refresh(&population, PoolPolicy::FullReplace);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.best_fitness(), Some(population.best().unwrap().fitness()));

        // Replacing a population slot leaves the pool untouched.
        population.replace(1, strand(&catalog, &[1, 2, 0]));
        assert_eq!(pool.as_slice()[1].genes(), &[0, 1, 2]);

        pool.refresh(&population, PoolPolicy::FullReplace);
        assert_eq!(pool.as_slice()[1].genes(), &[1, 2, 0]);
    }

    #[test]
    fn test_elitist_pool_only_takes_fitter() {
        let catalog = catalog(3);
        let good = strand(&catalog, &[0, 1, 2]);
        let bad = strand(&catalog, &[2, 1, 0]);

        let mut pool = MatingPool::default();
        pool.refresh(
            &Population::from_strands(vec![good.clone(), bad.clone()]),
            PoolPolicy::ElitistPerSlot,
        );
        assert_eq!(pool.len(), 2);

        // Slot 0 gets worse, slot 1 gets better.
        pool.refresh(
            &Population::from_strands(vec![bad.clone(), good.clone()]),
            PoolPolicy::ElitistPerSlot,
        );
        assert_eq!(pool.as_slice()[0].genes(), good.genes());
        assert_eq!(pool.as_slice()[1].genes(), good.genes());
    }

    #[test]
    fn test_replace_out_of_range() {
        let catalog = catalog(2);
        let mut population = Population::from_strands(vec![strand(&catalog, &[0, 1])]);
        assert!(population.replace(3, strand(&catalog, &[1, 0])).is_none());
        assert_eq!(population.len(), 1);
    }
}
