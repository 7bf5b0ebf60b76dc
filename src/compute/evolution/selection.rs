//! Parent selection from the mating pool.

use crate::schema::{ConfigError, SelectionMethod};

use super::rng::StrandRng;
use super::strand::Strand;

/// Picks a pair of parents from the mating pool.
pub trait ParentSelector: Send + Sync {
    /// Returns two parents, or `None` if the pool is empty. Both may be the
    /// same strand.
    fn select_pair<'a>(
        &self,
        pool: &'a [Strand],
        rng: &mut StrandRng,
    ) -> Option<(&'a Strand, &'a Strand)>;
}

/// Two uniform draws with replacement.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomSelection;

impl ParentSelector for RandomSelection {
    fn select_pair<'a>(
        &self,
        pool: &'a [Strand],
        rng: &mut StrandRng,
    ) -> Option<(&'a Strand, &'a Strand)> {
        if pool.is_empty() {
            return None;
        }
        let first = &pool[rng.index(pool.len())];
        let second = &pool[rng.index(pool.len())];
        Some((first, second))
    }
}

/// Two binary tournaments; each keeps the fitter of a random pair.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinaryTournament;

impl BinaryTournament {
    fn round<'a>(pool: &'a [Strand], rng: &mut StrandRng) -> &'a Strand {
        let a = &pool[rng.index(pool.len())];
        let b = &pool[rng.index(pool.len())];
        // Minimization; a tie goes to the second draw.
        if a.fitness() < b.fitness() { a } else { b }
    }
}

impl ParentSelector for BinaryTournament {
    fn select_pair<'a>(
        &self,
        pool: &'a [Strand],
        rng: &mut StrandRng,
    ) -> Option<(&'a Strand, &'a Strand)> {
        if pool.is_empty() {
            return None;
        }
        let first = Self::round(pool, rng);
        let second = Self::round(pool, rng);
        Some((first, second))
    }
}

/// Build the selector for a configured method. Reserved methods are rejected.
pub fn build_selector(method: SelectionMethod) -> Result<Box<dyn ParentSelector>, ConfigError> {
    match method {
        SelectionMethod::Random => Ok(Box::new(RandomSelection)),
        SelectionMethod::BinaryTournament => Ok(Box::new(BinaryTournament)),
        SelectionMethod::UserCurated | SelectionMethod::Relational => {
            Err(ConfigError::Unsupported {
                kind: "selection",
                variant: method.to_string(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ItemCatalog, ItemId};
    use std::sync::Arc;

    fn pool(orders: &[&[ItemId]]) -> Vec<Strand> {
        let catalog = Arc::new(ItemCatalog::enumerate(
            (0..orders[0].len()).map(|i| format!("item-{i}")),
        ));
        orders
            .iter()
            .map(|genes| Strand::with_genes(Arc::clone(&catalog), genes.to_vec()).unwrap())
            .collect()
    }

    #[test]
    fn test_random_single_strand_pool() {
        let pool = pool(&[&[1, 0, 2]]);
        let mut rng = StrandRng::new(5);
        for _ in 0..10 {
            let (a, b) = RandomSelection.select_pair(&pool, &mut rng).unwrap();
            assert!(std::ptr::eq(a, &pool[0]));
            assert!(std::ptr::eq(b, &pool[0]));
        }
    }

    #[test]
    fn test_empty_pool() {
        let mut rng = StrandRng::new(5);
        assert!(RandomSelection.select_pair(&[], &mut rng).is_none());
        assert!(BinaryTournament.select_pair(&[], &mut rng).is_none());
    }

    /// Replays the four index draws of one tournament pair.
    fn replay_draws(rng: &StrandRng, len: usize) -> [usize; 4] {
        let mut replay = rng.clone();
        [
            replay.index(len),
            replay.index(len),
            replay.index(len),
            replay.index(len),
        ]
    }

    #[test]
    fn test_tournament_returns_fitter_of_each_pair() {
        let pool = pool(&[&[0, 1, 2, 3], &[3, 2, 1, 0], &[1, 0, 2, 3], &[2, 3, 0, 1]]);
        let mut rng = StrandRng::new(11);
        for _ in 0..200 {
            let [a1, b1, a2, b2] = replay_draws(&rng, pool.len());
            let (first, second) = BinaryTournament.select_pair(&pool, &mut rng).unwrap();

            let winner = |a: usize, b: usize| {
                if pool[a].fitness() < pool[b].fitness() { a } else { b }
            };
            assert!(std::ptr::eq(first, &pool[winner(a1, b1)]));
            assert!(std::ptr::eq(second, &pool[winner(a2, b2)]));
        }
    }

    #[test]
    fn test_tournament_tie_keeps_second_draw() {
        // Identical gene orders, so every pair is a tie.
        let pool = pool(&[&[2, 0, 1], &[2, 0, 1], &[2, 0, 1]]);
        let mut rng = StrandRng::new(23);
        for _ in 0..50 {
            let [_, b1, _, b2] = replay_draws(&rng, pool.len());
            let (first, second) = BinaryTournament.select_pair(&pool, &mut rng).unwrap();
            assert!(std::ptr::eq(first, &pool[b1]));
            assert!(std::ptr::eq(second, &pool[b2]));
        }
    }

    #[test]
    fn test_build_selector_rejects_reserved() {
        assert!(build_selector(SelectionMethod::Random).is_ok());
        assert!(build_selector(SelectionMethod::BinaryTournament).is_ok());
        assert!(build_selector(SelectionMethod::UserCurated).is_err());
        assert!(build_selector(SelectionMethod::Relational).is_err());
    }
}
