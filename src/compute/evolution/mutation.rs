//! Window mutations: scramble and inversion.

use std::ops::Range;

use crate::schema::MutationMethod;

use super::rng::StrandRng;
use super::strand::Strand;

/// Perturbs a single strand in place.
pub trait MutationOperator: Send + Sync {
    /// Possibly mutate `strand`. Returns whether its genes were reordered.
    fn mutate(&self, strand: &mut Strand, rng: &mut StrandRng) -> bool;
}

/// Shuffles the genes of a random window.
#[derive(Debug, Clone, Copy)]
pub struct ScrambleMutation {
    /// Probability (0.0-1.0) of mutating at all.
    pub rate: f64,
    /// Window length as a share (0-100) of the strand; random when unset.
    pub window_pct: Option<u8>,
}

/// Reverses the genes of a random window.
#[derive(Debug, Clone, Copy)]
pub struct InversionMutation {
    /// Probability (0.0-1.0) of mutating at all.
    pub rate: f64,
    /// Window length as a share (0-100) of the strand; random when unset.
    pub window_pct: Option<u8>,
}

impl MutationOperator for ScrambleMutation {
    fn mutate(&self, strand: &mut Strand, rng: &mut StrandRng) -> bool {
        let Some(window) = gated_window(strand.size(), self.rate, self.window_pct, rng) else {
            return false;
        };
        apply(strand, window, |genes| rng.shuffle(genes))
    }
}

impl MutationOperator for InversionMutation {
    fn mutate(&self, strand: &mut Strand, rng: &mut StrandRng) -> bool {
        let Some(window) = gated_window(strand.size(), self.rate, self.window_pct, rng) else {
            return false;
        };
        apply(strand, window, |genes| genes.reverse())
    }
}

/// Build the mutation operator for a configured method.
pub fn build_mutation(
    method: MutationMethod,
    rate: f64,
    window_pct: Option<u8>,
) -> Box<dyn MutationOperator> {
    match method {
        MutationMethod::Scramble => Box::new(ScrambleMutation { rate, window_pct }),
        MutationMethod::Inversion => Box::new(InversionMutation { rate, window_pct }),
    }
}

/// Window of a strand of `size` genes to mutate.
///
/// The length is `floor(size * pct / 100)` when a percentage is given and
/// uniform in `1..=size-1` otherwise; the start is uniform over every
/// position that keeps the window inside the strand. Returns `None` for a
/// zero-length window.
pub fn mutation_window(
    size: usize,
    window_pct: Option<u8>,
    rng: &mut StrandRng,
) -> Option<Range<usize>> {
    let len = match window_pct {
        Some(pct) => size * pct.min(100) as usize / 100,
        None if size > 1 => rng.range_inclusive(1, size - 1),
        None => size,
    };
    if len == 0 {
        return None;
    }
    let start = rng.range_inclusive(0, size - len);
    Some(start..start + len)
}

/// Mutation gate then window: mutate when a uniform draw falls below `rate`.
fn gated_window(
    size: usize,
    rate: f64,
    window_pct: Option<u8>,
    rng: &mut StrandRng,
) -> Option<Range<usize>> {
    if rng.unit() >= rate {
        return None;
    }
    mutation_window(size, window_pct, rng)
}

fn apply<F>(strand: &mut Strand, window: Range<usize>, reorder: F) -> bool
where
    F: FnOnce(&mut [crate::schema::ItemId]),
{
    match strand.reorder_window(window, reorder) {
        Ok(()) => true,
        Err(err) => {
            log::warn!("Skipping mutation: {err}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ItemCatalog, ItemId};
    use proptest::prelude::*;
    use std::sync::Arc;

    fn catalog(n: usize) -> Arc<ItemCatalog> {
        Arc::new(ItemCatalog::enumerate((0..n).map(|i| format!("item-{i}"))))
    }

    fn ascending(n: usize) -> Strand {
        Strand::with_genes(catalog(n), (0..n as ItemId).collect()).unwrap()
    }

    #[test]
    fn test_zero_rate_never_mutates() {
        let mut rng = StrandRng::new(3);
        let mut strand = ascending(10);
        let operator = ScrambleMutation {
            rate: 0.0,
            window_pct: Some(100),
        };
        for _ in 0..100 {
            assert!(!operator.mutate(&mut strand, &mut rng));
        }
        assert_eq!(strand.genes(), ascending(10).genes());
    }

    #[test]
    fn test_full_window_scramble_keeps_permutation() {
        let mut rng = StrandRng::new(5);
        let mut strand = ascending(12);
        let operator = ScrambleMutation {
            rate: 1.0,
            window_pct: Some(100),
        };
        assert!(operator.mutate(&mut strand, &mut rng));
        assert!(strand.is_permutation());
        assert_eq!(strand.size(), 12);
        assert_eq!(
            strand.fitness(),
            crate::compute::evolution::inversion_fitness(strand.genes())
        );
    }

    #[test]
    fn test_inversion_reverses_window() {
        let mut rng = StrandRng::new(5);
        let mut strand = ascending(6);
        let operator = InversionMutation {
            rate: 1.0,
            window_pct: Some(100),
        };
        assert!(operator.mutate(&mut strand, &mut rng));
        assert_eq!(strand.genes(), &[5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_window_bounds() {
        let mut rng = StrandRng::new(17);
        for _ in 0..200 {
            let window = mutation_window(10, None, &mut rng).unwrap();
            assert!(!window.is_empty() && window.len() <= 9);
            assert!(window.end <= 10);

            let window = mutation_window(10, Some(50), &mut rng).unwrap();
            assert_eq!(window.len(), 5);
            assert!(window.end <= 10);
        }
        assert!(mutation_window(10, Some(5), &mut rng).is_none());
        assert_eq!(mutation_window(1, None, &mut rng), Some(0..1));
    }

    proptest! {
        #[test]
        fn prop_mutation_only_touches_window(
            seed in any::<u64>(),
            size in 1usize..50,
            pct in proptest::option::of(0u8..=100),
        ) {
            let mut rng = StrandRng::new(seed);
            let mut strand = Strand::random(catalog(size), &mut rng);
            let before = strand.genes().to_vec();

            // Replay the operator's draws to learn which window it picks.
            let mut probe = rng.clone();
            probe.unit();
            let window = mutation_window(size, pct, &mut probe);

            let operator = ScrambleMutation { rate: 1.0, window_pct: pct };
            operator.mutate(&mut strand, &mut rng);

            prop_assert!(strand.is_permutation());
            prop_assert_eq!(strand.size(), size);
            if let Some(window) = window {
                for (i, (old, new)) in before.iter().zip(strand.genes()).enumerate() {
                    if !window.contains(&i) {
                        prop_assert_eq!(old, new);
                    }
                }
            } else {
                prop_assert_eq!(&before[..], strand.genes());
            }
        }
    }
}
