//! Similarity-based crossover.
//!
//! Parents are not required to carry the same ids, so positional crossover
//! does not apply. Only the ids both parents share take part:
//!
//! 1. the common ids are listed in parent A's order (`sub_a`) and in
//!    parent B's order (`sub_b`);
//! 2. a binary template over the common ids keeps `sub_a[i]` where the bit
//!    is set and leaves a hole elsewhere;
//! 3. holes are filled with the dropped ids in the order they appear in
//!    `sub_b` (order-crossover fill);
//! 4. the recombined sequence is written back over the common-id positions
//!    of parent A and of parent B, giving two candidates;
//! 5. the fitter candidate is the child.

use std::collections::HashSet;

use crate::schema::{ConfigError, CrossoverMethod, ItemId};

use super::rng::StrandRng;
use super::strand::Strand;

/// Produces one child from a pair of parents.
pub trait CrossoverOperator: Send + Sync {
    /// Recombine two parents into a child.
    fn crossover(&self, first: &Strand, second: &Strand, rng: &mut StrandRng) -> Strand;
}

/// Uniform crossover over the genes both parents share.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimilarityCrossover {
    /// Share (0-100) of the template that gets random bits; the rest keeps
    /// parent A's genes. All bits are random when unset.
    pub section_pct: Option<u8>,
}

impl SimilarityCrossover {
    /// Create with an optional section percentage.
    pub fn new(section_pct: Option<u8>) -> Self {
        Self { section_pct }
    }
}

impl CrossoverOperator for SimilarityCrossover {
    fn crossover(&self, first: &Strand, second: &Strand, rng: &mut StrandRng) -> Strand {
        let (sub_a, sub_b) = common_subsequences(first.genes(), second.genes());
        if sub_a.is_empty() {
            return fitter(first, second).clone();
        }

        let template = crossover_template(sub_a.len(), self.section_pct, rng);
        let sub_child = recombine(&sub_a, &sub_b, &template);

        let genes_a = splice(first.genes(), &sub_child, &sub_a);
        let genes_b = splice(second.genes(), &sub_child, &sub_b);

        let child_a = Strand::from_permutation(first.catalog().clone(), genes_a);
        let child_b = Strand::from_permutation(second.catalog().clone(), genes_b);

        if child_a.fitness() < child_b.fitness() {
            child_a
        } else {
            child_b
        }
    }
}

/// Build the crossover operator for a configured method. Reserved methods
/// are rejected.
pub fn build_crossover(
    method: CrossoverMethod,
    section_pct: Option<u8>,
) -> Result<Box<dyn CrossoverOperator>, ConfigError> {
    match method {
        CrossoverMethod::Similarity => Ok(Box::new(SimilarityCrossover::new(section_pct))),
        CrossoverMethod::UserCurated => Err(ConfigError::Unsupported {
            kind: "crossover",
            variant: method.to_string(),
        }),
    }
}

/// Fitter of two strands; ties go to the first.
fn fitter<'a>(first: &'a Strand, second: &'a Strand) -> &'a Strand {
    if second.fitness() < first.fitness() {
        second
    } else {
        first
    }
}

/// The ids present in both gene sequences, in A's order and in B's order.
pub fn common_subsequences(a: &[ItemId], b: &[ItemId]) -> (Vec<ItemId>, Vec<ItemId>) {
    let in_a: HashSet<ItemId> = a.iter().copied().collect();
    let in_b: HashSet<ItemId> = b.iter().copied().collect();
    let sub_a = a.iter().copied().filter(|id| in_b.contains(id)).collect();
    let sub_b = b.iter().copied().filter(|id| in_a.contains(id)).collect();
    (sub_a, sub_b)
}

/// Binary template over `len` common genes; `true` keeps parent A's gene.
///
/// With a section percentage, only a random contiguous section of
/// `round(len * pct / 100)` bits is randomized and every other bit is set.
pub fn crossover_template(len: usize, section_pct: Option<u8>, rng: &mut StrandRng) -> Vec<bool> {
    match section_pct {
        Some(pct) => {
            let mut template = vec![true; len];
            let section = ((len * pct.min(100) as usize) as f64 / 100.0).round() as usize;
            let section = section.min(len);
            if section > 0 {
                let start = rng.range_inclusive(0, len - section);
                for bit in &mut template[start..start + section] {
                    *bit = rng.bit();
                }
            }
            template
        }
        None => (0..len).map(|_| rng.bit()).collect(),
    }
}

/// Recombine the common subsequences following `template`.
///
/// Set bits keep `sub_a`'s gene in place; the dropped genes fill the holes
/// in the order they appear in `sub_b`. The result is a permutation of
/// `sub_a`.
pub fn recombine(sub_a: &[ItemId], sub_b: &[ItemId], template: &[bool]) -> Vec<ItemId> {
    debug_assert_eq!(sub_a.len(), template.len());

    let dropped: HashSet<ItemId> = sub_a
        .iter()
        .zip(template)
        .filter(|(_, keep)| !**keep)
        .map(|(id, _)| *id)
        .collect();
    let mut fill = sub_b.iter().copied().filter(|id| dropped.contains(id));

    sub_a
        .iter()
        .zip(template)
        .map(|(&id, &keep)| {
            if keep {
                id
            } else {
                // `fill` yields exactly one id per hole.
                fill.next().unwrap_or(id)
            }
        })
        .collect()
}

/// Write `sub_child` over the positions `parent` holds the ids of `sub` at.
///
/// `sub` must list those ids in `parent`'s order, so the k-th matching
/// position receives `sub_child[k]`.
pub fn splice(parent: &[ItemId], sub_child: &[ItemId], sub: &[ItemId]) -> Vec<ItemId> {
    let members: HashSet<ItemId> = sub.iter().copied().collect();
    let mut replacement = sub_child.iter().copied();
    parent
        .iter()
        .map(|&id| {
            if members.contains(&id) {
                replacement.next().unwrap_or(id)
            } else {
                id
            }
        })
        .collect()
}
