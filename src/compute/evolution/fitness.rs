//! Inversion fitness of a gene order.
//!
//! Fitness measures how far a strand is from the catalog's ascending order.
//! It is a minimization score: lower is better, and an ascending run of ids
//! starting at zero is optimal.

use crate::schema::ItemId;

/// Inversion distance of a gene sequence.
///
/// Sums the ids of every gene except the last one, plus, for every pair
/// `i < j` with `genes[i] > genes[j]`, the difference `genes[i] - genes[j]`.
/// Runs in O(n²).
pub fn inversion_fitness(genes: &[ItemId]) -> u64 {
    let n = genes.len();
    if n == 0 {
        return 0;
    }

    let mut distance = 0u64;
    for i in 0..n - 1 {
        let gi = genes[i] as u64;
        distance += gi;
        for &gj in &genes[i + 1..] {
            let gj = gj as u64;
            if gi > gj {
                distance += gi - gj;
            }
        }
    }
    distance
}
