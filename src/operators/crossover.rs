use rand::prelude::SliceRandom;
use rand::RngCore;

use crate::core::utils::EPS;
use crate::core::Individual;

/// "Innovative crossover": produce one offspring from two parents by inheriting their agreeing
/// bits, then resolving disagreements biased toward improving flips, periodically perturbing an
/// agreed bit for diversification.
///
/// Starting from `offspring = copy(p1)`, indices are partitioned into `eq` (where both parents
/// agree) and `neq` (where they disagree). The resolution loop runs for exactly the initial size of
/// `neq` rounds — matching the original driver, which bounds the loop by the disagreement count
/// rather than looping until `neq` is empty, so a round that finds no improving `neq` candidate
/// still consumes one of the bounded iterations instead of spinning on a disagreement with no
/// positive-gain side. Each round:
/// 1. shuffles `neq` and flips the first remaining index with `gain > ε`, removing it from `neq`;
/// 2. if `eq` is non-empty, flips the `eq` index with the largest gain unconditionally (even if
///    non-positive) and removes it from `eq`.
pub fn innovative_crossover(p1: &Individual, p2: &Individual, rng: &mut dyn RngCore) -> Individual {
    let mut offspring = p1.clone();
    let n = p1.len();

    let mut eq = Vec::with_capacity(n);
    let mut neq = Vec::with_capacity(n);
    for i in 0..n {
        if p1.bits()[i] == p2.bits()[i] {
            eq.push(i);
        } else {
            neq.push(i);
        }
    }

    let rounds = neq.len();
    for _ in 0..rounds {
        neq.shuffle(rng);
        if let Some(pos) = (0..neq.len()).find(|&j| offspring.gain(neq[j]) > EPS) {
            offspring.flip(neq[pos]);
            let last = neq.len() - 1;
            neq.swap(pos, last);
            neq.pop();
        }

        if !eq.is_empty() {
            let mut best = 0;
            for j in 1..eq.len() {
                if offspring.gain(eq[best]) < offspring.gain(eq[j]) {
                    best = j;
                }
            }
            offspring.flip(eq[best]);
            let last = eq.len() - 1;
            eq.swap(best, last);
            eq.pop();
        }
    }

    offspring
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::utils::get_rng;
    use crate::core::{DataStore, GainMatrix, Individual, Link};
    use std::sync::Arc;

    fn matrix(n: usize, links: &[(usize, usize, f64, bool)]) -> Arc<GainMatrix> {
        let mut store = DataStore::new(n);
        for &(i, j, w, eq) in links {
            store.add_link(Link::new(i, j, w, eq).unwrap()).unwrap();
        }
        Arc::new(GainMatrix::build(&store).unwrap())
    }

    #[test]
    /// Identical parents produce an offspring identical to both (neq is empty, nothing to resolve).
    fn test_identical_parents_produce_same_offspring() {
        let m = matrix(3, &[(0, 1, 1.0, true), (1, 2, 1.0, false)]);
        let p1 = Individual::from_bits(m.clone(), vec![true, false, true]);
        let p2 = Individual::from_bits(m, vec![true, false, true]);
        let mut rng = get_rng(Some(1));
        let offspring = innovative_crossover(&p1, &p2, &mut *rng);
        assert_eq!(offspring.bits(), p1.bits());
    }

    #[test]
    /// Offspring objective must match a from-scratch recomputation (caches stay consistent).
    fn test_offspring_caches_consistent() {
        let m = matrix(
            5,
            &[
                (0, 1, 1.0, true),
                (1, 2, 2.0, false),
                (2, 3, 1.5, true),
                (3, 4, 1.0, false),
            ],
        );
        let p1 = Individual::from_bits(m.clone(), vec![true, false, true, false, true]);
        let p2 = Individual::from_bits(m, vec![false, false, true, true, false]);
        let mut rng = get_rng(Some(5));
        let offspring = innovative_crossover(&p1, &p2, &mut *rng);
        let fresh = offspring.recompute_from_scratch();
        assert!((offspring.objective() - fresh.objective()).abs() < 1e-9);
    }
}
