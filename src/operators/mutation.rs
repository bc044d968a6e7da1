use rand::prelude::SliceRandom;
use rand::RngCore;

use crate::core::Individual;

/// Flip `⌊n/3⌋` variables chosen from a uniform random permutation of all variables, with no gain
/// filter. Used only by the solver's restart step to perturb a stagnating individual.
pub fn mutate(ind: &mut Individual, rng: &mut dyn RngCore) {
    let n = ind.len();
    let vars = n / 3;
    let mut perm: Vec<usize> = (0..n).collect();
    perm.shuffle(rng);
    for &p in perm.iter().take(vars) {
        ind.flip(p);
    }
}
