use rand::prelude::SliceRandom;
use rand::RngCore;

use crate::core::utils::EPS;
use crate::core::Individual;

/// Randomized k-opt local search. Repeatedly sweeps the variables, flipping each at most once per
/// sweep, and accepts the best-objective prefix of the sweep if it improves on the individual's
/// starting objective; otherwise it reverts and stops.
///
/// A sweep itself does not stop at the first non-improving flip: once every variable in the
/// current random permutation has been scanned for a strictly-positive gain, any variable left
/// unused is force-picked by largest gain (even if non-positive). This is what gives the search its
/// "k-opt" escape character — the sweep accepts one downhill move to break out of a local optimum —
/// and the `local_search_m` stagnation bound caps how many consecutive non-improving force-picks a
/// sweep tolerates before giving up on it.
///
/// This implements the spec's corrected stagnation condition (`unused > 0 && last_best <
/// local_search_m`), not the original's literal (inverted) condition, which would have exited after
/// the very first scan.
pub fn run(ind: &mut Individual, local_search_m: usize, rng: &mut dyn RngCore) {
    let n = ind.len();
    if n == 0 {
        return;
    }
    let mut perm: Vec<usize> = (0..n).collect();

    loop {
        let x_prev = ind.clone();
        let mut x_best = ind.clone();
        let mut used = vec![false; n];
        let mut g = 0.0;
        let mut g_best = 0.0;
        let mut unused = n;
        let mut last_best = 0usize;

        loop {
            last_best += 1;
            perm.shuffle(rng);
            for &p in &perm {
                if !used[p] && ind.gain(p) > EPS {
                    g += ind.gain(p);
                    ind.flip(p);
                    used[p] = true;
                    unused -= 1;
                    if g > g_best {
                        g_best = g;
                        x_best = ind.clone();
                        last_best = 0;
                    }
                }
            }
            if unused > 0 {
                let mut p = None;
                for i in 0..n {
                    if !used[i] && (p.is_none() || ind.gain(p.unwrap()) < ind.gain(i)) {
                        p = Some(i);
                    }
                }
                let p = p.expect("unused variables remain but none could be selected");
                g += ind.gain(p);
                ind.flip(p);
                used[p] = true;
                unused -= 1;
                if g > g_best {
                    g_best = g;
                    x_best = ind.clone();
                    last_best = 0;
                }
            }

            if !(unused > 0 && last_best < local_search_m) {
                break;
            }
        }

        if g_best > EPS {
            *ind = x_best;
        } else {
            *ind = x_prev;
            break;
        }
    }
}
