use std::sync::Arc;

use rand::RngCore;

use crate::core::utils::EPS;
use crate::core::{GainMatrix, Individual};

/// Produces a fresh individual by randomized sequential fixing of variables, biased toward the
/// larger of the two "fix-to-0" vs. "fix-to-1" marginal gains at each step. Runs in O(n²) worst
/// case: each of the `n` fixing steps scans the `n` still-unfixed variables for the current best
/// `g0`/`g1` candidate.
pub struct GreedyInitializer {
    matrix: Arc<GainMatrix>,
    n: usize,
    gain_zero: Vec<f64>,
    gain_one: Vec<f64>,
    fixed: Vec<Option<bool>>,
    unset: usize,
}

impl GreedyInitializer {
    /// Create a new initializer and compute the initial marginal gains assuming every variable is
    /// unfixed (`x[i] = 0.5`):
    /// `g0[i] = -0.25·Q[i][i] - 0.5·Σ_{j∈Pos[i]} Q[i][j]`,
    /// `g1[i] = +0.75·Q[i][i] + 0.5·Σ_{j∈Pos[i]} Q[i][j]`.
    pub fn new(matrix: Arc<GainMatrix>) -> Self {
        let n = matrix.n();
        let mut gain_zero = vec![0.0; n];
        let mut gain_one = vec![0.0; n];

        for i in 0..n {
            gain_zero[i] = -0.25 * matrix.diagonal(i);
            gain_one[i] = 0.75 * matrix.diagonal(i);
            for j in matrix.neighbors(i) {
                gain_zero[i] -= 0.5 * matrix.get(i, j);
                gain_one[i] += 0.5 * matrix.get(i, j);
            }
        }

        Self {
            matrix,
            n,
            gain_zero,
            gain_one,
            fixed: vec![None; n],
            unset: n,
        }
    }

    /// Apply the marginal-gain update to every neighbor of `k` after `k` is fixed to `value`.
    fn update_gains(&mut self, k: usize, value: bool) {
        let sign = if value { 1.0 } else { -1.0 };
        for i in self.matrix.neighbors(k) {
            let qik = self.matrix.get(i, k);
            self.gain_zero[i] -= sign * 0.5 * qik;
            self.gain_one[i] += sign * 0.5 * qik;
        }
    }

    fn fix(&mut self, k: usize, value: bool, rng: &mut dyn RngCore) {
        let _ = rng; // fixing order itself is driven by the caller's random decisions
        self.update_gains(k, value);
        self.fixed[k] = Some(value);
        self.unset -= 1;
    }

    /// Produce a complete individual by repeatedly fixing the most attractive remaining variable,
    /// with a randomized tie-break between the best "fix-to-0" and "fix-to-1" candidates. The very
    /// first variable is fixed by an unbiased coin flip (the "bootstrap" step) to break the
    /// symmetry that would otherwise make every run collapse onto the same assignment.
    pub fn make_solution(mut self, rng: &mut dyn RngCore) -> Individual {
        if self.n > 0 {
            let k = (rng.next_u64() as usize) % self.n;
            let value = rng.next_u64() % 2 == 0;
            self.fix(k, value, rng);

            while self.unset > 0 {
                let mut k0 = None;
                let mut k1 = None;
                for i in 0..self.n {
                    if self.fixed[i].is_some() {
                        continue;
                    }
                    if k0.is_none() || self.gain_zero[i] > self.gain_zero[k0.unwrap()] {
                        k0 = Some(i);
                    }
                    if k1.is_none() || self.gain_one[i] > self.gain_one[k1.unwrap()] {
                        k1 = Some(i);
                    }
                }
                let k0 = k0.unwrap();
                let k1 = k1.unwrap();
                let sum = self.gain_zero[k0] + self.gain_one[k1];
                let p = if sum < EPS { 0.5 } else { self.gain_zero[k0] / sum };

                if (rng.next_u64() as f64 / u64::MAX as f64) < p {
                    self.fix(k0, false, rng);
                } else {
                    self.fix(k1, true, rng);
                }
            }
        }

        let bits: Vec<bool> = self.fixed.iter().map(|v| v.unwrap_or(false)).collect();
        Individual::from_bits(self.matrix.clone(), bits)
    }
}

/// Entry point used by the solver: build a fresh individual over `matrix`.
pub fn initialize(matrix: Arc<GainMatrix>, rng: &mut dyn RngCore) -> Individual {
    GreedyInitializer::new(matrix).make_solution(rng)
}
