use std::collections::HashMap;

use crate::core::{DataStore, OError};

/// Sparse symmetric gain matrix `Q` plus the constant summand `c` of the quadratic objective
/// `f(x) = xᵀQx + c`.
///
/// The diagonal is stored densely (one entry per contig); off-diagonal entries are stored as a
/// `HashMap` per row so that [`GainMatrix::neighbors`] enumerates exactly the nonzero `Q[i][j]`,
/// giving the O(deg(i)) row access the incremental gain update in [`crate::core::Individual::flip`]
/// depends on. `Q` is built once by [`GainMatrix::build`] and never mutated afterwards, so it may be
/// shared freely (behind an `Arc`) across parallel workers.
#[derive(Debug)]
pub struct GainMatrix {
    n: usize,
    diag: Vec<f64>,
    off: Vec<HashMap<usize, f64>>,
    constant: f64,
}

impl GainMatrix {
    /// Build the gain matrix from a [`DataStore`]. Each link contributes symmetrically to both
    /// `Q[i][j]` and `Q[j][i]`:
    /// - `equal_orientation = true`: `Q[i][i] -= w`, `Q[j][j] -= w`, `Q[i][j] += w`, `c += w`.
    /// - `equal_orientation = false`: `Q[i][i] += w`, `Q[j][j] += w`, `Q[i][j] -= w`.
    ///
    /// This is algebraically identical to accumulating `2w` into a single `(i, j)` slot per link
    /// and then averaging `(Q[i][j] + Q[j][i]) / 2` in a second pass, since the paired slot starts
    /// at zero; writing both slots directly at construction time folds the two passes into one.
    /// Multiple links over the same contig pair are summed, since every link is applied in turn.
    pub fn build(store: &DataStore) -> Result<Self, OError> {
        let n = store.contig_count();
        let mut diag = vec![0.0; n];
        let mut off: Vec<HashMap<usize, f64>> = (0..n).map(|_| HashMap::new()).collect();
        let mut constant = 0.0;

        for link in store.links() {
            let (i, j, w) = (link.i, link.j, link.weight);
            if link.equal_orientation {
                diag[i] -= w;
                diag[j] -= w;
                *off[i].entry(j).or_insert(0.0) += w;
                *off[j].entry(i).or_insert(0.0) += w;
                constant += w;
            } else {
                diag[i] += w;
                diag[j] += w;
                *off[i].entry(j).or_insert(0.0) -= w;
                *off[j].entry(i).or_insert(0.0) -= w;
            }
        }

        Ok(Self {
            n,
            diag,
            off,
            constant,
        })
    }

    /// The number of contigs `n`.
    pub fn n(&self) -> usize {
        self.n
    }

    /// The constant summand `c` (`Q[n][n]` in the spec's `(n+1)x(n+1)` framing).
    pub fn constant(&self) -> f64 {
        self.constant
    }

    /// `Q[i][i]`.
    pub fn diagonal(&self, i: usize) -> f64 {
        self.diag[i]
    }

    /// `Q[i][j]` for any `i, j`, including `i == j`.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        if i == j {
            self.diag[i]
        } else {
            self.off[i].get(&j).copied().unwrap_or(0.0)
        }
    }

    /// `Pos[i] \ {i}`: the indices `j != i` with `Q[i][j] != 0`, in O(deg(i)).
    pub fn neighbors(&self, i: usize) -> impl Iterator<Item = usize> + '_ {
        self.off[i].keys().copied()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::Link;
    use float_cmp::assert_approx_eq;

    fn store(n: usize, links: &[(usize, usize, f64, bool)]) -> DataStore {
        let mut store = DataStore::new(n);
        for &(i, j, w, eq) in links {
            store.add_link(Link::new(i, j, w, eq).unwrap()).unwrap();
        }
        store
    }

    #[test]
    /// Scenario S1 from the spec: n=2, one equal-orientation link of weight 1.
    fn test_s1_trivial() {
        let q = GainMatrix::build(&store(2, &[(0, 1, 1.0, true)])).unwrap();
        assert_approx_eq!(f64, q.get(0, 0), -1.0);
        assert_approx_eq!(f64, q.get(1, 1), -1.0);
        assert_approx_eq!(f64, q.get(0, 1), 1.0);
        assert_approx_eq!(f64, q.get(1, 0), 1.0);
        assert_approx_eq!(f64, q.constant(), 1.0);
    }

    #[test]
    /// Q must be symmetric and Q[n][n] equal the sum of equal-orientation link weights.
    fn test_symmetry_and_constant() {
        let q = GainMatrix::build(&store(
            3,
            &[(0, 1, 1.0, true), (1, 2, 2.0, true), (0, 2, 1.5, false)],
        ))
        .unwrap();
        for i in 0..3 {
            for j in 0..3 {
                assert_approx_eq!(f64, q.get(i, j), q.get(j, i));
            }
        }
        assert_approx_eq!(f64, q.constant(), 3.0);
    }

    #[test]
    /// Multiple links over the same pair accumulate additively.
    fn test_duplicate_links_accumulate() {
        let q = GainMatrix::build(&store(2, &[(0, 1, 1.0, true), (0, 1, 2.0, true)])).unwrap();
        assert_approx_eq!(f64, q.get(0, 1), 3.0);
        assert_approx_eq!(f64, q.constant(), 3.0);
    }

    #[test]
    fn test_empty_store() {
        let q = GainMatrix::build(&DataStore::new(0)).unwrap();
        assert_eq!(q.n(), 0);
        assert_approx_eq!(f64, q.constant(), 0.0);
    }
}
