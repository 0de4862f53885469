//! Pairwise-independent hash family mapping node identifiers into `[0, B)`.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// `r` independent affine hashes `h_i(x) = (x*a_i + b_i) mod b`, each
/// mapping an arbitrary node id into one of `b` buckets.
///
/// `a_i` is drawn from `[1, b)` so that the hash behaves like a
/// permutation of the residues rather than collapsing everything into a
/// single bucket; `b_i` is drawn from `[0, b)`. Coefficients are fixed at
/// construction and never change afterwards.
#[derive(Debug, Clone)]
pub struct HashFamily {
    buckets: i64,
    coeff_a: Vec<i64>,
    coeff_b: Vec<i64>,
}

impl HashFamily {
    /// Builds a family of `rows` hash functions onto `[0, buckets)`.
    ///
    /// `seed` fixes the coefficients for reproducibility; without one,
    /// coefficients are drawn from the thread-local RNG.
    pub fn new(rows: usize, buckets: usize, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        let b = buckets as i64;
        let coeff_a = (0..rows).map(|_| rng.gen_range(1..b)).collect();
        let coeff_b = (0..rows).map(|_| rng.gen_range(0..b)).collect();
        HashFamily {
            buckets: b,
            coeff_a,
            coeff_b,
        }
    }

    pub fn rows(&self) -> usize {
        self.coeff_a.len()
    }

    pub fn buckets(&self) -> usize {
        self.buckets as usize
    }

    /// Maps `x` into `[0, buckets)` under the `i`-th hash function.
    pub fn hash(&self, x: u64, i: usize) -> usize {
        let x = x as i64;
        let residue = x
            .wrapping_mul(self.coeff_a[i])
            .wrapping_add(self.coeff_b[i])
            % self.buckets;
        (if residue < 0 {
            residue + self.buckets
        } else {
            residue
        }) as usize
    }
}
