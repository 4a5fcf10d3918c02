//! Benchmarks for the sensor range proof stack
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench -p benches
//! ```
//!
//! Or run specific benchmarks:
//! ```bash
//! cargo bench -p benches --bench range_proof
//! cargo bench -p benches --bench ipa
//! ```

use bulletproofs_core::GeneratorSet;
use curve25519_dalek::scalar::Scalar;
use rand::{CryptoRng, RngCore};

/// Bit lengths exercised by every group
pub const BIT_LENGTHS: [usize; 4] = [8, 16, 32, 64];

/// Largest value representable in `bit_length` bits
pub fn max_value(bit_length: usize) -> u64 {
    if bit_length >= 64 {
        u64::MAX
    } else {
        (1u64 << bit_length) - 1
    }
}

pub fn random_scalars<R: RngCore + CryptoRng>(rng: &mut R, n: usize) -> Vec<Scalar> {
    (0..n).map(|_| Scalar::random(rng)).collect()
}

/// Generators for each benchmarked bit length, derived up front
pub fn generator_sets() -> Vec<GeneratorSet> {
    BIT_LENGTHS.iter().map(|&n| GeneratorSet::new(n)).collect()
}
