//! Scalar vector helpers shared by the prover and verifier

use crate::{BulletproofsError, BulletproofsResult};
use curve25519_dalek::scalar::Scalar;

/// Compute powers of a scalar: [1, x, x^2, x^3, ..., x^(n-1)]
pub fn scalar_powers(x: &Scalar, n: usize) -> Vec<Scalar> {
    let mut powers = Vec::with_capacity(n);
    let mut current = Scalar::ONE;

    for _ in 0..n {
        powers.push(current);
        current *= x;
    }

    powers
}

/// Σ_{i<n} x^i
pub fn sum_of_powers(x: &Scalar, n: usize) -> Scalar {
    scalar_powers(x, n).iter().sum()
}

/// Compute the inner product of two scalar vectors
pub fn inner_product(a: &[Scalar], b: &[Scalar]) -> BulletproofsResult<Scalar> {
    if a.len() != b.len() {
        return Err(BulletproofsError::VectorLengthMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    Ok(a.iter().zip(b.iter()).map(|(ai, bi)| ai * bi).sum())
}

/// Signed integer as a scalar, negatives mapping to `ℓ − |v|`
pub fn scalar_from_i64(value: i64) -> Scalar {
    let magnitude = Scalar::from(value.unsigned_abs());
    if value < 0 {
        -magnitude
    } else {
        magnitude
    }
}

/// Little-endian bit decomposition of `value` into `bits` scalars
pub fn bit_decomposition(value: u64, bits: usize) -> Vec<Scalar> {
    (0..bits)
        .map(|i| {
            let bit = if i < 64 { (value >> i) & 1 } else { 0 };
            Scalar::from(bit)
        })
        .collect()
}

/// Whether `value` fits in `bits` bits
pub fn fits_in_bits(value: u64, bits: usize) -> bool {
    bits >= 64 || value >> bits == 0
}

/// `2^n − 1` as a scalar, computed without overflowing for `n = 64`
pub fn max_value_scalar(bits: usize) -> Scalar {
    sum_of_powers(&Scalar::from(2u64), bits)
}

/// `δ(y, z) = (z − z²)·Σ y^i − z³·Σ 2^i`.
///
/// Prover-side consistency checks and the verifier's main equation both call
/// this one function.
pub fn delta(y: &Scalar, z: &Scalar, n: usize) -> Scalar {
    let z2 = z * z;
    let z3 = z2 * z;
    (z - z2) * sum_of_powers(y, n) - z3 * max_value_scalar(n)
}
