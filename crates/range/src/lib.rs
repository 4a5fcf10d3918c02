//! # Sensor Range Proofs
//!
//! Zero-knowledge proofs that a committed sensor reading lies in a public
//! interval, without revealing the reading.
//!
//! ## Mathematical Background
//!
//! A range proof for value `v` in `[0, 2^n)` works by:
//!
//! 1. **Bit Decomposition**: `a_L` holds the bits of `v` and `a_R = a_L − 1`, so
//!    `a_L ∘ a_R = 0` and `<a_L, 2^n> = v`
//! 2. **Vector Commitments**: `A` commits to `a_L, a_R`; `S` to blinding vectors
//! 3. **Polynomial Check**: `t(X) = <l(X), r(X)>` has constant term
//!    `z²·v + δ(y,z)`, committed through `T1`, `T2`
//! 4. **Inner Product Argument**: compresses `l(x)`, `r(x)` into `log2(n)` rounds
//!
//! Application values are mapped through [`RangeBounds`]. The commitment is
//! to the value itself and the proof covers `value − range_min ∈ [0, 2^n)`
//! via the shifted commitment `V − range_min·G`, so a proof only verifies
//! under the `range_min` it was made for. `range_max` is not bound.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use range::{prove, verify, RangeBounds};
//!
//! // A reading of 1.5 units at scale ×1000
//! let bounds = RangeBounds::new(0, 50_000);
//! let (commitment, proof) = prove(1500, bounds).unwrap();
//!
//! let result = verify(&commitment, &proof, bounds);
//! assert!(result.verified);
//! ```

pub mod bounds;
pub mod proof;
pub mod prover;
pub mod transcript;
pub mod verifier;
pub mod wire;


pub use bounds::*;
pub use proof::*;
pub use prover::*;
pub use transcript::*;
pub use verifier::*;
pub use wire::*;

use bulletproofs_core::{
    config::{DEFAULT_BIT_LENGTH, VALUE_SCALE},
    BulletproofsResult, Commitment, GeneratorSet,
};
use lazy_static::lazy_static;
use rand::rngs::OsRng;
use rand_core::{CryptoRng, RngCore};

lazy_static! {
    /// Generators for the deployed 32-bit range, derived once
    pub static ref DEFAULT_GENERATORS: GeneratorSet = GeneratorSet::new(DEFAULT_BIT_LENGTH);
}

/// Prove `bounds.min ≤ value ≤ bounds.max` on the default generators.
///
/// Out-of-range values fail with `OutOfRangeInput` before any group operation.
pub fn prove(value: i64, bounds: RangeBounds) -> BulletproofsResult<(Commitment, RangeProof)> {
    prove_with_rng(value, bounds, &mut OsRng)
}

pub fn prove_with_rng<R: RngCore + CryptoRng>(
    value: i64,
    bounds: RangeBounds,
    rng: &mut R,
) -> BulletproofsResult<(Commitment, RangeProof)> {
    RangeProver::new(&DEFAULT_GENERATORS)?.prove_in_bounds(value, &bounds, rng)
}

/// Verify on the default generators. Never fails; rejection is reported in
/// the result.
pub fn verify(commitment: &Commitment, proof: &RangeProof, bounds: RangeBounds) -> VerificationResult {
    match RangeVerifier::new(&DEFAULT_GENERATORS) {
        Ok(verifier) => verifier.verify_with_bounds(commitment, proof, &bounds),
        Err(e) => VerificationResult {
            verified: false,
            failed_stage: e.stage(),
            error: Some(e.to_string()),
            challenges: None,
            processing_time_ms: 0.0,
        },
    }
}

/// Scale a raw sensor reading and its bounds by `VALUE_SCALE`, then prove.
pub fn prove_reading(reading: f64, sensor_min: f64, sensor_max: f64) -> BulletproofsResult<ProofEnvelope> {
    let bounds = RangeBounds::from_readings(sensor_min, sensor_max, VALUE_SCALE)?;
    let value = scale_reading(reading, VALUE_SCALE)?;
    let (commitment, proof) = prove(value, bounds)?;
    Ok(ProofEnvelope::new(commitment, proof, bounds))
}

/// Verify a parsed envelope on the default generators
pub fn verify_envelope(envelope: &ProofEnvelope) -> VerificationResult {
    verify(&envelope.commitment, &envelope.proof, envelope.bounds())
}

#[cfg(test)]
mod tests {
    use super::*;
    use bulletproofs_core::{BulletproofsError, VerificationStage};
    use curve25519_dalek::scalar::Scalar;

    #[test]
    fn test_prove_and_verify_default() {
        let bounds = RangeBounds::new(0, 50_000);
        let (commitment, proof) = prove(1500, bounds).unwrap();

        let result = verify(&commitment, &proof, bounds);
        assert!(result.verified, "{:?}", result.error);
        assert!(result.failed_stage.is_none());
        assert_eq!(proof.ipa().num_rounds(), 5);
    }

    #[test]
    fn test_max_bound_not_cryptographically_enforced() {
        let (commitment, proof) = prove(1500, RangeBounds::new(0, 50_000)).unwrap();

        // The proof only attests to the offset fitting in 32 bits
        let result = verify(&commitment, &proof, RangeBounds::new(0, 1000));
        assert!(result.verified);
    }

    #[test]
    fn test_value_outside_bounds_rejected() {
        let bounds = RangeBounds::new(0, 1000);
        assert!(matches!(
            prove(1500, bounds),
            Err(BulletproofsError::OutOfRangeInput { value: 1500, min: 0, max: 1000 })
        ));
        assert!(matches!(
            prove(-1, bounds),
            Err(BulletproofsError::OutOfRangeInput { .. })
        ));
        assert!(matches!(
            prove(1 << 32, RangeBounds::full(32)),
            Err(BulletproofsError::OutOfRangeInput { .. })
        ));
    }

    #[test]
    fn test_min_bound_is_enforced() {
        let (commitment, proof) = prove(1500, RangeBounds::new(0, 2000)).unwrap();

        let result = verify(&commitment, &proof, RangeBounds::new(1_000_000, 1_002_000));
        assert!(!result.verified);
        assert!(!verify(&commitment, &proof, RangeBounds::new(500, 2500)).verified);
    }

    #[test]
    fn test_commitment_is_to_the_value() {
        let blindings = ProofBlindings::sample(&mut OsRng, DEFAULT_BIT_LENGTH).unwrap();
        let bounds = RangeBounds::new(-1000, 5000);
        let (commitment, _) = RangeProver::new(&DEFAULT_GENERATORS)
            .unwrap()
            .prove_in_bounds_with_blindings(1500, &bounds, &blindings)
            .unwrap();

        let value = Scalar::from(1500u64);
        assert_eq!(commitment, Commitment::commit(&DEFAULT_GENERATORS, &value, &blindings.gamma));
    }

    #[test]
    fn test_negative_minimum() {
        let bounds = RangeBounds::new(-40_000, 85_000);
        let (commitment, proof) = prove(-12_500, bounds).unwrap();
        assert!(verify(&commitment, &proof, bounds).verified);
    }

    #[test]
    fn test_prove_reading() {
        let envelope = prove_reading(1.5, 0.0, 50.0).unwrap();
        assert_eq!(envelope.range_max, 50_000);
        assert!(verify_envelope(&envelope).verified);

        assert!(prove_reading(60.0, 0.0, 50.0).is_err());
        assert!(prove_reading(f64::NAN, 0.0, 50.0).is_err());
    }

    #[test]
    fn test_wrong_bounds_rejected_as_bounds_stage() {
        let bounds = RangeBounds::new(0, 1000);
        let (commitment, proof) = prove(10, bounds).unwrap();
        let result = verify(&commitment, &proof, RangeBounds::new(1000, 0));
        assert!(!result.verified);
        assert_eq!(result.failed_stage, Some(VerificationStage::Bounds));
    }
}
