//! Range proof verifier implementation

use crate::{RangeBounds, RangeProof, RangeProofTranscript};
use bulletproofs_core::{
    config::validate_bit_length,
    encoding::{hex_scalar, hex_scalar_vec},
    utils::{delta, scalar_from_i64, scalar_powers},
    BulletproofsError, BulletproofsResult, Commitment, GeneratorSet, GroupElement, VerificationStage,
};
use curve25519_dalek::scalar::Scalar;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, warn};

/// Fiat-Shamir challenges recomputed by the verifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenges {
    #[serde(with = "hex_scalar")]
    pub y: Scalar,
    #[serde(with = "hex_scalar")]
    pub z: Scalar,
    #[serde(with = "hex_scalar")]
    pub x: Scalar,
    #[serde(with = "hex_scalar")]
    pub w: Scalar,
    #[serde(with = "hex_scalar_vec")]
    pub u: Vec<Scalar>,
}

/// Outcome of a verification. Rejection is a normal result, never a panic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub verified: bool,
    /// First check that failed
    pub failed_stage: Option<VerificationStage>,
    pub error: Option<String>,
    pub challenges: Option<Challenges>,
    pub processing_time_ms: f64,
}

impl VerificationResult {
    fn accepted(challenges: Challenges, started: Instant) -> Self {
        Self {
            verified: true,
            failed_stage: None,
            error: None,
            challenges: Some(challenges),
            processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        }
    }

    fn rejected(stage: VerificationStage, error: &BulletproofsError, started: Instant) -> Self {
        Self {
            verified: false,
            failed_stage: Some(stage),
            error: Some(error.to_string()),
            challenges: None,
            processing_time_ms: started.elapsed().as_secs_f64() * 1000.0,
        }
    }
}

/// Verifier for proofs over the generator set's bit length
#[derive(Debug, Clone, Copy)]
pub struct RangeVerifier<'g> {
    generators: &'g GeneratorSet,
}

impl<'g> RangeVerifier<'g> {
    pub fn new(generators: &'g GeneratorSet) -> BulletproofsResult<Self> {
        validate_bit_length(generators.len())?;
        Ok(Self { generators })
    }

    pub fn bit_length(&self) -> usize {
        self.generators.len()
    }

    /// Verify that `commitment` opens to a value in `[0, 2^n)`.
    ///
    /// Returns the replayed challenges on success.
    pub fn verify(&self, commitment: &Commitment, proof: &RangeProof) -> BulletproofsResult<Challenges> {
        self.verify_with_min(commitment, proof, 0)
    }

    /// Verify that `commitment` opens to a value in `[min, min + 2^n)`
    pub fn verify_with_min(
        &self,
        commitment: &Commitment,
        proof: &RangeProof,
        min: i64,
    ) -> BulletproofsResult<Challenges> {
        let mut stage = VerificationStage::RoundCount;
        self.run_checks(commitment, proof, min, &mut stage)
    }

    /// Verify against application bounds and report the failing stage
    pub fn verify_with_bounds(
        &self,
        commitment: &Commitment,
        proof: &RangeProof,
        bounds: &RangeBounds,
    ) -> VerificationResult {
        let started = Instant::now();

        if let Err(e) = bounds.validate(self.bit_length()) {
            warn!(stage = %VerificationStage::Bounds, "range proof rejected");
            return VerificationResult::rejected(VerificationStage::Bounds, &e, started);
        }

        let mut stage = VerificationStage::RoundCount;
        match self.run_checks(commitment, proof, bounds.min, &mut stage) {
            Ok(challenges) => VerificationResult::accepted(challenges, started),
            Err(e) => VerificationResult::rejected(stage, &e, started),
        }
    }

    /// Verify independent proofs in parallel
    pub fn verify_batch(&self, items: &[(Commitment, RangeProof, RangeBounds)]) -> Vec<VerificationResult> {
        items
            .par_iter()
            .map(|(commitment, proof, bounds)| self.verify_with_bounds(commitment, proof, bounds))
            .collect()
    }

    /// Runs the checks in order and leaves `stage` at the one in progress, so
    /// on error it names the failing check.
    fn run_checks(
        &self,
        commitment: &Commitment,
        proof: &RangeProof,
        min: i64,
        stage: &mut VerificationStage,
    ) -> BulletproofsResult<Challenges> {
        let n = self.bit_length();
        let result = self.run_checks_inner(commitment, proof, min, stage, n);
        match &result {
            Ok(_) => debug!(bit_length = n, "range proof verified"),
            Err(e) => warn!(stage = %stage, error = %e, "range proof rejected"),
        }
        result
    }

    fn run_checks_inner(
        &self,
        commitment: &Commitment,
        proof: &RangeProof,
        min: i64,
        stage: &mut VerificationStage,
        n: usize,
    ) -> BulletproofsResult<Challenges> {
        *stage = VerificationStage::RoundCount;
        proof.ipa.validate_structure(n)?;

        *stage = VerificationStage::Decoding;
        // V − min·G commits to the offset the bits describe
        let v = commitment.shifted(self.generators, &scalar_from_i64(min))?;
        let statement = v.compress();
        let a = GroupElement::decode(&proof.a, "A")?;
        let s = GroupElement::decode(&proof.s, "S")?;
        let t1 = GroupElement::decode(&proof.t1, "T1")?;
        let t2 = GroupElement::decode(&proof.t2, "T2")?;
        let l_vec = proof.ipa.decompress_l_vec()?;
        let r_vec = proof.ipa.decompress_r_vec()?;

        *stage = VerificationStage::InnerProduct;
        let mut transcript = RangeProofTranscript::new(n, &statement);
        let (y, z) = transcript.challenges_y_z(&proof.a, &proof.s)?;
        let x = transcript.challenge_x(&proof.t1, &proof.t2, &z)?;
        let w = transcript.challenge_w(&proof.tau_x, &proof.mu, &proof.t)?;
        let ipa_scalars = proof
            .ipa
            .verification_scalars(n, transcript.inner_product_transcript())?;

        let z2 = z * z;
        let ipa_a = proof.ipa.a;
        let ipa_b = proof.ipa.b;
        let y_inv_pows = scalar_powers(&y.invert(), n);
        let two_pows = scalar_powers(&Scalar::from(2u64), n);

        // A + x·S − μ·H + w(t − a·b)·G + Σ(u²L + u⁻²R)
        //   + Σ (−z − a·s_i)·G_i + Σ (z + (z²·2^i − b·s_i⁻¹)·y^{−i})·H_i == 0
        let g_scalars = ipa_scalars.s.iter().map(|s_i| -z - ipa_a * s_i);
        let h_scalars = (0..n).map(|i| z + (z2 * two_pows[i] - ipa_b * ipa_scalars.s_inv[i]) * y_inv_pows[i]);

        let ipa_check = GroupElement::multiscalar_mul(
            [Scalar::ONE, x, -proof.mu, w * (proof.t - ipa_a * ipa_b)]
                .into_iter()
                .chain(ipa_scalars.challenges_sq.iter().cloned())
                .chain(ipa_scalars.challenges_inv_sq.iter().cloned())
                .chain(g_scalars)
                .chain(h_scalars),
            [a.0, s.0, self.generators.h(), self.generators.g()]
                .into_iter()
                .chain(l_vec.iter().map(|l| l.0))
                .chain(r_vec.iter().map(|r| r.0))
                .chain(self.generators.g_vec().iter().cloned())
                .chain(self.generators.h_vec().iter().cloned()),
        );
        if !ipa_check.is_identity() {
            return Err(BulletproofsError::VerificationFailed {
                stage: VerificationStage::InnerProduct,
            });
        }

        // z²·V + (δ(y,z) − t)·G − τx·H + x·T1 + x²·T2 == 0
        *stage = VerificationStage::MainEquation;
        let main_check = GroupElement::multiscalar_mul(
            [z2, delta(&y, &z, n) - proof.t, -proof.tau_x, x, x * x],
            [v.0, self.generators.g(), self.generators.h(), t1.0, t2.0],
        );
        if !main_check.is_identity() {
            return Err(BulletproofsError::VerificationFailed {
                stage: VerificationStage::MainEquation,
            });
        }

        Ok(Challenges {
            y,
            z,
            x,
            w,
            u: ipa_scalars.challenges,
        })
    }
}
