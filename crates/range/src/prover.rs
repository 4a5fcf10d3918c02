//! Range proof prover implementation

use crate::{RangeBounds, RangeProof, RangeProofTranscript};
use bulletproofs_core::{
    config::validate_bit_length,
    utils::{bit_decomposition, delta, fits_in_bits, inner_product, scalar_from_i64, scalar_powers},
    BulletproofsError, BulletproofsResult, Commitment, GeneratorSet, GroupElement,
};
use curve25519_dalek::scalar::Scalar;
use ipa::InnerProductProver;
use rand_core::{CryptoRng, RngCore};
use tracing::debug;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Every secret scalar a proof consumes. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct ProofBlindings {
    /// Commitment blinding `γ`
    pub gamma: Scalar,
    pub alpha: Scalar,
    pub rho: Scalar,
    pub tau1: Scalar,
    pub tau2: Scalar,
    pub s_l: Vec<Scalar>,
    pub s_r: Vec<Scalar>,
}

fn random_scalar<R: RngCore + CryptoRng>(rng: &mut R) -> BulletproofsResult<Scalar> {
    let mut wide = [0u8; 64];
    rng.try_fill_bytes(&mut wide)
        .map_err(|e| BulletproofsError::RandomnessFailure(e.to_string()))?;
    let scalar = Scalar::from_bytes_mod_order_wide(&wide);
    wide.zeroize();
    Ok(scalar)
}

impl ProofBlindings {
    /// Sample fresh blindings for vectors of length `n`. Any RNG failure aborts.
    pub fn sample<R: RngCore + CryptoRng>(rng: &mut R, n: usize) -> BulletproofsResult<Self> {
        let sample_vec = |rng: &mut R| (0..n).map(|_| random_scalar(rng)).collect::<BulletproofsResult<Vec<_>>>();
        Ok(Self {
            gamma: random_scalar(rng)?,
            alpha: random_scalar(rng)?,
            rho: random_scalar(rng)?,
            tau1: random_scalar(rng)?,
            tau2: random_scalar(rng)?,
            s_l: sample_vec(rng)?,
            s_r: sample_vec(rng)?,
        })
    }
}

impl std::fmt::Debug for ProofBlindings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProofBlindings").finish_non_exhaustive()
    }
}

/// Prover for values in `[min, min + 2^n)`, where `n` is the generator length.
///
/// The commitment is always to the value itself. The proof is over the
/// shifted statement `V − min·G`, so it only verifies under the same `min`.
#[derive(Debug, Clone, Copy)]
pub struct RangeProver<'g> {
    generators: &'g GeneratorSet,
}

impl<'g> RangeProver<'g> {
    pub fn new(generators: &'g GeneratorSet) -> BulletproofsResult<Self> {
        validate_bit_length(generators.len())?;
        Ok(Self { generators })
    }

    pub fn bit_length(&self) -> usize {
        self.generators.len()
    }

    fn check_value(&self, value: u64) -> BulletproofsResult<()> {
        let n = self.bit_length();
        if !fits_in_bits(value, n) {
            let max = if n >= 64 { u64::MAX } else { (1u64 << n) - 1 };
            return Err(BulletproofsError::OutOfRangeInput {
                value: value as i128,
                min: 0,
                max: max as i128,
            });
        }
        Ok(())
    }

    /// Prove `value ∈ [0, 2^n)` with freshly sampled blindings
    pub fn prove<R: RngCore + CryptoRng>(
        &self,
        value: u64,
        rng: &mut R,
    ) -> BulletproofsResult<(Commitment, RangeProof)> {
        self.check_value(value)?;
        let blindings = ProofBlindings::sample(rng, self.bit_length())?;
        self.prove_with_blindings(value, &blindings)
    }

    /// Deterministic proving of `value ∈ [0, 2^n)` from explicit blindings
    pub fn prove_with_blindings(
        &self,
        value: u64,
        blindings: &ProofBlindings,
    ) -> BulletproofsResult<(Commitment, RangeProof)> {
        self.prove_offset(value, 0, blindings)
    }

    /// Prove `bounds.min ≤ value ≤ bounds.max` with freshly sampled blindings
    pub fn prove_in_bounds<R: RngCore + CryptoRng>(
        &self,
        value: i64,
        bounds: &RangeBounds,
        rng: &mut R,
    ) -> BulletproofsResult<(Commitment, RangeProof)> {
        let offset = bounds.offset(value, self.bit_length())?;
        let blindings = ProofBlindings::sample(rng, self.bit_length())?;
        self.prove_offset(offset, bounds.min, &blindings)
    }

    pub fn prove_in_bounds_with_blindings(
        &self,
        value: i64,
        bounds: &RangeBounds,
        blindings: &ProofBlindings,
    ) -> BulletproofsResult<(Commitment, RangeProof)> {
        let offset = bounds.offset(value, self.bit_length())?;
        self.prove_offset(offset, bounds.min, blindings)
    }

    /// Commits to `min + offset` and proves `offset ∈ [0, 2^n)` against
    /// `V − min·G`
    fn prove_offset(
        &self,
        offset: u64,
        min: i64,
        blindings: &ProofBlindings,
    ) -> BulletproofsResult<(Commitment, RangeProof)> {
        self.check_value(offset)?;

        let n = self.bit_length();
        for len in [blindings.s_l.len(), blindings.s_r.len()] {
            if len != n {
                return Err(BulletproofsError::VectorLengthMismatch { expected: n, actual: len });
            }
        }

        let g = self.generators.g();
        let h = self.generators.h();
        let g_vec = self.generators.g_vec();
        let h_vec = self.generators.h_vec();

        let commitment = Commitment::commit(
            self.generators,
            &(scalar_from_i64(min) + Scalar::from(offset)),
            &blindings.gamma,
        );
        let statement = Commitment::commit(self.generators, &Scalar::from(offset), &blindings.gamma);
        let mut transcript = RangeProofTranscript::new(n, statement.as_compressed());

        // a_L holds the bits of the offset, a_R = a_L - 1
        let mut a_l = bit_decomposition(offset, n);
        let mut a_r: Vec<Scalar> = a_l.iter().map(|bit| bit - Scalar::ONE).collect();

        // A = α·H + <a_L, G> + <a_R, H_vec>
        let a_commit = GroupElement::multiscalar_mul(
            std::iter::once(blindings.alpha).chain(a_l.iter().cloned()).chain(a_r.iter().cloned()),
            std::iter::once(h).chain(g_vec.iter().cloned()).chain(h_vec.iter().cloned()),
        )
        .compress();

        // S = ρ·H + <s_L, G> + <s_R, H_vec>
        let s_commit = GroupElement::multiscalar_mul(
            std::iter::once(blindings.rho)
                .chain(blindings.s_l.iter().cloned())
                .chain(blindings.s_r.iter().cloned()),
            std::iter::once(h).chain(g_vec.iter().cloned()).chain(h_vec.iter().cloned()),
        )
        .compress();

        let (y, z) = transcript.challenges_y_z(&a_commit, &s_commit)?;
        let z2 = z * z;
        let y_pows = scalar_powers(&y, n);
        let two_pows = scalar_powers(&Scalar::from(2u64), n);

        // l(X) = l0 + l1·X,  r(X) = r0 + r1·X
        let mut l0: Vec<Scalar> = a_l.iter().map(|bit| bit - z).collect();
        let l1 = &blindings.s_l;
        let mut r0: Vec<Scalar> = (0..n)
            .map(|i| y_pows[i] * (a_r[i] + z) + z2 * two_pows[i])
            .collect();
        let r1: Vec<Scalar> = (0..n).map(|i| y_pows[i] * blindings.s_r[i]).collect();

        let t1 = inner_product(&l0, &r1)? + inner_product(l1, &r0)?;
        let t2 = inner_product(l1, &r1)?;

        let t1_commit = GroupElement::multiscalar_mul([t1, blindings.tau1], [g, h]).compress();
        let t2_commit = GroupElement::multiscalar_mul([t2, blindings.tau2], [g, h]).compress();

        let x = transcript.challenge_x(&t1_commit, &t2_commit, &z)?;

        let l: Vec<Scalar> = (0..n).map(|i| l0[i] + l1[i] * x).collect();
        let r: Vec<Scalar> = (0..n).map(|i| r0[i] + r1[i] * x).collect();
        let t = inner_product(&l, &r)?;

        let tau_x = blindings.tau2 * x * x + blindings.tau1 * x + z2 * blindings.gamma;
        let mu = blindings.alpha + blindings.rho * x;

        let w = transcript.challenge_w(&tau_x, &mu, &t)?;
        let q = g * w;

        // H'_i = y^{-i}·H_i
        let y_inv = y.invert();
        let h_prime = scalar_powers(&y_inv, n)
            .iter()
            .zip(h_vec.iter())
            .map(|(y_inv_i, h_i)| h_i * y_inv_i)
            .collect();

        let ipa = InnerProductProver::new(g_vec.to_vec(), h_prime, q)?.prove(
            transcript.inner_product_transcript(),
            l,
            r,
        )?;

        a_l.zeroize();
        a_r.zeroize();
        l0.zeroize();
        r0.zeroize();

        debug_assert_eq!(t, z2 * Scalar::from(offset) + delta(&y, &z, n) + t1 * x + t2 * x * x);

        debug!(bit_length = n, rounds = ipa.num_rounds(), "range proof created");

        Ok((
            commitment,
            RangeProof {
                a: a_commit,
                s: s_commit,
                t1: t1_commit,
                t2: t2_commit,
                tau_x,
                mu,
                t,
                ipa,
            },
        ))
    }
}
