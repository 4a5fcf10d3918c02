//! Challenge schedule for range proofs.
//!
//! Prover and verifier both drive this type, so the absorb order cannot drift
//! between them:
//!
//! ```text
//! init   : n, V − min·G
//! y      : A, S
//! z      : y
//! x      : T1, T2, z
//! w      : tau_x, mu, t
//! u_j    : L_j, R_j          (inner-product rounds)
//! ```

use bulletproofs_core::{config::TRANSCRIPT_DOMAIN, BulletproofsResult, ProofTranscript};
use curve25519_dalek::{ristretto::CompressedRistretto, scalar::Scalar};

pub struct RangeProofTranscript {
    inner: ProofTranscript,
}

impl RangeProofTranscript {
    /// Bind the statement: bit length and the commitment shifted by `min`
    pub fn new(bit_length: usize, commitment: &CompressedRistretto) -> Self {
        let mut inner = ProofTranscript::new(TRANSCRIPT_DOMAIN);
        inner.absorb_u64(b"n", bit_length as u64);
        inner.absorb_point(b"V", commitment);
        Self { inner }
    }

    pub fn challenges_y_z(
        &mut self,
        a: &CompressedRistretto,
        s: &CompressedRistretto,
    ) -> BulletproofsResult<(Scalar, Scalar)> {
        self.inner.absorb_point(b"A", a);
        self.inner.absorb_point(b"S", s);
        let y = self.inner.challenge(b"y")?;
        self.inner.absorb_scalar(b"y", &y);
        let z = self.inner.challenge(b"z")?;
        Ok((y, z))
    }

    pub fn challenge_x(
        &mut self,
        t1: &CompressedRistretto,
        t2: &CompressedRistretto,
        z: &Scalar,
    ) -> BulletproofsResult<Scalar> {
        self.inner.absorb_point(b"T1", t1);
        self.inner.absorb_point(b"T2", t2);
        self.inner.absorb_scalar(b"z", z);
        self.inner.challenge(b"x")
    }

    /// Challenge scaling the inner-product base `Q = w·G`
    pub fn challenge_w(&mut self, tau_x: &Scalar, mu: &Scalar, t: &Scalar) -> BulletproofsResult<Scalar> {
        self.inner.absorb_scalar(b"tau_x", tau_x);
        self.inner.absorb_scalar(b"mu", mu);
        self.inner.absorb_scalar(b"t", t);
        self.inner.challenge(b"w")
    }

    /// The running transcript handed to the inner-product argument
    pub fn inner_product_transcript(&mut self) -> &mut ProofTranscript {
        &mut self.inner
    }
}
