//! Fiat-Shamir transcript.
//!
//! Every challenge is a pure function of what has been absorbed so far. The
//! [`ProofTranscript`] type only exposes absorbing and challenge derivation, so
//! a call site cannot substitute a literal challenge or skip an element.
//! The raw Merlin extension stays private to this crate:
//!
//! ```compile_fail
//! use bulletproofs_core::transcript::TranscriptProtocol;
//! ```

use crate::{encoding::scalar_to_be_bytes, BulletproofsError, BulletproofsResult};
use curve25519_dalek::{ristretto::CompressedRistretto, scalar::Scalar};
use merlin::Transcript;
use tracing::trace;

/// Extension trait for Merlin transcripts with the wire encodings of points
/// and scalars
pub(crate) trait TranscriptProtocol {
    /// Append a compressed group element
    fn append_point(&mut self, label: &'static [u8], point: &CompressedRistretto);

    /// Append a scalar as 32 big-endian bytes
    fn append_scalar(&mut self, label: &'static [u8], scalar: &Scalar);

    /// Derive a non-zero challenge scalar by wide reduction of 64 bytes
    fn challenge_scalar(&mut self, label: &'static [u8]) -> BulletproofsResult<Scalar>;
}

impl TranscriptProtocol for Transcript {
    fn append_point(&mut self, label: &'static [u8], point: &CompressedRistretto) {
        self.append_message(label, point.as_bytes());
    }

    fn append_scalar(&mut self, label: &'static [u8], scalar: &Scalar) {
        self.append_message(label, &scalar_to_be_bytes(scalar));
    }

    fn challenge_scalar(&mut self, label: &'static [u8]) -> BulletproofsResult<Scalar> {
        let mut buf = [0u8; 64];
        self.challenge_bytes(label, &mut buf);
        let challenge = Scalar::from_bytes_mod_order_wide(&buf);
        if challenge == Scalar::ZERO {
            return Err(BulletproofsError::InvalidParameters(
                "transcript produced a zero challenge".to_string(),
            ));
        }
        Ok(challenge)
    }
}

/// Append-only transcript shared by prover and verifier
#[derive(Clone)]
pub struct ProofTranscript {
    inner: Transcript,
}

impl ProofTranscript {
    pub fn new(domain: &'static [u8]) -> Self {
        Self {
            inner: Transcript::new(domain),
        }
    }

    pub fn absorb(&mut self, label: &'static [u8], bytes: &[u8]) {
        self.inner.append_message(label, bytes);
    }

    pub fn absorb_point(&mut self, label: &'static [u8], point: &CompressedRistretto) {
        self.inner.append_point(label, point);
    }

    pub fn absorb_scalar(&mut self, label: &'static [u8], scalar: &Scalar) {
        self.inner.append_scalar(label, scalar);
    }

    pub fn absorb_u64(&mut self, label: &'static [u8], value: u64) {
        self.inner.append_u64(label, value);
    }

    pub fn challenge(&mut self, label: &'static [u8]) -> BulletproofsResult<Scalar> {
        trace!(label = %String::from_utf8_lossy(label), "deriving challenge");
        self.inner.challenge_scalar(label)
    }
}

impl std::fmt::Debug for ProofTranscript {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProofTranscript").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curve25519_dalek::constants::RISTRETTO_BASEPOINT_COMPRESSED;

    #[test]
    fn test_transcript_deterministic() {
        let point = RISTRETTO_BASEPOINT_COMPRESSED;
        let scalar = Scalar::from(42u64);

        let mut transcript1 = ProofTranscript::new(b"test");
        let mut transcript2 = ProofTranscript::new(b"test");

        transcript1.absorb_point(b"point", &point);
        transcript1.absorb_scalar(b"scalar", &scalar);

        transcript2.absorb_point(b"point", &point);
        transcript2.absorb_scalar(b"scalar", &scalar);

        assert_eq!(
            transcript1.challenge(b"challenge").unwrap(),
            transcript2.challenge(b"challenge").unwrap()
        );
    }

    #[test]
    fn test_order_changes_challenge() {
        let mut forward = ProofTranscript::new(b"test");
        forward.absorb(b"A", b"first");
        forward.absorb(b"S", b"second");

        let mut swapped = ProofTranscript::new(b"test");
        swapped.absorb(b"S", b"second");
        swapped.absorb(b"A", b"first");

        assert_ne!(
            forward.challenge(b"y").unwrap(),
            swapped.challenge(b"y").unwrap()
        );
    }

    #[test]
    fn test_challenges_chain() {
        let mut transcript = ProofTranscript::new(b"test");
        transcript.absorb_u64(b"n", 32);

        let y = transcript.challenge(b"y").unwrap();
        let z = transcript.challenge(b"z").unwrap();
        assert_ne!(y, z);
        assert_ne!(y, Scalar::ZERO);
    }

    #[test]
    fn test_domain_separation() {
        let mut a = ProofTranscript::new(b"domain-a");
        let mut b = ProofTranscript::new(b"domain-b");
        assert_ne!(a.challenge(b"c").unwrap(), b.challenge(b"c").unwrap());
    }

    #[test]
    fn test_scalar_absorbed_big_endian() {
        let scalar = Scalar::from(7u64);

        let mut via_scalar = ProofTranscript::new(b"test");
        via_scalar.absorb_scalar(b"s", &scalar);

        let mut be = [0u8; 32];
        be[31] = 7;
        let mut via_bytes = ProofTranscript::new(b"test");
        via_bytes.absorb(b"s", &be);

        assert_eq!(
            via_scalar.challenge(b"c").unwrap(),
            via_bytes.challenge(b"c").unwrap()
        );
    }
}
