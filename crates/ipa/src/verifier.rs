//! Inner Product Argument verifier implementation

use crate::InnerProductProof;
use bulletproofs_core::{
    BulletproofsError, BulletproofsResult, GroupElement, ProofTranscript, VerificationStage,
};
use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};
use tracing::warn;

/// Challenges and folding coefficients replayed from a proof.
///
/// The folded generators are `G' = Σ s_i·G_i` and `H' = Σ s_i⁻¹·H_i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationScalars {
    /// Per-round challenges `u_j`
    pub challenges: Vec<Scalar>,
    /// `u_j²`
    pub challenges_sq: Vec<Scalar>,
    /// `u_j⁻²`
    pub challenges_inv_sq: Vec<Scalar>,
    /// `s_i = Π_j u_j^{±1}`
    pub s: Vec<Scalar>,
    /// `s_i⁻¹`, equal to `s_{n-1-i}`
    pub s_inv: Vec<Scalar>,
}

impl InnerProductProof {
    /// Check the round count, absorb every `L_j`, `R_j` and derive the folding
    /// coefficients for vectors of length `n`.
    pub fn verification_scalars(
        &self,
        n: usize,
        transcript: &mut ProofTranscript,
    ) -> BulletproofsResult<VerificationScalars> {
        self.validate_structure(n)?;

        let mut challenges = Vec::with_capacity(self.num_rounds());
        for (l, r) in self.l_vec.iter().zip(self.r_vec.iter()) {
            transcript.absorb_point(b"L", l);
            transcript.absorb_point(b"R", r);
            challenges.push(transcript.challenge(b"u")?);
        }

        let mut challenges_inv = challenges.clone();
        Scalar::batch_invert(&mut challenges_inv);

        let challenges_sq: Vec<Scalar> = challenges.iter().map(|u| u * u).collect();
        let challenges_inv_sq: Vec<Scalar> = challenges_inv.iter().map(|u| u * u).collect();

        let rounds = challenges.len();
        let mut s = vec![Scalar::ONE; n];
        for (round, (u, u_inv)) in challenges.iter().zip(challenges_inv.iter()).enumerate() {
            // Round 0 splits on the most significant index bit
            let bit_position = rounds - 1 - round;
            for (i, s_i) in s.iter_mut().enumerate() {
                if (i >> bit_position) & 1 == 1 {
                    *s_i *= u;
                } else {
                    *s_i *= u_inv;
                }
            }
        }
        let s_inv = s.iter().rev().cloned().collect();

        Ok(VerificationScalars {
            challenges,
            challenges_sq,
            challenges_inv_sq,
            s,
            s_inv,
        })
    }
}

/// Standalone verifier for `P = ⟨a, G⟩ + ⟨b, H⟩ + ⟨a, b⟩·Q`
#[derive(Debug, Clone)]
pub struct InnerProductVerifier {
    g_vec: Vec<RistrettoPoint>,
    h_vec: Vec<RistrettoPoint>,
    q: RistrettoPoint,
}

impl InnerProductVerifier {
    pub fn new(g_vec: Vec<RistrettoPoint>, h_vec: Vec<RistrettoPoint>, q: RistrettoPoint) -> BulletproofsResult<Self> {
        if g_vec.len() != h_vec.len() {
            return Err(BulletproofsError::VectorLengthMismatch {
                expected: g_vec.len(),
                actual: h_vec.len(),
            });
        }
        Ok(Self { g_vec, h_vec, q })
    }

    /// Accepts iff
    /// `P + Σ(u_j²·L_j + u_j⁻²·R_j) − ⟨a·s, G⟩ − ⟨b·s⁻¹, H⟩ − a·b·Q` is the identity,
    /// evaluated as one multiscalar multiplication.
    pub fn verify(
        &self,
        transcript: &mut ProofTranscript,
        proof: &InnerProductProof,
        p: &GroupElement,
    ) -> BulletproofsResult<()> {
        let n = self.g_vec.len();
        let scalars = proof.verification_scalars(n, transcript)?;

        let l_vec = proof.decompress_l_vec()?;
        let r_vec = proof.decompress_r_vec()?;

        let neg_a_s = scalars.s.iter().map(|s_i| -(proof.a * s_i));
        let neg_b_s_inv = scalars.s_inv.iter().map(|s_i| -(proof.b * s_i));

        let check = GroupElement::multiscalar_mul(
            std::iter::once(Scalar::ONE)
                .chain(scalars.challenges_sq.iter().cloned())
                .chain(scalars.challenges_inv_sq.iter().cloned())
                .chain(neg_a_s)
                .chain(neg_b_s_inv)
                .chain(std::iter::once(-(proof.a * proof.b))),
            std::iter::once(p.0)
                .chain(l_vec.iter().map(|l| l.0))
                .chain(r_vec.iter().map(|r| r.0))
                .chain(self.g_vec.iter().cloned())
                .chain(self.h_vec.iter().cloned())
                .chain(std::iter::once(self.q)),
        );

        if check.is_identity() {
            Ok(())
        } else {
            warn!(rounds = proof.num_rounds(), "inner product check failed");
            Err(BulletproofsError::VerificationFailed {
                stage: VerificationStage::InnerProduct,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{inner_product_commitment, InnerProductProver};
    use bulletproofs_core::GeneratorSet;
    use curve25519_dalek::constants::RISTRETTO_BASEPOINT_POINT;

    struct Fixture {
        g_vec: Vec<RistrettoPoint>,
        h_vec: Vec<RistrettoPoint>,
        q: RistrettoPoint,
        a: Vec<Scalar>,
        b: Vec<Scalar>,
    }

    impl Fixture {
        fn new(n: usize) -> Self {
            let generators = GeneratorSet::new(n);
            Self {
                g_vec: generators.g_vec().to_vec(),
                h_vec: generators.h_vec().to_vec(),
                q: RISTRETTO_BASEPOINT_POINT * Scalar::from(17u64),
                a: (0..n).map(|i| Scalar::from((i + 1) as u64)).collect(),
                b: (0..n).map(|i| Scalar::from((i + 10) as u64)).collect(),
            }
        }

        fn commitment(&self) -> GroupElement {
            inner_product_commitment(&self.g_vec, &self.h_vec, &self.q, &self.a, &self.b).unwrap()
        }

        fn prove(&self) -> InnerProductProof {
            let prover = InnerProductProver::new(self.g_vec.clone(), self.h_vec.clone(), self.q).unwrap();
            let mut transcript = ProofTranscript::new(b"ipa_test");
            prover.prove(&mut transcript, self.a.clone(), self.b.clone()).unwrap()
        }

        fn verify(&self, proof: &InnerProductProof, p: &GroupElement) -> BulletproofsResult<()> {
            let verifier = InnerProductVerifier::new(self.g_vec.clone(), self.h_vec.clone(), self.q).unwrap();
            let mut transcript = ProofTranscript::new(b"ipa_test");
            verifier.verify(&mut transcript, proof, p)
        }
    }

    fn test_ipa_round_trip(vector_length: usize) {
        let fixture = Fixture::new(vector_length);
        let proof = fixture.prove();
        assert!(
            fixture.verify(&proof, &fixture.commitment()).is_ok(),
            "Proof verification failed for vector length {}",
            vector_length
        );
    }

    #[test]
    fn test_ipa_verification_length_1() {
        test_ipa_round_trip(1);
    }

    #[test]
    fn test_ipa_verification_length_2() {
        test_ipa_round_trip(2);
    }

    #[test]
    fn test_ipa_verification_length_8() {
        test_ipa_round_trip(8);
    }

    #[test]
    fn test_ipa_verification_larger_vectors() {
        test_ipa_round_trip(16);
        test_ipa_round_trip(32);
    }

    #[test]
    fn test_final_scalars_carry_inner_product() {
        let fixture = Fixture::new(4);
        let proof = fixture.prove();

        let mut transcript = ProofTranscript::new(b"ipa_test");
        let scalars = proof.verification_scalars(4, &mut transcript).unwrap();
        let folded_a: Scalar = fixture.a.iter().zip(scalars.s_inv.iter()).map(|(a, s)| a * s).sum();
        assert_eq!(folded_a, proof.a);
    }

    #[test]
    fn test_s_inverse_relation() {
        let fixture = Fixture::new(8);
        let proof = fixture.prove();
        let mut transcript = ProofTranscript::new(b"ipa_test");
        let scalars = proof.verification_scalars(8, &mut transcript).unwrap();

        for (s, s_inv) in scalars.s.iter().zip(scalars.s_inv.iter()) {
            assert_eq!(s * s_inv, Scalar::ONE);
        }
    }

    #[test]
    fn test_invalid_proof_wrong_rounds() {
        let fixture = Fixture::new(8);
        let mut proof = fixture.prove();
        proof.l_vec.pop();
        proof.r_vec.pop();

        assert!(matches!(
            fixture.verify(&proof, &fixture.commitment()),
            Err(BulletproofsError::MalformedProof(_))
        ));
    }

    #[test]
    fn test_wrong_commitment_rejected() {
        let fixture = Fixture::new(4);
        let proof = fixture.prove();
        let wrong = fixture.commitment() + GroupElement::from(fixture.q);

        assert!(matches!(
            fixture.verify(&proof, &wrong),
            Err(BulletproofsError::VerificationFailed { stage: VerificationStage::InnerProduct })
        ));
    }

    #[test]
    fn test_forge_proof_detection() {
        let fixture = Fixture::new(4);
        let mut forged = fixture.prove();
        forged.a = Scalar::from(99u64);
        forged.b = Scalar::from(99u64);

        assert!(fixture.verify(&forged, &fixture.commitment()).is_err());
    }

    #[test]
    fn test_tampered_round_rejected() {
        let fixture = Fixture::new(8);
        let mut proof = fixture.prove();
        proof.l_vec.swap(0, 1);

        assert!(fixture.verify(&proof, &fixture.commitment()).is_err());
    }

    #[test]
    fn test_random_witness_verifies() {
        let mut rng = rand::thread_rng();
        let mut fixture = Fixture::new(16);
        fixture.a = (0..16).map(|_| Scalar::random(&mut rng)).collect();
        fixture.b = (0..16).map(|_| Scalar::random(&mut rng)).collect();

        let proof = fixture.prove();
        assert!(fixture.verify(&proof, &fixture.commitment()).is_ok());
    }

    proptest::proptest! {
        #![proptest_config(proptest::prelude::ProptestConfig::with_cases(16))]

        #[test]
        fn test_completeness_any_witness(
            a in proptest::collection::vec(proptest::prelude::any::<u64>(), 8),
            b in proptest::collection::vec(proptest::prelude::any::<u64>(), 8),
        ) {
            let mut fixture = Fixture::new(8);
            fixture.a = a.into_iter().map(Scalar::from).collect();
            fixture.b = b.into_iter().map(Scalar::from).collect();

            let proof = fixture.prove();
            proptest::prop_assert!(fixture.verify(&proof, &fixture.commitment()).is_ok());
        }
    }
}
