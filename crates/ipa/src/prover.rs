//! Inner Product Argument prover implementation

use crate::{rounds_for, InnerProductProof};
use bulletproofs_core::{utils::inner_product, BulletproofsError, BulletproofsResult, GroupElement, ProofTranscript};
use curve25519_dalek::{ristretto::RistrettoPoint, scalar::Scalar};
use tracing::debug;

/// `P = ⟨a, G⟩ + ⟨b, H⟩ + ⟨a, b⟩·Q`
pub fn inner_product_commitment(
    g_vec: &[RistrettoPoint],
    h_vec: &[RistrettoPoint],
    q: &RistrettoPoint,
    a: &[Scalar],
    b: &[Scalar],
) -> BulletproofsResult<GroupElement> {
    let c = inner_product(a, b)?;
    if g_vec.len() != a.len() || h_vec.len() != b.len() {
        return Err(BulletproofsError::VectorLengthMismatch {
            expected: a.len(),
            actual: g_vec.len().min(h_vec.len()),
        });
    }
    Ok(GroupElement::multiscalar_mul(
        a.iter().chain(b.iter()).cloned().chain(std::iter::once(c)),
        g_vec.iter().chain(h_vec.iter()).cloned().chain(std::iter::once(*q)),
    ))
}

/// Inner Product Argument prover over caller-supplied bases.
///
/// The range prover passes `G_vec`, the `y^{-i}`-scaled `H_vec` and `Q = w·G`.
#[derive(Debug, Clone)]
pub struct InnerProductProver {
    g_vec: Vec<RistrettoPoint>,
    h_vec: Vec<RistrettoPoint>,
    q: RistrettoPoint,
}

impl InnerProductProver {
    pub fn new(g_vec: Vec<RistrettoPoint>, h_vec: Vec<RistrettoPoint>, q: RistrettoPoint) -> BulletproofsResult<Self> {
        if g_vec.len() != h_vec.len() {
            return Err(BulletproofsError::VectorLengthMismatch {
                expected: g_vec.len(),
                actual: h_vec.len(),
            });
        }
        if rounds_for(g_vec.len()).is_none() {
            return Err(BulletproofsError::InvalidParameters(format!(
                "generator length {} is not a power of two",
                g_vec.len()
            )));
        }
        Ok(Self { g_vec, h_vec, q })
    }

    /// Create an inner product proof for `a`, `b` of the generator length.
    ///
    /// Each round absorbs `L`, `R` and derives one challenge `u`.
    pub fn prove(
        self,
        transcript: &mut ProofTranscript,
        a: Vec<Scalar>,
        b: Vec<Scalar>,
    ) -> BulletproofsResult<InnerProductProof> {
        let n = self.g_vec.len();
        for len in [a.len(), b.len()] {
            if len != n {
                return Err(BulletproofsError::VectorLengthMismatch { expected: n, actual: len });
            }
        }

        let mut l_vec = Vec::with_capacity(n.trailing_zeros() as usize);
        let mut r_vec = Vec::with_capacity(n.trailing_zeros() as usize);

        let mut current_a = a;
        let mut current_b = b;
        let mut current_g = self.g_vec;
        let mut current_h = self.h_vec;

        while current_a.len() > 1 {
            let m = current_a.len() / 2;

            let (a_l, a_r) = current_a.split_at(m);
            let (b_l, b_r) = current_b.split_at(m);
            let (g_l, g_r) = current_g.split_at(m);
            let (h_l, h_r) = current_h.split_at(m);

            let c_l = inner_product(a_l, b_r)?;
            let c_r = inner_product(a_r, b_l)?;

            // L = <a_L, G_R> + <b_R, H_L> + c_L·Q
            let l = GroupElement::multiscalar_mul(
                a_l.iter().chain(b_r.iter()).cloned().chain(std::iter::once(c_l)),
                g_r.iter().chain(h_l.iter()).cloned().chain(std::iter::once(self.q)),
            );

            // R = <a_R, G_L> + <b_L, H_R> + c_R·Q
            let r = GroupElement::multiscalar_mul(
                a_r.iter().chain(b_l.iter()).cloned().chain(std::iter::once(c_r)),
                g_l.iter().chain(h_r.iter()).cloned().chain(std::iter::once(self.q)),
            );

            let l_compressed = l.compress();
            let r_compressed = r.compress();
            transcript.absorb_point(b"L", &l_compressed);
            transcript.absorb_point(b"R", &r_compressed);
            l_vec.push(l);
            r_vec.push(r);

            let u = transcript.challenge(b"u")?;
            let u_inv = u.invert();

            let mut folded_a = Vec::with_capacity(m);
            let mut folded_b = Vec::with_capacity(m);
            let mut folded_g = Vec::with_capacity(m);
            let mut folded_h = Vec::with_capacity(m);

            for i in 0..m {
                folded_a.push(a_l[i] * u + a_r[i] * u_inv);
                folded_b.push(b_l[i] * u_inv + b_r[i] * u);
                folded_g.push(g_l[i] * u_inv + g_r[i] * u);
                folded_h.push(h_l[i] * u + h_r[i] * u_inv);
            }

            current_a = folded_a;
            current_b = folded_b;
            current_g = folded_g;
            current_h = folded_h;
        }

        debug!(rounds = l_vec.len(), "inner product proof created");
        Ok(InnerProductProof::new(l_vec, r_vec, current_a[0], current_b[0]))
    }
}
