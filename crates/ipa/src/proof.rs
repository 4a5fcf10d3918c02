//! Inner Product Argument proof structure

use bulletproofs_core::{
    encoding::{hex_point_vec, hex_scalar, scalar_from_be_bytes, scalar_to_be_bytes},
    BulletproofsError, BulletproofsResult, GroupElement,
};
use curve25519_dalek::{ristretto::CompressedRistretto, scalar::Scalar};
use serde::{Deserialize, Serialize};

/// An inner product argument proof.
///
/// Serializes to `{"L": [..], "R": [..], "a": .., "b": ..}` with hex points and
/// big-endian hex scalars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerProductProof {
    /// L values from each folding round (log_2(n) elements)
    #[serde(rename = "L", with = "hex_point_vec")]
    pub l_vec: Vec<CompressedRistretto>,
    /// R values from each folding round (log_2(n) elements)
    #[serde(rename = "R", with = "hex_point_vec")]
    pub r_vec: Vec<CompressedRistretto>,
    /// Final folded scalar of the left vector
    #[serde(with = "hex_scalar")]
    pub a: Scalar,
    /// Final folded scalar of the right vector
    #[serde(with = "hex_scalar")]
    pub b: Scalar,
}

/// Number of folding rounds for vectors of length `n`, or `None` when `n` is
/// not a power of two.
pub fn rounds_for(n: usize) -> Option<usize> {
    if n.is_power_of_two() {
        Some(n.trailing_zeros() as usize)
    } else {
        None
    }
}

impl InnerProductProof {
    pub fn new(l_vec: Vec<GroupElement>, r_vec: Vec<GroupElement>, a: Scalar, b: Scalar) -> Self {
        Self {
            l_vec: l_vec.iter().map(|p| p.compress()).collect(),
            r_vec: r_vec.iter().map(|p| p.compress()).collect(),
            a,
            b,
        }
    }

    /// Get the number of folding rounds
    pub fn num_rounds(&self) -> usize {
        self.l_vec.len()
    }

    /// Reject proofs whose L/R counts differ from each other or from
    /// `log2(n)`. Extra or missing rounds are never tolerated.
    pub fn validate_structure(&self, n: usize) -> BulletproofsResult<()> {
        let expected = rounds_for(n).ok_or_else(|| {
            BulletproofsError::InvalidParameters(format!("vector length {} is not a power of two", n))
        })?;

        if self.l_vec.len() != self.r_vec.len() {
            return Err(BulletproofsError::MalformedProof(format!(
                "L has {} elements but R has {}",
                self.l_vec.len(),
                self.r_vec.len()
            )));
        }

        if self.l_vec.len() != expected {
            return Err(BulletproofsError::MalformedProof(format!(
                "expected {} inner-product rounds for n = {}, got {}",
                expected,
                n,
                self.l_vec.len()
            )));
        }

        Ok(())
    }

    pub fn decompress_l_vec(&self) -> BulletproofsResult<Vec<GroupElement>> {
        GroupElement::decode_all(&self.l_vec, "L")
    }

    pub fn decompress_r_vec(&self) -> BulletproofsResult<Vec<GroupElement>> {
        GroupElement::decode_all(&self.r_vec, "R")
    }

    /// Get proof size in bytes
    pub fn size_bytes(&self) -> usize {
        // Each compressed point is 32 bytes, each scalar is 32 bytes
        self.l_vec.len() * 32 + self.r_vec.len() * 32 + 64
    }

    /// Binary layout: u32 LE round count, L…, R…, a, b (scalars big-endian)
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(4 + self.size_bytes());

        result.extend_from_slice(&(self.l_vec.len() as u32).to_le_bytes());
        for point in self.l_vec.iter().chain(self.r_vec.iter()) {
            result.extend_from_slice(point.as_bytes());
        }
        result.extend_from_slice(&scalar_to_be_bytes(&self.a));
        result.extend_from_slice(&scalar_to_be_bytes(&self.b));

        result
    }

    pub fn from_bytes(bytes: &[u8]) -> BulletproofsResult<Self> {
        let header: [u8; 4] = bytes
            .get(..4)
            .and_then(|h| h.try_into().ok())
            .ok_or_else(|| BulletproofsError::MalformedProof("Insufficient bytes for proof".to_string()))?;
        let num_rounds = u32::from_le_bytes(header) as usize;

        let expected_size = num_rounds
            .checked_mul(64)
            .and_then(|points| points.checked_add(4 + 64))
            .ok_or_else(|| BulletproofsError::MalformedProof("round count overflows".to_string()))?;
        if bytes.len() != expected_size {
            return Err(BulletproofsError::MalformedProof(format!(
                "Invalid proof size: expected {}, got {}",
                expected_size,
                bytes.len()
            )));
        }

        let mut chunks = bytes[4..].chunks_exact(32).map(|chunk| {
            let mut out = [0u8; 32];
            out.copy_from_slice(chunk);
            out
        });
        let mut next = || {
            chunks
                .next()
                .ok_or_else(|| BulletproofsError::MalformedProof("truncated proof".to_string()))
        };

        let mut l_vec = Vec::with_capacity(num_rounds);
        for _ in 0..num_rounds {
            l_vec.push(CompressedRistretto(next()?));
        }
        let mut r_vec = Vec::with_capacity(num_rounds);
        for _ in 0..num_rounds {
            r_vec.push(CompressedRistretto(next()?));
        }
        let a = scalar_from_be_bytes(next()?)?;
        let b = scalar_from_be_bytes(next()?)?;

        Ok(Self { l_vec, r_vec, a, b })
    }
}
