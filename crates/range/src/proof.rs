//! Range proof structure

use bulletproofs_core::{
    encoding::{hex_point, hex_scalar, scalar_from_be_bytes, scalar_to_be_bytes},
    BulletproofsError, BulletproofsResult,
};
use curve25519_dalek::{ristretto::CompressedRistretto, scalar::Scalar};
use ipa::InnerProductProof;
use serde::{Deserialize, Serialize};

/// Bytes before the inner-product proof: four points and three scalars
const FIXED_PART_LEN: usize = 7 * 32;

/// A range proof for one committed value.
///
/// Points are kept compressed and only decompressed by the verifier, so a
/// proof with a corrupted point still deserializes from the binary form and is
/// rejected as malformed at verification time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeProof {
    /// Commitment to the bit vectors `a_L`, `a_R`
    #[serde(rename = "A", with = "hex_point")]
    pub a: CompressedRistretto,
    /// Commitment to the blinding vectors `s_L`, `s_R`
    #[serde(rename = "S", with = "hex_point")]
    pub s: CompressedRistretto,
    #[serde(rename = "T1", with = "hex_point")]
    pub t1: CompressedRistretto,
    #[serde(rename = "T2", with = "hex_point")]
    pub t2: CompressedRistretto,
    /// Blinding of `t(x)`
    #[serde(with = "hex_scalar")]
    pub tau_x: Scalar,
    /// Aggregate blinding of `A` and `S`
    #[serde(with = "hex_scalar")]
    pub mu: Scalar,
    /// `t(x) = <l(x), r(x)>`
    #[serde(with = "hex_scalar")]
    pub t: Scalar,
    #[serde(rename = "inner_product_proof")]
    pub ipa: InnerProductProof,
}

impl RangeProof {
    pub fn ipa(&self) -> &InnerProductProof {
        &self.ipa
    }

    pub fn size_bytes(&self) -> usize {
        FIXED_PART_LEN + self.ipa.size_bytes()
    }

    /// A, S, T1, T2, tau_x, mu, t, then the inner-product proof
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.size_bytes() + 4);
        for point in [&self.a, &self.s, &self.t1, &self.t2] {
            bytes.extend_from_slice(point.as_bytes());
        }
        for scalar in [&self.tau_x, &self.mu, &self.t] {
            bytes.extend_from_slice(&scalar_to_be_bytes(scalar));
        }
        bytes.extend_from_slice(&self.ipa.to_bytes());
        bytes
    }

    pub fn from_bytes(bytes: &[u8]) -> BulletproofsResult<Self> {
        if bytes.len() < FIXED_PART_LEN {
            return Err(BulletproofsError::MalformedProof(format!(
                "range proof needs at least {} bytes, got {}",
                FIXED_PART_LEN,
                bytes.len()
            )));
        }

        let word = |i: usize| {
            let mut out = [0u8; 32];
            out.copy_from_slice(&bytes[i * 32..(i + 1) * 32]);
            out
        };

        Ok(Self {
            a: CompressedRistretto(word(0)),
            s: CompressedRistretto(word(1)),
            t1: CompressedRistretto(word(2)),
            t2: CompressedRistretto(word(3)),
            tau_x: scalar_from_be_bytes(word(4))?,
            mu: scalar_from_be_bytes(word(5))?,
            t: scalar_from_be_bytes(word(6))?,
            ipa: InnerProductProof::from_bytes(&bytes[FIXED_PART_LEN..])?,
        })
    }

    pub fn to_json(&self) -> BulletproofsResult<String> {
        serde_json::to_string(self).map_err(|e| BulletproofsError::SerializationError(e.to_string()))
    }

    /// Parse the hex-JSON form. Invalid points and non-canonical scalars are
    /// reported as malformed proofs.
    pub fn from_json(json: &str) -> BulletproofsResult<Self> {
        serde_json::from_str(json).map_err(|e| BulletproofsError::MalformedProof(e.to_string()))
    }
}
