//! Pedersen commitments `V = v·G + γ·H`

use crate::{
    encoding::{hex_point, point_from_hex, point_to_hex},
    BulletproofsResult, GeneratorSet, GroupElement,
};
use curve25519_dalek::{ristretto::CompressedRistretto, scalar::Scalar};
use serde::{Deserialize, Serialize};

/// A published Pedersen commitment in compressed form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Commitment(#[serde(with = "hex_point")] pub CompressedRistretto);

impl Commitment {
    /// Commit to `value` with blinding `blinding`
    pub fn commit(generators: &GeneratorSet, value: &Scalar, blinding: &Scalar) -> Self {
        let point = GroupElement::multiscalar_mul([*value, *blinding], [generators.g(), generators.h()]);
        Self(point.compress())
    }

    /// `V − shift·G`: a commitment to `v − shift` under the same blinding
    pub fn shifted(&self, generators: &GeneratorSet, shift: &Scalar) -> BulletproofsResult<GroupElement> {
        Ok(self.decompress()? - GroupElement::from(generators.g()) * *shift)
    }

    pub fn as_compressed(&self) -> &CompressedRistretto {
        &self.0
    }

    pub fn decompress(&self) -> BulletproofsResult<GroupElement> {
        GroupElement::decode(&self.0, "commitment")
    }

    pub fn to_hex(&self) -> String {
        point_to_hex(&self.0)
    }

    pub fn from_hex(input: &str) -> BulletproofsResult<Self> {
        point_from_hex(input).map(Self)
    }
}

impl std::fmt::Display for Commitment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
