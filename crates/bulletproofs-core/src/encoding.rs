//! Hex encodings used on the wire.
//!
//! Points are the 32-byte compressed Ristretto encoding; scalars are 32-byte
//! **big-endian** integers, which is the reverse of dalek's native little-endian
//! layout. Encoders emit uppercase hex; decoders accept either case and an
//! optional `0x` prefix.

use crate::{BulletproofsError, BulletproofsResult};
use curve25519_dalek::{ristretto::CompressedRistretto, scalar::Scalar};

fn strip_prefix(input: &str) -> &str {
    let trimmed = input.trim();
    trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed)
}

fn decode_32(input: &str, what: &str) -> BulletproofsResult<[u8; 32]> {
    let bytes = hex::decode(strip_prefix(input))
        .map_err(|e| BulletproofsError::MalformedProof(format!("{} is not valid hex: {}", what, e)))?;
    bytes.as_slice().try_into().map_err(|_| {
        BulletproofsError::MalformedProof(format!("{} must be 32 bytes, got {}", what, bytes.len()))
    })
}

/// Scalar as 32 big-endian bytes
pub fn scalar_to_be_bytes(scalar: &Scalar) -> [u8; 32] {
    let mut bytes = scalar.to_bytes();
    bytes.reverse();
    bytes
}

/// Parse 32 big-endian bytes, rejecting values `>= ℓ`
pub fn scalar_from_be_bytes(bytes: [u8; 32]) -> BulletproofsResult<Scalar> {
    let mut le = bytes;
    le.reverse();
    Option::from(Scalar::from_canonical_bytes(le))
        .ok_or_else(|| BulletproofsError::MalformedProof("non-canonical scalar".to_string()))
}

pub fn scalar_to_hex(scalar: &Scalar) -> String {
    hex::encode_upper(scalar_to_be_bytes(scalar))
}

pub fn scalar_from_hex(input: &str) -> BulletproofsResult<Scalar> {
    scalar_from_be_bytes(decode_32(input, "scalar")?)
}

pub fn point_to_hex(point: &CompressedRistretto) -> String {
    hex::encode_upper(point.as_bytes())
}

/// Parse a compressed point, rejecting encodings that do not decompress
pub fn point_from_hex(input: &str) -> BulletproofsResult<CompressedRistretto> {
    let compressed = CompressedRistretto(decode_32(input, "point")?);
    if compressed.decompress().is_none() {
        return Err(BulletproofsError::MalformedProof(
            "invalid compressed point encoding".to_string(),
        ));
    }
    Ok(compressed)
}

/// `#[serde(with = "hex_point")]` for `CompressedRistretto` fields
pub mod hex_point {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(point: &CompressedRistretto, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&point_to_hex(point))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<CompressedRistretto, D::Error> {
        let text = String::deserialize(d)?;
        point_from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// `#[serde(with = "hex_point_vec")]` for `Vec<CompressedRistretto>` fields
pub mod hex_point_vec {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(points: &[CompressedRistretto], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(points.iter().map(point_to_hex))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<CompressedRistretto>, D::Error> {
        let texts = Vec::<String>::deserialize(d)?;
        texts
            .iter()
            .map(|text| point_from_hex(text).map_err(serde::de::Error::custom))
            .collect()
    }
}

/// `#[serde(with = "hex_scalar")]` for `Scalar` fields
pub mod hex_scalar {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(scalar: &Scalar, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&scalar_to_hex(scalar))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Scalar, D::Error> {
        let text = String::deserialize(d)?;
        scalar_from_hex(&text).map_err(serde::de::Error::custom)
    }
}

/// `#[serde(with = "hex_scalar_vec")]` for `Vec<Scalar>` fields
pub mod hex_scalar_vec {
    use super::*;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(scalars: &[Scalar], s: S) -> Result<S::Ok, S::Error> {
        s.collect_seq(scalars.iter().map(scalar_to_hex))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<Scalar>, D::Error> {
        let texts = Vec::<String>::deserialize(d)?;
        texts
            .iter()
            .map(|text| scalar_from_hex(text).map_err(serde::de::Error::custom))
            .collect()
    }
}
