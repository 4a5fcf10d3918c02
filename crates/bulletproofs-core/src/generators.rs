//! Generator derivation.
//!
//! `G` is the Ristretto basepoint. Every other generator is obtained by hashing
//! a fixed label to the group, so nobody knows a discrete-log relation between
//! any two of them:
//!
//! ```text
//! H        = hash_to_point(compress(G) || "bulletproof_h")
//! G_vec[i] = hash_to_point("bulletproof_g_" || decimal(i))
//! H_vec[i] = hash_to_point("bulletproof_h_" || decimal(i))
//! hash_to_point(m) = RistrettoPoint::from_uniform_bytes(SHA-512(m))
//! ```
//!
//! There is exactly one derivation. A [`GeneratorSet`] can only be built by
//! [`GeneratorSet::new`] or by [`GeneratorSet::from_dump`], which re-derives and
//! compares.

use crate::{
    config::{GENERATOR_SCHEME, G_VEC_PREFIX, H_LABEL, H_VEC_PREFIX, PROTOCOL_VERSION},
    encoding::{hex_point, hex_point_vec},
    BulletproofsError, BulletproofsResult, GroupElement,
};
use curve25519_dalek::{
    constants::RISTRETTO_BASEPOINT_POINT,
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256, Sha512};
use tracing::debug;

fn hash_to_point(parts: &[&[u8]]) -> RistrettoPoint {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    let mut bytes = [0u8; 64];
    bytes.copy_from_slice(&hasher.finalize());
    RistrettoPoint::from_uniform_bytes(&bytes)
}

/// Immutable generator set for one bit length. Safe to share across threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorSet {
    g: RistrettoPoint,
    h: RistrettoPoint,
    g_vec: Vec<RistrettoPoint>,
    h_vec: Vec<RistrettoPoint>,
}

impl GeneratorSet {
    /// Derive generators for vectors of length `n`
    pub fn new(n: usize) -> Self {
        let g = RISTRETTO_BASEPOINT_POINT;
        let h = hash_to_point(&[&g.compress().as_bytes()[..], H_LABEL]);

        let g_vec = (0..n)
            .map(|i| hash_to_point(&[G_VEC_PREFIX.as_bytes(), i.to_string().as_bytes()]))
            .collect();
        let h_vec = (0..n)
            .map(|i| hash_to_point(&[H_VEC_PREFIX.as_bytes(), i.to_string().as_bytes()]))
            .collect();

        debug!(n, "derived generator set");
        Self { g, h, g_vec, h_vec }
    }

    /// Length of the vector generators
    pub fn len(&self) -> usize {
        self.g_vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.g_vec.is_empty()
    }

    /// Value base `G`
    pub fn g(&self) -> RistrettoPoint {
        self.g
    }

    /// Blinding base `H`
    pub fn h(&self) -> RistrettoPoint {
        self.h
    }

    pub fn g_vec(&self) -> &[RistrettoPoint] {
        &self.g_vec
    }

    pub fn h_vec(&self) -> &[RistrettoPoint] {
        &self.h_vec
    }

    /// `⟨a, G_vec⟩ + ⟨b, H_vec⟩` over the first `a.len()` generators
    pub fn vector_commit(&self, a: &[Scalar], b: &[Scalar]) -> BulletproofsResult<GroupElement> {
        if a.len() != b.len() {
            return Err(BulletproofsError::VectorLengthMismatch {
                expected: a.len(),
                actual: b.len(),
            });
        }

        if a.len() > self.len() {
            return Err(BulletproofsError::InsufficientGenerators {
                needed: a.len(),
                available: self.len(),
            });
        }

        let scalars = a.iter().chain(b.iter()).cloned();
        let points = self.g_vec[..a.len()].iter().chain(self.h_vec[..b.len()].iter()).cloned();

        Ok(GroupElement::multiscalar_mul(scalars, points))
    }

    /// SHA-256 over `G, H, G_vec…, H_vec…` in compressed form, uppercase hex
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for point in self.all_points() {
            hasher.update(point.compress().as_bytes());
        }
        hex::encode_upper(hasher.finalize())
    }

    fn all_points(&self) -> impl Iterator<Item = &RistrettoPoint> {
        std::iter::once(&self.g)
            .chain(std::iter::once(&self.h))
            .chain(self.g_vec.iter())
            .chain(self.h_vec.iter())
    }

    /// Export the public generators for out-of-band comparison
    pub fn export(&self) -> GeneratorDump {
        GeneratorDump {
            protocol_version: PROTOCOL_VERSION.to_string(),
            generator_scheme: GENERATOR_SCHEME.to_string(),
            bit_length: self.len(),
            g: self.g.compress(),
            h: self.h.compress(),
            g_vec: self.g_vec.iter().map(|p| p.compress()).collect(),
            h_vec: self.h_vec.iter().map(|p| p.compress()).collect(),
            fingerprint: self.fingerprint(),
        }
    }

    /// Accept externally supplied generators only if they equal the fixed
    /// derivation element by element.
    pub fn from_dump(dump: &GeneratorDump) -> BulletproofsResult<Self> {
        if dump.protocol_version != PROTOCOL_VERSION {
            return Err(BulletproofsError::GeneratorMismatch(format!(
                "protocol version {} is not {}",
                dump.protocol_version, PROTOCOL_VERSION
            )));
        }
        if dump.generator_scheme != GENERATOR_SCHEME {
            return Err(BulletproofsError::GeneratorMismatch(format!(
                "generator scheme {} is not {}",
                dump.generator_scheme, GENERATOR_SCHEME
            )));
        }
        if dump.g_vec.len() != dump.bit_length || dump.h_vec.len() != dump.bit_length {
            return Err(BulletproofsError::GeneratorMismatch(format!(
                "expected {} vector generators, got G_vec={} H_vec={}",
                dump.bit_length,
                dump.g_vec.len(),
                dump.h_vec.len()
            )));
        }

        let expected = Self::new(dump.bit_length);
        let mismatch = |name: String| -> BulletproofsResult<Self> {
            Err(BulletproofsError::GeneratorMismatch(format!("{} differs", name)))
        };

        if dump.g != expected.g.compress() {
            return mismatch("G".to_string());
        }
        if dump.h != expected.h.compress() {
            return mismatch("H".to_string());
        }
        for (i, (got, want)) in dump.g_vec.iter().zip(expected.g_vec.iter()).enumerate() {
            if *got != want.compress() {
                return mismatch(format!("G_vec[{}]", i));
            }
        }
        for (i, (got, want)) in dump.h_vec.iter().zip(expected.h_vec.iter()).enumerate() {
            if *got != want.compress() {
                return mismatch(format!("H_vec[{}]", i));
            }
        }
        if !dump.fingerprint.eq_ignore_ascii_case(&expected.fingerprint()) {
            return mismatch("fingerprint".to_string());
        }

        Ok(expected)
    }
}

/// Serializable snapshot of a generator set
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorDump {
    pub protocol_version: String,
    pub generator_scheme: String,
    pub bit_length: usize,
    #[serde(rename = "G", with = "hex_point")]
    pub g: CompressedRistretto,
    #[serde(rename = "H", with = "hex_point")]
    pub h: CompressedRistretto,
    #[serde(rename = "G_vec", with = "hex_point_vec")]
    pub g_vec: Vec<CompressedRistretto>,
    #[serde(rename = "H_vec", with = "hex_point_vec")]
    pub h_vec: Vec<CompressedRistretto>,
    pub fingerprint: String,
}

impl GeneratorDump {
    pub fn to_json(&self) -> BulletproofsResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BulletproofsError::SerializationError(e.to_string()))
    }

    pub fn from_json(json: &str) -> BulletproofsResult<Self> {
        serde_json::from_str(json).map_err(|e| BulletproofsError::SerializationError(e.to_string()))
    }
}
