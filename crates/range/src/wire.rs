//! JSON envelope exchanged with the transport layer:
//!
//! ```text
//! {
//!   "commitment": "<hex point>",
//!   "proof": { "A", "S", "T1", "T2", "tau_x", "mu", "t", "inner_product_proof": { "L", "R", "a", "b" } },
//!   "range_min": <int>, "range_max": <int>
//! }
//! ```

use crate::{RangeBounds, RangeProof, RangeVerifier, VerificationResult};
use bulletproofs_core::{BulletproofsError, BulletproofsResult, Commitment};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofEnvelope {
    pub commitment: Commitment,
    pub proof: RangeProof,
    pub range_min: i64,
    pub range_max: i64,
}

impl ProofEnvelope {
    pub fn new(commitment: Commitment, proof: RangeProof, bounds: RangeBounds) -> Self {
        Self {
            commitment,
            proof,
            range_min: bounds.min,
            range_max: bounds.max,
        }
    }

    pub fn bounds(&self) -> RangeBounds {
        RangeBounds::new(self.range_min, self.range_max)
    }

    pub fn to_json(&self) -> BulletproofsResult<String> {
        serde_json::to_string(self).map_err(|e| BulletproofsError::SerializationError(e.to_string()))
    }

    pub fn to_json_pretty(&self) -> BulletproofsResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| BulletproofsError::SerializationError(e.to_string()))
    }

    /// Invalid points and non-canonical scalars surface as malformed proofs
    pub fn from_json(json: &str) -> BulletproofsResult<Self> {
        serde_json::from_str(json).map_err(|e| BulletproofsError::MalformedProof(e.to_string()))
    }

    pub fn verify(&self, verifier: &RangeVerifier<'_>) -> VerificationResult {
        verifier.verify_with_bounds(&self.commitment, &self.proof, &self.bounds())
    }
}
