//! Protocol constants and deployment parameters

use crate::{BulletproofsError, BulletproofsResult};
use serde::{Deserialize, Serialize};

/// Protocol identifier, also used as the transcript domain separator
pub const PROTOCOL_VERSION: &str = "ICS-BULLETPROOF-V1";

/// Name of the generator derivation carried in generator dumps
pub const GENERATOR_SCHEME: &str = "HASHED_TO_GROUP_V1";

/// Merlin protocol label
pub const TRANSCRIPT_DOMAIN: &[u8] = b"ICS-BULLETPROOF-V1";

/// Label appended to `compress(G)` when deriving `H`
pub const H_LABEL: &[u8] = b"bulletproof_h";

/// Prefix for `G_vec[i]`
pub const G_VEC_PREFIX: &str = "bulletproof_g_";

/// Prefix for `H_vec[i]`
pub const H_VEC_PREFIX: &str = "bulletproof_h_";

/// Bit length used by the deployment
pub const DEFAULT_BIT_LENGTH: usize = 32;

/// Largest supported bit length; values are carried as `u64`
pub const MAX_BIT_LENGTH: usize = 64;

/// Fixed-point scale applied to sensor readings (1.5 -> 1500)
pub const VALUE_SCALE: u32 = 1000;

/// Deployment parameters, loadable from JSON
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProofParameters {
    pub bit_length: usize,
    pub value_scale: u32,
}

impl Default for ProofParameters {
    fn default() -> Self {
        Self {
            bit_length: DEFAULT_BIT_LENGTH,
            value_scale: VALUE_SCALE,
        }
    }
}

impl ProofParameters {
    /// Parse parameters from a JSON document, filling missing fields with defaults.
    pub fn from_json(json: &str) -> BulletproofsResult<Self> {
        let params: Self = serde_json::from_str(json)
            .map_err(|e| BulletproofsError::SerializationError(e.to_string()))?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> BulletproofsResult<()> {
        validate_bit_length(self.bit_length)?;
        if self.value_scale == 0 {
            return Err(BulletproofsError::InvalidParameters(
                "value_scale must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Bit lengths must be a power of two in `1..=64` so the inner-product
/// argument halves cleanly.
pub fn validate_bit_length(bit_length: usize) -> BulletproofsResult<()> {
    if bit_length == 0 || bit_length > MAX_BIT_LENGTH || !bit_length.is_power_of_two() {
        return Err(BulletproofsError::InvalidParameters(format!(
            "bit length must be a power of two in 1..={}, got {}",
            MAX_BIT_LENGTH, bit_length
        )));
    }
    Ok(())
}
