//! Error types for range proof operations

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// The verifier check that rejected a proof.
///
/// Stages are listed in the order the verifier runs them; the first failing
/// stage short-circuits the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStage {
    /// Range bounds are not a valid interval for the bit length
    Bounds,
    /// A point or scalar failed to decode
    Decoding,
    /// The inner-product argument carries the wrong number of rounds
    RoundCount,
    /// The aggregated inner-product check did not reduce to the identity
    InnerProduct,
    /// `t·G + τx·H` did not match `z²·V + δ(y,z)·G + x·T1 + x²·T2`
    MainEquation,
}

impl fmt::Display for VerificationStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Bounds => "bounds",
            Self::Decoding => "decoding",
            Self::RoundCount => "round_count",
            Self::InnerProduct => "inner_product",
            Self::MainEquation => "main_equation",
        };
        f.write_str(name)
    }
}

/// Main error type for range proof operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BulletproofsError {
    /// Value lies outside the interval the caller asked to prove
    #[error("Value {value} is outside the range [{min}, {max}]")]
    OutOfRangeInput { value: i128, min: i128, max: i128 },

    /// Proof is structurally invalid: wrong round count, bad point encoding,
    /// non-canonical scalar
    #[error("Malformed proof: {0}")]
    MalformedProof(String),

    /// A verification equation did not hold
    #[error("Proof verification failed at stage {stage}")]
    VerificationFailed { stage: VerificationStage },

    /// Supplied generators differ from the fixed derivation
    #[error("Generator mismatch: {0}")]
    GeneratorMismatch(String),

    /// Invalid parameters provided
    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    /// Vector length mismatch
    #[error("Vector length mismatch: expected {expected}, got {actual}")]
    VectorLengthMismatch { expected: usize, actual: usize },

    /// Insufficient generators
    #[error("Insufficient generators: need {needed}, have {available}")]
    InsufficientGenerators { needed: usize, available: usize },

    /// Serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// The randomness source failed while sampling blinding factors
    #[error("Randomness source failure: {0}")]
    RandomnessFailure(String),
}

impl BulletproofsError {
    /// The verifier stage this error maps to, if it is a verification-time error.
    pub fn stage(&self) -> Option<VerificationStage> {
        match self {
            Self::VerificationFailed { stage } => Some(*stage),
            Self::MalformedProof(_) | Self::SerializationError(_) => Some(VerificationStage::Decoding),
            Self::OutOfRangeInput { .. } => Some(VerificationStage::Bounds),
            _ => None,
        }
    }
}

/// Result type for range proof operations
pub type BulletproofsResult<T> = Result<T, BulletproofsError>;
