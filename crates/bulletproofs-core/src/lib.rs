//! # Bulletproofs Core
//!
//! Foundational pieces shared by the inner-product argument and the range
//! proof crates:
//!
//! - Ristretto255 group elements and the wire encodings of points and scalars
//! - Hash-to-group generator derivation with export and comparison
//! - Pedersen commitments
//! - The Fiat-Shamir transcript
//! - Protocol constants and error types
//!
//! ## Mathematical Background
//!
//! All arithmetic happens in the prime-order Ristretto group with generators:
//! - `G`: value base (the Ristretto basepoint)
//! - `H`: blinding base
//! - `{G_i}`, `{H_i}`: vector generators for the bit-decomposition vectors
//!
//! A Pedersen commitment to `v` with blinding `γ` is
//! ```text
//! V = v·G + γ·H
//! ```
//! which is hiding because `γ` is uniform and binding because nobody knows
//! `log_G(H)`.

pub mod commitment;
pub mod config;
pub mod encoding;
pub mod errors;
pub mod generators;
pub mod group;
pub mod transcript;
pub mod utils;

pub use commitment::*;
pub use errors::*;
pub use generators::*;
pub use group::*;
pub use transcript::*;

/// Re-export commonly used types from curve25519-dalek
pub use curve25519_dalek::{
    ristretto::{CompressedRistretto, RistrettoPoint},
    scalar::Scalar,
    traits::{Identity, VartimeMultiscalarMul},
};
