//! # Inner Product Argument (IPA)
//!
//! Proves knowledge of vectors `a` and `b` such that:
//!
//! ```text
//! P = <a, G> + <b, H> + <a,b>·Q
//! ```
//!
//! in `log2(n)` rounds.
//!
//! ## Mathematical Background
//!
//! For vectors of length `n > 1`:
//! - Split vectors: `a = (a_L, a_R)`, `b = (b_L, b_R)`
//! - Compute cross terms:
//!   - `L = <a_L, G_R> + <b_R, H_L> + <a_L, b_R>·Q`
//!   - `R = <a_R, G_L> + <b_L, H_R> + <a_R, b_L>·Q`
//! - Absorb `L`, `R` and derive challenge `u`
//! - Fold vectors:
//!   - `a' = a_L·u + a_R·u⁻¹`
//!   - `b' = b_L·u⁻¹ + b_R·u`
//! - Fold generators:
//!   - `G' = G_L·u⁻¹ + G_R·u`
//!   - `H' = H_L·u + H_R·u⁻¹`
//! - Recurse until length 1, leaving scalars `a`, `b`.
//!
//! The verifier never folds generators. It recovers the coefficients
//! `s_i = Π u_j^{±1}` from the challenges and checks everything in a single
//! multiscalar multiplication. [`InnerProductProof::verification_scalars`]
//! exposes those coefficients so the range verifier can merge the check into
//! its own equation.

pub mod proof;
pub mod prover;
pub mod verifier;

pub use proof::*;
pub use prover::*;
pub use verifier::*;
