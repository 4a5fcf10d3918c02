//! Mapping application values into the provable interval.
//!
//! Values live in a fixed-point integer domain (readings × `VALUE_SCALE`).
//! A proof for bounds `[min, max]` commits to `value` and proves that
//! `V − min·G` opens to an offset in `[0, 2^n)`. `min` and the bit length are
//! bound by the proof; `max` is checked when proving and when validating
//! bounds, not cryptographically.

use bulletproofs_core::{utils::fits_in_bits, BulletproofsError, BulletproofsResult};
use serde::{Deserialize, Serialize};

/// Inclusive interval in the scaled integer domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeBounds {
    pub min: i64,
    pub max: i64,
}

impl RangeBounds {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }
    }

    /// `[0, 2^n − 1]`, saturating at `i64::MAX` for `n = 64`
    pub fn full(bit_length: usize) -> Self {
        let max = if bit_length >= 63 { i64::MAX } else { (1i64 << bit_length) - 1 };
        Self { min: 0, max }
    }

    /// Scale sensor-unit bounds into the integer domain
    pub fn from_readings(min: f64, max: f64, scale: u32) -> BulletproofsResult<Self> {
        Ok(Self {
            min: scale_reading(min, scale)?,
            max: scale_reading(max, scale)?,
        })
    }

    /// `min < max` and `max − min ≤ 2^n − 1`
    pub fn validate(&self, bit_length: usize) -> BulletproofsResult<()> {
        if self.min >= self.max {
            return Err(BulletproofsError::InvalidParameters(format!(
                "range_min {} must be below range_max {}",
                self.min, self.max
            )));
        }
        let width = self.max as i128 - self.min as i128;
        if !fits_in_bits(width as u64, bit_length) {
            return Err(BulletproofsError::InvalidParameters(format!(
                "range width {} does not fit in {} bits",
                width, bit_length
            )));
        }
        Ok(())
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    /// The offset `value − min` whose bits the proof describes
    pub fn offset(&self, value: i64, bit_length: usize) -> BulletproofsResult<u64> {
        self.validate(bit_length)?;
        if !self.contains(value) {
            return Err(BulletproofsError::OutOfRangeInput {
                value: value as i128,
                min: self.min as i128,
                max: self.max as i128,
            });
        }
        Ok((value as i128 - self.min as i128) as u64)
    }
}

/// Convert a reading to the fixed-point domain, rounding to nearest
/// (`1.5` at scale 1000 becomes `1500`).
pub fn scale_reading(reading: f64, scale: u32) -> BulletproofsResult<i64> {
    let scaled = (reading * f64::from(scale)).round();
    // i64::MAX as f64 rounds up to 2^63, so the upper bound is exclusive
    if !scaled.is_finite() || scaled < i64::MIN as f64 || scaled >= i64::MAX as f64 {
        return Err(BulletproofsError::InvalidParameters(format!(
            "reading {} cannot be represented at scale {}",
            reading, scale
        )));
    }
    Ok(scaled as i64)
}
