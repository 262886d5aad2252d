//! Integer-only arithmetic primitives for quantized i8 inference.
//!
//! All multiply-accumulate work happens in i32; the requantization path
//! back to i8 uses a fixed-point (multiplier, shift) pair instead of
//! floating-point division, so results are bit-identical across targets
//! with and without an FPU.
//!
//! Accumulation bound: for two i8 values, |x * w| ≤ 255 * 255 = 65025
//! (zero-point-corrected operands span [-255, 255]). Summing k products
//! stays inside i32 for k up to ~33 000 — far above the 784-element
//! inner dimension this kernel supports.

// =============================================================================
// Saturation
// =============================================================================

/// Saturate a 32-bit accumulator to the i8 range [-128, 127].
#[inline]
pub fn saturate_to_i8(x: i32) -> i8 {
    x.clamp(i8::MIN as i32, i8::MAX as i32) as i8
}

// =============================================================================
// Fixed-point requantization primitives
// =============================================================================

/// Saturating rounding doubling high multiply: `round(a * b / 2^31)`.
///
/// Returns the high 32 bits of the doubled 64-bit product, rounded to
/// nearest with ties toward positive infinity. The single overflowing
/// input pair `(i32::MIN, i32::MIN)` saturates to `i32::MAX` instead of
/// wrapping.
///
/// The rounding nudge pairs with a truncating division, not an
/// arithmetic shift; a `>>` here would floor negative products and
/// change their rounding.
#[inline]
pub fn saturating_rounding_doubling_high_mul(a: i32, b: i32) -> i32 {
    if a == i32::MIN && b == i32::MIN {
        return i32::MAX;
    }

    let ab = i64::from(a) * i64::from(b);
    let nudge: i64 = if ab >= 0 { 1 << 30 } else { 1 - (1 << 30) };
    ((ab + nudge) / (1i64 << 31)) as i32
}

/// Rounding arithmetic right shift by a power of two.
///
/// `exponent` must be in [0, 31]. Rounds to nearest; the tie threshold
/// is biased by one for negative inputs so that halves round away from
/// zero, matching the reference requantization scheme. A plain `>>`
/// here truncates toward negative infinity and shifts classification
/// results on boundary accumulators.
#[inline]
pub fn rounding_divide_by_pot(x: i32, exponent: i32) -> i32 {
    debug_assert!((0..=31).contains(&exponent));

    // (1i32 << 31) overflows; build the mask in 64-bit.
    let mask = ((1i64 << exponent) - 1) as i32;
    let remainder = x & mask;
    let threshold = (mask >> 1) + i32::from(x < 0);
    (x >> exponent) + i32::from(remainder > threshold)
}

/// Rescale a 32-bit accumulator by a per-channel quantized multiplier.
///
/// `multiplier` carries the ratio `(input_scale * weight_scale) /
/// output_scale` as a fraction in [0.5, 1.0) scaled to 2^31; `shift` is
/// the remaining power-of-two right shift. The multiplier bits are
/// reinterpreted as i32 for the high multiply.
#[inline]
pub fn multiply_by_quantized_multiplier(value: i32, multiplier: u32, shift: i32) -> i32 {
    let high = saturating_rounding_doubling_high_mul(value, multiplier as i32);
    rounding_divide_by_pot(high, shift)
}

// =============================================================================
// Activations
// =============================================================================

/// In-place ReLU for quantized i8 data.
///
/// The clamp floor is the output zero-point, not literal 0: in the
/// quantized domain, real 0.0 is represented by `zero_point`.
#[inline]
pub fn relu_i8(data: &mut [i8], zero_point: i8) {
    for val in data.iter_mut() {
        if *val < zero_point {
            *val = zero_point;
        }
    }
}

// =============================================================================
// Classification helpers
// =============================================================================

/// Argmax of an i8 slice. Returns the index of the maximum value,
/// first occurrence winning ties.
pub fn argmax_i8(data: &[i8]) -> crate::QmlpResult<usize> {
    if data.is_empty() {
        return Err(crate::QmlpError::DimensionMismatch { expected: 1, actual: 0 });
    }

    let mut max_idx = 0;
    let mut max_val = data[0];
    for (i, &val) in data.iter().enumerate().skip(1) {
        if val > max_val {
            max_val = val;
            max_idx = i;
        }
    }
    Ok(max_idx)
}
