//! Approximate in-place softmax for quantized i8 logits.
//!
//! Max-subtraction for numerical stability, LUT-based exponentiation in
//! Q24.8, saturating u32 summation, then integer normalization into
//! [0, 127]. No floating point anywhere, so results are reproducible
//! cycle for cycle.

use crate::error::{QmlpError, QmlpResult};
use crate::lut::exp_q24_8;

/// Fixed scratch capacity of the softmax stage.
///
/// Part of the kernel's contract: an input longer than this is rejected
/// as a configuration error before any element is touched.
pub const SOFTMAX_MAX_LEN: usize = 16;

/// In-place approximate softmax over i8 logits.
///
/// 1. Find the maximum logit.
/// 2. Per element, look up `e^(x - max)` from the LUT (the shifted
///    value clamped to the table's [-128, 127] domain) and accumulate
///    a saturating u32 sum.
/// 3. Per element, emit `clamp(exp * 127 / sum, 0, 127)`; if the sum
///    is zero, emit all zeros rather than divide by zero.
///
/// The normalization multiply is widened to u64: exp values reach
/// `u32::MAX` and a 32-bit product would wrap.
///
/// Output is invariant under shifting all inputs by a common constant
/// (up to LUT clamping), and the largest input always receives the
/// largest output.
pub fn softmax_i8_inplace(values: &mut [i8]) -> QmlpResult<()> {
    if values.len() > SOFTMAX_MAX_LEN {
        return Err(QmlpError::CapacityExceeded {
            capacity: SOFTMAX_MAX_LEN,
            actual: values.len(),
        });
    }
    if values.is_empty() {
        return Ok(());
    }

    let mut max_val = values[0];
    for &v in values[1..].iter() {
        if v > max_val {
            max_val = v;
        }
    }

    let mut exps = [0u32; SOFTMAX_MAX_LEN];
    let mut sum_exp: u32 = 0;
    for (i, &v) in values.iter().enumerate() {
        // v - max is in [-255, 0]; the LUT domain is [-128, 127].
        let shifted = (v as i32 - max_val as i32).clamp(-128, 127) as i8;
        let e = exp_q24_8(shifted);
        exps[i] = e;
        sum_exp = sum_exp.saturating_add(e);
    }

    for (i, out) in values.iter_mut().enumerate() {
        *out = if sum_exp == 0 {
            0
        } else {
            let scaled = (exps[i] as u64 * 127) / sum_exp as u64;
            scaled.min(127) as i8
        };
    }
    Ok(())
}
