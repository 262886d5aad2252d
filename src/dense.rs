//! Quantized dense (fully-connected) layer with affine requantization.
//!
//! A layer is a set of borrowed views into the parameter blob: weights
//! in Flash, per-channel weight zero-points, i32 biases and per-channel
//! (multiplier, shift) pairs. Weights live row-major, one row per
//! output channel, so the inner loop walks contiguous memory.

use crate::error::{QmlpError, QmlpResult};
use crate::math::{multiply_by_quantized_multiplier, relu_i8, saturate_to_i8};
use crate::params::{I32Lane, U32Lane};

/// One quantized dense layer: borrowed parameter views plus dimensions.
///
/// Two instances exist in the fixed pipeline (hidden and output), both
/// borrowing from the same blob. The struct holds no mutable state.
#[derive(Debug)]
pub struct DenseLayer<'b> {
    weights: &'b [i8],
    weight_zero_points: &'b [i8],
    biases: I32Lane<'b>,
    multipliers: U32Lane<'b>,
    shifts: I32Lane<'b>,
    output_zero_point: i8,
    input_size: usize,
    output_size: usize,
}

impl<'b> DenseLayer<'b> {
    /// Create a layer view, validating every region against the
    /// declared dimensions. Fails fast at construction time.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        weights: &'b [i8],
        weight_zero_points: &'b [i8],
        biases: I32Lane<'b>,
        multipliers: U32Lane<'b>,
        shifts: I32Lane<'b>,
        output_zero_point: i8,
        input_size: usize,
        output_size: usize,
    ) -> QmlpResult<Self> {
        if weights.len() != output_size * input_size {
            return Err(QmlpError::DimensionMismatch {
                expected: output_size * input_size,
                actual: weights.len(),
            });
        }
        if weight_zero_points.len() != output_size {
            return Err(QmlpError::DimensionMismatch {
                expected: output_size,
                actual: weight_zero_points.len(),
            });
        }
        if biases.len() != output_size {
            return Err(QmlpError::DimensionMismatch {
                expected: output_size,
                actual: biases.len(),
            });
        }
        if multipliers.len() != output_size {
            return Err(QmlpError::DimensionMismatch {
                expected: output_size,
                actual: multipliers.len(),
            });
        }
        if shifts.len() != output_size {
            return Err(QmlpError::DimensionMismatch {
                expected: output_size,
                actual: shifts.len(),
            });
        }
        Ok(Self {
            weights,
            weight_zero_points,
            biases,
            multipliers,
            shifts,
            output_zero_point,
            input_size,
            output_size,
        })
    }

    pub fn input_size(&self) -> usize {
        self.input_size
    }

    pub fn output_size(&self) -> usize {
        self.output_size
    }

    /// Zero-point of this layer's output activations.
    pub fn output_zero_point(&self) -> i8 {
        self.output_zero_point
    }

    /// Affine matrix-vector product with integer requantization.
    ///
    /// Per output channel: accumulate zero-point-corrected products in
    /// i32, add the bias, rescale through the per-channel (multiplier,
    /// shift) pair, re-center on the output zero-point and saturate to
    /// i8.
    ///
    /// Precondition (not checked at runtime): `input_size` is small
    /// enough that the i32 accumulator cannot overflow. Corrected
    /// operands span [-255, 255], so anything below ~33 000 inputs is
    /// safe; the reference configuration peaks at 784.
    pub fn forward(
        &self,
        inputs: &[i8],
        input_zero_point: i8,
        outputs: &mut [i8],
    ) -> QmlpResult<()> {
        if inputs.len() != self.input_size {
            return Err(QmlpError::DimensionMismatch {
                expected: self.input_size,
                actual: inputs.len(),
            });
        }
        if outputs.len() != self.output_size {
            return Err(QmlpError::DimensionMismatch {
                expected: self.output_size,
                actual: outputs.len(),
            });
        }

        let input_zp = input_zero_point as i32;
        for oc in 0..self.output_size {
            let weight_zp = self.weight_zero_points[oc] as i32;
            let row = &self.weights[oc * self.input_size..(oc + 1) * self.input_size];

            let mut acc: i32 = 0;
            for (&x, &w) in inputs.iter().zip(row.iter()) {
                acc += (x as i32 - input_zp) * (w as i32 - weight_zp);
            }

            acc += self.biases.get(oc);
            acc = multiply_by_quantized_multiplier(
                acc,
                self.multipliers.get(oc),
                self.shifts.get(oc),
            );
            acc += self.output_zero_point as i32;

            outputs[oc] = saturate_to_i8(acc);
        }
        Ok(())
    }

    /// `forward` followed by in-place ReLU.
    ///
    /// The ReLU floor is the output zero-point: quantized zero is
    /// `output_zero_point`, not literal 0.
    pub fn forward_relu(
        &self,
        inputs: &[i8],
        input_zero_point: i8,
        outputs: &mut [i8],
    ) -> QmlpResult<()> {
        self.forward(inputs, input_zero_point, outputs)?;
        relu_i8(outputs, self.output_zero_point);
        Ok(())
    }
}
