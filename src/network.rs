//! The fixed two-layer MLP pipeline: dense+ReLU -> dense -> softmax.
//!
//! `Mlp` is a pair of `DenseLayer` views sliced out of the parameter
//! blob once at initialization. It holds no mutable state: `forward` is
//! a pure function of (input, blob) and may run concurrently from
//! multiple execution contexts with distinct buffers.

use crate::dense::DenseLayer;
use crate::error::QmlpResult;
use crate::math::argmax_i8;
use crate::params::ParamBlob;
use crate::softmax::softmax_i8_inplace;

/// Flattened 28 x 28 input image.
pub const INPUT_SIZE: usize = 784;
pub const HIDDEN_SIZE: usize = 128;
pub const OUTPUT_SIZE: usize = 10;

/// The fixed 784 -> 128 -> 10 quantized MLP.
pub struct Mlp<'b> {
    hidden: DenseLayer<'b>,
    output: DenseLayer<'b>,
    input_zero_point: i8,
}

impl<'b> Mlp<'b> {
    /// Build both layer views from a validated parameter blob.
    pub fn new(blob: &ParamBlob<'b>) -> QmlpResult<Self> {
        let hidden = DenseLayer::new(
            blob.hidden_weights(),
            blob.hidden_weight_zero_points(),
            blob.hidden_biases(),
            blob.layer1_multipliers(),
            blob.layer1_shifts(),
            blob.hidden_zero_point(),
            INPUT_SIZE,
            HIDDEN_SIZE,
        )?;
        let output = DenseLayer::new(
            blob.output_weights(),
            blob.output_weight_zero_points(),
            blob.output_biases(),
            blob.layer2_multipliers(),
            blob.layer2_shifts(),
            blob.output_zero_point(),
            HIDDEN_SIZE,
            OUTPUT_SIZE,
        )?;
        Ok(Self {
            hidden,
            output,
            input_zero_point: blob.input_zero_point(),
        })
    }

    /// Run the full forward pass.
    ///
    /// dense+ReLU into a stack-allocated hidden buffer, dense into
    /// `outputs`, then softmax in place. Buffer sizes are enforced by
    /// the array types, so byte-identical inputs always produce
    /// byte-identical outputs.
    pub fn forward(
        &self,
        inputs: &[i8; INPUT_SIZE],
        outputs: &mut [i8; OUTPUT_SIZE],
    ) -> QmlpResult<()> {
        let mut hiddens = [0i8; HIDDEN_SIZE];
        self.hidden
            .forward_relu(inputs, self.input_zero_point, &mut hiddens)?;
        self.output
            .forward(&hiddens, self.hidden.output_zero_point(), outputs)?;
        softmax_i8_inplace(outputs)
    }

    /// Forward pass plus argmax: the winning class index.
    pub fn predict(&self, inputs: &[i8; INPUT_SIZE]) -> QmlpResult<usize> {
        let mut outputs = [0i8; OUTPUT_SIZE];
        self.forward(inputs, &mut outputs)?;
        argmax_i8(&outputs)
    }
}
