//! # qmlp-core: integer-only quantized MLP inference kernel
//!
//! A `no_std` Rust library implementing a two-layer perceptron
//! (dense -> ReLU -> dense -> softmax) entirely in 8-bit integer
//! arithmetic, for deterministic MNIST-class inference on
//! microcontrollers (ESP32, STM32, Cortex-M).
//!
//! ## Architecture
//!
//! - **Parameter Blob**: one immutable byte buffer holding weights,
//!   biases, zero-points and per-channel (multiplier, shift) pairs,
//!   parsed once into typed views
//! - **Requantization**: affine int8 with saturating-rounding
//!   multiply-high plus rounding power-of-two shift. No float division
//! - **Softmax**: 256-entry Q24.8 `e^x` lookup table, saturating sums
//! - **No allocation**: all buffers are fixed-size, stack- or
//!   caller-owned
//!
//! ## Usage
//!
//! ```ignore
//! use qmlp_core::*;
//!
//! static PARAMS: &[u8] = include_bytes!("params.bin");
//!
//! let blob = ParamBlob::new(PARAMS)?;
//! let mlp = Mlp::new(&blob)?;
//!
//! let inputs: [i8; INPUT_SIZE] = quantized_image();
//! let mut outputs = [0i8; OUTPUT_SIZE];
//! mlp.forward(&inputs, &mut outputs)?;
//! let class = mlp.predict(&inputs)?;
//! ```

#![no_std]

#[cfg(feature = "std")]
extern crate std;

pub mod dense;
pub mod error;
pub mod lut;
pub mod math;
pub mod network;
pub mod params;
pub mod softmax;

// Re-export primary types
pub use dense::DenseLayer;
pub use error::{QmlpError, QmlpResult};
pub use lut::{exp_q24_8, EXP_LUT};
pub use math::{
    argmax_i8, multiply_by_quantized_multiplier, relu_i8, rounding_divide_by_pot,
    saturate_to_i8, saturating_rounding_doubling_high_mul,
};
pub use network::{Mlp, HIDDEN_SIZE, INPUT_SIZE, OUTPUT_SIZE};
pub use params::{I32Lane, ParamBlob, U32Lane, PARAM_BLOB_LEN};
pub use softmax::{softmax_i8_inplace, SOFTMAX_MAX_LEN};
