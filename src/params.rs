//! Typed views over the flat parameter blob.
//!
//! The blob is a single read-only byte buffer emitted by the offline
//! quantizing trainer: weights, biases, zero-points and per-channel
//! requantization (multiplier, shift) pairs for both layers, at fixed
//! offsets. The offset table below is the wire contract with the
//! trainer — no versioning, no bounds adjustment. A length mismatch is
//! a deployment error and fails fast at construction.
//!
//! All multi-byte words are little-endian, matching the MCU target the
//! blob is produced for. Decoding goes through `I32Lane`/`U32Lane`
//! views so the hot path never does raw offset arithmetic.

use crate::error::{QmlpError, QmlpResult};

// =============================================================================
// Blob layout (reference configuration: 784 -> 128 -> 10)
// =============================================================================

/// Total blob length in bytes. Anything else is rejected.
pub const PARAM_BLOB_LEN: usize = 103_432;

pub const HIDDEN_WEIGHTS_OFFSET: usize = 0;
pub const HIDDEN_WEIGHTS_LEN: usize = 100_352; // i8, 128 x 784
pub const HIDDEN_BIASES_OFFSET: usize = 100_352;
pub const HIDDEN_BIASES_LEN: usize = 512; // i32 x 128
pub const OUTPUT_WEIGHTS_OFFSET: usize = 100_864;
pub const OUTPUT_WEIGHTS_LEN: usize = 1_280; // i8, 10 x 128
pub const OUTPUT_BIASES_OFFSET: usize = 102_144;
pub const OUTPUT_BIASES_LEN: usize = 40; // i32 x 10
pub const INPUT_ZP_OFFSET: usize = 102_184;
pub const HIDDEN_ZP_OFFSET: usize = 102_185;
pub const HIDDEN_WEIGHT_ZPS_OFFSET: usize = 102_186;
pub const HIDDEN_WEIGHT_ZPS_LEN: usize = 128;
pub const LAYER1_MULTIPLIERS_OFFSET: usize = 102_316;
pub const LAYER1_MULTIPLIERS_LEN: usize = 512; // u32 x 128
pub const LAYER1_SHIFTS_OFFSET: usize = 102_828;
pub const LAYER1_SHIFTS_LEN: usize = 512; // i32 x 128
// One padding byte sits at offset 103_340 between the layer-1 shifts
// and the output zero-point. Part of the wire contract.
pub const OUTPUT_ZP_OFFSET: usize = 103_341;
pub const OUTPUT_WEIGHT_ZPS_OFFSET: usize = 103_342;
pub const OUTPUT_WEIGHT_ZPS_LEN: usize = 10;
pub const LAYER2_MULTIPLIERS_OFFSET: usize = 103_352;
pub const LAYER2_MULTIPLIERS_LEN: usize = 40; // u32 x 10
pub const LAYER2_SHIFTS_OFFSET: usize = 103_392;
pub const LAYER2_SHIFTS_LEN: usize = 40; // i32 x 10

/// Reinterpret a byte region as i8 values.
///
/// SAFETY: i8 and u8 have identical size (1) and alignment (1).
/// Reinterpreting is safe per Rust's type layout guarantees.
pub(crate) fn as_i8(bytes: &[u8]) -> &[i8] {
    unsafe { core::slice::from_raw_parts(bytes.as_ptr() as *const i8, bytes.len()) }
}

// =============================================================================
// Word lanes
// =============================================================================

/// Zero-copy view of a byte region holding little-endian i32 words.
///
/// Decoding per element with `from_le_bytes` sidesteps the alignment
/// requirements a `&[i32]` reinterpretation would impose on the blob.
#[derive(Clone, Copy, Debug)]
pub struct I32Lane<'b> {
    bytes: &'b [u8],
}

impl<'b> I32Lane<'b> {
    /// Create a lane over a byte region. Length must be a multiple of 4.
    pub fn new(bytes: &'b [u8]) -> QmlpResult<Self> {
        if bytes.len() % 4 != 0 {
            return Err(QmlpError::DimensionMismatch {
                expected: (bytes.len() / 4 + 1) * 4,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes })
    }

    /// Number of i32 words in the lane.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bytes.len() / 4
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode the word at `index`. Indices come from lengths validated
    /// at construction; out-of-range access panics like slice indexing.
    #[inline(always)]
    pub fn get(&self, index: usize) -> i32 {
        let o = index * 4;
        i32::from_le_bytes([
            self.bytes[o],
            self.bytes[o + 1],
            self.bytes[o + 2],
            self.bytes[o + 3],
        ])
    }
}

/// Zero-copy view of a byte region holding little-endian u32 words.
#[derive(Clone, Copy, Debug)]
pub struct U32Lane<'b> {
    bytes: &'b [u8],
}

impl<'b> U32Lane<'b> {
    /// Create a lane over a byte region. Length must be a multiple of 4.
    pub fn new(bytes: &'b [u8]) -> QmlpResult<Self> {
        if bytes.len() % 4 != 0 {
            return Err(QmlpError::DimensionMismatch {
                expected: (bytes.len() / 4 + 1) * 4,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes })
    }

    /// Number of u32 words in the lane.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.bytes.len() / 4
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode the word at `index`.
    #[inline(always)]
    pub fn get(&self, index: usize) -> u32 {
        let o = index * 4;
        u32::from_le_bytes([
            self.bytes[o],
            self.bytes[o + 1],
            self.bytes[o + 2],
            self.bytes[o + 3],
        ])
    }
}

// =============================================================================
// Parameter blob
// =============================================================================

/// Length-validated view over the full parameter blob.
///
/// Constructed once at initialization; every accessor slices a named
/// region out of the table above. The blob is immutable for the process
/// lifetime, so the views may be shared across execution contexts
/// without synchronization.
#[derive(Clone, Copy, Debug)]
pub struct ParamBlob<'b> {
    bytes: &'b [u8],
}

impl<'b> ParamBlob<'b> {
    /// Validate the total length and wrap the blob.
    pub fn new(bytes: &'b [u8]) -> QmlpResult<Self> {
        if bytes.len() != PARAM_BLOB_LEN {
            return Err(QmlpError::BlobSizeMismatch {
                expected: PARAM_BLOB_LEN,
                actual: bytes.len(),
            });
        }
        Ok(Self { bytes })
    }

    #[inline(always)]
    fn region(&self, offset: usize, len: usize) -> &'b [u8] {
        &self.bytes[offset..offset + len]
    }

    /// Lane constructors cannot fail here: every region length in the
    /// layout table is a multiple of 4 by construction.
    fn word_region(&self, offset: usize, len: usize) -> &'b [u8] {
        debug_assert!(len % 4 == 0);
        self.region(offset, len)
    }

    pub fn hidden_weights(&self) -> &'b [i8] {
        as_i8(self.region(HIDDEN_WEIGHTS_OFFSET, HIDDEN_WEIGHTS_LEN))
    }

    pub fn hidden_biases(&self) -> I32Lane<'b> {
        I32Lane { bytes: self.word_region(HIDDEN_BIASES_OFFSET, HIDDEN_BIASES_LEN) }
    }

    pub fn output_weights(&self) -> &'b [i8] {
        as_i8(self.region(OUTPUT_WEIGHTS_OFFSET, OUTPUT_WEIGHTS_LEN))
    }

    pub fn output_biases(&self) -> I32Lane<'b> {
        I32Lane { bytes: self.word_region(OUTPUT_BIASES_OFFSET, OUTPUT_BIASES_LEN) }
    }

    pub fn input_zero_point(&self) -> i8 {
        self.bytes[INPUT_ZP_OFFSET] as i8
    }

    pub fn hidden_zero_point(&self) -> i8 {
        self.bytes[HIDDEN_ZP_OFFSET] as i8
    }

    pub fn output_zero_point(&self) -> i8 {
        self.bytes[OUTPUT_ZP_OFFSET] as i8
    }

    pub fn hidden_weight_zero_points(&self) -> &'b [i8] {
        as_i8(self.region(HIDDEN_WEIGHT_ZPS_OFFSET, HIDDEN_WEIGHT_ZPS_LEN))
    }

    pub fn output_weight_zero_points(&self) -> &'b [i8] {
        as_i8(self.region(OUTPUT_WEIGHT_ZPS_OFFSET, OUTPUT_WEIGHT_ZPS_LEN))
    }

    pub fn layer1_multipliers(&self) -> U32Lane<'b> {
        U32Lane { bytes: self.word_region(LAYER1_MULTIPLIERS_OFFSET, LAYER1_MULTIPLIERS_LEN) }
    }

    pub fn layer1_shifts(&self) -> I32Lane<'b> {
        I32Lane { bytes: self.word_region(LAYER1_SHIFTS_OFFSET, LAYER1_SHIFTS_LEN) }
    }

    pub fn layer2_multipliers(&self) -> U32Lane<'b> {
        U32Lane { bytes: self.word_region(LAYER2_MULTIPLIERS_OFFSET, LAYER2_MULTIPLIERS_LEN) }
    }

    pub fn layer2_shifts(&self) -> I32Lane<'b> {
        I32Lane { bytes: self.word_region(LAYER2_SHIFTS_OFFSET, LAYER2_SHIFTS_LEN) }
    }
}
