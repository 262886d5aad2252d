//! Error types for the qmlp-core library.
//!
//! Every fallible operation returns `QmlpResult<T>` instead of panicking.
//! On a microcontroller a panic halts the entire device, so a bad
//! configuration is reported as a value and handled at the boundary.

/// All possible error conditions in the qmlp-core library.
///
/// Every variant is a configuration error: a mismatch between the
/// deployed parameter blob (or caller-supplied buffers) and the sizes
/// the kernel was compiled for. Arithmetic saturation is not an error —
/// it is defined behavior of the quantized math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QmlpError {
    /// Parameter blob length does not match the compiled-in layout.
    BlobSizeMismatch {
        expected: usize,
        actual: usize,
    },
    /// A slice has the wrong element count for the declared dimensions.
    DimensionMismatch {
        expected: usize,
        actual: usize,
    },
    /// Softmax input exceeds the fixed scratch capacity.
    CapacityExceeded {
        capacity: usize,
        actual: usize,
    },
}

pub type QmlpResult<T> = Result<T, QmlpError>;
