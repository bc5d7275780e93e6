//! Error types for layout planning, buffer decoding and record encoding.

use thiserror::Error;

/// Errors produced when building a [crate::layout::LayoutPlan] from field descriptors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// Field spans end past the declared record stride.
    #[error("field layout spans {extent} bytes but the stride is {stride}")]
    LayoutOverflow { extent: usize, stride: usize },
    /// A field starts before the end of the previous field.
    #[error("field `{name}` at offset {offset} overlaps previous field ending at {cursor}")]
    OverlappingField {
        name: String,
        offset: usize,
        cursor: usize,
    },
    /// Field repeat count is zero.
    #[error("field `{name}` has a zero element count")]
    InvalidFieldCount { name: String },
    /// Datatype code is not in the registry and the policy forbids skipping it.
    #[error("field `{name}` has unknown datatype code {code}")]
    UnknownDatatype { name: String, code: u8 },
    /// A field ends past the addressable range and no stride was given.
    #[error("field `{name}` ends past the addressable range")]
    AddressOverflow { name: String },
    /// No stride was given and no field could be planned to infer one.
    #[error("cannot infer a record stride from an empty layout")]
    EmptyLayout,
}

/// Errors produced when decoding a raw buffer into a [crate::assembler::DecodedArray].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Buffer length disagrees with `rows * cols * stride`.
    #[error("buffer holds {actual} bytes but rows * cols * stride is {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
    /// `rows * cols * stride` does not fit in `usize`.
    #[error("grid dimensions overflow the addressable size")]
    DimensionOverflow,
    /// The field descriptors could not be planned.
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Errors produced when writing samples back into record bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EncodeError {
    /// Number of samples does not match what the plan consumes.
    #[error("expected {expected} samples, got {actual}")]
    SampleCountMismatch { expected: usize, actual: usize },
    /// Output buffer is not exactly one record (or one grid) long.
    #[error("output buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
    #[error("grid dimensions overflow the addressable size")]
    DimensionOverflow,
}
