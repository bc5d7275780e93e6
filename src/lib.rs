//! # pointcraft
//!
//! Decoding of fixed-stride structured point records laid out on a 2-D grid.
//!
//! Describe each record with [FieldDescriptor]s (name, byte offset, datatype
//! code, element count), plan the layout once, then decode raw buffers into a
//! dense `[rows][cols][samples]` array of `f64`. Gaps between fields are
//! skipped, every element honours the buffer's endianness, and fields with
//! unknown datatype codes are reported instead of aborting the decode.
//!
//! ## Example
//!
//! ```
//! use pointcraft::{DecodeRequest, Datatype, Endianness, FieldDescriptor, decode};
//!
//! let fields = vec![
//!     FieldDescriptor::new("x", 0, Datatype::Float32, 1),
//!     FieldDescriptor::new("intensity", 8, Datatype::UInt16, 1),
//! ];
//!
//! let mut data = vec![0u8; 12];
//! data[0..4].copy_from_slice(&1.0f32.to_le_bytes());
//! data[8..10].copy_from_slice(&300u16.to_le_bytes());
//!
//! let decoded = decode(&DecodeRequest {
//!     data: &data,
//!     rows: 1,
//!     cols: 1,
//!     stride: Some(12),
//!     endianness: Endianness::Little,
//!     fields: &fields,
//! })
//! .unwrap();
//!
//! assert_eq!(decoded.array.shape(), &[2]);
//! assert_eq!(decoded.array.data().iter().copied().collect::<Vec<_>>(), vec![1.0, 300.0]);
//! ```

pub mod assembler;
pub mod bytes;
pub mod datatype;
pub mod decoder;
pub mod errors;
pub mod field;
pub mod layout;
pub mod options;
mod record;
#[cfg(feature = "serde")]
pub mod serde;

pub use assembler::{DecodedArray, assemble, encode_records};
pub use bytes::Endianness;
pub use datatype::Datatype;
pub use decoder::{DecodeRequest, Decoded, Decoder, decode};
pub use errors::{DecodeError, EncodeError, LayoutError};
pub use field::{DatatypeCode, FieldDescriptor};
pub use layout::{Column, Diagnostic, LayoutPlan, Segment, SegmentKind};
pub use options::{DecodeOptions, UnknownDatatypePolicy};
