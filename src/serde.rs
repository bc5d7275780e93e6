//! JSON-deserializable record layout description.
//!
//! These types describe the field metadata that usually travels alongside a
//! point buffer. Deserialize a [CloudLayoutDef] and convert it with
//! [CloudLayoutDef::into_parts] to get descriptors, stride and endianness.

use serde::{Deserialize, Serialize};

use crate::{bytes::Endianness, field::FieldDescriptor};

/// Description of a single record field.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FieldDef {
    pub name: String,
    /// Byte offset from the start of the record.
    pub offset: usize,
    /// Datatype code (`1..=8`); other codes are kept and reported when decoding.
    pub datatype: u8,
    /// Element count; defaults to 1.
    #[serde(default = "default_count")]
    pub count: usize,
}

fn default_count() -> usize {
    1
}

/// Layout of every record in a buffer.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CloudLayoutDef {
    pub fields: Vec<FieldDef>,
    /// Record length in bytes; inferred from the fields when absent.
    #[serde(default)]
    pub stride: Option<usize>,
    #[serde(default)]
    pub is_bigendian: bool,
}

impl CloudLayoutDef {
    pub fn into_parts(self) -> (Vec<FieldDescriptor>, Option<usize>, Endianness) {
        (
            self.fields.into_iter().map(Into::into).collect(),
            self.stride,
            Endianness::from_big_endian_flag(self.is_bigendian),
        )
    }
}
