//! Endianness-aware reads and writes of single numeric elements.
//!
//! Slices passed here must be exactly [Datatype::width] bytes long; the
//! layout planner guarantees this for every segment it emits.

use crate::datatype::Datatype;

/// Byte order of every multi-byte element in a buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Endianness {
    /// Least-significant byte first.
    #[default]
    Little,
    /// Most-significant byte first.
    Big,
}

impl Endianness {
    pub fn from_big_endian_flag(is_big_endian: bool) -> Self {
        if is_big_endian {
            Endianness::Big
        } else {
            Endianness::Little
        }
    }
}

macro_rules! read_as {
    ($ty:ty, $bytes:expr, $endianness:expr) => {{
        let mut raw = [0u8; core::mem::size_of::<$ty>()];
        raw.copy_from_slice($bytes);
        match $endianness {
            Endianness::Little => <$ty>::from_le_bytes(raw),
            Endianness::Big => <$ty>::from_be_bytes(raw),
        }
    }};
}

macro_rules! write_as {
    ($value:expr, $bytes:expr, $endianness:expr) => {{
        let raw = match $endianness {
            Endianness::Little => $value.to_le_bytes(),
            Endianness::Big => $value.to_be_bytes(),
        };
        $bytes.copy_from_slice(&raw);
    }};
}

/// Reads one element of `datatype` from `bytes` and widens it to `f64`.
pub fn read_sample(bytes: &[u8], datatype: Datatype, endianness: Endianness) -> f64 {
    debug_assert_eq!(bytes.len(), datatype.width());

    match datatype {
        Datatype::Int8 => read_as!(i8, bytes, endianness) as f64,
        Datatype::UInt8 => read_as!(u8, bytes, endianness) as f64,
        Datatype::Int16 => read_as!(i16, bytes, endianness) as f64,
        Datatype::UInt16 => read_as!(u16, bytes, endianness) as f64,
        Datatype::Int32 => read_as!(i32, bytes, endianness) as f64,
        Datatype::UInt32 => read_as!(u32, bytes, endianness) as f64,
        Datatype::Float32 => read_as!(f32, bytes, endianness) as f64,
        Datatype::Float64 => read_as!(f64, bytes, endianness),
    }
}

/// Narrows `value` to `datatype` and writes it into `bytes`.
///
/// Integer kinds use saturating `as` casts (NaN becomes 0).
pub fn write_sample(bytes: &mut [u8], value: f64, datatype: Datatype, endianness: Endianness) {
    debug_assert_eq!(bytes.len(), datatype.width());

    match datatype {
        Datatype::Int8 => write_as!(value as i8, bytes, endianness),
        Datatype::UInt8 => write_as!(value as u8, bytes, endianness),
        Datatype::Int16 => write_as!(value as i16, bytes, endianness),
        Datatype::UInt16 => write_as!(value as u16, bytes, endianness),
        Datatype::Int32 => write_as!(value as i32, bytes, endianness),
        Datatype::UInt32 => write_as!(value as u32, bytes, endianness),
        Datatype::Float32 => write_as!(value as f32, bytes, endianness),
        Datatype::Float64 => write_as!(value, bytes, endianness),
    }
}
