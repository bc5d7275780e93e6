//! Registry of the fixed-width numeric element types a record field may hold.
//!
//! Codes follow the usual point-cloud field numbering: `1..=8` for
//! int8, uint8, int16, uint16, int32, uint32, float32 and float64.

/// Numeric element type of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Datatype {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float32,
    Float64,
}

/// Every known datatype, indexed by `code - 1`.
pub const REGISTRY: [Datatype; 8] = [
    Datatype::Int8,
    Datatype::UInt8,
    Datatype::Int16,
    Datatype::UInt16,
    Datatype::Int32,
    Datatype::UInt32,
    Datatype::Float32,
    Datatype::Float64,
];

impl Datatype {
    /// Looks up a wire code. Returns `None` for codes outside the registry.
    pub const fn from_code(code: u8) -> Option<Datatype> {
        match code {
            1..=8 => Some(REGISTRY[(code - 1) as usize]),
            _ => None,
        }
    }

    pub const fn code(&self) -> u8 {
        match self {
            Datatype::Int8 => 1,
            Datatype::UInt8 => 2,
            Datatype::Int16 => 3,
            Datatype::UInt16 => 4,
            Datatype::Int32 => 5,
            Datatype::UInt32 => 6,
            Datatype::Float32 => 7,
            Datatype::Float64 => 8,
        }
    }

    /// Element width in bytes.
    pub const fn width(&self) -> usize {
        match self {
            Datatype::Int8 => core::mem::size_of::<i8>(),
            Datatype::UInt8 => core::mem::size_of::<u8>(),
            Datatype::Int16 => core::mem::size_of::<i16>(),
            Datatype::UInt16 => core::mem::size_of::<u16>(),
            Datatype::Int32 => core::mem::size_of::<i32>(),
            Datatype::UInt32 => core::mem::size_of::<u32>(),
            Datatype::Float32 => core::mem::size_of::<f32>(),
            Datatype::Float64 => core::mem::size_of::<f64>(),
        }
    }

    pub const fn is_float(&self) -> bool {
        matches!(self, Datatype::Float32 | Datatype::Float64)
    }

    pub const fn is_signed(&self) -> bool {
        matches!(
            self,
            Datatype::Int8 | Datatype::Int16 | Datatype::Int32 | Datatype::Float32 | Datatype::Float64
        )
    }
}
