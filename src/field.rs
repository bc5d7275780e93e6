//! Field descriptors: the per-request description of one named sub-region of a record.

use crate::datatype::Datatype;

/// Raw datatype code as carried on the wire. May name a type outside the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DatatypeCode(pub u8);

impl DatatypeCode {
    /// Resolves the code through the registry.
    pub fn resolve(&self) -> Option<Datatype> {
        Datatype::from_code(self.0)
    }
}

impl From<Datatype> for DatatypeCode {
    fn from(value: Datatype) -> Self {
        DatatypeCode(value.code())
    }
}

/// A single named, offset-positioned, typed and possibly repeated field.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDescriptor {
    /// Name used for sample labels and column lookup.
    pub name: String,
    /// Byte offset of the first element from the start of the record.
    pub offset: usize,
    /// Element type code.
    pub datatype: DatatypeCode,
    /// Number of consecutive elements.
    pub count: usize,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, offset: usize, datatype: Datatype, count: usize) -> Self {
        FieldDescriptor {
            name: name.into(),
            offset,
            datatype: datatype.into(),
            count,
        }
    }

    /// Builds a descriptor with a raw code, which need not be registered.
    pub fn with_code(name: impl Into<String>, offset: usize, code: u8, count: usize) -> Self {
        FieldDescriptor {
            name: name.into(),
            offset,
            datatype: DatatypeCode(code),
            count,
        }
    }
}

#[cfg(feature = "serde")]
impl From<crate::serde::FieldDef> for FieldDescriptor {
    fn from(value: crate::serde::FieldDef) -> Self {
        FieldDescriptor {
            name: value.name,
            offset: value.offset,
            datatype: DatatypeCode(value.datatype),
            count: value.count,
        }
    }
}
