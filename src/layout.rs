//! Layout planning: turns field descriptors into an ordered list of pad and field
//! segments covering exactly one record.
//!
//! Planning happens once per schema. Decoding then walks the finished
//! [LayoutPlan] without looking at datatype codes again.

use core::fmt;
use core::ops::Range;

use tracing::{debug, warn};

use crate::{
    bytes::Endianness,
    datatype::Datatype,
    errors::LayoutError,
    field::FieldDescriptor,
    options::{DecodeOptions, UnknownDatatypePolicy},
};

/// A field whose datatype resolved, placed at a fixed offset in the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedField {
    pub name: String,
    /// Byte offset of the first element within the record.
    pub offset: usize,
    pub datatype: Datatype,
    pub count: usize,
}

impl PlannedField {
    /// Number of bytes covered by all elements.
    pub fn byte_len(&self) -> usize {
        self.count * self.datatype.width()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentKind {
    /// Bytes that are skipped.
    Pad,
    /// Bytes decoded as `count` elements of one datatype.
    Field(PlannedField),
}

/// One contiguous span of a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub len: usize,
}

/// Non-fatal findings made while planning.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Diagnostic {
    /// The field's datatype code is not registered; it contributes no samples.
    UnknownDatatype { name: String, code: u8 },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::UnknownDatatype { name, code } => {
                write!(f, "skipping field `{name}` with unknown datatype code {code}")
            }
        }
    }
}

/// Label and sample range of one decoded field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    /// Indices of this field's samples within a decoded record.
    pub samples: Range<usize>,
}

/// Precomputed record layout. Segment lengths always sum to [LayoutPlan::stride].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutPlan {
    segments: Vec<Segment>,
    stride: usize,
    endianness: Endianness,
    sample_count: usize,
    diagnostics: Vec<Diagnostic>,
}

impl LayoutPlan {
    /// Plans the record layout for `fields`.
    ///
    /// Fields are visited in ascending offset order (stable, so ties keep their
    /// input order). With an explicit `stride` the planned extent may not exceed
    /// it and any remainder becomes trailing padding; without one the stride is
    /// the end of the last planned field.
    pub fn build(
        fields: &[FieldDescriptor],
        stride: Option<usize>,
        endianness: Endianness,
        options: &DecodeOptions,
    ) -> Result<Self, LayoutError> {
        let mut sorted: Vec<&FieldDescriptor> = fields.iter().collect();
        sorted.sort_by_key(|field| field.offset);

        let mut segments = Vec::with_capacity(sorted.len() * 2 + 1);
        let mut diagnostics = Vec::new();
        let mut sample_count = 0;
        let mut cursor = 0;

        for field in sorted {
            if !options.selects(&field.name) {
                continue;
            }

            if field.count == 0 {
                return Err(LayoutError::InvalidFieldCount {
                    name: field.name.clone(),
                });
            }

            if field.offset < cursor {
                return Err(LayoutError::OverlappingField {
                    name: field.name.clone(),
                    offset: field.offset,
                    cursor,
                });
            }

            if field.offset > cursor {
                segments.push(Segment {
                    kind: SegmentKind::Pad,
                    len: field.offset - cursor,
                });
                cursor = field.offset;
            }

            let Some(datatype) = field.datatype.resolve() else {
                if options.unknown_datatype == UnknownDatatypePolicy::Reject {
                    return Err(LayoutError::UnknownDatatype {
                        name: field.name.clone(),
                        code: field.datatype.0,
                    });
                }

                warn!(
                    field = %field.name,
                    code = field.datatype.0,
                    "skipping field with unknown datatype"
                );
                diagnostics.push(Diagnostic::UnknownDatatype {
                    name: field.name.clone(),
                    code: field.datatype.0,
                });
                continue;
            };

            let Some(end) = field
                .count
                .checked_mul(datatype.width())
                .and_then(|len| cursor.checked_add(len))
            else {
                return Err(match stride {
                    Some(stride) => LayoutError::LayoutOverflow {
                        extent: usize::MAX,
                        stride,
                    },
                    None => LayoutError::AddressOverflow {
                        name: field.name.clone(),
                    },
                });
            };
            let len = end - cursor;

            segments.push(Segment {
                kind: SegmentKind::Field(PlannedField {
                    name: field.name.clone(),
                    offset: cursor,
                    datatype,
                    count: field.count,
                }),
                len,
            });

            cursor = end;
            sample_count += field.count;
        }

        let stride = match stride {
            Some(stride) if cursor > stride => {
                return Err(LayoutError::LayoutOverflow {
                    extent: cursor,
                    stride,
                });
            }
            Some(stride) => {
                if stride > cursor {
                    segments.push(Segment {
                        kind: SegmentKind::Pad,
                        len: stride - cursor,
                    });
                }
                stride
            }
            None if sample_count == 0 => return Err(LayoutError::EmptyLayout),
            None => cursor,
        };

        debug!(
            stride,
            sample_count,
            segments = segments.len(),
            ?endianness,
            "planned record layout"
        );

        Ok(Self {
            segments,
            stride,
            endianness,
            sample_count,
            diagnostics,
        })
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Total byte length of one record, padding included.
    pub fn stride(&self) -> usize {
        self.stride
    }

    pub fn endianness(&self) -> Endianness {
        self.endianness
    }

    /// Number of samples each record decodes to.
    pub fn sample_count(&self) -> usize {
        self.sample_count
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Planned fields in record order.
    pub fn fields(&self) -> impl Iterator<Item = &PlannedField> {
        self.segments.iter().filter_map(|segment| match &segment.kind {
            SegmentKind::Field(field) => Some(field),
            SegmentKind::Pad => None,
        })
    }

    /// Sample ranges of every planned field, in record order.
    pub fn columns(&self) -> Vec<Column> {
        let mut start = 0;
        self.fields()
            .map(|field| {
                let column = Column {
                    name: field.name.clone(),
                    samples: start..start + field.count,
                };
                start += field.count;
                column
            })
            .collect()
    }

    /// One label per sample: the field name, or `name[i]` for repeated fields.
    pub fn sample_names(&self) -> Vec<String> {
        let mut names = Vec::with_capacity(self.sample_count);
        for field in self.fields() {
            if field.count == 1 {
                names.push(field.name.clone());
            } else {
                names.extend((0..field.count).map(|i| format!("{}[{}]", field.name, i)));
            }
        }

        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn xyz() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::new("x", 0, Datatype::Float32, 1),
            FieldDescriptor::new("y", 4, Datatype::Float32, 1),
            FieldDescriptor::new("z", 8, Datatype::Float32, 1),
        ]
    }

    fn plan(
        fields: &[FieldDescriptor],
        stride: Option<usize>,
    ) -> Result<LayoutPlan, LayoutError> {
        LayoutPlan::build(fields, stride, Endianness::Little, &DecodeOptions::default())
    }

    fn total_len(plan: &LayoutPlan) -> usize {
        plan.segments().iter().map(|segment| segment.len).sum()
    }

    #[test]
    fn test_contiguous_fields() {
        let plan = plan(&xyz(), None).unwrap();
        assert_eq!(plan.stride(), 12);
        assert_eq!(plan.sample_count(), 3);
        assert_eq!(plan.segments().len(), 3);
        assert!(plan.diagnostics().is_empty());
    }

    #[test]
    fn test_trailing_padding_fills_stride() {
        let plan = plan(&xyz(), Some(16)).unwrap();
        assert_eq!(plan.stride(), 16);
        assert_eq!(total_len(&plan), 16);
        assert_eq!(
            plan.segments().last(),
            Some(&Segment {
                kind: SegmentKind::Pad,
                len: 4
            })
        );
    }

    #[test]
    fn test_gap_between_fields() {
        let fields = vec![
            FieldDescriptor::new("a", 0, Datatype::UInt32, 1),
            FieldDescriptor::new("b", 12, Datatype::UInt32, 1),
        ];
        let plan = plan(&fields, None).unwrap();
        assert_eq!(plan.stride(), 16);
        assert_eq!(plan.segments()[1].kind, SegmentKind::Pad);
        assert_eq!(plan.segments()[1].len, 8);
    }

    #[test]
    fn test_leading_padding() {
        let fields = vec![FieldDescriptor::new("a", 6, Datatype::Int16, 1)];
        let plan = plan(&fields, None).unwrap();
        assert_eq!(plan.segments()[0].kind, SegmentKind::Pad);
        assert_eq!(plan.segments()[0].len, 6);
        assert_eq!(plan.stride(), 8);
    }

    #[test]
    fn test_unsorted_descriptors() {
        let mut fields = xyz();
        fields.reverse();
        let plan = plan(&fields, None).unwrap();
        let names: Vec<&str> = plan.fields().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_repeated_field() {
        let fields = vec![FieldDescriptor::new("normal", 0, Datatype::Float64, 3)];
        let plan = plan(&fields, None).unwrap();
        assert_eq!(plan.stride(), 24);
        assert_eq!(plan.sample_count(), 3);
        assert_eq!(
            plan.sample_names(),
            vec!["normal[0]", "normal[1]", "normal[2]"]
        );
    }

    #[test]
    fn test_unknown_datatype_is_skipped() {
        let fields = vec![
            FieldDescriptor::new("x", 0, Datatype::Float32, 1),
            FieldDescriptor::with_code("mystery", 4, 42, 1),
            FieldDescriptor::new("y", 8, Datatype::Float32, 1),
        ];
        let plan = plan(&fields, None).unwrap();

        assert_eq!(plan.sample_count(), 2);
        assert_eq!(plan.stride(), 12);
        assert_eq!(
            plan.diagnostics(),
            &[Diagnostic::UnknownDatatype {
                name: "mystery".to_string(),
                code: 42
            }]
        );
        let y = plan.fields().find(|f| f.name == "y").unwrap();
        assert_eq!(y.offset, 8);
    }

    #[test]
    fn test_unknown_datatype_rejected_by_policy() {
        let fields = vec![FieldDescriptor::with_code("mystery", 0, 0, 1)];
        let mut options = DecodeOptions::default();
        options.set_unknown_datatype(UnknownDatatypePolicy::Reject);

        let result = LayoutPlan::build(&fields, Some(4), Endianness::Little, &options);
        assert_eq!(
            result.unwrap_err(),
            LayoutError::UnknownDatatype {
                name: "mystery".to_string(),
                code: 0
            }
        );
    }

    #[test]
    fn test_layout_overflow() {
        let result = plan(&xyz(), Some(8));
        assert_eq!(
            result.unwrap_err(),
            LayoutError::LayoutOverflow {
                extent: 12,
                stride: 8
            }
        );
    }

    #[test]
    fn test_overlapping_fields() {
        let fields = vec![
            FieldDescriptor::new("a", 0, Datatype::Float64, 1),
            FieldDescriptor::new("b", 4, Datatype::Float32, 1),
        ];
        assert_eq!(
            plan(&fields, None).unwrap_err(),
            LayoutError::OverlappingField {
                name: "b".to_string(),
                offset: 4,
                cursor: 8
            }
        );
    }

    #[test]
    fn test_field_end_past_address_space_with_stride() {
        let fields = vec![FieldDescriptor::new("x", usize::MAX - 1, Datatype::Float32, 1)];
        assert_eq!(
            plan(&fields, Some(16)).unwrap_err(),
            LayoutError::LayoutOverflow {
                extent: usize::MAX,
                stride: 16
            }
        );
    }

    #[test]
    fn test_field_end_past_address_space_without_stride() {
        let fields = vec![FieldDescriptor::new("x", usize::MAX - 1, Datatype::Float32, 1)];
        assert_eq!(
            plan(&fields, None).unwrap_err(),
            LayoutError::AddressOverflow {
                name: "x".to_string()
            }
        );
    }

    #[test]
    fn test_element_count_past_address_space() {
        let fields = vec![FieldDescriptor::new("v", 0, Datatype::Float64, usize::MAX / 4)];
        assert_eq!(
            plan(&fields, None).unwrap_err(),
            LayoutError::AddressOverflow {
                name: "v".to_string()
            }
        );
    }

    #[test]
    fn test_tied_offsets_keep_input_order() {
        let unknown_first = vec![
            FieldDescriptor::new("x", 0, Datatype::Float32, 1),
            FieldDescriptor::with_code("packed", 4, 42, 2),
            FieldDescriptor::new("y", 4, Datatype::Float32, 1),
        ];
        let plan_ok = plan(&unknown_first, None).unwrap();
        assert_eq!(plan_ok.diagnostics().len(), 1);
        let y = plan_ok.fields().find(|f| f.name == "y").unwrap();
        assert_eq!(y.offset, 4);
        assert_eq!(plan_ok.stride(), 8);

        let known_first = vec![
            FieldDescriptor::new("x", 0, Datatype::Float32, 1),
            FieldDescriptor::new("y", 4, Datatype::Float32, 1),
            FieldDescriptor::with_code("packed", 4, 42, 2),
        ];
        assert_eq!(
            plan(&known_first, None).unwrap_err(),
            LayoutError::OverlappingField {
                name: "packed".to_string(),
                offset: 4,
                cursor: 8
            }
        );
    }

    #[test]
    fn test_zero_count() {
        let fields = vec![FieldDescriptor::new("a", 0, Datatype::UInt8, 0)];
        assert_eq!(
            plan(&fields, None).unwrap_err(),
            LayoutError::InvalidFieldCount {
                name: "a".to_string()
            }
        );
    }

    #[test]
    fn test_empty_layout_without_stride() {
        assert_eq!(plan(&[], None).unwrap_err(), LayoutError::EmptyLayout);
    }

    #[test]
    fn test_empty_layout_with_stride() {
        let plan = plan(&[], Some(4)).unwrap();
        assert_eq!(plan.sample_count(), 0);
        assert_eq!(total_len(&plan), 4);
    }

    #[test]
    fn test_field_name_filter_turns_fields_into_padding() {
        let mut options = DecodeOptions::default();
        options.set_field_names(["x", "z"]);

        let plan = LayoutPlan::build(&xyz(), None, Endianness::Little, &options).unwrap();
        assert_eq!(plan.sample_count(), 2);
        assert_eq!(plan.stride(), 12);
        assert_eq!(plan.segments()[1].kind, SegmentKind::Pad);
        assert_eq!(plan.segments()[1].len, 4);
    }

    #[test]
    fn test_columns() {
        let fields = vec![
            FieldDescriptor::new("rgb", 0, Datatype::UInt8, 3),
            FieldDescriptor::new("intensity", 4, Datatype::Float32, 1),
        ];
        let plan = plan(&fields, None).unwrap();
        assert_eq!(
            plan.columns(),
            vec![
                Column {
                    name: "rgb".to_string(),
                    samples: 0..3
                },
                Column {
                    name: "intensity".to_string(),
                    samples: 3..4
                },
            ]
        );
    }

    #[test]
    fn test_diagnostic_display() {
        let diagnostic = Diagnostic::UnknownDatatype {
            name: "foo".to_string(),
            code: 11,
        };
        assert_eq!(
            diagnostic.to_string(),
            "skipping field `foo` with unknown datatype code 11"
        );
    }
}
