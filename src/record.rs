//! Applies a [LayoutPlan] to the bytes of a single record.

use crate::{
    bytes::{read_sample, write_sample},
    errors::{DecodeError, EncodeError},
    layout::{LayoutPlan, SegmentKind},
};

impl LayoutPlan {
    /// Lazily decodes the samples of one record in plan order.
    ///
    /// `record` must be at least [LayoutPlan::stride] bytes long.
    pub(crate) fn samples<'a>(&'a self, record: &'a [u8]) -> impl Iterator<Item = f64> + 'a {
        let endianness = self.endianness();

        self.fields().flat_map(move |field| {
            let width = field.datatype.width();
            (0..field.count).map(move |i| {
                let start = field.offset + i * width;
                read_sample(&record[start..start + width], field.datatype, endianness)
            })
        })
    }

    /// Decodes one record into its flat sample sequence. Pad bytes are never read.
    pub fn decode_record(&self, record: &[u8]) -> Result<Vec<f64>, DecodeError> {
        if record.len() != self.stride() {
            return Err(DecodeError::BufferSizeMismatch {
                expected: self.stride(),
                actual: record.len(),
            });
        }

        Ok(self.samples(record).collect())
    }

    /// Writes one record's samples into `record`. Pad bytes are zeroed.
    pub fn encode_record(&self, samples: &[f64], record: &mut [u8]) -> Result<(), EncodeError> {
        if samples.len() != self.sample_count() {
            return Err(EncodeError::SampleCountMismatch {
                expected: self.sample_count(),
                actual: samples.len(),
            });
        }

        if record.len() != self.stride() {
            return Err(EncodeError::BufferSizeMismatch {
                expected: self.stride(),
                actual: record.len(),
            });
        }

        let endianness = self.endianness();
        let mut samples = samples.iter();
        let mut pos = 0;

        for segment in self.segments() {
            let span = &mut record[pos..pos + segment.len];

            match &segment.kind {
                SegmentKind::Pad => span.fill(0),
                SegmentKind::Field(field) => {
                    let width = field.datatype.width();
                    for (element, value) in span.chunks_exact_mut(width).zip(samples.by_ref()) {
                        write_sample(element, *value, field.datatype, endianness);
                    }
                }
            }

            pos += segment.len;
        }

        Ok(())
    }
}
