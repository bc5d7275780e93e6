//! Array assembly: decodes every record of a grid buffer and lays the samples
//! out as a `[rows][cols][samples]` array.

use ndarray::{Array3, ArrayD, ArrayViewD, Axis, Slice};
use tracing::trace;

use crate::{
    errors::{DecodeError, EncodeError},
    layout::{Column, LayoutPlan},
};

/// Dense decoded samples plus the labels needed to find each field in them.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedArray {
    data: ArrayD<f64>,
    columns: Vec<Column>,
    /// Axis holding per-record samples, unless it was squeezed away.
    sample_axis: Option<usize>,
}

impl DecodedArray {
    fn new(data: Array3<f64>, columns: Vec<Column>) -> Self {
        Self {
            data: data.into_dyn(),
            columns,
            sample_axis: Some(2),
        }
    }

    pub fn shape(&self) -> &[usize] {
        self.data.shape()
    }

    pub fn data(&self) -> &ArrayD<f64> {
        &self.data
    }

    pub fn into_inner(self) -> ArrayD<f64> {
        self.data
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Samples of the named field across every record.
    pub fn column(&self, name: &str) -> Option<ArrayViewD<'_, f64>> {
        let column = self.columns.iter().find(|column| column.name == name)?;

        match self.sample_axis {
            Some(axis) => Some(
                self.data
                    .slice_axis(Axis(axis), Slice::from(column.samples.clone())),
            ),
            None => Some(self.data.view()),
        }
    }

    /// Removes every axis of extent 1, sample axis included.
    pub fn squeeze(mut self) -> Self {
        for axis in (0..self.data.ndim()).rev() {
            if self.data.len_of(Axis(axis)) != 1 {
                continue;
            }

            self.data = self.data.index_axis_move(Axis(axis), 0);
            self.sample_axis = match self.sample_axis {
                Some(sample) if sample == axis => None,
                Some(sample) if sample > axis => Some(sample - 1),
                other => other,
            };
        }

        self
    }
}

fn grid_len(rows: usize, cols: usize, stride: usize) -> Option<usize> {
    rows.checked_mul(cols)?.checked_mul(stride)
}

/// Decodes `data` as a `rows` x `cols` grid of records laid out by `plan`.
///
/// Fails without decoding anything if the buffer length is not exactly
/// `rows * cols * stride`.
pub fn assemble(
    data: &[u8],
    rows: usize,
    cols: usize,
    plan: &LayoutPlan,
) -> Result<DecodedArray, DecodeError> {
    let stride = plan.stride();
    let expected = grid_len(rows, cols, stride).ok_or(DecodeError::DimensionOverflow)?;

    if data.len() != expected {
        return Err(DecodeError::BufferSizeMismatch {
            expected,
            actual: data.len(),
        });
    }

    let mut array = Array3::<f64>::zeros((rows, cols, plan.sample_count()));

    if stride > 0 && plan.sample_count() > 0 {
        for (record, mut lane) in data
            .chunks_exact(stride)
            .zip(array.lanes_mut(Axis(2)))
        {
            for (slot, value) in lane.iter_mut().zip(plan.samples(record)) {
                *slot = value;
            }
        }
    }

    trace!(rows, cols, stride, samples = plan.sample_count(), "assembled grid");

    Ok(DecodedArray::new(array, plan.columns()))
}

/// Encodes a flat row-major sample stream back into a grid buffer.
pub fn encode_records(
    samples: &[f64],
    rows: usize,
    cols: usize,
    plan: &LayoutPlan,
) -> Result<Vec<u8>, EncodeError> {
    let records = rows.checked_mul(cols).ok_or(EncodeError::DimensionOverflow)?;
    let len = grid_len(rows, cols, plan.stride()).ok_or(EncodeError::DimensionOverflow)?;
    let per_record = plan.sample_count();

    let expected = records
        .checked_mul(per_record)
        .ok_or(EncodeError::DimensionOverflow)?;
    if samples.len() != expected {
        return Err(EncodeError::SampleCountMismatch {
            expected,
            actual: samples.len(),
        });
    }

    let mut out = vec![0u8; len];
    if plan.stride() == 0 {
        return Ok(out);
    }

    for (i, record) in out.chunks_exact_mut(plan.stride()).enumerate() {
        let start = i * per_record;
        plan.encode_record(&samples[start..start + per_record], record)?;
    }

    Ok(out)
}
