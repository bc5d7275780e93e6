//! Request-level entry points: plan (or reuse a cached plan), assemble, squeeze.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::{
    assembler::{DecodedArray, assemble},
    bytes::Endianness,
    errors::{DecodeError, LayoutError},
    field::FieldDescriptor,
    layout::{Diagnostic, LayoutPlan},
    options::DecodeOptions,
};

/// One buffer to decode together with its grid and record description.
#[derive(Debug, Clone, Copy)]
pub struct DecodeRequest<'a> {
    pub data: &'a [u8],
    pub rows: usize,
    pub cols: usize,
    /// Record length in bytes. Inferred from the fields when `None`.
    pub stride: Option<usize>,
    pub endianness: Endianness,
    pub fields: &'a [FieldDescriptor],
}

/// Result of a successful decode.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded {
    pub array: DecodedArray,
    /// One entry per field that was skipped during planning.
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct PlanKey {
    fields: Vec<FieldDescriptor>,
    stride: Option<usize>,
    endianness: Endianness,
}

/// Decodes buffers with fixed [DecodeOptions], caching one plan per schema.
///
/// The cache is keyed by the full descriptor list, stride and endianness, and
/// is unbounded: it only shrinks through [Decoder::clear_cache]. Callers that
/// see an open-ended set of schemas should clear it periodically.
#[derive(Debug, Default)]
pub struct Decoder {
    options: DecodeOptions,
    plans: HashMap<PlanKey, Arc<LayoutPlan>>,
}

impl Decoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            options,
            plans: HashMap::new(),
        }
    }

    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Returns the plan for a schema, building it on first use.
    pub fn plan(
        &mut self,
        fields: &[FieldDescriptor],
        stride: Option<usize>,
        endianness: Endianness,
    ) -> Result<Arc<LayoutPlan>, LayoutError> {
        let key = PlanKey {
            fields: fields.to_vec(),
            stride,
            endianness,
        };

        if let Some(plan) = self.plans.get(&key) {
            debug!(stride = plan.stride(), "reusing cached layout plan");
            return Ok(Arc::clone(plan));
        }

        let plan = Arc::new(LayoutPlan::build(fields, stride, endianness, &self.options)?);
        self.plans.insert(key, Arc::clone(&plan));

        Ok(plan)
    }

    pub fn decode(&mut self, request: &DecodeRequest<'_>) -> Result<Decoded, DecodeError> {
        let plan = self.plan(request.fields, request.stride, request.endianness)?;
        let mut array = assemble(request.data, request.rows, request.cols, &plan)?;

        if self.options.squeeze {
            array = array.squeeze();
        }

        Ok(Decoded {
            array,
            diagnostics: plan.diagnostics().to_vec(),
        })
    }

    /// Number of distinct schemas planned so far.
    pub fn cached_plans(&self) -> usize {
        self.plans.len()
    }

    pub fn clear_cache(&mut self) {
        self.plans.clear();
    }
}

/// Decodes a single request with default options and no plan reuse.
pub fn decode(request: &DecodeRequest<'_>) -> Result<Decoded, DecodeError> {
    Decoder::default().decode(request)
}
