//! Decoder configuration.

/// What to do with a field whose datatype code is not in the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum UnknownDatatypePolicy {
    /// Emit a diagnostic and contribute zero samples for the field.
    #[default]
    Skip,
    /// Fail planning with [crate::errors::LayoutError::UnknownDatatype].
    Reject,
}

/// Options shared by every decode made through a [crate::decoder::Decoder].
///
/// Use the builder-style setters to configure.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecodeOptions {
    pub unknown_datatype: UnknownDatatypePolicy,
    /// If set, only fields with these names are decoded; the rest are skipped as padding.
    pub field_names: Option<Vec<String>>,
    /// If true, singleton axes are squeezed from the decoded array.
    pub squeeze: bool,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            unknown_datatype: UnknownDatatypePolicy::default(),
            field_names: None,
            squeeze: true,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_unknown_datatype(&mut self, policy: UnknownDatatypePolicy) -> &mut Self {
        self.unknown_datatype = policy;
        self
    }

    /// Restricts decoding to the named fields.
    pub fn set_field_names<I, S>(&mut self, names: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.field_names = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn set_squeeze(&mut self, squeeze: bool) -> &mut Self {
        self.squeeze = squeeze;
        self
    }

    pub(crate) fn selects(&self, name: &str) -> bool {
        match &self.field_names {
            Some(names) => names.iter().any(|n| n == name),
            None => true,
        }
    }
}
