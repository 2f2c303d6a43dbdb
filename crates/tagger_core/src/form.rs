/// Which family of steps a branching session collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowVariant {
    /// Social campaign: the five UTM fields are collected.
    Social,
    /// Anything else: only the destination and custom parameters.
    Other,
}

impl FlowVariant {
    pub fn label(self) -> &'static str {
        match self {
            FlowVariant::Social => "social",
            FlowVariant::Other => "other",
        }
    }
}

/// A free-form query parameter entered on the additional-parameters step.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Param {
    pub key: String,
    pub value: String,
}

impl Param {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Trimmed `(key, value)` when both halves carry text.
    pub fn meaningful(&self) -> Option<(&str, &str)> {
        let key = self.key.trim();
        let value = self.value.trim();
        if key.is_empty() || value.is_empty() {
            None
        } else {
            Some((key, value))
        }
    }
}

/// Editable text fields of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    BaseUrl,
    Source,
    Medium,
    Campaign,
    Content,
    Id,
}

impl Field {
    /// Tracking fields in the order they are written to the query string.
    pub const TRACKING: [Field; 5] = [
        Field::Source,
        Field::Medium,
        Field::Campaign,
        Field::Content,
        Field::Id,
    ];

    /// Query parameter name, `None` for the destination itself.
    pub fn utm_key(self) -> Option<&'static str> {
        match self {
            Field::BaseUrl => None,
            Field::Source => Some("utm_source"),
            Field::Medium => Some("utm_medium"),
            Field::Campaign => Some("utm_campaign"),
            Field::Content => Some("utm_content"),
            Field::Id => Some("utm_id"),
        }
    }
}

/// Fields the suggestion collaborator can propose values for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestField {
    Content,
    Id,
}

impl SuggestField {
    pub fn as_field(self) -> Field {
        match self {
            SuggestField::Content => Field::Content,
            SuggestField::Id => Field::Id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormState {
    pub base_url: String,
    pub source: String,
    pub medium: String,
    pub campaign: String,
    pub content: String,
    pub id: String,
    pub additional_params: Vec<Param>,
    pub flow_variant: Option<FlowVariant>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::BaseUrl => &self.base_url,
            Field::Source => &self.source,
            Field::Medium => &self.medium,
            Field::Campaign => &self.campaign,
            Field::Content => &self.content,
            Field::Id => &self.id,
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        let slot = match field {
            Field::BaseUrl => &mut self.base_url,
            Field::Source => &mut self.source,
            Field::Medium => &mut self.medium,
            Field::Campaign => &mut self.campaign,
            Field::Content => &mut self.content,
            Field::Id => &mut self.id,
        };
        *slot = value.into();
    }

    pub fn has_base_url(&self) -> bool {
        !self.base_url.trim().is_empty()
    }

    /// Linear sessions have no variant and always carry the UTM fields.
    pub fn include_tracking_fields(&self) -> bool {
        self.flow_variant != Some(FlowVariant::Other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_with_blank_half_is_not_meaningful() {
        assert_eq!(Param::new(" ref ", " x ").meaningful(), Some(("ref", "x")));
        assert_eq!(Param::new("ref", "   ").meaningful(), None);
        assert_eq!(Param::new("", "x").meaningful(), None);
    }

    #[test]
    fn other_variant_drops_tracking_fields() {
        let mut form = FormState::new();
        assert!(form.include_tracking_fields());
        form.flow_variant = Some(FlowVariant::Social);
        assert!(form.include_tracking_fields());
        form.flow_variant = Some(FlowVariant::Other);
        assert!(!form.include_tracking_fields());
    }
}
