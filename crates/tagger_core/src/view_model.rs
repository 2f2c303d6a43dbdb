use crate::{FormState, ShortenResult, Step};

/// Everything a frontend needs to render the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardViewModel {
    pub step: Step,
    pub title: &'static str,
    pub description: &'static str,
    /// 1-based position of `step` among the indicator steps.
    pub step_number: usize,
    /// Number of steps shown by a progress indicator (the result step is not counted).
    pub total_steps: usize,
    pub options: Vec<String>,
    pub form: FormState,
    pub override_draft: String,
    pub suggestions: Vec<String>,
    pub suggestions_enabled: bool,
    pub free_text_override: bool,
    pub generating: bool,
    pub suggesting: bool,
    pub error: Option<String>,
    pub result: Option<ShortenResult>,
    pub long_url_preview: Option<String>,
    pub can_advance: bool,
    pub can_retreat: bool,
    pub dirty: bool,
}
