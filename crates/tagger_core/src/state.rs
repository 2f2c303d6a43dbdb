use crate::view_model::WizardViewModel;
use crate::{
    build_long_url, step_sequence, Effect, Field, FlowVariant, FormState, Param, Step,
    WizardConfig,
};

/// Correlates collaborator responses with the request that caused them.
pub type RequestId = u64;

const GENERIC_GENERATION_ERROR: &str = "An unexpected error occurred during link generation.";

/// Outcome of a successful generation. A copy of the form is kept as metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenResult {
    pub short_link: String,
    pub long_url: String,
    pub created_at: String,
    pub metadata: FormState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingShorten {
    request_id: RequestId,
    long_url: String,
}

/// Step-scoped state. Reset on every transition.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Ephemeral {
    generating: Option<PendingShorten>,
    suggesting: Option<RequestId>,
    error: Option<String>,
    suggestions: Vec<String>,
    override_draft: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSession {
    config: WizardConfig,
    form: FormState,
    step: Step,
    result: Option<ShortenResult>,
    ui: Ephemeral,
    next_request_id: RequestId,
    dirty: bool,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new(WizardConfig::default())
    }
}

impl WizardSession {
    pub fn new(config: WizardConfig) -> Self {
        let step = initial_step(&config);
        Self {
            config,
            form: FormState::default(),
            step,
            result: None,
            ui: Ephemeral::default(),
            next_request_id: 1,
            dirty: true,
        }
    }

    pub fn config(&self) -> &WizardConfig {
        &self.config
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn current_step(&self) -> Step {
        self.step
    }

    pub fn result(&self) -> Option<&ShortenResult> {
        self.result.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.ui.error.as_deref()
    }

    pub fn suggestions(&self) -> &[String] {
        &self.ui.suggestions
    }

    pub fn is_generating(&self) -> bool {
        self.ui.generating.is_some()
    }

    pub fn is_suggesting(&self) -> bool {
        self.ui.suggesting.is_some()
    }

    pub fn override_draft(&self) -> &str {
        &self.ui.override_draft
    }

    /// Active step sequence for the configured capabilities and chosen variant.
    pub fn sequence(&self) -> Vec<Step> {
        step_sequence(&self.config.capabilities, self.form.flow_variant)
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn view(&self) -> WizardViewModel {
        let sequence = self.sequence();
        let total_steps = sequence.len().saturating_sub(1).max(1);
        let index = sequence.iter().position(|s| *s == self.step).unwrap_or(0);
        let long_url_preview = matches!(self.step, Step::Confirmation | Step::Result)
            .then(|| build_long_url(&self.form, self.form.include_tracking_fields()));

        WizardViewModel {
            step: self.step,
            title: self.step.title(),
            description: self.step.description(),
            step_number: (index + 1).min(total_steps),
            total_steps,
            options: self.config.catalog.options_for(self.step).to_vec(),
            form: self.form.clone(),
            override_draft: self.ui.override_draft.clone(),
            suggestions: self.ui.suggestions.clone(),
            suggestions_enabled: self.config.capabilities.suggestions
                && self.step.suggest_field().is_some(),
            free_text_override: self.config.capabilities.free_text_override
                && self.step.is_option_step(),
            generating: self.is_generating(),
            suggesting: self.is_suggesting(),
            error: self.ui.error.clone(),
            result: self.result.clone(),
            long_url_preview,
            can_advance: self.can_advance(),
            can_retreat: self.can_retreat(index),
            dirty: self.dirty,
        }
    }

    fn can_advance(&self) -> bool {
        if self.is_generating() {
            return false;
        }
        match self.step {
            Step::FlowSelection => self.form.flow_variant.is_some(),
            Step::BaseUrl => self.form.has_base_url(),
            Step::Result => false,
            _ => true,
        }
    }

    fn can_retreat(&self, index: usize) -> bool {
        !self.is_generating() && self.step != Step::Result && index > 0
    }

    /// Edits are refused while a generation is outstanding and once the result is shown.
    fn locked(&self) -> bool {
        self.is_generating() || self.step == Step::Result
    }

    pub(crate) fn advance(&mut self) -> Vec<Effect> {
        if self.is_generating() {
            return Vec::new();
        }
        match self.step {
            Step::Result => return Vec::new(),
            Step::Confirmation => return self.start_generation(),
            Step::FlowSelection if self.form.flow_variant.is_none() => return Vec::new(),
            Step::BaseUrl if !self.form.has_base_url() => return Vec::new(),
            step if step.is_option_step() => self.commit_override(step),
            _ => {}
        }
        if let Some(next) = self.neighbour(Direction::Forward) {
            self.go_to(next);
        }
        Vec::new()
    }

    pub(crate) fn retreat(&mut self) {
        if self.locked() {
            return;
        }
        if let Some(previous) = self.neighbour(Direction::Backward) {
            self.go_to(previous);
        }
    }

    pub(crate) fn select_flow(&mut self, variant: FlowVariant) -> Vec<Effect> {
        if self.step != Step::FlowSelection || self.locked() {
            return Vec::new();
        }
        match self.form.flow_variant {
            // Fixed for the session; only a reset can change it.
            Some(chosen) if chosen != variant => return Vec::new(),
            _ => self.form.flow_variant = Some(variant),
        }
        self.advance()
    }

    pub(crate) fn set_field(&mut self, field: Field, value: String) {
        if self.locked() {
            return;
        }
        // Every step after BASE_URL relies on a base URL being present.
        if field == Field::BaseUrl && self.step != Step::BaseUrl && value.trim().is_empty() {
            return;
        }
        self.form.set(field, value);
        self.ui.suggestions.clear();
        self.dirty = true;
    }

    pub(crate) fn select_option(&mut self, value: String) -> Vec<Effect> {
        let step = self.step;
        let field = match step.field() {
            Some(field) if step.is_option_step() && !self.locked() => field,
            _ => return Vec::new(),
        };
        if !self.config.catalog.options_for(step).contains(&value) {
            return Vec::new();
        }
        self.set_field(field, value);
        self.advance()
    }

    pub(crate) fn set_override(&mut self, text: String) {
        if !self.step.is_option_step()
            || !self.config.capabilities.free_text_override
            || self.locked()
        {
            return;
        }
        self.ui.override_draft = text;
        self.ui.suggestions.clear();
        self.dirty = true;
    }

    pub(crate) fn submit_override(&mut self, text: String) -> Vec<Effect> {
        self.set_override(text);
        if self.ui.override_draft.trim().is_empty() {
            return Vec::new();
        }
        self.advance()
    }

    fn commit_override(&mut self, step: Step) {
        if !self.config.capabilities.free_text_override {
            return;
        }
        let draft = self.ui.override_draft.trim();
        if draft.is_empty() {
            return;
        }
        if let Some(field) = step.field() {
            let draft = draft.to_string();
            self.form.set(field, draft);
        }
    }

    fn params_editable(&self) -> bool {
        self.config.capabilities.additional_params && !self.locked()
    }

    pub(crate) fn add_param(&mut self) {
        if !self.params_editable() {
            return;
        }
        self.form.additional_params.push(Param::default());
        self.ui.suggestions.clear();
        self.dirty = true;
    }

    pub(crate) fn change_param(&mut self, index: usize, key: String, value: String) {
        if !self.params_editable() {
            return;
        }
        if let Some(param) = self.form.additional_params.get_mut(index) {
            *param = Param { key, value };
            self.ui.suggestions.clear();
            self.dirty = true;
        }
    }

    pub(crate) fn remove_param(&mut self, index: usize) {
        if !self.params_editable() || index >= self.form.additional_params.len() {
            return;
        }
        self.form.additional_params.remove(index);
        self.ui.suggestions.clear();
        self.dirty = true;
    }

    pub(crate) fn request_suggestions(&mut self) -> Vec<Effect> {
        if !self.config.capabilities.suggestions || self.locked() || self.is_suggesting() {
            return Vec::new();
        }
        let Some(field) = self.step.suggest_field() else {
            return Vec::new();
        };
        let request_id = self.allocate_request_id();
        self.ui.suggesting = Some(request_id);
        self.dirty = true;
        vec![Effect::FetchSuggestions {
            request_id,
            field,
            form: self.form.clone(),
        }]
    }

    pub(crate) fn apply_suggestions(&mut self, request_id: RequestId, suggestions: Vec<String>) {
        if self.ui.suggesting != Some(request_id) {
            return;
        }
        self.ui.suggesting = None;
        self.ui.suggestions = suggestions;
        self.dirty = true;
    }

    pub(crate) fn choose_suggestion(&mut self, value: String) {
        let Some(field) = self.step.suggest_field() else {
            return;
        };
        if !self.ui.suggestions.contains(&value) {
            return;
        }
        self.set_field(field.as_field(), value);
    }

    pub(crate) fn start_generation(&mut self) -> Vec<Effect> {
        if self.step != Step::Confirmation || self.is_generating() || !self.form.has_base_url() {
            return Vec::new();
        }
        self.ui.error = None;
        let long_url = build_long_url(&self.form, self.form.include_tracking_fields());
        let request_id = self.allocate_request_id();
        self.ui.generating = Some(PendingShorten {
            request_id,
            long_url: long_url.clone(),
        });
        self.dirty = true;
        vec![Effect::Shorten {
            request_id,
            long_url,
        }]
    }

    pub(crate) fn apply_shorten_success(
        &mut self,
        request_id: RequestId,
        short_link: String,
        created_at: String,
    ) {
        let pending = match self.ui.generating.take() {
            Some(pending) if pending.request_id == request_id => pending,
            other => {
                self.ui.generating = other;
                return;
            }
        };
        self.result = Some(ShortenResult {
            short_link,
            long_url: pending.long_url,
            created_at,
            metadata: self.form.clone(),
        });
        self.go_to(Step::Result);
    }

    pub(crate) fn apply_shorten_failure(&mut self, request_id: RequestId, message: String) {
        match &self.ui.generating {
            Some(pending) if pending.request_id == request_id => {}
            _ => return,
        }
        self.ui.generating = None;
        let message = message.trim();
        self.ui.error = Some(if message.is_empty() {
            GENERIC_GENERATION_ERROR.to_string()
        } else {
            message.to_string()
        });
        self.dirty = true;
    }

    pub(crate) fn reset(&mut self) {
        self.form = FormState::default();
        self.result = None;
        self.ui = Ephemeral::default();
        self.step = initial_step(&self.config);
        self.dirty = true;
    }

    fn go_to(&mut self, step: Step) {
        self.step = step;
        self.ui = Ephemeral::default();
        self.dirty = true;
    }

    fn neighbour(&self, direction: Direction) -> Option<Step> {
        let sequence = self.sequence();
        let index = sequence.iter().position(|s| *s == self.step)?;
        let target = match direction {
            Direction::Forward => index.checked_add(1)?,
            Direction::Backward => index.checked_sub(1)?,
        };
        sequence.get(target).copied()
    }

    fn allocate_request_id(&mut self) -> RequestId {
        let id = self.next_request_id;
        self.next_request_id += 1;
        id
    }
}

#[derive(Debug, Clone, Copy)]
enum Direction {
    Forward,
    Backward,
}

fn initial_step(config: &WizardConfig) -> Step {
    step_sequence(&config.capabilities, None)
        .first()
        .copied()
        .unwrap_or(Step::BaseUrl)
}
