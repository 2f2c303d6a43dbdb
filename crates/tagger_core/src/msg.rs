use crate::{Field, FlowVariant, RequestId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked to move forward (Continue / Generate on the confirmation step).
    Next,
    /// User asked to go one step back.
    Back,
    /// User picked a campaign type on the flow-selection step.
    FlowSelected(FlowVariant),
    /// User edited a text field.
    FieldChanged { field: Field, value: String },
    /// User picked an entry from the current option step's list.
    OptionSelected(String),
    /// User typed into the free-text override box of an option step.
    OverrideChanged(String),
    /// User typed an override and confirmed it in one go.
    OverrideSubmitted(String),
    /// User appended an empty custom parameter row.
    ParamAdded,
    /// User edited a custom parameter row.
    ParamChanged {
        index: usize,
        key: String,
        value: String,
    },
    /// User removed a custom parameter row.
    ParamRemoved(usize),
    /// User asked for suggestions on the current step.
    SuggestionsRequested,
    /// Suggestion collaborator answered.
    SuggestionsReady {
        request_id: RequestId,
        suggestions: Vec<String>,
    },
    /// User picked one of the displayed suggestions.
    SuggestionChosen(String),
    /// User clicked Generate on the confirmation step.
    GenerateClicked,
    /// Shortening collaborator returned a short link.
    ShortenSucceeded {
        request_id: RequestId,
        short_link: String,
        created_at: String,
    },
    /// Shortening collaborator failed.
    ShortenFailed {
        request_id: RequestId,
        message: String,
    },
    /// User started over.
    Reset,
}
