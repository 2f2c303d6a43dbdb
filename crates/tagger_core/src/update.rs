use crate::{Effect, Msg, WizardSession};

/// Pure update function: applies a message to the session and returns any effects.
pub fn update(mut session: WizardSession, msg: Msg) -> (WizardSession, Vec<Effect>) {
    let effects = match msg {
        Msg::Next => session.advance(),
        Msg::Back => {
            session.retreat();
            Vec::new()
        }
        Msg::FlowSelected(variant) => session.select_flow(variant),
        Msg::FieldChanged { field, value } => {
            session.set_field(field, value);
            Vec::new()
        }
        Msg::OptionSelected(value) => session.select_option(value),
        Msg::OverrideChanged(text) => {
            session.set_override(text);
            Vec::new()
        }
        Msg::OverrideSubmitted(text) => session.submit_override(text),
        Msg::ParamAdded => {
            session.add_param();
            Vec::new()
        }
        Msg::ParamChanged { index, key, value } => {
            session.change_param(index, key, value);
            Vec::new()
        }
        Msg::ParamRemoved(index) => {
            session.remove_param(index);
            Vec::new()
        }
        Msg::SuggestionsRequested => session.request_suggestions(),
        Msg::SuggestionsReady {
            request_id,
            suggestions,
        } => {
            session.apply_suggestions(request_id, suggestions);
            Vec::new()
        }
        Msg::SuggestionChosen(value) => {
            session.choose_suggestion(value);
            Vec::new()
        }
        Msg::GenerateClicked => session.start_generation(),
        Msg::ShortenSucceeded {
            request_id,
            short_link,
            created_at,
        } => {
            session.apply_shorten_success(request_id, short_link, created_at);
            Vec::new()
        }
        Msg::ShortenFailed {
            request_id,
            message,
        } => {
            session.apply_shorten_failure(request_id, message);
            Vec::new()
        }
        Msg::Reset => {
            session.reset();
            Vec::new()
        }
    };

    (session, effects)
}
