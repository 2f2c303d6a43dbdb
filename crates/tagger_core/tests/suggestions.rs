use std::sync::Once;

use tagger_core::{
    update, Effect, Field, FlowVariant, Msg, OptionCatalog, RequestId, Step, SuggestField,
    WizardConfig, WizardSession,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(tagger_logging::initialize_for_tests);
}

fn send(session: WizardSession, msgs: Vec<Msg>) -> WizardSession {
    msgs.into_iter()
        .fold(session, |session, msg| update(session, msg).0)
}

fn at_step(config: WizardConfig, target: Step) -> WizardSession {
    let mut session = send(
        WizardSession::new(config),
        vec![
            Msg::FlowSelected(FlowVariant::Social),
            Msg::FieldChanged {
                field: Field::BaseUrl,
                value: "example.com/academy".to_string(),
            },
        ],
    );
    while session.current_step() != target {
        session = update(session, Msg::Next).0;
    }
    session
}

fn content_step() -> WizardSession {
    at_step(WizardConfig::branching(OptionCatalog::default()), Step::Content)
}

fn suggestion_request(effects: &[Effect]) -> (RequestId, SuggestField) {
    match effects {
        [Effect::FetchSuggestions {
            request_id, field, ..
        }] => (*request_id, *field),
        other => panic!("expected a single suggestion effect, got {other:?}"),
    }
}

fn ready(request_id: RequestId, values: &[&str]) -> Msg {
    Msg::SuggestionsReady {
        request_id,
        suggestions: values.iter().map(|v| v.to_string()).collect(),
    }
}

#[test]
fn request_carries_form_snapshot_and_field() {
    init_logging();
    let session = content_step();
    let (session, effects) = update(session, Msg::SuggestionsRequested);

    match effects.as_slice() {
        [Effect::FetchSuggestions { field, form, .. }] => {
            assert_eq!(*field, SuggestField::Content);
            assert_eq!(form.base_url, "example.com/academy");
        }
        other => panic!("unexpected effects {other:?}"),
    }
    assert!(session.is_suggesting());
    assert!(session.view().suggesting);
}

#[test]
fn only_one_suggestion_request_in_flight() {
    init_logging();
    let (session, effects) = update(content_step(), Msg::SuggestionsRequested);
    let (request_id, _) = suggestion_request(&effects);

    let (session, effects) = update(session, Msg::SuggestionsRequested);
    assert!(effects.is_empty());

    let (session, _) = update(session, ready(request_id, &["hero-cta", "footer-link"]));
    assert!(!session.is_suggesting());
    assert_eq!(session.suggestions(), ["hero-cta", "footer-link"]);

    let (_, effects) = update(session, Msg::SuggestionsRequested);
    assert_eq!(effects.len(), 1);
}

#[test]
fn choosing_a_suggestion_sets_field_and_clears_list() {
    init_logging();
    let (session, effects) = update(content_step(), Msg::SuggestionsRequested);
    let (request_id, _) = suggestion_request(&effects);
    let session = send(
        session,
        vec![
            ready(request_id, &["hero-cta", "footer-link"]),
            Msg::SuggestionChosen("footer-link".to_string()),
        ],
    );
    assert_eq!(session.form().content, "footer-link");
    assert!(session.suggestions().is_empty());
}

#[test]
fn unknown_suggestion_is_ignored() {
    init_logging();
    let (session, effects) = update(content_step(), Msg::SuggestionsRequested);
    let (request_id, _) = suggestion_request(&effects);
    let session = send(
        session,
        vec![
            ready(request_id, &["hero-cta"]),
            Msg::SuggestionChosen("made-up".to_string()),
        ],
    );
    assert_eq!(session.form().content, "");
    assert_eq!(session.suggestions(), ["hero-cta"]);
}

#[test]
fn field_edit_clears_cached_suggestions() {
    init_logging();
    let (session, effects) = update(content_step(), Msg::SuggestionsRequested);
    let (request_id, _) = suggestion_request(&effects);
    let session = send(
        session,
        vec![
            ready(request_id, &["hero-cta"]),
            Msg::FieldChanged {
                field: Field::Content,
                value: "typed".to_string(),
            },
        ],
    );
    assert!(session.suggestions().is_empty());
}

#[test]
fn suggestions_do_not_survive_a_transition() {
    init_logging();
    let (session, effects) = update(content_step(), Msg::SuggestionsRequested);
    let (request_id, _) = suggestion_request(&effects);

    let session = send(session, vec![Msg::Next, ready(request_id, &["late"])]);
    assert_eq!(session.current_step(), Step::Id);
    assert!(session.suggestions().is_empty());
    assert!(!session.is_suggesting());

    let (_, effects) = update(session, Msg::SuggestionsRequested);
    let (_, field) = suggestion_request(&effects);
    assert_eq!(field, SuggestField::Id);
}

#[test]
fn suggestions_only_on_content_and_id_steps() {
    init_logging();
    let session = at_step(
        WizardConfig::branching(OptionCatalog::default()),
        Step::Medium,
    );
    let (_, effects) = update(session, Msg::SuggestionsRequested);
    assert!(effects.is_empty());
}

#[test]
fn suggestions_disabled_without_capability() {
    init_logging();
    let session = at_step(WizardConfig::basic(OptionCatalog::default()), Step::Content);
    assert!(!session.view().suggestions_enabled);

    let (_, effects) = update(session, Msg::SuggestionsRequested);
    assert!(effects.is_empty());
}
