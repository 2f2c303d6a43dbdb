use std::sync::Once;

use pretty_assertions::assert_eq;
use tagger_core::{
    update, Effect, Field, FlowVariant, FormState, Msg, OptionCatalog, RequestId, Step,
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

fn field(field: Field, value: &str) -> Msg {
    Msg::FieldChanged {
        field,
        value: value.to_string(),
    }
}

/// Branching session filled in and parked on the confirmation step.
fn at_confirmation(variant: FlowVariant) -> WizardSession {
    let mut session = send(
        WizardSession::new(WizardConfig::branching(OptionCatalog::default())),
        vec![
            Msg::FlowSelected(variant),
            field(Field::BaseUrl, "example.com/x"),
            field(Field::Source, "events"),
            field(Field::Medium, "email"),
            field(Field::Campaign, "promo"),
        ],
    );
    while session.current_step() != Step::Confirmation {
        session = update(session, Msg::Next).0;
    }
    session
}

fn shorten_request(effects: &[Effect]) -> (RequestId, String) {
    match effects {
        [Effect::Shorten {
            request_id,
            long_url,
        }] => (*request_id, long_url.clone()),
        other => panic!("expected a single shorten effect, got {other:?}"),
    }
}

#[test]
fn confirmation_next_emits_shorten_effect() {
    init_logging();
    let session = at_confirmation(FlowVariant::Social);
    assert_eq!(
        session.view().long_url_preview.as_deref(),
        Some("https://example.com/x?utm_source=events&utm_medium=email&utm_campaign=promo")
    );

    let (session, effects) = update(session, Msg::Next);
    let (_, long_url) = shorten_request(&effects);

    assert_eq!(
        long_url,
        "https://example.com/x?utm_source=events&utm_medium=email&utm_campaign=promo"
    );
    assert!(session.is_generating());
    assert_eq!(session.current_step(), Step::Confirmation);
}

#[test]
fn other_variant_omits_tracking_fields_from_long_url() {
    init_logging();
    let session = send(
        at_confirmation(FlowVariant::Other),
        vec![
            Msg::Back,
            Msg::ParamAdded,
            Msg::ParamChanged {
                index: 0,
                key: "ref".to_string(),
                value: "partner".to_string(),
            },
            Msg::Next,
        ],
    );

    let (_, effects) = update(session, Msg::GenerateClicked);
    let (_, long_url) = shorten_request(&effects);
    assert_eq!(long_url, "https://example.com/x?ref=partner");
}

#[test]
fn second_trigger_while_generating_is_ignored() {
    init_logging();
    let (session, effects) = update(at_confirmation(FlowVariant::Social), Msg::GenerateClicked);
    assert_eq!(effects.len(), 1);

    let (session, effects) = update(session, Msg::Next);
    assert!(effects.is_empty());
    let (session, effects) = update(session, Msg::GenerateClicked);
    assert!(effects.is_empty());

    let (session, _) = update(session, Msg::Back);
    assert_eq!(session.current_step(), Step::Confirmation);
    assert!(!session.view().can_advance);
}

#[test]
fn success_stores_result_and_moves_to_result_step() {
    init_logging();
    let (session, effects) = update(at_confirmation(FlowVariant::Social), Msg::Next);
    let (request_id, long_url) = shorten_request(&effects);
    let form_before = session.form().clone();

    let (session, effects) = update(
        session,
        Msg::ShortenSucceeded {
            request_id,
            short_link: "https://sho.rt/abc".to_string(),
            created_at: "2026-10-19T10:00:00+00:00".to_string(),
        },
    );

    assert!(effects.is_empty());
    assert_eq!(session.current_step(), Step::Result);
    assert!(!session.is_generating());
    assert_eq!(session.error(), None);
    let result = session.result().expect("result stored");
    assert_eq!(result.short_link, "https://sho.rt/abc");
    assert_eq!(result.long_url, long_url);
    assert_eq!(result.created_at, "2026-10-19T10:00:00+00:00");
    assert_eq!(result.metadata, form_before);
}

#[test]
fn failure_keeps_step_and_form_and_reports_error() {
    init_logging();
    let (session, effects) = update(at_confirmation(FlowVariant::Social), Msg::Next);
    let (request_id, _) = shorten_request(&effects);
    let form_before = session.form().clone();

    let (session, _) = update(
        session,
        Msg::ShortenFailed {
            request_id,
            message: "Service returned status 502".to_string(),
        },
    );

    assert_eq!(session.current_step(), Step::Confirmation);
    assert_eq!(session.form(), &form_before);
    assert_eq!(session.error(), Some("Service returned status 502"));
    assert!(!session.is_generating());
    assert!(session.result().is_none());

    // Retrying clears the error and issues a fresh request.
    let (session, effects) = update(session, Msg::Next);
    let (retry_id, _) = shorten_request(&effects);
    assert_ne!(retry_id, request_id);
    assert_eq!(session.error(), None);
}

#[test]
fn blank_failure_message_gets_generic_text() {
    init_logging();
    let (session, effects) = update(at_confirmation(FlowVariant::Social), Msg::Next);
    let (request_id, _) = shorten_request(&effects);

    let (session, _) = update(
        session,
        Msg::ShortenFailed {
            request_id,
            message: "  ".to_string(),
        },
    );
    assert_eq!(
        session.error(),
        Some("An unexpected error occurred during link generation.")
    );
}

#[test]
fn error_cleared_on_navigation() {
    init_logging();
    let (session, effects) = update(at_confirmation(FlowVariant::Social), Msg::Next);
    let (request_id, _) = shorten_request(&effects);
    let session = send(
        session,
        vec![
            Msg::ShortenFailed {
                request_id,
                message: "boom".to_string(),
            },
            Msg::Back,
        ],
    );
    assert_eq!(session.current_step(), Step::AdditionalParams);
    assert_eq!(session.error(), None);
}

#[test]
fn stale_responses_are_ignored() {
    init_logging();
    let (session, effects) = update(at_confirmation(FlowVariant::Social), Msg::Next);
    let (request_id, _) = shorten_request(&effects);

    let (session, _) = update(
        session,
        Msg::ShortenSucceeded {
            request_id: request_id + 100,
            short_link: "https://sho.rt/zzz".to_string(),
            created_at: String::new(),
        },
    );
    assert!(session.is_generating());
    assert_eq!(session.current_step(), Step::Confirmation);

    let (session, _) = update(
        session,
        Msg::ShortenFailed {
            request_id: request_id + 100,
            message: "late".to_string(),
        },
    );
    assert!(session.is_generating());
    assert_eq!(session.error(), None);
}

#[test]
fn result_step_is_terminal_until_reset() {
    init_logging();
    let (session, effects) = update(at_confirmation(FlowVariant::Social), Msg::Next);
    let (request_id, _) = shorten_request(&effects);
    let session = send(
        session,
        vec![Msg::ShortenSucceeded {
            request_id,
            short_link: "https://sho.rt/abc".to_string(),
            created_at: "now".to_string(),
        }],
    );

    let (session, effects) = update(session, Msg::Next);
    assert!(effects.is_empty());
    assert_eq!(session.current_step(), Step::Result);

    let session = send(
        session,
        vec![Msg::Back, field(Field::Source, "changed")],
    );
    assert_eq!(session.current_step(), Step::Result);
    assert_eq!(session.form().source, "events");

    let (session, _) = update(session, Msg::Reset);
    assert_eq!(session.current_step(), Step::FlowSelection);
    assert_eq!(session.form(), &FormState::default());
    assert!(session.result().is_none());
    assert_eq!(session.error(), None);
    assert!(session.suggestions().is_empty());
}

#[test]
fn reset_in_linear_flow_returns_to_base_url() {
    init_logging();
    let session = send(
        WizardSession::new(WizardConfig::simple(OptionCatalog::default())),
        vec![field(Field::BaseUrl, "example.com"), Msg::Next, Msg::Reset],
    );
    assert_eq!(session.current_step(), Step::BaseUrl);
    assert_eq!(session.form(), &FormState::default());
}

#[test]
fn response_from_before_reset_is_dropped() {
    init_logging();
    let (session, effects) = update(at_confirmation(FlowVariant::Social), Msg::Next);
    let (request_id, _) = shorten_request(&effects);

    let (session, _) = update(session, Msg::Reset);
    let session = send(
        session,
        vec![Msg::ShortenSucceeded {
            request_id,
            short_link: "https://sho.rt/abc".to_string(),
            created_at: "now".to_string(),
        }],
    );
    assert_eq!(session.current_step(), Step::FlowSelection);
    assert!(session.result().is_none());
}

#[test]
fn base_url_cannot_be_blanked_after_leaving_its_step() {
    init_logging();
    let session = send(
        WizardSession::new(WizardConfig::simple(OptionCatalog::default())),
        vec![field(Field::BaseUrl, "example.com"), Msg::Next],
    );
    assert_eq!(session.current_step(), Step::Source);

    let session = send(session, vec![field(Field::BaseUrl, "  ")]);
    assert_eq!(session.current_step(), Step::Source);
    assert_eq!(session.form().base_url, "example.com");

    let mut session = send(session, vec![field(Field::BaseUrl, "example.org/y")]);
    while session.current_step() != Step::Confirmation {
        session = update(session, Msg::Next).0;
    }
    let (_, effects) = update(session, Msg::Next);
    let (_, long_url) = shorten_request(&effects);
    assert_eq!(long_url, "https://example.org/y");
}
