use std::sync::Arc;
use std::time::Duration;

use tagger_engine::{
    EngineEvent, EngineHandle, FailureKind, ShortLink, ShortenError, Shortener, SuggestField,
    Suggester, SuggestionContext,
};

struct EchoShortener;

#[async_trait::async_trait]
impl Shortener for EchoShortener {
    async fn shorten(&self, long_url: &str) -> Result<ShortLink, ShortenError> {
        if long_url.contains("fail") {
            return Err(ShortenError {
                kind: FailureKind::HttpStatus(500),
                message: "Service returned status 500".to_string(),
            });
        }
        Ok(ShortLink {
            short_link: "https://sho.rt/1".to_string(),
            long_url: long_url.to_string(),
            created_at: "2026-10-19T08:00:00+00:00".to_string(),
        })
    }
}

struct FieldSuggester;

#[async_trait::async_trait]
impl Suggester for FieldSuggester {
    async fn suggest(&self, field: SuggestField, context: &SuggestionContext) -> Vec<String> {
        vec![format!("{}-{}", context.campaign, field.as_str())]
    }
}

fn engine() -> EngineHandle {
    EngineHandle::with_collaborators(Arc::new(EchoShortener), Arc::new(FieldSuggester))
}

fn next_event(engine: &EngineHandle) -> EngineEvent {
    engine
        .recv_timeout(Duration::from_secs(5))
        .expect("engine event")
}

#[test]
fn shorten_command_reports_completion() {
    let engine = engine();
    engine.shorten(3, "https://example.com/?utm_source=a");

    match next_event(&engine) {
        EngineEvent::ShortenCompleted { request_id, result } => {
            assert_eq!(request_id, 3);
            let link = result.expect("shortened");
            assert_eq!(link.short_link, "https://sho.rt/1");
            assert_eq!(link.long_url, "https://example.com/?utm_source=a");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn shorten_failure_is_forwarded() {
    let engine = engine();
    engine.shorten(4, "https://fail.example.com/");

    match next_event(&engine) {
        EngineEvent::ShortenCompleted { request_id, result } => {
            assert_eq!(request_id, 4);
            assert_eq!(result.unwrap_err().kind, FailureKind::HttpStatus(500));
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn suggest_command_reports_values() {
    let engine = engine();
    let context = SuggestionContext {
        campaign: "spring".to_string(),
        ..SuggestionContext::default()
    };
    engine.suggest(9, SuggestField::Id, context);

    assert_eq!(
        next_event(&engine),
        EngineEvent::SuggestionsReady {
            request_id: 9,
            suggestions: vec!["spring-id".to_string()],
        }
    );
    assert!(engine.try_recv().is_none());
}

#[test]
fn idle_engine_reports_no_event_without_stopping() {
    let engine = engine();
    assert_eq!(engine.poll_event(), Ok(None));
    assert_eq!(engine.wait_event(Duration::from_millis(20)), Ok(None));

    engine.shorten(1, "https://example.com/");
    let event = engine
        .wait_event(Duration::from_secs(5))
        .expect("engine running");
    assert!(matches!(
        event,
        Some(EngineEvent::ShortenCompleted { request_id: 1, .. })
    ));
}
