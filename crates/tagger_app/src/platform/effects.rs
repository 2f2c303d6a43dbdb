use std::time::Duration;

use tagger_core::{Effect, FormState, Msg, RequestId, SuggestField};
use tagger_engine::{EngineConfig, EngineEvent, EngineHandle, EngineStopped, SuggestionContext};
use tagger_logging::{clip_for_log, tagger_error, tagger_info, tagger_warn};

const ENGINE_STOPPED_MESSAGE: &str = "The link shortening service is currently unavailable.";

/// Executes wizard effects on the engine and turns engine events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
    in_flight: InFlight,
}

impl EffectRunner {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            engine: EngineHandle::new(config),
            in_flight: InFlight::default(),
        }
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Shorten {
                    request_id,
                    long_url,
                } => {
                    tagger_info!(
                        "Shorten request_id={} url_len={} url={}",
                        request_id,
                        long_url.len(),
                        clip_for_log(&long_url, 120)
                    );
                    self.in_flight.shorten.push(request_id);
                    self.engine.shorten(request_id, long_url);
                }
                Effect::FetchSuggestions {
                    request_id,
                    field,
                    form,
                } => {
                    tagger_info!("Suggest request_id={} field={:?}", request_id, field);
                    self.in_flight.suggest.push(request_id);
                    self.engine
                        .suggest(request_id, map_field(field), context_from(&form));
                }
            }
        }
    }

    /// Waits up to `timeout` for the next engine completion.
    pub fn poll(&mut self, timeout: Duration) -> Option<Msg> {
        let polled = self.engine.wait_event(timeout);
        self.receive(polled)
    }

    pub fn try_poll(&mut self) -> Option<Msg> {
        let polled = self.engine.poll_event();
        self.receive(polled)
    }

    fn receive(&mut self, polled: Result<Option<EngineEvent>, EngineStopped>) -> Option<Msg> {
        match polled {
            Ok(event) => event.map(|event| {
                self.in_flight.complete(&event);
                map_event(event)
            }),
            Err(EngineStopped) => self.in_flight.abandon_next(),
        }
    }
}

/// Requests sent to the engine that have not been answered yet.
#[derive(Debug, Default)]
struct InFlight {
    shorten: Vec<RequestId>,
    suggest: Vec<RequestId>,
}

impl InFlight {
    fn complete(&mut self, event: &EngineEvent) {
        match event {
            EngineEvent::ShortenCompleted { request_id, .. } => {
                self.shorten.retain(|id| id != request_id)
            }
            EngineEvent::SuggestionsReady { request_id, .. } => {
                self.suggest.retain(|id| id != request_id)
            }
        }
    }

    /// Answers one outstanding request locally once the engine can no longer do it.
    fn abandon_next(&mut self) -> Option<Msg> {
        if let Some(request_id) = self.shorten.pop() {
            tagger_error!("Engine stopped; failing shorten request {}", request_id);
            return Some(Msg::ShortenFailed {
                request_id,
                message: ENGINE_STOPPED_MESSAGE.to_string(),
            });
        }
        let request_id = self.suggest.pop()?;
        tagger_error!("Engine stopped; dropping suggest request {}", request_id);
        Some(Msg::SuggestionsReady {
            request_id,
            suggestions: Vec::new(),
        })
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ShortenCompleted { request_id, result } => match result {
            Ok(link) => Msg::ShortenSucceeded {
                request_id,
                short_link: link.short_link,
                created_at: link.created_at,
            },
            Err(err) => {
                tagger_warn!("Shorten request {} failed ({}): {}", request_id, err.kind, err);
                Msg::ShortenFailed {
                    request_id,
                    message: err.message,
                }
            }
        },
        EngineEvent::SuggestionsReady {
            request_id,
            suggestions,
        } => Msg::SuggestionsReady {
            request_id,
            suggestions,
        },
    }
}

fn map_field(field: SuggestField) -> tagger_engine::SuggestField {
    match field {
        SuggestField::Content => tagger_engine::SuggestField::Content,
        SuggestField::Id => tagger_engine::SuggestField::Id,
    }
}

fn context_from(form: &FormState) -> SuggestionContext {
    SuggestionContext {
        base_url: form.base_url.trim().to_string(),
        source: form.source.trim().to_string(),
        medium: form.medium.trim().to_string(),
        campaign: form.campaign.trim().to_string(),
    }
}
