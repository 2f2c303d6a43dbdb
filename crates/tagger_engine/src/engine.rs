use std::sync::mpsc::{self, RecvTimeoutError, TryRecvError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tagger_logging::{tagger_error, tagger_info};

use crate::shorten::{ReqwestShortener, Shortener};
use crate::suggest::{GeminiSuggester, Suggester};
use crate::{
    EngineConfig, EngineEvent, EngineStopped, FailureKind, RequestId, ShortenError, SuggestField,
    SuggestionContext,
};

enum EngineCommand {
    Shorten {
        request_id: RequestId,
        long_url: String,
    },
    Suggest {
        request_id: RequestId,
        field: SuggestField,
        context: SuggestionContext,
    },
}

/// Runs collaborator calls on a background tokio runtime and reports completions as events.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> Self {
        let shortener = ReqwestShortener::new(config.shortener).with_clock(config.created_utc);
        let suggester = GeminiSuggester::new(config.suggestions);
        Self::with_collaborators(Arc::new(shortener), Arc::new(suggester))
    }

    pub fn with_collaborators(
        shortener: Arc<dyn Shortener>,
        suggester: Arc<dyn Suggester>,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    tagger_error!("Could not start engine runtime: {}", err);
                    reject_all(cmd_rx, event_tx);
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let shortener = shortener.clone();
                let suggester = suggester.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event =
                        handle_command(shortener.as_ref(), suggester.as_ref(), command).await;
                    let _ = event_tx.send(event);
                });
            }
            tagger_info!("Engine command channel closed");
        });

        Self { cmd_tx, event_rx }
    }

    pub fn shorten(&self, request_id: RequestId, long_url: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Shorten {
            request_id,
            long_url: long_url.into(),
        });
    }

    pub fn suggest(&self, request_id: RequestId, field: SuggestField, context: SuggestionContext) {
        let _ = self.cmd_tx.send(EngineCommand::Suggest {
            request_id,
            field,
            context,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }

    /// Non-blocking receive that tells an idle engine apart from a stopped one.
    pub fn poll_event(&self) -> Result<Option<EngineEvent>, EngineStopped> {
        match self.event_rx.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(EngineStopped),
        }
    }

    /// Waits up to `timeout`; `Ok(None)` means nothing finished in time.
    pub fn wait_event(&self, timeout: Duration) -> Result<Option<EngineEvent>, EngineStopped> {
        match self.event_rx.recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => Err(EngineStopped),
        }
    }
}

async fn handle_command(
    shortener: &dyn Shortener,
    suggester: &dyn Suggester,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::Shorten {
            request_id,
            long_url,
        } => EngineEvent::ShortenCompleted {
            request_id,
            result: shortener.shorten(&long_url).await,
        },
        EngineCommand::Suggest {
            request_id,
            field,
            context,
        } => EngineEvent::SuggestionsReady {
            request_id,
            suggestions: suggester.suggest(field, &context).await,
        },
    }
}

/// Answers every command with a failure so callers waiting on events are released.
fn reject_all(cmd_rx: mpsc::Receiver<EngineCommand>, event_tx: mpsc::Sender<EngineEvent>) {
    while let Ok(command) = cmd_rx.recv() {
        let event = match command {
            EngineCommand::Shorten { request_id, .. } => EngineEvent::ShortenCompleted {
                request_id,
                result: Err(ShortenError::new(
                    FailureKind::EngineUnavailable,
                    "The link shortening service is currently unavailable.",
                )),
            },
            EngineCommand::Suggest { request_id, .. } => EngineEvent::SuggestionsReady {
                request_id,
                suggestions: Vec::new(),
            },
        };
        let _ = event_tx.send(event);
    }
}
