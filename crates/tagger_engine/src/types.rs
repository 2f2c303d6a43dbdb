use std::fmt;

pub type RequestId = u64;

/// A short link returned by the shortening collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortLink {
    pub short_link: String,
    pub long_url: String,
    /// RFC 3339 timestamp taken when the service answered.
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    ShortenCompleted {
        request_id: RequestId,
        result: Result<ShortLink, ShortenError>,
    },
    SuggestionsReady {
        request_id: RequestId,
        suggestions: Vec<String>,
    },
}

/// Failure of the shortening call. `message` is meant for the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct ShortenError {
    pub kind: FailureKind,
    pub message: String,
}

impl ShortenError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// The engine thread has exited; no further events will arrive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("engine event channel disconnected")]
pub struct EngineStopped;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    NotConfigured,
    HttpStatus(u16),
    Timeout,
    Network,
    InvalidResponse,
    EngineUnavailable,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::NotConfigured => write!(f, "not configured"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
            FailureKind::EngineUnavailable => write!(f, "engine unavailable"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuggestField {
    Content,
    Id,
}

impl SuggestField {
    pub fn as_str(self) -> &'static str {
        match self {
            SuggestField::Content => "content",
            SuggestField::Id => "id",
        }
    }
}

/// The parts of the form that give a suggestion its context.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SuggestionContext {
    pub base_url: String,
    pub source: String,
    pub medium: String,
    pub campaign: String,
}
