//! Tagger engine: HTTP collaborators (link shortening, value suggestions) and effect execution.
mod config;
mod engine;
mod shorten;
mod suggest;
mod types;

pub use config::{utc_now_rfc3339, Clock, EngineConfig, ShortenSettings, SuggestSettings};
pub use engine::EngineHandle;
pub use shorten::{ReqwestShortener, Shortener};
pub use suggest::{build_prompt, normalize_suggestions, GeminiSuggester, SuggestError, Suggester};
pub use types::{
    EngineEvent, EngineStopped, FailureKind, RequestId, ShortLink, ShortenError, SuggestField,
    SuggestionContext,
};
