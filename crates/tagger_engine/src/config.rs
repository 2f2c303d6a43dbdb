use std::sync::Arc;
use std::time::Duration;

/// Produces the `created_at` stamp of a short link.
pub type Clock = Arc<dyn Fn() -> String + Send + Sync>;

pub fn utc_now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[derive(Debug, Clone, Default)]
pub struct ShortenSettings {
    /// Endpoint accepting `POST {"url": ...}`. Generation fails while unset.
    pub endpoint: Option<String>,
    /// No timeout unless set.
    pub request_timeout: Option<Duration>,
}

#[derive(Debug, Clone)]
pub struct SuggestSettings {
    /// Suggestions are skipped (empty) while unset.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub max_suggestions: usize,
    pub request_timeout: Option<Duration>,
}

impl Default for SuggestSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: "https://generativelanguage.googleapis.com".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            max_suggestions: 5,
            request_timeout: None,
        }
    }
}

#[derive(Clone)]
pub struct EngineConfig {
    pub shortener: ShortenSettings,
    pub suggestions: SuggestSettings,
    pub created_utc: Clock,
}

impl EngineConfig {
    pub fn new(shortener: ShortenSettings, suggestions: SuggestSettings) -> Self {
        Self {
            shortener,
            suggestions,
            created_utc: Arc::new(utc_now_rfc3339),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(ShortenSettings::default(), SuggestSettings::default())
    }
}
