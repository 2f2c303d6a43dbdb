use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tagger_logging::{clip_for_log, tagger_info, tagger_warn};

use crate::config::{utc_now_rfc3339, Clock, ShortenSettings};
use crate::{FailureKind, ShortLink, ShortenError};

const NOT_CONFIGURED: &str = "Short link service is not configured.";
const UNAVAILABLE: &str = "The link shortening service is currently unavailable.";
const TIMED_OUT: &str = "The link shortening service did not respond in time.";
const MISSING_SHORT_LINK: &str = "The link shortening service returned no short link.";

#[async_trait::async_trait]
pub trait Shortener: Send + Sync {
    async fn shorten(&self, long_url: &str) -> Result<ShortLink, ShortenError>;
}

#[derive(Serialize)]
struct ShortenRequest<'a> {
    url: &'a str,
}

#[derive(Deserialize)]
struct ShortenResponse {
    #[serde(rename = "shortLink")]
    short_link: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Posts the long URL as JSON to the configured endpoint. Single attempt.
#[derive(Clone)]
pub struct ReqwestShortener {
    settings: ShortenSettings,
    clock: Clock,
}

impl ReqwestShortener {
    pub fn new(settings: ShortenSettings) -> Self {
        Self {
            settings,
            clock: Arc::new(utc_now_rfc3339),
        }
    }

    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn endpoint(&self) -> Result<reqwest::Url, ShortenError> {
        let raw = self
            .settings
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|endpoint| !endpoint.is_empty())
            .ok_or_else(|| ShortenError::new(FailureKind::NotConfigured, NOT_CONFIGURED))?;
        reqwest::Url::parse(raw).map_err(|err| {
            ShortenError::new(
                FailureKind::NotConfigured,
                format!("Short link service URL is invalid: {err}"),
            )
        })
    }

    fn build_client(&self) -> Result<reqwest::Client, ShortenError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        builder
            .build()
            .map_err(|err| ShortenError::new(FailureKind::Network, err.to_string()))
    }
}

#[async_trait::async_trait]
impl Shortener for ReqwestShortener {
    async fn shorten(&self, long_url: &str) -> Result<ShortLink, ShortenError> {
        let endpoint = self.endpoint()?;
        let client = self.build_client()?;
        tagger_info!(
            "Shortening url={} via {}",
            clip_for_log(long_url, 120),
            endpoint
        );

        let response = client
            .post(endpoint)
            .json(&ShortenRequest { url: long_url })
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.ok();
            let message = body
                .as_deref()
                .and_then(|bytes| serde_json::from_slice::<ErrorBody>(bytes).ok())
                .and_then(|body| body.error)
                .filter(|error| !error.trim().is_empty())
                .unwrap_or_else(|| format!("Service returned status {}", status.as_u16()));
            tagger_warn!("Shortening failed with status {}: {}", status, message);
            return Err(ShortenError::new(
                FailureKind::HttpStatus(status.as_u16()),
                message,
            ));
        }

        let body: ShortenResponse = response.json().await.map_err(|err| {
            tagger_warn!("Shortening response was not valid JSON: {}", err);
            ShortenError::new(FailureKind::InvalidResponse, MISSING_SHORT_LINK)
        })?;
        let short_link = body
            .short_link
            .map(|link| link.trim().to_string())
            .filter(|link| !link.is_empty())
            .ok_or_else(|| ShortenError::new(FailureKind::InvalidResponse, MISSING_SHORT_LINK))?;

        Ok(ShortLink {
            short_link,
            long_url: long_url.to_string(),
            created_at: (self.clock)(),
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> ShortenError {
    tagger_warn!("Shortening request failed: {}", err);
    if err.is_timeout() {
        return ShortenError::new(FailureKind::Timeout, TIMED_OUT);
    }
    ShortenError::new(FailureKind::Network, UNAVAILABLE)
}
