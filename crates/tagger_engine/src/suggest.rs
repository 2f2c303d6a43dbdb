use serde::Deserialize;
use serde_json::json;
use tagger_logging::{tagger_debug, tagger_warn};
use thiserror::Error;

use crate::config::SuggestSettings;
use crate::{SuggestField, SuggestionContext};

/// Best-effort value suggestions. Implementations never fail; they return an empty list.
#[async_trait::async_trait]
pub trait Suggester: Send + Sync {
    async fn suggest(&self, field: SuggestField, context: &SuggestionContext) -> Vec<String>;
}

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("suggestion api key is not configured")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("suggestion service returned status {0}")]
    Status(u16),
    #[error("could not parse suggestions: {0}")]
    Parse(String),
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Deserialize)]
struct SuggestionPayload {
    #[serde(default)]
    suggestions: Vec<String>,
}

/// Asks a Gemini `generateContent` model for a JSON list of values.
#[derive(Debug, Clone)]
pub struct GeminiSuggester {
    settings: SuggestSettings,
}

impl GeminiSuggester {
    pub fn new(settings: SuggestSettings) -> Self {
        Self { settings }
    }

    async fn try_suggest(
        &self,
        field: SuggestField,
        context: &SuggestionContext,
    ) -> Result<Vec<String>, SuggestError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or(SuggestError::MissingApiKey)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.settings.base_url.trim_end_matches('/'),
            self.settings.model
        );
        let prompt = build_prompt(field, context, self.settings.max_suggestions);
        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": {
                    "type": "OBJECT",
                    "properties": {
                        "suggestions": { "type": "ARRAY", "items": { "type": "STRING" } }
                    },
                    "required": ["suggestions"]
                }
            }
        });

        let response = client
            .post(url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SuggestError::Status(status.as_u16()));
        }

        let generated: GenerateResponse = response
            .json()
            .await
            .map_err(|err| SuggestError::Parse(err.to_string()))?;
        let text: String = generated
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect()
            })
            .unwrap_or_default();
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        let payload: SuggestionPayload =
            serde_json::from_str(&text).map_err(|err| SuggestError::Parse(err.to_string()))?;

        Ok(normalize_suggestions(
            payload.suggestions,
            self.settings.max_suggestions,
        ))
    }
}

#[async_trait::async_trait]
impl Suggester for GeminiSuggester {
    async fn suggest(&self, field: SuggestField, context: &SuggestionContext) -> Vec<String> {
        match self.try_suggest(field, context).await {
            Ok(values) => {
                tagger_debug!("Got {} suggestions for utm_{}", values.len(), field.as_str());
                values
            }
            Err(err) => {
                tagger_warn!("Suggestions for utm_{} unavailable: {}", field.as_str(), err);
                Vec::new()
            }
        }
    }
}

pub fn build_prompt(field: SuggestField, context: &SuggestionContext, count: usize) -> String {
    format!(
        "You help marketers tag campaign links.\n\
         Destination: {}\n\
         Source: {}\n\
         Medium: {}\n\
         Campaign: {}\n\n\
         Suggest {count} values for the utm_{} query parameter. \
         Each value must be short, lowercase and hyphen-separated, and fit the destination and campaign.",
        context.base_url,
        context.source,
        context.medium,
        context.campaign,
        field.as_str(),
    )
}

/// Lowercases, hyphenates and dedupes model output, keeping at most `max` values.
pub fn normalize_suggestions(raw: Vec<String>, max: usize) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    if max == 0 {
        return out;
    }
    for value in raw {
        let slug = slugify(&value);
        if slug.is_empty() || out.contains(&slug) {
            continue;
        }
        out.push(slug);
        if out.len() == max {
            break;
        }
    }
    out
}

fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for c in value.chars() {
        if c.is_whitespace() || c == '_' || c == '-' {
            pending_dash = !slug.is_empty();
            continue;
        }
        if pending_dash {
            slug.push('-');
            pending_dash = false;
        }
        slug.extend(c.to_lowercase());
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_collapses_separators() {
        assert_eq!(slugify("  Hero Banner__CTA "), "hero-banner-cta");
        assert_eq!(slugify("--a--b--"), "a-b");
        assert_eq!(slugify("   "), "");
    }

    #[test]
    fn prompt_mentions_field_and_context() {
        let context = SuggestionContext {
            base_url: "example.com/academy".to_string(),
            campaign: "spring".to_string(),
            ..SuggestionContext::default()
        };
        let prompt = build_prompt(SuggestField::Id, &context, 5);
        assert!(prompt.contains("utm_id"));
        assert!(prompt.contains("example.com/academy"));
        assert!(prompt.contains("Suggest 5 values"));
    }
}
