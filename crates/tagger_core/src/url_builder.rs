use url::Url;

use crate::{Field, FormState};

/// Builds the long destination URL carrying the tracking and custom parameters.
///
/// Never fails: when the destination cannot be parsed the raw `base_url` is
/// returned unchanged.
pub fn build_long_url(state: &FormState, include_tracking_fields: bool) -> String {
    let normalized = normalize_base(&state.base_url);
    let mut url = match Url::parse(&normalized) {
        Ok(url) => url,
        Err(_) => return state.base_url.clone(),
    };

    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    let mut touched = false;

    if include_tracking_fields {
        for field in Field::TRACKING {
            let value = state.get(field).trim();
            if value.is_empty() {
                continue;
            }
            if let Some(key) = field.utm_key() {
                set_param(&mut pairs, key, value);
                touched = true;
            }
        }
    }

    for param in &state.additional_params {
        if let Some((key, value)) = param.meaningful() {
            set_param(&mut pairs, key, value);
            touched = true;
        }
    }

    if touched {
        url.query_pairs_mut().clear().extend_pairs(pairs.iter());
    }
    url.to_string()
}

fn normalize_base(raw: &str) -> String {
    let trimmed = raw.trim();
    if has_scheme(trimmed) {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}

/// `scheme://` where scheme is a letter followed by letters, digits, `+`, `-` or `.`.
fn has_scheme(raw: &str) -> bool {
    let Some((scheme, _)) = raw.split_once("://") else {
        return false;
    };
    let mut chars = scheme.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Replace the first `key` in place and drop later duplicates, or append.
fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    let mut seen = false;
    pairs.retain_mut(|(k, v)| {
        if k != key {
            return true;
        }
        if seen {
            return false;
        }
        seen = true;
        *v = value.to_string();
        true
    });
    if !seen {
        pairs.push((key.to_string(), value.to_string()));
    }
}
