use std::collections::HashSet;

use crate::api_connection::connection::ApiConnectionError;
use crate::api_connection::endpoints::{
    ChatCompletionRequest, ChatMessage, Provider, ResponseFormat,
};
use crate::canonicalizer::Canonicalizer;

/// Reduce raw image labels to a deduplicated list of canonical ingredient
/// names, keeping first-seen order.
///
/// Each label is lower-cased and trimmed, dropped if it is a known non-food
/// phrase, then resolved against the alias table as a whole phrase before
/// falling back to per-token canonicalization. This pass is deterministic
/// and always runs; the LLM refinement in [`refine_labels`] only ever
/// replaces its output, never substitutes for it.
pub fn normalize_labels(canon: &Canonicalizer, raw_labels: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut normalized = Vec::new();

    for raw in raw_labels {
        let phrase = raw.trim().to_lowercase();
        if phrase.is_empty() || canon.is_noise(&phrase) {
            continue;
        }
        let ingredient = match canon.phrase_alias(&phrase) {
            Some(canonical) => canonical.to_string(),
            None => phrase
                .replace('-', " ")
                .split_whitespace()
                .map(|token| canon.canonicalize(token))
                .collect::<Vec<_>>()
                .join(" "),
        };
        if ingredient.is_empty() {
            continue;
        }
        if seen.insert(ingredient.clone()) {
            normalized.push(ingredient);
        }
    }

    normalized
}

/// Best-effort semantic cleanup of an already-normalized label list.
///
/// The model may merge synonyms the static table does not know and drop
/// residual non-food items. Any failure here (network, malformed JSON, an
/// emptied list) is reported as an error so the caller can keep the
/// deterministic list it already holds.
pub async fn refine_labels(
    provider: &Provider,
    labels: &[String],
) -> Result<Vec<String>, ApiConnectionError> {
    let model = provider.model_for_role("refine").ok_or_else(|| {
        ApiConnectionError::ApiError {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            error_body: "No model registered for role 'refine'".to_string(),
        }
    })?;

    let prompt = format!(
        "Normalize these ingredient labels. \
Return a JSON array of canonical, singular, lower-case food names. \
Remove duplicates and non-food items.\nInput: {:?}",
        labels
    );

    let request = ChatCompletionRequest {
        model,
        messages: vec![ChatMessage::text("user", prompt)],
        response_format: Some(ResponseFormat::json_object()),
        temperature: Some(0.0),
        max_tokens: Some(120),
    };

    let response = provider.call_chat_completion(request).await?;
    let choice = response
        .choices
        .first()
        .ok_or_else(|| ApiConnectionError::ApiError {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            error_body: "No response choices received from API".to_string(),
        })?;

    let refined = parse_label_array(&choice.message.content).ok_or_else(|| {
        ApiConnectionError::ApiError {
            status: reqwest::StatusCode::NO_CONTENT,
            error_body: format!(
                "Unexpected JSON shape from refinement model: {}",
                choice.message.content
            ),
        }
    })?;

    if refined.is_empty() && !labels.is_empty() {
        return Err(ApiConnectionError::ApiError {
            status: reqwest::StatusCode::NO_CONTENT,
            error_body: "Refinement produced an empty ingredient list".to_string(),
        });
    }
    Ok(refined)
}

/// Parse a model response into a list of label strings.
///
/// Accepts either `{"ingredients": [...]}` or a bare JSON array, with or
/// without markdown code fences around it. Returns `None` for anything
/// else.
pub fn parse_label_array(content: &str) -> Option<Vec<String>> {
    let stripped = strip_code_fences(content);
    let value: serde_json::Value = serde_json::from_str(stripped).ok()?;
    let items = match &value {
        serde_json::Value::Object(map) => map.get("ingredients")?.as_array()?,
        serde_json::Value::Array(items) => items,
        _ => return None,
    };
    items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect()
}

fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    if let Some(rest) = trimmed.strip_prefix("```json") {
        return rest.strip_suffix("```").unwrap_or(rest).trim();
    }
    if let Some(rest) = trimmed.strip_prefix("```") {
        return rest.strip_suffix("```").unwrap_or(rest).trim();
    }
    trimmed
}
