use anyhow::{anyhow, Result};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::api_connection::connection::ApiConnectionError;
use crate::api_connection::endpoints::{
    ChatCompletionRequest, ChatMessage, ContentPart, ImageUrlRef, MessageContent, Provider,
    ResponseFormat,
};
use crate::label_normalizer::parse_label_array;

const ALLOWED_IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
];

/// Image reference the labeler can fetch: a remote URL, or local bytes
/// carried inline as a data URL.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Url(String),
    DataUrl(String),
}

impl ImageSource {
    /// Wrap raw image bytes as a data URL. The extension decides the MIME
    /// type; anything outside jpg/jpeg/png is rejected up front.
    pub fn from_bytes(bytes: &[u8], extension: &str) -> Result<Self> {
        let ext = extension.trim_start_matches('.').to_lowercase();
        let mime = ALLOWED_IMAGE_EXTENSIONS
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|(_, m)| *m)
            .ok_or_else(|| anyhow!("Invalid file type '{}'. Allowed: jpg, jpeg, png", ext))?;
        Ok(Self::DataUrl(format!(
            "data:{};base64,{}",
            mime,
            BASE64.encode(bytes)
        )))
    }

    fn url(&self) -> &str {
        match self {
            ImageSource::Url(url) | ImageSource::DataUrl(url) => url,
        }
    }
}

/// Ask the vision model for the grocery ingredients visible in the image.
///
/// Returns the raw label strings exactly as the model reported them; order
/// and casing carry no guarantee, and normalization is the caller's job.
pub async fn extract_labels(
    provider: &Provider,
    image: &ImageSource,
) -> Result<Vec<String>, ApiConnectionError> {
    let model = provider.model_for_role("vision").ok_or_else(|| {
        ApiConnectionError::ApiError {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            error_body: "No model registered for role 'vision'".to_string(),
        }
    })?;

    let prompt = "List distinct, concrete grocery ingredients you can see. \
Return ONLY a JSON array of strings, no extras.";

    let request = ChatCompletionRequest {
        model,
        messages: vec![ChatMessage {
            role: "user".to_string(),
            content: MessageContent::Parts(vec![
                ContentPart::Text {
                    text: prompt.to_string(),
                },
                ContentPart::ImageUrl {
                    image_url: ImageUrlRef {
                        url: image.url().to_string(),
                    },
                },
            ]),
        }],
        response_format: Some(ResponseFormat::json_object()),
        temperature: Some(0.0),
        max_tokens: Some(200),
    };

    let response = provider.call_chat_completion(request).await?;
    let choice = response
        .choices
        .first()
        .ok_or_else(|| ApiConnectionError::ApiError {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            error_body: "No response choices received from API".to_string(),
        })?;

    parse_label_array(&choice.message.content).ok_or_else(|| ApiConnectionError::ApiError {
        status: reqwest::StatusCode::NO_CONTENT,
        error_body: format!(
            "Unexpected JSON shape from vision model: {}",
            choice.message.content
        ),
    })
}
