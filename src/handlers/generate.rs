use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::core::{
    ContentMode, Depth, GenerateRequestBody, GeneratedContent, GenerationRequest, ValidationError,
};
use crate::errors::AppResult;
use crate::state::AppState;

pub const AUDIO_SUCCESS_MESSAGE: &str = "Audio file generated successfully";
pub const VISUAL_HINT_MESSAGE: &str = "Use this prompt with Mermaid or draw.io";

/// Successful `POST /generate` response.
///
/// Mode-specific fields are omitted when they do not apply.
#[derive(Debug, Serialize)]
pub struct GenerationResponse {
    pub success: bool,
    pub content: String,
    pub topic: String,
    pub depth: Depth,
    pub mode: ContentMode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl GenerationResponse {
    pub fn new(request: GenerationRequest, output: GeneratedContent) -> Self {
        let mut response = Self {
            success: true,
            content: String::new(),
            topic: request.topic,
            depth: request.depth,
            mode: request.mode,
            audio_file: None,
            filename: None,
            text_content: None,
            message: None,
        };

        match output {
            GeneratedContent::Text(content) | GeneratedContent::Code(content) => {
                response.content = content;
            }
            GeneratedContent::Visual(content) => {
                response.content = content;
                response.message = Some(VISUAL_HINT_MESSAGE.to_string());
            }
            GeneratedContent::Audio { text, artifact } => {
                response.text_content = Some(text.clone());
                response.content = text;
                response.audio_file = Some(artifact.url_path);
                response.filename = Some(artifact.filename);
                response.message = Some(AUDIO_SUCCESS_MESSAGE.to_string());
            }
        }
        response
    }
}

/// Generate learning content for a topic.
///
/// The body must be a JSON object; `depth` defaults to beginner and `mode` to
/// text when absent.
pub async fn generate_handler(
    State(state): State<Arc<AppState>>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> AppResult<Json<GenerationResponse>> {
    let request = parse_request(body)?;

    info!(
        topic = %request.topic,
        depth = %request.depth,
        mode = %request.mode,
        "Generating content"
    );

    let output = state.generator.generate(&request).await?;

    info!(
        mode = %request.mode,
        content_chars = output.content().chars().count(),
        "Content generated"
    );

    Ok(Json(GenerationResponse::new(request, output)))
}

fn parse_request(
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<GenerationRequest, ValidationError> {
    let value = match body {
        Ok(Json(value)) if value.is_object() => value,
        _ => return Err(ValidationError::MissingBody),
    };

    let body: GenerateRequestBody = serde_json::from_value(value)
        .map_err(|e| ValidationError::MalformedBody(e.to_string()))?;

    GenerationRequest::try_from(body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::AudioArtifact;
    use serde_json::json;
    use std::path::PathBuf;

    fn ok(value: serde_json::Value) -> Result<Json<serde_json::Value>, JsonRejection> {
        Ok(Json(value))
    }

    #[test]
    fn test_parse_request_defaults() {
        let request = parse_request(ok(json!({"topic": "  Neural Networks "}))).unwrap();
        assert_eq!(request.topic, "Neural Networks");
        assert_eq!(request.depth, Depth::Beginner);
        assert_eq!(request.mode, ContentMode::Text);
    }

    #[test]
    fn test_parse_request_non_object() {
        assert_eq!(
            parse_request(ok(json!(["topic"]))),
            Err(ValidationError::MissingBody)
        );
        assert_eq!(parse_request(ok(json!(null))), Err(ValidationError::MissingBody));
    }

    #[test]
    fn test_parse_request_wrong_field_type() {
        assert!(matches!(
            parse_request(ok(json!({"topic": 42}))),
            Err(ValidationError::MalformedBody(_))
        ));
    }

    #[test]
    fn test_text_response_omits_extras() {
        let request = GenerationRequest::new("Gradient Descent", Depth::Intermediate, ContentMode::Text);
        let response = GenerationResponse::new(
            request,
            GeneratedContent::Text("Explanation".to_string()),
        );

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "success": true,
                "content": "Explanation",
                "topic": "Gradient Descent",
                "depth": "intermediate",
                "mode": "text"
            })
        );
    }

    #[test]
    fn test_audio_response_fields() {
        let request = GenerationRequest::new("CNNs", Depth::Beginner, ContentMode::Audio);
        let artifact = AudioArtifact {
            filename: "explanation_0a1b2c3d_20260101_120000.mp3".to_string(),
            url_path: "/static/audio/explanation_0a1b2c3d_20260101_120000.mp3".to_string(),
            path: PathBuf::from("static/audio/explanation_0a1b2c3d_20260101_120000.mp3"),
            size_bytes: 1024,
        };
        let response = GenerationResponse::new(
            request,
            GeneratedContent::Audio {
                text: "Spoken text".to_string(),
                artifact,
            },
        );

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["content"], "Spoken text");
        assert_eq!(value["text_content"], "Spoken text");
        assert_eq!(
            value["audio_file"],
            "/static/audio/explanation_0a1b2c3d_20260101_120000.mp3"
        );
        assert_eq!(value["filename"], "explanation_0a1b2c3d_20260101_120000.mp3");
        assert_eq!(value["message"], AUDIO_SUCCESS_MESSAGE);
    }

    #[test]
    fn test_visual_response_message() {
        let request = GenerationRequest::new("RNNs", Depth::Advanced, ContentMode::Visual);
        let response =
            GenerationResponse::new(request, GeneratedContent::Visual("Diagram".to_string()));
        assert_eq!(response.message.as_deref(), Some(VISUAL_HINT_MESSAGE));
        assert!(response.audio_file.is_none());
    }
}
