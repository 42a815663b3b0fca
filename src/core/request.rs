//! Generation request model and input validation.
//!
//! Incoming JSON is decoded into [`GenerateRequestBody`] (all fields optional)
//! and converted into a validated [`GenerationRequest`]. Depth and mode are
//! closed enums so the rest of the pipeline never sees an unknown value.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Input validation failures. Messages are returned to the client verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No JSON data provided")]
    MissingBody,

    #[error("Invalid request body: {0}")]
    MalformedBody(String),

    #[error("Topic is required")]
    EmptyTopic,

    #[error("Invalid depth '{0}'. Must be one of: beginner, intermediate, advanced")]
    InvalidDepth(String),

    #[error("Invalid mode '{0}'. Must be one of: text, code, audio, visual")]
    InvalidMode(String),
}

/// Requested learning level. Only affects prompt wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Depth {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Depth {
    pub const ALL: [Depth; 3] = [Depth::Beginner, Depth::Intermediate, Depth::Advanced];

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Depth {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(ValidationError::InvalidDepth(s.to_string())),
        }
    }
}

/// Requested content type. Selects the prompt template and the response shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentMode {
    #[default]
    Text,
    Code,
    Audio,
    Visual,
}

impl ContentMode {
    pub const ALL: [ContentMode; 4] = [
        ContentMode::Text,
        ContentMode::Code,
        ContentMode::Audio,
        ContentMode::Visual,
    ];

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Code => "code",
            Self::Audio => "audio",
            Self::Visual => "visual",
        }
    }
}

impl fmt::Display for ContentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "code" => Ok(Self::Code),
            "audio" => Ok(Self::Audio),
            "visual" => Ok(Self::Visual),
            _ => Err(ValidationError::InvalidMode(s.to_string())),
        }
    }
}

/// Raw `POST /generate` body as sent by the browser.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateRequestBody {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub depth: Option<String>,
    #[serde(default)]
    pub mode: Option<String>,
}

/// A validated generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// Trimmed, non-empty topic
    pub topic: String,
    pub depth: Depth,
    pub mode: ContentMode,
}

impl GenerationRequest {
    pub fn new(topic: impl Into<String>, depth: Depth, mode: ContentMode) -> Self {
        Self {
            topic: topic.into(),
            depth,
            mode,
        }
    }
}

impl TryFrom<GenerateRequestBody> for GenerationRequest {
    type Error = ValidationError;

    /// Absent `depth`/`mode` fall back to beginner/text; present but unknown
    /// values are rejected.
    fn try_from(body: GenerateRequestBody) -> Result<Self, Self::Error> {
        let topic = body.topic.as_deref().map(str::trim).unwrap_or_default();
        if topic.is_empty() {
            return Err(ValidationError::EmptyTopic);
        }

        let depth = match body.depth.as_deref() {
            Some(raw) => raw.parse()?,
            None => Depth::default(),
        };
        let mode = match body.mode.as_deref() {
            Some(raw) => raw.parse()?,
            None => ContentMode::default(),
        };

        Ok(Self::new(topic, depth, mode))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(topic: Option<&str>, depth: Option<&str>, mode: Option<&str>) -> GenerateRequestBody {
        GenerateRequestBody {
            topic: topic.map(String::from),
            depth: depth.map(String::from),
            mode: mode.map(String::from),
        }
    }

    #[test]
    fn test_valid_request_is_trimmed() {
        let request =
            GenerationRequest::try_from(body(Some("  Decision Trees "), Some("beginner"), Some("code")))
                .unwrap();
        assert_eq!(request.topic, "Decision Trees");
        assert_eq!(request.depth, Depth::Beginner);
        assert_eq!(request.mode, ContentMode::Code);
    }

    #[test]
    fn test_whitespace_topic_rejected() {
        for topic in [None, Some(""), Some("   "), Some("\n\t")] {
            let result = GenerationRequest::try_from(body(topic, Some("beginner"), Some("text")));
            assert_eq!(result, Err(ValidationError::EmptyTopic));
        }
    }

    #[test]
    fn test_long_topic_accepted() {
        let long = "Regularization ".repeat(40);
        let request = GenerationRequest::try_from(body(Some(&long), None, None)).unwrap();
        assert_eq!(request.topic, long.trim());
    }

    #[test]
    fn test_invalid_mode_rejected() {
        let result = GenerationRequest::try_from(body(Some("CNNs"), Some("beginner"), Some("video")));
        assert_eq!(result, Err(ValidationError::InvalidMode("video".to_string())));
    }

    #[test]
    fn test_invalid_depth_rejected() {
        let result = GenerationRequest::try_from(body(Some("CNNs"), Some("expert"), Some("text")));
        assert_eq!(result, Err(ValidationError::InvalidDepth("expert".to_string())));

        let result = GenerationRequest::try_from(body(Some("CNNs"), Some(""), Some("text")));
        assert!(matches!(result, Err(ValidationError::InvalidDepth(_))));
    }

    #[test]
    fn test_missing_depth_and_mode_use_defaults() {
        let request = GenerationRequest::try_from(body(Some("SVM"), None, None)).unwrap();
        assert_eq!(request.depth, Depth::Beginner);
        assert_eq!(request.mode, ContentMode::Text);
    }

    #[test]
    fn test_enum_parsing_is_case_insensitive() {
        assert_eq!("ADVANCED".parse::<Depth>().unwrap(), Depth::Advanced);
        assert_eq!(" Visual ".parse::<ContentMode>().unwrap(), ContentMode::Visual);
    }

    #[test]
    fn test_enum_serialization() {
        assert_eq!(serde_json::to_string(&Depth::Intermediate).unwrap(), "\"intermediate\"");
        assert_eq!(serde_json::to_string(&ContentMode::Audio).unwrap(), "\"audio\"");
    }

    #[test]
    fn test_validation_messages() {
        assert_eq!(ValidationError::EmptyTopic.to_string(), "Topic is required");
        assert_eq!(ValidationError::MissingBody.to_string(), "No JSON data provided");
        assert!(
            ValidationError::InvalidMode("video".into())
                .to_string()
                .contains("text, code, audio, visual")
        );
    }
}
