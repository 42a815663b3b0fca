//! Model and voice selection for the OpenAI speech endpoint.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum `input` length accepted by `/v1/audio/speech`
pub const OPENAI_TTS_MAX_INPUT_CHARS: usize = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpenAITTSModel {
    /// Lower latency, standard quality
    #[default]
    #[serde(rename = "tts-1")]
    Tts1,
    #[serde(rename = "tts-1-hd")]
    Tts1Hd,
    #[serde(rename = "gpt-4o-mini-tts")]
    Gpt4oMiniTts,
}

impl OpenAITTSModel {
    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tts1 => "tts-1",
            Self::Tts1Hd => "tts-1-hd",
            Self::Gpt4oMiniTts => "gpt-4o-mini-tts",
        }
    }

    /// Unknown names fall back to `tts-1`
    pub fn from_str_or_default(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "tts-1-hd" | "tts1-hd" => Self::Tts1Hd,
            "gpt-4o-mini-tts" => Self::Gpt4oMiniTts,
            _ => Self::Tts1,
        }
    }
}

impl fmt::Display for OpenAITTSModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OpenAIVoice {
    #[default]
    Alloy,
    Ash,
    Coral,
    Echo,
    Fable,
    Onyx,
    Nova,
    Sage,
    Shimmer,
}

impl OpenAIVoice {
    const ALL: [OpenAIVoice; 9] = [
        Self::Alloy,
        Self::Ash,
        Self::Coral,
        Self::Echo,
        Self::Fable,
        Self::Onyx,
        Self::Nova,
        Self::Sage,
        Self::Shimmer,
    ];

    #[inline]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alloy => "alloy",
            Self::Ash => "ash",
            Self::Coral => "coral",
            Self::Echo => "echo",
            Self::Fable => "fable",
            Self::Onyx => "onyx",
            Self::Nova => "nova",
            Self::Sage => "sage",
            Self::Shimmer => "shimmer",
        }
    }

    /// Unknown names fall back to `alloy`
    pub fn from_str_or_default(s: &str) -> Self {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|voice| voice.as_str() == wanted)
            .unwrap_or_default()
    }

    pub fn all() -> &'static [OpenAIVoice] {
        &Self::ALL
    }
}

impl fmt::Display for OpenAIVoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
