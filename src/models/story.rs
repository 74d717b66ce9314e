use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Which kind of inference backend serves a generation request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// In-process text-generation pipeline
    Local,
    /// Remote inference endpoint reached over HTTPS
    Hosted,
}

impl Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendKind::Local => write!(f, "local"),
            BackendKind::Hosted => write!(f, "hosted"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = AppError;

    /// Parses a backend tag from configuration or UI input
    ///
    /// The set of backends is closed; an unrecognized tag is a caller
    /// error and is rejected here, before any backend is constructed.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(BackendKind::Local),
            "hosted" => Ok(BackendKind::Hosted),
            other => Err(AppError::InvalidArgument(format!(
                "unknown backend kind: {}",
                other
            ))),
        }
    }
}

/// Sampling parameters forwarded to the generation backend
///
/// Optional fields are omitted from wire payloads when unset rather than
/// sent as nulls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GenerationOptions {
    pub max_new_tokens: u32,
    pub do_sample: bool,
    pub temperature: f64,
    pub top_p: f64,
    pub num_return_sequences: u32,
    pub repetition_penalty: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pad_token_id: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            max_new_tokens: 300,
            do_sample: true,
            temperature: 0.9,
            top_p: 0.9,
            num_return_sequences: 3,
            repetition_penalty: 1.1,
            pad_token_id: None,
            seed: None,
        }
    }
}

/// A single story-generation request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GenerationRequest {
    /// Free-text opener supplied by the user
    pub prompt: String,
    /// Genre tag; unknown genres fall back to the open-ended template
    pub genre: String,
    #[serde(default)]
    pub options: GenerationOptions,
}

/// One generated continuation, cleaned for display
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Continuation {
    /// 1-based position within the returned batch
    pub id: usize,
    /// Text with the echoed prompt stripped and whitespace normalized
    pub continuation: String,
    /// Raw backend output, kept for persistence and debugging
    pub full_text: String,
}
