use std::path::Path;

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Env {
    /// Metadata service API key (poster lookups)
    pub tmdb_api_key: String,

    /// Metadata service base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// Hosted inference credential; absent means hosted backends are
    /// unavailable, not an error
    #[serde(default)]
    pub huggingface_api_token: Option<String>,

    /// Hosted inference base URL
    #[serde(default = "default_hf_api_url")]
    pub hf_api_url: String,

    /// Blob identifier for the movie catalog file
    pub catalog_file_id: String,

    /// Blob identifier for the similarity matrix file
    pub similarity_file_id: String,

    /// Blob host download endpoint
    #[serde(default = "default_blob_base_url")]
    pub blob_base_url: String,

    /// Directory for downloaded data files
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_hf_api_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_blob_base_url() -> String {
    "https://drive.google.com/uc".to_string()
}

fn default_data_dir() -> String {
    "data".to_string()
}

impl Env {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Env>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Whether a hosted inference credential is present
    pub fn hosted_available(&self) -> bool {
        self.huggingface_api_token
            .as_deref()
            .is_some_and(|token| !token.is_empty())
    }
}

/// Where the application settings came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from the settings document
    File,
    /// Document absent; built-in defaults in effect
    Defaults,
}

/// Application settings document (YAML)
///
/// Every field is optional in the document; missing fields take the
/// built-in defaults, and a missing document yields all defaults.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppSettings {
    pub default_model: String,
    pub genres: Vec<String>,
    pub max_new_tokens: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub num_return_sequences: u32,
    pub repetition_penalty: f64,
    pub moderation: ModerationSettings,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModerationSettings {
    pub enabled: bool,
    /// Custom banned-word list; `None` selects the built-in list
    pub banned_words: Option<Vec<String>>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            default_model: "gpt2-medium".to_string(),
            genres: vec![
                "Fantasy".to_string(),
                "Mystery".to_string(),
                "Sci-Fi".to_string(),
                "Horror".to_string(),
                "Open-ended".to_string(),
            ],
            max_new_tokens: 300,
            temperature: 0.9,
            top_p: 0.9,
            num_return_sequences: 3,
            repetition_penalty: 1.1,
            moderation: ModerationSettings::default(),
        }
    }
}

impl Default for ModerationSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            banned_words: None,
        }
    }
}

impl AppSettings {
    /// Load settings from a YAML document
    ///
    /// An absent file is not an error: built-in defaults are returned
    /// together with `ConfigSource::Defaults` so callers can tell the
    /// two apart. A present but malformed file is an error.
    pub fn load(path: &Path) -> AppResult<(Self, ConfigSource)> {
        let raw = match std::fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "Settings file absent, using defaults");
                return Ok((Self::default(), ConfigSource::Defaults));
            }
            Err(e) => return Err(AppError::Io(e)),
        };

        let settings: AppSettings = serde_yaml::from_str(&raw).map_err(|e| {
            AppError::Config(format!("malformed settings file {}: {}", path.display(), e))
        })?;

        tracing::info!(path = %path.display(), "Settings loaded");
        Ok((settings, ConfigSource::File))
    }

    /// Generation options seeded from these settings
    pub fn generation_options(&self) -> crate::models::GenerationOptions {
        crate::models::GenerationOptions {
            max_new_tokens: self.max_new_tokens,
            temperature: self.temperature,
            top_p: self.top_p,
            num_return_sequences: self.num_return_sequences,
            repetition_penalty: self.repetition_penalty,
            ..Default::default()
        }
    }
}
