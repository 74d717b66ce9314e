//! Core engine for a pair of small demo apps: a movie recommender that
//! ranks titles against a precomputed similarity matrix (with poster art
//! from an external metadata service), and a story generator that drives
//! a local or hosted text-generation backend behind tunable sampling
//! parameters, with prompt templates and a lightweight banned-word scan.
//!
//! The interactive UI layer lives outside this crate and links against
//! this library API; nothing here renders or serves anything.

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

pub use config::{AppSettings, ConfigSource, Env, ModerationSettings};
pub use error::{AppError, AppResult};
pub use services::providers::{
    Backend, HostedInferenceClient, LocalOutput, LocalPipeline, TmdbClient,
};
pub use services::recommend::Recommender;
pub use state::{BackendCache, BackendKey};
pub use store::{AssetStore, StoryStore};
