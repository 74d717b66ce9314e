/// Generation backend abstraction
///
/// The two backend families (in-process pipeline, hosted endpoint) are
/// constructed once per (kind, model) selection and reused via
/// `state::BackendCache`. The local engine itself lives outside this
/// crate; `LocalPipeline` is the seam implementations adapt it to.
use std::sync::Arc;

use crate::{
    error::AppResult,
    models::{BackendKind, GenerationOptions},
};

pub mod hosted;
pub mod tmdb;

pub use hosted::HostedInferenceClient;
pub use tmdb::TmdbClient;

/// One raw generated-text record from a local pipeline
#[derive(Debug, Clone, PartialEq)]
pub struct LocalOutput {
    pub generated_text: String,
}

/// In-process text-generation pipeline
///
/// Implementations are expected to honor every recognized option,
/// including `seed` when set, and to return
/// `options.num_return_sequences` records in generation order.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait LocalPipeline: Send + Sync {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> AppResult<Vec<LocalOutput>>;
}

/// A ready-to-use generation backend handle
#[derive(Clone)]
pub enum Backend {
    Local(Arc<dyn LocalPipeline>),
    Hosted(Arc<HostedInferenceClient>),
}

impl Backend {
    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::Local(_) => BackendKind::Local,
            Backend::Hosted(_) => BackendKind::Hosted,
        }
    }
}

impl std::fmt::Debug for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend").field("kind", &self.kind()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_kind_accessor() {
        let local = Backend::Local(Arc::new(MockLocalPipeline::new()));
        assert_eq!(local.kind(), BackendKind::Local);

        let hosted = Backend::Hosted(Arc::new(HostedInferenceClient::new(
            "token".to_string(),
            "http://test.local".to_string(),
        )));
        assert_eq!(hosted.kind(), BackendKind::Hosted);
    }
}
