use std::sync::Arc;

use plotline_core::config::{AppSettings, ConfigSource};
use plotline_core::error::{AppError, AppResult};
use plotline_core::models::{BackendKind, GenerationOptions, GenerationRequest};
use plotline_core::services::{generate, moderate};
use plotline_core::{Backend, BackendCache, BackendKey, LocalOutput, LocalPipeline, StoryStore};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}

/// Stand-in engine: echoes the prompt (as real pipelines do) and appends
/// a numbered continuation with ragged indentation
struct EchoPipeline;

#[async_trait::async_trait]
impl LocalPipeline for EchoPipeline {
    async fn generate(
        &self,
        prompt: &str,
        options: &GenerationOptions,
    ) -> AppResult<Vec<LocalOutput>> {
        Ok((1..=options.num_return_sequences)
            .map(|i| LocalOutput {
                generated_text: format!("{}\n   The hallway fell silent ({}).", prompt, i),
            })
            .collect())
    }
}

#[tokio::test]
async fn test_story_session_end_to_end() {
    init_tracing();

    // settings document
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.yaml");
    std::fs::write(
        &config_path,
        "default_model: gpt2\nnum_return_sequences: 2\nmoderation:\n  enabled: true\n",
    )
    .unwrap();
    let (settings, source) = AppSettings::load(&config_path).unwrap();
    assert_eq!(source, ConfigSource::File);

    // backend selection goes through the cache
    let cache = BackendCache::new();
    let key = BackendKey::new(
        "local".parse::<BackendKind>().unwrap(),
        settings.default_model.clone(),
    );
    assert!(cache.get(&key).await.is_none());
    let backend: Arc<Backend> = Arc::new(Backend::Local(Arc::new(EchoPipeline)));
    cache.put(key.clone(), Arc::clone(&backend)).await;

    // full pipeline: template, generation, cleanup, packaging
    let request = GenerationRequest {
        prompt: "  The cellar door creaked open.  ".to_string(),
        genre: "Horror".to_string(),
        options: settings.generation_options(),
    };
    let continuations = generate::generate_story(&backend, &settings.default_model, &request)
        .await
        .unwrap();

    assert_eq!(continuations.len(), 2);
    assert_eq!(continuations[0].id, 1);
    assert_eq!(
        continuations[0].continuation,
        "The hallway fell silent (1)."
    );
    // the raw text keeps the echoed prompt; the cleaned text drops it
    assert!(continuations[0]
        .full_text
        .contains("Scene: The cellar door creaked open."));
    assert!(!continuations[0].continuation.contains("Scene:"));

    // moderation pass over the cleaned texts
    for continuation in &continuations {
        let hits = moderate::scan(
            &continuation.continuation,
            settings.moderation.banned_words.as_deref(),
        );
        assert!(hits.is_empty());
    }

    // persistence
    let store = StoryStore::new(dir.path().join("stories"));
    let saved = store
        .save(
            &request.prompt,
            &continuations[0].continuation,
            &request.genre,
        )
        .await
        .unwrap();
    let contents = std::fs::read_to_string(&saved).unwrap();
    assert!(contents.starts_with("Prompt:\n"));
    assert!(contents.contains("\n\n---\n\nGenre: Horror\n\n"));
    assert!(contents.ends_with("The hallway fell silent (1)."));

    // a second generation reuses the cached handle
    let cached = cache.get(&key).await.unwrap();
    assert!(Arc::ptr_eq(&cached, &backend));
}

#[test]
fn test_unknown_backend_kind_fails_before_any_backend_exists() {
    let err = "bogus".parse::<BackendKind>().unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
}

#[tokio::test]
async fn test_switching_models_invalidates_cached_backend() {
    let cache = BackendCache::new();
    let first = BackendKey::new(BackendKind::Local, "gpt2");
    cache
        .put(first.clone(), Arc::new(Backend::Local(Arc::new(EchoPipeline))))
        .await;

    let second = BackendKey::new(BackendKind::Local, "gpt2-large");
    assert!(cache.get(&second).await.is_none());

    cache
        .put(
            second.clone(),
            Arc::new(Backend::Local(Arc::new(EchoPipeline))),
        )
        .await;
    assert!(cache.get(&first).await.is_none());
    assert!(cache.get(&second).await.is_some());
}

#[tokio::test]
async fn test_moderation_flags_generated_text() {
    struct GrimPipeline;

    #[async_trait::async_trait]
    impl LocalPipeline for GrimPipeline {
        async fn generate(
            &self,
            prompt: &str,
            _options: &GenerationOptions,
        ) -> AppResult<Vec<LocalOutput>> {
            Ok(vec![LocalOutput {
                generated_text: format!("{} They plotted to kill the king.", prompt),
            }])
        }
    }

    let backend = Backend::Local(Arc::new(GrimPipeline));
    let request = GenerationRequest {
        prompt: "The council met at midnight.".to_string(),
        genre: "Mystery".to_string(),
        options: GenerationOptions {
            num_return_sequences: 1,
            ..GenerationOptions::default()
        },
    };

    let continuations = generate::generate_story(&backend, "gpt2", &request)
        .await
        .unwrap();
    let hits = moderate::scan(&continuations[0].continuation, None);
    assert_eq!(hits, vec!["kill"]);

    // "skill" must not trip the same scan
    assert!(moderate::scan("a skill check", None).is_empty());
}

#[test]
fn test_default_settings_when_config_absent() {
    let dir = tempfile::tempdir().unwrap();
    let (settings, source) = AppSettings::load(&dir.path().join("missing.yaml")).unwrap();

    assert_eq!(source, ConfigSource::Defaults);
    assert_eq!(settings.default_model, "gpt2-medium");
    assert_eq!(settings.generation_options(), GenerationOptions::default());
}
