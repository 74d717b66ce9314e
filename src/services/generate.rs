use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    error::AppResult,
    models::{Continuation, GenerationOptions, GenerationRequest},
    services::{prompts, providers::Backend},
};

/// A newline followed by more whitespace, collapsed during cleanup
static RAGGED_NEWLINES: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\n\s+").expect("valid regex"));

/// Strips the echoed prompt and normalizes ragged line breaks
///
/// Backends commonly echo the prompt at the start of each generation;
/// when they do, only the continuation is kept.
pub fn clean_generated_text(prompt: &str, generated: &str) -> String {
    let text = generated.strip_prefix(prompt).unwrap_or(generated).trim();
    RAGGED_NEWLINES.replace_all(text, "\n").into_owned()
}

/// Generates `options.num_return_sequences` continuations of an
/// assembled prompt
///
/// Both backend families produce raw texts through their own transports;
/// this dispatcher applies identical cleanup and packaging to each, so
/// callers never see backend-specific output.
pub async fn generate_variations(
    backend: &Backend,
    model: &str,
    prompt: &str,
    options: &GenerationOptions,
) -> AppResult<Vec<Continuation>> {
    let raw_texts: Vec<String> = match backend {
        Backend::Local(pipeline) => pipeline
            .generate(prompt, options)
            .await?
            .into_iter()
            .map(|output| output.generated_text)
            .collect(),
        Backend::Hosted(client) => client.generate(model, prompt, options).await?,
    };

    let continuations: Vec<Continuation> = raw_texts
        .into_iter()
        .enumerate()
        .map(|(i, full_text)| Continuation {
            id: i + 1,
            continuation: clean_generated_text(prompt, &full_text),
            full_text,
        })
        .collect();

    tracing::info!(
        backend = %backend.kind(),
        model = %model,
        continuations = continuations.len(),
        "Generation completed"
    );

    Ok(continuations)
}

/// Runs the full story pipeline for one request: genre template assembly,
/// then generation with the request's sampling options
pub async fn generate_story(
    backend: &Backend,
    model: &str,
    request: &GenerationRequest,
) -> AppResult<Vec<Continuation>> {
    let prompt = prompts::assemble(&request.prompt, &request.genre);
    generate_variations(backend, model, &prompt, &request.options).await
}
