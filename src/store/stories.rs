use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::AppResult;

/// Persists generated stories as timestamped text files
#[derive(Debug, Clone)]
pub struct StoryStore {
    folder: PathBuf,
}

impl Default for StoryStore {
    fn default() -> Self {
        Self::new("stories")
    }
}

impl StoryStore {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
        }
    }

    /// Folder saved stories land in
    pub fn folder(&self) -> &Path {
        &self.folder
    }

    /// Writes a story to a new timestamped file and returns its path
    ///
    /// File names carry the genre (spaces replaced with underscores) and
    /// a second-precision timestamp, so interactive saves land in fresh
    /// files instead of overwriting earlier ones.
    pub async fn save(&self, prompt: &str, continuation: &str, genre: &str) -> AppResult<PathBuf> {
        tokio::fs::create_dir_all(&self.folder).await?;

        let safe_genre = genre.replace(' ', "_");
        let timestamp = Local::now().format("%Y%m%d_%H%M%S");
        let path = self
            .folder
            .join(format!("story_{}_{}.txt", safe_genre, timestamp));

        let contents = format!(
            "Prompt:\n{}\n\n---\n\nGenre: {}\n\n{}",
            prompt, genre, continuation
        );
        tokio::fs::write(&path, contents).await?;

        tracing::info!(path = %path.display(), "Story saved");
        Ok(path)
    }
}
