/// TMDB metadata provider
///
/// Only used to resolve poster art for ranked recommendations. Poster
/// lookups are best-effort: every failure mode collapses into the fixed
/// placeholder image so a dead metadata service can never fail a
/// recommendation.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::Deserialize;

use crate::error::AppResult;

/// Image base; `poster_path` values arrive with a leading slash
const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";

/// Fallback art when no poster can be resolved
pub const PLACEHOLDER_POSTER_URL: &str = "https://via.placeholder.com/500x750?text=No+Image";

const POSTER_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

/// The one field we read from GET /movie/{id}
#[derive(Debug, Deserialize)]
struct MovieDetails {
    #[serde(default)]
    poster_path: Option<String>,
}

impl TmdbClient {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url,
        }
    }

    /// Resolves the poster image URL for a movie
    ///
    /// Never fails: transport errors, timeouts, non-success statuses,
    /// decode failures, and a missing poster field all yield the
    /// placeholder URL.
    pub async fn poster_url(&self, movie_id: u64) -> String {
        match self.fetch_poster_path(movie_id).await {
            Ok(Some(path)) => format!("{}{}", POSTER_BASE_URL, path),
            Ok(None) => {
                tracing::debug!(movie_id, "Movie has no poster path");
                PLACEHOLDER_POSTER_URL.to_string()
            }
            Err(e) => {
                tracing::warn!(movie_id, error = %e, "Poster lookup failed, using placeholder");
                PLACEHOLDER_POSTER_URL.to_string()
            }
        }
    }

    async fn fetch_poster_path(&self, movie_id: u64) -> AppResult<Option<String>> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);

        let details: MovieDetails = self
            .http_client
            .get(&url)
            .query(&[
                ("api_key", self.api_key.as_str()),
                ("language", "en-US"),
            ])
            .timeout(POSTER_FETCH_TIMEOUT)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(details.poster_path)
    }
}
