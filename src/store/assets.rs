use std::path::PathBuf;

use reqwest::Client as HttpClient;

use crate::{
    config::Env,
    error::{AppError, AppResult},
    models::{Catalog, SimilarityMatrix},
};

/// Local file names for the two downloaded data files
const CATALOG_FILE: &str = "movie_list.json";
const SIMILARITY_FILE: &str = "similarity.json";

/// Fetches and loads the precomputed data files
///
/// The catalog and similarity matrix are built offline and published on a
/// blob host. Each file is downloaded once by identifier and reused from
/// disk afterwards; presence on disk is the only freshness check.
#[derive(Clone)]
pub struct AssetStore {
    http_client: HttpClient,
    blob_base_url: String,
    data_dir: PathBuf,
}

impl AssetStore {
    pub fn new(blob_base_url: String, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            http_client: HttpClient::new(),
            blob_base_url,
            data_dir: data_dir.into(),
        }
    }

    pub fn from_env(env: &Env) -> Self {
        Self::new(env.blob_base_url.clone(), env.data_dir.clone())
    }

    /// Ensures a data file exists locally, downloading it by blob id if
    /// absent; returns the local path
    ///
    /// A file already on disk wins outright; the id is only consulted
    /// (and validated) when a download is actually needed.
    pub async fn ensure_local(&self, file_id: &str, file_name: &str) -> AppResult<PathBuf> {
        let path = self.data_dir.join(file_name);
        if path.exists() {
            tracing::debug!(path = %path.display(), "Data file already present");
            return Ok(path);
        }

        validate_file_id(file_id)?;
        tokio::fs::create_dir_all(&self.data_dir).await?;

        let url = format!("{}?id={}", self.blob_base_url, file_id);
        tracing::info!(file = %file_name, "Downloading data file");

        let response = self.http_client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(AppError::Data(format!(
                "blob host returned status {} for {}",
                response.status(),
                file_name
            )));
        }

        let bytes = response.bytes().await?;
        tokio::fs::write(&path, &bytes).await?;

        tracing::info!(
            path = %path.display(),
            bytes = bytes.len(),
            "Data file downloaded"
        );
        Ok(path)
    }

    /// Loads the movie catalog, downloading it first if needed
    pub async fn load_catalog(&self, file_id: &str) -> AppResult<Catalog> {
        let path = self.ensure_local(file_id, CATALOG_FILE).await?;
        let bytes = tokio::fs::read(&path).await?;
        let catalog: Catalog = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Data(format!("malformed catalog file: {}", e)))?;

        tracing::info!(entries = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }

    /// Loads the similarity matrix, downloading it first if needed
    pub async fn load_similarity(&self, file_id: &str) -> AppResult<SimilarityMatrix> {
        let path = self.ensure_local(file_id, SIMILARITY_FILE).await?;
        let bytes = tokio::fs::read(&path).await?;
        let rows: Vec<Vec<f32>> = serde_json::from_slice(&bytes)
            .map_err(|e| AppError::Data(format!("malformed similarity file: {}", e)))?;

        let matrix = SimilarityMatrix::from_rows(rows)?;
        tracing::info!(dimension = matrix.dimension(), "Similarity matrix loaded");
        Ok(matrix)
    }
}

/// Blob identifiers are untrusted configuration; anything outside the
/// host's id charset is rejected before a URL is built from it
fn validate_file_id(file_id: &str) -> AppResult<()> {
    if file_id.is_empty() {
        return Err(AppError::Config("blob file id is empty".to_string()));
    }
    if let Some(bad) = file_id
        .chars()
        .find(|c| !c.is_ascii_alphanumeric() && *c != '-' && *c != '_')
    {
        return Err(AppError::Config(format!(
            "blob file id contains invalid character {:?}",
            bad
        )));
    }
    Ok(())
}
