use std::cmp::Ordering;

use crate::{
    error::{AppError, AppResult},
    models::{Catalog, RankedTitle, Recommendation, SimilarityMatrix},
    services::providers::TmdbClient,
};

/// Default number of neighbors returned per lookup
pub const DEFAULT_TOP_N: usize = 5;

/// Similarity-based movie recommender
///
/// Wraps a catalog and its precomputed similarity matrix, both produced
/// together by offline tooling and immutable here.
pub struct Recommender {
    catalog: Catalog,
    matrix: SimilarityMatrix,
    posters: TmdbClient,
}

impl Recommender {
    /// Pairs a catalog with its similarity matrix
    ///
    /// The matrix must have exactly one row per catalog entry; a mismatch
    /// means the two files are from different builds.
    pub fn new(
        catalog: Catalog,
        matrix: SimilarityMatrix,
        posters: TmdbClient,
    ) -> AppResult<Self> {
        if matrix.dimension() != catalog.len() {
            return Err(AppError::Data(format!(
                "catalog has {} entries but similarity matrix is {}x{}",
                catalog.len(),
                matrix.dimension(),
                matrix.dimension()
            )));
        }

        tracing::info!(entries = catalog.len(), "Recommender ready");
        Ok(Self {
            catalog,
            matrix,
            posters,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Ranks the rest of the catalog against `title` by descending
    /// similarity
    ///
    /// The selected title itself is excluded. The sort is stable and ties
    /// keep catalog order, so repeated calls return the same ranking.
    /// Returns fewer than `top_n` entries only when the catalog is small.
    pub fn rank(&self, title: &str, top_n: usize) -> AppResult<Vec<RankedTitle>> {
        let index = self
            .catalog
            .position_by_title(title)
            .ok_or_else(|| AppError::NotFound(format!("title not in catalog: {}", title)))?;

        let row = self
            .matrix
            .row(index)
            .ok_or_else(|| AppError::Data(format!("similarity row {} missing", index)))?;

        let mut scored: Vec<(usize, f32)> = row
            .iter()
            .copied()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));

        let ranked: Vec<RankedTitle> = scored
            .into_iter()
            .take(top_n)
            .filter_map(|(i, score)| {
                self.catalog.get(i).map(|movie| RankedTitle {
                    movie_id: movie.movie_id,
                    title: movie.title.clone(),
                    score,
                })
            })
            .collect();

        tracing::debug!(title = %title, results = ranked.len(), "Ranking computed");
        Ok(ranked)
    }

    /// Ranks and enriches each neighbor with poster art
    ///
    /// Poster lookups run one at a time and degrade to the placeholder on
    /// failure, so enrichment can never fail a recommendation.
    pub async fn recommend(&self, title: &str, top_n: usize) -> AppResult<Vec<Recommendation>> {
        let ranked = self.rank(title, top_n)?;

        let mut recommendations = Vec::with_capacity(ranked.len());
        for item in ranked {
            let poster_url = self.posters.poster_url(item.movie_id).await;
            recommendations.push(Recommendation {
                movie_id: item.movie_id,
                title: item.title,
                score: item.score,
                poster_url,
            });
        }

        tracing::info!(
            title = %title,
            results = recommendations.len(),
            "Recommendations ready"
        );
        Ok(recommendations)
    }
}
