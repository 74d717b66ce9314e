use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// A single catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Movie {
    /// Identifier on the external metadata service (used for poster lookups)
    pub movie_id: u64,
    pub title: String,
}

/// Ordered movie catalog, loaded once and immutable afterwards
///
/// Similarity matrix rows and columns refer to positions in this catalog,
/// so iteration order is load order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    /// Position of the first entry whose title matches exactly
    pub fn position_by_title(&self, title: &str) -> Option<usize> {
        self.movies.iter().position(|m| m.title == title)
    }

    pub fn get(&self, index: usize) -> Option<&Movie> {
        self.movies.get(index)
    }

    /// Display titles in catalog order, for selection lists
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.movies.iter().map(|m| m.title.as_str())
    }
}

/// Precomputed pairwise similarity scores aligned to catalog order
///
/// Entry (i, j) is the symmetric similarity between items i and j; the
/// diagonal is each item's self-match and is never part of ranked output.
#[derive(Debug, Clone, PartialEq)]
pub struct SimilarityMatrix {
    rows: Vec<Vec<f32>>,
}

impl SimilarityMatrix {
    /// Builds a matrix from raw rows, rejecting non-square input
    pub fn from_rows(rows: Vec<Vec<f32>>) -> AppResult<Self> {
        let dim = rows.len();
        if let Some((index, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != dim) {
            return Err(AppError::Data(format!(
                "similarity matrix is not square: row {} has {} entries, expected {}",
                index,
                row.len(),
                dim
            )));
        }
        Ok(Self { rows })
    }

    pub fn dimension(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&[f32]> {
        self.rows.get(index).map(|row| row.as_slice())
    }
}

/// One neighbor from a similarity ranking
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct RankedTitle {
    pub movie_id: u64,
    pub title: String,
    pub score: f32,
}

/// A ranked neighbor enriched with poster art
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Recommendation {
    pub movie_id: u64,
    pub title: String,
    pub score: f32,
    pub poster_url: String,
}
