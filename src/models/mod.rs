pub mod catalog;
pub mod story;

pub use catalog::{Catalog, Movie, RankedTitle, Recommendation, SimilarityMatrix};
pub use story::{BackendKind, Continuation, GenerationOptions, GenerationRequest};
