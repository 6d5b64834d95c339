#![deny(unsafe_code)]

pub mod engine;
pub mod matcher;
pub mod score;
pub mod service;
pub mod slot;

pub use crate::engine::SuggestionEngine;
pub use crate::matcher::{KeywordMatch, keyword_matches};
pub use crate::score::{
    EMBEDDING_DIM, ScoreBreakdown, ScoreCache, Scorer, cosine_similarity, lexical_similarity,
    local_embedding,
};
pub use crate::service::{EmbeddingSource, SuggestionService};
pub use crate::slot::{SearchSlot, SearchTicket};
