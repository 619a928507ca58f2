//! Edit distance for approximate name matching.

/// Levenshtein distance over chars (unit cost insert/delete/substitute)
pub use strsim::levenshtein;
