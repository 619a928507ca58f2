pub mod keywords;
pub mod pool;
pub mod types;

pub use keywords::{extract_keywords, extract_subtypes, KEYWORD_VOCABULARY};
pub use pool::{load_pool, parse_pool};
pub use types::{canonical_name, Card, CardTypes, Color, Rarity};
