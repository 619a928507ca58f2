pub mod formatter;

pub use formatter::{
    format_card_detail, format_mana_cost, format_not_found, format_rated_table, format_rating,
    format_resolution, format_stats, format_tsv, should_use_colors,
};
