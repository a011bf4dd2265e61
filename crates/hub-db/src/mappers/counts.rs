//! Reaction counter columns <-> aggregate

use hub_core::entities::ReactionCounts;

use crate::models::ReactionCountsModel;

fn column_to_count(value: i32) -> u32 {
    // CHECK (>= 0) holds on every table; clamp anyway
    u32::try_from(value).unwrap_or(0)
}

fn count_to_column(value: u32) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

impl From<ReactionCountsModel> for ReactionCounts {
    fn from(model: ReactionCountsModel) -> Self {
        ReactionCounts {
            like: column_to_count(model.like_count),
            smile: column_to_count(model.smile_count),
            heart: column_to_count(model.heart_count),
            celebrate: column_to_count(model.celebrate_count),
        }
    }
}

impl From<ReactionCounts> for ReactionCountsModel {
    fn from(counts: ReactionCounts) -> Self {
        ReactionCountsModel {
            like_count: count_to_column(counts.like),
            smile_count: count_to_column(counts.smile),
            heart_count: count_to_column(counts.heart),
            celebrate_count: count_to_column(counts.celebrate),
        }
    }
}
