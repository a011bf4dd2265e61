//! Reaction kinds - the closed vocabulary of reactions a viewer can pick

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

/// Reaction kind (wire names: `like`, `smile`, `heart`, `celebrate`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReactionKind {
    Like,
    Smile,
    Heart,
    Celebrate,
}

impl ReactionKind {
    /// Every kind, in display order
    pub const ALL: [ReactionKind; 4] = [Self::Like, Self::Smile, Self::Heart, Self::Celebrate];

    /// Wire name of this kind
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Like => "like",
            Self::Smile => "smile",
            Self::Heart => "heart",
            Self::Celebrate => "celebrate",
        }
    }
}

impl fmt::Display for ReactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReactionKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "smile" => Ok(Self::Smile),
            "heart" => Ok(Self::Heart),
            "celebrate" => Ok(Self::Celebrate),
            other => Err(DomainError::InvalidReactionKind(other.to_string())),
        }
    }
}
