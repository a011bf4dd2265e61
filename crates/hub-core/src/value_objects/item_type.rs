//! Item type tags - which table a reactable item lives in

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DomainError;

use super::EntityId;

/// Tag of a reactable item (`event`, `news`, `comment`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Event,
    News,
    Comment,
}

impl ItemType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::News => "news",
            Self::Comment => "comment",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "event" => Ok(Self::Event),
            "news" => Ok(Self::News),
            "comment" => Ok(Self::Comment),
            other => Err(DomainError::InvalidItemType(other.to_string())),
        }
    }
}

/// Items a comment thread can hang off (comments are not commentable)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentTarget {
    Event,
    News,
}

impl CommentTarget {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::News => "news",
        }
    }
}

impl fmt::Display for CommentTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<CommentTarget> for ItemType {
    fn from(target: CommentTarget) -> Self {
        match target {
            CommentTarget::Event => Self::Event,
            CommentTarget::News => Self::News,
        }
    }
}

impl TryFrom<ItemType> for CommentTarget {
    type Error = DomainError;

    fn try_from(item_type: ItemType) -> Result<Self, Self::Error> {
        match item_type {
            ItemType::Event => Ok(Self::Event),
            ItemType::News => Ok(Self::News),
            ItemType::Comment => Err(DomainError::InvalidItemType(
                "comments cannot be commented on".to_string(),
            )),
        }
    }
}

impl FromStr for CommentTarget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<ItemType>().and_then(Self::try_from)
    }
}

/// Address of one reactable item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemRef {
    pub item_id: EntityId,
    pub item_type: ItemType,
}

impl ItemRef {
    pub const fn new(item_id: EntityId, item_type: ItemType) -> Self {
        Self { item_id, item_type }
    }
}

impl fmt::Display for ItemRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.item_type, self.item_id)
    }
}
