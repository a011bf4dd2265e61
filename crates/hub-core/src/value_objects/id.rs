//! Entity identifiers - random UUIDs rendered as strings on the wire

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier shared by every stored entity (families, nodes, items, ledger rows)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generate a fresh random identifier
    #[inline]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    #[inline]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    /// Get the inner UUID
    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Parse from string representation
    pub fn parse(s: &str) -> Result<Self, IdParseError> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| IdParseError::InvalidFormat(s.to_string()))
    }
}

/// Error when parsing an EntityId from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdParseError {
    #[error("invalid id format: {0}")]
    InvalidFormat(String),
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for EntityId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<EntityId> for Uuid {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl std::str::FromStr for EntityId {
    type Err = IdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityId::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_is_unique() {
        assert_ne!(EntityId::generate(), EntityId::generate());
    }

    #[test]
    fn test_parse_display() {
        let id = EntityId::generate();
        let parsed: EntityId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(matches!(
            EntityId::parse("not-a-uuid"),
            Err(IdParseError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_serializes_as_string() {
        let id = EntityId::generate();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{id}\""));
    }
}
