//! Entity to model mappers
//!
//! Conversions between domain entities (hub-core) and database models.
//! - `From`/`TryFrom<Model> for Entity`: convert database rows to domain objects
//! - `*Row` structs: prepare entity data for database writes

mod comment;
mod counts;
mod event;
mod family;
mod reaction;

pub use family::FamilyNodeRow;
