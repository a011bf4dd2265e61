//! # hub-db
//!
//! Storage layer implementing the hub-core repository traits.
//!
//! ## Overview
//!
//! Two interchangeable backends:
//!
//! - PostgreSQL via SQLx: connection pool, schema bootstrap, `FromRow`
//!   models, entity mappers and one repository per table
//! - [`MemoryStore`]: a single mutex-guarded in-process store implementing
//!   every trait, used for local runs and tests
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hub_db::pool::{create_pool, ensure_schema, DatabaseConfig};
//! use hub_db::repositories::PgReactionRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     ensure_schema(&pool).await?;
//!     let reactions = PgReactionRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::MemoryStore;
pub use pool::{create_pool, ensure_schema, DatabaseConfig, PgPool};
pub use repositories::{
    PgCommentRepository, PgEventRepository, PgFamilyNodeRepository, PgFamilyRepository,
    PgNewsRepository, PgReactionRepository,
};
