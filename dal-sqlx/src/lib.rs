//! # dal-sqlx — SQLx/SQLite backend for the data access layer
//!
//! This crate provides the [SQLx](https://github.com/launchbadge/sqlx)-specific
//! half of the data access layer. It depends on [`dal_core`] for the abstract
//! contract and query construction, and adds the concrete entities, the
//! concrete persistences, and the error bridging needed to talk to a real
//! database.
//!
//! # What's in this crate
//!
//! | Type | Description |
//! |------|-------------|
//! | [`User`], [`Role`], [`LogDb`] | Row-mapped entities |
//! | [`UserPersistence`] | Full CRUD for users plus credential lookups and role relation management |
//! | [`LogDbPersistence`] | Append-oriented persistence for the database audit log |
//! | [`SqlxErrorExt`] | Extension trait wrapping `sqlx::Error` into `PersistenceError` |
//! | [`PersistenceResult<T>`] | Type alias for `Result<T, PersistenceError>` |
//!
//! # Quick start
//!
//! ```ignore
//! use dal_core::Persistence;
//! use dal_sqlx::{User, UserPersistence};
//!
//! let persistence = UserPersistence::connect("sqlite://app.db").await?;
//! let page = persistence.list("Active = 1", "UserId ASC", 20, 0).await?;
//! let user = persistence.read(&User::with_id(1)).await?;
//! if user.id == 0 {
//!     // no such row — not an error
//! }
//! ```
//!
//! # Error bridging
//!
//! Orphan rules keep `From<sqlx::Error> for PersistenceError` out of reach
//! here, so every call site attaches its operation description explicitly
//! through [`SqlxErrorExt`]:
//!
//! ```ignore
//! use dal_sqlx::SqlxErrorExt;
//!
//! let row = sqlx::query_as("SELECT ...")
//!     .fetch_optional(&pool)
//!     .await
//!     .map_err(|e| e.into_persistence_error("error querying the user"))?;
//! ```
//!
//! Each operation checks a connection out of the pool only for the statements
//! it runs; nothing is retried, nothing is logged, and no transaction spans
//! more than one operation.

mod bind;
mod listing;

pub mod entities;
pub mod error;
pub mod log_db;
pub mod user;

pub use entities::{LogDb, Role, User};
pub use error::{PersistenceResult, SqlxErrorExt};
pub use log_db::LogDbPersistence;
pub use user::{UserPersistence, UserPersistenceExt};

/// Re-exports of the most commonly used types from `dal-core` and this crate.
pub mod prelude {
    pub use crate::{LogDb, LogDbPersistence, PersistenceResult, Role, SqlxErrorExt, User, UserPersistence, UserPersistenceExt};
    pub use dal_core::prelude::*;
}
