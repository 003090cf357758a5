//! # storekit-sqlx — SQLx backend for storekit
//!
//! This crate provides the [SQLx](https://github.com/launchbadge/sqlx)-specific
//! implementation of storekit's data access contract. It depends on
//! [`storekit_core`] for the abstract traits and types, and adds the generic
//! repository, per-driver dialect bridging, and error conversion needed to
//! talk to a real database.
//!
//! # What's in this crate
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SqlxRepository`] | Generic repository holding an `sqlx::Pool<DB>`, one instance per record type |
//! | [`SqlxDialect`] | Trait covering the driver differences the repository needs (placeholders, affected rows) |
//! | [`SqlxErrorExt`] | Extension trait to convert `sqlx::Error` → `StoreError` (`.into_store_error()`) |
//! | [`StoreResult<T>`] | Type alias for `Result<T, StoreError>` |
//!
//! # Feature flags
//!
//! Enable exactly one database driver:
//!
//! | Feature    | Driver |
//! |------------|--------|
//! | `sqlite`   | SQLite via `sqlx/sqlite` |
//! | `postgres` | PostgreSQL via `sqlx/postgres` |
//!
//! # Quick start
//!
//! ```toml
//! [dependencies]
//! storekit-sqlx = { version = "0.1", features = ["sqlite"] }
//! ```
//!
//! ```ignore
//! use storekit_sqlx::prelude::*;
//! use sqlx::Sqlite;
//!
//! let repo = SqlxRepository::<User, Sqlite>::new(pool.clone());
//!
//! let mut user = User::default();
//! repo.first_or_fail(&mut user, &[Condition::eq("email", "a@b.com")])
//!     .await?;
//!
//! user.name = "Alice".into();
//! repo.update(&user).await?;
//! ```
//!
//! # Update is an upsert
//!
//! `update` writes the row matching the record's identity — and **inserts**
//! the record when no row matches. Callers expecting strict update semantics
//! must check existence first; see [`storekit_core::Repository::update`].
//!
//! # Error bridging
//!
//! Due to Rust's orphan rules, `From<sqlx::Error> for StoreError` can't be
//! implemented here. Use the [`SqlxErrorExt`] trait instead:
//!
//! ```ignore
//! use storekit_sqlx::SqlxErrorExt;
//!
//! let user = sqlx::query_as("SELECT ...")
//!     .fetch_one(&pool)
//!     .await
//!     .map_err(|e| e.into_store_error())?;
//! ```

pub mod dialect;
pub mod error;
pub mod repository;
mod statement;

pub use dialect::{Dialect, SqlxDialect};
pub use error::{SqlxErrorExt, StoreResult};
pub use repository::SqlxRepository;

/// Re-exports of the most commonly used types from both `storekit-core` and
/// this crate.
pub mod prelude {
    pub use crate::{SqlxDialect, SqlxErrorExt, SqlxRepository};
    pub use storekit_core::prelude::*;
}
