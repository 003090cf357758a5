//! storekit — a generic repository layer over SQLx.
//!
//! This facade crate re-exports the storekit sub-crates through a single
//! dependency with feature flags. Import everything you need with:
//!
//! ```ignore
//! use storekit::prelude::*;
//! ```
//!
//! # Feature flags
//!
//! | Feature        | Default | Crate / effect                      |
//! |----------------|---------|-------------------------------------|
//! | `sqlx-backend` | yes     | `storekit-sqlx`                     |
//! | `sqlite`       | no      | `storekit-sqlx` with `sqlx/sqlite`  |
//! | `postgres`     | no      | `storekit-sqlx` with `sqlx/postgres`|
//!
//! The core abstractions (`storekit-core`) are always available.

pub use storekit_core;

#[cfg(feature = "sqlx-backend")]
pub use storekit_sqlx;

pub mod prelude {
    //! Re-exports of the most commonly used types across the sub-crates.
    pub use storekit_core::prelude::*;

    #[cfg(feature = "sqlx-backend")]
    pub use storekit_sqlx::{SqlxDialect, SqlxErrorExt, SqlxRepository};
}
