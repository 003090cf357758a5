use storekit_core::StoreError;

/// Extension trait for converting `sqlx::Error` into `StoreError`.
///
/// Due to Rust's orphan rules, we can't implement `From<sqlx::Error> for
/// StoreError` in this crate. Instead, use `.into_store_error()`.
pub trait SqlxErrorExt {
    fn into_store_error(self) -> StoreError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_store_error(self) -> StoreError {
        match &self {
            sqlx::Error::RowNotFound => StoreError::NotFound("row not found".into()),
            _ => StoreError::backend(self),
        }
    }
}

/// Convenience alias for store results using `StoreError`.
pub type StoreResult<T> = Result<T, StoreError>;
