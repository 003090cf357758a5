/// Errors reported by repository operations.
///
/// Every store failure lands in exactly one of two buckets: a read that
/// matched zero rows (`NotFound`), or anything else the store reported
/// (`Backend`), passed through unmodified. Nothing is retried or swallowed;
/// the only suppression anywhere is that the non-`*_or_fail` read operations
/// treat `NotFound` as a normal empty outcome.
#[derive(Debug)]
pub enum StoreError {
    NotFound(String),
    Backend(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Construct a `Backend` variant from any error type.
    ///
    /// Used by backend crates (e.g. `storekit-sqlx`) to wrap driver-specific
    /// errors.
    pub fn backend(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::Backend(Box::new(err))
    }

    /// Whether this is the zero-match classification, for per-call-site
    /// branching between "nothing there" and "something went wrong".
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound(_))
    }
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StoreError::NotFound(msg) => write!(f, "Not found: {msg}"),
            StoreError::Backend(err) => write!(f, "Store error: {err}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Backend(err) => Some(err.as_ref()),
            _ => None,
        }
    }
}
