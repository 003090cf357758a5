use crate::condition::Condition;
use crate::error::StoreError;
use crate::record::Record;
use std::future::Future;

/// Generic repository contract for CRUD operations over one record type.
///
/// A repository binds one [`Record`] type to one store handle at construction
/// and holds no other state; every operation performs a single logical store
/// interaction and reports its outcome synchronously to the caller. Instances
/// are safe to share across tasks when the underlying handle is.
///
/// Uses RPITIT (return-position `impl Trait` in traits) — no `async-trait`
/// needed.
///
/// The read operations come in pairs: `first`/`find` treat zero matches as a
/// normal outcome, `first_or_fail`/`find_or_fail` surface it as
/// [`StoreError::NotFound`]. Any other store error is always returned as-is.
pub trait Repository<T: Record>: Send + Sync {
    /// The underlying store handle type, exposed by [`Repository::handle`].
    type Handle;

    /// Fill `record` with the first match ordered by primary key.
    ///
    /// Zero matches is not an error; `record` is left in its prior state.
    fn first(
        &self,
        record: &mut T,
        conds: &[Condition],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Fill `record` with the first match ordered by primary key, or return
    /// [`StoreError::NotFound`] when nothing matched.
    fn first_or_fail(
        &self,
        record: &mut T,
        conds: &[Condition],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Fill `records` with all matches. Zero matches leaves it empty.
    fn find(
        &self,
        records: &mut Vec<T>,
        conds: &[Condition],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Fill `records` with all matches, or return [`StoreError::NotFound`]
    /// when nothing matched.
    fn find_or_fail(
        &self,
        records: &mut Vec<T>,
        conds: &[Condition],
    ) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Insert `record`, filling any store-assigned identity fields in place so
    /// the caller observes the final row through the value it passed in.
    fn create(&self, record: &mut T) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Insert all `records` in one bulk write, returning the affected count.
    fn batch_create(&self, records: &[T]) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Write `record` to the row matching its identity.
    ///
    /// When no row matches the identity the record is **inserted** instead of
    /// the call being rejected. This also means retrying an update whose
    /// identity never matches inserts a new row each time — callers wanting
    /// strict update semantics must check existence first.
    fn update(&self, record: &T) -> impl Future<Output = Result<(), StoreError>> + Send;

    /// Delete the row matching `record`'s identity, returning the affected
    /// count.
    ///
    /// For types with a [`Record::deleted_at_column`] marker the row is kept
    /// and the marker set to the current time; otherwise the row is removed.
    fn delete(&self, record: &T) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Escape hatch: the raw store handle, for queries this contract does not
    /// cover. Anything done through it bypasses the semantics above.
    fn handle(&self) -> &Self::Handle;
}
