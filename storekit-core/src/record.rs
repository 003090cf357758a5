use crate::condition::Value;

/// Trait representing a storable record with a table name, id column, and column list.
///
/// This is the only capability a type needs to be usable with a
/// [`Repository`](crate::Repository); any type implementing it participates in
/// the same repository family without a common base type.
///
/// # Example
///
/// ```ignore
/// impl Record for User {
///     type Id = i64;
///     fn table_name() -> &'static str { "users" }
///     fn columns() -> &'static [&'static str] { &["id", "name", "email"] }
///     fn values(&self) -> Vec<Value> {
///         vec![self.id.into(), self.name.clone().into(), self.email.clone().into()]
///     }
///     fn id(&self) -> &i64 { &self.id }
/// }
/// ```
pub trait Record: Send + Sync + Unpin + 'static {
    type Id: Clone + Default + PartialEq + Into<Value> + Send + Sync + 'static;

    /// Name of the table this type's rows live in. Must be non-empty and
    /// deterministic for the type.
    fn table_name() -> &'static str;

    /// Column holding the primary key.
    fn id_column() -> &'static str {
        "id"
    }

    /// All columns of the table, including the id column.
    fn columns() -> &'static [&'static str];

    /// Current field values, one per entry of [`Record::columns`], same order.
    fn values(&self) -> Vec<Value>;

    fn id(&self) -> &Self::Id;

    /// Column marking a row as soft-deleted, if this type uses soft deletes.
    ///
    /// When `Some`, delete operations set this column to the current time
    /// instead of removing the row, and default reads skip marked rows.
    fn deleted_at_column() -> Option<&'static str> {
        None
    }

    /// Whether the identity carries a value. An identity equal to
    /// `Id::default()` counts as unset and is assigned by the store on insert.
    fn id_is_set(&self) -> bool {
        *self.id() != Self::Id::default()
    }
}
