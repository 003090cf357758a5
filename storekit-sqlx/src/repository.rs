use crate::dialect::SqlxDialect;
use crate::error::SqlxErrorExt;
use crate::statement;
use sqlx::{Database, Encode, Executor, FromRow, IntoArguments, Pool, Type};
use std::marker::PhantomData;
use storekit_core::{Condition, Record, Repository, StoreError, Value};
use tracing::debug;

/// A generic SQL-based repository implementation.
///
/// Binds one [`Record`] type to an `sqlx::Pool<DB>` for its whole lifetime;
/// the pool is the only state it holds, so instances are cheap to clone and
/// safe to share across tasks.
///
/// # Example
///
/// ```ignore
/// let users = SqlxRepository::<User, Sqlite>::new(pool.clone());
///
/// let mut user = User::default();
/// users.first(&mut user, &[Condition::eq("email", "a@b.com")]).await?;
/// ```
pub struct SqlxRepository<T, DB: Database> {
    pool: Pool<DB>,
    _marker: PhantomData<T>,
}

impl<T, DB: Database> SqlxRepository<T, DB> {
    pub fn new(pool: Pool<DB>) -> Self {
        Self {
            pool,
            _marker: PhantomData,
        }
    }

    /// Get the underlying pool reference.
    pub fn pool(&self) -> &Pool<DB> {
        &self.pool
    }
}

impl<T, DB: Database> Clone for SqlxRepository<T, DB> {
    fn clone(&self) -> Self {
        Self {
            pool: self.pool.clone(),
            _marker: PhantomData,
        }
    }
}

macro_rules! bind_params {
    ($query:expr, $params:expr) => {{
        let mut q = $query;
        for value in $params {
            q = match value {
                Value::Null => q.bind(None::<String>),
                Value::Bool(v) => q.bind(v),
                Value::Int(v) => q.bind(v),
                Value::Float(v) => q.bind(v),
                Value::Text(v) => q.bind(v),
                Value::Bytes(v) => q.bind(v),
            };
        }
        q
    }};
}

impl<T, DB> Repository<T> for SqlxRepository<T, DB>
where
    T: Record + for<'r> FromRow<'r, DB::Row>,
    DB: SqlxDialect,
    for<'c> &'c mut DB::Connection: Executor<'c, Database = DB>,
    for<'q> DB::Arguments<'q>: IntoArguments<'q, DB>,
    for<'q> bool: Encode<'q, DB> + Type<DB>,
    for<'q> i64: Encode<'q, DB> + Type<DB>,
    for<'q> f64: Encode<'q, DB> + Type<DB>,
    for<'q> String: Encode<'q, DB> + Type<DB>,
    for<'q> Vec<u8>: Encode<'q, DB> + Type<DB>,
    for<'q> Option<String>: Encode<'q, DB> + Type<DB>,
{
    type Handle = Pool<DB>;

    async fn first(&self, record: &mut T, conds: &[Condition]) -> Result<(), StoreError> {
        let stmt = statement::select::<T>(DB::DIALECT, conds, true);
        let row = bind_params!(sqlx::query_as::<DB, T>(&stmt.sql), stmt.params)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| e.into_store_error())?;
        if let Some(found) = row {
            *record = found;
        }
        Ok(())
    }

    async fn first_or_fail(&self, record: &mut T, conds: &[Condition]) -> Result<(), StoreError> {
        let stmt = statement::select::<T>(DB::DIALECT, conds, true);
        let row = bind_params!(sqlx::query_as::<DB, T>(&stmt.sql), stmt.params)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| e.into_store_error())?;
        match row {
            Some(found) => {
                *record = found;
                Ok(())
            }
            None => Err(StoreError::NotFound(format!(
                "no matching row in {}",
                T::table_name()
            ))),
        }
    }

    async fn find(&self, records: &mut Vec<T>, conds: &[Condition]) -> Result<(), StoreError> {
        let stmt = statement::select::<T>(DB::DIALECT, conds, false);
        let rows = bind_params!(sqlx::query_as::<DB, T>(&stmt.sql), stmt.params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.into_store_error())?;
        *records = rows;
        Ok(())
    }

    async fn find_or_fail(&self, records: &mut Vec<T>, conds: &[Condition]) -> Result<(), StoreError> {
        let stmt = statement::select::<T>(DB::DIALECT, conds, false);
        let rows = bind_params!(sqlx::query_as::<DB, T>(&stmt.sql), stmt.params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| e.into_store_error())?;
        if rows.is_empty() {
            return Err(StoreError::NotFound(format!(
                "no matching rows in {}",
                T::table_name()
            )));
        }
        *records = rows;
        Ok(())
    }

    async fn create(&self, record: &mut T) -> Result<(), StoreError> {
        debug!(table = T::table_name(), "insert");
        let stmt = statement::insert(DB::DIALECT, record, true);
        let created = bind_params!(sqlx::query_as::<DB, T>(&stmt.sql), stmt.params)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| e.into_store_error())?;
        *record = created;
        Ok(())
    }

    async fn batch_create(&self, records: &[T]) -> Result<u64, StoreError> {
        if records.is_empty() {
            return Ok(0);
        }
        debug!(table = T::table_name(), count = records.len(), "batch insert");
        let stmt = statement::insert_batch(DB::DIALECT, records);
        let result = bind_params!(sqlx::query::<DB>(&stmt.sql), stmt.params)
            .execute(&self.pool)
            .await
            .map_err(|e| e.into_store_error())?;
        Ok(DB::rows_affected(&result))
    }

    async fn update(&self, record: &T) -> Result<(), StoreError> {
        debug!(table = T::table_name(), "save");
        if record.id_is_set() {
            let stmt = statement::update(DB::DIALECT, record);
            let result = bind_params!(sqlx::query::<DB>(&stmt.sql), stmt.params)
                .execute(&self.pool)
                .await
                .map_err(|e| e.into_store_error())?;
            if DB::rows_affected(&result) > 0 {
                return Ok(());
            }
        }
        // No row matched the identity: insert instead.
        let stmt = statement::insert(DB::DIALECT, record, false);
        bind_params!(sqlx::query::<DB>(&stmt.sql), stmt.params)
            .execute(&self.pool)
            .await
            .map_err(|e| e.into_store_error())?;
        Ok(())
    }

    async fn delete(&self, record: &T) -> Result<u64, StoreError> {
        if !record.id_is_set() {
            // A delete with no key would touch the whole table.
            return Err(StoreError::Backend(
                "delete requires a record with its identity set".into(),
            ));
        }
        debug!(
            table = T::table_name(),
            soft = T::deleted_at_column().is_some(),
            "delete"
        );
        let stmt = statement::delete(DB::DIALECT, record);
        let result = bind_params!(sqlx::query::<DB>(&stmt.sql), stmt.params)
            .execute(&self.pool)
            .await
            .map_err(|e| e.into_store_error())?;
        Ok(DB::rows_affected(&result))
    }

    fn handle(&self) -> &Pool<DB> {
        &self.pool
    }
}
