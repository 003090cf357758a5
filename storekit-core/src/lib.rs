pub mod condition;
pub mod error;
pub mod record;
pub mod repository;

pub use condition::{Condition, Value};
pub use error::StoreError;
pub use record::Record;
pub use repository::Repository;

pub mod prelude {
    //! Re-exports of the most commonly used core types.
    pub use crate::{Condition, Record, Repository, StoreError, Value};
}
