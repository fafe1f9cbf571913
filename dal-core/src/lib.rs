pub mod entity;
pub mod error;
pub mod list_result;
pub mod persistence;
pub mod query;

pub use entity::Entity;
pub use error::PersistenceError;
pub use list_result::ListResult;
pub use persistence::Persistence;
pub use query::{Dialect, QueryBuilder, SqlValue};

pub mod prelude {
    //! Re-exports of the most commonly used data types.
    pub use crate::{Entity, ListResult, Persistence, PersistenceError, QueryBuilder, SqlValue};
}
