//! Persistence for the database audit log.
//!
//! Log rows are written once and kept: `update` and `delete` are contract
//! no-ops that return the entity untouched.

use crate::entities::LogDb;
use crate::error::SqlxErrorExt;
use crate::listing::fetch_list_result;
use dal_core::{Entity, ListResult, Persistence, PersistenceError, QueryBuilder};
use sqlx::sqlite::SqlitePool;

// The view joins each log row with its acting user.
const LOG_FIELDS: &str =
    "LogDbId AS Id, Date, Action, TableId, \"Table\", \"Sql\", UserId, Email, Name, Active";
const LOG_VIEW: &str = "VwLogDb";
const LOG_TABLE: &str = "LogDb";

/// SQLite-backed persistence for [`LogDb`] rows.
#[derive(Clone)]
pub struct LogDbPersistence {
    pool: SqlitePool,
}

impl LogDbPersistence {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a persistence from an opaque connection descriptor.
    pub async fn connect(descriptor: &str) -> Result<Self, PersistenceError> {
        let pool = SqlitePool::connect(descriptor)
            .await
            .map_err(|e| e.into_persistence_error("error connecting to the database"))?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

impl Persistence<LogDb> for LogDbPersistence {
    async fn list(
        &self,
        filters: &str,
        orders: &str,
        limit: u64,
        offset: u64,
    ) -> Result<ListResult<LogDb>, PersistenceError> {
        let qb = QueryBuilder::new(LOG_FIELDS, LOG_VIEW)
            .filter_raw(filters)
            .order_raw(orders)
            .limit(limit)
            .offset(offset);
        fetch_list_result(&self.pool, &qb, "error querying the list of database logs").await
    }

    async fn read(&self, entity: &LogDb) -> Result<LogDb, PersistenceError> {
        if !entity.is_persisted() {
            return Err(PersistenceError::invalid_input("log identifier is required"));
        }
        let sql = format!("SELECT {LOG_FIELDS} FROM {LOG_VIEW} WHERE LogDbId = ?");
        let row = sqlx::query_as::<_, LogDb>(&sql)
            .bind(entity.id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| e.into_persistence_error("error querying the database log"))?;
        Ok(row.unwrap_or_default())
    }

    async fn insert(&self, entity: &LogDb) -> Result<LogDb, PersistenceError> {
        if !entity.user.is_persisted() {
            return Err(PersistenceError::invalid_input(
                "acting user identifier is required",
            ));
        }
        // The timestamp is assigned by the store, not the caller.
        let result = sqlx::query(
            "INSERT INTO LogDb (Date, Action, TableId, \"Table\", \"Sql\", UserId) \
             VALUES (datetime('now'), ?, ?, ?, ?, ?)",
        )
        .bind(&entity.action)
        .bind(entity.table_id)
        .bind(&entity.table)
        .bind(&entity.sql)
        .bind(entity.user.id)
        .execute(&self.pool)
        .await
        .map_err(|e| e.into_persistence_error("error inserting the database log"))?;

        let mut inserted = entity.clone();
        inserted.set_id(result.last_insert_rowid());
        Ok(inserted)
    }

    // Log rows are immutable; both operations return the entity untouched.

    async fn update(&self, entity: &LogDb) -> Result<LogDb, PersistenceError> {
        Ok(entity.clone())
    }

    async fn delete(&self, entity: &LogDb) -> Result<LogDb, PersistenceError> {
        Ok(entity.clone())
    }

    fn table_name(&self) -> &'static str {
        LOG_TABLE
    }
}
