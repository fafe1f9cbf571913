use crate::bind::bind_args;
use crate::error::SqlxErrorExt;
use dal_core::{ListResult, PersistenceError, QueryBuilder};
use sqlx::sqlite::{SqlitePool, SqliteRow};
use sqlx::FromRow;

/// Run the two statements of a listing operation: the bounded page, then
/// the unbounded count. Both failures wrap into the same operation context.
pub(crate) async fn fetch_list_result<T>(
    pool: &SqlitePool,
    qb: &QueryBuilder,
    context: &str,
) -> Result<ListResult<T>, PersistenceError>
where
    T: for<'r> FromRow<'r, SqliteRow> + Send + Unpin,
{
    let (sql, args) = qb.build_select();
    let list = bind_args!(sqlx::query_as::<_, T>(&sql), &args)
        .fetch_all(pool)
        .await
        .map_err(|e| e.into_persistence_error(context))?;

    let (count_sql, count_args) = qb.build_count();
    let total = bind_args!(sqlx::query_scalar::<_, i64>(&count_sql), &count_args)
        .fetch_one(pool)
        .await
        .map_err(|e| e.into_persistence_error(context))?;

    Ok(ListResult::new(list, total as u64))
}
