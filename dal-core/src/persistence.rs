use crate::entity::Entity;
use crate::error::PersistenceError;
use crate::list_result::ListResult;
use std::future::Future;

/// The operation set every concrete persistence fulfils.
///
/// Uses RPITIT (return-position `impl Trait` in traits) — no `async-trait`
/// needed.
///
/// Mutating operations return the affected entity, and the generated or
/// targeted identifier travels on that return value. A persistence instance
/// therefore carries no per-call mutable state and may be shared across
/// concurrent callers. An external audit collaborator needs only
/// [`table_name`](Persistence::table_name) and the identifier of the
/// returned entity to record "what table, what row" after a mutating call.
pub trait Persistence<T: Entity>: Send + Sync {
    /// List entities matching caller-supplied filter/order clause bodies.
    ///
    /// `filters` and `orders` are raw SQL clause bodies (e.g. `"Active = 1"`,
    /// `"UserId ASC"`); either may be empty. `limit == 0` disables
    /// pagination and returns all matching rows. Executes the list query,
    /// then the parallel count query.
    fn list(
        &self,
        filters: &str,
        orders: &str,
        limit: u64,
        offset: u64,
    ) -> impl Future<Output = Result<ListResult<T>, PersistenceError>> + Send;

    /// Load an entity by its identifier.
    ///
    /// Matching no row is a normal result: the zero-value entity comes back
    /// and the caller checks `id()`. Fails only on an absent identifier or
    /// an execution failure.
    fn read(&self, entity: &T) -> impl Future<Output = Result<T, PersistenceError>> + Send;

    /// Persist a new row; the returned entity carries the generated
    /// identifier.
    fn insert(&self, entity: &T) -> impl Future<Output = Result<T, PersistenceError>> + Send;

    /// Persist changes keyed by identifier; returns the entity unchanged.
    fn update(&self, entity: &T) -> impl Future<Output = Result<T, PersistenceError>> + Send;

    /// Remove the row keyed by identifier; returns the entity.
    fn delete(&self, entity: &T) -> impl Future<Output = Result<T, PersistenceError>> + Send;

    /// Fixed logical name of the entity's backing table, used by external
    /// audit-logging collaborators.
    fn table_name(&self) -> &'static str;
}
