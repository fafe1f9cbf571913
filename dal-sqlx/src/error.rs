use dal_core::PersistenceError;

/// Extension trait for wrapping `sqlx::Error` into [`PersistenceError`].
///
/// Due to Rust's orphan rules, `From<sqlx::Error> for PersistenceError`
/// can't be implemented in this crate; call sites attach the description of
/// the attempted operation instead:
/// `.map_err(|e| e.into_persistence_error("error querying the user"))`.
pub trait SqlxErrorExt {
    fn into_persistence_error(self, context: &str) -> PersistenceError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_persistence_error(self, context: &str) -> PersistenceError {
        PersistenceError::execution(context, self)
    }
}

/// Convenience alias for persistence results.
pub type PersistenceResult<T> = Result<T, PersistenceError>;
