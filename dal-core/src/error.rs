/// The single error kind raised at the boundary of the persistence layer.
///
/// Every data-access failure is wrapped with a fixed, human-readable
/// description of the attempted operation; the underlying cause is chained,
/// not discarded. "Not found" is never an error: lookups that match no row
/// return a zero-value entity instead.
#[derive(Debug)]
pub enum PersistenceError {
    /// The caller supplied input that cannot be executed, e.g. an entity
    /// missing the identifier the operation keys on. Raised before any
    /// statement runs.
    InvalidInput(String),
    /// A statement failed against the store: connectivity, malformed dynamic
    /// fragments, constraint violations. No finer-grained classification is
    /// exposed.
    Execution {
        context: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl PersistenceError {
    /// Construct an `Execution` variant from any error type.
    ///
    /// Used by backend crates (e.g. `dal-sqlx`) to wrap driver-specific
    /// errors together with a description of the attempted operation.
    pub fn execution(
        context: impl Into<String>,
        err: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        PersistenceError::Execution {
            context: context.into(),
            source: Box::new(err),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        PersistenceError::InvalidInput(msg.into())
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PersistenceError::InvalidInput(msg) => write!(f, "Invalid input: {msg}"),
            PersistenceError::Execution { context, source } => write!(f, "{context}: {source}"),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Execution { source, .. } => Some(source.as_ref()),
            PersistenceError::InvalidInput(_) => None,
        }
    }
}
