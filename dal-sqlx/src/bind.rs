//! Binds a collected `SqlValue` list onto any sqlx query type.

/// Expands to a loop binding each value in order; works for `sqlx::query`,
/// `sqlx::query_as` and `sqlx::query_scalar` alike.
macro_rules! bind_args {
    ($query:expr, $args:expr) => {{
        let mut q = $query;
        for arg in $args {
            q = match arg {
                dal_core::SqlValue::Int(v) => q.bind(*v),
                dal_core::SqlValue::Text(s) => q.bind(s.clone()),
                dal_core::SqlValue::Bool(b) => q.bind(*b),
            };
        }
        q
    }};
}

pub(crate) use bind_args;
