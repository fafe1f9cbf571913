//! Query construction for listing operations.
//!
//! A builder is configured with a fixed field projection and a source (table
//! or view) before any dynamic fragment is appended. Data values are always
//! collected into a bind list, never concatenated into the statement text;
//! caller-supplied filter/order fragments are structural SQL (clause bodies)
//! and pass through the sanitization policy before concatenation.

/// A value bound into a statement in place of a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    Text(String),
    Bool(bool),
}

impl From<i64> for SqlValue {
    fn from(v: i64) -> Self {
        SqlValue::Int(v)
    }
}

impl From<&str> for SqlValue {
    fn from(v: &str) -> Self {
        SqlValue::Text(v.to_string())
    }
}

impl From<String> for SqlValue {
    fn from(v: String) -> Self {
        SqlValue::Text(v)
    }
}

impl From<bool> for SqlValue {
    fn from(v: bool) -> Self {
        SqlValue::Bool(v)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Dialect {
    /// Generic SQL using `?` placeholders (default).
    Generic,
    /// SQLite-style `?` placeholders.
    Sqlite,
    /// MySQL-style `?` placeholders.
    MySql,
    /// Postgres-style `$1, $2, ...` placeholders.
    Postgres,
}

impl Dialect {
    fn placeholder(self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${index}"),
            Dialect::Generic | Dialect::Sqlite | Dialect::MySql => "?".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
enum Condition {
    Eq(String, SqlValue),
    NotEq(String, SqlValue),
    Like(String, SqlValue),
    Gt(String, SqlValue),
    Lt(String, SqlValue),
    In(String, Vec<SqlValue>),
    IsNull(String),
    IsNotNull(String),
    /// `<column> NOT IN (SELECT <select_column> FROM <from> WHERE <where_column> = ?)`
    NotInSelect {
        column: String,
        select_column: String,
        from: String,
        where_column: String,
        value: SqlValue,
    },
    /// Caller-supplied clause body, sanitized when the statement is built.
    Raw(String),
}

#[derive(Debug, Clone)]
enum OrderClause {
    Column(String, bool),
    Raw(String),
}

/// A fluent builder producing the two statements of a listing operation:
/// the bounded result page and the unbounded total count.
///
/// The projection and source are fixed at construction; conditions join with
/// `AND` in insertion order. A `limit` of `0` means "no pagination". When a
/// non-zero limit is set and no ordering was supplied, the statement falls
/// back to `ORDER BY 1 ASC` so pages stay deterministic.
///
/// # Example
///
/// ```ignore
/// let qb = QueryBuilder::new("RoleId, Name", "VwUserRole")
///     .where_eq("UserId", 7i64)
///     .filter_raw("Name LIKE 'Admin%'")
///     .order_raw("RoleId ASC")
///     .limit(10)
///     .offset(20);
/// let (sql, args) = qb.build_select();
/// let (count_sql, count_args) = qb.build_count();
/// ```
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    fields: String,
    source: String,
    conditions: Vec<Condition>,
    order: Vec<OrderClause>,
    limit_val: u64,
    offset_val: u64,
    dialect: Dialect,
}

impl QueryBuilder {
    pub fn new(fields: &str, source: &str) -> Self {
        Self {
            fields: fields.to_string(),
            source: source.to_string(),
            conditions: Vec::new(),
            order: Vec::new(),
            limit_val: 0,
            offset_val: 0,
            dialect: Dialect::Generic,
        }
    }

    /// Set the SQL dialect (affects placeholder style).
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = dialect;
        self
    }

    pub fn where_eq(mut self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.conditions
            .push(Condition::Eq(column.to_string(), value.into()));
        self
    }

    pub fn where_not_eq(mut self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.conditions
            .push(Condition::NotEq(column.to_string(), value.into()));
        self
    }

    pub fn where_like(mut self, column: &str, pattern: impl Into<SqlValue>) -> Self {
        self.conditions
            .push(Condition::Like(column.to_string(), pattern.into()));
        self
    }

    pub fn where_gt(mut self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.conditions
            .push(Condition::Gt(column.to_string(), value.into()));
        self
    }

    pub fn where_lt(mut self, column: &str, value: impl Into<SqlValue>) -> Self {
        self.conditions
            .push(Condition::Lt(column.to_string(), value.into()));
        self
    }

    pub fn where_in(mut self, column: &str, values: Vec<SqlValue>) -> Self {
        self.conditions
            .push(Condition::In(column.to_string(), values));
        self
    }

    pub fn where_null(mut self, column: &str) -> Self {
        self.conditions.push(Condition::IsNull(column.to_string()));
        self
    }

    pub fn where_not_null(mut self, column: &str) -> Self {
        self.conditions
            .push(Condition::IsNotNull(column.to_string()));
        self
    }

    /// Exclude rows whose `column` appears in a single-column subquery,
    /// e.g. roles already assigned to one user:
    /// `RoleId NOT IN (SELECT RoleId FROM UserRole WHERE UserId = ?)`.
    pub fn where_not_in_select(
        mut self,
        column: &str,
        select_column: &str,
        from: &str,
        where_column: &str,
        value: impl Into<SqlValue>,
    ) -> Self {
        self.conditions.push(Condition::NotInSelect {
            column: column.to_string(),
            select_column: select_column.to_string(),
            from: from.to_string(),
            where_column: where_column.to_string(),
            value: value.into(),
        });
        self
    }

    /// Append a caller-supplied filter clause body (e.g. `"Active = 1"`).
    ///
    /// The fragment is structural SQL and cannot be parameterized, so it is
    /// sanitized before concatenation. Empty fragments are ignored. Unknown
    /// columns or malformed syntax are not validated here; they surface as
    /// an execution failure. Data values must still go through the typed
    /// `where_*` methods — this is a compatibility path for callers that
    /// hand over raw clause bodies.
    pub fn filter_raw(mut self, fragment: &str) -> Self {
        if !fragment.is_empty() {
            self.conditions.push(Condition::Raw(fragment.to_string()));
        }
        self
    }

    pub fn order_by(mut self, column: &str, ascending: bool) -> Self {
        self.order
            .push(OrderClause::Column(column.to_string(), ascending));
        self
    }

    /// Append a caller-supplied order clause body (e.g. `"UserId ASC"`).
    /// Sanitized like [`filter_raw`](QueryBuilder::filter_raw); empty
    /// fragments are ignored.
    pub fn order_raw(mut self, fragment: &str) -> Self {
        if !fragment.is_empty() {
            self.order.push(OrderClause::Raw(fragment.to_string()));
        }
        self
    }

    /// Maximum rows for the page; `0` disables pagination entirely.
    pub fn limit(mut self, limit: u64) -> Self {
        self.limit_val = limit;
        self
    }

    /// First row of the page; ignored while `limit` is `0`.
    pub fn offset(mut self, offset: u64) -> Self {
        self.offset_val = offset;
        self
    }

    /// Build the SELECT statement for the result page, returning
    /// `(sql, bind_values)`.
    pub fn build_select(&self) -> (String, Vec<SqlValue>) {
        let mut sql = format!("SELECT {} FROM {}", self.fields, self.source);
        let mut params = Vec::new();
        let mut placeholder_idx = 1usize;
        self.append_where(&mut sql, &mut params, &mut placeholder_idx);
        let ordered = self.append_order(&mut sql);
        if self.limit_val != 0 {
            if !ordered {
                // Pagination needs a deterministic order; fall back to the
                // first projected column.
                sql.push_str(" ORDER BY 1 ASC");
            }
            sql.push_str(&format!(" LIMIT {} OFFSET {}", self.limit_val, self.offset_val));
        }
        (sql, params)
    }

    /// Build the COUNT statement for the unbounded total, returning
    /// `(sql, bind_values)`. Order clauses are irrelevant to a count and
    /// are ignored.
    pub fn build_count(&self) -> (String, Vec<SqlValue>) {
        let mut sql = format!("SELECT COUNT(1) FROM {}", self.source);
        let mut params = Vec::new();
        let mut placeholder_idx = 1usize;
        self.append_where(&mut sql, &mut params, &mut placeholder_idx);
        (sql, params)
    }

    fn append_where(
        &self,
        sql: &mut String,
        params: &mut Vec<SqlValue>,
        placeholder_idx: &mut usize,
    ) {
        if self.conditions.is_empty() {
            return;
        }
        sql.push_str(" WHERE ");
        let mut first = true;
        for cond in &self.conditions {
            if !first {
                sql.push_str(" AND ");
            }
            first = false;
            match cond {
                Condition::Eq(col, val) => {
                    let placeholder = self.dialect.placeholder(*placeholder_idx);
                    *placeholder_idx += 1;
                    sql.push_str(&format!("{col} = {placeholder}"));
                    params.push(val.clone());
                }
                Condition::NotEq(col, val) => {
                    let placeholder = self.dialect.placeholder(*placeholder_idx);
                    *placeholder_idx += 1;
                    sql.push_str(&format!("{col} != {placeholder}"));
                    params.push(val.clone());
                }
                Condition::Like(col, pat) => {
                    let placeholder = self.dialect.placeholder(*placeholder_idx);
                    *placeholder_idx += 1;
                    sql.push_str(&format!("{col} LIKE {placeholder}"));
                    params.push(pat.clone());
                }
                Condition::Gt(col, val) => {
                    let placeholder = self.dialect.placeholder(*placeholder_idx);
                    *placeholder_idx += 1;
                    sql.push_str(&format!("{col} > {placeholder}"));
                    params.push(val.clone());
                }
                Condition::Lt(col, val) => {
                    let placeholder = self.dialect.placeholder(*placeholder_idx);
                    *placeholder_idx += 1;
                    sql.push_str(&format!("{col} < {placeholder}"));
                    params.push(val.clone());
                }
                Condition::In(col, vals) => {
                    let placeholders: Vec<_> = vals
                        .iter()
                        .map(|_| {
                            let placeholder = self.dialect.placeholder(*placeholder_idx);
                            *placeholder_idx += 1;
                            placeholder
                        })
                        .collect();
                    sql.push_str(&format!("{col} IN ({})", placeholders.join(", ")));
                    params.extend(vals.iter().cloned());
                }
                Condition::IsNull(col) => {
                    sql.push_str(&format!("{col} IS NULL"));
                }
                Condition::IsNotNull(col) => {
                    sql.push_str(&format!("{col} IS NOT NULL"));
                }
                Condition::NotInSelect {
                    column,
                    select_column,
                    from,
                    where_column,
                    value,
                } => {
                    let placeholder = self.dialect.placeholder(*placeholder_idx);
                    *placeholder_idx += 1;
                    sql.push_str(&format!(
                        "{column} NOT IN (SELECT {select_column} FROM {from} WHERE {where_column} = {placeholder})"
                    ));
                    params.push(value.clone());
                }
                Condition::Raw(fragment) => {
                    sql.push_str(&sanitize(fragment));
                }
            }
        }
    }

    fn append_order(&self, sql: &mut String) -> bool {
        if self.order.is_empty() {
            return false;
        }
        sql.push_str(" ORDER BY ");
        let clauses: Vec<_> = self
            .order
            .iter()
            .map(|clause| match clause {
                OrderClause::Column(col, asc) => {
                    if *asc {
                        format!("{col} ASC")
                    } else {
                        format!("{col} DESC")
                    }
                }
                OrderClause::Raw(fragment) => sanitize(fragment),
            })
            .collect();
        sql.push_str(&clauses.join(", "));
        true
    }
}

/// Defensive rewrite applied to caller-supplied structural fragments before
/// concatenation: doubled single quotes collapse to one and semicolons are
/// removed. This narrows injection vectors in clause bodies that are SQL
/// syntax themselves and cannot be parameterized; it is not a substitute
/// for binding data values.
fn sanitize(fragment: &str) -> String {
    fragment.replace("''", "'").replace(';', "")
}
