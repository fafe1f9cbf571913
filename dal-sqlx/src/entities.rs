//! Row-mapped entity types.
//!
//! Each entity's `Default` value is the zero-value returned when a lookup
//! matches no row; an identifier of `0` means "not persisted".

use chrono::NaiveDateTime;
use dal_core::Entity;
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::{FromRow, Row};

/// An application user.
///
/// The credential digest is write-only: it is set by
/// [`insert`](crate::UserPersistence) and
/// [`update_password`](crate::UserPersistenceExt::update_password) and never
/// projected back out of the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct User {
    #[sqlx(rename = "Id")]
    pub id: i64,
    #[sqlx(rename = "Email")]
    pub email: String,
    #[sqlx(rename = "Name")]
    pub name: String,
    #[sqlx(rename = "Active")]
    pub active: bool,
}

impl User {
    /// An entity carrying only the key, meaning "fetch by key" or
    /// "act on key".
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

impl Entity for User {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

/// A role a user may hold. Users and roles relate many-to-many through the
/// `UserRole` association table.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Role {
    #[sqlx(rename = "RoleId")]
    pub id: i64,
    #[sqlx(rename = "Name")]
    pub name: String,
}

impl Role {
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

impl Entity for Role {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

/// One row of the database audit log, carrying the acting [`User`]
/// (many-to-one).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogDb {
    pub id: i64,
    /// Assigned by the store at insert time.
    pub date: NaiveDateTime,
    /// Action code, e.g. `I`, `U`, `D`.
    pub action: String,
    /// Identifier of the affected row.
    pub table_id: i64,
    /// Logical name of the affected table.
    pub table: String,
    /// Recorded statement text.
    pub sql: String,
    pub user: User,
}

impl LogDb {
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }
}

impl Entity for LogDb {
    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }
}

// Mapped by hand because the projection carries the joined user columns
// alongside the log columns.
impl FromRow<'_, SqliteRow> for LogDb {
    fn from_row(row: &SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("Id")?,
            date: row.try_get("Date")?,
            action: row.try_get("Action")?,
            table_id: row.try_get("TableId")?,
            table: row.try_get("Table")?,
            sql: row.try_get("Sql")?,
            user: User {
                id: row.try_get("UserId")?,
                email: row.try_get("Email")?,
                name: row.try_get("Name")?,
                active: row.try_get("Active")?,
            },
        })
    }
}
