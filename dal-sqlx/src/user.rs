//! User persistence: the generic contract plus credential lookups and role
//! relation management.

use crate::entities::{Role, User};
use crate::error::SqlxErrorExt;
use crate::listing::fetch_list_result;
use dal_core::{Entity, ListResult, Persistence, PersistenceError, QueryBuilder};
use sha2::{Digest, Sha512};
use sqlx::sqlite::SqlitePool;
use std::future::Future;

const USER_FIELDS: &str = "UserId AS Id, Email, Name, Active";
const USER_TABLE: &str = "User";
const ROLE_FIELDS: &str = "RoleId, Name";

/// Uppercase-hex SHA-512 digest stored in the credential column.
///
/// Plaintext never reaches a statement: lookups bind the digest of the
/// supplied password and compare against the stored one.
fn password_digest(input: &str) -> String {
    hex::encode_upper(Sha512::digest(input.as_bytes()))
}

/// Entity-specific operations beyond the generic contract: credential
/// lookups (always scoped to active accounts) and the user↔role relation.
///
/// Split out from [`Persistence`] so callers can take the capability set
/// they need without naming the concrete type.
pub trait UserPersistenceExt: Send + Sync {
    /// Load an active user by email. Zero-value entity on no match.
    fn read_by_email(
        &self,
        entity: &User,
    ) -> impl Future<Output = Result<User, PersistenceError>> + Send;

    /// Load an active user whose stored credential digest matches the
    /// supplied password. Zero-value entity on no match — a wrong password
    /// and an unknown email are indistinguishable by design.
    fn read_by_email_and_password(
        &self,
        entity: &User,
        password: &str,
    ) -> impl Future<Output = Result<User, PersistenceError>> + Send;

    /// Rewrite only the credential digest for the row keyed by identifier.
    fn update_password(
        &self,
        entity: &User,
        password: &str,
    ) -> impl Future<Output = Result<User, PersistenceError>> + Send;

    /// List the roles assigned to `user`, caller fragments joined with `AND`
    /// after the user predicate.
    fn list_roles(
        &self,
        filters: &str,
        orders: &str,
        limit: u64,
        offset: u64,
        user: &User,
    ) -> impl Future<Output = Result<ListResult<Role>, PersistenceError>> + Send;

    /// List the roles not assigned to `user`.
    fn list_not_roles(
        &self,
        filters: &str,
        orders: &str,
        limit: u64,
        offset: u64,
        user: &User,
    ) -> impl Future<Output = Result<ListResult<Role>, PersistenceError>> + Send;

    /// Add one user↔role association row. A duplicate association fails
    /// through the standard execution path (constraint violation).
    fn insert_role(
        &self,
        role: &Role,
        user: &User,
    ) -> impl Future<Output = Result<Role, PersistenceError>> + Send;

    /// Remove one user↔role association row. Deleting an association that
    /// does not exist is not specially detected.
    fn delete_role(
        &self,
        role: &Role,
        user: &User,
    ) -> impl Future<Output = Result<Role, PersistenceError>> + Send;
}

/// SQLite-backed persistence for [`User`] rows.
#[derive(Clone)]
pub struct UserPersistence {
    pool: SqlitePool,
}

impl UserPersistence {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open a persistence from an opaque connection descriptor, e.g.
    /// `sqlite://app.db`. The descriptor is handed to the driver untouched.
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

impl Persistence<User> for UserPersistence {
    async fn list(
        &self,
        filters: &str,
        orders: &str,
        limit: u64,
        offset: u64,
    ) -> Result<ListResult<User>, PersistenceError> {
        let qb = QueryBuilder::new(USER_FIELDS, USER_TABLE)
            .filter_raw(filters)
            .order_raw(orders)
            .limit(limit)
            .offset(offset);
        fetch_list_result(&self.pool, &qb, "error querying the list of users").await
    }

    async fn read(&self, entity: &User) -> Result<User, PersistenceError> {
        if !entity.is_persisted() {
            return Err(PersistenceError::invalid_input("user identifier is required"));
        }
        let row = sqlx::query_as::<_, User>(
            "SELECT UserId AS Id, Email, Name, Active FROM User WHERE UserId = ?",
        )
        .bind(entity.id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| e.into_persistence_error("error querying the user"))?;
        Ok(row.unwrap_or_default())
    }

    async fn insert(&self, entity: &User) -> Result<User, PersistenceError> {
        if entity.email.is_empty() {
            return Err(PersistenceError::invalid_input("user email is required"));
        }
        // New accounts start with a digest derived from the email; the real
        // credential arrives through update_password.
        let result = sqlx::query(
            "INSERT INTO User (Email, Name, Password, Active) VALUES (?, ?, ?, ?)",
        )
        .bind(&entity.email)
        .bind(&entity.name)
        .bind(password_digest(&entity.email))
        .bind(entity.active)
        .execute(&self.pool)
        .await
        .map_err(|e| e.into_persistence_error("error inserting the user"))?;

        let mut inserted = entity.clone();
        inserted.set_id(result.last_insert_rowid());
        Ok(inserted)
    }

    async fn update(&self, entity: &User) -> Result<User, PersistenceError> {
        if !entity.is_persisted() {
            return Err(PersistenceError::invalid_input("user identifier is required"));
        }
        sqlx::query("UPDATE User SET Email = ?, Name = ?, Active = ? WHERE UserId = ?")
            .bind(&entity.email)
            .bind(&entity.name)
            .bind(entity.active)
            .bind(entity.id)
            .execute(&self.pool)
            .await
            .map_err(|e| e.into_persistence_error("error updating the user"))?;
        Ok(entity.clone())
    }

    async fn delete(&self, entity: &User) -> Result<User, PersistenceError> {
        if !entity.is_persisted() {
            return Err(PersistenceError::invalid_input("user identifier is required"));
        }
        sqlx::query("DELETE FROM User WHERE UserId = ?")
            .bind(entity.id)
            .execute(&self.pool)
            .await
            .map_err(|e| e.into_persistence_error("error deleting the user"))?;
        Ok(entity.clone())
    }

    fn table_name(&self) -> &'static str {
        USER_TABLE
    }
}

impl UserPersistenceExt for UserPersistence {
    async fn read_by_email(&self, entity: &User) -> Result<User, PersistenceError> {
        if entity.email.is_empty() {
            return Err(PersistenceError::invalid_input("user email is required"));
        }
        let row = sqlx::query_as::<_, User>(
            "SELECT UserId AS Id, Email, Name, Active FROM User WHERE Email = ? AND Active = 1",
        )
        .bind(&entity.email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| e.into_persistence_error("error querying the user"))?;
        Ok(row.unwrap_or_default())
    }

    async fn read_by_email_and_password(
        &self,
        entity: &User,
        password: &str,
    ) -> Result<User, PersistenceError> {
        if entity.email.is_empty() {
            return Err(PersistenceError::invalid_input("user email is required"));
        }
        let row = sqlx::query_as::<_, User>(
            "SELECT UserId AS Id, Email, Name, Active FROM User WHERE Email = ? AND Password = ? AND Active = 1",
        )
        .bind(&entity.email)
        .bind(password_digest(password))
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| e.into_persistence_error("error querying the user"))?;
        Ok(row.unwrap_or_default())
    }

    async fn update_password(
        &self,
        entity: &User,
        password: &str,
    ) -> Result<User, PersistenceError> {
        if !entity.is_persisted() {
            return Err(PersistenceError::invalid_input("user identifier is required"));
        }
        sqlx::query("UPDATE User SET Password = ? WHERE UserId = ?")
            .bind(password_digest(password))
            .bind(entity.id)
            .execute(&self.pool)
            .await
            .map_err(|e| e.into_persistence_error("error updating the user's password"))?;
        Ok(entity.clone())
    }

    async fn list_roles(
        &self,
        filters: &str,
        orders: &str,
        limit: u64,
        offset: u64,
        user: &User,
    ) -> Result<ListResult<Role>, PersistenceError> {
        let qb = QueryBuilder::new(ROLE_FIELDS, "VwUserRole")
            .where_eq("UserId", user.id)
            .filter_raw(filters)
            .order_raw(orders)
            .limit(limit)
            .offset(offset);
        fetch_list_result(
            &self.pool,
            &qb,
            "error querying the list of roles assigned to the user",
        )
        .await
    }

    async fn list_not_roles(
        &self,
        filters: &str,
        orders: &str,
        limit: u64,
        offset: u64,
        user: &User,
    ) -> Result<ListResult<Role>, PersistenceError> {
        let qb = QueryBuilder::new(ROLE_FIELDS, "Role")
            .where_not_in_select("RoleId", "RoleId", "UserRole", "UserId", user.id)
            .filter_raw(filters)
            .order_raw(orders)
            .limit(limit)
            .offset(offset);
        fetch_list_result(
            &self.pool,
            &qb,
            "error querying the list of roles not assigned to the user",
        )
        .await
    }

    async fn insert_role(&self, role: &Role, user: &User) -> Result<Role, PersistenceError> {
        if !user.is_persisted() || !role.is_persisted() {
            return Err(PersistenceError::invalid_input(
                "user and role identifiers are required",
            ));
        }
        sqlx::query("INSERT INTO UserRole (UserId, RoleId) VALUES (?, ?)")
            .bind(user.id)
            .bind(role.id)
            .execute(&self.pool)
            .await
            .map_err(|e| e.into_persistence_error("error assigning the role to the user"))?;
        Ok(role.clone())
    }

    async fn delete_role(&self, role: &Role, user: &User) -> Result<Role, PersistenceError> {
        if !user.is_persisted() || !role.is_persisted() {
            return Err(PersistenceError::invalid_input(
                "user and role identifiers are required",
            ));
        }
        sqlx::query("DELETE FROM UserRole WHERE UserId = ? AND RoleId = ?")
            .bind(user.id)
            .bind(role.id)
            .execute(&self.pool)
            .await
            .map_err(|e| e.into_persistence_error("error removing the role from the user"))?;
        Ok(role.clone())
    }
}
