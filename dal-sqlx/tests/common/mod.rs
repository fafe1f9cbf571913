use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

// Schema and seed data mirroring the production database: three users (one
// inactive), three roles, two of them assigned to the first user.
const SCHEMA: &[&str] = &[
    "CREATE TABLE User (
        UserId INTEGER PRIMARY KEY AUTOINCREMENT,
        Email TEXT NOT NULL UNIQUE,
        Name TEXT NOT NULL,
        Password TEXT NOT NULL,
        Active BOOLEAN NOT NULL DEFAULT 1
    )",
    "CREATE TABLE Role (
        RoleId INTEGER PRIMARY KEY AUTOINCREMENT,
        Name TEXT NOT NULL
    )",
    "CREATE TABLE UserRole (
        UserId INTEGER NOT NULL,
        RoleId INTEGER NOT NULL,
        PRIMARY KEY (UserId, RoleId)
    )",
    "CREATE TABLE LogDb (
        LogDbId INTEGER PRIMARY KEY AUTOINCREMENT,
        Date TEXT NOT NULL,
        Action TEXT NOT NULL,
        TableId INTEGER NOT NULL,
        \"Table\" TEXT NOT NULL,
        \"Sql\" TEXT NOT NULL,
        UserId INTEGER NOT NULL
    )",
    "CREATE VIEW VwUserRole AS
        SELECT ur.UserId, r.RoleId, r.Name
        FROM UserRole ur
        JOIN Role r ON r.RoleId = ur.RoleId",
    "CREATE VIEW VwLogDb AS
        SELECT l.LogDbId, l.Date, l.Action, l.TableId, l.\"Table\", l.\"Sql\",
               u.UserId, u.Email, u.Name, u.Active
        FROM LogDb l
        JOIN User u ON u.UserId = l.UserId",
    "INSERT INTO User (Email, Name, Password, Active) VALUES
        ('test1@example.com', 'Test 1', 'seed', 1),
        ('test2@example.com', 'Test 2', 'seed', 1),
        ('inactive@example.com', 'Inactive', 'seed', 0)",
    "INSERT INTO Role (Name) VALUES ('Administrator'), ('Operator'), ('Auditor')",
    "INSERT INTO UserRole (UserId, RoleId) VALUES (1, 1), (1, 2)",
];

pub async fn setup_pool() -> SqlitePool {
    // A single connection so every statement sees the same in-memory database.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory database");
    for statement in SCHEMA {
        sqlx::query(statement)
            .execute(&pool)
            .await
            .expect("schema statement");
    }
    pool
}
