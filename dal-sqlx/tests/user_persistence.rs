mod common;

use common::setup_pool;
use dal_core::{Persistence, PersistenceError};
use dal_sqlx::{Role, User, UserPersistence, UserPersistenceExt};

#[tokio::test]
async fn list_returns_page_and_total() {
    let persistence = UserPersistence::new(setup_pool().await);

    let result = persistence.list("", "", 2, 0).await.expect("list");

    assert_eq!(result.len(), 2);
    assert_eq!(result.total, 3);
    assert!(result.len() as u64 <= result.total);
}

#[tokio::test]
async fn list_with_filter_and_order_fragments() {
    let persistence = UserPersistence::new(setup_pool().await);

    let result = persistence
        .list("Active = 1", "UserId DESC", 0, 0)
        .await
        .expect("list");

    assert_eq!(result.total, 2);
    let ids: Vec<i64> = result.list.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![2, 1]);
}

#[tokio::test]
async fn list_without_order_pages_by_first_column() {
    let persistence = UserPersistence::new(setup_pool().await);

    let result = persistence.list("", "", 10, 0).await.expect("list");

    let ids: Vec<i64> = result.list.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
}

#[tokio::test]
async fn list_limit_zero_returns_everything() {
    let persistence = UserPersistence::new(setup_pool().await);

    // Offset is ignored while pagination is off.
    let result = persistence.list("", "", 0, 5).await.expect("list");

    assert_eq!(result.len(), 3);
    assert_eq!(result.total, 3);
}

#[tokio::test]
async fn list_with_unknown_column_fails() {
    let persistence = UserPersistence::new(setup_pool().await);

    let err = persistence
        .list("MissingColumn = 1", "", 2, 0)
        .await
        .expect_err("unknown column must fail");

    assert!(matches!(err, PersistenceError::Execution { .. }));
}

#[tokio::test]
async fn read_loads_by_identifier() {
    let persistence = UserPersistence::new(setup_pool().await);

    let user = persistence.read(&User::with_id(1)).await.expect("read");

    assert_eq!(user.id, 1);
    assert_eq!(user.name, "Test 1");
    assert!(user.active);
}

#[tokio::test]
async fn read_missing_row_returns_zero_value() {
    let persistence = UserPersistence::new(setup_pool().await);

    let user = persistence.read(&User::with_id(42)).await.expect("read");

    assert_eq!(user.id, 0);
    assert!(user.email.is_empty());
}

#[tokio::test]
async fn read_without_identifier_fails() {
    let persistence = UserPersistence::new(setup_pool().await);

    let err = persistence
        .read(&User::default())
        .await
        .expect_err("missing identifier must fail");

    assert!(matches!(err, PersistenceError::InvalidInput(_)));
}

#[tokio::test]
async fn insert_round_trip() {
    let persistence = UserPersistence::new(setup_pool().await);
    let user = User {
        id: 0,
        email: "new@example.com".into(),
        name: "New User".into(),
        active: true,
    };

    let inserted = persistence.insert(&user).await.expect("insert");
    assert_ne!(inserted.id, 0);

    let read = persistence
        .read(&User::with_id(inserted.id))
        .await
        .expect("read back");
    assert_eq!(read, inserted);
}

#[tokio::test]
async fn insert_duplicate_email_fails() {
    let persistence = UserPersistence::new(setup_pool().await);
    let user = User {
        id: 0,
        email: "test1@example.com".into(),
        name: "Duplicate".into(),
        active: true,
    };

    let err = persistence
        .insert(&user)
        .await
        .expect_err("duplicate email must fail");

    assert!(matches!(err, PersistenceError::Execution { .. }));
}

#[tokio::test]
async fn insert_without_email_fails() {
    let persistence = UserPersistence::new(setup_pool().await);

    let err = persistence
        .insert(&User::default())
        .await
        .expect_err("missing email must fail");

    assert!(matches!(err, PersistenceError::InvalidInput(_)));
}

#[tokio::test]
async fn update_persists_changes_and_returns_entity_unchanged() {
    let persistence = UserPersistence::new(setup_pool().await);
    let mut user = persistence.read(&User::with_id(1)).await.expect("read");
    user.name = "Renamed".into();

    let returned = persistence.update(&user).await.expect("update");
    assert_eq!(returned, user);

    let read = persistence.read(&User::with_id(1)).await.expect("read back");
    assert_eq!(read.name, "Renamed");
}

#[tokio::test]
async fn delete_then_read_returns_zero_value() {
    let persistence = UserPersistence::new(setup_pool().await);
    let inserted = persistence
        .insert(&User {
            id: 0,
            email: "doomed@example.com".into(),
            name: "Doomed".into(),
            active: true,
        })
        .await
        .expect("insert");

    let deleted = persistence.delete(&inserted).await.expect("delete");
    assert_eq!(deleted.id, inserted.id);

    let read = persistence
        .read(&User::with_id(inserted.id))
        .await
        .expect("read");
    assert_eq!(read.id, 0);
}

#[tokio::test]
async fn table_name_is_fixed() {
    let persistence = UserPersistence::new(setup_pool().await);
    assert_eq!(persistence.table_name(), "User");
}

#[tokio::test]
async fn credential_lookup_flows() {
    let persistence = UserPersistence::new(setup_pool().await);
    let by_email = User {
        email: "test1@example.com".into(),
        ..User::default()
    };

    persistence
        .update_password(&User::with_id(1), "Str0ng!Pass")
        .await
        .expect("update password");

    let found = persistence
        .read_by_email_and_password(&by_email, "Str0ng!Pass")
        .await
        .expect("credential lookup");
    assert_eq!(found.id, 1);

    let wrong = persistence
        .read_by_email_and_password(&by_email, "wrong")
        .await
        .expect("credential lookup");
    assert_eq!(wrong.id, 0);
}

#[tokio::test]
async fn credential_lookup_skips_inactive_accounts() {
    let persistence = UserPersistence::new(setup_pool().await);
    let by_email = User {
        email: "inactive@example.com".into(),
        ..User::default()
    };

    persistence
        .update_password(&User::with_id(3), "Str0ng!Pass")
        .await
        .expect("update password");

    let found = persistence
        .read_by_email_and_password(&by_email, "Str0ng!Pass")
        .await
        .expect("credential lookup");
    assert_eq!(found.id, 0);
}

#[tokio::test]
async fn credential_lookup_without_email_fails() {
    let persistence = UserPersistence::new(setup_pool().await);

    let err = persistence
        .read_by_email_and_password(&User::default(), "whatever")
        .await
        .expect_err("missing email must fail");

    assert!(matches!(err, PersistenceError::InvalidInput(_)));
}

#[tokio::test]
async fn read_by_email_requires_active_account() {
    let persistence = UserPersistence::new(setup_pool().await);

    let active = persistence
        .read_by_email(&User {
            email: "test1@example.com".into(),
            ..User::default()
        })
        .await
        .expect("read by email");
    assert_eq!(active.id, 1);

    let inactive = persistence
        .read_by_email(&User {
            email: "inactive@example.com".into(),
            ..User::default()
        })
        .await
        .expect("read by email");
    assert_eq!(inactive.id, 0);
}

#[tokio::test]
async fn list_roles_scopes_to_user_and_joins_caller_filters() {
    let persistence = UserPersistence::new(setup_pool().await);
    let user = User::with_id(1);

    let all = persistence
        .list_roles("", "", 10, 0, &user)
        .await
        .expect("list roles");
    assert_eq!(all.total, 2);

    let filtered = persistence
        .list_roles("Name = 'Administrator'", "", 10, 0, &user)
        .await
        .expect("list roles filtered");
    assert_eq!(filtered.total, 1);
    assert_eq!(filtered.list[0].name, "Administrator");
}

#[tokio::test]
async fn list_not_roles_returns_the_complement() {
    let persistence = UserPersistence::new(setup_pool().await);

    let missing = persistence
        .list_not_roles("", "", 10, 0, &User::with_id(1))
        .await
        .expect("list not roles");

    assert_eq!(missing.total, 1);
    assert_eq!(missing.list[0].name, "Auditor");
}

#[tokio::test]
async fn insert_role_duplicate_association_fails() {
    let persistence = UserPersistence::new(setup_pool().await);

    let err = persistence
        .insert_role(&Role::with_id(1), &User::with_id(1))
        .await
        .expect_err("duplicate association must fail");

    assert!(matches!(err, PersistenceError::Execution { .. }));
}

#[tokio::test]
async fn insert_and_delete_role_association() {
    let persistence = UserPersistence::new(setup_pool().await);
    let user = User::with_id(1);

    let assigned = persistence
        .insert_role(&Role::with_id(3), &user)
        .await
        .expect("assign role");
    assert_eq!(assigned.id, 3);
    assert_eq!(
        persistence
            .list_roles("", "", 0, 0, &user)
            .await
            .expect("list roles")
            .total,
        3
    );

    let removed = persistence
        .delete_role(&Role::with_id(2), &user)
        .await
        .expect("remove role");
    assert_eq!(removed.id, 2);
    assert_eq!(
        persistence
            .list_roles("", "", 0, 0, &user)
            .await
            .expect("list roles")
            .total,
        2
    );
}

#[tokio::test]
async fn insert_role_without_identifiers_fails() {
    let persistence = UserPersistence::new(setup_pool().await);

    let err = persistence
        .insert_role(&Role::default(), &User::with_id(1))
        .await
        .expect_err("missing role identifier must fail");

    assert!(matches!(err, PersistenceError::InvalidInput(_)));
}
