//! Repository-level tests for user CRUD and the email uniqueness constraint.

use sqlx::SqlitePool;

use jobboard_db::models::user::CreateUser;
use jobboard_db::repositories::UserRepo;

fn input(email: &str) -> CreateUser {
    CreateUser {
        name: "Test User".to_string(),
        email: email.to_string(),
        password_hash: "$argon2id$fake-hash".to_string(),
        role: "user".to_string(),
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_create_and_lookup(pool: SqlitePool) {
    let created = UserRepo::create(&pool, &input("lookup@example.com"))
        .await
        .unwrap();
    assert!(created.id > 0);
    assert_eq!(created.role, "user");

    let by_id = UserRepo::find_by_id(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, "lookup@example.com");

    let by_email = UserRepo::find_by_email(&pool, "lookup@example.com")
        .await
        .unwrap();
    assert!(by_email.is_some());

    let missing = UserRepo::find_by_email(&pool, "ghost@example.com")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_email_exists(pool: SqlitePool) {
    assert!(!UserRepo::email_exists(&pool, "someone@example.com").await.unwrap());

    UserRepo::create(&pool, &input("someone@example.com"))
        .await
        .unwrap();

    assert!(UserRepo::email_exists(&pool, "someone@example.com").await.unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_email_hits_unique_constraint(pool: SqlitePool) {
    UserRepo::create(&pool, &input("dup@example.com")).await.unwrap();

    let err = UserRepo::create(&pool, &input("dup@example.com"))
        .await
        .expect_err("second insert must fail");

    match err {
        sqlx::Error::Database(db_err) => assert!(db_err.is_unique_violation()),
        other => panic!("expected a database error, got {other:?}"),
    }
}
