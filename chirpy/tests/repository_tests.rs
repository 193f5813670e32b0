//! Repository tests against a real PostgreSQL.
//!
//! Each test creates its own database from `DATABASE_URL` and runs the migrations into it.
//! Without `DATABASE_URL` the tests return early.

use auth::generate_refresh_token;
use chirpy::domain::chirp::errors::ChirpError;
use chirpy::domain::chirp::models::Chirp;
use chirpy::domain::chirp::models::ChirpBody;
use chirpy::domain::chirp::models::ChirpId;
use chirpy::domain::chirp::models::ChirpOrder;
use chirpy::domain::chirp::models::ChirpQuery;
use chirpy::domain::chirp::ports::ChirpRepository;
use chirpy::domain::session::errors::AuthError;
use chirpy::domain::session::models::RefreshToken;
use chirpy::domain::session::ports::RefreshTokenRepository;
use chirpy::domain::user::models::EmailAddress;
use chirpy::domain::user::models::User;
use chirpy::domain::user::models::UserId;
use chirpy::domain::user::ports::UserRepository;
use chirpy::outbound::repositories::PostgresChirpRepository;
use chirpy::outbound::repositories::PostgresRefreshTokenRepository;
use chirpy::outbound::repositories::PostgresUserRepository;
use chirpy::user::errors::UserError;
use chrono::DateTime;
use chrono::Duration;
use chrono::DurationRound;
use chrono::Utc;
use sqlx::postgres::PgConnectOptions;
use sqlx::postgres::PgPoolOptions;
use sqlx::Connection;
use sqlx::Executor;
use sqlx::PgConnection;
use sqlx::PgPool;

/// Test database helper
pub struct TestDb {
    pub pool: PgPool,
    pub db_name: String,
    postgres_url: String,
}

impl TestDb {
    /// Create a new test database with a unique name, or `None` when `DATABASE_URL` is unset
    pub async fn new() -> Option<Self> {
        let Ok(postgres_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL is not set; skipping PostgreSQL repository test");
            return None;
        };

        let db_name = format!(
            "test_chirpy_{}",
            uuid::Uuid::new_v4().to_string().replace('-', "_")
        );

        let mut conn = PgConnection::connect(&postgres_url)
            .await
            .expect("Failed to connect to Postgres");

        conn.execute(format!(r#"CREATE DATABASE "{}";"#, db_name).as_str())
            .await
            .expect("Failed to create test database");

        let options = postgres_url
            .parse::<PgConnectOptions>()
            .expect("Failed to parse DATABASE_URL")
            .database(&db_name);

        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        Some(Self {
            pool,
            db_name,
            postgres_url,
        })
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        // Database cleanup happens asynchronously
        let db_name = self.db_name.clone();
        let postgres_url = self.postgres_url.clone();
        tokio::spawn(async move {
            if let Ok(mut conn) = PgConnection::connect(&postgres_url).await {
                let _ = conn
                    .execute(
                        format!(
                            r#"SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}';"#,
                            db_name
                        )
                        .as_str(),
                    )
                    .await;

                let _ = conn
                    .execute(format!(r#"DROP DATABASE IF EXISTS "{}";"#, db_name).as_str())
                    .await;
            }
        });
    }
}

// TIMESTAMPTZ keeps microseconds; truncate so round-tripped values compare equal.
fn now() -> DateTime<Utc> {
    Utc::now()
        .duration_trunc(Duration::microseconds(1))
        .expect("Failed to truncate timestamp")
}

fn user(email: &str) -> User {
    let now = now();
    User {
        id: UserId::new(),
        email: EmailAddress::new(email.to_string()).unwrap(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".to_string(),
        created_at: now,
        updated_at: now,
    }
}

async fn stored_user(db: &TestDb, email: &str) -> User {
    PostgresUserRepository::new(db.pool.clone())
        .create(user(email))
        .await
        .expect("Failed to create user")
}

fn refresh_token(user_id: UserId) -> RefreshToken {
    RefreshToken::issue(
        generate_refresh_token().unwrap(),
        user_id,
        now(),
        Duration::days(60),
    )
    .unwrap()
}

#[tokio::test]
async fn test_user_round_trip_and_lookup_by_email() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let created = repository
        .create(user("walt@breakingbad.com"))
        .await
        .unwrap();

    let by_id = repository.find_by_id(&created.id).await.unwrap().unwrap();
    assert_eq!(by_id.email, created.email);
    assert_eq!(by_id.password_hash, created.password_hash);
    assert_eq!(by_id.created_at, created.created_at);

    let by_email = repository
        .find_by_email("walt@breakingbad.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, created.id);

    assert!(repository
        .find_by_email("jesse@breakingbad.com")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_duplicate_email_maps_to_email_already_exists() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    repository
        .create(user("walt@breakingbad.com"))
        .await
        .unwrap();
    let duplicate = repository.create(user("walt@breakingbad.com")).await;
    assert!(matches!(duplicate, Err(UserError::EmailAlreadyExists(_))));

    // The same constraint guards updates.
    let mut jesse = repository
        .create(user("jesse@breakingbad.com"))
        .await
        .unwrap();
    jesse.email = EmailAddress::new("walt@breakingbad.com".to_string()).unwrap();
    let clash = repository.update(jesse).await;
    assert!(matches!(clash, Err(UserError::EmailAlreadyExists(_))));
}

#[tokio::test]
async fn test_update_of_missing_user_is_not_found() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repository = PostgresUserRepository::new(db.pool.clone());

    let result = repository.update(user("walt@breakingbad.com")).await;
    assert!(matches!(result, Err(UserError::NotFound(_))));
}

#[tokio::test]
async fn test_refresh_token_round_trip() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let owner = stored_user(&db, "walt@breakingbad.com").await;
    let repository = PostgresRefreshTokenRepository::new(db.pool.clone());

    let record = repository.create(refresh_token(owner.id)).await.unwrap();
    let found = repository
        .find_by_token(&record.token)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(found, record);
    assert!(repository
        .find_by_token(&generate_refresh_token().unwrap())
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_duplicate_refresh_token_is_a_persistence_failure() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let owner = stored_user(&db, "walt@breakingbad.com").await;
    let repository = PostgresRefreshTokenRepository::new(db.pool.clone());

    let record = refresh_token(owner.id);
    repository.create(record.clone()).await.unwrap();

    let result = repository.create(record).await;
    assert!(matches!(result, Err(AuthError::PersistenceFailure(_))));
}

#[tokio::test]
async fn test_revocation_is_terminal_and_keeps_first_time() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let owner = stored_user(&db, "walt@breakingbad.com").await;
    let repository = PostgresRefreshTokenRepository::new(db.pool.clone());
    let record = repository.create(refresh_token(owner.id)).await.unwrap();

    let first = now();
    repository.revoke(&record.token, first).await.unwrap();

    let revoked = repository
        .find_by_token(&record.token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(revoked.revoked_at, Some(first));
    assert_eq!(revoked.updated_at, first);
    assert!(revoked.ensure_usable(first).is_err());

    // A second revoke succeeds but only moves updated_at.
    let second = first + Duration::seconds(5);
    repository.revoke(&record.token, second).await.unwrap();

    let revoked_again = repository
        .find_by_token(&record.token)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(revoked_again.revoked_at, Some(first));
    assert_eq!(revoked_again.updated_at, second);
    assert_eq!(
        revoked_again.ensure_usable(second),
        Err(AuthError::TokenRevoked)
    );
}

#[tokio::test]
async fn test_revoke_of_unknown_token_is_not_found() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let repository = PostgresRefreshTokenRepository::new(db.pool.clone());

    let result = repository
        .revoke(&generate_refresh_token().unwrap(), now())
        .await;
    assert_eq!(result, Err(AuthError::TokenNotFound));
}

#[tokio::test]
async fn test_chirps_list_filter_order_and_delete() {
    let Some(db) = TestDb::new().await else {
        return;
    };
    let walt = stored_user(&db, "walt@breakingbad.com").await;
    let jesse = stored_user(&db, "jesse@breakingbad.com").await;
    let repository = PostgresChirpRepository::new(db.pool.clone());

    let start = now();
    let mut ids = Vec::new();
    let posts = [(walt.id, "first"), (jesse.id, "second"), (walt.id, "third")];
    for (offset, (author, body)) in posts.into_iter().enumerate() {
        let created_at = start + Duration::seconds(offset as i64);
        let chirp = repository
            .create(Chirp {
                id: ChirpId::new(),
                body: ChirpBody::new(body.to_string()).unwrap(),
                user_id: author,
                created_at,
                updated_at: created_at,
            })
            .await
            .unwrap();
        ids.push(chirp.id);
    }

    let bodies = |chirps: Vec<Chirp>| -> Vec<String> {
        chirps
            .into_iter()
            .map(|c| c.body.as_str().to_string())
            .collect()
    };

    let all = repository.list(ChirpQuery::default()).await.unwrap();
    assert_eq!(bodies(all), ["first", "second", "third"]);

    let walt_newest_first = repository
        .list(ChirpQuery {
            author_id: Some(walt.id),
            order: ChirpOrder::NewestFirst,
        })
        .await
        .unwrap();
    assert_eq!(bodies(walt_newest_first), ["third", "first"]);

    repository.delete(&ids[0]).await.unwrap();
    assert!(repository.find_by_id(&ids[0]).await.unwrap().is_none());
    assert!(matches!(
        repository.delete(&ids[0]).await,
        Err(ChirpError::NotFound(_))
    ));
}
