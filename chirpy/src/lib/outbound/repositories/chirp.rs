use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::chirp::errors::ChirpError;
use crate::domain::chirp::models::Chirp;
use crate::domain::chirp::models::ChirpBody;
use crate::domain::chirp::models::ChirpId;
use crate::domain::chirp::models::ChirpOrder;
use crate::domain::chirp::models::ChirpQuery;
use crate::domain::chirp::ports::ChirpRepository;
use crate::domain::user::models::UserId;

const LIST_OLDEST_FIRST: &str = r#"
    SELECT id, body, user_id, created_at, updated_at
    FROM chirps
    WHERE $1::uuid IS NULL OR user_id = $1
    ORDER BY created_at ASC, id ASC
"#;

const LIST_NEWEST_FIRST: &str = r#"
    SELECT id, body, user_id, created_at, updated_at
    FROM chirps
    WHERE $1::uuid IS NULL OR user_id = $1
    ORDER BY created_at DESC, id DESC
"#;

pub struct PostgresChirpRepository {
    pool: PgPool,
}

impl PostgresChirpRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ChirpRow {
    id: Uuid,
    body: String,
    user_id: Uuid,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ChirpRow> for Chirp {
    type Error = ChirpError;

    fn try_from(row: ChirpRow) -> Result<Self, Self::Error> {
        Ok(Chirp {
            id: ChirpId(row.id),
            body: ChirpBody::new(row.body)?,
            user_id: UserId(row.user_id),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn database_error(e: sqlx::Error) -> ChirpError {
    ChirpError::DatabaseError(e.to_string())
}

#[async_trait]
impl ChirpRepository for PostgresChirpRepository {
    async fn create(&self, chirp: Chirp) -> Result<Chirp, ChirpError> {
        sqlx::query(
            r#"
            INSERT INTO chirps (id, body, user_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(chirp.id.0)
        .bind(chirp.body.as_str())
        .bind(chirp.user_id.0)
        .bind(chirp.created_at)
        .bind(chirp.updated_at)
        .execute(&self.pool)
        .await
        .map_err(database_error)?;

        Ok(chirp)
    }

    async fn find_by_id(&self, id: &ChirpId) -> Result<Option<Chirp>, ChirpError> {
        let row = sqlx::query_as::<_, ChirpRow>(
            r#"
            SELECT id, body, user_id, created_at, updated_at
            FROM chirps
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(database_error)?;

        row.map(Chirp::try_from).transpose()
    }

    async fn list(&self, query: ChirpQuery) -> Result<Vec<Chirp>, ChirpError> {
        let sql = match query.order {
            ChirpOrder::OldestFirst => LIST_OLDEST_FIRST,
            ChirpOrder::NewestFirst => LIST_NEWEST_FIRST,
        };

        sqlx::query_as::<_, ChirpRow>(sql)
            .bind(query.author_id.map(|id| id.0))
            .fetch_all(&self.pool)
            .await
            .map_err(database_error)?
            .into_iter()
            .map(Chirp::try_from)
            .collect()
    }

    async fn delete(&self, id: &ChirpId) -> Result<(), ChirpError> {
        let result = sqlx::query("DELETE FROM chirps WHERE id = $1")
            .bind(id.0)
            .execute(&self.pool)
            .await
            .map_err(database_error)?;

        if result.rows_affected() == 0 {
            return Err(ChirpError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
