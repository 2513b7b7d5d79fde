use crate::domain::{models::{filter::FilterOperator, speaker::Speaker}, ports::SpeakerRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteSpeakerRepo {
    pool: SqlitePool,
}

impl SqliteSpeakerRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SpeakerRepository for SqliteSpeakerRepo {
    async fn create(&self, speaker: &Speaker) -> Result<Speaker, AppError> {
        sqlx::query_as::<_, Speaker>(
            "INSERT INTO speakers (id, name, organization, bio, rating, created_at) VALUES (?, ?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&speaker.id)
            .bind(&speaker.name)
            .bind(&speaker.organization)
            .bind(&speaker.bio)
            .bind(speaker.rating)
            .bind(speaker.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Speaker>, AppError> {
        sqlx::query_as::<_, Speaker>("SELECT * FROM speakers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self) -> Result<Vec<Speaker>, AppError> {
        sqlx::query_as::<_, Speaker>("SELECT * FROM speakers ORDER BY name")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_rating(&self, operator: FilterOperator, rating: i32) -> Result<Vec<Speaker>, AppError> {
        // Unrated speakers never match
        let sql = format!(
            "SELECT * FROM speakers WHERE rating IS NOT NULL AND rating {} ? ORDER BY name",
            operator.as_str()
        );
        sqlx::query_as::<_, Speaker>(&sql)
            .bind(rating)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
