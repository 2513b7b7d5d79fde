use crate::domain::{models::session::{Session, TypeOfSession}, ports::SessionRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use chrono::NaiveTime;

pub struct SqliteSessionRepo {
    pool: SqlitePool,
}

impl SqliteSessionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepo {
    async fn create(&self, session: &Session) -> Result<Session, AppError> {
        sqlx::query_as::<_, Session>(
            r#"INSERT INTO sessions (id, conference_id, name, highlights, speaker_keys, duration, type_of_session, date, start_time, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
               RETURNING *"#
        )
            .bind(&session.id)
            .bind(&session.conference_id)
            .bind(&session.name)
            .bind(&session.highlights)
            .bind(&session.speaker_keys)
            .bind(session.duration)
            .bind(session.type_of_session)
            .bind(session.date)
            .bind(session.start_time)
            .bind(session.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Session>, AppError> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE id = ?"
        )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Session>, AppError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM sessions WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        builder.build_query_as::<Session>()
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_conference(&self, conference_id: &str) -> Result<Vec<Session>, AppError> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE conference_id = ? ORDER BY start_time ASC, name ASC"
        )
            .bind(conference_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_conference_and_type(&self, conference_id: &str, session_type: TypeOfSession) -> Result<Vec<Session>, AppError> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions WHERE conference_id = ? AND type_of_session = ? ORDER BY start_time ASC"
        )
            .bind(conference_id)
            .bind(session_type)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_by_speaker(&self, speaker_id: &str) -> Result<Vec<Session>, AppError> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions
             WHERE EXISTS (SELECT 1 FROM json_each(sessions.speaker_keys) WHERE value = ?)
             ORDER BY start_time ASC"
        )
            .bind(speaker_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list_starting_before(&self, time: NaiveTime, session_type: TypeOfSession) -> Result<Vec<Session>, AppError> {
        sqlx::query_as::<_, Session>(
            "SELECT * FROM sessions
             WHERE start_time IS NOT NULL AND start_time < ? AND type_of_session = ?
             ORDER BY start_time ASC"
        )
            .bind(time)
            .bind(session_type)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
