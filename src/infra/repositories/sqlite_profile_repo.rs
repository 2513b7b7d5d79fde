use crate::domain::{models::profile::{Profile, TeeShirtSize}, ports::ProfileRepository};
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use chrono::Utc;

pub struct SqliteProfileRepo {
    pool: SqlitePool,
}

impl SqliteProfileRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Fills the attendance and wishlist key lists, oldest link first.
    async fn load_links(&self, mut profile: Profile) -> Result<Profile, AppError> {
        profile.conference_keys_to_attend = sqlx::query_scalar::<_, String>(
            "SELECT conference_id FROM conference_attendees WHERE profile_id = ? ORDER BY created_at, rowid"
        )
            .bind(&profile.id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        profile.session_wishlist_keys = sqlx::query_scalar::<_, String>(
            "SELECT session_id FROM session_wishlist WHERE profile_id = ? ORDER BY created_at, rowid"
        )
            .bind(&profile.id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(profile)
    }
}

#[async_trait]
impl ProfileRepository for SqliteProfileRepo {
    async fn get_or_create(&self, profile: &Profile) -> Result<Profile, AppError> {
        sqlx::query(
            "INSERT INTO profiles (id, display_name, main_email, tee_shirt_size, created_at) VALUES (?, ?, ?, ?, ?)
             ON CONFLICT(id) DO NOTHING"
        )
            .bind(&profile.id)
            .bind(&profile.display_name)
            .bind(&profile.main_email)
            .bind(profile.tee_shirt_size)
            .bind(profile.created_at)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        self.find_by_id(&profile.id).await?
            .ok_or_else(|| AppError::InternalWithMsg(format!("Profile {} missing after insert", profile.id)))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Profile>, AppError> {
        let found = sqlx::query_as::<_, Profile>("SELECT * FROM profiles WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        match found {
            Some(profile) => Ok(Some(self.load_links(profile).await?)),
            None => Ok(None),
        }
    }

    async fn update(&self, id: &str, display_name: Option<&str>, tee_shirt_size: Option<TeeShirtSize>) -> Result<Profile, AppError> {
        let updated = sqlx::query_as::<_, Profile>(
            "UPDATE profiles SET display_name = COALESCE(?, display_name), tee_shirt_size = COALESCE(?, tee_shirt_size)
             WHERE id = ?
             RETURNING *"
        )
            .bind(display_name)
            .bind(tee_shirt_size)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound(format!("No profile found with key: {}", id)))?;

        self.load_links(updated).await
    }

    async fn add_to_wishlist(&self, profile_id: &str, session_id: &str) -> Result<(), AppError> {
        sqlx::query("INSERT INTO session_wishlist (profile_id, session_id, created_at) VALUES (?, ?, ?)")
            .bind(profile_id)
            .bind(session_id)
            .bind(Utc::now())
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(())
    }

    async fn remove_from_wishlist(&self, profile_id: &str, session_id: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM session_wishlist WHERE profile_id = ? AND session_id = ?")
            .bind(profile_id)
            .bind(session_id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(result.rows_affected() > 0)
    }
}
