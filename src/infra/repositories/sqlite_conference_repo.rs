use crate::domain::{
    models::{
        conference::Conference,
        filter::{ConferenceFilter, ConferenceQuery, FilterField, FilterValue, SortKey},
    },
    ports::ConferenceRepository,
    services::registration::{ALREADY_REGISTERED, NO_SEATS_AVAILABLE},
};
use crate::error::AppError;
use async_stream::try_stream;
use async_trait::async_trait;
use chrono::Utc;
use futures::{stream::BoxStream, Stream, TryStreamExt};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

pub struct SqliteConferenceRepo {
    pool: SqlitePool,
}

impl SqliteConferenceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn column(field: FilterField) -> &'static str {
    match field {
        FilterField::City => "city",
        FilterField::Topics => "topics",
        FilterField::Month => "month",
        FilterField::MaxAttendees => "max_attendees",
    }
}

fn push_value(builder: &mut QueryBuilder<'_, Sqlite>, value: &FilterValue) {
    match value {
        FilterValue::Text(text) => builder.push_bind(text.clone()),
        FilterValue::Int(number) => builder.push_bind(*number),
    };
}

/// Appends the WHERE clause. Topics are stored as a JSON array, so a topic
/// filter matches when any element satisfies it.
fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, filters: &[ConferenceFilter]) {
    for (i, filter) in filters.iter().enumerate() {
        builder.push(if i == 0 { " WHERE " } else { " AND " });
        if filter.field.is_repeated() {
            builder.push("EXISTS (SELECT 1 FROM json_each(conferences.topics) WHERE value ");
            builder.push(filter.operator.as_str());
            builder.push(" ");
            push_value(builder, &filter.value);
            builder.push(")");
        } else {
            builder.push(column(filter.field));
            builder.push(" ");
            builder.push(filter.operator.as_str());
            builder.push(" ");
            push_value(builder, &filter.value);
        }
    }
}

fn push_order(builder: &mut QueryBuilder<'_, Sqlite>, order_by: &[SortKey]) {
    for (i, key) in order_by.iter().enumerate() {
        builder.push(if i == 0 { " ORDER BY " } else { ", " });
        match key {
            SortKey::Name => builder.push("name"),
            SortKey::Field(field) if field.is_repeated() => {
                builder.push("(SELECT MIN(value) FROM json_each(conferences.topics))")
            }
            SortKey::Field(field) => builder.push(column(*field)),
        };
    }
}

/// Rows are pulled from the database as the caller polls.
fn stream_query(pool: &SqlitePool, query: ConferenceQuery) -> impl Stream<Item = Result<Conference, AppError>> + Send + '_ {
    try_stream! {
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM conferences");
        push_filters(&mut builder, &query.filters);
        push_order(&mut builder, &query.order_by);

        let mut rows = builder.build_query_as::<Conference>().fetch(pool);
        while let Some(conference) = rows.try_next().await? {
            yield conference;
        }
    }
}

#[async_trait]
impl ConferenceRepository for SqliteConferenceRepo {
    async fn create(&self, conference: &Conference) -> Result<Conference, AppError> {
        sqlx::query_as::<_, Conference>(
            "INSERT INTO conferences (id, name, description, organizer_user_id, topics, city, start_date, end_date, month, max_attendees, seats_available, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&conference.id).bind(&conference.name).bind(&conference.description).bind(&conference.organizer_user_id)
            .bind(&conference.topics).bind(&conference.city).bind(conference.start_date).bind(conference.end_date)
            .bind(conference.month).bind(conference.max_attendees).bind(conference.seats_available).bind(conference.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Conference>, AppError> {
        sqlx::query_as::<_, Conference>("SELECT * FROM conferences WHERE id = ?")
            .bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_ids(&self, ids: &[String]) -> Result<Vec<Conference>, AppError> {
        if ids.is_empty() {
            return Ok(vec![]);
        }
        let mut builder = QueryBuilder::<Sqlite>::new("SELECT * FROM conferences WHERE id IN (");
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id);
        }
        separated.push_unseparated(")");

        builder.build_query_as::<Conference>().fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_organizer(&self, organizer_user_id: &str) -> Result<Vec<Conference>, AppError> {
        sqlx::query_as::<_, Conference>("SELECT * FROM conferences WHERE organizer_user_id = ? ORDER BY name")
            .bind(organizer_user_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_all(&self) -> Result<Vec<Conference>, AppError> {
        sqlx::query_as::<_, Conference>("SELECT * FROM conferences ORDER BY name")
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_nearly_sold_out(&self, max_seats: i32) -> Result<Vec<Conference>, AppError> {
        sqlx::query_as::<_, Conference>(
            "SELECT * FROM conferences WHERE seats_available > 0 AND seats_available <= ? ORDER BY name"
        )
            .bind(max_seats).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update(&self, conference: &Conference, max_attendees: Option<i32>) -> Result<Conference, AppError> {
        // The difference is taken against the stored row, so concurrent
        // capacity changes each land on the capacity they asked for
        sqlx::query_as::<_, Conference>(
            "UPDATE conferences SET name=?1, description=?2, topics=?3, city=?4, start_date=?5, end_date=?6, month=?7,
                max_attendees = COALESCE(?8, max_attendees),
                seats_available = seats_available + (COALESCE(?8, max_attendees) - max_attendees)
             WHERE id = ?9 AND seats_available + (COALESCE(?8, max_attendees) - max_attendees) >= 0
             RETURNING *"
        )
            .bind(&conference.name).bind(&conference.description).bind(&conference.topics).bind(&conference.city)
            .bind(conference.start_date).bind(conference.end_date).bind(conference.month)
            .bind(max_attendees)
            .bind(&conference.id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::Conflict("maxAttendees cannot drop below the number of registered attendees".into()))
    }

    fn query(&self, query: ConferenceQuery) -> BoxStream<'_, Result<Conference, AppError>> {
        Box::pin(stream_query(&self.pool, query))
    }

    async fn register_attendee(&self, conference_id: &str, profile_id: &str) -> Result<(), AppError> {
        // Writes only: concurrent registrations queue on the database lock
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let linked = sqlx::query("INSERT INTO conference_attendees (profile_id, conference_id, created_at) VALUES (?, ?, ?)")
            .bind(profile_id).bind(conference_id).bind(Utc::now())
            .execute(&mut *tx).await;
        if let Err(e) = linked {
            let e = AppError::Database(e);
            if e.is_unique_violation() {
                return Err(AppError::Conflict(ALREADY_REGISTERED.into()));
            }
            return Err(e);
        }

        let taken = sqlx::query("UPDATE conferences SET seats_available = seats_available - 1 WHERE id = ? AND seats_available > 0")
            .bind(conference_id)
            .execute(&mut *tx).await.map_err(AppError::Database)?;
        if taken.rows_affected() == 0 {
            return Err(AppError::Conflict(NO_SEATS_AVAILABLE.into()));
        }

        tx.commit().await.map_err(AppError::Database)?;
        Ok(())
    }

    async fn unregister_attendee(&self, conference_id: &str, profile_id: &str) -> Result<bool, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let removed = sqlx::query("DELETE FROM conference_attendees WHERE profile_id = ? AND conference_id = ?")
            .bind(profile_id).bind(conference_id)
            .execute(&mut *tx).await.map_err(AppError::Database)?;
        if removed.rows_affected() == 0 {
            return Ok(false);
        }

        sqlx::query("UPDATE conferences SET seats_available = seats_available + 1 WHERE id = ?")
            .bind(conference_id)
            .execute(&mut *tx).await.map_err(AppError::Database)?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(true)
    }
}
