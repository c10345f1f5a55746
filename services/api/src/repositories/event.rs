//! Event repository for database operations

use chrono::Utc;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::{ApiError, ApiResult, is_unique_violation},
    models::{Event, EventData, EventQuery, EventStatus, generate_slug, normalize_status},
};

const EVENT_COLUMNS: &str = "id, title, slug, description, date, time, location, audience, \
                             image, capacity, price, status, registration_url, schedule, \
                             featured, created_by, created_at, updated_at";

fn event_from_row(row: &PgRow) -> Event {
    let status: String = row.get("status");
    let price: serde_json::Value = row.get("price");
    let schedule: serde_json::Value = row.get("schedule");

    Event {
        id: row.get("id"),
        title: row.get("title"),
        slug: row.get("slug"),
        description: row.get("description"),
        date: row.get("date"),
        time: row.get("time"),
        location: row.get("location"),
        audience: row.get("audience"),
        image: row.get("image"),
        capacity: row.get("capacity"),
        price: serde_json::from_value(price).unwrap_or_default(),
        status: EventStatus::parse(&status).unwrap_or(EventStatus::Upcoming),
        registration_url: row.get("registration_url"),
        schedule: serde_json::from_value(schedule).unwrap_or_default(),
        featured: row.get("featured"),
        created_by: row.get("created_by"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn map_slug_conflict(e: sqlx::Error) -> ApiError {
    if is_unique_violation(&e) {
        ApiError::DuplicateSlug
    } else {
        ApiError::from(e)
    }
}

/// Event repository
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    ///
    /// Derives the slug from the title when none was provided, and runs the
    /// status correction before persisting. A slug collision surfaces as
    /// `DuplicateSlug` via the unique index.
    pub async fn create(&self, data: &EventData, actor_id: Uuid) -> ApiResult<Event> {
        let slug = data
            .slug
            .clone()
            .unwrap_or_else(|| generate_slug(&data.title));
        let status = normalize_status(data.status, data.date, Utc::now().date_naive());

        info!("Creating event '{}' with slug '{}'", data.title, slug);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO events (title, slug, description, date, time, location, audience,
                                image, capacity, price, status, registration_url, schedule,
                                featured, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(&data.title)
        .bind(&slug)
        .bind(&data.description)
        .bind(data.date)
        .bind(&data.time)
        .bind(&data.location)
        .bind(&data.audience)
        .bind(&data.image)
        .bind(data.capacity)
        .bind(serde_json::to_value(&data.price).unwrap_or_default())
        .bind(status.as_str())
        .bind(&data.registration_url)
        .bind(serde_json::to_value(&data.schedule).unwrap_or_default())
        .bind(data.featured)
        .bind(actor_id)
        .fetch_one(&self.pool)
        .await
        .map_err(map_slug_conflict)?;

        Ok(event_from_row(&row))
    }

    /// Find an event by id
    pub async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Event>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(event_from_row))
    }

    /// Find an event by an opaque identifier or slug
    ///
    /// A value that parses as a UUID is looked up by id, anything else by slug.
    pub async fn find_by_id_or_slug(&self, id_or_slug: &str) -> ApiResult<Option<Event>> {
        if let Ok(id) = Uuid::parse_str(id_or_slug) {
            return self.find_by_id(id).await;
        }

        let row = sqlx::query(&format!(
            r#"
            SELECT {EVENT_COLUMNS}
            FROM events
            WHERE slug = $1
            "#
        ))
        .bind(id_or_slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(event_from_row))
    }

    /// List events with optional status filter and pagination
    ///
    /// Upcoming and unfiltered listings are ordered by date ascending;
    /// past listings by date descending.
    pub async fn list(&self, query: &EventQuery) -> ApiResult<Vec<Event>> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(10).clamp(1, 100);
        let offset = (page - 1) as i64 * limit as i64;

        let status = query
            .status
            .as_deref()
            .and_then(EventStatus::parse)
            .filter(|s| matches!(s, EventStatus::Upcoming | EventStatus::Past));

        let rows = match status {
            Some(status) => {
                let order = if status == EventStatus::Past { "DESC" } else { "ASC" };
                sqlx::query(&format!(
                    r#"
                    SELECT {EVENT_COLUMNS}
                    FROM events
                    WHERE status = $1
                    ORDER BY date {order}
                    LIMIT $2 OFFSET $3
                    "#
                ))
                .bind(status.as_str())
                .bind(limit as i64)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query(&format!(
                    r#"
                    SELECT {EVENT_COLUMNS}
                    FROM events
                    ORDER BY date ASC
                    LIMIT $1 OFFSET $2
                    "#
                ))
                .bind(limit as i64)
                .bind(offset)
                .fetch_all(&self.pool)
                .await?
            }
        };

        Ok(rows.iter().map(event_from_row).collect())
    }

    /// Replace the mutable fields of an event
    ///
    /// Re-runs slug derivation and status correction; returns `None` when
    /// the id does not exist.
    pub async fn update(&self, id: Uuid, data: &EventData) -> ApiResult<Option<Event>> {
        let slug = data
            .slug
            .clone()
            .unwrap_or_else(|| generate_slug(&data.title));
        let status = normalize_status(data.status, data.date, Utc::now().date_naive());

        let row = sqlx::query(&format!(
            r#"
            UPDATE events
            SET title = $2, slug = $3, description = $4, date = $5, time = $6,
                location = $7, audience = $8, image = $9, capacity = $10, price = $11,
                status = $12, registration_url = $13, schedule = $14, featured = $15,
                updated_at = now()
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(&data.title)
        .bind(&slug)
        .bind(&data.description)
        .bind(data.date)
        .bind(&data.time)
        .bind(&data.location)
        .bind(&data.audience)
        .bind(&data.image)
        .bind(data.capacity)
        .bind(serde_json::to_value(&data.price).unwrap_or_default())
        .bind(status.as_str())
        .bind(&data.registration_url)
        .bind(serde_json::to_value(&data.schedule).unwrap_or_default())
        .bind(data.featured)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_slug_conflict)?;

        Ok(row.as_ref().map(event_from_row))
    }

    /// Delete an event; returns false when the id does not exist
    pub async fn delete(&self, id: Uuid) -> ApiResult<bool> {
        let result = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Set the status of an event explicitly
    ///
    /// This is an admin action and bypasses the automatic correction, so a
    /// canceled event can be reinstated or an event closed out by hand.
    pub async fn update_status(
        &self,
        id: Uuid,
        status: EventStatus,
    ) -> ApiResult<Option<Event>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE events
            SET status = $2, updated_at = now()
            WHERE id = $1
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(event_from_row))
    }
}
