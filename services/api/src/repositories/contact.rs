//! Contact repository for database operations

use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::{
    error::ApiResult,
    models::{Bucket, Contact, ContactData, ContactQuery, Subject},
};

const CONTACT_COLUMNS: &str =
    "id, name, email, phone, subject, message, read, archived, notes, created_at, updated_at";

fn contact_from_row(row: &PgRow) -> Contact {
    let subject: String = row.get("subject");
    Contact {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        phone: row.get("phone"),
        subject: Subject::parse(&subject).unwrap_or(Subject::Outro),
        message: row.get("message"),
        read: row.get("read"),
        archived: row.get("archived"),
        notes: row.get("notes"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

/// SQL predicate for a visibility bucket
fn bucket_predicate(bucket: Option<Bucket>) -> &'static str {
    match bucket {
        Some(Bucket::Unread) => "WHERE read = FALSE AND archived = FALSE",
        Some(Bucket::Read) => "WHERE read = TRUE AND archived = FALSE",
        Some(Bucket::Archived) => "WHERE archived = TRUE",
        None => "",
    }
}

/// Contact repository
#[derive(Clone)]
pub struct ContactRepository {
    pool: PgPool,
}

impl ContactRepository {
    /// Create a new contact repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Store a new contact submission; messages start unread and unarchived
    pub async fn create(&self, data: &ContactData) -> ApiResult<Contact> {
        info!("Storing contact message from {}", data.email);

        let row = sqlx::query(&format!(
            r#"
            INSERT INTO contacts (name, email, phone, subject, message)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(&data.name)
        .bind(&data.email)
        .bind(&data.phone)
        .bind(data.subject.as_str())
        .bind(&data.message)
        .fetch_one(&self.pool)
        .await?;

        Ok(contact_from_row(&row))
    }

    /// Find a contact message by id
    pub async fn find_by_id(&self, id: Uuid) -> ApiResult<Option<Contact>> {
        let row = sqlx::query(&format!(
            r#"
            SELECT {CONTACT_COLUMNS}
            FROM contacts
            WHERE id = $1
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(contact_from_row))
    }

    /// List contact messages, newest first, with bucket filter and pagination
    ///
    /// Returns the page of messages and the total count under the same filter.
    pub async fn list(&self, query: &ContactQuery) -> ApiResult<(Vec<Contact>, i64)> {
        let page = query.page.unwrap_or(1).max(1);
        let limit = query.limit.unwrap_or(10).clamp(1, 100);
        let offset = (page - 1) as i64 * limit as i64;

        let bucket = query.status.as_deref().and_then(Bucket::parse);
        let predicate = bucket_predicate(bucket);

        let rows = sqlx::query(&format!(
            r#"
            SELECT {CONTACT_COLUMNS}
            FROM contacts
            {predicate}
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#
        ))
        .bind(limit as i64)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM contacts {predicate}"))
                .fetch_one(&self.pool)
                .await?;

        Ok((rows.iter().map(contact_from_row).collect(), total))
    }

    /// Mark a message as read
    ///
    /// One-way and idempotent: re-applying has no further effect.
    pub async fn mark_read(&self, id: Uuid) -> ApiResult<Option<Contact>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE contacts
            SET read = TRUE, updated_at = now()
            WHERE id = $1
            RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(contact_from_row))
    }

    /// Archive a message
    ///
    /// One-way and idempotent; archived messages are never hard-deleted.
    pub async fn archive(&self, id: Uuid) -> ApiResult<Option<Contact>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE contacts
            SET archived = TRUE, updated_at = now()
            WHERE id = $1
            RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(contact_from_row))
    }

    /// Replace the triage notes on a message
    pub async fn set_notes(&self, id: Uuid, notes: &str) -> ApiResult<Option<Contact>> {
        let row = sqlx::query(&format!(
            r#"
            UPDATE contacts
            SET notes = $2, updated_at = now()
            WHERE id = $1
            RETURNING {CONTACT_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(notes)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(contact_from_row))
    }
}
