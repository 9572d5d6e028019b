use lazy_static::lazy_static;
use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::education::dto::SummaryRow;

lazy_static! {
    /// Hours of education activity required per calendar month. Business
    /// rule pending product confirmation; see DESIGN.md.
    pub static ref MONTHLY_REQUIRED_HOURS: Decimal = Decimal::new(25, 1);
}

/// A persisted education entry.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: i32,
    pub user_id: Uuid,
    pub activity_date: Date,
    pub hours: Decimal,
    pub description: String,
    pub category: String,
    pub created_at: OffsetDateTime,
}

/// Listing row: entry joined with the owner's name and email.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EntryWithOwner {
    pub id: i32,
    pub user_id: Uuid,
    pub full_name: String,
    pub email: String,
    pub activity_date: Date,
    pub hours: Decimal,
    pub description: String,
    pub category: String,
    pub created_at: OffsetDateTime,
}

#[derive(Debug, FromRow)]
pub struct SummaryDbRow {
    pub user_id: Uuid,
    pub full_name: String,
    pub total_hours: Decimal,
    pub entry_count: i64,
}

pub async fn insert_entry(
    db: &PgPool,
    user_id: Uuid,
    date: Date,
    hours: Decimal,
    description: &str,
    category: Option<String>,
) -> anyhow::Result<Entry> {
    let entry = sqlx::query_as::<_, Entry>(
        r#"
        INSERT INTO education_entries (user_id, activity_date, hours, description, category, created_at)
        VALUES ($1, $2, $3, $4, $5, now())
        RETURNING id, user_id, activity_date, hours, description, category, created_at
        "#,
    )
    .bind(user_id)
    .bind(date)
    .bind(hours)
    .bind(description)
    .bind(category.unwrap_or_else(|| "General".into()))
    .fetch_one(db)
    .await?;
    Ok(entry)
}

/// Entries with any combination of owner/date-range filters, most recent
/// activity first, insertion order breaking ties. No filter means all
/// entries for all users; row-level visibility is the caller's concern.
pub async fn list_entries(
    db: &PgPool,
    user_id: Option<Uuid>,
    start_date: Option<Date>,
    end_date: Option<Date>,
) -> anyhow::Result<Vec<EntryWithOwner>> {
    let rows = sqlx::query_as::<_, EntryWithOwner>(
        r#"
        SELECT e.id, e.user_id, u.full_name, u.email,
               e.activity_date, e.hours, e.description, e.category, e.created_at
        FROM education_entries e
        JOIN users u ON u.id = e.user_id
        WHERE ($1::uuid IS NULL OR e.user_id = $1)
          AND ($2::date IS NULL OR e.activity_date >= $2)
          AND ($3::date IS NULL OR e.activity_date <= $3)
        ORDER BY e.activity_date DESC, e.created_at DESC
        "#,
    )
    .bind(user_id)
    .bind(start_date)
    .bind(end_date)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Delete iff the entry exists and is owned by `user_id`. A `false` result
/// conflates "missing" and "someone else's" on purpose.
pub async fn delete_entry(db: &PgPool, entry_id: i32, user_id: Uuid) -> anyhow::Result<bool> {
    let result = sqlx::query(
        r#"
        DELETE FROM education_entries
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(entry_id)
    .bind(user_id)
    .execute(db)
    .await?;
    Ok(result.rows_affected() > 0)
}

/// Per-user totals for one calendar month. Every user appears, including
/// those with no entries that month.
pub async fn monthly_summary(
    db: &PgPool,
    year: i32,
    month: u8,
) -> anyhow::Result<Vec<SummaryRow>> {
    let rows = sqlx::query_as::<_, SummaryDbRow>(
        r#"
        SELECT u.id AS user_id, u.full_name,
               COALESCE(SUM(e.hours), 0) AS total_hours,
               COUNT(e.id) AS entry_count
        FROM users u
        LEFT JOIN education_entries e
               ON e.user_id = u.id
              AND date_part('year', e.activity_date)::int = $1
              AND date_part('month', e.activity_date)::int = $2
        GROUP BY u.id, u.full_name
        ORDER BY u.full_name
        "#,
    )
    .bind(year)
    .bind(i32::from(month))
    .fetch_all(db)
    .await?;
    Ok(rows.into_iter().map(SummaryRow::from).collect())
}
