use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};
use tracing::{info, instrument, warn};

use crate::{
    auth::jwt::AuthUser,
    education::{
        dto::{AddEntryRequest, EntryFilter, MessageResponse, SummaryQuery, SummaryResponse},
        repo,
        repo::{Entry, EntryWithOwner},
    },
    error::ApiError,
    state::AppState,
};

#[derive(Debug)]
struct NewEntry {
    date: Date,
    hours: Decimal,
    description: String,
    category: Option<String>,
}

fn validate_new_entry(payload: AddEntryRequest) -> Result<NewEntry, ApiError> {
    let (date, hours, description) = match (payload.date, payload.hours, payload.description) {
        (Some(d), Some(h), Some(desc)) if !desc.is_empty() => (d, h, desc),
        _ => {
            return Err(ApiError::Validation(
                "Date, hours, and description are required".into(),
            ))
        }
    };

    if hours <= Decimal::ZERO || hours > Decimal::from(24) {
        return Err(ApiError::Validation(
            "Hours must be between 0 and 24".into(),
        ));
    }

    Ok(NewEntry {
        date,
        hours,
        description,
        category: payload.category,
    })
}

#[instrument(skip(state, _claims))]
pub async fn list_entries(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Query(filter): Query<EntryFilter>,
) -> Result<Json<Vec<EntryWithOwner>>, ApiError> {
    let entries = repo::list_entries(
        &state.db,
        filter.user_id,
        filter.start_date,
        filter.end_date,
    )
    .await?;
    Ok(Json(entries))
}

/// New entries are always stamped with the caller's identity from the token.
#[instrument(skip(state, claims, payload))]
pub async fn add_entry(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Json(payload): Json<AddEntryRequest>,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    let new_entry = validate_new_entry(payload).map_err(|e| {
        warn!(user_id = %claims.user_id, error = %e, "entry rejected");
        e
    })?;

    let entry = repo::insert_entry(
        &state.db,
        claims.user_id,
        new_entry.date,
        new_entry.hours,
        &new_entry.description,
        new_entry.category,
    )
    .await?;

    info!(user_id = %claims.user_id, entry_id = entry.id, "entry added");
    Ok((StatusCode::CREATED, Json(entry)))
}

#[instrument(skip(state, claims))]
pub async fn delete_entry(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
    Path(entry_id): Path<i32>,
) -> Result<Json<MessageResponse>, ApiError> {
    let deleted = repo::delete_entry(&state.db, entry_id, claims.user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(
            "Entry not found or unauthorized".into(),
        ));
    }

    info!(user_id = %claims.user_id, entry_id, "entry deleted");
    Ok(Json(MessageResponse {
        message: "Entry deleted successfully".into(),
    }))
}

#[instrument(skip(state, _claims))]
pub async fn monthly_summary(
    State(state): State<AppState>,
    AuthUser(_claims): AuthUser,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let now = OffsetDateTime::now_utc();
    let year = query.year.unwrap_or_else(|| now.year());
    let month = query.month.unwrap_or_else(|| now.month() as u8);

    let summary = repo::monthly_summary(&state.db, year, month).await?;
    Ok(Json(SummaryResponse {
        year,
        month,
        summary,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    fn request(
        date: Option<Date>,
        hours: Option<Decimal>,
        description: Option<&str>,
    ) -> AddEntryRequest {
        AddEntryRequest {
            date,
            hours,
            description: description.map(str::to_string),
            category: None,
        }
    }

    #[test]
    fn accepts_a_complete_entry() {
        let req = request(
            Some(date!(2026 - 08 - 20)),
            Some(Decimal::new(15, 1)),
            Some("Webinar on compliance"),
        );
        let entry = validate_new_entry(req).expect("valid entry");
        assert_eq!(entry.hours, Decimal::new(15, 1));
        assert!(entry.category.is_none());
    }

    #[test]
    fn accepts_the_full_day_boundary() {
        let req = request(
            Some(date!(2026 - 08 - 20)),
            Some(Decimal::from(24)),
            Some("All-day workshop"),
        );
        assert!(validate_new_entry(req).is_ok());
    }

    #[test]
    fn rejects_missing_fields_with_the_required_message() {
        for req in [
            request(None, Some(Decimal::ONE), Some("x")),
            request(Some(date!(2026 - 08 - 20)), None, Some("x")),
            request(Some(date!(2026 - 08 - 20)), Some(Decimal::ONE), None),
            request(Some(date!(2026 - 08 - 20)), Some(Decimal::ONE), Some("")),
        ] {
            let err = validate_new_entry(req).unwrap_err();
            assert_eq!(err.to_string(), "Date, hours, and description are required");
        }
    }

    #[test]
    fn rejects_out_of_range_hours() {
        for hours in [Decimal::ZERO, Decimal::new(-5, 1), Decimal::new(2401, 2)] {
            let req = request(Some(date!(2026 - 08 - 20)), Some(hours), Some("x"));
            let err = validate_new_entry(req).unwrap_err();
            assert_eq!(err.to_string(), "Hours must be between 0 and 24");
        }
    }
}
