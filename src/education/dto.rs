use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::Date;
use uuid::Uuid;

use crate::education::repo::{SummaryDbRow, MONTHLY_REQUIRED_HOURS};

/// New entry body. Fields are optional so missing ones surface as a 400
/// with the expected message rather than a decode error.
#[derive(Debug, Deserialize)]
pub struct AddEntryRequest {
    pub date: Option<Date>,
    pub hours: Option<Decimal>,
    pub description: Option<String>,
    pub category: Option<String>,
}

/// Query filters for the entry listing; dates are inclusive.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryFilter {
    pub user_id: Option<Uuid>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub year: Option<i32>,
    pub month: Option<u8>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub year: i32,
    pub month: u8,
    pub summary: Vec<SummaryRow>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// One user's month: total hours, entry count, and whether the monthly
/// requirement was met.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub user_id: Uuid,
    pub full_name: String,
    pub total_hours: Decimal,
    pub entry_count: i64,
    pub requirement_met: bool,
}

impl From<SummaryDbRow> for SummaryRow {
    fn from(r: SummaryDbRow) -> Self {
        Self {
            user_id: r.user_id,
            full_name: r.full_name,
            requirement_met: r.total_hours >= *MONTHLY_REQUIRED_HOURS,
            total_hours: r.total_hours,
            entry_count: r.entry_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(total_cents: i64) -> SummaryDbRow {
        SummaryDbRow {
            user_id: Uuid::new_v4(),
            full_name: "Ada Example".into(),
            total_hours: Decimal::new(total_cents, 2),
            entry_count: if total_cents > 0 { 1 } else { 0 },
        }
    }

    #[test]
    fn exactly_two_and_a_half_hours_meets_the_requirement() {
        let summary: SummaryRow = row(250).into();
        assert!(summary.requirement_met);
    }

    #[test]
    fn two_point_four_nine_hours_does_not() {
        let summary: SummaryRow = row(249).into();
        assert!(!summary.requirement_met);
    }

    #[test]
    fn user_with_no_entries_shows_zero_and_unmet() {
        let summary: SummaryRow = row(0).into();
        assert_eq!(summary.total_hours, Decimal::ZERO);
        assert_eq!(summary.entry_count, 0);
        assert!(!summary.requirement_met);
    }
}
