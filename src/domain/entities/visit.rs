//! Visit entity and its write models.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A visit to one of the owner's places.
#[derive(Debug, Clone, PartialEq)]
pub struct Visit {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub place_id: i64,
    pub time: Option<NaiveDate>,
    pub score: Option<Decimal>,
    pub notes: String,
}

/// Complete field set for a visit, used for create and full replace.
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub title: String,
    pub place_id: i64,
    pub time: Option<NaiveDate>,
    pub score: Option<Decimal>,
    pub notes: String,
}

/// Partial update for an existing visit.
///
/// `None` fields are left unchanged; `Some(None)` clears a nullable column.
#[derive(Debug, Clone, Default)]
pub struct VisitPatch {
    pub title: Option<String>,
    pub place_id: Option<i64>,
    pub time: Option<Option<NaiveDate>>,
    pub score: Option<Option<Decimal>>,
    pub notes: Option<String>,
}

impl From<NewVisit> for VisitPatch {
    fn from(v: NewVisit) -> Self {
        Self {
            title: Some(v.title),
            place_id: Some(v.place_id),
            time: Some(v.time),
            score: Some(v.score),
            notes: Some(v.notes),
        }
    }
}
