//! Place entity and its write models.

use rust_decimal::Decimal;

/// A place owned by one account.
///
/// `category_ids` holds the ids of the attached categories in ascending
/// order.
#[derive(Debug, Clone, PartialEq)]
pub struct Place {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub avg_score: Option<Decimal>,
    pub notes: String,
    pub external_source: String,
    pub category_ids: Vec<i64>,
}

/// Complete field set for a place, used for create and full replace.
#[derive(Debug, Clone, Default)]
pub struct NewPlace {
    pub name: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub avg_score: Option<Decimal>,
    pub notes: String,
    pub external_source: String,
    pub category_ids: Vec<i64>,
}

/// Partial update for an existing place.
///
/// `None` fields are left unchanged. For nullable columns `Some(None)`
/// clears the value. `category_ids: Some(ids)` replaces the whole set.
#[derive(Debug, Clone, Default)]
pub struct PlacePatch {
    pub name: Option<String>,
    pub latitude: Option<Option<Decimal>>,
    pub longitude: Option<Option<Decimal>>,
    pub avg_score: Option<Option<Decimal>>,
    pub notes: Option<String>,
    pub external_source: Option<String>,
    pub category_ids: Option<Vec<i64>>,
}

impl From<NewPlace> for PlacePatch {
    fn from(p: NewPlace) -> Self {
        Self {
            name: Some(p.name),
            latitude: Some(p.latitude),
            longitude: Some(p.longitude),
            avg_score: Some(p.avg_score),
            notes: Some(p.notes),
            external_source: Some(p.external_source),
            category_ids: Some(p.category_ids),
        }
    }
}
