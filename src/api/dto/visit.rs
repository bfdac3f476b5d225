//! DTOs for visit endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use super::fields;
use super::place::{self, PlaceReference};
use crate::domain::entities::{NewVisit, Place, Visit, VisitPatch};
use crate::error::AppError;
use crate::utils::decimal::SCORE;

/// Request body for visit create, full and partial update.
///
/// `time` and `score` are nullable; `null` on any other field is rejected.
#[derive(Debug, Default, Deserialize)]
pub struct VisitRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub title: Option<Option<String>>,

    /// Id of a place owned by the caller.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub place: Option<Option<i64>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub time: Option<Option<NaiveDate>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub score: Option<Option<Decimal>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,
}

impl VisitRequest {
    fn field_errors(&mut self) -> ValidationErrors {
        fields::trim(&mut self.title);
        fields::trim(&mut self.notes);

        let mut errors = ValidationErrors::new();
        fields::check_text(&mut errors, "title", fields::text(&self.title), 255, true);
        fields::check_text(&mut errors, "notes", fields::text(&self.notes), 1000, true);
        fields::check_decimal(&mut errors, "score", self.score.flatten().as_ref(), SCORE);
        errors
    }

    pub fn into_new_visit(mut self) -> Result<NewVisit, AppError> {
        let mut errors = self.field_errors();
        let place_id = fields::required(&mut errors, "place", self.place);
        let title = fields::non_null(&mut errors, "title", self.title);
        let notes = fields::non_null(&mut errors, "notes", self.notes);

        match place_id {
            Some(place_id) if errors.is_empty() => Ok(NewVisit {
                title: title.unwrap_or_default(),
                place_id,
                time: self.time.flatten(),
                score: self.score.flatten(),
                notes: notes.unwrap_or_default(),
            }),
            _ => Err(errors.into()),
        }
    }

    pub fn into_patch(mut self) -> Result<VisitPatch, AppError> {
        let mut errors = self.field_errors();
        let patch = VisitPatch {
            title: fields::non_null(&mut errors, "title", self.title),
            place_id: fields::non_null(&mut errors, "place", self.place),
            time: self.time,
            score: self.score,
            notes: fields::non_null(&mut errors, "notes", self.notes),
        };

        fields::finish(errors)?;
        Ok(patch)
    }
}

/// Visit with the place id.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitReference {
    pub id: i64,
    pub title: String,
    pub place: i64,
    pub time: Option<NaiveDate>,
    pub score: Option<Decimal>,
    pub notes: String,
}

/// Visit with its place in reference form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VisitDetail {
    pub id: i64,
    pub title: String,
    pub place: PlaceReference,
    pub time: Option<NaiveDate>,
    pub score: Option<Decimal>,
    pub notes: String,
}

pub fn to_reference(visit: Visit) -> VisitReference {
    VisitReference {
        id: visit.id,
        title: visit.title,
        place: visit.place_id,
        time: visit.time,
        score: visit.score,
        notes: visit.notes,
    }
}

pub fn to_detail(visit: Visit, place: Place) -> VisitDetail {
    VisitDetail {
        id: visit.id,
        title: visit.title,
        place: place::to_reference(place),
        time: visit.time,
        score: visit.score,
        notes: visit.notes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(value: serde_json::Value) -> VisitRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_create_requires_place() {
        let err = request(json!({ "title": "Morning" })).into_new_visit().unwrap_err();
        let (_, info) = err.to_error_info();
        assert_eq!(info.details["place"][0], fields::REQUIRED);
    }

    #[test]
    fn test_create_allows_blank_title() {
        let new = request(json!({ "place": 3, "time": "2020-05-01" }))
            .into_new_visit()
            .unwrap();

        assert_eq!(new.title, "");
        assert_eq!(new.place_id, 3);
        assert_eq!(new.time, NaiveDate::from_ymd_opt(2020, 5, 1));
    }

    #[test]
    fn test_score_out_of_range() {
        for score in [json!("12"), json!("-1"), json!("4.55")] {
            let result = request(json!({ "place": 1, "score": score })).into_new_visit();
            assert!(result.is_err(), "score {score}");
        }
    }

    #[test]
    fn test_patch_clears_time() {
        let patch = request(json!({ "time": null })).into_patch().unwrap();

        assert_eq!(patch.time, Some(None));
        assert!(patch.place_id.is_none());
        assert!(patch.score.is_none());
    }

    #[test]
    fn test_null_place_rejected() {
        for result in [
            request(json!({ "place": null })).into_patch().map(|_| ()),
            request(json!({ "place": null })).into_new_visit().map(|_| ()),
        ] {
            let (_, info) = result.unwrap_err().to_error_info();
            assert_eq!(info.details["place"][0], fields::NULL);
        }
    }

    #[test]
    fn test_null_title_rejected() {
        let err = request(json!({ "place": 1, "title": null }))
            .into_new_visit()
            .unwrap_err();
        let (_, info) = err.to_error_info();
        assert_eq!(info.details["title"][0], fields::NULL);
    }

    #[test]
    fn test_serialized_forms() {
        let visit = Visit {
            id: 4,
            owner_id: 1,
            title: "Evening".to_string(),
            place_id: 9,
            time: NaiveDate::from_ymd_opt(2020, 5, 1),
            score: None,
            notes: String::new(),
        };
        let place = Place {
            id: 9,
            owner_id: 1,
            name: "Pier".to_string(),
            latitude: None,
            longitude: None,
            avg_score: None,
            notes: String::new(),
            external_source: String::new(),
            category_ids: vec![],
        };

        let reference = serde_json::to_value(to_reference(visit.clone())).unwrap();
        assert_eq!(reference["place"], 9);
        assert_eq!(reference["time"], "2020-05-01");
        assert!(reference["score"].is_null());

        let detail = serde_json::to_value(to_detail(visit, place)).unwrap();
        assert_eq!(detail["place"]["id"], 9);
        assert_eq!(detail["place"]["name"], "Pier");
        assert_eq!(detail["place"]["categories"], json!([]));
    }
}
