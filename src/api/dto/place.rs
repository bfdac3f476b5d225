//! DTOs for place endpoints.
//!
//! A place is written with `categories` as a list of category ids and read
//! back in one of two forms: the reference form keeps the ids, the detail
//! form (single-place retrieve) inlines each category as `{id, name}`.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::{ValidateUrl, ValidationErrors};

use super::category::CategoryItem;
use super::fields;
use crate::domain::entities::{Category, NewPlace, Place, PlacePatch};
use crate::error::AppError;
use crate::utils::decimal::{COORDINATE, SCORE};

/// Request body for place create, full and partial update.
///
/// Every field keeps an absent key (`None`) apart from an explicit `null`
/// (`Some(None)`). Only the decimals are nullable; `null` clears them on a
/// partial update and is rejected everywhere else.
#[derive(Debug, Default, Deserialize)]
pub struct PlaceRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub latitude: Option<Option<Decimal>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub longitude: Option<Option<Decimal>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub avg_score: Option<Option<Decimal>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub notes: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub external_source: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub categories: Option<Option<Vec<i64>>>,
}

impl PlaceRequest {
    /// Rules on supplied values. Presence is checked by the callers.
    fn field_errors(&mut self) -> ValidationErrors {
        fields::trim(&mut self.name);
        fields::trim(&mut self.notes);
        fields::trim(&mut self.external_source);

        let mut errors = ValidationErrors::new();
        fields::check_text(&mut errors, "name", fields::text(&self.name), 255, false);
        fields::check_text(&mut errors, "notes", fields::text(&self.notes), 1000, true);

        let source = fields::text(&self.external_source);
        fields::check_text(&mut errors, "external_source", source, 200, true);
        if let Some(source) = source
            && !source.is_empty()
            && !source.validate_url()
        {
            fields::add(&mut errors, "external_source", "Enter a valid URL.");
        }

        fields::check_decimal(&mut errors, "latitude", self.latitude.flatten().as_ref(), COORDINATE);
        fields::check_decimal(&mut errors, "longitude", self.longitude.flatten().as_ref(), COORDINATE);
        fields::check_decimal(&mut errors, "avg_score", self.avg_score.flatten().as_ref(), SCORE);

        errors
    }

    /// Validates the body as a complete record (create, PUT).
    ///
    /// Omitted optional fields take their defaults and an omitted
    /// `categories` means no categories.
    pub fn into_new_place(mut self) -> Result<NewPlace, AppError> {
        let mut errors = self.field_errors();
        let name = fields::required(&mut errors, "name", self.name);
        let notes = fields::non_null(&mut errors, "notes", self.notes);
        let external_source =
            fields::non_null(&mut errors, "external_source", self.external_source);
        let category_ids = fields::non_null(&mut errors, "categories", self.categories);

        match name {
            Some(name) if errors.is_empty() => Ok(NewPlace {
                name,
                latitude: self.latitude.flatten(),
                longitude: self.longitude.flatten(),
                avg_score: self.avg_score.flatten(),
                notes: notes.unwrap_or_default(),
                external_source: external_source.unwrap_or_default(),
                category_ids: category_ids.unwrap_or_default(),
            }),
            _ => Err(errors.into()),
        }
    }

    /// Validates the body as a partial update (PATCH).
    pub fn into_patch(mut self) -> Result<PlacePatch, AppError> {
        let mut errors = self.field_errors();
        let patch = PlacePatch {
            name: fields::non_null(&mut errors, "name", self.name),
            latitude: self.latitude,
            longitude: self.longitude,
            avg_score: self.avg_score,
            notes: fields::non_null(&mut errors, "notes", self.notes),
            external_source: fields::non_null(&mut errors, "external_source", self.external_source),
            category_ids: fields::non_null(&mut errors, "categories", self.categories),
        };

        fields::finish(errors)?;
        Ok(patch)
    }
}

/// Place with category ids.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceReference {
    pub id: i64,
    pub name: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub avg_score: Option<Decimal>,
    pub notes: String,
    pub external_source: String,
    pub categories: Vec<i64>,
}

/// Place with categories inlined.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlaceDetail {
    pub id: i64,
    pub name: String,
    pub latitude: Option<Decimal>,
    pub longitude: Option<Decimal>,
    pub avg_score: Option<Decimal>,
    pub notes: String,
    pub external_source: String,
    pub categories: Vec<CategoryItem>,
}

pub fn to_reference(place: Place) -> PlaceReference {
    PlaceReference {
        id: place.id,
        name: place.name,
        latitude: place.latitude,
        longitude: place.longitude,
        avg_score: place.avg_score,
        notes: place.notes,
        external_source: place.external_source,
        categories: place.category_ids,
    }
}

pub fn to_detail(place: Place, categories: Vec<Category>) -> PlaceDetail {
    PlaceDetail {
        id: place.id,
        name: place.name,
        latitude: place.latitude,
        longitude: place.longitude,
        avg_score: place.avg_score,
        notes: place.notes,
        external_source: place.external_source,
        categories: categories.into_iter().map(CategoryItem::from).collect(),
    }
}
