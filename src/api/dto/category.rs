//! DTOs for category endpoints.

use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

use super::fields;
use crate::domain::entities::{Category, NewCategory};
use crate::error::AppError;

/// Request body for `POST /categorys`.
#[derive(Debug, Default, Deserialize)]
pub struct CategoryRequest {
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub name: Option<Option<String>>,
}

impl CategoryRequest {
    pub fn into_new_category(mut self) -> Result<NewCategory, AppError> {
        fields::trim(&mut self.name);

        let mut errors = ValidationErrors::new();
        fields::check_text(&mut errors, "name", fields::text(&self.name), 255, false);
        let name = fields::required(&mut errors, "name", self.name);

        match name {
            Some(name) if errors.is_empty() => Ok(NewCategory { name }),
            _ => Err(errors.into()),
        }
    }
}

/// Category as rendered everywhere: list items, create response and
/// nested inside place details.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryItem {
    pub id: i64,
    pub name: String,
}

impl From<Category> for CategoryItem {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
        }
    }
}
