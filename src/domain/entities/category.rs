//! Category entity shared by all accounts.

/// A label attached to places ("Museum", "Pub", ...).
///
/// Categories have no owner. Names are globally unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Category {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// Input data for creating a new category.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
}
