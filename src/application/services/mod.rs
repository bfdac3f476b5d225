//! Business logic services for the application layer.

pub mod auth_service;
pub mod category_service;
pub mod place_service;
pub mod plan_service;
pub mod user_service;
pub mod visit_service;

pub use auth_service::AuthService;
pub use category_service::CategoryService;
pub use place_service::{PlaceDetails, PlaceService};
pub use plan_service::{PlanDetails, PlanService};
pub use user_service::UserService;
pub use visit_service::{VisitDetails, VisitService};

use crate::error::AppError;

/// Fails on the first requested id missing from `found`.
///
/// `field` names the relation in the request body.
pub(crate) fn ensure_all_found(
    field: &str,
    requested: &[i64],
    found: impl IntoIterator<Item = i64>,
) -> Result<(), AppError> {
    let found: Vec<i64> = found.into_iter().collect();

    match requested.iter().find(|id| !found.contains(id)) {
        Some(missing) => Err(AppError::field(field, invalid_pk(*missing))),
        None => Ok(()),
    }
}

pub(crate) fn invalid_pk(id: i64) -> String {
    format!("Invalid pk \"{id}\" - object does not exist.")
}
