//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to one resource.

pub mod categories;
pub mod health;
pub mod places;
pub mod plans;
pub mod visits;

pub use categories::{category_list_handler, create_category_handler};
pub use health::health_handler;
pub use places::{
    create_place_handler, delete_place_handler, get_place_handler, patch_place_handler,
    place_list_handler, put_place_handler,
};
pub use plans::{
    create_plan_handler, delete_plan_handler, get_plan_handler, patch_plan_handler,
    plan_list_handler, put_plan_handler,
};
pub use visits::{
    create_visit_handler, delete_visit_handler, get_visit_handler, patch_visit_handler,
    put_visit_handler, visit_list_handler,
};
