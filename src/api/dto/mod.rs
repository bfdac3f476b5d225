//! Data Transfer Objects for API requests and responses.
//!
//! Request bodies deserialize with Serde and are checked with `validator`
//! plus the presence and precision rules in [`fields`]. Responses come in a
//! reference form (related rows as ids) and a detail form (related rows
//! inlined), built by the `to_reference` / `to_detail` functions of each
//! resource module.

pub mod category;
pub mod fields;
pub mod filters;
pub mod health;
pub mod place;
pub mod plan;
pub mod visit;
