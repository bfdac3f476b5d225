//! Core domain entities representing the travel data model.
//!
//! Entities are plain data structures without persistence concerns.
//!
//! # Entity Types
//!
//! - [`User`] / [`Identity`] - Accounts and the resolved request caller
//! - [`Category`] - Globally shared place labels
//! - [`Place`] - A place owned by one account
//! - [`Visit`] - A dated, scored visit to a place
//! - [`Plan`] - A budgeted bundle of visits
//!
//! # Design Pattern
//!
//! Owned entities come with two write models:
//! - `NewPlace`, `NewVisit`, `NewPlan` - the complete field set, used for
//!   create and full replace
//! - `PlacePatch`, `VisitPatch`, `PlanPatch` - partial updates; a full
//!   replace is the patch built from the complete field set

pub mod category;
pub mod place;
pub mod plan;
pub mod user;
pub mod visit;

pub use category::{Category, NewCategory};
pub use place::{NewPlace, Place, PlacePatch};
pub use plan::{NewPlan, Plan, PlanPatch};
pub use user::{Identity, NewUser, User, normalize_email};
pub use visit::{NewVisit, Visit, VisitPatch};
