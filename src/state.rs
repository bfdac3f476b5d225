//! Shared application state injected into every handler.

use sqlx::PgPool;
use std::sync::Arc;

use crate::application::services::{
    AuthService, CategoryService, PlaceService, PlanService, VisitService,
};
use crate::infrastructure::persistence::{
    PgCategoryRepository, PgPlaceRepository, PgPlanRepository, PgTokenRepository,
    PgVisitRepository,
};

pub type Auth = AuthService<PgTokenRepository>;
pub type Categories = CategoryService<PgCategoryRepository>;
pub type Places = PlaceService<PgPlaceRepository, PgCategoryRepository>;
pub type Visits = VisitService<PgVisitRepository, PgPlaceRepository>;
pub type Plans = PlanService<PgPlanRepository, PgVisitRepository>;

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<PgPool>,
    pub auth_service: Arc<Auth>,
    pub category_service: Arc<Categories>,
    pub place_service: Arc<Places>,
    pub visit_service: Arc<Visits>,
    pub plan_service: Arc<Plans>,
}

impl AppState {
    /// Wires the PostgreSQL repositories into the services.
    pub fn new(db: Arc<PgPool>, token_signing_secret: String) -> Self {
        let tokens = Arc::new(PgTokenRepository::new(db.clone()));
        let categories = Arc::new(PgCategoryRepository::new(db.clone()));
        let places = Arc::new(PgPlaceRepository::new(db.clone()));
        let visits = Arc::new(PgVisitRepository::new(db.clone()));
        let plans = Arc::new(PgPlanRepository::new(db.clone()));

        Self {
            auth_service: Arc::new(AuthService::new(tokens, token_signing_secret)),
            category_service: Arc::new(CategoryService::new(categories.clone())),
            place_service: Arc::new(PlaceService::new(places.clone(), categories)),
            visit_service: Arc::new(VisitService::new(visits.clone(), places)),
            plan_service: Arc::new(PlanService::new(plans, visits)),
            db,
        }
    }
}
