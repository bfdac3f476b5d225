//! Account management used by the operator CLI.

use std::sync::Arc;

use validator::ValidateEmail;

use crate::domain::entities::{NewUser, User, normalize_email};
use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use serde_json::json;

pub struct UserService<U: UserRepository> {
    repository: Arc<U>,
}

impl<U: UserRepository> UserService<U> {
    pub fn new(repository: Arc<U>) -> Self {
        Self { repository }
    }

    /// # Errors
    ///
    /// Returns [`AppError::Validation`] on `email` if the address is
    /// malformed or already registered.
    pub async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        if !new_user.email.validate_email() {
            return Err(AppError::field("email", "Enter a valid email address."));
        }
        if self
            .repository
            .find_by_email(&new_user.email)
            .await?
            .is_some()
        {
            return Err(AppError::field("email", "user with this email already exists."));
        }

        let user = self.repository.create(new_user).await?;
        tracing::info!(user_id = user.id, "User created");
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Result<User, AppError> {
        let email = normalize_email(email);
        self.repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AppError::not_found("User not found", json!({ "email": email })))
    }

    pub async fn list(&self) -> Result<Vec<User>, AppError> {
        self.repository.list().await
    }
}
