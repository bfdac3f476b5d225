//! Account entity owning places, visits and plans.

use chrono::{DateTime, Utc};

/// An account that owns travel records.
///
/// Accounts are managed with the `admin` CLI; the HTTP API only ever sees
/// the resolved [`Identity`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub created_at: DateTime<Utc>,
}

/// Input data for creating a new account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub is_staff: bool,
}

impl NewUser {
    /// Builds a new account with a normalized email address.
    pub fn new(email: &str, name: impl Into<String>, is_staff: bool) -> Self {
        Self {
            email: normalize_email(email),
            name: name.into(),
            is_staff,
        }
    }
}

/// The authenticated caller of a request.
///
/// Every owned row is read and written through an identity; there is no
/// way to address another account's rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Identity {
    pub user_id: i64,
}

/// Lowercases the domain part of an email address.
///
/// The local part is kept as typed since mail servers may treat it
/// case-sensitively.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}
