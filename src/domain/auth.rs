use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Email, ProfileId};

/// Identity of the signed-in actor, resolved per request from the session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: ProfileId,
}

/// Account credentials. The profile shares the account id.
#[derive(Debug, Clone)]
pub struct User {
    pub id: ProfileId,
    pub email: Email,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}
