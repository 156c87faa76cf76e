//! User model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ConsentState;

/// A user account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Database ID
    pub id: i64,
    /// Username
    pub username: String,
    /// Password hash (not serialized to JSON)
    #[serde(skip_serializing)]
    pub password: String,
    /// Cookie consent decision, `None` while undecided
    #[serde(default)]
    pub consent: Option<ConsentState>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(username: String, password_hash: String) -> Self {
        Self {
            id: 0,
            username,
            password: password_hash,
            consent: None,
            created_at: Utc::now(),
        }
    }

    /// Local storage may only be used after an explicit accept
    pub fn allows_local_storage(&self) -> bool {
        self.consent == Some(ConsentState::Accepted)
    }

    /// Serialize without password (for API responses)
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id,
            username: self.username.clone(),
            consent: self.consent,
        }
    }
}

/// Public user info (no password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: i64,
    pub username: String,
    pub consent: Option<ConsentState>,
}
