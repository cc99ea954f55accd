//! Session domain models.

use serde::{Deserialize, Serialize};

/// Profile of the signed-in user, as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: i64,
    pub email: String,
    pub full_name: String,
    /// Roles in server order; the first one is shown as the primary role.
    #[serde(default)]
    pub roles: Vec<String>,
    /// Token issue time in epoch milliseconds. `None` when it could not be decoded.
    pub created_at: Option<i64>,
    /// Token lifetime in seconds.
    pub expires_in: Option<u64>,
}

impl UserProfile {
    /// Up to two upper-cased initials taken from the full name.
    pub fn initials(&self) -> String {
        self.full_name
            .split_whitespace()
            .filter_map(|part| part.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }

    /// First role, or `"User"` when none was granted.
    pub fn primary_role(&self) -> &str {
        self.roles.first().map(String::as_str).unwrap_or("User")
    }

    /// Name to greet the user with.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            "User"
        } else {
            &self.full_name
        }
    }
}

/// Client authentication state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: Option<String>,
    pub refresh_token: Option<String>,
    pub user: Option<UserProfile>,
}

impl Session {
    /// An empty (signed-out) session.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// True iff both an access token and a user are present.
    pub fn is_authenticated(&self) -> bool {
        let has_token = self
            .access_token
            .as_deref()
            .is_some_and(|token| !token.is_empty());
        has_token && self.user.is_some()
    }

    /// Expiry instant in epoch milliseconds, if it can be determined.
    pub fn expires_at(&self) -> Option<i64> {
        let user = self.user.as_ref()?;
        let expires_in = i64::try_from(user.expires_in?).ok()?;
        user.created_at?.checked_add(expires_in.checked_mul(1000)?)
    }

    /// Whether the session is expired at `now_millis`.
    ///
    /// Fails closed: a session whose expiry cannot be determined is expired.
    pub fn is_expired_at(&self, now_millis: i64) -> bool {
        match self.expires_at() {
            Some(expires_at) => now_millis > expires_at,
            None => true,
        }
    }

    /// Bearer credential to attach to requests, if signed in.
    pub fn bearer(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|token| !token.is_empty())
    }
}
