//! Supabase wire DTOs and their conversion into access-layer types.
//!
//! DESIGN
//! ======
//! Only the fields the access layer needs are decoded; everything else in
//! GoTrue and PostgREST responses is ignored so upstream schema additions do
//! not break sign-in.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

use access::{Identity, RoleSet};

/// Body of `POST /auth/v1/token` (password and refresh grants).
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Lifetime in seconds.
    pub expires_in: i64,
    /// Absolute expiry (Unix seconds), when the server sends it.
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: GoTrueUser,
}

/// User record from GoTrue.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct GoTrueUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: serde_json::Value,
}

/// Row of the `profiles` table.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileRow {
    pub id: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub is_demo: bool,
}

/// Error body shapes returned by GoTrue and PostgREST.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub error_description: Option<String>,
    #[serde(default)]
    pub msg: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Most specific message present.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.error_description
            .as_deref()
            .or(self.msg.as_deref())
            .or(self.message.as_deref())
            .or(self.error.as_deref())
    }
}

/// Provider session persisted in `localStorage` between page loads.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    pub access_token: String,
    pub refresh_token: String,
    /// Unix seconds.
    pub expires_at: i64,
    pub user_id: String,
}

impl StoredSession {
    #[must_use]
    pub fn from_token(token: &TokenResponse, now_secs: i64) -> Self {
        Self {
            access_token: token.access_token.clone(),
            refresh_token: token.refresh_token.clone(),
            expires_at: token.expires_at.unwrap_or_else(|| now_secs.saturating_add(token.expires_in)),
            user_id: token.user.id.clone(),
        }
    }

    /// True when the access token expires within `margin_secs`.
    #[must_use]
    pub fn is_expired(&self, now_secs: i64, margin_secs: i64) -> bool {
        self.expires_at.saturating_sub(margin_secs) <= now_secs
    }
}

/// Combine the GoTrue user and its profile row into an [`Identity`].
/// Without a profile the user has no roles.
#[must_use]
pub fn identity_from(user: &GoTrueUser, profile: Option<&ProfileRow>) -> Identity {
    let metadata_name = user
        .user_metadata
        .get("full_name")
        .and_then(serde_json::Value::as_str)
        .map(str::to_owned);
    Identity {
        id: user.id.clone(),
        email: user.email.clone(),
        display_name: profile.and_then(|p| p.full_name.clone()).or(metadata_name),
        roles: profile.map_or_else(RoleSet::new, |p| RoleSet::from_tags(p.roles.iter().map(String::as_str))),
        is_demo: profile.is_some_and(|p| p.is_demo),
    }
}
