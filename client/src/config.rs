//! Client configuration baked in at build time.
//!
//! SYSTEM CONTEXT
//! ==============
//! The Supabase project URL and anon key are public values compiled into the
//! WASM bundle from `SUPABASE_URL` / `SUPABASE_ANON_KEY`. The access policy
//! is embedded from `access_policy.yaml` next to this crate's manifest.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use access::AccessPolicy;

/// `localStorage` key holding the persisted provider session.
pub const SESSION_STORAGE_KEY: &str = "schoolier.auth.session";
/// Background token refresh cadence.
pub const REFRESH_INTERVAL_SECS: u32 = 240;
/// Tokens closer than this to expiry are refreshed before use.
pub const EXPIRY_MARGIN_SECS: i64 = 60;
/// How long a notification stays on screen.
pub const TOAST_TTL_MS: u32 = 5_000;

const ACCESS_POLICY_YAML: &str = include_str!("../access_policy.yaml");

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("SUPABASE_URL must be an http(s) URL, got '{0}'")]
    InvalidUrl(String),
}

/// Supabase project coordinates.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SupabaseConfig {
    /// Project URL without trailing slash.
    pub url: String,
    pub anon_key: String,
}

impl SupabaseConfig {
    /// Read the values captured at compile time.
    ///
    /// # Errors
    ///
    /// See [`SupabaseConfig::from_parts`].
    pub fn from_build_env() -> Result<Self, ConfigError> {
        Self::from_parts(option_env!("SUPABASE_URL"), option_env!("SUPABASE_ANON_KEY"))
    }

    /// Validate raw values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for an absent or blank value and
    /// [`ConfigError::InvalidUrl`] for a URL without an http(s) scheme.
    pub fn from_parts(url: Option<&str>, anon_key: Option<&str>) -> Result<Self, ConfigError> {
        let url = url.map(str::trim).filter(|v| !v.is_empty()).ok_or(ConfigError::Missing("SUPABASE_URL"))?;
        let anon_key = anon_key
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?;
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(ConfigError::InvalidUrl(url.to_owned()));
        }
        Ok(Self { url: url.trim_end_matches('/').to_owned(), anon_key: anon_key.to_owned() })
    }

    /// URL of a GoTrue auth endpoint, e.g. `token?grant_type=password`.
    #[must_use]
    pub fn auth_endpoint(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.url, path.trim_start_matches('/'))
    }

    /// URL of a PostgREST endpoint, e.g. `profiles?id=eq.<id>`.
    #[must_use]
    pub fn rest_endpoint(&self, path: &str) -> String {
        format!("{}/rest/v1/{}", self.url, path.trim_start_matches('/'))
    }
}

/// Embedded access policy, or the strict default if it fails to parse.
pub fn access_policy() -> AccessPolicy {
    parse_policy(ACCESS_POLICY_YAML)
}

fn parse_policy(raw: &str) -> AccessPolicy {
    match AccessPolicy::from_yaml(raw) {
        Ok(policy) => policy,
        Err(e) => {
            log::error!("{e}; falling back to the strict access policy");
            AccessPolicy::default()
        }
    }
}
