//! Supabase GoTrue implementation of [`AuthProvider`].
//!
//! Client-side (hydrate): REST calls via `gloo-net`, session persisted in
//! `localStorage`. Server-side (SSR): stubs; the session is only restored
//! after hydration.
//!
//! EVENTS
//! ======
//! Every state change the provider observes is also announced on its
//! [`EventBus`]: `InitialSession` after restore, `SignedIn`, `SignedOut`,
//! `TokenRefreshed` and `TokenExpired`. The session applies them through the
//! controller's subscription, so a background refresh updates the user
//! without a loading state.
//!
//! ERROR HANDLING
//! ==============
//! A rejected refresh token is not an error: the stored session is dropped
//! and the caller sees `Ok(None)`. Transport failures surface as
//! [`AuthError::Network`] and keep the stored session for the next attempt.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "supabase_test.rs"]
mod supabase_test;

use async_trait::async_trait;

use access::{AuthError, AuthEvent, AuthProvider, Credentials, EventBus, Identity, Subscription};

#[cfg(any(test, feature = "hydrate"))]
use super::types::ErrorBody;
use crate::config::SupabaseConfig;

#[cfg(any(test, feature = "hydrate"))]
const PASSWORD_GRANT: &str = "token?grant_type=password";
#[cfg(any(test, feature = "hydrate"))]
const REFRESH_GRANT: &str = "token?grant_type=refresh_token";

#[cfg(any(test, feature = "hydrate"))]
fn profile_path(user_id: &str) -> String {
    format!("profiles?id=eq.{}&select=id,full_name,roles,is_demo", urlencoding::encode(user_id))
}

/// Map a non-success response to an [`AuthError`].
#[cfg(any(test, feature = "hydrate"))]
fn classify_failure(status: u16, body: &ErrorBody) -> AuthError {
    let invalid_grant = body.error.as_deref() == Some("invalid_grant")
        || body.message().is_some_and(|m| m.contains("Invalid login credentials"));
    if status == 400 && invalid_grant {
        return AuthError::InvalidCredentials;
    }
    AuthError::Provider { status, message: body.message().unwrap_or("request failed").to_owned() }
}

/// True for failures meaning the refresh token itself is no longer valid.
#[cfg(any(test, feature = "hydrate"))]
fn is_revoked(error: &AuthError) -> bool {
    matches!(error, AuthError::InvalidCredentials | AuthError::Provider { status: 400 | 401 | 403, .. })
}

/// Supabase auth client.
#[derive(Clone, Debug, Default)]
pub struct SupabaseAuth {
    config: Option<SupabaseConfig>,
    events: EventBus,
}

impl SupabaseAuth {
    #[must_use]
    pub fn new(config: Option<SupabaseConfig>) -> Self {
        Self { config, events: EventBus::new() }
    }

    /// Build from the compile-time project settings. A missing setting is
    /// logged and leaves the provider unconfigured: visitors stay anonymous
    /// and sign-in reports [`AuthError::NotConfigured`].
    #[must_use]
    pub fn from_build_env() -> Self {
        match SupabaseConfig::from_build_env() {
            Ok(config) => Self::new(Some(config)),
            Err(e) => {
                log::error!("supabase disabled: {e}");
                Self::new(None)
            }
        }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    #[must_use]
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    #[cfg(feature = "hydrate")]
    fn config(&self) -> Result<&SupabaseConfig, AuthError> {
        self.config.as_ref().ok_or(AuthError::NotConfigured)
    }
}

// =============================================================================
// HTTP (hydrate only)
// =============================================================================

#[cfg(feature = "hydrate")]
mod http {
    use gloo_net::http::{Request, RequestBuilder, Response};
    use serde::de::DeserializeOwned;

    use access::{AuthError, Identity};

    use super::{ErrorBody, REFRESH_GRANT, SupabaseAuth, classify_failure, is_revoked, profile_path};
    use crate::config::{EXPIRY_MARGIN_SECS, SESSION_STORAGE_KEY, SupabaseConfig};
    use crate::net::types::{GoTrueUser, ProfileRow, StoredSession, TokenResponse, identity_from};
    use crate::util::{clock, storage};

    fn authorized(builder: RequestBuilder, config: &SupabaseConfig, bearer: Option<&str>) -> RequestBuilder {
        builder
            .header("apikey", &config.anon_key)
            .header("Authorization", &format!("Bearer {}", bearer.unwrap_or(&config.anon_key)))
    }

    async fn execute(request: Request) -> Result<Response, AuthError> {
        let resp = request.send().await.map_err(|e| AuthError::Network(e.to_string()))?;
        if resp.ok() {
            return Ok(resp);
        }
        let status = resp.status();
        let body = resp.json::<ErrorBody>().await.unwrap_or_default();
        Err(classify_failure(status, &body))
    }

    async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, AuthError> {
        resp.json::<T>().await.map_err(|e| AuthError::Decode(e.to_string()))
    }

    pub(super) fn stored_session() -> Option<StoredSession> {
        storage::load_json(SESSION_STORAGE_KEY)
    }

    pub(super) fn clear_session() {
        storage::remove(SESSION_STORAGE_KEY);
    }

    impl SupabaseAuth {
        pub(super) async fn post_auth(
            &self,
            path: &str,
            payload: &serde_json::Value,
            bearer: Option<&str>,
        ) -> Result<Response, AuthError> {
            let config = self.config()?;
            let request = authorized(Request::post(&config.auth_endpoint(path)), config, bearer)
                .json(payload)
                .map_err(|e| AuthError::Decode(e.to_string()))?;
            execute(request).await
        }

        pub(super) async fn token_request(
            &self,
            grant: &str,
            payload: &serde_json::Value,
        ) -> Result<TokenResponse, AuthError> {
            decode(self.post_auth(grant, payload, None).await?).await
        }

        async fn fetch_user(&self, access_token: &str) -> Result<GoTrueUser, AuthError> {
            let config = self.config()?;
            let request = authorized(Request::get(&config.auth_endpoint("user")), config, Some(access_token))
                .build()
                .map_err(|e| AuthError::Decode(e.to_string()))?;
            decode(execute(request).await?).await
        }

        async fn fetch_profile(&self, user_id: &str, access_token: &str) -> Result<Option<ProfileRow>, AuthError> {
            let config = self.config()?;
            let request =
                authorized(Request::get(&config.rest_endpoint(&profile_path(user_id))), config, Some(access_token))
                    .header("Accept", "application/json")
                    .build()
                    .map_err(|e| AuthError::Decode(e.to_string()))?;
            let rows: Vec<ProfileRow> = decode(execute(request).await?).await?;
            if rows.is_empty() {
                log::warn!("no profile row for user {user_id}");
            }
            Ok(rows.into_iter().next())
        }

        async fn load_identity(&self, user: &GoTrueUser, access_token: &str) -> Result<Identity, AuthError> {
            let profile = self.fetch_profile(&user.id, access_token).await?;
            Ok(identity_from(user, profile.as_ref()))
        }

        /// Persist a fresh token pair and resolve its identity.
        pub(super) async fn establish(&self, token: TokenResponse) -> Result<Identity, AuthError> {
            let identity = self.load_identity(&token.user, &token.access_token).await?;
            storage::save_json(SESSION_STORAGE_KEY, &StoredSession::from_token(&token, clock::now_secs()));
            Ok(identity)
        }

        /// Exchange the stored refresh token. `Ok(None)` once it is revoked.
        pub(super) async fn refresh_grant(&self, refresh_token: &str) -> Result<Option<Identity>, AuthError> {
            let payload = serde_json::json!({ "refresh_token": refresh_token });
            match self.token_request(REFRESH_GRANT, &payload).await {
                Ok(token) => self.establish(token).await.map(Some),
                Err(e) if is_revoked(&e) => {
                    log::info!("refresh token rejected; dropping stored session");
                    clear_session();
                    Ok(None)
                }
                Err(e) => Err(e),
            }
        }

        /// Resolve the stored session, refreshing it when it is about to
        /// expire or the access token is rejected.
        pub(super) async fn resume(&self, stored: &StoredSession) -> Result<Option<Identity>, AuthError> {
            if stored.is_expired(clock::now_secs(), EXPIRY_MARGIN_SECS) {
                return self.refresh_grant(&stored.refresh_token).await;
            }
            match self.fetch_user(&stored.access_token).await {
                Ok(user) => self.load_identity(&user, &stored.access_token).await.map(Some),
                Err(AuthError::Provider { status: 401 | 403, .. }) => self.refresh_grant(&stored.refresh_token).await,
                Err(e) => Err(e),
            }
        }
    }
}

// =============================================================================
// PROVIDER
// =============================================================================

#[async_trait(?Send)]
impl AuthProvider for SupabaseAuth {
    async fn get_session(&self) -> Result<Option<Identity>, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let result = match (self.is_configured(), http::stored_session()) {
                (true, Some(stored)) => self.resume(&stored).await,
                _ => Ok(None),
            };
            if let Ok(user) = &result {
                self.events.emit(&AuthEvent::InitialSession(user.clone()));
            }
            result
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Ok(None)
        }
    }

    async fn sign_in_with_password(&self, credentials: &Credentials) -> Result<Identity, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let payload = serde_json::json!({
                "email": credentials.email,
                "password": credentials.password,
            });
            let token = self.token_request(PASSWORD_GRANT, &payload).await?;
            let identity = self.establish(token).await?;
            self.events.emit(&AuthEvent::SignedIn(identity.clone()));
            Ok(identity)
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = credentials;
            Err(AuthError::Unavailable)
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            if let Some(stored) = http::stored_session() {
                let revoked =
                    self.post_auth("logout", &serde_json::json!({}), Some(&stored.access_token)).await;
                match revoked {
                    // An already-invalid token is as signed out as it gets.
                    Ok(_) | Err(AuthError::Provider { status: 401 | 403 | 404, .. }) => {}
                    Err(e) => return Err(e),
                }
            }
            http::clear_session();
            self.events.emit(&AuthEvent::SignedOut);
            Ok(())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AuthError::Unavailable)
        }
    }

    async fn reset_password_for_email(&self, email: &str) -> Result<(), AuthError> {
        #[cfg(feature = "hydrate")]
        {
            self.post_auth("recover", &serde_json::json!({ "email": email }), None).await.map(|_| ())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            let _ = email;
            Err(AuthError::Unavailable)
        }
    }

    async fn refresh_session(&self) -> Result<Option<Identity>, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            let result = match http::stored_session() {
                Some(stored) => self.refresh_grant(&stored.refresh_token).await,
                None => Ok(None),
            };
            match &result {
                Ok(Some(user)) => self.events.emit(&AuthEvent::TokenRefreshed(user.clone())),
                Ok(None) => self.events.emit(&AuthEvent::TokenExpired),
                Err(_) => {}
            }
            result
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AuthError::Unavailable)
        }
    }

    fn on_auth_state_change(&self, listener: Box<dyn Fn(&AuthEvent) + Send + Sync>) -> Subscription {
        self.events.subscribe(move |event| listener(event))
    }
}
