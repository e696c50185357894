//! Locations and the login redirect query contract.
//!
//! The login screen understands three query parameters:
//!
//! - `logout=true`: arrived because of a sign-out; show a neutral notice and
//!   suppress "session expired" messaging.
//! - `profile=<role>`: account type chosen in the selector.
//! - `redirect=<path>`: where to go after a successful login. Only
//!   same-origin relative paths are honoured.

#[cfg(test)]
#[path = "location_test.rs"]
mod location_test;

use std::fmt;

use crate::role::Role;

pub const LOGIN_PATH: &str = "/login";
/// Default authenticated landing page.
pub const DASHBOARD_PATH: &str = "/dashboard";

/// A path plus its query string (without the leading `?`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Location {
    pub path: String,
    pub search: String,
}

impl Location {
    #[must_use]
    pub fn new(path: impl Into<String>, search: impl Into<String>) -> Self {
        let path = path.into();
        let search = search.into();
        Self {
            path: if path.is_empty() { "/".to_owned() } else { path },
            search: search.trim_start_matches('?').to_owned(),
        }
    }

    /// Split an href into path and query. Fragments are dropped.
    #[must_use]
    pub fn parse(href: &str) -> Self {
        let href = href.split('#').next().unwrap_or_default();
        match href.split_once('?') {
            Some((path, search)) => Self::new(path, search),
            None => Self::new(href, ""),
        }
    }

    #[must_use]
    pub fn href(&self) -> String {
        if self.search.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.search)
        }
    }

    /// Decoded `key=value` pairs of the query string, in order.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        query_pairs(&self.search)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.href())
    }
}

fn decode_component(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    urlencoding::decode(&spaced).map_or(spaced.clone(), std::borrow::Cow::into_owned)
}

/// Decode a query string into ordered pairs. A bare key has an empty value.
#[must_use]
pub fn query_pairs(search: &str) -> Vec<(String, String)> {
    search
        .trim_start_matches('?')
        .split('&')
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once('=') {
            Some((k, v)) => (decode_component(k), decode_component(v)),
            None => (decode_component(part), String::new()),
        })
        .collect()
}

/// Accept `raw` as a post-login destination only if it stays on this
/// origin and does not point back at the login screen.
///
/// Control characters are refused outright: browsers strip tab, CR and LF
/// while parsing a URL, so `/\t/host` would navigate to `//host`.
#[must_use]
pub fn safe_return_path(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.chars().any(char::is_control) {
        return None;
    }
    if !raw.starts_with('/') || raw.starts_with("//") || raw.contains('\\') || raw.contains("://") {
        return None;
    }
    let target = Location::parse(raw);
    if target.path == LOGIN_PATH {
        return None;
    }
    Some(target.href())
}

/// Parsed query of the login screen.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginQuery {
    pub logout: bool,
    pub profile: Option<Role>,
    pub redirect: Option<String>,
}

impl LoginQuery {
    /// Query for the redirect issued while a sign-out is in flight.
    #[must_use]
    pub fn forced_logout() -> Self {
        Self { logout: true, ..Self::default() }
    }

    /// Query that sends the user back to `from` after login.
    #[must_use]
    pub fn returning_to(from: &Location) -> Self {
        Self { redirect: safe_return_path(&from.href()), ..Self::default() }
    }

    /// Parse a login query string. Unknown keys, unknown roles and unsafe
    /// redirect targets are ignored.
    #[must_use]
    pub fn parse(search: &str) -> Self {
        let mut query = Self::default();
        for (key, value) in query_pairs(search) {
            match key.as_str() {
                "logout" => query.logout = matches!(value.as_str(), "true" | "1"),
                "profile" => query.profile = value.parse().ok(),
                "redirect" => query.redirect = safe_return_path(&value),
                _ => {}
            }
        }
        query
    }

    /// Full href of the login screen carrying this query.
    #[must_use]
    pub fn to_href(&self) -> String {
        let mut params = Vec::new();
        if self.logout {
            params.push("logout=true".to_owned());
        }
        if let Some(role) = self.profile {
            params.push(format!("profile={role}"));
        }
        if let Some(redirect) = &self.redirect {
            params.push(format!("redirect={}", urlencoding::encode(redirect)));
        }
        if params.is_empty() {
            LOGIN_PATH.to_owned()
        } else {
            format!("{LOGIN_PATH}?{}", params.join("&"))
        }
    }

    /// Destination after a successful login.
    #[must_use]
    pub fn destination(&self) -> String {
        self.redirect.clone().unwrap_or_else(|| DASHBOARD_PATH.to_owned())
    }
}
