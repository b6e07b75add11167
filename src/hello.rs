//! Client identification sent with every CDDB command.
//!
//! The protocol requires a plaintext `hello` clause on each request:
//! `<user>+<host>+<client_name>+<client_version>`. Servers use it for
//! abuse tracking only; there is no authentication.
//!
//! Defaults come from the environment once, at construction time, and the
//! resulting [`Hello`] is an immutable value passed into the client. No
//! ambient global lookups happen after that, so a `Hello` can be shared
//! freely across threads.

use serde::{Deserialize, Serialize};

/// Identity fields for the protocol's `hello` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hello {
    /// Local user name (left half of `CDDB_EMAIL`, or the OS login name).
    pub user: String,
    /// Host name (right half of `CDDB_EMAIL`, or the machine's hostname).
    pub host: String,
    /// Name of the submitting client software.
    pub client_name: String,
    /// Version of the submitting client software.
    pub client_version: String,
}

impl Hello {
    /// Create a hello with explicit user and host; client name and version
    /// identify this library.
    pub fn new(user: impl Into<String>, host: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            host: host.into(),
            client_name: env!("CARGO_PKG_NAME").to_string(),
            client_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }

    /// Derive identity from the environment.
    ///
    /// Precedence:
    /// 1. `CDDB_EMAIL` — split on the first `@` into user and host. A value
    ///    without `@` becomes the user with host `localhost`.
    /// 2. `USE_SYSTEM_USER` set to `true` (case-insensitive) — OS login name
    ///    (`USER`/`USERNAME`) and `HOSTNAME`, falling back per field.
    /// 3. Otherwise `unknown`/`localhost`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Override the client name.
    pub fn client_name(mut self, name: impl Into<String>) -> Self {
        self.client_name = name.into();
        self
    }

    /// Override the client version.
    pub fn client_version(mut self, version: impl Into<String>) -> Self {
        self.client_version = version.into();
        self
    }

    /// Render the `hello=` query parameter value.
    pub(crate) fn query_clause(&self) -> String {
        format!(
            "{}+{}+{}+{}",
            self.user, self.host, self.client_name, self.client_version
        )
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(email) = lookup("CDDB_EMAIL") {
            return match email.split_once('@') {
                Some((user, host)) => Self::new(user, host),
                None => Self::new(email, "localhost"),
            };
        }

        let use_system = lookup("USE_SYSTEM_USER")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"));
        if use_system {
            let user = lookup("USER")
                .or_else(|| lookup("USERNAME"))
                .unwrap_or_else(|| "unknown".to_string());
            let host = lookup("HOSTNAME").unwrap_or_else(|| "localhost".to_string());
            return Self::new(user, host);
        }

        Self::new("unknown", "localhost")
    }
}

impl Default for Hello {
    fn default() -> Self {
        Self::from_env()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_email_split_into_user_and_host() {
        let hello = Hello::from_lookup(env(&[("CDDB_EMAIL", "che@debian.org")]));
        assert_eq!(hello.user, "che");
        assert_eq!(hello.host, "debian.org");
    }

    #[test]
    fn test_email_without_at_sign() {
        let hello = Hello::from_lookup(env(&[("CDDB_EMAIL", "che")]));
        assert_eq!(hello.user, "che");
        assert_eq!(hello.host, "localhost");
    }

    #[test]
    fn test_email_takes_precedence_over_system_user() {
        let hello = Hello::from_lookup(env(&[
            ("CDDB_EMAIL", "a@b"),
            ("USE_SYSTEM_USER", "true"),
            ("USER", "ignored"),
        ]));
        assert_eq!(hello.user, "a");
        assert_eq!(hello.host, "b");
    }

    #[test]
    fn test_system_user_fallback() {
        let hello = Hello::from_lookup(env(&[
            ("USE_SYSTEM_USER", "TRUE"),
            ("USER", "alice"),
            ("HOSTNAME", "workstation.example.com"),
        ]));
        assert_eq!(hello.user, "alice");
        assert_eq!(hello.host, "workstation.example.com");
    }

    #[test]
    fn test_system_user_not_affirmative() {
        let hello = Hello::from_lookup(env(&[("USE_SYSTEM_USER", "no"), ("USER", "alice")]));
        assert_eq!(hello.user, "unknown");
        assert_eq!(hello.host, "localhost");
    }

    #[test]
    fn test_no_environment_defaults() {
        let hello = Hello::from_lookup(env(&[]));
        assert_eq!(hello.user, "unknown");
        assert_eq!(hello.host, "localhost");
        assert_eq!(hello.client_name, env!("CARGO_PKG_NAME"));
    }

    #[test]
    fn test_query_clause_joins_with_plus() {
        let hello = Hello::new("che", "debian.org")
            .client_name("ripper")
            .client_version("2.1");
        assert_eq!(hello.query_clause(), "che+debian.org+ripper+2.1");
    }
}
