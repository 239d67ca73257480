//! Application credentials and the token → session exchange.
//!
//! Web flow:
//!
//! 1. Send the user to [`LastfmClient::login_url`]
//! 2. Last.fm redirects back with `?token=<token>`
//! 3. [`LastfmClient::fetch_session`] exchanges the token for a session key
//!    (`auth.getSession`, signed) and stores it on the client
//!
//! Desktop applications without a callback can obtain the token up front with
//! [`LastfmClient::fetch_token`] (`auth.getToken`) and append it to the login
//! URL as `&token=<token>`.
//!
//! `auth.getSession` response:
//!
//! ```json
//! { "session": { "name": "alice", "key": "d580d57f32848f5dcf574d1ce18d78b2", "subscriber": 0 } }
//! ```
//!
//! Session keys do not expire on their own; they become invalid (error `9`)
//! when the user revokes access.

use crate::client::LastfmClient;
use crate::error::{LastfmError, Result};
use crate::params::Params;
use crate::transport::Transport;
use crate::types::SessionInfo;
use crate::url;
use serde_json::Value;
use std::fmt;

/// API key, shared secret and user session key.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    /// The application API key. Sent with every call.
    pub api_key: String,
    /// The shared secret. Needed for signed methods only.
    pub api_secret: Option<String>,
    /// The user's session key. Needed for authenticated methods only.
    pub session_key: Option<String>,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_secret(mut self, api_secret: impl Into<String>) -> Self {
        self.api_secret = Some(api_secret.into());
        self
    }

    #[must_use]
    pub fn with_session_key(mut self, session_key: impl Into<String>) -> Self {
        self.session_key = Some(session_key.into());
        self
    }

    /// Whether a non-empty session key is present (does not validate it).
    pub fn is_logged_in(&self) -> bool {
        self.session_key.as_ref().is_some_and(|sk| !sk.is_empty())
    }
}

// Secrets stay out of logs.
impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("api_secret", &self.api_secret.as_ref().map(|_| "<redacted>"))
            .field("session_key", &self.session_key.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl<T: Transport> LastfmClient<T> {
    /// URL of the page where the user authorizes this application.
    pub fn login_url(&self, callback: Option<&str>) -> String {
        url::login_url(&self.api_key(), callback)
    }

    /// Exchange an authorization `token` for a session key.
    ///
    /// On success the session key is stored on the client and used by every
    /// later authenticated call.
    ///
    /// # Errors
    ///
    /// - [`LastfmError::MissingSecret`] — no API secret configured
    /// - [`LastfmError::Api`] with code 14/15 — token not authorized or expired
    /// - [`LastfmError::MalformedResponse`] — `session.name`/`session.key` missing
    pub fn fetch_session(&self, token: &str) -> Result<SessionInfo> {
        let resp = self.call("auth.getSession", Params::new().with("token", token))?;
        let session = &resp["session"];
        let info = SessionInfo {
            name: required_str(session, "name", "session.name")?,
            key: required_str(session, "key", "session.key")?,
        };
        self.set_session_key(Some(info.key.clone()));
        tracing::info!(user = %info.name, "session established");
        Ok(info)
    }

    /// Request an unauthorized token for the desktop auth flow.
    pub fn fetch_token(&self) -> Result<String> {
        let resp = self.call("auth.getToken", Params::new())?;
        required_str(&resp, "token", "token")
    }
}

fn required_str(v: &Value, key: &str, path: &str) -> Result<String> {
    v.get(key)
        .and_then(Value::as_str)
        .map(String::from)
        .ok_or_else(|| LastfmError::MalformedResponse(format!("missing `{path}` in response")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SessionError;
    use crate::transport::mock::MockTransport;

    fn client(transport: MockTransport) -> LastfmClient<MockTransport> {
        LastfmClient::with_transport(Credentials::new("KEY1").with_secret("S3CRET"), transport)
    }

    #[test]
    fn fetch_session_stores_key() {
        let mock = MockTransport::new().respond(r#"{"session":{"name":"alice","key":"sk-abc"}}"#);
        let c = client(mock);
        let info = c.fetch_session("tok123").unwrap();
        assert_eq!(info.name, "alice");
        assert_eq!(info.key, "sk-abc");
        assert_eq!(c.session_key().as_deref(), Some("sk-abc"));
    }

    #[test]
    fn stored_session_is_used_afterwards() {
        let mock = MockTransport::new()
            .respond(r#"{"session":{"name":"alice","key":"sk-abc"}}"#)
            .respond("{}");
        let c = client(mock);
        c.fetch_session("tok123").unwrap();
        c.call("track.love", Params::new().with("artist", "a").with("track", "t"))
            .unwrap();
        assert_eq!(c.credentials().session_key.as_deref(), Some("sk-abc"));
    }

    #[test]
    fn fetch_session_missing_fields_is_malformed() {
        let c = client(MockTransport::new().respond(r#"{"session":{"name":"alice"}}"#));
        let err = c.fetch_session("tok123").unwrap_err();
        assert!(matches!(err, LastfmError::MalformedResponse(ref m) if m.contains("session.key")));
        assert_eq!(c.session_key(), None);
    }

    #[test]
    fn fetch_session_api_error_keeps_old_key() {
        let c = LastfmClient::with_transport(
            Credentials::new("KEY1").with_secret("S3CRET").with_session_key("old"),
            MockTransport::new().respond(r#"{"error":14,"message":"Unauthorized Token"}"#),
        );
        let err = c.fetch_session("tok123").unwrap_err();
        assert_eq!(err.api_code(), Some(14));
        assert_eq!(c.session_key().as_deref(), Some("old"));
    }

    #[test]
    fn fetch_session_invalid_session_propagates() {
        let c = client(MockTransport::new().respond(r#"{"error":9,"message":"Invalid session key"}"#));
        let err = c.fetch_session("tok123").unwrap_err();
        assert!(matches!(err, LastfmError::Session(SessionError::InvalidSession { .. })));
    }

    #[test]
    fn fetch_token_returns_token() {
        let c = client(MockTransport::new().respond(r#"{"token":"cf45fe5a3e3cebe168480a086d7fe481"}"#));
        assert_eq!(c.fetch_token().unwrap(), "cf45fe5a3e3cebe168480a086d7fe481");
        let sent = c.transport().last_params();
        assert_eq!(sent.get("method"), Some("auth.getToken"));
        assert!(sent.contains_key("api_sig"));
    }

    #[test]
    fn login_url_uses_api_key() {
        let c = client(MockTransport::new());
        assert_eq!(
            c.login_url(Some("http://example.com/cb")),
            "https://www.last.fm/api/auth?api_key=KEY1&cb=http%3A%2F%2Fexample.com%2Fcb"
        );
    }

    #[test]
    fn debug_redacts_secrets() {
        let creds = Credentials::new("KEY1").with_secret("S3CRET").with_session_key("sk-abc");
        let dbg = format!("{creds:?}");
        assert!(dbg.contains("KEY1"));
        assert!(!dbg.contains("S3CRET"));
        assert!(!dbg.contains("sk-abc"));
    }

    #[test]
    fn logged_in_requires_non_empty_key() {
        assert!(!Credentials::new("k").is_logged_in());
        assert!(!Credentials::new("k").with_session_key("").is_logged_in());
        assert!(Credentials::new("k").with_session_key("sk").is_logged_in());
    }
}
