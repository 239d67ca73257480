//! Call dispatcher for the Last.fm web service.
//!
//! Every API call goes through [`LastfmClient::call`]:
//!
//! 1. Inject `api_key`, `format=json` and `method`
//! 2. Classify the method (see [`method`](crate::method))
//! 3. Attach `sk` for authenticated methods, strip it from all others
//! 4. Attach `api_sig` for get-auth and write methods
//! 5. POST the form-encoded parameters to `https://ws.audioscrobbler.com/2.0/`
//! 6. Decode the JSON body
//!
//! # Response format
//!
//! Success bodies are method specific. Failures look like:
//!
//! ```json
//! { "error": 6, "message": "Invalid parameters" }
//! ```
//!
//! Code `9` maps to [`SessionError::InvalidSession`], every other code to
//! [`LastfmError::Api`].

use crate::auth::Credentials;
use crate::error::{INVALID_SESSION_CODE, LastfmError, Result, SessionError};
use crate::method::{MethodKind, classify};
use crate::params::Params;
use crate::signature::sign;
use crate::transport::{HttpTransport, Transport, TransportConfig};
use crate::url::Domain;
use parking_lot::RwLock;
use serde_json::Value;

/// Blocking client for the Last.fm API.
///
/// Holds a [`Transport`] and the application [`Credentials`]. Credentials sit
/// behind a lock and are copied once per call, so the client can be shared
/// across threads while the session key is replaced.
///
/// Typed wrappers live in separate modules (`auth`, `track`, `user`) as
/// `impl LastfmClient` blocks.
pub struct LastfmClient<T = HttpTransport> {
    transport: T,
    endpoint: String,
    credentials: RwLock<Credentials>,
}

impl LastfmClient {
    /// Create a client with the default HTTP transport
    /// (10 s connect timeout, 60 s total).
    pub fn new(credentials: Credentials) -> Result<Self> {
        Self::with_config(credentials, &TransportConfig::default())
    }

    /// Create a client with an HTTP transport built from `config`.
    pub fn with_config(credentials: Credentials, config: &TransportConfig) -> Result<Self> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(credentials, transport))
    }
}

impl<T: Transport> LastfmClient<T> {
    /// Create a client over an arbitrary [`Transport`].
    pub fn with_transport(credentials: Credentials, transport: T) -> Self {
        Self {
            transport,
            endpoint: Domain::WebService.base_url().to_owned(),
            credentials: RwLock::new(credentials),
        }
    }

    /// Post calls to `endpoint` instead of `https://ws.audioscrobbler.com/2.0/`.
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    #[cfg(test)]
    pub(crate) fn transport(&self) -> &T {
        &self.transport
    }

    /// Snapshot of the current credentials.
    pub fn credentials(&self) -> Credentials {
        self.credentials.read().clone()
    }

    pub fn api_key(&self) -> String {
        self.credentials.read().api_key.clone()
    }

    pub fn set_api_key(&self, api_key: impl Into<String>) {
        self.credentials.write().api_key = api_key.into();
    }

    pub fn set_api_secret(&self, api_secret: Option<String>) {
        self.credentials.write().api_secret = api_secret;
    }

    pub fn session_key(&self) -> Option<String> {
        self.credentials.read().session_key.clone()
    }

    /// Replace the stored session key. `None` logs the client out.
    pub fn set_session_key(&self, session_key: Option<String>) {
        self.credentials.write().session_key = session_key;
    }

    /// Call an API method and return the decoded JSON response.
    ///
    /// `method` is the dotted Last.fm name, e.g. `track.getInfo`. `params`
    /// holds the method arguments; `api_key`, `format` and `method` are
    /// overwritten. An explicit `sk` overrides the stored session key for
    /// authenticated methods and is dropped for all others.
    ///
    /// # Errors
    ///
    /// - [`SessionError::MissingSessionKey`] — authenticated method, no key (no request sent)
    /// - [`LastfmError::MissingSecret`] — signed method, no secret (no request sent)
    /// - [`LastfmError::Transport`] — network failure
    /// - [`LastfmError::MalformedResponse`] — body is not JSON
    /// - [`SessionError::InvalidSession`] — server error code 9
    /// - [`LastfmError::Api`] — any other server error
    pub fn call(&self, method: &str, params: Params) -> Result<Value> {
        let kind = classify(method);
        let params = self.prepare(method, kind, params)?;

        tracing::debug!(method, ?kind, signed = kind.needs_signature(), "calling API method");
        let body = self.transport.send(&self.endpoint, &params)?;
        decode(method, &body)
    }

    fn prepare(&self, method: &str, kind: MethodKind, mut params: Params) -> Result<Params> {
        let creds = self.credentials();

        params.insert("api_key", creds.api_key);
        params.insert("format", "json");
        params.insert("method", method);
        params.remove("api_sig");

        if kind.needs_session() {
            if !params.contains_key("sk") {
                if let Some(sk) = creds.session_key {
                    params.insert("sk", sk);
                }
            }
            if params.get("sk").is_none_or(str::is_empty) {
                return Err(SessionError::MissingSessionKey.into());
            }
        } else {
            params.remove("sk");
        }

        if kind.needs_signature() {
            let secret = creds
                .api_secret
                .filter(|s| !s.is_empty())
                .ok_or(LastfmError::MissingSecret)?;
            let sig = sign(&params, &secret);
            params.insert("api_sig", sig);
        }

        Ok(params)
    }
}

/// Decode a response body, turning `{"error": ..}` payloads into errors.
fn decode(method: &str, body: &[u8]) -> Result<Value> {
    let json: Value = serde_json::from_slice(body)
        .map_err(|e| LastfmError::MalformedResponse(format!("{method}: invalid JSON: {e}")))?;

    let Some(error) = json.get("error").filter(|e| !e.is_null()) else {
        return Ok(json);
    };

    let code = error_code(error);
    let message = json
        .get("message")
        .and_then(Value::as_str)
        .unwrap_or("Unknown Error")
        .to_owned();

    if code == INVALID_SESSION_CODE {
        tracing::warn!(method, code, %message, "session rejected by server");
        return Err(SessionError::InvalidSession {
            code,
            message,
            payload: json,
        }
        .into());
    }

    tracing::debug!(method, code, %message, "API returned an error");
    Err(LastfmError::Api {
        code,
        message,
        payload: json,
    })
}

/// Numeric error code; accepts integers, whole floats and numeric strings.
#[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
fn error_code(error: &Value) -> i64 {
    let whole = |f: f64| (f.fract() == 0.0 && f.is_finite()).then_some(f as i64);
    error
        .as_i64()
        .or_else(|| error.as_f64().and_then(whole))
        .or_else(|| {
            let s = error.as_str()?.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(whole))
        })
        .unwrap_or(0)
}
