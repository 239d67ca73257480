//! HTTP transport.
//!
//! The dispatcher only needs one operation: POST a form-encoded parameter set
//! to a URL and hand back the raw body. Non-2xx statuses are not errors here;
//! Last.fm reports failures in the JSON body.

use crate::error::TransportError;
use crate::params::Params;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;

const DEFAULT_USER_AGENT: &str = concat!("lastfm-rs/", env!("CARGO_PKG_VERSION"));

/// Sends a request and returns the raw response body.
pub trait Transport: Send + Sync {
    fn send(&self, url: &str, params: &Params) -> Result<Vec<u8>, TransportError>;
}

/// Timeouts and identification for [`HttpTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Time allowed to establish the TCP/TLS connection.
    pub connect_timeout: Duration,
    /// Time allowed for the whole exchange.
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            timeout: Duration::from_secs(60),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

/// Blocking [`reqwest`] transport.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http: Client,
}

impl HttpTransport {
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let http = Client::builder()
            .user_agent(config.user_agent.as_str())
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .build()?;
        Ok(Self { http })
    }
}

impl Transport for HttpTransport {
    fn send(&self, url: &str, params: &Params) -> Result<Vec<u8>, TransportError> {
        let resp = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(params.to_form_string())
            .send()?;
        tracing::trace!(status = %resp.status(), "received response");
        Ok(resp.bytes()?.to_vec())
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    #[test]
    fn default_config() {
        let config = TransportConfig::default();
        assert_eq!(config.connect_timeout, Duration::from_secs(10));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert!(config.user_agent.starts_with("lastfm-rs/"));
    }

    #[test]
    fn http_transport_builds() {
        assert!(HttpTransport::new(&TransportConfig::default()).is_ok());
    }

    #[test]
    fn posts_form_encoded_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/2.0/")
                .header("content-type", "application/x-www-form-urlencoded")
                .header_exists("user-agent")
                .body("api_key=K&artist=Sigur%20R%C3%B3s&format=json&method=track.getInfo");
            then.status(200).body(r#"{"track":{}}"#);
        });

        let transport = HttpTransport::new(&TransportConfig::default()).unwrap();
        let params = Params::from([
            ("api_key", "K"),
            ("artist", "Sigur Rós"),
            ("format", "json"),
            ("method", "track.getInfo"),
        ]);
        let body = transport.send(&server.url("/2.0/"), &params).unwrap();
        mock.assert();
        assert_eq!(body, br#"{"track":{}}"#);
    }

    #[test]
    fn error_status_returns_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/2.0/");
            then.status(500).body(r#"{"error":11,"message":"Service Offline"}"#);
        });

        let transport = HttpTransport::new(&TransportConfig::default()).unwrap();
        let body = transport.send(&server.url("/2.0/"), &Params::new()).unwrap();
        assert_eq!(body, br#"{"error":11,"message":"Service Offline"}"#);
    }

    #[test]
    fn refused_connection_is_transport_error() {
        let transport = HttpTransport::new(&TransportConfig::default()).unwrap();
        let err = transport.send("http://127.0.0.1:1/", &Params::new()).unwrap_err();
        assert_eq!(err.code, TransportError::CONNECT);
    }
}
