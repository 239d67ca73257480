//! Endpoint URL composition.
//!
//! | Domain                 | Base URL                              |
//! |------------------------|---------------------------------------|
//! | [`Domain::Www`]        | `https://www.last.fm/`                |
//! | [`Domain::WebService`] | `https://ws.audioscrobbler.com/2.0/`  |

use crate::params::Params;

/// A Last.fm host the client knows how to address.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    /// The user-facing website (login page).
    Www,
    /// The API endpoint every call is posted to.
    WebService,
}

impl Domain {
    /// Base URL, always ending in `/`.
    pub fn base_url(self) -> &'static str {
        match self {
            Self::Www => "https://www.last.fm/",
            Self::WebService => "https://ws.audioscrobbler.com/2.0/",
        }
    }
}

/// Build a URL on `domain` with an optional `path` and query `params`.
///
/// One leading `/` on `path` is dropped since the base already ends in one.
pub fn build_url(domain: Domain, path: &str, params: &Params) -> String {
    let mut url = domain.base_url().to_owned();
    url.push_str(path.strip_prefix('/').unwrap_or(path));
    if !params.is_empty() {
        url.push('?');
        url.push_str(&params.to_form_string());
    }
    url
}

/// URL of the page where a user grants the application access.
///
/// After approval Last.fm redirects to `callback` (or the callback configured
/// for the API key) with a `token` query parameter, which is then exchanged
/// via [`LastfmClient::fetch_session`](crate::LastfmClient::fetch_session).
pub fn login_url(api_key: &str, callback: Option<&str>) -> String {
    let params = Params::new()
        .with("api_key", api_key)
        .with_opt("cb", callback.filter(|cb| !cb.is_empty()));
    build_url(Domain::Www, "api/auth", &params)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_url_with_callback() {
        let url = login_url("KEY1", Some("http://example.com/cb"));
        assert_eq!(
            url,
            "https://www.last.fm/api/auth?api_key=KEY1&cb=http%3A%2F%2Fexample.com%2Fcb"
        );
    }

    #[test]
    fn login_url_without_callback() {
        assert_eq!(login_url("KEY1", None), "https://www.last.fm/api/auth?api_key=KEY1");
        assert_eq!(login_url("KEY1", Some("")), "https://www.last.fm/api/auth?api_key=KEY1");
    }

    #[test]
    fn leading_slash_is_normalized() {
        let p = Params::new();
        assert_eq!(build_url(Domain::Www, "/api/auth", &p), "https://www.last.fm/api/auth");
        assert_eq!(build_url(Domain::Www, "api/auth", &p), "https://www.last.fm/api/auth");
    }

    #[test]
    fn bare_endpoint() {
        assert_eq!(
            build_url(Domain::WebService, "", &Params::new()),
            "https://ws.audioscrobbler.com/2.0/"
        );
    }

    #[test]
    fn query_is_encoded() {
        let p = Params::from([("user", "rj"), ("q", "a b")]);
        assert_eq!(
            build_url(Domain::WebService, "", &p),
            "https://ws.audioscrobbler.com/2.0/?q=a%20b&user=rj"
        );
    }
}
