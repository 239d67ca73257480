//! Last.fm web service API client library.
//!
//! Provides signed and session-authenticated access to the Last.fm 2.0 API
//! (`https://ws.audioscrobbler.com/2.0/`). Every method goes through one
//! entry point, [`LastfmClient::call`]; the typed helpers are thin wrappers
//! over it.
//!
//! # Authentication
//!
//! Read methods only need an API key. Methods acting on behalf of a user need
//! a session key, obtained once by exchanging a browser-granted token:
//!
//! ```no_run
//! use lastfm_api::{Credentials, LastfmClient};
//!
//! let client = LastfmClient::new(Credentials::new("API_KEY").with_secret("API_SECRET"))?;
//!
//! // 1. Send the user here; Last.fm redirects back with ?token=...
//! println!("{}", client.login_url(Some("https://example.com/callback")));
//!
//! // 2. Exchange the token. The session key is stored on the client.
//! let session = client.fetch_session("TOKEN")?;
//! println!("logged in as {}", session.name);
//!
//! // 3. Authenticated, signed calls now work.
//! client.track_love("Cher", "Believe")?;
//! # Ok::<(), lastfm_api::LastfmError>(())
//! ```
//!
//! # Method classes
//!
//! | Class                                   | `sk` | `api_sig` | Examples                         |
//! |-----------------------------------------|------|-----------|----------------------------------|
//! | [`MethodKind::RequiresAuthAndSignature`]| no   | yes       | `auth.getSession`, `auth.getToken` |
//! | [`MethodKind::RequiresAuth`]            | yes  | no        | `radio.getPlaylist`              |
//! | [`MethodKind::WriteRequiresSignatureAndAuth`] | yes | yes  | `track.scrobble`, `track.love`   |
//! | [`MethodKind::Public`] / [`MethodKind::Unknown`] | no | no | `track.getInfo`, anything unlisted |
//!
//! # Typed helpers
//!
//! | Method                                       | API method              |
//! |----------------------------------------------|-------------------------|
//! | [`LastfmClient::fetch_token`]                | `auth.getToken`         |
//! | [`LastfmClient::fetch_session`]              | `auth.getSession`       |
//! | [`LastfmClient::track_scrobble`]             | `track.scrobble`        |
//! | [`LastfmClient::track_update_now_playing`]   | `track.updateNowPlaying`|
//! | [`LastfmClient::track_love`]                 | `track.love`            |
//! | [`LastfmClient::track_unlove`]               | `track.unlove`          |
//! | [`LastfmClient::track_info`]                 | `track.getInfo`         |
//! | [`LastfmClient::user_info`]                  | `user.getInfo`          |
//! | [`LastfmClient::user_loved_tracks`]          | `user.getLovedTracks`   |

pub mod auth;
pub mod client;
pub mod error;
pub mod method;
pub mod params;
pub mod signature;
mod track;
pub mod transport;
pub mod types;
pub mod url;
mod user;

pub use auth::Credentials;
pub use client::LastfmClient;
pub use error::{LastfmError, Result, SessionError, TransportError};
pub use method::{MethodKind, classify};
pub use params::Params;
pub use transport::{HttpTransport, Transport, TransportConfig};
pub use types::SessionInfo;
