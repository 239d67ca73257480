//! Data types for Last.fm API requests and responses.
//!
//! Last.fm's JSON encodes most numbers as strings (`"playcount": "1234"`);
//! the parsers in `track` and `user` accept both forms.

use serde_json::Value;

/// Result of a successful token → session exchange.
///
/// Returned by [`LastfmClient::fetch_session`](crate::LastfmClient::fetch_session).
///
/// API JSON path: `response.session` with fields `name`, `key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInfo {
    /// Display name of the user who authorized the application.
    pub name: String,
    /// Session key (`sk`) for authenticated calls.
    pub key: String,
}

/// A single play to submit via `track.scrobble`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scrobble {
    pub artist: String,
    pub track: String,
    /// Unix time (UTC) the track started playing.
    pub timestamp: i64,
    pub album: Option<String>,
    pub album_artist: Option<String>,
    /// Track length in seconds.
    pub duration: Option<u32>,
    pub track_number: Option<u32>,
    pub mbid: Option<String>,
}

impl Scrobble {
    pub fn new(artist: impl Into<String>, track: impl Into<String>, timestamp: i64) -> Self {
        Self {
            artist: artist.into(),
            track: track.into(),
            timestamp,
            album: None,
            album_artist: None,
            duration: None,
            track_number: None,
            mbid: None,
        }
    }
}

/// The track currently playing, for `track.updateNowPlaying`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NowPlaying {
    pub artist: String,
    pub track: String,
    pub album: Option<String>,
    /// Track length in seconds.
    pub duration: Option<u32>,
}

/// Server verdict for a scrobble submission.
///
/// API JSON path: `response.scrobbles["@attr"]` with `accepted`, `ignored`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrobbleResult {
    pub accepted: u64,
    pub ignored: u64,
}

/// Track metadata returned by `track.getInfo`.
///
/// API JSON path: `response.track` with fields `name`, `mbid`, `url`,
/// `duration` (milliseconds), `listeners`, `playcount`, `artist.name`,
/// `album.title`, `userloved`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub name: String,
    pub artist: String,
    pub album: Option<String>,
    pub mbid: Option<String>,
    pub url: String,
    /// Duration in milliseconds (0 when unknown).
    pub duration_ms: u64,
    pub listeners: u64,
    pub playcount: u64,
    /// Only present when the request named a `username`.
    pub user_loved: Option<bool>,
}

/// Public profile returned by `user.getInfo`.
///
/// API JSON path: `response.user` with `name`, `realname`, `url`,
/// `country`, `playcount`, `registered.unixtime`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub name: String,
    pub real_name: Option<String>,
    pub url: String,
    pub country: Option<String>,
    pub playcount: u64,
    /// Unix time of registration.
    pub registered: Option<i64>,
}

/// One entry of `user.getLovedTracks`.
///
/// API JSON path: `response.lovedtracks.track[]` with `name`, `url`,
/// `artist.name`, `date.uts`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LovedTrack {
    pub name: String,
    pub artist: String,
    pub url: String,
    /// Unix time the track was loved.
    pub loved_at: Option<i64>,
}

/// Read a number that may be encoded as a JSON number or a numeric string.
pub(crate) fn lenient_u64(v: &Value) -> Option<u64> {
    v.as_u64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}

pub(crate) fn lenient_i64(v: &Value) -> Option<i64> {
    v.as_i64().or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
}

/// Non-empty string field, `None` for missing, null or `""`.
pub(crate) fn opt_str(v: &Value) -> Option<String> {
    v.as_str().filter(|s| !s.is_empty()).map(String::from)
}

/// Last.fm collapses one-element lists into a bare object.
pub(crate) fn as_list(v: &Value) -> Vec<&Value> {
    match v {
        Value::Array(items) => items.iter().collect(),
        Value::Object(_) => vec![v],
        _ => Vec::new(),
    }
}
