//! Track APIs: scrobbling, now playing, love/unlove and info.
//!
//! # Endpoints
//!
//! ## `track_scrobble` — `track.scrobble` (write: `sk` + `api_sig`)
//!
//! Request: `artist`, `track`, `timestamp` and optional `album`,
//! `albumArtist`, `duration`, `trackNumber`, `mbid`.
//!
//! Response:
//! ```json
//! {
//!   "scrobbles": {
//!     "scrobble": { "track": { "#text": "Believe" }, "ignoredMessage": { "code": "0" } },
//!     "@attr": { "accepted": 1, "ignored": 0 }
//!   }
//! }
//! ```
//!
//! ## `track_love` / `track_unlove` — `track.love` / `track.unlove` (write)
//!
//! Request: `artist`, `track`. Response: `{}`.
//!
//! ## `track_info` — `track.getInfo` (public)
//!
//! Request: `artist`, `track`, optional `username`.
//!
//! Response:
//! ```json
//! {
//!   "track": {
//!     "name": "Believe", "mbid": "", "url": "https://www.last.fm/music/Cher/_/Believe",
//!     "duration": "240000", "listeners": "1000", "playcount": "5000",
//!     "artist": { "name": "Cher" },
//!     "album": { "title": "Believe" },
//!     "userloved": "1"
//!   }
//! }
//! ```

use crate::client::LastfmClient;
use crate::error::Result;
use crate::params::Params;
use crate::transport::Transport;
use crate::types::{NowPlaying, Scrobble, ScrobbleResult, TrackInfo, lenient_u64, opt_str};
use serde_json::Value;

impl<T: Transport> LastfmClient<T> {
    /// Submit one play to the user's profile.
    ///
    /// # Errors
    ///
    /// - [`SessionError::MissingSessionKey`](crate::SessionError::MissingSessionKey) — not logged in
    /// - [`SessionError::InvalidSession`](crate::SessionError::InvalidSession) — session revoked
    pub fn track_scrobble(&self, scrobble: &Scrobble) -> Result<ScrobbleResult> {
        let params = Params::new()
            .with("artist", scrobble.artist.as_str())
            .with("track", scrobble.track.as_str())
            .with("timestamp", scrobble.timestamp.to_string())
            .with_opt("album", scrobble.album.as_deref())
            .with_opt("albumArtist", scrobble.album_artist.as_deref())
            .with_opt("duration", scrobble.duration.map(|d| d.to_string()))
            .with_opt("trackNumber", scrobble.track_number.map(|n| n.to_string()))
            .with_opt("mbid", scrobble.mbid.as_deref());
        let resp = self.call("track.scrobble", params)?;
        let attr = &resp["scrobbles"]["@attr"];
        Ok(ScrobbleResult {
            accepted: lenient_u64(&attr["accepted"]).unwrap_or(0),
            ignored: lenient_u64(&attr["ignored"]).unwrap_or(0),
        })
    }

    /// Tell Last.fm what the user has just started listening to.
    pub fn track_update_now_playing(&self, now: &NowPlaying) -> Result<()> {
        let params = Params::new()
            .with("artist", now.artist.as_str())
            .with("track", now.track.as_str())
            .with_opt("album", now.album.as_deref())
            .with_opt("duration", now.duration.map(|d| d.to_string()));
        self.call("track.updateNowPlaying", params)?;
        Ok(())
    }

    /// Mark a track as loved by the current user.
    pub fn track_love(&self, artist: &str, track: &str) -> Result<()> {
        self.call("track.love", artist_track(artist, track))?;
        Ok(())
    }

    /// Remove a track from the current user's loved tracks.
    pub fn track_unlove(&self, artist: &str, track: &str) -> Result<()> {
        self.call("track.unlove", artist_track(artist, track))?;
        Ok(())
    }

    /// Get track metadata. With `username`, also reports whether that user
    /// loved the track.
    pub fn track_info(&self, artist: &str, track: &str, username: Option<&str>) -> Result<TrackInfo> {
        let params = artist_track(artist, track).with_opt("username", username);
        let resp = self.call("track.getInfo", params)?;
        Ok(parse_track_info(&resp["track"]))
    }
}

fn artist_track(artist: &str, track: &str) -> Params {
    Params::new().with("artist", artist).with("track", track)
}

fn parse_track_info(v: &Value) -> TrackInfo {
    // `artist` is an object in track.getInfo but a bare string in some listings.
    let artist = v["artist"]["name"]
        .as_str()
        .or_else(|| v["artist"].as_str())
        .unwrap_or("")
        .to_owned();
    TrackInfo {
        name: v["name"].as_str().unwrap_or("").to_owned(),
        artist,
        album: opt_str(&v["album"]["title"]),
        mbid: opt_str(&v["mbid"]),
        url: v["url"].as_str().unwrap_or("").to_owned(),
        duration_ms: lenient_u64(&v["duration"]).unwrap_or(0),
        listeners: lenient_u64(&v["listeners"]).unwrap_or(0),
        playcount: lenient_u64(&v["playcount"]).unwrap_or(0),
        user_loved: lenient_u64(&v["userloved"]).map(|n| n != 0),
    }
}
