//! User profile APIs.
//!
//! ## `user_info` — `user.getInfo` (public)
//!
//! Request: `{ user }`.
//!
//! Response:
//! ```json
//! {
//!   "user": {
//!     "name": "alice", "realname": "Alice", "url": "https://www.last.fm/user/alice",
//!     "country": "Poland", "playcount": "12345",
//!     "registered": { "unixtime": "1200000000", "#text": 1200000000 }
//!   }
//! }
//! ```
//!
//! ## `user_loved_tracks` — `user.getLovedTracks` (public)
//!
//! Request: `{ user, limit }`. `lovedtracks.track` is an array, or a bare
//! object when exactly one track matches.

use crate::client::LastfmClient;
use crate::error::Result;
use crate::params::Params;
use crate::transport::Transport;
use crate::types::{LovedTrack, UserProfile, as_list, lenient_i64, lenient_u64, opt_str};

impl<T: Transport> LastfmClient<T> {
    /// Get a user's public profile.
    ///
    /// `user.getInfo` is unclassified, so no `sk` is sent and the name is
    /// always required.
    pub fn user_info(&self, user: &str) -> Result<UserProfile> {
        let resp = self.call("user.getInfo", Params::new().with("user", user))?;
        let u = &resp["user"];
        Ok(UserProfile {
            name: u["name"].as_str().unwrap_or("").to_owned(),
            real_name: opt_str(&u["realname"]),
            url: u["url"].as_str().unwrap_or("").to_owned(),
            country: opt_str(&u["country"]).filter(|c| *c != "None"),
            playcount: lenient_u64(&u["playcount"]).unwrap_or(0),
            registered: lenient_i64(&u["registered"]["unixtime"])
                .or_else(|| lenient_i64(&u["registered"]["#text"])),
        })
    }

    /// Get the most recently loved tracks of a user.
    pub fn user_loved_tracks(&self, user: &str, limit: u32) -> Result<Vec<LovedTrack>> {
        let params = Params::new()
            .with("user", user)
            .with("limit", limit.to_string());
        let resp = self.call("user.getLovedTracks", params)?;
        Ok(as_list(&resp["lovedtracks"]["track"])
            .into_iter()
            .map(|t| LovedTrack {
                name: t["name"].as_str().unwrap_or("").to_owned(),
                artist: t["artist"]["name"].as_str().unwrap_or("").to_owned(),
                url: t["url"].as_str().unwrap_or("").to_owned(),
                loved_at: lenient_i64(&t["date"]["uts"]),
            })
            .collect())
    }
}
