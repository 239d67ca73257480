//! API method classification.
//!
//! Some methods need a session key (`sk`), some need a request signature
//! (`api_sig`), write methods need both. The table is keyed by lower-cased
//! method name; anything not listed is [`MethodKind::Unknown`] and is sent
//! like a public read call.

use phf::phf_map;

/// How a method must be authenticated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MethodKind {
    /// Plain read call: no `sk`, no `api_sig`.
    Public,
    /// Read call on behalf of a user: sends `sk`, unsigned.
    RequiresAuth,
    /// Used to obtain authentication: signed, never sends `sk`.
    RequiresAuthAndSignature,
    /// Mutating call: sends `sk` and `api_sig`.
    WriteRequiresSignatureAndAuth,
    /// Not in the table. Handled exactly like [`MethodKind::Public`].
    Unknown,
}

impl MethodKind {
    /// Whether the call must carry a session key.
    pub fn needs_session(self) -> bool {
        matches!(self, Self::RequiresAuth | Self::WriteRequiresSignatureAndAuth)
    }

    /// Whether the call must carry an `api_sig`.
    pub fn needs_signature(self) -> bool {
        matches!(
            self,
            Self::RequiresAuthAndSignature | Self::WriteRequiresSignatureAndAuth
        )
    }
}

static METHODS: phf::Map<&'static str, MethodKind> = phf_map! {
    "auth.getmobilesession" => MethodKind::RequiresAuthAndSignature,
    "auth.getsession" => MethodKind::RequiresAuthAndSignature,
    "auth.gettoken" => MethodKind::RequiresAuthAndSignature,
    "album.addtags" => MethodKind::WriteRequiresSignatureAndAuth,
    "album.gettags" => MethodKind::RequiresAuth,
    "album.removetag" => MethodKind::WriteRequiresSignatureAndAuth,
    "album.share" => MethodKind::WriteRequiresSignatureAndAuth,
    "artist.addtags" => MethodKind::WriteRequiresSignatureAndAuth,
    "artist.gettags" => MethodKind::RequiresAuth,
    "artist.removetag" => MethodKind::WriteRequiresSignatureAndAuth,
    "artist.share" => MethodKind::WriteRequiresSignatureAndAuth,
    "artist.shout" => MethodKind::WriteRequiresSignatureAndAuth,
    "event.attend" => MethodKind::WriteRequiresSignatureAndAuth,
    "event.share" => MethodKind::WriteRequiresSignatureAndAuth,
    "event.shout" => MethodKind::WriteRequiresSignatureAndAuth,
    "library.addalbum" => MethodKind::WriteRequiresSignatureAndAuth,
    "library.addartist" => MethodKind::WriteRequiresSignatureAndAuth,
    "library.addtrack" => MethodKind::WriteRequiresSignatureAndAuth,
    "library.removealbum" => MethodKind::WriteRequiresSignatureAndAuth,
    "library.removeartist" => MethodKind::WriteRequiresSignatureAndAuth,
    "library.removescrobble" => MethodKind::WriteRequiresSignatureAndAuth,
    "library.removetrack" => MethodKind::WriteRequiresSignatureAndAuth,
    "playlist.addtrack" => MethodKind::WriteRequiresSignatureAndAuth,
    "playlist.create" => MethodKind::WriteRequiresSignatureAndAuth,
    "radio.getplaylist" => MethodKind::RequiresAuth,
    "radio.tune" => MethodKind::WriteRequiresSignatureAndAuth,
    "track.addtags" => MethodKind::WriteRequiresSignatureAndAuth,
    "track.ban" => MethodKind::WriteRequiresSignatureAndAuth,
    "track.gettags" => MethodKind::RequiresAuth,
    "track.love" => MethodKind::WriteRequiresSignatureAndAuth,
    "track.removetag" => MethodKind::WriteRequiresSignatureAndAuth,
    "track.scrobble" => MethodKind::WriteRequiresSignatureAndAuth,
    "track.share" => MethodKind::WriteRequiresSignatureAndAuth,
    "track.unban" => MethodKind::WriteRequiresSignatureAndAuth,
    "track.unlove" => MethodKind::WriteRequiresSignatureAndAuth,
    "track.updatenowplaying" => MethodKind::WriteRequiresSignatureAndAuth,
    "user.getrecentstations" => MethodKind::RequiresAuth,
    "user.getrecommendedartists" => MethodKind::RequiresAuth,
    "user.getrecommendedevents" => MethodKind::RequiresAuth,
    "user.shout" => MethodKind::WriteRequiresSignatureAndAuth,
};

/// Classify an API method name. Case-insensitive.
pub fn classify(method: &str) -> MethodKind {
    METHODS
        .get(method.to_ascii_lowercase().as_str())
        .copied()
        .unwrap_or(MethodKind::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(classify("Track.Scrobble"), MethodKind::WriteRequiresSignatureAndAuth);
        assert_eq!(classify("track.scrobble"), MethodKind::WriteRequiresSignatureAndAuth);
        assert_eq!(classify("TRACK.SCROBBLE"), MethodKind::WriteRequiresSignatureAndAuth);
    }

    #[test]
    fn get_auth_methods() {
        for m in ["auth.getSession", "auth.getToken", "auth.getMobileSession"] {
            assert_eq!(classify(m), MethodKind::RequiresAuthAndSignature, "{m}");
        }
    }

    #[test]
    fn auth_methods() {
        assert_eq!(classify("radio.getPlaylist"), MethodKind::RequiresAuth);
        assert_eq!(classify("user.getRecommendedArtists"), MethodKind::RequiresAuth);
    }

    #[test]
    fn unknown_methods_fail_open() {
        for m in ["track.getInfo", "user.getLovedTracks", "", "no.such.method"] {
            let kind = classify(m);
            assert_eq!(kind, MethodKind::Unknown, "{m}");
            assert!(!kind.needs_session());
            assert!(!kind.needs_signature());
        }
    }

    #[test]
    fn requirement_flags() {
        assert!(MethodKind::RequiresAuth.needs_session());
        assert!(!MethodKind::RequiresAuth.needs_signature());
        assert!(!MethodKind::RequiresAuthAndSignature.needs_session());
        assert!(MethodKind::RequiresAuthAndSignature.needs_signature());
        assert!(MethodKind::WriteRequiresSignatureAndAuth.needs_session());
        assert!(MethodKind::WriteRequiresSignatureAndAuth.needs_signature());
        assert!(!MethodKind::Public.needs_session());
        assert!(!MethodKind::Public.needs_signature());
    }
}
