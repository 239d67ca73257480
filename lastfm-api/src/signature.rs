//! `api_sig` request signing.
//!
//! Flow: sort params by key → drop `format`/`callback` → `key1value1key2value2…`
//! → append shared secret → MD5 over UTF-8 bytes → lowercase hex.
//!
//! Values are signed raw; URL encoding only happens when the request is sent.

use crate::params::Params;
use md5::{Digest, Md5};

/// Keys that are transmitted but never part of the signature base string.
const UNSIGNED_KEYS: [&str; 2] = ["format", "callback"];

/// Compute the `api_sig` for `params` with the application `secret`.
pub fn sign(params: &Params, secret: &str) -> String {
    let mut hasher = Md5::new();
    // Params iterates in ascending byte order of keys.
    for (key, value) in params.iter() {
        if UNSIGNED_KEYS.contains(&key) {
            continue;
        }
        hasher.update(key.as_bytes());
        hasher.update(value.as_bytes());
    }
    hasher.update(secret.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_fixture() {
        let params = Params::from([("a", "1"), ("b", "2")]);
        // md5("a1b2sekrit")
        assert_eq!(sign(&params, "sekrit"), "54aa7a92a96c49657d787551f7626c33");
    }

    #[test]
    fn insertion_order_and_unsigned_keys_do_not_matter() {
        let first = Params::new().with("b", "2").with("a", "1").with("format", "json");
        let second = Params::new().with("a", "1").with("b", "2").with("callback", "x");
        assert_eq!(sign(&first, "secret"), sign(&second, "secret"));
        // md5("a1b2secret")
        assert_eq!(sign(&first, "secret"), "670699129dd49818b5abd9e7c2fd6569");
    }

    #[test]
    fn session_exchange_fixture() {
        let params = Params::from([
            ("api_key", "KEY1"),
            ("format", "json"),
            ("method", "auth.getSession"),
            ("token", "tok123"),
        ]);
        // md5("api_keyKEY1methodauth.getSessiontokentok123S3CRET")
        assert_eq!(sign(&params, "S3CRET"), "cd6f151357d2b4ac48dcf3b750a2d83b");
    }

    #[test]
    fn raw_values_are_signed() {
        let params = Params::from([("caf", "é")]);
        // md5("café" + "s") over UTF-8 bytes, not percent-encoded
        assert_eq!(sign(&params, "s"), "009a6326e83fb6afc18e8b7eeb6d443c");
    }

    #[test]
    fn secret_changes_signature() {
        let params = Params::from([("a", "1")]);
        assert_ne!(sign(&params, "one"), sign(&params, "two"));
        assert_eq!(sign(&params, "one"), sign(&params, "one"));
    }

    #[test]
    fn output_is_lowercase_hex() {
        let sig = sign(&Params::new(), "");
        assert_eq!(sig.len(), 32);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    }
}
