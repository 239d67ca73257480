//! Request parameter set.
//!
//! Every API call is a flat string→string map. Keys are kept sorted, which is
//! also the order the signature is computed in.

use std::collections::BTreeMap;

/// Parameters of a single API call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, String>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Builder-style insert that skips `None`.
    #[must_use]
    pub fn with_opt(self, key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    /// Insert or overwrite a value, returning the previous one.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
        self.0.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate in ascending key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Encode as `k1=v1&k2=v2` with percent-encoded keys and values.
    ///
    /// Used for both query strings and `application/x-www-form-urlencoded`
    /// request bodies.
    pub fn to_form_string(&self) -> String {
        self.iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<String>, V: Into<String>, const N: usize> From<[(K, V); N]> for Params {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iterates_sorted() {
        let p = Params::new().with("track", "x").with("artist", "y").with("album", "z");
        let keys: Vec<_> = p.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["album", "artist", "track"]);
    }

    #[test]
    fn insert_overwrites() {
        let mut p = Params::from([("method", "user.getInfo")]);
        assert_eq!(p.insert("method", "track.love").as_deref(), Some("user.getInfo"));
        assert_eq!(p.get("method"), Some("track.love"));
        assert_eq!(p.len(), 1);
    }

    #[test]
    fn with_opt_skips_none() {
        let p = Params::new().with_opt("album", None::<&str>).with_opt("mbid", Some("abc"));
        assert!(!p.contains_key("album"));
        assert_eq!(p.get("mbid"), Some("abc"));
    }

    #[test]
    fn form_string_encodes_values() {
        let p = Params::from([("artist", "Sigur Rós"), ("track", "a&b")]);
        assert_eq!(p.to_form_string(), "artist=Sigur%20R%C3%B3s&track=a%26b");
    }

    #[test]
    fn empty_form_string() {
        assert_eq!(Params::new().to_form_string(), "");
    }
}
