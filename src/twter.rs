//! Feed author identity and its derived fields.

use serde::{Deserialize, Serialize};

/// A feed's author identity: nick, feed URL, and optional presentation fields.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Twter {
    pub nick: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub avatar: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub tagline: String,
}

impl Twter {
    pub fn new(nick: impl Into<String>, url: impl Into<String>) -> Self {
        Twter {
            nick: nick.into(),
            url: url.into(),
            avatar: String::new(),
            tagline: String::new(),
        }
    }

    /// The substring after `@` in the nick if present, else the host component of the URL.
    pub fn domain(&self) -> String {
        if let Some((_, domain)) = self.nick.split_once('@') {
            return domain.to_string();
        }
        host_of(&self.url)
    }

    /// The nick as-is if it already contains `@`, else `nick@host(url)`.
    pub fn domain_nick(&self) -> String {
        if self.nick.contains('@') {
            self.nick.clone()
        } else {
            format!("{}@{}", self.nick, host_of(&self.url))
        }
    }

    pub fn is_zero(&self) -> bool {
        self.nick.is_empty() && self.url.is_empty()
    }
}

/// Extracts the host component from a URL-ish string without needing a full URL
/// crate: strip scheme, then take up to the next `/`, `?`, `#`, or end of string.
pub(crate) fn host_of(url: &str) -> String {
    let after_scheme = match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    };
    let end = after_scheme
        .find(|c| matches!(c, '/' | '?' | '#'))
        .unwrap_or(after_scheme.len());
    after_scheme[..end].to_string()
}

/// Strips a leading `scheme://` from a URL-ish string, if present.
pub(crate) fn strip_scheme(url: &str) -> &str {
    match url.find("://") {
        Some(idx) => &url[idx + 3..],
        None => url,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_from_nick_at_suffix() {
        let t = Twter::new("alice@example.com", "https://example.com/twtxt.txt");
        assert_eq!(t.domain(), "example.com");
    }

    #[test]
    fn domain_from_url_host() {
        let t = Twter::new("alice", "https://example.com/twtxt.txt");
        assert_eq!(t.domain(), "example.com");
    }

    #[test]
    fn domain_nick_builds_from_url_when_nick_has_no_at() {
        let t = Twter::new("alice", "https://example.com/twtxt.txt");
        assert_eq!(t.domain_nick(), "alice@example.com");
    }

    #[test]
    fn domain_nick_passes_through_when_nick_has_at() {
        let t = Twter::new("alice@example.com", "https://example.com/twtxt.txt");
        assert_eq!(t.domain_nick(), "alice@example.com");
    }
}
