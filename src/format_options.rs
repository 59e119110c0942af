//! Capability traits consumed by the renderer and by `expand_links`.
//!
//! Kept as plain trait objects rather than generic parameters so that callers
//! (HTTP handlers, CLI, tests) can pass closures-backed or struct-backed
//! implementations interchangeably — no process-wide selector, unlike the
//! reference's `TwtManager` singleton (see `SPEC_FULL.md` Design Notes).

use crate::twter::Twter;

/// Resolves local/external URLs for rendering mentions, tags, and user links.
pub trait FormatOptions {
    fn local_url(&self) -> String;
    fn is_local_url(&self, url: &str) -> bool;
    /// Canonicalizes a `.../twtxt.txt` URL to its user page.
    fn user_url(&self, url: &str) -> String;
    /// Produces a proxy URL for off-pod mentions.
    fn external_url(&self, nick: &str, uri: &str) -> String;
    fn url_for_tag(&self, tag: &str) -> String;
    fn url_for_user(&self, name: &str) -> String;
}

/// Resolves a bare `@nick` mention to a full `nick+URL` mention at ingest time.
pub trait FeedLookup {
    fn lookup(&self, nick: &str) -> Option<Twter>;
}

/// A `FormatOptions` that performs no rewriting; useful for wire/tests.
pub struct NoopFormatOptions;

impl FormatOptions for NoopFormatOptions {
    fn local_url(&self) -> String {
        String::new()
    }
    fn is_local_url(&self, _url: &str) -> bool {
        false
    }
    fn user_url(&self, url: &str) -> String {
        url.to_string()
    }
    fn external_url(&self, _nick: &str, uri: &str) -> String {
        uri.to_string()
    }
    fn url_for_tag(&self, tag: &str) -> String {
        tag.to_string()
    }
    fn url_for_user(&self, name: &str) -> String {
        name.to_string()
    }
}

/// A `FeedLookup` that never resolves anything.
pub struct NoopFeedLookup;

impl FeedLookup for NoopFeedLookup {
    fn lookup(&self, _nick: &str) -> Option<Twter> {
        None
    }
}
