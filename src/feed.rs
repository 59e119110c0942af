//! The feed container: author identity, ordered metadata comments, and the
//! ordered post list (§3 Feed, §4.5 Feed container).
//!
//! Grounded in `types/lextwt/ast.go`'s `Comments`/`lextwtFile` and
//! `types/lextwt/lextwt.go`'s `ParseFile`: a feed is parsed line by line,
//! comments and posts are bucketed as they're produced, and the author
//! identity is overridden from `nick`/`url`/`twturl` metadata afterwards.

use std::io::Read;

use crate::ast::Post;
use crate::error::{Error, Result};
use crate::format_options::{FeedLookup, FormatOptions};
use crate::parser::{Line, Parser};
use crate::twter::Twter;

/// A single `#`-prefixed metadata line: either a free-form comment (`key`
/// empty) or a `key = value` pair (§3 Comment).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Comment {
    pub key: String,
    pub value: String,
}

impl Comment {
    pub fn new(key: String, value: String) -> Self {
        Comment { key, value }
    }

    pub fn is_nil(&self) -> bool {
        self.key.is_empty() && self.value.is_empty()
    }
}

/// Ordered metadata list with positional and prefix lookups (§6 Info/KV
/// interface). Duplicate keys are allowed; order is preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Comments(pub Vec<Comment>);

impl Comments {
    pub fn push(&mut self, c: Comment) {
        self.0.push(c);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Comment> {
        self.0.iter()
    }

    /// The `n`th comment with the given key, 0-indexed; negative `n` counts
    /// from the end of the matching subsequence.
    pub fn get_nth(&self, key: &str, n: i64) -> Option<&Comment> {
        let matching: Vec<&Comment> = self.0.iter().filter(|c| c.key == key).collect();
        if n >= 0 {
            matching.get(n as usize).copied()
        } else {
            let len = matching.len() as i64;
            let idx = len + n;
            if idx < 0 {
                None
            } else {
                matching.get(idx as usize).copied()
            }
        }
    }

    /// Every comment whose key starts with `prefix` (empty keys never match).
    pub fn get_all(&self, prefix: &str) -> Vec<&Comment> {
        self.0.iter().filter(|c| !c.key.is_empty() && c.key.starts_with(prefix)).collect()
    }

    /// Parses `follow = <nick> <url>` entries. Whitespace-delimited with no
    /// quoting (Open Question (b)): lines with fewer than two fields are
    /// silently dropped.
    pub fn followers(&self) -> Vec<Twter> {
        self.get_all("follow")
            .into_iter()
            .filter_map(|c| {
                let mut parts = c.value.split_whitespace();
                let nick = parts.next()?;
                let url = parts.next()?;
                Some(Twter::new(nick, url))
            })
            .collect()
    }
}

/// Owns the author twter, the ordered comment list, and the post vector
/// (§4.5 Feed container).
#[derive(Debug, Clone)]
pub struct Feed {
    pub twter: Twter,
    pub comments: Comments,
    pub posts: Vec<Post>,
}

impl Feed {
    pub fn new(twter: Twter) -> Self {
        Feed { twter, comments: Comments::default(), posts: Vec::new() }
    }

    /// Resolves every post's bare mentions/tags against `opts`/`lookup`.
    /// Idempotent (P6): re-running with the same capabilities is a no-op.
    pub fn expand_links(&mut self, opts: &dyn FormatOptions, lookup: Option<&dyn FeedLookup>) {
        for post in self.posts.iter_mut() {
            post.expand_links(opts, lookup);
        }
    }
}

/// Reads a feed from any UTF-8 byte source (§6 factory interface
/// `parse_file`). After parsing, the author identity is overridden by
/// `nick`, then `url`, then `twturl` metadata, in that key precedence order;
/// within each key, the latest occurrence wins (§3).
pub fn parse_file<R: Read>(mut reader: R, twter: Twter) -> Result<Feed> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf)?;
    let text = String::from_utf8(buf).map_err(|_| Error::Io("input is not valid UTF-8".into()))?;

    let mut feed = Feed::new(twter.clone());
    let mut parser = Parser::new(&text, twter);

    let mut n_lines = 0usize;
    let mut n_successes = 0usize;
    let mut n_line_errors = 0usize;

    while let Some(line) = parser.parse_line() {
        match line {
            Line::Blank => {}
            Line::Comment(c) => {
                n_lines += 1;
                n_successes += 1;
                feed.comments.push(c);
            }
            Line::Post(Ok(post)) => {
                n_lines += 1;
                n_successes += 1;
                feed.posts.push(post);
            }
            Line::Post(Err(e)) => {
                n_lines += 1;
                n_line_errors += 1;
                tracing::debug!(error = %e, "post line failed to parse");
            }
        }
    }
    let _ = n_line_errors;

    if n_lines > 0 && n_successes == 0 {
        tracing::warn!(n_lines, "erroneous feed detected: every non-blank line failed to parse");
        return Err(Error::InvalidFeed);
    }

    if let Some(v) = feed.comments.get_nth("nick", -1) {
        feed.twter.nick = v.value.clone();
    }
    if let Some(v) = feed.comments.get_nth("url", -1) {
        feed.twter.url = v.value.clone();
    }
    if let Some(v) = feed.comments.get_nth("twturl", -1) {
        feed.twter.url = v.value.clone();
    }

    Ok(feed)
}
