//! JSON encode/decode for a single post (§6 "JSON form of a post").
//!
//! Grounded in `types/lextwt/ast.go`'s `Twt.MarshalJSON`/`DecodeJSON`: the
//! wire document carries both the minimal fields needed to reconstruct a
//! post (`twter`, `text`, `created`, `hash`) and a set of fields derived
//! purely for the benefit of API consumers (`markdownText`, `tags`,
//! `subject`, `mentions`, `links`). Decoding only ever reads the former;
//! the rest is recomputed by the parser.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::ast::{Format, Post};
use crate::error::{Error, Result};
use crate::format_options::FormatOptions;
use crate::parser;
use crate::render::render_post;
use crate::twter::Twter;

#[derive(Debug, Serialize)]
struct PostDoc {
    twter: Twter,
    text: String,
    created: DateTime<FixedOffset>,
    #[serde(rename = "markdownText")]
    markdown_text: String,
    hash: String,
    tags: Vec<String>,
    subject: String,
    mentions: Vec<String>,
    links: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PostDocDecode {
    twter: Twter,
    text: String,
    created: DateTime<FixedOffset>,
    #[serde(default)]
    hash: String,
}

/// The `@nick`/`@<nick url>` string a post's mention list exposes via JSON.
fn mention_string(m: &crate::ast::Mention) -> String {
    if m.target.is_empty() {
        format!("@{}", m.name)
    } else {
        format!("@<{} {}>", m.name, m.target)
    }
}

/// Encodes `post` to its JSON wire form. Derived fields (`text`,
/// `markdownText`, `hash`, `tags`, `subject`, `mentions`, `links`) are
/// recomputed from the AST; `opts` drives the text/markdown renderings.
pub fn encode_json(post: &Post, opts: &dyn FormatOptions) -> Result<String> {
    let doc = PostDoc {
        twter: post.author.clone(),
        text: render_post(post, Format::Text, opts),
        created: post.timestamp,
        markdown_text: render_post(post, Format::Markdown, opts),
        hash: post.hash().to_string(),
        tags: post.tags.clone(),
        subject: post.subject_or_default().literal.clone(),
        mentions: post.mentions.iter().map(mention_string).collect(),
        links: post.links.clone(),
    };
    serde_json::to_string(&doc).map_err(|e| Error::Io(e.to_string()))
}

/// Decodes a post from its JSON wire form (§6 factory interface
/// `decode_json`). Only `twter`, `text`, `created`, and `hash` are read;
/// everything else is derived by re-parsing `text` as a post body.
pub fn decode_json(bytes: &[u8]) -> Result<Post> {
    let doc: PostDocDecode = serde_json::from_slice(bytes).map_err(|e| Error::Io(e.to_string()))?;
    let elements = parser::parse_text(&doc.text)?;
    let mut post = Post::new(doc.twter, doc.created);
    for e in elements {
        post.push(e);
    }
    if !doc.hash.is_empty() {
        post.set_cached_hash(doc.hash);
    }
    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format_options::NoopFormatOptions;

    fn twter() -> Twter {
        Twter::new("example", "https://example.com/twtxt.txt")
    }

    #[test]
    fn round_trips_minimal_post() {
        let post = parser::parse_line("2016-02-03T23:05:00Z\thello", twter()).unwrap().unwrap();
        let encoded = encode_json(&post, &NoopFormatOptions).unwrap();
        let decoded = decode_json(encoded.as_bytes()).unwrap();
        assert_eq!(decoded.body_literal(), "hello");
        assert_eq!(decoded.hash(), post.hash());
    }

    #[test]
    fn decode_ignores_derived_fields() {
        let json = r#"{"twter":{"nick":"example","url":"https://example.com/twtxt.txt"},
            "text":"hello","created":"2016-02-03T23:05:00Z","hash":"zzzzzzz",
            "markdownText":"ignored","tags":["ignored"],"subject":"ignored",
            "mentions":["ignored"],"links":["ignored"]}"#;
        let post = decode_json(json.as_bytes()).unwrap();
        assert_eq!(post.body_literal(), "hello");
        assert_eq!(post.hash(), "zzzzzzz");
    }

    #[test]
    fn subject_field_falls_back_to_hash_tag() {
        let post = parser::parse_line("2016-02-03T23:05:00Z\thello", twter()).unwrap().unwrap();
        let encoded = encode_json(&post, &NoopFormatOptions).unwrap();
        let value: serde_json::Value = serde_json::from_str(&encoded).unwrap();
        assert_eq!(value["subject"], format!("(#{})", post.hash()));
    }
}
