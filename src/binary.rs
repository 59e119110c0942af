//! Tab-separated binary form of a post, for persistent caches (§6 "Binary
//! form of a post"). Grounded in `types/lextwt/ast.go`'s
//! `Twt.GobEncode`/`GobDecode`: five tab-separated fields, the last of which
//! is the post's full wire literal (and may itself contain the post's own
//! tab and embedded line separators).

use crate::ast::Post;
use crate::error::{Error, Result};
use crate::parser;
use crate::twter::Twter;

/// Encodes `post` as `nick \t url \t avatar \t hash \t wire-literal`.
pub fn encode_binary(post: &Post) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        post.author.nick,
        post.author.url,
        post.author.avatar,
        post.hash(),
        post.wire_literal()
    )
}

/// Decodes a record produced by [`encode_binary`], re-parsing the wire
/// literal and attaching the decoded hash without recomputing it.
pub fn decode_binary(data: &str) -> Result<Post> {
    let mut parts = data.splitn(5, '\t');
    let nick = parts.next().ok_or_else(|| Error::InvalidTwtLine(data.to_string()))?;
    let url = parts.next().ok_or_else(|| Error::InvalidTwtLine(data.to_string()))?;
    let avatar = parts.next().ok_or_else(|| Error::InvalidTwtLine(data.to_string()))?;
    let hash = parts.next().ok_or_else(|| Error::InvalidTwtLine(data.to_string()))?;
    let literal = parts.next().ok_or_else(|| Error::InvalidTwtLine(data.to_string()))?;

    let twter = Twter { nick: nick.to_string(), url: url.to_string(), avatar: avatar.to_string(), tagline: String::new() };
    let line = literal.trim_end_matches('\n');
    let post = parser::parse_line(line, twter)?.ok_or_else(|| Error::InvalidTwtLine(data.to_string()))?;
    post.set_cached_hash(hash.to_string());
    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn twter() -> Twter {
        Twter::new("example", "https://example.com/twtxt.txt")
    }

    #[test]
    fn round_trips_through_binary_form() {
        let post = parser::parse_line("2016-02-03T23:05:00Z\thello", twter()).unwrap().unwrap();
        let encoded = encode_binary(&post);
        let decoded = decode_binary(&encoded).unwrap();
        assert_eq!(decoded.body_literal(), "hello");
        assert_eq!(decoded.hash(), post.hash());
        assert_eq!(decoded.author.nick, "example");
    }

    #[test]
    fn decode_attaches_hash_without_recomputing() {
        let post = parser::parse_line("2016-02-03T23:05:00Z\thello", twter()).unwrap().unwrap();
        let real_hash = post.hash().to_string();
        let mut encoded = encode_binary(&post);
        encoded = encoded.replacen(&real_hash, "wronghsh", 1);
        let decoded = decode_binary(&encoded).unwrap();
        assert_eq!(decoded.hash(), "wronghsh");
    }
}
