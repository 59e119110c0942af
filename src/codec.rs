//! Per-call codec selection (§9 Design Notes "Global parse-engine
//! selector"). The reference keeps a process-wide "twt manager" singleton
//! chosen by configuration (`lextwt` vs `retwt`); this crate has no
//! process-wide state, so the choice is a trait object a caller picks per
//! call instead.

use crate::error::Result;
use crate::twter::Twter;

/// Computes a post's content hash from one wire-form line.
pub trait FeedCodec {
    fn hash_line(&self, line: &str, twter: Twter) -> Result<Option<String>>;
}

/// The production codec: the hand-written lexer and recursive-descent parser.
pub struct LexParseCodec;

impl FeedCodec for LexParseCodec {
    fn hash_line(&self, line: &str, twter: Twter) -> Result<Option<String>> {
        Ok(crate::parser::parse_line(line, twter)?.map(|p| p.hash().to_string()))
    }
}

/// The regex-based reference codec, available only where [`crate::oracle`] is
/// compiled.
#[cfg(any(test, feature = "oracle"))]
pub struct OracleCodec;

#[cfg(any(test, feature = "oracle"))]
impl FeedCodec for OracleCodec {
    fn hash_line(&self, line: &str, twter: Twter) -> Result<Option<String>> {
        Ok(crate::oracle::parse_line(line, twter)?.map(|t| t.hash()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn both_codecs_agree_on_hash_p3() {
        let twter = Twter::new("example", "https://example.com/twtxt.txt");
        let line = "2016-02-03T23:05:00Z\thello";
        let a = LexParseCodec.hash_line(line, twter.clone()).unwrap();
        let b = OracleCodec.hash_line(line, twter).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn blank_line_yields_no_hash_for_either_codec() {
        let twter = Twter::new("example", "https://example.com/twtxt.txt");
        assert_eq!(LexParseCodec.hash_line("", twter.clone()).unwrap(), None);
        assert_eq!(OracleCodec.hash_line("", twter).unwrap(), None);
    }
}
