//! Content addressing: the canonical payload, BLAKE2b-256, base32, truncation
//! to 7 characters (§4.5). Grounded in a real twtxt client's use of the same
//! `blake2` + `data-encoding` pairing for this exact purpose.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use chrono::{DateTime, FixedOffset, SecondsFormat};
use data_encoding::BASE32_NOPAD;

type Blake2b256 = Blake2b<U32>;

/// The wire-contract length of a content hash. Part of the format, not tunable.
pub const HASH_LEN: usize = 7;

/// Computes the 7-character content hash of a post from its author URL, its
/// resolved timestamp, and its body literal (I3).
///
/// Payload: `author_url + "\n" + rfc3339(timestamp) + "\n" + body`.
pub fn content_hash(author_url: &str, timestamp: DateTime<FixedOffset>, body: &str) -> String {
    let ts = timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
    let payload = format!("{}\n{}\n{}", author_url, ts, body);

    let mut hasher = Blake2b256::new();
    hasher.update(payload.as_bytes());
    let digest = hasher.finalize();

    let encoded = BASE32_NOPAD.encode(&digest).to_lowercase();
    let start = encoded.len().saturating_sub(HASH_LEN);
    encoded[start..].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn hash_is_seven_chars() {
        let ts = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2016, 2, 3, 23, 5, 0)
            .unwrap();
        let h = content_hash("https://example.com/twtxt.txt", ts, "hello");
        assert_eq!(h.len(), HASH_LEN);
    }

    #[test]
    fn hash_is_deterministic() {
        let ts = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2016, 2, 3, 23, 5, 0)
            .unwrap();
        let a = content_hash("https://example.com/twtxt.txt", ts, "hello");
        let b = content_hash("https://example.com/twtxt.txt", ts, "hello");
        assert_eq!(a, b);
    }

    #[test]
    fn hash_changes_with_body() {
        let ts = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2016, 2, 3, 23, 5, 0)
            .unwrap();
        let a = content_hash("https://example.com/twtxt.txt", ts, "hello");
        let b = content_hash("https://example.com/twtxt.txt", ts, "goodbye");
        assert_ne!(a, b);
    }
}
