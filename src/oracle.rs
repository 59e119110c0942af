//! Regex-based reference oracle (§9 Design Notes "Regex reference"),
//! grounded in `types/retwt/retwt.go`. Compiled only for tests or when the
//! `oracle` cargo feature is enabled — it is never a build dependency of
//! the library's correctness. Its sole required property is P3: for any
//! post line it accepts, its [`OracleTwt::hash`] equals the lexer/parser
//! implementation's `Post::hash()`.
//!
//! Unlike the hand-written tokenizer in [`crate::lexer`], this module
//! splits a line on its first run of whitespace and treats everything after
//! it as the post body verbatim — no element tree, no speculative parses.

use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};
use regex::Regex;

use crate::error::{Error, Result};
use crate::hash::content_hash;
use crate::twter::Twter;

fn line_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(.+?)(\s+)(.+)$").unwrap())
}

fn timestamp_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(?P<y>\d{4})-(?P<mo>\d{2})-(?P<d>\d{2})T(?P<h>\d{2}):(?P<mi>\d{2})(?::(?P<s>\d{2})(?:\.(?P<frac>\d+))?)?(?:(?P<z>Z)|(?P<sign>[+-])(?P<tzh>\d+)(?::(?P<tzm>\d+))?)?$",
        )
        .unwrap()
    })
}

/// A minimal reference post: just enough structure to compute a content
/// hash and compare it against the lexer/parser implementation's (P3).
#[derive(Debug, Clone)]
pub struct OracleTwt {
    pub twter: Twter,
    pub created: DateTime<FixedOffset>,
    pub text: String,
}

impl OracleTwt {
    pub fn hash(&self) -> String {
        content_hash(&self.twter.url, self.created, &self.text)
    }
}

fn parse_fraction(digits: &str) -> u32 {
    let mut s = digits.to_string();
    if s.len() > 9 {
        s.truncate(9);
    } else {
        s.push_str(&"0".repeat(9 - s.len()));
    }
    s.parse().unwrap_or(0)
}

/// Parses a timestamp with the same tolerances as [`crate::parser`]'s
/// hand-written recursive-descent version (missing seconds default to 0,
/// missing zone defaults to UTC, a timezone hour >= 24 is reinterpreted as
/// `HHMM`), but driven by a single regex instead of token-by-token lookahead.
fn parse_timestamp(raw: &str) -> Result<DateTime<FixedOffset>> {
    let caps = timestamp_re()
        .captures(raw)
        .ok_or_else(|| Error::InvalidTwtLine(raw.to_string()))?;

    let get = |name: &str| -> i64 { caps.name(name).map(|m| m.as_str().parse().unwrap_or(0)).unwrap_or(0) };
    let year = get("y");
    let month = get("mo");
    let day = get("d");
    let hour = get("h");
    let minute = get("mi");
    let second = caps.name("s").map(|m| m.as_str().parse().unwrap_or(0)).unwrap_or(0);
    let nanos = caps.name("frac").map(|m| parse_fraction(m.as_str())).unwrap_or(0);

    let (tz_h, tz_m): (i64, i64) = if caps.name("z").is_some() {
        (0, 0)
    } else if let Some(sign_m) = caps.name("sign") {
        let sign: i64 = if sign_m.as_str() == "-" { -1 } else { 1 };
        let mut tzh: i64 = caps.name("tzh").map(|m| m.as_str().parse().unwrap_or(0)).unwrap_or(0);
        let mut tzm: i64 = caps.name("tzm").map(|m| m.as_str().parse().unwrap_or(0)).unwrap_or(0);
        if tzh >= 24 {
            tzm = tzh % 100;
            tzh /= 100;
        }
        (sign * tzh, sign * tzm)
    } else {
        (0, 0)
    };

    let offset_secs = (tz_h * 3600 + tz_m * 60) as i32;
    let offset = FixedOffset::east_opt(offset_secs)
        .ok_or_else(|| Error::InvalidTwtLine("timezone offset out of range".into()))?;
    let naive = NaiveDate::from_ymd_opt(year as i32, month as u32, day as u32)
        .and_then(|d| d.and_hms_nano_opt(hour as u32, minute as u32, second as u32, nanos))
        .ok_or_else(|| Error::InvalidTwtLine("invalid date/time fields".into()))?;
    offset
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(|| Error::InvalidTwtLine("ambiguous local time".into()))
}

/// Parses one line the way `retwt.ParseLine` does: split on the first run of
/// whitespace into a timestamp and a body, with no further structure.
/// Comment lines and empty input yield `Ok(None)`.
pub fn parse_line(line: &str, twter: Twter) -> Result<Option<OracleTwt>> {
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let caps = line_re().captures(line).ok_or_else(|| Error::InvalidTwtLine(line.to_string()))?;
    let created = parse_timestamp(&caps[1])?;
    let text = caps[3].to_string();
    Ok(Some(OracleTwt { twter, created, text }))
}
