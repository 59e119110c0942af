//! Recursive-descent parser with two-token lookahead and literal-preserving
//! fallback for ambiguous elements (§4.3).
//!
//! There is no lexer-position backtracking: once a token is consumed its
//! literal text is never re-lexed. A failed speculative production instead
//! hands its caller the exact text it consumed so far, which the caller folds
//! into the surrounding `Text` run — this is what the spec's "frame stack"
//! achieves, expressed here as `Result<Element, String>` rather than a stack
//! of buffer-length markers, since the lexer never needs to rewind.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone};

use crate::ast::{Code, CodeKind, Element, Link, LinkKind, Mention, Post, Subject, SubjectInner, Tag};
use crate::error::{Error, Result};
use crate::lexer::{Lexer, Token, TokenKind};
use crate::twter::Twter;

/// One parsed line of a feed: blank, a metadata comment, or a dated post.
pub enum Line {
    Blank,
    Comment(crate::feed::Comment),
    Post(Result<Post>),
}

pub struct Parser {
    lexer: Lexer,
    cur: Token,
    peek: Token,
    twter: Twter,
    errors: Vec<Error>,
}

impl Parser {
    pub fn new(input: &str, twter: Twter) -> Self {
        let mut lexer = Lexer::new(input);
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Parser { lexer, cur, peek, twter, errors: Vec::new() }
    }

    /// A parser over a standalone post body, with no date-mode/comment-mode
    /// entry at column 0 (used by `make_post`/`parse_text`).
    pub fn new_body(input: &str, twter: Twter) -> Self {
        let mut lexer = Lexer::new_body(input);
        let cur = lexer.next_token();
        let peek = lexer.next_token();
        Parser { lexer, cur, peek, twter, errors: Vec::new() }
    }

    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn is_eof(&self) -> bool {
        self.cur.kind == TokenKind::Eof
    }

    fn bump(&mut self) -> Token {
        let old_cur = std::mem::replace(&mut self.cur, self.peek.clone());
        self.peek = self.lexer.next_token();
        old_cur
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.cur.kind != kind {
            return Err(Error::ParseToken {
                expected: kind,
                actual: self.cur.kind,
                line: self.cur.line,
                col: self.cur.col,
            });
        }
        Ok(self.bump())
    }

    fn expect_number(&mut self) -> Result<i64> {
        let tok = self.expect(TokenKind::Number)?;
        tok.literal
            .parse::<i64>()
            .map_err(|_| Error::InvalidTwtLine(tok.literal))
    }

    /// Parses one line: a blank line, a `#`-prefixed comment, or a dated post.
    pub fn parse_line(&mut self) -> Option<Line> {
        if self.is_eof() {
            return None;
        }
        if self.cur.kind == TokenKind::Nl {
            self.bump();
            return Some(Line::Blank);
        }
        if self.cur.kind == TokenKind::Hash {
            return Some(Line::Comment(self.parse_comment()));
        }
        Some(Line::Post(self.parse_post()))
    }

    fn parse_comment(&mut self) -> crate::feed::Comment {
        self.bump(); // consume '#'
        let mut part1 = String::new();
        while !matches!(self.cur.kind, TokenKind::Equal | TokenKind::Nl | TokenKind::Eof) {
            part1.push_str(&self.cur.literal);
            self.bump();
        }
        if self.cur.kind == TokenKind::Equal {
            self.bump();
            let mut value = String::new();
            while !matches!(self.cur.kind, TokenKind::Nl | TokenKind::Eof) {
                value.push_str(&self.cur.literal);
                self.bump();
            }
            if self.cur.kind == TokenKind::Nl {
                self.bump();
            }
            crate::feed::Comment::new(part1.trim().to_string(), value.trim().to_string())
        } else {
            if self.cur.kind == TokenKind::Nl {
                self.bump();
            }
            crate::feed::Comment::new(String::new(), part1.trim().to_string())
        }
    }

    /// `Post = Date TAB Elem* (NL | EOF)`.
    fn parse_post(&mut self) -> Result<Post> {
        let ts = self.parse_timestamp()?;
        let mut post = Post::new(self.twter.clone(), ts);
        let mut pending = String::new();

        loop {
            match self.cur.kind {
                TokenKind::Nl => {
                    self.bump();
                    break;
                }
                TokenKind::Eof => break,
                _ => match self.parse_elem(&pending) {
                    ElemOutcome::Text(s) => pending.push_str(&s),
                    ElemOutcome::Element(e) => {
                        if !pending.is_empty() {
                            post.push(Element::Text(std::mem::take(&mut pending)));
                        }
                        post.push(e);
                    }
                },
            }
        }
        if !pending.is_empty() {
            post.push(Element::Text(pending));
        }
        if post.elements.is_empty() {
            return Err(Error::EmptyPost);
        }
        Ok(post)
    }

    /// `Date = Year "-" Month "-" Day "T" Hour ":" Minute [":" Second ["." Nanos]]
    ///         [ "Z" | ("+"|"-") TzH [":"] [TzM] ]` followed by a TAB.
    fn parse_timestamp(&mut self) -> Result<DateTime<FixedOffset>> {
        let year = self.expect_number()?;
        self.expect(TokenKind::Dash)?;
        let month = self.expect_number()?;
        self.expect(TokenKind::Dash)?;
        let day = self.expect_number()?;
        self.expect(TokenKind::TLetter)?;
        let hour = self.expect_number()?;
        self.expect(TokenKind::Colon)?;
        let minute = self.expect_number()?;

        let mut second = 0i64;
        let mut nanos = 0u32;
        if self.cur.kind == TokenKind::Colon {
            self.bump();
            second = self.expect_number()?;
            if self.cur.kind == TokenKind::Dot {
                self.bump();
                let frac = self.expect(TokenKind::Number)?;
                nanos = parse_fraction(&frac.literal);
            }
        }

        let (tz_h, tz_m): (i64, i64) = if self.cur.kind == TokenKind::ZLetter {
            self.bump();
            (0, 0)
        } else if matches!(self.cur.kind, TokenKind::Plus | TokenKind::Dash) {
            let sign: i64 = if self.cur.kind == TokenKind::Dash { -1 } else { 1 };
            self.bump();
            let mut tzh = self.expect_number()?;
            let mut tzm = 0i64;
            if self.cur.kind == TokenKind::Colon {
                self.bump();
                tzm = self.expect_number()?;
            } else if self.cur.kind == TokenKind::Number {
                tzm = self.expect_number()?;
            }
            // B4: an hour field >= 24 is really "HHMM" written without a colon.
            if tzh >= 24 {
                tzm = tzh % 100;
                tzh /= 100;
            }
            (sign * tzh, sign * tzm)
        } else {
            (0, 0)
        };

        self.expect(TokenKind::Tab)?;

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

    fn record_token_error(&mut self) {
        self.errors.push(Error::ParseToken {
            expected: TokenKind::String,
            actual: self.cur.kind,
            line: self.cur.line,
            col: self.cur.col,
        });
    }

    /// Dispatches on the current token to the next element, applying the
    /// mention/tag/subject/link ambiguity guard (I5): those productions only
    /// trigger when the preceding buffered rune is whitespace or absent.
    fn parse_elem(&mut self, pending: &str) -> ElemOutcome {
        let prev_ws_or_start = pending.chars().last().map(|c| c.is_whitespace()).unwrap_or(true);

        match self.cur.kind {
            TokenKind::Code => ElemOutcome::Element(self.parse_code()),
            TokenKind::Ls => {
                self.bump();
                ElemOutcome::Element(Element::LineSeparator)
            }
            TokenKind::Bang if self.peek.kind == TokenKind::LBracket => match self.try_media() {
                Ok(e) => ElemOutcome::Element(e),
                Err(t) => {
                    self.record_token_error();
                    ElemOutcome::Text(t)
                }
            },
            TokenKind::LBracket => match self.try_standard_link() {
                Ok(e) => ElemOutcome::Element(e),
                Err(t) => {
                    self.record_token_error();
                    ElemOutcome::Text(t)
                }
            },
            TokenKind::At if prev_ws_or_start => match self.try_mention() {
                Ok(e) => ElemOutcome::Element(e),
                Err(t) => {
                    self.record_token_error();
                    ElemOutcome::Text(t)
                }
            },
            TokenKind::Hash if prev_ws_or_start => match self.try_tag() {
                Ok(e) => ElemOutcome::Element(e),
                Err(t) => {
                    self.record_token_error();
                    ElemOutcome::Text(t)
                }
            },
            TokenKind::LParen if prev_ws_or_start => ElemOutcome::Element(self.parse_subject()),
            TokenKind::Lt if prev_ws_or_start => match self.try_plain_link() {
                Ok(e) => ElemOutcome::Element(e),
                Err(t) => {
                    self.record_token_error();
                    ElemOutcome::Text(t)
                }
            },
            TokenKind::String if self.peek.kind == TokenKind::Scheme => Ok::<Element, String>(self.try_naked_link()).map_or_else(
                |t| {
                    self.record_token_error();
                    ElemOutcome::Text(t)
                },
                ElemOutcome::Element,
            ),
            _ => {
                let t = self.cur.literal.clone();
                self.bump();
                ElemOutcome::Text(t)
            }
        }
    }

    fn parse_code(&mut self) -> Element {
        let raw = self.cur.literal.clone();
        self.bump();
        let (kind, body) = if let Some(inner) = raw.strip_prefix("```").and_then(|s| s.strip_suffix("```")) {
            (CodeKind::Block, inner.to_string())
        } else if let Some(inner) = raw.strip_prefix('`').and_then(|s| s.strip_suffix('`')) {
            (CodeKind::Inline, inner.to_string())
        } else {
            (CodeKind::Inline, raw.trim_matches('`').to_string())
        };
        Element::Code(Code::new(kind, body, raw))
    }

    /// `Subject = "(" ( Tag | Text ) ")"`.
    fn parse_subject(&mut self) -> Element {
        self.bump(); // consume '('
        let mut inner = String::new();

        if self.cur.kind == TokenKind::Hash {
            match self.try_tag() {
                Ok(Element::Tag(tag)) if self.cur.kind == TokenKind::RParen => {
                    let tag_lit = tag.literal.clone();
                    self.bump(); // consume ')'
                    let literal = format!("({})", tag_lit);
                    return Element::Subject(Subject::new(SubjectInner::Tag(tag), literal));
                }
                Ok(other) => inner.push_str(other.literal()),
                Err(consumed) => inner.push_str(&consumed),
            }
        }

        while !matches!(self.cur.kind, TokenKind::RParen | TokenKind::Nl | TokenKind::Eof) {
            inner.push_str(&self.cur.literal);
            self.bump();
        }
        let mut literal = format!("({}", inner);
        if self.cur.kind == TokenKind::RParen {
            self.bump();
            literal.push(')');
        }
        Element::Subject(Subject::new(SubjectInner::Text(inner), literal))
    }

    /// `Tag = "#" String | "#<" [ String SPACE ] Url ">"`.
    fn try_tag(&mut self) -> std::result::Result<Element, String> {
        let mut lit = String::from("#");
        self.bump();
        if self.cur.kind == TokenKind::Lt {
            lit.push('<');
            self.bump();
            let mut raw = String::new();
            let mut space_at: Option<usize> = None;
            while !matches!(self.cur.kind, TokenKind::Gt | TokenKind::Nl | TokenKind::Eof) {
                if self.cur.kind == TokenKind::Space && space_at.is_none() {
                    space_at = Some(raw.len());
                }
                raw.push_str(&self.cur.literal);
                lit.push_str(&self.cur.literal);
                self.bump();
            }
            if self.cur.kind != TokenKind::Gt {
                return Err(lit);
            }
            lit.push('>');
            self.bump();
            let (text, url) = match space_at {
                Some(idx) => (raw[..idx].to_string(), raw[idx..].trim_start().to_string()),
                None => (String::new(), raw),
            };
            Ok(Element::Tag(Tag::new(text, url, lit)))
        } else if self.cur.kind == TokenKind::String {
            let text = self.cur.literal.clone();
            lit.push_str(&text);
            self.bump();
            Ok(Element::Tag(Tag::new(text, "", lit)))
        } else {
            Err(lit)
        }
    }

    /// `Mention = "@" Name ["@" Domain] | "@<" [ Name [ "@" Domain ] SPACE ] Url ">"`.
    fn try_mention(&mut self) -> std::result::Result<Element, String> {
        let mut lit = String::from("@");
        self.bump();
        if self.cur.kind == TokenKind::Lt {
            lit.push('<');
            self.bump();
            let mut raw = String::new();
            let mut space_at: Option<usize> = None;
            while !matches!(self.cur.kind, TokenKind::Gt | TokenKind::Nl | TokenKind::Eof) {
                if self.cur.kind == TokenKind::Space && space_at.is_none() {
                    space_at = Some(raw.len());
                }
                raw.push_str(&self.cur.literal);
                lit.push_str(&self.cur.literal);
                self.bump();
            }
            if self.cur.kind != TokenKind::Gt {
                return Err(lit);
            }
            lit.push('>');
            self.bump();
            let (name_part, url) = match space_at {
                Some(idx) => (raw[..idx].to_string(), raw[idx..].trim_start().to_string()),
                None => (String::new(), raw),
            };
            let (name, domain) = split_name_domain(&name_part);
            Ok(Element::Mention(Mention::new(name, domain, url, lit)))
        } else if self.cur.kind == TokenKind::String {
            let name = self.cur.literal.clone();
            lit.push_str(&name);
            self.bump();
            let mut domain = String::new();
            if self.cur.kind == TokenKind::At {
                lit.push('@');
                self.bump();
                if self.cur.kind == TokenKind::String {
                    domain = self.cur.literal.clone();
                    lit.push_str(&domain);
                    self.bump();
                } else {
                    return Err(lit);
                }
            }
            Ok(Element::Mention(Mention::new(name, domain, "", lit)))
        } else {
            Err(lit)
        }
    }

    /// `Naked = String SCHEME UrlRest` — always succeeds once triggered.
    fn try_naked_link(&mut self) -> Element {
        let mut lit = self.cur.literal.clone();
        self.bump(); // scheme name
        lit.push_str(&self.cur.literal);
        self.bump(); // "://"
        while !matches!(
            self.cur.kind,
            TokenKind::Space | TokenKind::Nl | TokenKind::Eof | TokenKind::Ls | TokenKind::Tab
        ) {
            lit.push_str(&self.cur.literal);
            self.bump();
        }
        Element::Link(Link::new(LinkKind::Naked, lit.clone(), lit.clone(), lit))
    }

    /// `Plain = "<" Naked ">"`.
    fn try_plain_link(&mut self) -> std::result::Result<Element, String> {
        let mut lit = String::from("<");
        self.bump(); // consume '<'
        if !(self.cur.kind == TokenKind::String && self.peek.kind == TokenKind::Scheme) {
            return Err(lit);
        }
        let scheme_name = self.cur.literal.clone();
        lit.push_str(&scheme_name);
        self.bump();
        lit.push_str(&self.cur.literal);
        self.bump(); // "://"
        let mut url = format!("{}://", scheme_name);
        while !matches!(self.cur.kind, TokenKind::Gt | TokenKind::Nl | TokenKind::Eof | TokenKind::Space) {
            url.push_str(&self.cur.literal);
            lit.push_str(&self.cur.literal);
            self.bump();
        }
        if self.cur.kind != TokenKind::Gt {
            return Err(lit);
        }
        lit.push('>');
        self.bump();
        Ok(Element::Link(Link::new(LinkKind::Plain, url.clone(), url, lit)))
    }

    /// `Standard = "[" Text "]" "(" Url ")"`, with `\` escapes and balanced
    /// brackets inside the display text.
    fn try_standard_link(&mut self) -> std::result::Result<Element, String> {
        let mut lit = String::from("[");
        self.bump(); // consume '['
        let mut text = String::new();
        let mut depth = 0i32;
        loop {
            match self.cur.kind {
                TokenKind::Backslash => {
                    lit.push('\\');
                    self.bump();
                    if matches!(self.cur.kind, TokenKind::Nl | TokenKind::Eof) {
                        return Err(lit);
                    }
                    text.push_str(&self.cur.literal);
                    lit.push_str(&self.cur.literal);
                    self.bump();
                }
                TokenKind::LBracket => {
                    depth += 1;
                    text.push('[');
                    lit.push('[');
                    self.bump();
                }
                TokenKind::RBracket => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    text.push(']');
                    lit.push(']');
                    self.bump();
                }
                TokenKind::Nl | TokenKind::Eof => return Err(lit),
                _ => {
                    text.push_str(&self.cur.literal);
                    lit.push_str(&self.cur.literal);
                    self.bump();
                }
            }
        }
        lit.push(']');
        self.bump(); // consume ']'
        if self.cur.kind != TokenKind::LParen {
            return Err(lit);
        }
        lit.push('(');
        self.bump();
        let mut target = String::new();
        loop {
            match self.cur.kind {
                TokenKind::Backslash => {
                    lit.push('\\');
                    self.bump();
                    if matches!(self.cur.kind, TokenKind::Nl | TokenKind::Eof) {
                        return Err(lit);
                    }
                    target.push_str(&self.cur.literal);
                    lit.push_str(&self.cur.literal);
                    self.bump();
                }
                TokenKind::RParen => break,
                TokenKind::Nl | TokenKind::Eof => return Err(lit),
                _ => {
                    target.push_str(&self.cur.literal);
                    lit.push_str(&self.cur.literal);
                    self.bump();
                }
            }
        }
        lit.push(')');
        self.bump(); // consume ')'
        Ok(Element::Link(Link::new(LinkKind::Standard, text, target, lit)))
    }

    /// `Media = "!" Standard`.
    fn try_media(&mut self) -> std::result::Result<Element, String> {
        self.bump(); // consume '!'
        match self.try_standard_link() {
            Ok(Element::Link(l)) => {
                let literal = format!("!{}", l.literal);
                Ok(Element::Link(Link::new(LinkKind::Media, l.text, l.target, literal)))
            }
            Ok(other) => Ok(other),
            Err(consumed) => Err(format!("!{}", consumed)),
        }
    }
}

enum ElemOutcome {
    Text(String),
    Element(Element),
}

fn split_name_domain(s: &str) -> (String, String) {
    match s.split_once('@') {
        Some((n, d)) => (n.to_string(), d.to_string()),
        None => (s.to_string(), String::new()),
    }
}

/// Pads or truncates a digit string to 9 digits and parses it as nanoseconds.
fn parse_fraction(digits: &str) -> u32 {
    let mut s = digits.to_string();
    if s.len() > 9 {
        s.truncate(9);
    } else {
        s.push_str(&"0".repeat(9 - s.len()));
    }
    s.parse().unwrap_or(0)
}

/// Parses a single post line (no surrounding feed). Empty input yields `Ok(None)`;
/// non-blank input that fails to produce a post is an error (§6 factory interface).
pub fn parse_line(line: &str, twter: Twter) -> Result<Option<Post>> {
    if line.is_empty() {
        return Ok(None);
    }
    let mut p = Parser::new(line, twter);
    match p.parse_line() {
        Some(Line::Post(Ok(post))) => Ok(Some(post)),
        Some(Line::Post(Err(e))) => Err(e),
        _ => Err(Error::InvalidTwtLine(line.to_string())),
    }
}

/// Parses a standalone post body into its element list (used by `make_post`
/// and JSON decoding, which only carry rendered text, not a dated line).
pub fn parse_text(text: &str) -> Result<Vec<Element>> {
    let mut p = Parser::new_body(text, Twter::default());
    let mut elements = Vec::new();
    let mut pending = String::new();
    while !p.is_eof() {
        match p.parse_elem(&pending) {
            ElemOutcome::Text(s) => pending.push_str(&s),
            ElemOutcome::Element(e) => {
                if !pending.is_empty() {
                    elements.push(Element::Text(std::mem::take(&mut pending)));
                }
                elements.push(e);
            }
        }
    }
    if !pending.is_empty() {
        elements.push(Element::Text(pending));
    }
    Ok(elements)
}

/// Builds a post directly from already-known fields, bypassing timestamp lexing.
pub fn make_post(twter: Twter, timestamp: DateTime<FixedOffset>, text: &str) -> Result<Post> {
    let elements = parse_text(text)?;
    let mut post = Post::new(twter, timestamp);
    for e in elements {
        post.push(e);
    }
    Ok(post)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn twter() -> Twter {
        Twter::new("example", "https://example.com/twtxt.txt")
    }

    #[test]
    fn minimal_post_scenario_1() {
        let post = parse_line("2016-02-03T23:05:00Z\thello", twter()).unwrap().unwrap();
        assert_eq!(post.elements, vec![Element::Text("hello".into())]);
        assert_eq!(post.timestamp.to_rfc3339(), "2016-02-03T23:05:00+00:00");
    }

    #[test]
    fn mention_with_url_scenario_2() {
        let line = "2016-02-03T23:03:00+00:00\t@<example http://example.org/twtxt.txt> welcome to twtxt!";
        let post = parse_line(line, twter()).unwrap().unwrap();
        assert_eq!(post.mentions.len(), 1);
        assert_eq!(post.mentions[0].name, "example");
        assert_eq!(post.mentions[0].target, "http://example.org/twtxt.txt");
    }

    #[test]
    fn subject_wrapping_tag_scenario_3() {
        let line = "2016-02-03T23:03:00Z\t@<a http://a> (#<hrqg53a http://b>) hi";
        let post = parse_line(line, twter()).unwrap().unwrap();
        assert_eq!(post.subject.as_ref().unwrap().tag_text(), Some("hrqg53a"));
        assert!(post.tags.contains(&"hrqg53a".to_string()));
    }

    #[test]
    fn code_block_scenario_4() {
        let line = "2016-02-03T23:03:00Z\t```hi```";
        let post = parse_line(line, twter()).unwrap().unwrap();
        assert_eq!(post.elements.len(), 1);
        match &post.elements[0] {
            Element::Code(c) => {
                assert_eq!(c.kind, CodeKind::Block);
                assert_eq!(c.body, "hi");
            }
            other => panic!("expected Code element, got {:?}", other),
        }
    }

    #[test]
    fn tag_after_nonwhitespace_is_text_b5() {
        let line = "2016-02-03T23:03:00Z\tfoo#bar";
        let post = parse_line(line, twter()).unwrap().unwrap();
        assert_eq!(post.tags.len(), 0);
        assert_eq!(post.elements, vec![Element::Text("foo#bar".into())]);
    }

    #[test]
    fn subject_with_non_tag_text_b6() {
        let line = "2016-02-03T23:03:00Z\t(not a subject)";
        let post = parse_line(line, twter()).unwrap().unwrap();
        match &post.subject.as_ref().unwrap().inner {
            SubjectInner::Text(s) => assert_eq!(s, "not a subject"),
            other => panic!("expected Text subject, got {:?}", other),
        }
    }

    #[test]
    fn missing_seconds_default_to_zero_b3() {
        let line = "2016-02-03T23:05Z\thi";
        let post = parse_line(line, twter()).unwrap().unwrap();
        assert_eq!(post.timestamp.to_rfc3339(), "2016-02-03T23:05:00+00:00");
    }

    #[test]
    fn timezone_hhmm_without_colon_b4() {
        let line = "2016-02-03T23:05:00+0845\thi";
        let post = parse_line(line, twter()).unwrap().unwrap();
        assert_eq!(post.timestamp.offset().local_minus_utc(), 8 * 3600 + 45 * 60);
    }

    #[test]
    fn empty_line_is_nil_post() {
        assert_eq!(parse_line("", twter()).unwrap(), None);
    }

    #[test]
    fn naked_link_parses_scheme_as_one_token() {
        let line = "2016-02-03T23:05:00Z\tsee http://example.com/page for more";
        let post = parse_line(line, twter()).unwrap().unwrap();
        assert_eq!(post.links, vec!["http://example.com/page".to_string()]);
    }

    #[test]
    fn standard_link_with_escaped_bracket() {
        let line = "2016-02-03T23:05:00Z\t[a\\]b](http://example.com)";
        let post = parse_line(line, twter()).unwrap().unwrap();
        match &post.elements[0] {
            Element::Link(l) => {
                assert_eq!(l.kind, LinkKind::Standard);
                assert_eq!(l.text, "a]b");
                assert_eq!(l.target, "http://example.com");
            }
            other => panic!("expected Link, got {:?}", other),
        }
    }

    #[test]
    fn media_link_is_standard_link_with_bang() {
        let line = "2016-02-03T23:05:00Z\t![alt](http://example.com/img.png)";
        let post = parse_line(line, twter()).unwrap().unwrap();
        match &post.elements[0] {
            Element::Link(l) => assert_eq!(l.kind, LinkKind::Media),
            other => panic!("expected Link, got {:?}", other),
        }
    }
}
