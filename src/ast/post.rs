//! The post container: author, timestamp, ordered elements, and the derived
//! mention/tag/link lists and subject populated as elements are appended.

use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset};

use super::element::{Element, Mention, Subject, SubjectInner};
use crate::format_options::{FeedLookup, FormatOptions};
use crate::hash::content_hash;
use crate::twter::Twter;

#[derive(Debug, Clone)]
pub struct Post {
    pub author: Twter,
    pub timestamp: DateTime<FixedOffset>,
    pub elements: Vec<Element>,
    pub mentions: Vec<Mention>,
    pub tags: Vec<String>,
    pub links: Vec<String>,
    pub subject: Option<Subject>,
    hash: OnceLock<String>,
}

impl PartialEq for Post {
    fn eq(&self, other: &Self) -> bool {
        self.author == other.author && self.timestamp == other.timestamp && self.elements == other.elements
    }
}

impl Post {
    pub fn new(author: Twter, timestamp: DateTime<FixedOffset>) -> Self {
        Post {
            author,
            timestamp,
            elements: Vec::new(),
            mentions: Vec::new(),
            tags: Vec::new(),
            links: Vec::new(),
            subject: None,
            hash: OnceLock::new(),
        }
    }

    /// Appends an element, maintaining the derived mention/tag/link lists and
    /// the "first Subject wins" rule (I4).
    pub fn push(&mut self, el: Element) {
        match &el {
            Element::Mention(m) => self.mentions.push(m.clone()),
            Element::Tag(t) => self.tags.push(t.text.clone()),
            Element::Subject(s) => {
                if self.subject.is_none() {
                    if let Some(tag_text) = s.tag_text() {
                        self.tags.push(tag_text.to_string());
                    }
                    self.subject = Some(s.clone());
                }
            }
            Element::Link(l) => self.links.push(l.target.clone()),
            _ => {}
        }
        self.elements.push(el);
    }

    /// A post is "zero" when it has no timestamp and no elements — approximated
    /// here as an empty-body, epoch-zero-offset timestamp with no elements.
    pub fn is_zero(&self) -> bool {
        self.elements.is_empty() && self.author.is_zero()
    }

    /// Concatenation of every element's literal — the post body exactly (P5).
    pub fn body_literal(&self) -> String {
        self.elements.iter().map(|e| e.literal()).collect()
    }

    /// The post's wire literal: `<timestamp>\t<body>\n`.
    pub fn wire_literal(&self) -> String {
        format!("{}\t{}\n", self.timestamp.to_rfc3339(), self.body_literal())
    }

    /// Computes (once) and caches this post's 7-character content hash (§4.5).
    pub fn hash(&self) -> &str {
        self.hash
            .get_or_init(|| content_hash(&self.author.url, self.timestamp, &self.body_literal()))
    }

    /// Attaches a hash decoded from a cache record without recomputing it
    /// (§6 binary form decode). A no-op if the hash was already computed.
    pub fn set_cached_hash(&self, hash: String) {
        let _ = self.hash.set(hash);
    }

    /// Resolves bare `@nick` mentions and target-less `#tag`s against `opts`
    /// and `lookup`, mutating the elements (and therefore all four render
    /// modes) in place. Idempotent (P6): an element with a target already
    /// set is left untouched.
    pub fn expand_links(&mut self, opts: &dyn FormatOptions, lookup: Option<&dyn FeedLookup>) {
        for el in self.elements.iter_mut() {
            match el {
                Element::Tag(t) => {
                    if t.target.is_empty() {
                        t.target = opts.url_for_tag(&t.text);
                    }
                }
                Element::Subject(s) => {
                    if let SubjectInner::Tag(t) = &mut s.inner {
                        if t.target.is_empty() {
                            t.target = opts.url_for_tag(&t.text);
                        }
                    }
                }
                Element::Mention(m) => {
                    if m.target.is_empty() {
                        if let Some(lookup) = lookup {
                            if let Some(twter) = lookup.lookup(&m.name) {
                                match twter.nick.split_once('@') {
                                    Some((n, d)) => {
                                        m.name = n.to_string();
                                        m.explicit_domain = d.to_string();
                                    }
                                    None => m.name = twter.nick.clone(),
                                }
                                m.target = twter.url;
                            }
                        }
                    }
                }
                _ => {}
            }
        }

        self.mentions = self
            .elements
            .iter()
            .filter_map(|e| match e {
                Element::Mention(m) => Some(m.clone()),
                _ => None,
            })
            .collect();
    }

    /// The post's subject, falling back to a synthetic tag keyed by the post's hash.
    pub fn subject_or_default(&self) -> Subject {
        if let Some(s) = &self.subject {
            return s.clone();
        }
        use super::element::{SubjectInner, Tag};
        Subject::new(
            SubjectInner::Tag(Tag::new(self.hash().to_string(), "", "")),
            format!("(#{})", self.hash()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::element::{CodeKind, Code};
    use chrono::TimeZone;

    fn twter() -> Twter {
        Twter::new("example", "https://example.com/twtxt.txt")
    }

    #[test]
    fn push_records_tags_mentions_links() {
        let ts = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2016, 2, 3, 23, 5, 0).unwrap();
        let mut p = Post::new(twter(), ts);
        p.push(Element::Tag(crate::ast::element::Tag::new("rust", "", "#rust")));
        assert_eq!(p.tags, vec!["rust".to_string()]);
    }

    #[test]
    fn subject_first_wins() {
        use super::super::element::{Subject, SubjectInner, Tag};
        let ts = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2016, 2, 3, 23, 5, 0).unwrap();
        let mut p = Post::new(twter(), ts);
        let first = Subject::new(SubjectInner::Tag(Tag::new("first", "", "#first")), "(#first)");
        let second = Subject::new(SubjectInner::Tag(Tag::new("second", "", "#second")), "(#second)");
        p.push(Element::Subject(first));
        p.push(Element::Subject(second));
        assert_eq!(p.subject.as_ref().unwrap().tag_text(), Some("first"));
        assert_eq!(p.tags, vec!["first".to_string()]);
    }

    #[test]
    fn body_literal_concatenates_elements_including_ls() {
        let ts = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2016, 2, 3, 23, 5, 0).unwrap();
        let mut p = Post::new(twter(), ts);
        p.push(Element::Text("a".into()));
        p.push(Element::LineSeparator);
        p.push(Element::Text("b".into()));
        assert_eq!(p.body_literal(), "a\u{2028}b");
    }

    #[test]
    fn hash_is_memoized() {
        let ts = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2016, 2, 3, 23, 5, 0).unwrap();
        let mut p = Post::new(twter(), ts);
        p.push(Element::Text("hello".into()));
        let h1 = p.hash().to_string();
        let h2 = p.hash().to_string();
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 7);
    }

    #[test]
    fn expand_links_fills_tag_target_idempotently() {
        use crate::format_options::NoopFormatOptions;

        struct TagUrlOptions;
        impl FormatOptions for TagUrlOptions {
            fn local_url(&self) -> String { String::new() }
            fn is_local_url(&self, _url: &str) -> bool { false }
            fn user_url(&self, url: &str) -> String { url.to_string() }
            fn external_url(&self, _nick: &str, uri: &str) -> String { uri.to_string() }
            fn url_for_tag(&self, tag: &str) -> String { format!("https://example.com/tags/{}", tag) }
            fn url_for_user(&self, name: &str) -> String { name.to_string() }
        }
        let _ = NoopFormatOptions;

        let ts = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2016, 2, 3, 23, 5, 0).unwrap();
        let mut p = Post::new(twter(), ts);
        p.push(Element::Tag(crate::ast::element::Tag::new("rust", "", "#rust")));

        p.expand_links(&TagUrlOptions, None);
        let target_after_first = match &p.elements[0] {
            Element::Tag(t) => t.target.clone(),
            other => panic!("expected Tag, got {:?}", other),
        };
        p.expand_links(&TagUrlOptions, None);
        let target_after_second = match &p.elements[0] {
            Element::Tag(t) => t.target.clone(),
            other => panic!("expected Tag, got {:?}", other),
        };
        assert_eq!(target_after_first, "https://example.com/tags/rust");
        assert_eq!(target_after_first, target_after_second);
    }

    #[test]
    fn no_explicit_subject_falls_back_to_hash_tag() {
        let ts = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2016, 2, 3, 23, 5, 0).unwrap();
        let mut p = Post::new(twter(), ts);
        p.push(Element::Code(Code::new(CodeKind::Inline, "hi", "`hi`")));
        let subj = p.subject_or_default();
        assert_eq!(subj.tag_text(), Some(p.hash()));
    }
}
