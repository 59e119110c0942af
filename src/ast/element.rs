//! Tagged-variant element tree (§3, §4.2 of the spec).
//!
//! Modeled as a flat enum with a `kind` discriminator and a `render` operation
//! dispatched by `match`, per the Design Notes: no inheritance hierarchy, a
//! shared `literal()` accessor trivially implemented per variant.

use std::cell::RefCell;

use crate::format_options::FormatOptions;
use crate::lexer::LS;
use crate::twter::{host_of, strip_scheme};

/// The renderer's format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `c` — compact (alias of `Text` for this codec; no distinct truncation rule is specified).
    Compact,
    /// `t` — plain text.
    Text,
    /// `m` — markdown.
    Markdown,
    /// `h` — HTML.
    Html,
    /// `l` — canonical wire form.
    Wire,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    Standard,
    Media,
    Plain,
    Naked,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeKind {
    Inline,
    Block,
}

/// Caches the outcome of the last `expand_links` resolution for a mention/tag:
/// `Ok(url)` on success, `Err(message)` if resolution was attempted and failed.
pub type ResolveCache = RefCell<Option<Result<String, String>>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Mention {
    pub name: String,
    /// Explicit `@name@domain` domain, if the source wrote one. Empty otherwise.
    pub explicit_domain: String,
    pub target: String,
    pub(crate) literal: String,
    resolved: ResolveCache,
}

impl Mention {
    pub fn new(name: impl Into<String>, explicit_domain: impl Into<String>, target: impl Into<String>, literal: impl Into<String>) -> Self {
        Mention {
            name: name.into(),
            explicit_domain: explicit_domain.into(),
            target: target.into(),
            literal: literal.into(),
            resolved: RefCell::new(None),
        }
    }

    /// The domain shown in HTML rendering: the explicit `@name@domain` suffix if
    /// the source wrote one, else the host of the resolved target URL.
    pub fn domain(&self) -> String {
        if !self.explicit_domain.is_empty() {
            return self.explicit_domain.clone();
        }
        if self.target.is_empty() {
            String::new()
        } else {
            host_of(&self.target)
        }
    }

    pub fn set_resolved(&self, result: Result<String, String>) {
        *self.resolved.borrow_mut() = Some(result);
    }

    pub fn resolved(&self) -> Option<Result<String, String>> {
        self.resolved.borrow().clone()
    }

    fn render(&self, mode: Format, _opts: &dyn FormatOptions, out: &mut String) {
        let has_target = !self.target.is_empty();
        let has_name = !self.name.is_empty();
        match (has_name, has_target) {
            (true, false) => {
                out.push_str(&format!("@{}", self.name));
                if mode == Format::Html {
                    let domain = self.domain();
                    if !domain.is_empty() {
                        out.push_str(&format!("<em>@{}</em>", domain));
                    }
                }
            }
            (false, true) => match mode {
                Format::Wire | Format::Text | Format::Compact => {
                    out.push_str(&format!("@<{}>", self.target))
                }
                Format::Markdown => out.push_str(&self.target),
                Format::Html => out.push_str(&format!("<a href=\"{}\">@</a>", self.target)),
            },
            (true, true) => match mode {
                Format::Wire => out.push_str(&format!("@<{} {}>", self.name, self.target)),
                Format::Text | Format::Compact => out.push_str(&format!("@{}", self.name)),
                Format::Markdown => {
                    out.push_str(&format!("[@{}]({}#{})", self.name, self.target, self.name))
                }
                Format::Html => {
                    let domain = self.domain();
                    out.push_str(&format!("<a href=\"{}\">@{}", self.target, self.name));
                    if !domain.is_empty() {
                        out.push_str(&format!("<em>@{}</em>", domain));
                    }
                    out.push_str("</a>");
                }
            },
            (false, false) => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tag {
    pub text: String,
    pub target: String,
    pub(crate) literal: String,
    resolved: ResolveCache,
}

impl Tag {
    pub fn new(text: impl Into<String>, target: impl Into<String>, literal: impl Into<String>) -> Self {
        Tag {
            text: text.into(),
            target: target.into(),
            literal: literal.into(),
            resolved: RefCell::new(None),
        }
    }

    pub fn set_resolved(&self, result: Result<String, String>) {
        *self.resolved.borrow_mut() = Some(result);
    }

    pub fn resolved(&self) -> Option<Result<String, String>> {
        self.resolved.borrow().clone()
    }

    fn render(&self, mode: Format, _opts: &dyn FormatOptions, out: &mut String) {
        let has_text = !self.text.is_empty();
        let has_target = !self.target.is_empty();
        match (has_text, has_target) {
            (true, false) => out.push_str(&format!("#{}", self.text)),
            (false, true) => match mode {
                Format::Wire | Format::Text | Format::Compact => {
                    out.push_str(&format!("#<{}>", self.target))
                }
                Format::Markdown => {
                    out.push_str(&format!("[{}]({})", strip_scheme(&self.target), self.target))
                }
                Format::Html => out.push_str(&format!("<a href=\"{}\">#</a>", self.target)),
            },
            (true, true) => match mode {
                Format::Wire | Format::Text | Format::Compact => {
                    out.push_str(&format!("#<{} {}>", self.text, self.target))
                }
                Format::Markdown => out.push_str(&format!("[#{}]({})", self.text, self.target)),
                Format::Html => {
                    out.push_str(&format!("<a href=\"{}\">#{}</a>", self.target, self.text))
                }
            },
            (false, false) => {}
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubjectInner {
    Tag(Tag),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Subject {
    pub inner: SubjectInner,
    pub literal: String,
}

impl Subject {
    pub fn new(inner: SubjectInner, literal: impl Into<String>) -> Self {
        Subject { inner, literal: literal.into() }
    }

    /// If this subject wraps a tag, the tag's text (used as the post's tag-list entry).
    pub fn tag_text(&self) -> Option<&str> {
        match &self.inner {
            SubjectInner::Tag(t) => Some(&t.text),
            SubjectInner::Text(_) => None,
        }
    }

    fn render(&self, mode: Format, opts: &dyn FormatOptions, out: &mut String) {
        out.push('(');
        match &self.inner {
            SubjectInner::Tag(t) => t.render(mode, opts, out),
            SubjectInner::Text(s) => out.push_str(s),
        }
        out.push(')');
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub kind: LinkKind,
    pub text: String,
    pub target: String,
    pub(crate) literal: String,
}

impl Link {
    pub fn new(kind: LinkKind, text: impl Into<String>, target: impl Into<String>, literal: impl Into<String>) -> Self {
        Link { kind, text: text.into(), target: target.into(), literal: literal.into() }
    }

    fn render(&self, out: &mut String) {
        match self.kind {
            LinkKind::Naked => out.push_str(&self.target),
            LinkKind::Plain => out.push_str(&format!("<{}>", self.target)),
            LinkKind::Standard => out.push_str(&format!("[{}]({})", self.text, self.target)),
            LinkKind::Media => out.push_str(&format!("![{}]({})", self.text, self.target)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Code {
    pub kind: CodeKind,
    /// Body without the surrounding backtick fence.
    pub body: String,
    pub(crate) literal: String,
}

impl Code {
    pub fn new(kind: CodeKind, body: impl Into<String>, literal: impl Into<String>) -> Self {
        Code { kind, body: body.into(), literal: literal.into() }
    }

    fn render(&self, mode: Format, out: &mut String) {
        let fence = match self.kind {
            CodeKind::Inline => "`",
            CodeKind::Block => "```",
        };
        let body = match (self.kind, mode) {
            (CodeKind::Block, Format::Wire) => self.body.clone(),
            (CodeKind::Block, _) => self.body.replace(LS, "\n"),
            (CodeKind::Inline, _) => self.body.clone(),
        };
        out.push_str(fence);
        out.push_str(&body);
        out.push_str(fence);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(String),
    LineSeparator,
    Mention(Mention),
    Tag(Tag),
    Subject(Subject),
    Link(Link),
    Code(Code),
}

impl Element {
    /// The exact source slice this element was parsed from (I1).
    pub fn literal(&self) -> &str {
        match self {
            Element::Text(s) => s,
            Element::LineSeparator => "\u{2028}",
            Element::Mention(m) => &m.literal,
            Element::Tag(t) => &t.literal,
            Element::Subject(s) => &s.literal,
            Element::Link(l) => &l.literal,
            Element::Code(c) => &c.literal,
        }
    }

    pub fn render(&self, mode: Format, opts: &dyn FormatOptions, out: &mut String) {
        match self {
            Element::Text(s) => out.push_str(s),
            Element::LineSeparator => out.push_str(match mode {
                Format::Wire => "\u{2028}",
                _ => "\n",
            }),
            Element::Mention(m) => m.render(mode, opts, out),
            Element::Tag(t) => t.render(mode, opts, out),
            Element::Subject(s) => s.render(mode, opts, out),
            Element::Link(l) => l.render(out),
            Element::Code(c) => c.render(mode, out),
        }
    }
}
