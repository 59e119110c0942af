//! AST -> four output formats, driven by the `FormatOptions` capability
//! (§4.4 Renderer). Element-level dispatch lives on [`crate::ast::Element`]
//! itself (§4.2: "a `render(mode, out)` operation dispatched on kind"); this
//! module is the post-level entry point a caller actually reaches for.
//!
//! Grounded in `ast.go`'s `Twt.FormatText`: before dispatching to each
//! element's own renderer, a cloned element list is run through a
//! mode-specific URL substitution pass (fill empty tag targets, then for
//! text mode strip tag/mention targets entirely, for markdown/HTML rewrite
//! mention targets through `UserURL`/`ExternalURL`). The canonical `post` is
//! never mutated by rendering.

use crate::ast::{Element, Format, Mention, Post, SubjectInner, Tag};
use crate::format_options::FormatOptions;
use crate::twter::host_of;

/// Renders every element of `post` in `mode`, consulting `opts` for the URL
/// substitutions the mention/tag renderers need.
pub fn render_post(post: &Post, mode: Format, opts: &dyn FormatOptions) -> String {
    let elements = prepared_elements(post, mode, opts);
    let mut out = String::new();
    for el in &elements {
        el.render(mode, opts, &mut out);
    }
    out
}

/// The post's canonical wire form: `<timestamp>\t<body>\n` (§3 Post).
pub fn render_wire(post: &Post) -> String {
    post.wire_literal()
}

/// Clones `post.elements` and applies `mode`'s URL substitution rules,
/// leaving `post` itself untouched.
fn prepared_elements(post: &Post, mode: Format, opts: &dyn FormatOptions) -> Vec<Element> {
    let mut elements = post.elements.clone();
    for el in elements.iter_mut() {
        match el {
            Element::Tag(t) => adjust_tag(t, mode, opts),
            Element::Subject(s) => {
                if let SubjectInner::Tag(t) = &mut s.inner {
                    adjust_tag(t, mode, opts);
                }
            }
            Element::Mention(m) => adjust_mention(m, mode, opts),
            _ => {}
        }
    }
    elements
}

/// Fills an empty tag target via `url_for_tag`, then for `Format::Text`
/// strips it back out so the element renders as bare `#text`.
fn adjust_tag(t: &mut Tag, mode: Format, opts: &dyn FormatOptions) {
    if t.target.is_empty() {
        t.target = opts.url_for_tag(&t.text);
    }
    if mode == Format::Text {
        t.target.clear();
    }
}

/// Text mode strips the mention's target (remembering a local feed's domain
/// first, so `@name<em>@domain</em>` can still be implied elsewhere);
/// markdown/HTML rewrite the target through `user_url` for local feeds or
/// `external_url` otherwise.
fn adjust_mention(m: &mut Mention, mode: Format, opts: &dyn FormatOptions) {
    match mode {
        Format::Text => {
            if m.explicit_domain.is_empty() && opts.is_local_url(&m.target) && m.target.ends_with("/twtxt.txt") {
                m.explicit_domain = host_of(&opts.local_url());
            }
            m.target.clear();
        }
        Format::Markdown | Format::Html => {
            if opts.is_local_url(&m.target) && m.target.ends_with("/twtxt.txt") {
                m.target = opts.user_url(&m.target);
            } else {
                if m.explicit_domain.is_empty() {
                    m.explicit_domain = host_of(&m.target);
                }
                if !m.target.is_empty() {
                    m.target = opts.external_url(&m.name, &m.target);
                }
            }
        }
        Format::Wire | Format::Compact => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format_options::NoopFormatOptions;
    use crate::twter::Twter;
    use chrono::{FixedOffset, TimeZone};

    #[test]
    fn renders_mention_and_line_separator_scenario_2() {
        let line = "2016-02-03T23:03:00+00:00\t@<example http://example.org/twtxt.txt>\u{2028}welcome to twtxt!";
        let twter = Twter::new("me", "https://example.com/twtxt.txt");
        let post = crate::parser::parse_line(line, twter).unwrap().unwrap();

        assert_eq!(render_post(&post, Format::Text, &NoopFormatOptions), "@example\nwelcome to twtxt!");
    }

    /// An external pod: the mention's `.../twtxt.txt` feed URL is not local,
    /// so markdown/HTML rendering must route it through `external_url`
    /// rather than rendering the stored feed URL verbatim.
    struct ScenarioOptions;
    impl FormatOptions for ScenarioOptions {
        fn local_url(&self) -> String {
            "https://mypod.example".into()
        }
        fn is_local_url(&self, url: &str) -> bool {
            url.starts_with("https://mypod.example")
        }
        fn user_url(&self, url: &str) -> String {
            url.trim_end_matches("/twtxt.txt").to_string()
        }
        fn external_url(&self, _nick: &str, uri: &str) -> String {
            uri.trim_end_matches("/twtxt.txt").to_string()
        }
        fn url_for_tag(&self, tag: &str) -> String {
            format!("#{}", tag)
        }
        fn url_for_user(&self, name: &str) -> String {
            name.to_string()
        }
    }

    #[test]
    fn renders_mention_markdown_and_html_scenario_2() {
        let line = "2016-02-03T23:03:00+00:00\t@<example http://example.org/twtxt.txt>\u{2028}welcome to twtxt!";
        let twter = Twter::new("me", "https://example.com/twtxt.txt");
        let post = crate::parser::parse_line(line, twter).unwrap().unwrap();

        assert_eq!(
            render_post(&post, Format::Markdown, &ScenarioOptions),
            "[@example](http://example.org#example)\nwelcome to twtxt!"
        );
        assert_eq!(
            render_post(&post, Format::Html, &ScenarioOptions),
            "<a href=\"http://example.org\">@example<em>@example.org</em></a>\nwelcome to twtxt!"
        );
    }

    #[test]
    fn wire_round_trip_preserves_hash_p2() {
        let ts = FixedOffset::east_opt(0).unwrap().with_ymd_and_hms(2016, 2, 3, 23, 5, 0).unwrap();
        let twter = Twter::new("me", "https://example.com/twtxt.txt");
        let mut post = crate::ast::Post::new(twter.clone(), ts);
        post.push(crate::ast::Element::Text("hello".into()));

        let wire = render_wire(&post);
        let roundtripped = crate::parser::parse_line(wire.trim_end_matches('\n'), twter).unwrap().unwrap();
        assert_eq!(post.hash(), roundtripped.hash());
    }
}
