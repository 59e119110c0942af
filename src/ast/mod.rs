//! Tagged-variant element tree + post and feed containers (§3, §4.2).

pub mod element;
pub mod post;

pub use element::{Code, CodeKind, Element, Format, Link, LinkKind, Mention, Subject, SubjectInner, Tag};
pub use post::Post;
