//! twtxt feed codec: lexer, recursive-descent parser, AST, and multi-format
//! renderer for the twtxt microblogging format, plus the content-addressing
//! scheme that assigns a stable hash to every post.
//!
//! The crate is organized leaves-first, matching the component breakdown of
//! the format it implements: [`lexer`] tokenizes, [`parser`] builds an
//! [`ast`] tree, [`render`]/[`json`]/[`binary`] walk that tree back out to
//! wire bytes, and [`feed`] + [`hash`] own the file-level container and
//! content addressing. [`format_options`] carries the capability traits the
//! renderer and link-expansion consult; [`error`] is the crate's single error
//! type.

pub mod ast;
pub mod binary;
pub mod codec;
pub mod error;
pub mod feed;
pub mod format_options;
pub mod hash;
pub mod json;
pub mod lexer;
#[cfg(any(test, feature = "oracle"))]
pub mod oracle;
pub mod parser;
pub mod render;
pub mod twter;

pub use ast::{Element, Format, Post};
pub use codec::{FeedCodec, LexParseCodec};
pub use error::{Error, Result};
pub use feed::{parse_file, Comment, Comments, Feed};
pub use format_options::{FeedLookup, FormatOptions};
pub use parser::{make_post, parse_line, parse_text};
pub use twter::Twter;
