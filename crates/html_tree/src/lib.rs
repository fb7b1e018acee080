//! HTML Tree - lenient fragment parsing and inline style resolution
//!
//! This crate turns the editor's HTML section fragments into an owned
//! element/text node tree and resolves inline formatting context while
//! walking it. The rest of the export pipeline depends only on the
//! [`HtmlNode`] tree produced here, never on the underlying parser.

mod node;
mod parser;
mod style;

pub use node::*;
pub use parser::*;
pub use style::*;
