//! Document Model - the data consumed by both export pipelines
//!
//! This crate provides the in-memory model the editor hands to the export
//! engine: a titled document made of ordered HTML sections, plus the
//! optional list of attached supporting documents. The exporters read the
//! model as an immutable value; nothing here is mutated or persisted by
//! the export pipeline itself.

mod attachment;
mod document;

pub use attachment::*;
pub use document::*;
