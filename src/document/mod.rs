//! Generic document handling for registry exports
//!
//! Turns raw GML/XML text into an ordered, tag-addressable element tree.
//! This layer knows nothing about record types; the catalog and loader
//! interpret the tree.

mod element;
mod parser;

pub use element::Element;
pub use parser::{parse_document, ParseError};
