//! Parsers for locale source files.
//!
//! - `literal`: restricted object-literal evaluator for JS/TS locale modules
//!   (uses swc for AST generation, executes nothing)

pub mod literal;

pub use literal::{
    ExportForm, LocaleDocument, ParseError, parse_locale_source, parse_locale_tree,
};
