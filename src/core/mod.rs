//! Locale tree engine.
//!
//! Read path: [`load`] → [`LocaleTree::leaves`] / [`diff`] → [`report`].
//! Write path: [`load`] → [`merge`] → [`serialize`] → [`store::write_atomic`].
//! Everything except `store` works on in-memory trees only.
//!
//! ## Module Structure
//!
//! - `parsers`: restricted literal evaluator turning module source into a tree
//! - `key_path`: key path model and its canonical string form
//! - `tree`: `LocaleTree`, `Node` and path resolution
//! - `extract`: depth-first leaf iterator
//! - `diff`: reference-vs-target classification
//! - `categorize`: category and priority tables
//! - `merge`: non-destructive patch merge
//! - `serialize`: deterministic module rendering
//! - `report`: completeness aggregation
//! - `store`: load, backup and atomic write

pub mod categorize;
pub mod diff;
pub mod extract;
pub mod key_path;
pub mod merge;
pub mod parsers;
pub mod report;
pub mod serialize;
pub mod store;
pub mod tree;

pub use categorize::{Category, Priority, categorize};
pub use diff::{ClassificationResult, PlaceholderMarkers, Status, classify, diff};
pub use extract::Leaves;
pub use key_path::{KeyPath, KeyPathError};
pub use merge::{
    Change, ChangeKind, MergeOutcome, OverrideKind, Patch, PatchError, StructuralOverride, merge,
};
pub use parsers::{ExportForm, LocaleDocument, ParseError, parse_locale_source};
pub use report::{CategoryStats, CompletenessReport, report};
pub use serialize::{serialize, serialize_document};
pub use store::{ArtifactError, WriteReceipt, load, write_atomic};
pub use tree::{LeafEntry, LeafKind, LocaleTree, Node, NodeKind, Scalar};
