//! Documentation extractor JSON to per-class site documents.
//!
//! The pipeline is:
//! 1. Load: extractor JSON -> [`Document`]
//! 2. Normalize: [`Document`] -> [`Normalization`] (visibility filter, type strings)
//! 3. Write: [`Normalization`] -> one JSON file per class plus a table of contents
//!
//! ## Module Structure
//!
//! - `input`: lenient read-only view over the extractor output
//! - `types`: type-descriptor classification and serialization
//! - `members`: normalizers for methods, accessors, variables and properties
//! - `walk`: module/class/member tree walk with the skip log
//! - `toc`: table-of-contents derivation from class keys
//! - `writer`: output documents on disk

#![forbid(unsafe_code)]
#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro
)]

use std::path::Path;

pub mod error;
pub mod input;
pub mod members;
pub mod model;
pub mod toc;
pub mod types;
pub mod walk;
pub mod writer;

pub use error::DocsError;
pub use input::{DeclarationNode, Document};
pub use model::{
    AccessorSignature, Normalized, NormalizedAccessor, NormalizedClass, NormalizedMethod,
    NormalizedModule, NormalizedProperty, NormalizedVariable, Parameter, Placeholder, SearchEntry,
    Signature, SourceLocation,
};
pub use toc::table_of_contents;
pub use types::{ShapeError, TypeShape, serialize_type, type_string};
pub use walk::{Normalization, normalize};
pub use writer::{DEFAULT_TOC_FILE, SiteWriter, WriteSummary, class_document_path};

/// Read `input`, normalize it and write the site documents with `writer`.
pub fn generate(input: &Path, writer: &SiteWriter) -> Result<(Normalization, WriteSummary), DocsError> {
    let document = Document::read(input)?;
    let normalization = normalize(&document);
    let summary = writer.write(&normalization)?;
    Ok((normalization, summary))
}
