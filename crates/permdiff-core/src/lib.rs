//! Section-aware comparison of Salesforce `Profile` and `PermissionSet`
//! metadata documents.
//!
//! The pipeline is linear: load both documents into [`Element`] trees,
//! group the root's children into [`Sections`], match repeated entries by
//! the key fields in [`schema`], compare matched entries through their
//! [`FieldDict`], and render a [`ComparisonReport`].
//!
//! ```
//! use permdiff_core::{compare_documents, Document, ReportConfig};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let admin = Document::parse_str(
//!         "<Profile><userPermissions><enabled>true</enabled><name>ViewAllData</name></userPermissions></Profile>",
//!     )?
//!     .with_label("Admin");
//!     let standard = Document::parse_str(
//!         "<Profile><userPermissions><enabled>false</enabled><name>ViewAllData</name></userPermissions></Profile>",
//!     )?
//!     .with_label("Standard");
//!
//!     let report = compare_documents(&admin, &standard);
//!     let section = report.section("userPermissions").expect("section present");
//!     assert_eq!(section.differing[0].key, "ViewAllData");
//!
//!     let html = report.render_html(&ReportConfig::default());
//!     assert!(html.contains("ViewAllData"));
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod diff;
mod document;
mod driver;
mod element;
mod entry;
mod error;
mod options;
mod parser;
mod render;
pub mod schema;
mod section;

pub use diff::{
    compare_documents, compare_sections, ComparisonReport, DifferingEntry, ExclusiveEntry,
    SectionDiff, SectionSummary,
};
pub use document::{document_label, Document, DocumentKind};
pub use driver::{
    discover_inputs, is_candidate_document, load_pair, render_report, run, RunOutcome,
};
pub use element::{strip_namespace, Element};
pub use entry::{entry_key, field_dict, FieldDict, FieldValue};
pub use error::{CompareError, LoadError, RenderError};
pub use options::{ReportConfig, ReportFormat, RunConfig, DEFAULT_OUTPUT, DEFAULT_TITLE};
pub use section::Sections;

/// Returns the semantic version of the `permdiff-core` crate.
///
/// ```
/// assert!(!permdiff_core::version().is_empty());
/// ```
#[must_use]
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
