use std::fmt;
use std::fs;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::{parser, Element, LoadError, Sections};

const LABEL_SUFFIXES: [&str; 3] = [".profile-meta.xml", ".permissionset-meta.xml", ".xml"];

/// Document subtype, derived from the namespace-stripped root tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum DocumentKind {
    /// A `<Profile>` document.
    Profile,
    /// A `<PermissionSet>` document.
    PermissionSet,
    /// Any other root element.
    Unknown,
}

impl DocumentKind {
    /// Classifies a stripped root tag.
    ///
    /// ```
    /// # use permdiff_core::DocumentKind;
    /// assert_eq!(DocumentKind::from_root_tag("Profile"), DocumentKind::Profile);
    /// assert_eq!(DocumentKind::from_root_tag("profile"), DocumentKind::Unknown);
    /// ```
    #[must_use]
    pub fn from_root_tag(tag: &str) -> Self {
        match tag {
            "Profile" => Self::Profile,
            "PermissionSet" => Self::PermissionSet,
            _ => Self::Unknown,
        }
    }

    /// Indicates whether the kind is one of the supported subtypes.
    #[must_use]
    pub fn is_recognized(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Name of the kind as it appears in the root tag.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Profile => "Profile",
            Self::PermissionSet => "PermissionSet",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A parsed metadata document.
///
/// ```
/// # use permdiff_core::{Document, DocumentKind};
/// let doc = Document::parse_str(
///     "<Profile xmlns=\"http://soap.sforce.com/2006/04/metadata\"><custom>true</custom></Profile>",
/// )?;
/// assert_eq!(doc.kind(), DocumentKind::Profile);
/// assert_eq!(doc.sections().len(), 1);
/// # Ok::<(), permdiff_core::LoadError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    root: Element,
    kind: DocumentKind,
    label: String,
}

impl Document {
    /// Parses a document held in memory. The label defaults to `document`.
    pub fn parse_str(input: &str) -> Result<Self, LoadError> {
        Ok(Self::from_root(parser::parse_root(input)?))
    }

    /// Reads and parses the document at `path`, labelling it from the file name.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|source| LoadError::Io { path: path.to_path_buf(), source })?;
        let document = Self::parse_str(&text)?.with_label(document_label(path));
        debug!(
            path = %path.display(),
            kind = %document.kind,
            children = document.root.children().len(),
            "loaded document"
        );
        Ok(document)
    }

    /// Wraps an already-built root element.
    #[must_use]
    pub fn from_root(root: Element) -> Self {
        let kind = DocumentKind::from_root_tag(root.tag());
        Self { root, kind, label: "document".to_string() }
    }

    /// Replaces the display label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Root element.
    #[must_use]
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Subtype derived from the root tag.
    #[must_use]
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Short display name used in reports.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Groups the root's children into sections.
    #[must_use]
    pub fn sections(&self) -> Sections<'_> {
        Sections::from_root(&self.root)
    }
}

/// Derives a short display label from a document path.
///
/// The first matching metadata suffix is removed, then the name is cut at
/// its first remaining dot.
///
/// ```
/// # use permdiff_core::document_label;
/// assert_eq!(document_label("force-app/Admin.profile-meta.xml"), "Admin");
/// assert_eq!(document_label("Sales_Ops.permissionset-meta.xml"), "Sales_Ops");
/// assert_eq!(document_label("Custom.v2.XML"), "Custom");
/// ```
#[must_use]
pub fn document_label(path: impl AsRef<Path>) -> String {
    let name = path.as_ref().file_name().map(|name| name.to_string_lossy()).unwrap_or_default();
    let mut base: &str = &name;
    for suffix in LABEL_SUFFIXES {
        if let Some(stripped) = base.strip_suffix(suffix) {
            base = stripped;
            break;
        }
    }
    base.split('.').next().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_ignores_namespace_prefix() {
        let doc = Document::parse_str("<md:PermissionSet xmlns:md=\"urn:x\"/>").unwrap();
        assert_eq!(doc.kind(), DocumentKind::PermissionSet);
        assert!(doc.kind().is_recognized());
    }

    #[test]
    fn unknown_root_is_not_an_error() {
        let doc = Document::parse_str("<CustomObject/>").unwrap();
        assert_eq!(doc.kind(), DocumentKind::Unknown);
        assert!(!doc.kind().is_recognized());
        assert_eq!(doc.kind().to_string(), "Unknown");
    }

    #[test]
    fn load_labels_from_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("Admin.profile-meta.xml");
        fs::write(&path, "<Profile><custom>false</custom></Profile>").unwrap();
        let doc = Document::load(&path).unwrap();
        assert_eq!(doc.label(), "Admin");
        assert_eq!(doc.kind(), DocumentKind::Profile);
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::load(dir.path().join("absent.xml")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn label_suffix_match_is_case_sensitive() {
        assert_eq!(document_label("Admin.Profile-Meta.xml"), "Admin");
        assert_eq!(document_label("plain"), "plain");
        assert_eq!(document_label(".hidden.xml"), "");
    }
}
