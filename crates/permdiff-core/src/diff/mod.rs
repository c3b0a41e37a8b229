//! Section-by-section comparison of two documents.
//!
//! Keyed sections (see [`crate::schema::KEY_FIELDS`]) are matched entry by
//! entry; allow-listed single-occurrence sections compare the field
//! dictionaries of their one element per side. Every other unkeyed section is reported with zero counts and
//! never inspected.

mod section;

use std::collections::BTreeSet;
use std::ops::Add;

use serde::Serialize;
use tracing::debug;

use crate::{Document, DocumentKind, Element, FieldDict, Sections};

/// An entry present on one side only.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExclusiveEntry {
    /// Entry key, or [`SINGLE_ENTRY_KEY`](crate::schema::SINGLE_ENTRY_KEY)
    /// for single-occurrence sections.
    pub key: String,
    /// The entry itself.
    pub element: Element,
}

impl ExclusiveEntry {
    /// Captures an exclusive entry.
    #[must_use]
    pub fn new(key: impl Into<String>, element: &Element) -> Self {
        Self { key: key.into(), element: element.clone() }
    }
}

/// A matched entry whose field dictionaries differ.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DifferingEntry {
    /// Key shared by both entries.
    pub key: String,
    /// Fields of the left-hand entry.
    pub left: FieldDict,
    /// Fields of the right-hand entry.
    pub right: FieldDict,
}

/// Per-section counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SectionSummary {
    /// Entries only in the left document.
    pub only_in_left: usize,
    /// Entries only in the right document.
    pub only_in_right: usize,
    /// Matched entries with different values.
    pub differing: usize,
}

impl SectionSummary {
    /// Indicates whether all counts are zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.only_in_left == 0 && self.only_in_right == 0 && self.differing == 0
    }
}

impl Add for SectionSummary {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            only_in_left: self.only_in_left + rhs.only_in_left,
            only_in_right: self.only_in_right + rhs.only_in_right,
            differing: self.differing + rhs.differing,
        }
    }
}

/// Comparison result for one section name.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SectionDiff {
    /// Section name.
    pub name: String,
    /// Entries only in the left document, sorted by key.
    pub only_in_left: Vec<ExclusiveEntry>,
    /// Entries only in the right document, sorted by key.
    pub only_in_right: Vec<ExclusiveEntry>,
    /// Matched entries whose fields differ, sorted by key.
    pub differing: Vec<DifferingEntry>,
}

impl SectionDiff {
    /// Creates a section result with no differences.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Counts of the three difference categories.
    #[must_use]
    pub fn summary(&self) -> SectionSummary {
        SectionSummary {
            only_in_left: self.only_in_left.len(),
            only_in_right: self.only_in_right.len(),
            differing: self.differing.len(),
        }
    }

    /// Indicates whether the section has no differences.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.summary().is_empty()
    }
}

/// Full comparison of two documents.
///
/// ```
/// # use permdiff_core::{compare_documents, Document};
/// let lhs = Document::parse_str(
///     "<Profile><userPermissions><enabled>true</enabled><name>ModifyAllData</name></userPermissions></Profile>",
/// )?
/// .with_label("Admin");
/// let rhs = Document::parse_str("<Profile/>")?.with_label("Standard");
/// let report = compare_documents(&lhs, &rhs);
/// let section = report.section("userPermissions").expect("section present");
/// assert_eq!(section.only_in_left[0].key, "ModifyAllData");
/// assert_eq!(report.totals().only_in_left, 1);
/// # Ok::<(), permdiff_core::LoadError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ComparisonReport {
    kind: DocumentKind,
    left_label: String,
    right_label: String,
    sections: Vec<SectionDiff>,
}

impl ComparisonReport {
    /// Assembles a report from already-computed section results.
    #[must_use]
    pub fn new(
        kind: DocumentKind,
        left_label: impl Into<String>,
        right_label: impl Into<String>,
        sections: Vec<SectionDiff>,
    ) -> Self {
        Self { kind, left_label: left_label.into(), right_label: right_label.into(), sections }
    }

    /// Kind of the left-hand document.
    #[must_use]
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    /// Display label of the left-hand document.
    #[must_use]
    pub fn left_label(&self) -> &str {
        &self.left_label
    }

    /// Display label of the right-hand document.
    #[must_use]
    pub fn right_label(&self) -> &str {
        &self.right_label
    }

    /// Section results in sorted name order.
    #[must_use]
    pub fn sections(&self) -> &[SectionDiff] {
        &self.sections
    }

    /// Looks up the result for one section.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&SectionDiff> {
        self.sections.iter().find(|section| section.name == name)
    }

    /// Section names paired with their counts.
    pub fn summary(&self) -> impl Iterator<Item = (&str, SectionSummary)> + '_ {
        self.sections.iter().map(|section| (section.name.as_str(), section.summary()))
    }

    /// Counts summed over all sections.
    #[must_use]
    pub fn totals(&self) -> SectionSummary {
        self.summary().fold(SectionSummary::default(), |acc, (_, counts)| acc + counts)
    }

    /// Indicates whether any section reports a difference.
    #[must_use]
    pub fn has_differences(&self) -> bool {
        !self.totals().is_empty()
    }
}

/// Compares every section name found in either document.
///
/// A section missing from one side is treated as empty there.
#[must_use]
pub fn compare_sections(lhs: &Sections<'_>, rhs: &Sections<'_>) -> Vec<SectionDiff> {
    let names: BTreeSet<&str> = lhs.names().chain(rhs.names()).collect();
    names
        .into_iter()
        .map(|name| {
            let diff = section::diff_section(name, lhs.get(name), rhs.get(name));
            debug!(
                section = name,
                only_in_left = diff.only_in_left.len(),
                only_in_right = diff.only_in_right.len(),
                differing = diff.differing.len(),
                "compared section"
            );
            diff
        })
        .collect()
}

/// Compares two documents and labels the result with their display labels.
#[must_use]
pub fn compare_documents(lhs: &Document, rhs: &Document) -> ComparisonReport {
    let sections = compare_sections(&lhs.sections(), &rhs.sections());
    ComparisonReport::new(lhs.kind(), lhs.label(), rhs.label(), sections)
}
