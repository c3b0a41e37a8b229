use std::collections::BTreeMap;

use crate::Element;

/// The root's direct children grouped by stripped tag name.
///
/// Groups are ordered by section name; entries within a group keep their
/// document order.
///
/// ```
/// # use permdiff_core::{Element, Sections};
/// let root = Element::new("Profile")
///     .with_child(Element::new("userPermissions"))
///     .with_child(Element::new("custom").with_text("false"))
///     .with_child(Element::new("userPermissions"));
/// let sections = Sections::from_root(&root);
/// assert_eq!(sections.names().collect::<Vec<_>>(), ["custom", "userPermissions"]);
/// assert_eq!(sections.get("userPermissions").len(), 2);
/// assert!(sections.get("missing").is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sections<'a> {
    groups: BTreeMap<&'a str, Vec<&'a Element>>,
}

impl<'a> Sections<'a> {
    /// Indexes every direct child of `root`.
    #[must_use]
    pub fn from_root(root: &'a Element) -> Self {
        let mut groups: BTreeMap<&'a str, Vec<&'a Element>> = BTreeMap::new();
        for child in root.children() {
            groups.entry(child.tag()).or_default().push(child);
        }
        Self { groups }
    }

    /// Entries of `name`, or an empty slice when the section is absent.
    #[must_use]
    pub fn get(&self, name: &str) -> &[&'a Element] {
        self.groups.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// Section names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.groups.keys().copied()
    }

    /// Iterates over sections and their entries.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &[&'a Element])> + '_ {
        self.groups.iter().map(|(name, entries)| (*name, entries.as_slice()))
    }

    /// Number of distinct sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Indicates whether the root had no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Total number of indexed entries across all sections.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.groups.values().map(Vec::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_child_lands_in_exactly_one_section() {
        let root = Element::new("PermissionSet")
            .with_child(Element::new("label").with_text("Sales"))
            .with_child(Element::new("sf:fieldPermissions").with_text("1"))
            .with_child(Element::new("fieldPermissions").with_text("2"))
            .with_child(Element::new("hasActivationRequired"));
        let sections = Sections::from_root(&root);
        assert_eq!(sections.len(), 3);
        assert_eq!(sections.entry_count(), root.children().len());
        let texts: Vec<_> =
            sections.get("fieldPermissions").iter().map(|e| e.trimmed_text()).collect();
        assert_eq!(texts, ["1", "2"]);
    }

    #[test]
    fn root_without_children_has_no_sections() {
        let root = Element::new("Profile").with_text("\n");
        assert!(Sections::from_root(&root).is_empty());
    }
}
