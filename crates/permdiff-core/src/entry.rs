use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::schema::key_field_for;
use crate::Element;

/// Extracts the identifying key of an entry within `section`.
///
/// Returns `None` when the section has no configured key field or when the
/// entry lacks that field. A present but empty key field yields `Some("")`.
///
/// ```
/// # use permdiff_core::{entry_key, Element};
/// let entry = Element::new("tabVisibilities")
///     .with_child(Element::new("tab").with_text("standard-Account"))
///     .with_child(Element::new("visibility").with_text("DefaultOn"));
/// assert_eq!(entry_key("tabVisibilities", &entry).as_deref(), Some("standard-Account"));
/// assert_eq!(entry_key("description", &entry), None);
/// ```
#[must_use]
pub fn entry_key(section: &str, element: &Element) -> Option<String> {
    let field = key_field_for(section)?;
    element.child(field).map(|child| child.trimmed_text().to_string())
}

/// Value of one field in a [`FieldDict`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// The child tag occurred once.
    Single(String),
    /// The child tag occurred several times; texts in document order.
    Repeated(Vec<String>),
}

impl FieldValue {
    fn push(&mut self, text: String) {
        match self {
            Self::Single(first) => {
                let first = std::mem::take(first);
                *self = Self::Repeated(vec![first, text]);
            }
            Self::Repeated(values) => values.push(text),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Single(value) => f.write_str(value),
            Self::Repeated(values) => write!(f, "[{}]", values.join(", ")),
        }
    }
}

/// Flattened view of an entry's immediate children: stripped tag to trimmed text.
pub type FieldDict = BTreeMap<String, FieldValue>;

/// Builds the [`FieldDict`] of an element.
///
/// Only immediate children are considered; nested content is not compared.
///
/// ```
/// # use permdiff_core::{field_dict, Element, FieldValue};
/// let entry = Element::new("loginHours")
///     .with_child(Element::new("mondayStart").with_text(" 480 "))
///     .with_child(Element::new("note").with_text("a"))
///     .with_child(Element::new("note").with_text("b"));
/// let fields = field_dict(&entry);
/// assert_eq!(fields["mondayStart"], FieldValue::Single("480".into()));
/// assert_eq!(fields["note"].to_string(), "[a, b]");
/// ```
#[must_use]
pub fn field_dict(element: &Element) -> FieldDict {
    let mut fields = FieldDict::new();
    for child in element.children() {
        let text = child.trimmed_text().to_string();
        match fields.get_mut(child.tag()) {
            Some(existing) => existing.push(text),
            None => {
                fields.insert(child.tag().to_string(), FieldValue::Single(text));
            }
        }
    }
    fields
}
