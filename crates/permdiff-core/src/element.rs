use serde::Serialize;

/// Removes any namespace qualifier from an element name.
///
/// Both Clark notation (`{uri}local`) and prefixed names (`prefix:local`)
/// are reduced to their local part. Every tag comparison in the crate goes
/// through this function.
///
/// ```
/// # use permdiff_core::strip_namespace;
/// assert_eq!(strip_namespace("{http://soap.sforce.com/2006/04/metadata}Profile"), "Profile");
/// assert_eq!(strip_namespace("md:userPermissions"), "userPermissions");
/// assert_eq!(strip_namespace("label"), "label");
/// ```
#[must_use]
pub fn strip_namespace(name: &str) -> &str {
    if let Some(rest) = name.strip_prefix('{') {
        if let Some((_, local)) = rest.split_once('}') {
            return local;
        }
    }
    match name.split_once(':') {
        Some((_, local)) => local,
        None => name,
    }
}

/// A parsed markup element.
///
/// The qualified name is kept as written in the source; [`Element::tag`]
/// returns the namespace-stripped form used for comparisons. Text is the
/// raw character data preceding the first child element.
///
/// ```
/// # use permdiff_core::Element;
/// let entry = Element::new("userPermissions")
///     .with_child(Element::new("enabled").with_text("true"))
///     .with_child(Element::new("name").with_text("ViewAllData"));
/// assert_eq!(entry.child("name").map(Element::trimmed_text), Some("ViewAllData"));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Element {
    name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attributes: Vec<(String, String)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<Element>,
}

impl Element {
    /// Creates an element without attributes, text or children.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Appends an attribute.
    #[must_use]
    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push((key.into(), value.into()));
        self
    }

    /// Sets the text content.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Appends a child element.
    #[must_use]
    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    /// Qualified name as written in the document.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Namespace-stripped tag name.
    #[must_use]
    pub fn tag(&self) -> &str {
        strip_namespace(&self.name)
    }

    /// Attributes in document order.
    #[must_use]
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    /// Looks up an attribute by its qualified name.
    #[must_use]
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }

    /// Raw text content, if any.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// Text content with surrounding whitespace removed; empty when absent.
    #[must_use]
    pub fn trimmed_text(&self) -> &str {
        self.text.as_deref().map_or("", str::trim)
    }

    /// Child elements in document order.
    #[must_use]
    pub fn children(&self) -> &[Element] {
        &self.children
    }

    /// First child whose stripped tag equals `tag`.
    #[must_use]
    pub fn child(&self, tag: &str) -> Option<&Element> {
        self.children.iter().find(|child| child.tag() == tag)
    }

    pub(crate) fn push_child(&mut self, child: Element) {
        self.children.push(child);
    }

    pub(crate) fn push_attribute(&mut self, key: String, value: String) {
        self.attributes.push((key, value));
    }

    pub(crate) fn append_text(&mut self, text: &str) {
        match &mut self.text {
            Some(existing) => existing.push_str(text),
            None => self.text = Some(text.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_namespace_handles_malformed_clark_names() {
        assert_eq!(strip_namespace("{unterminated"), "{unterminated");
        assert_eq!(strip_namespace("{urn}"), "");
    }

    #[test]
    fn strip_namespace_only_splits_first_colon() {
        assert_eq!(strip_namespace("a:b:c"), "b:c");
    }

    #[test]
    fn child_lookup_ignores_prefixes() {
        let element = Element::new("sf:fieldPermissions")
            .with_child(Element::new("sf:field").with_text(" Account.Name "));
        assert_eq!(element.tag(), "fieldPermissions");
        assert_eq!(element.child("field").map(Element::trimmed_text), Some("Account.Name"));
        assert!(element.child("sf:field").is_none());
    }

    #[test]
    fn trimmed_text_defaults_to_empty() {
        assert_eq!(Element::new("label").trimmed_text(), "");
        assert_eq!(Element::new("label").with_text("\n  \t").trimmed_text(), "");
    }

    #[test]
    fn attribute_lookup_returns_first_match() {
        let element = Element::new("Profile").with_attribute("xmlns", "urn:a");
        assert_eq!(element.attribute("xmlns"), Some("urn:a"));
        assert_eq!(element.attribute("missing"), None);
    }
}
