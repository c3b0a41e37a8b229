//! Static knowledge about Profile and PermissionSet sections.
//!
//! New repeated entity types are added to [`KEY_FIELDS`]; new single-valued
//! settings to [`SINGLE_OCCURRENCE_TAGS`]. The differ reads both tables and
//! needs no changes when they grow.

/// Maps a repeated section to the child tag that identifies each entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyField {
    /// Namespace-stripped section tag.
    pub section: &'static str,
    /// Namespace-stripped child tag whose text is the entry key.
    pub field: &'static str,
}

const fn key(section: &'static str, field: &'static str) -> KeyField {
    KeyField { section, field }
}

/// Sections whose entries are matched across documents by a key field.
pub const KEY_FIELDS: &[KeyField] = &[
    key("userPermissions", "name"),
    key("fieldPermissions", "field"),
    key("objectPermissions", "object"),
    key("recordTypeVisibilities", "recordType"),
    key("applicationVisibilities", "application"),
    key("classAccesses", "apexClass"),
    key("pageAccesses", "apexPage"),
    key("tabVisibilities", "tab"),
    key("tabSettings", "tab"),
    key("customPermissions", "name"),
    key("layoutAssignments", "layout"),
    key("externalDataSourceAccesses", "externalDataSource"),
    key("customMetadataTypeAccesses", "name"),
    key("customSettingAccesses", "name"),
    key("agentAccesses", "agent"),
    key("emailRoutingAddressAccesses", "emailRoutingAddress"),
    key("externalCredentialPrincipalAccesses", "externalCredentialPrincipal"),
    key("flowAccesses", "flow"),
    key("ServicePresenceStatusAccesses", "servicePresenceStatus"),
    key("categoryGroupVisibilities", "dataCategoryGroup"),
    key("loginIpRanges", "startAddress"),
    key("profileActionOverrides", "actionName"),
];

/// Unkeyed sections that are still compared, as a single value per document.
///
/// Any other unkeyed section is left out of the comparison.
pub const SINGLE_OCCURRENCE_TAGS: &[&str] = &[
    "description",
    "hasActivationRequired",
    "label",
    "license",
    "userLicense",
    "fullName",
    "custom",
    "loginHours",
];

/// Key reported for single-occurrence comparisons.
pub const SINGLE_ENTRY_KEY: &str = "(single)";

/// Returns the key field configured for `section`.
///
/// ```
/// # use permdiff_core::schema::key_field_for;
/// assert_eq!(key_field_for("fieldPermissions"), Some("field"));
/// assert_eq!(key_field_for("label"), None);
/// ```
#[must_use]
pub fn key_field_for(section: &str) -> Option<&'static str> {
    KEY_FIELDS.iter().find(|entry| entry.section == section).map(|entry| entry.field)
}

/// Indicates whether `section` is compared as a single value.
#[must_use]
pub fn is_single_occurrence(section: &str) -> bool {
    SINGLE_OCCURRENCE_TAGS.contains(&section)
}
