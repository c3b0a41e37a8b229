//! Fuzzing harnesses for `permdiff`.
//!
//! Each public function accepts raw bytes, so the same entry points serve
//! `cargo fuzz` targets and plain smoke tests. Recoverable errors are
//! swallowed; broken invariants panic.
//!
//! # Examples
//!
//! Feed raw text to the XML loader:
//!
//! ```
//! permdiff_fuzz::fuzz_load(b"<Profile><custom>true</custom></Profile>");
//! ```
//!
//! Compare two generated documents:
//!
//! ```
//! permdiff_fuzz::fuzz_compare(&[1, 2, 3, 4]);
//! ```
#![forbid(unsafe_code)]
#![warn(missing_docs)]

use arbitrary::Unstructured;
use permdiff_core::schema::{KEY_FIELDS, SINGLE_OCCURRENCE_TAGS};
use permdiff_core::{compare_documents, Document, Element, ReportConfig};

const MAX_SECTIONS: u8 = 12;
const MAX_FIELDS: u8 = 4;
const MAX_STRING_LEN: u8 = 10;
const EXTRA_SECTIONS: [&str; 2] = ["userLicenseType", "loginFlows"];

/// Parses arbitrary bytes as a document and, when that succeeds, compares
/// it with itself.
///
/// ```
/// permdiff_fuzz::fuzz_load(b"not xml at all");
/// ```
pub fn fuzz_load(data: &[u8]) {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(document) = Document::parse_str(text) else {
        return;
    };
    let report = compare_documents(&document, &document);
    assert!(!report.has_differences(), "a document differs from itself");
}

/// Compares two generated profiles in both directions and checks that the
/// results mirror each other.
///
/// ```
/// permdiff_fuzz::fuzz_compare(b"compare");
/// ```
pub fn fuzz_compare(data: &[u8]) {
    let Some((lhs, rhs)) = random_pair(data) else {
        return;
    };
    let forward = compare_documents(&lhs, &rhs);
    let backward = compare_documents(&rhs, &lhs);
    assert_eq!(forward.sections().len(), backward.sections().len());
    for (ahead, behind) in forward.sections().iter().zip(backward.sections()) {
        assert_eq!(ahead.name, behind.name);
        assert_eq!(ahead.only_in_left, behind.only_in_right);
        assert_eq!(ahead.only_in_right, behind.only_in_left);
        assert_eq!(ahead.differing.len(), behind.differing.len());
        for (there, back) in ahead.differing.iter().zip(&behind.differing) {
            assert_eq!(there.left, back.right);
            assert_eq!(there.right, back.left);
        }
    }
}

/// Renders the comparison of two generated profiles in every format.
///
/// ```
/// permdiff_fuzz::fuzz_render(b"render");
/// ```
pub fn fuzz_render(data: &[u8]) {
    let Some((lhs, rhs)) = random_pair(data) else {
        return;
    };
    let report = compare_documents(&lhs, &rhs);
    let html = report.render_html(&ReportConfig::default());
    assert_eq!(html.matches("<div class=\"section\"").count(), report.sections().len());
    assert_eq!(html.matches("<script>").count(), 1, "unescaped markup in report");
    let _ = report.render_json();
}

fn random_pair(data: &[u8]) -> Option<(Document, Document)> {
    let mut unstructured = Unstructured::new(data);
    let lhs = random_document(&mut unstructured).ok()?;
    let rhs = random_document(&mut unstructured).ok()?;
    Some((lhs, rhs))
}

fn random_document(unstructured: &mut Unstructured<'_>) -> arbitrary::Result<Document> {
    let mut root = Element::new("Profile");
    let sections = unstructured.int_in_range::<u8>(0..=MAX_SECTIONS)?;
    for _ in 0..sections {
        root = root.with_child(random_section(unstructured)?);
    }
    Ok(Document::from_root(root).with_label(random_string(unstructured)?))
}

fn random_section(unstructured: &mut Unstructured<'_>) -> arbitrary::Result<Element> {
    match unstructured.int_in_range::<u8>(0..=2)? {
        0 => {
            let key = unstructured.choose(KEY_FIELDS)?;
            let mut entry = Element::new(key.section);
            if unstructured.ratio(7, 8)? {
                let value = random_string(unstructured)?;
                entry = entry.with_child(Element::new(key.field).with_text(value));
            }
            let fields = unstructured.int_in_range::<u8>(0..=MAX_FIELDS)?;
            for index in 0..fields {
                entry = entry.with_child(
                    Element::new(format!("field{index}")).with_text(random_string(unstructured)?),
                );
            }
            Ok(entry)
        }
        1 => {
            let tag = unstructured.choose(SINGLE_OCCURRENCE_TAGS)?;
            Ok(Element::new(*tag).with_text(random_string(unstructured)?))
        }
        _ => {
            let tag = unstructured.choose(&EXTRA_SECTIONS)?;
            Ok(Element::new(*tag).with_text(random_string(unstructured)?))
        }
    }
}

fn random_string(unstructured: &mut Unstructured<'_>) -> arbitrary::Result<String> {
    let len = usize::from(unstructured.int_in_range::<u8>(0..=MAX_STRING_LEN)?);
    let mut string = String::with_capacity(len);
    for _ in 0..len {
        let byte = unstructured.int_in_range::<u8>(0x20..=0x7e)?;
        string.push(char::from(byte));
    }
    Ok(string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_harness_accepts_garbage() {
        fuzz_load(b"<Profile><custom>");
        fuzz_load(&[0xff, 0xfe, 0x00]);
    }

    #[test]
    fn compare_harness_runs() {
        fuzz_compare(b"compare two generated profiles with plenty of entropy");
    }

    #[test]
    fn render_harness_runs() {
        fuzz_render(b"<script>alert(1)</script> & friends, rendered twice over");
    }

    #[test]
    fn generated_documents_are_profiles() {
        let mut unstructured = Unstructured::new(b"some seed bytes for a profile");
        let document = random_document(&mut unstructured).unwrap();
        assert!(document.kind().is_recognized());
    }
}
