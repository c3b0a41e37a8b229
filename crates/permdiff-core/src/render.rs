//! Report rendering.
//!
//! The HTML page is fully self-contained: inline styles and script, no
//! external resources. Every piece of document-supplied text is escaped
//! here and nowhere else.

use quick_xml::escape::escape;
use serde::Serialize;

use crate::diff::{DifferingEntry, ExclusiveEntry, SectionDiff, SectionSummary};
use crate::schema::SINGLE_ENTRY_KEY;
use crate::{ComparisonReport, DocumentKind, FieldDict, RenderError, ReportConfig};

const STYLE: &str = r#"<style>
body { font-family: Arial, sans-serif; padding: 15px; background: #f5f5f5; }
h1 { margin-bottom: 0; }
.summary { margin-bottom: 15px; padding: 10px; background: #fff; border-radius: 5px; }
.summary table { border-collapse: collapse; width: 100%; table-layout: fixed; word-wrap: break-word; }
.summary th, .summary td { border: 1px solid #ccc; padding: 8px; text-align: center; }
.section { margin-bottom: 15px; background: #fff; border-radius: 5px; border: 1px solid #ccc; overflow-x: auto; }
.header { background-color: #ddd; padding: 10px; cursor: pointer; user-select: none; font-weight: bold; }
.content { display: none; padding: 10px; font-family: monospace; white-space: pre-wrap; background: #fafafa; border-top: 1px solid #ccc; }
.filter-box { margin-bottom: 15px; }
button { margin-right: 10px; padding: 6px 12px; font-size: 14px; }
.diff-only1 { background-color: #c8e6c9; }
.diff-only2 { background-color: #ffcdd2; }
.diff-diff { background-color: #ffe0b2; }
.field-changed { background-color: #ffcc80; }
.sidebyside { display: flex; gap: 10px; }
.sidebyside > div { flex: 1; padding: 5px; border: 1px solid #ccc; background: #fff; overflow-x: auto; }
</style>
"#;

const FILTER_BOX: &str = r#"<div class="filter-box">
  <label>Filter: <input type="text" id="filterInput" placeholder="Type to filter sections or keys..." style="width:300px"></label>
  <button onclick="expandAll()">Expand All</button>
  <button onclick="collapseAll()">Collapse All</button>
</div>
"#;

const SCRIPT: &str = r#"<script>
document.querySelectorAll('.header').forEach(header => {
    header.addEventListener('click', () => {
        const content = header.nextElementSibling;
        content.style.display = content.style.display === 'block' ? 'none' : 'block';
    });
});
function expandAll(){document.querySelectorAll('.content').forEach(c=>c.style.display='block');}
function collapseAll(){document.querySelectorAll('.content').forEach(c=>c.style.display='none');}
document.getElementById('filterInput').addEventListener('input', function() {
    const filter = this.value.toLowerCase();
    document.querySelectorAll('.section').forEach(section => {
        const secName = section.getAttribute('data-section');
        const content = section.querySelector('.content').textContent.toLowerCase();
        section.style.display = (secName.includes(filter)||content.includes(filter)) ? '' : 'none';
    });
});
</script>
"#;

impl ComparisonReport {
    /// Renders the report as a standalone interactive HTML page.
    ///
    /// ```
    /// # use permdiff_core::{compare_documents, Document, ReportConfig};
    /// let lhs = Document::parse_str("<Profile><custom>true</custom></Profile>")?.with_label("A");
    /// let rhs = Document::parse_str("<Profile><custom>false</custom></Profile>")?.with_label("B");
    /// let html = compare_documents(&lhs, &rhs).render_html(&ReportConfig::default());
    /// assert!(html.starts_with("<!DOCTYPE html>"));
    /// assert!(html.contains("<th>Only in A</th><th>Only in B</th>"));
    /// # Ok::<(), permdiff_core::LoadError>(())
    /// ```
    #[must_use]
    pub fn render_html(&self, config: &ReportConfig) -> String {
        let title = escape(config.title());
        let left = escape(self.left_label());
        let right = escape(self.right_label());

        let mut html = String::new();
        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\" />\n");
        html.push_str(&format!("<title>{title}</title>\n"));
        html.push_str(STYLE);
        html.push_str("</head>\n<body>\n");
        html.push_str(&format!("<h1>{title}</h1>\n"));
        html.push_str(FILTER_BOX);

        html.push_str("<div class=\"summary\">\n<h2>Summary of Differences</h2>\n<table>\n");
        html.push_str(&format!(
            "<thead><tr><th>Section</th><th>Only in {left}</th><th>Only in {right}</th><th>Different Values</th></tr></thead>\n"
        ));
        html.push_str("<tbody>\n");
        for (name, counts) in self.summary() {
            html.push_str(&summary_row(name, counts));
        }
        html.push_str("</tbody>\n</table>\n</div>\n");

        for section in self.sections() {
            render_section(&mut html, section, &left, &right);
        }

        html.push_str(SCRIPT);
        html.push_str("</body>\n</html>\n");
        html
    }

    /// Serializes the report as pretty-printed JSON.
    ///
    /// ```
    /// # use permdiff_core::{compare_documents, Document};
    /// let lhs = Document::parse_str("<PermissionSet><label>A</label></PermissionSet>")?;
    /// let rhs = Document::parse_str("<PermissionSet/>")?;
    /// let json = compare_documents(&lhs, &rhs).render_json()?;
    /// assert!(json.contains("\"kind\": \"PermissionSet\""));
    /// # Ok::<(), Box<dyn std::error::Error>>(())
    /// ```
    pub fn render_json(&self) -> Result<String, RenderError> {
        let view = JsonReport {
            kind: self.kind(),
            left: self.left_label(),
            right: self.right_label(),
            totals: self.totals(),
            sections: self
                .sections()
                .iter()
                .map(|section| JsonSection {
                    name: &section.name,
                    summary: section.summary(),
                    only_in_left: &section.only_in_left,
                    only_in_right: &section.only_in_right,
                    differing: &section.differing,
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&view)?)
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    kind: DocumentKind,
    left: &'a str,
    right: &'a str,
    totals: SectionSummary,
    sections: Vec<JsonSection<'a>>,
}

#[derive(Serialize)]
struct JsonSection<'a> {
    name: &'a str,
    summary: SectionSummary,
    only_in_left: &'a [ExclusiveEntry],
    only_in_right: &'a [ExclusiveEntry],
    differing: &'a [DifferingEntry],
}

fn summary_row(name: &str, counts: SectionSummary) -> String {
    format!(
        "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
        escape(name),
        counts.only_in_left,
        counts.only_in_right,
        counts.differing
    )
}

fn render_section(html: &mut String, section: &SectionDiff, left: &str, right: &str) {
    let name = escape(&section.name);
    html.push_str(&format!(
        "<div class=\"section\" data-section=\"{}\">\n",
        escape(&section.name.to_lowercase())
    ));
    html.push_str(&format!("<div class=\"header\">{name}</div>\n"));
    html.push_str("<div class=\"content\">\n");

    if !section.only_in_left.is_empty() {
        html.push_str(&format!("<b>Only in {left}:</b>\n"));
        for entry in &section.only_in_left {
            html.push_str(&exclusive_row("diff-only1", entry));
        }
    }

    if !section.only_in_right.is_empty() {
        html.push_str(&format!("<b>Only in {right}:</b>\n"));
        for entry in &section.only_in_right {
            html.push_str(&exclusive_row("diff-only2", entry));
        }
    }

    if !section.differing.is_empty() {
        html.push_str("<b>Different values:</b>\n");
        for entry in &section.differing {
            render_differing(html, entry, left, right);
        }
    }

    if section.is_empty() {
        html.push_str("<i>(no differences)</i>\n");
    }

    html.push_str("</div></div>\n");
}

fn exclusive_row(class: &str, entry: &ExclusiveEntry) -> String {
    format!(
        "<div class=\"{class}\">&lt;{}&gt; {}</div>\n",
        escape(entry.element.tag()),
        escape(display_key(&entry.key))
    )
}

fn render_differing(html: &mut String, entry: &DifferingEntry, left: &str, right: &str) {
    html.push_str(&format!(
        "<div class=\"diff-diff\"><b>{}</b>\n<div class=\"sidebyside\">\n",
        escape(display_key(&entry.key))
    ));
    html.push_str(&field_pane(left, &entry.left, &entry.right));
    html.push_str(&field_pane(right, &entry.right, &entry.left));
    html.push_str("</div></div>\n");
}

fn field_pane(label: &str, fields: &FieldDict, other: &FieldDict) -> String {
    let mut pane = format!("<div><u>{label}</u><br>");
    for (key, value) in fields {
        let line = format!("<b>{}</b>: {}", escape(key), escape(&value.to_string()));
        if other.get(key) == Some(value) {
            pane.push_str(&line);
        } else {
            pane.push_str(&format!("<span class=\"field-changed\">{line}</span>"));
        }
        pane.push_str("<br>");
    }
    pane.push_str("</div>\n");
    pane
}

fn display_key(key: &str) -> &str {
    if key.is_empty() {
        SINGLE_ENTRY_KEY
    } else {
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{compare_documents, Document, Element};

    fn report(lhs: &str, rhs: &str) -> ComparisonReport {
        let lhs = Document::parse_str(lhs).unwrap().with_label("Admin");
        let rhs = Document::parse_str(rhs).unwrap().with_label("Standard");
        compare_documents(&lhs, &rhs)
    }

    #[test]
    fn summary_lists_every_section() {
        let report = report(
            "<Profile><custom>true</custom><userLicense>Salesforce</userLicense></Profile>",
            "<Profile><custom>true</custom><loginIpRanges/></Profile>",
        );
        let html = report.render_html(&ReportConfig::default());
        assert!(html.contains("<tr><td>custom</td><td>0</td><td>0</td><td>0</td></tr>"));
        assert!(html.contains("<tr><td>loginIpRanges</td><td>0</td><td>0</td><td>0</td></tr>"));
        assert!(html.contains("<tr><td>userLicense</td><td>1</td><td>0</td><td>0</td></tr>"));
        assert!(html.contains("<i>(no differences)</i>"));
        assert!(html.contains("<div class=\"diff-only1\">&lt;userLicense&gt; (single)</div>"));
    }

    #[test]
    fn document_text_is_escaped() {
        let report = report(
            "<Profile><userPermissions><enabled>true</enabled><name>&lt;script&gt;alert(1)&lt;/script&gt;</name></userPermissions>\
             <loginHours><mondayStart>safe &amp; sound</mondayStart></loginHours></Profile>",
            "<Profile><loginHours><mondayStart>480</mondayStart></loginHours></Profile>",
        );
        let html = report.render_html(&ReportConfig::default().with_title("<b>title</b>"));
        assert!(!html.contains("<script>alert(1)"));
        assert!(html.contains("&lt;userPermissions&gt; &lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(html.contains("<b>mondayStart</b>: safe &amp; sound"));
        assert!(html.contains("<h1>&lt;b&gt;title&lt;/b&gt;</h1>"));
    }

    #[test]
    fn labels_head_columns_and_panes() {
        let report = report(
            "<Profile><userPermissions><enabled>true</enabled><name>ViewAllData</name></userPermissions></Profile>",
            "<Profile><userPermissions><enabled>false</enabled><name>ViewAllData</name></userPermissions></Profile>",
        );
        let html = report.render_html(&ReportConfig::default());
        assert!(html.contains("<th>Only in Admin</th><th>Only in Standard</th>"));
        assert!(html.contains("<div><u>Admin</u><br>"));
        assert!(html.contains("<div><u>Standard</u><br>"));
        assert!(html.contains("<span class=\"field-changed\"><b>enabled</b>: true</span>"));
        assert!(html.contains("<span class=\"field-changed\"><b>enabled</b>: false</span>"));
        assert!(html.contains("<b>name</b>: ViewAllData<br>"));
    }

    #[test]
    fn section_marker_is_lowercased() {
        let report = report("<Profile><fieldPermissions/></Profile>", "<Profile/>");
        let html = report.render_html(&ReportConfig::default());
        assert!(html.contains("data-section=\"fieldpermissions\""));
        assert!(html.contains("<div class=\"header\">fieldPermissions</div>"));
    }

    #[test]
    fn empty_keys_display_as_single() {
        let entry = ExclusiveEntry::new("", &Element::new("layoutAssignments"));
        assert_eq!(
            exclusive_row("diff-only2", &entry),
            "<div class=\"diff-only2\">&lt;layoutAssignments&gt; (single)</div>\n"
        );
    }

    #[test]
    fn json_report_round_trips_through_serde() {
        let report = report(
            "<Profile><userPermissions><enabled>true</enabled><name>ModifyAllData</name></userPermissions></Profile>",
            "<Profile/>",
        );
        let json: serde_json::Value = serde_json::from_str(&report.render_json().unwrap()).unwrap();
        assert_eq!(json["kind"], "Profile");
        assert_eq!(json["left"], "Admin");
        assert_eq!(json["totals"]["only_in_left"], 1);
        let section = &json["sections"][0];
        assert_eq!(section["name"], "userPermissions");
        assert_eq!(section["only_in_left"][0]["key"], "ModifyAllData");
    }
}
