use permdiff_core::{compare_documents, Document, ReportConfig};

#[test]
fn top_level_readme_quickstart() -> Result<(), Box<dyn std::error::Error>> {
    let admin = Document::parse_str(
        "<Profile><userPermissions><enabled>true</enabled><name>ModifyAllData</name></userPermissions></Profile>",
    )?
    .with_label("Admin");
    let standard = Document::parse_str("<Profile/>")?.with_label("Standard");

    let report = compare_documents(&admin, &standard);
    assert!(report.has_differences());

    let html = report.render_html(&ReportConfig::default());
    assert!(html.contains("&lt;userPermissions&gt; ModifyAllData"));
    Ok(())
}
