use permdiff_benches::available_corpora;
use permdiff_core::ReportConfig;

#[test]
fn permdiff_benches_readme_example() -> Result<(), Box<dyn std::error::Error>> {
    let corpus = available_corpora().iter().find(|c| c.name() == "small").expect("registered corpus");
    let dataset = corpus.load()?;
    let report = dataset.compare();
    assert!(report.has_differences());

    let permissions = report.section("userPermissions").expect("section compared");
    // Every fifth entry flips `enabled`; every tenth, offset by one, moves its key.
    assert_eq!(permissions.differing.len(), 4);
    assert_eq!(permissions.only_in_left.len(), 2);
    assert_eq!(permissions.only_in_right.len(), 2);

    let html = report.render_html(&ReportConfig::default());
    assert!(html.contains("Only in small-a"));
    Ok(())
}

#[test]
fn corpora_grow_in_size() {
    let sizes: Vec<_> = available_corpora().iter().map(|c| c.entries()).collect();
    let mut sorted = sizes.clone();
    sorted.sort_unstable();
    assert_eq!(sizes, sorted);
}
