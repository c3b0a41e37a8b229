//! End-to-end comparison run: discover, validate, compare, render, write.
//!
//! Every failure is terminal. Nothing is written unless the whole pipeline
//! succeeds.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::diff::SectionSummary;
use crate::{
    compare_documents, CompareError, ComparisonReport, Document, DocumentKind, ReportFormat,
    RunConfig,
};

/// What a successful run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutcome {
    /// Kind shared by both documents.
    pub kind: DocumentKind,
    /// The two compared documents, in comparison order.
    pub inputs: [PathBuf; 2],
    /// Where the report was written.
    pub output: PathBuf,
    /// Difference counts over all sections.
    pub totals: SectionSummary,
    /// Number of sections in the report.
    pub sections: usize,
}

/// Indicates whether `path` names a candidate document (`.xml`, any case).
///
/// ```
/// # use permdiff_core::is_candidate_document;
/// assert!(is_candidate_document("Admin.profile-meta.XML"));
/// assert!(!is_candidate_document("comparison_report.html"));
/// ```
#[must_use]
pub fn is_candidate_document(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .file_name()
        .is_some_and(|name| name.to_string_lossy().to_lowercase().ends_with(".xml"))
}

/// Lists candidate documents in `dir`, sorted by path.
///
/// Only regular files count. A directory named `nested.xml` is skipped and
/// does not count towards the two-input rule.
pub fn discover_inputs(dir: &Path) -> Result<Vec<PathBuf>, CompareError> {
    let discover_error = |source| CompareError::Discover { dir: dir.to_path_buf(), source };
    let mut found = Vec::new();
    for entry in fs::read_dir(dir).map_err(discover_error)? {
        let path = entry.map_err(discover_error)?.path();
        if path.is_file() && is_candidate_document(&path) {
            found.push(path);
        }
    }
    found.sort();
    debug!(dir = %dir.display(), found = found.len(), "discovered candidate documents");
    Ok(found)
}

/// Loads both documents and checks that they are of the same recognized kind.
pub fn load_pair(lhs: &Path, rhs: &Path) -> Result<(Document, Document), CompareError> {
    let left = load(lhs)?;
    let right = load(rhs)?;

    for (path, document) in [(lhs, &left), (rhs, &right)] {
        if !document.kind().is_recognized() {
            return Err(CompareError::UnrecognizedType {
                path: path.to_path_buf(),
                root: document.root().tag().to_string(),
            });
        }
    }

    if left.kind() != right.kind() {
        return Err(CompareError::TypeMismatch {
            left: lhs.to_path_buf(),
            left_kind: left.kind(),
            right: rhs.to_path_buf(),
            right_kind: right.kind(),
        });
    }

    Ok((left, right))
}

/// Renders a report in the requested format.
pub fn render_report(
    report: &ComparisonReport,
    config: &RunConfig,
) -> Result<String, CompareError> {
    match config.format() {
        ReportFormat::Html => Ok(report.render_html(config.report())),
        ReportFormat::Json => Ok(report.render_json()?),
    }
}

/// Runs a full comparison and writes the report.
///
/// ```no_run
/// # use permdiff_core::{run, RunConfig};
/// let outcome = run(&RunConfig::default())?;
/// println!("Comparison report written to {}", outcome.output.display());
/// # Ok::<(), permdiff_core::CompareError>(())
/// ```
pub fn run(config: &RunConfig) -> Result<RunOutcome, CompareError> {
    let candidates = match config.inputs() {
        Some(inputs) => inputs.to_vec(),
        None => discover_inputs(config.dir())?,
    };
    let [lhs, rhs] = <[PathBuf; 2]>::try_from(candidates).map_err(|candidates| {
        CompareError::InputCount { dir: config.dir().to_path_buf(), found: candidates.len() }
    })?;

    let (left, right) = load_pair(&lhs, &rhs)?;
    info!("Detected both files as {}s.", left.kind());
    info!("Comparing {} and {}", lhs.display(), rhs.display());

    let report = compare_documents(&left, &right);
    let rendered = render_report(&report, config)?;

    fs::write(config.output(), rendered)
        .map_err(|source| CompareError::Write { path: config.output().to_path_buf(), source })?;

    Ok(RunOutcome {
        kind: report.kind(),
        inputs: [lhs, rhs],
        output: config.output().to_path_buf(),
        totals: report.totals(),
        sections: report.sections().len(),
    })
}

fn load(path: &Path) -> Result<Document, CompareError> {
    Document::load(path)
        .map_err(|source| CompareError::MalformedDocument { path: path.to_path_buf(), source })
}
