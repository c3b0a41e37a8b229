use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default report heading.
pub const DEFAULT_TITLE: &str = "Metadata Comparison Report";

/// Default report file name, relative to the working directory.
pub const DEFAULT_OUTPUT: &str = "comparison_report.html";

/// Presentation settings for rendered reports.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReportConfig {
    title: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { title: DEFAULT_TITLE.to_string() }
    }
}

impl ReportConfig {
    /// Constructs a configuration with the default title.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the report heading.
    ///
    /// ```
    /// # use permdiff_core::ReportConfig;
    /// let config = ReportConfig::new().with_title("Admin vs Standard");
    /// assert_eq!(config.title(), "Admin vs Standard");
    /// ```
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Report heading.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }
}

/// Output encoding of a report.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    /// Standalone interactive HTML page.
    #[default]
    Html,
    /// Machine-readable JSON.
    Json,
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Html => f.write_str("html"),
            Self::Json => f.write_str("json"),
        }
    }
}

impl FromStr for ReportFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "html" => Ok(Self::Html),
            "json" => Ok(Self::Json),
            other => Err(format!("unsupported report format: {other}")),
        }
    }
}

/// Settings for one end-to-end comparison run.
///
/// ```
/// # use permdiff_core::{ReportFormat, RunConfig};
/// let config = RunConfig::default().with_format(ReportFormat::Json).with_output("out.json");
/// assert_eq!(config.output().to_str(), Some("out.json"));
/// assert!(config.inputs().is_none());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    dir: PathBuf,
    inputs: Option<Vec<PathBuf>>,
    output: PathBuf,
    format: ReportFormat,
    report: ReportConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            inputs: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            format: ReportFormat::Html,
            report: ReportConfig::default(),
        }
    }
}

impl RunConfig {
    /// Sets the directory scanned for input documents.
    #[must_use]
    pub fn with_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = dir.into();
        self
    }

    /// Uses explicit input paths instead of scanning the directory.
    #[must_use]
    pub fn with_inputs<I, P>(mut self, inputs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.inputs = Some(inputs.into_iter().map(Into::into).collect());
        self
    }

    /// Sets the report destination.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Sets the report encoding.
    #[must_use]
    pub fn with_format(mut self, format: ReportFormat) -> Self {
        self.format = format;
        self
    }

    /// Sets the presentation settings.
    #[must_use]
    pub fn with_report(mut self, report: ReportConfig) -> Self {
        self.report = report;
        self
    }

    /// Directory scanned for inputs.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Explicit inputs, when configured.
    #[must_use]
    pub fn inputs(&self) -> Option<&[PathBuf]> {
        self.inputs.as_deref()
    }

    /// Report destination.
    #[must_use]
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Report encoding.
    #[must_use]
    pub fn format(&self) -> ReportFormat {
        self.format
    }

    /// Presentation settings.
    #[must_use]
    pub fn report(&self) -> &ReportConfig {
        &self.report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_parses_case_insensitively() {
        assert_eq!("HTML".parse::<ReportFormat>(), Ok(ReportFormat::Html));
        assert_eq!("json".parse::<ReportFormat>(), Ok(ReportFormat::Json));
        assert_eq!(
            "yaml".parse::<ReportFormat>(),
            Err("unsupported report format: yaml".to_string())
        );
    }

    #[test]
    fn run_config_defaults_to_working_directory() {
        let config = RunConfig::default();
        assert_eq!(config.dir(), Path::new("."));
        assert_eq!(config.output(), Path::new(DEFAULT_OUTPUT));
        assert_eq!(config.format(), ReportFormat::Html);
        assert_eq!(config.report().title(), DEFAULT_TITLE);
    }

    #[test]
    fn explicit_inputs_are_kept_in_order() {
        let config = RunConfig::default().with_inputs(["b.xml", "a.xml"]);
        let inputs: Vec<_> = config.inputs().unwrap().iter().map(|p| p.to_str().unwrap()).collect();
        assert_eq!(inputs, ["b.xml", "a.xml"]);
    }
}
