//! Shared folder extraction from report paths.

use regex::Regex;

use dupfolders_core::{DEFAULT_VOLUME_ROOT, ReportError};

/// Extracts the shared folder name from paths of the form
/// `<root>/<folder>/...`.
#[derive(Debug, Clone)]
pub struct FolderExtractor {
    root: String,
    pattern: Regex,
}

impl FolderExtractor {
    /// Create an extractor for paths under `root`, e.g. `/volume1`.
    pub fn new(root: impl Into<String>) -> Result<Self, ReportError> {
        let root = root.into();
        let trimmed = root.trim_end_matches('/');
        let pattern = Regex::new(&format!("^{}/([^/]+)/", regex::escape(trimmed))).map_err(|e| {
            ReportError::InvalidConfig {
                message: format!("Cannot build path pattern for {root}: {e}"),
            }
        })?;

        Ok(Self {
            root: trimmed.to_string(),
            pattern,
        })
    }

    /// Root segment this extractor matches against.
    pub fn root(&self) -> &str {
        &self.root
    }

    /// Return the shared folder name of `path`.
    pub fn extract<'a>(&self, path: &'a str) -> Result<&'a str, ReportError> {
        self.pattern
            .captures(path)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .ok_or_else(|| ReportError::PathPattern {
                path: path.to_string(),
                root: self.root.clone(),
            })
    }
}

/// Extract the shared folder name using the default `/volume1` root.
pub fn extract_folder_name(path: &str) -> Result<String, ReportError> {
    let extractor = FolderExtractor::new(DEFAULT_VOLUME_ROOT)?;
    extractor.extract(path).map(str::to_string)
}
