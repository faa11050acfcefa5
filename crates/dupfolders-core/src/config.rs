//! Analysis and report configuration types.

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Default minimum shared size for a folder group to be reported (50 MB).
pub const DEFAULT_MIN_GROUP_SIZE: u64 = 50_000_000;

/// Default root segment preceding the shared folder name in report paths.
pub const DEFAULT_VOLUME_ROOT: &str = "/volume1";

/// Header row a duplicate report must start with.
pub const EXPECTED_HEADER: [&str; 5] = [
    "Group",
    "Shared Folder",
    "File",
    "Size(Byte)",
    "Modified Time",
];

/// Configuration for folder group analysis.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct AnalyzerConfig {
    /// Minimum shared size in bytes for a group to be kept.
    #[builder(default = "DEFAULT_MIN_GROUP_SIZE")]
    #[serde(default = "default_min_group_size")]
    pub min_group_size: u64,

    /// Merge groups whose folders are nested in one another.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub compact_nested: bool,

    /// Maximum number of groups to return (0 = unlimited).
    #[builder(default = "0")]
    #[serde(default)]
    pub max_groups: usize,
}

fn default_true() -> bool {
    true
}

fn default_min_group_size() -> u64 {
    DEFAULT_MIN_GROUP_SIZE
}

fn default_volume_root() -> String {
    DEFAULT_VOLUME_ROOT.to_string()
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            min_group_size: DEFAULT_MIN_GROUP_SIZE,
            compact_nested: true,
            max_groups: 0,
        }
    }
}

impl AnalyzerConfig {
    /// Create a new config builder.
    pub fn builder() -> AnalyzerConfigBuilder {
        AnalyzerConfigBuilder::default()
    }

    /// Create a config with the given threshold and defaults otherwise.
    pub fn with_min_group_size(min_group_size: u64) -> Self {
        Self {
            min_group_size,
            ..Self::default()
        }
    }
}

/// Configuration for reading duplicate reports.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ReportConfig {
    /// Root segment that every file path must start with.
    #[builder(default = "DEFAULT_VOLUME_ROOT.to_string()")]
    #[serde(default = "default_volume_root")]
    pub volume_root: String,

    /// Derive the folder from the file path instead of the folder column.
    #[builder(default = "false")]
    #[serde(default)]
    pub derive_folder_from_path: bool,

    /// Reject rows whose path does not follow `<root>/<folder>/...`.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub validate_paths: bool,
}

impl ReportConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.volume_root {
            if root.is_empty() {
                return Err("Volume root cannot be empty".to_string());
            }
            if !root.starts_with('/') {
                return Err(format!("Volume root must be absolute: {root}"));
            }
        }
        Ok(())
    }
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            volume_root: DEFAULT_VOLUME_ROOT.to_string(),
            derive_folder_from_path: false,
            validate_paths: true,
        }
    }
}

impl ReportConfig {
    /// Create a new config builder.
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::default()
    }

    /// Whether the reader needs a folder extractor for this config.
    pub fn needs_path_parsing(&self) -> bool {
        self.validate_paths || self.derive_folder_from_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyzer_config_defaults() {
        let config = AnalyzerConfig::default();
        assert_eq!(config.min_group_size, 50_000_000);
        assert!(config.compact_nested);
        assert_eq!(config.max_groups, 0);

        let built = AnalyzerConfig::builder().build().unwrap();
        assert_eq!(built.min_group_size, config.min_group_size);
    }

    #[test]
    fn test_analyzer_config_builder() {
        let config = AnalyzerConfig::builder()
            .min_group_size(1500u64)
            .compact_nested(false)
            .max_groups(3usize)
            .build()
            .unwrap();

        assert_eq!(config.min_group_size, 1500);
        assert!(!config.compact_nested);
        assert_eq!(config.max_groups, 3);
    }

    #[test]
    fn test_report_config_rejects_relative_root() {
        let result = ReportConfig::builder().volume_root("volume1").build();
        assert!(result.is_err());

        let result = ReportConfig::builder().volume_root("").build();
        assert!(result.is_err());
    }

    #[test]
    fn test_report_config_from_json() {
        let config: ReportConfig = serde_json::from_str(r#"{"derive_folder_from_path": true}"#).unwrap();
        assert_eq!(config.volume_root, "/volume1");
        assert!(config.derive_folder_from_path);
        assert!(config.validate_paths);
        assert!(config.needs_path_parsing());
    }
}
