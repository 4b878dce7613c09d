//! Excluded-rows registry
//!
//! Holds the set of row labels that are dropped from every comparison.
//! The set is loaded once per run from a JSON config file; on first run
//! the file is created with the built-in defaults and the run stops so
//! the operator can review the list before any comparison happens.

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Labels excluded by default: tracking metadata and browser noise rows
/// that differ between every pair of exports without being meaningful.
pub const DEFAULT_EXCLUDED_ROWS: &[&str] = &[
    "Timestamp",
    "Time Since Page Load",
    "Initiator",
    "frame",
    "hitId",
    "isMultiSuiteTagging",
    "isTruncated",
    "reportSuiteIds",
    "returnType",
    "trackingServer",
    "version",
    ".a",
    ".activitymap",
    ".c",
    "a.",
    "Activity Map Link",
    "Activity Map Page",
    "Activity Map Page Type",
    "Activity Map Region",
    "activitymap.",
    "Audience Manager Blob",
    "Audience Manager Location Hint",
    "Browser Window Height",
    "Browser Window Width",
    "c.getPreviousValue",
    "c.getQueryParam",
    "c.pt",
    "Character Set",
    "ClickMap Object ID",
    "ClickMap Object Tag Name",
    "ClickMap Page ID",
    "ClickMap Page ID Type",
    "Color quality",
    "Context Data",
    "Cookie Domain",
    "Cookies Enabled",
    "Currency Code",
];

/// The set of row labels excluded from a comparison run
///
/// Immutable once resolved; the whole pipeline shares one instance.
#[derive(Debug, Clone, Default)]
pub struct RowFilterSet {
    labels: HashSet<String>,
}

impl RowFilterSet {
    /// Create an empty filter set (nothing excluded)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a filter set from an iterator of labels, deduplicating
    pub fn from_labels<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether a label is excluded
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(label)
    }

    /// Number of excluded labels
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// True if nothing is excluded
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Load the excluded-rows config, bootstrapping it on first run
///
/// If `path` exists it is parsed as a JSON array of labels. If it does
/// not, the default list is written there and the call fails with
/// [`Error::ConfigMissing`] so the caller stops before comparing;
/// the operator is expected to review the generated file and re-run.
pub fn resolve_filter_set<P: AsRef<Path>>(path: P) -> Result<RowFilterSet> {
    let path = path.as_ref();

    if !path.exists() {
        write_default_config(path)?;
        return Err(Error::ConfigMissing {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let labels: Vec<String> = serde_json::from_str(&content)?;
    let set = RowFilterSet::from_labels(labels);
    debug!(config = %path.display(), excluded = set.len(), "loaded filter set");

    Ok(set)
}

/// Write the built-in default list to `path` as pretty-printed JSON
pub fn write_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let content = serde_json::to_string_pretty(DEFAULT_EXCLUDED_ROWS)?;
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_labels_dedupes() {
        let set = RowFilterSet::from_labels(["Timestamp", "Timestamp", "frame"]);
        assert_eq!(set.len(), 2);
        assert!(set.contains("Timestamp"));
        assert!(set.contains("frame"));
    }

    #[test]
    fn test_empty_set() {
        let set = RowFilterSet::empty();
        assert!(set.is_empty());
        assert!(!set.contains("Timestamp"));
    }

    #[test]
    fn test_resolve_missing_config_bootstraps() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");

        let err = resolve_filter_set(&config).unwrap_err();
        assert!(matches!(err, Error::ConfigMissing { .. }));

        // The defaults must now be on disk, ready for review
        let content = std::fs::read_to_string(&config).unwrap();
        let labels: Vec<String> = serde_json::from_str(&content).unwrap();
        assert_eq!(labels.len(), DEFAULT_EXCLUDED_ROWS.len());
        assert_eq!(labels[0], "Timestamp");
    }

    #[test]
    fn test_resolve_existing_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, r#"["Timestamp", "Custom Row"]"#).unwrap();

        let set = resolve_filter_set(&config).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains("Custom Row"));
    }

    #[test]
    fn test_resolve_second_run_uses_written_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");

        assert!(resolve_filter_set(&config).is_err());
        let set = resolve_filter_set(&config).unwrap();
        assert_eq!(set.len(), DEFAULT_EXCLUDED_ROWS.len());
        assert!(set.contains("Currency Code"));
    }

    #[test]
    fn test_resolve_malformed_config() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("config.json");
        std::fs::write(&config, "{not json").unwrap();

        assert!(matches!(
            resolve_filter_set(&config),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_write_default_config_creates_parents() {
        let dir = tempfile::tempdir().unwrap();
        let config = dir.path().join("nested").join("config.json");

        write_default_config(&config).unwrap();
        assert!(config.exists());
    }
}
