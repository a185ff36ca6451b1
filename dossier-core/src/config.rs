//! Configuration for loading and searching.
//!
//! Every setting has a default matching the stock dataset, so a missing
//! configuration file is not an error. A TOML file may override any subset
//! of the keys:
//!
//! ```toml
//! default_source = "people.json"
//! max_results = 20
//! allow_all_query = true
//! legacy_cutoff = ""   # disables the legacy record notice
//! ```

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV_VAR: &str = "DOSSIER_CONFIG";

/// Configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "dossier.toml";

/// Settings fixed when a `SearchEngine` is built.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Result count ceiling; more matches than this is "too imprecise".
    pub max_results: usize,
    /// Shortest non-empty selector accepted, in characters.
    pub min_selector_length: usize,
    /// Whether the literal selector `all` lists the whole working set.
    pub allow_all_query: bool,
    /// Whether two-word selectors may also match `lastKnownAddress`.
    pub allow_address_search: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 20,
            min_selector_length: 4,
            allow_all_query: false,
            allow_address_search: true,
        }
    }
}

impl SearchConfig {
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_min_selector_length(mut self, length: usize) -> Self {
        self.min_selector_length = length;
        self
    }

    pub fn with_all_query(mut self, allow: bool) -> Self {
        self.allow_all_query = allow;
        self
    }

    pub fn with_address_search(mut self, allow: bool) -> Self {
        self.allow_address_search = allow;
        self
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DossierConfig {
    /// Source loaded when no paths are given on the command line.
    pub default_source: PathBuf,

    /// Late-added records merged after the named sources, if present.
    pub supplemental_source: PathBuf,

    /// Stage used when the master source declares none.
    pub default_stage: i64,

    #[serde(flatten)]
    pub search: SearchConfig,

    /// Records born and died before this date get the legacy record notice.
    /// Empty disables the notice.
    pub legacy_cutoff: String,

    /// Where to write the log. Without it the TUI discards log output.
    pub log_file: Option<PathBuf>,
}

impl Default for DossierConfig {
    fn default() -> Self {
        Self {
            default_source: PathBuf::from("people.json"),
            supplemental_source: PathBuf::from("players.json"),
            default_stage: 1,
            search: SearchConfig::default(),
            legacy_cutoff: "1960-01-01".to_string(),
            log_file: None,
        }
    }
}

impl DossierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_default_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.default_source = path.into();
        self
    }

    pub fn with_supplemental_source(mut self, path: impl Into<PathBuf>) -> Self {
        self.supplemental_source = path.into();
        self
    }

    pub fn with_default_stage(mut self, stage: i64) -> Self {
        self.default_stage = stage;
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_legacy_cutoff(mut self, cutoff: Option<&str>) -> Self {
        self.legacy_cutoff = cutoff.unwrap_or_default().to_string();
        self
    }

    /// The legacy cutoff date, or `None` when the notice is disabled.
    pub fn legacy_cutoff(&self) -> Option<&str> {
        let cutoff = self.legacy_cutoff.trim();
        (!cutoff.is_empty()).then_some(cutoff)
    }

    /// Parse a configuration from TOML text.
    pub fn from_toml(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Read a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content, path)
    }

    /// Find and read the configuration for this run.
    ///
    /// An explicit path wins, then `DOSSIER_CONFIG`, then `dossier.toml` in
    /// the working directory. Only the last one may be absent.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.is_empty() {
                return Self::load(path);
            }
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        if local.exists() {
            Self::load(local)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DossierConfig::default();
        assert_eq!(config.default_source, PathBuf::from("people.json"));
        assert_eq!(config.supplemental_source, PathBuf::from("players.json"));
        assert_eq!(config.default_stage, 1);
        assert_eq!(config.search.max_results, 20);
        assert_eq!(config.search.min_selector_length, 4);
        assert!(!config.search.allow_all_query);
        assert_eq!(config.legacy_cutoff(), Some("1960-01-01"));
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config = DossierConfig::from_toml(
            "max_results = 5\nallow_all_query = true\ndefault_source = \"case.json\"\n",
            Path::new("test.toml"),
        )
        .unwrap();
        assert_eq!(config.search.max_results, 5);
        assert!(config.search.allow_all_query);
        assert_eq!(config.search.min_selector_length, 4);
        assert_eq!(config.default_source, PathBuf::from("case.json"));
        assert_eq!(config.supplemental_source, PathBuf::from("players.json"));
    }

    #[test]
    fn test_empty_cutoff_disables_notice() {
        let config = DossierConfig::from_toml("legacy_cutoff = \"\"", Path::new("test.toml")).unwrap();
        assert_eq!(config.legacy_cutoff(), None);
    }

    #[test]
    fn test_malformed_toml_names_file() {
        let err = DossierConfig::from_toml("max_results = \"many\"", Path::new("bad.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let err = DossierConfig::discover(Some(Path::new("/nonexistent/dossier.toml")));
        assert!(matches!(err, Err(ConfigError::Io { .. })));
    }
}
