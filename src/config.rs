use crate::constants::{CPV_NODES_FILE, DEFAULT_PAGE_SIZE, MANIFEST_FILE};
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Resolved configuration with all values filled in (no Options).
///
/// This struct carries the browser defaults and can be deserialized by the
/// TOML loader. All fields have concrete values, making it safe to access
/// directly without unwrapping.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolvedConfig {
    /// Results materialized per page; "load more" grows the window by this much.
    pub page_size: usize,
    /// Number of chunk files fetched in parallel during bootstrap.
    pub concurrent_fetches: usize,
    /// Manifest file name inside the dataset.
    pub manifest_file: String,
    /// CPV taxonomy file name inside the dataset.
    pub taxonomy_file: String,
    /// How many CPV item codes a result card shows before truncating.
    pub max_cpv_shown: usize,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            concurrent_fetches: 8,
            manifest_file: MANIFEST_FILE.to_string(),
            taxonomy_file: CPV_NODES_FILE.to_string(),
            max_cpv_shown: 4,
        }
    }
}

/// Configuration that can be loaded from a TOML file.
///
/// Deserializes the required fields (command, data) and optional initial
/// filters plus browser configuration. The parser rejects unknown keys to
/// catch typos, and validates that page_size and concurrent_fetches are
/// greater than 0.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResolvedConfigFile {
    /// `"list"` for a one-shot run or `"browse"` for the interactive prompt
    pub command: String,
    /// Dataset directory or HTTP(S) base URL
    pub data: String,
    /// Initial free-text search
    #[serde(default)]
    pub search: Option<String>,
    /// Initial kind selector (e.g. `"contract"`)
    #[serde(default)]
    pub kind: Option<String>,
    /// Initial award-mode selector (`"all"`, `"direct"`, `"competition"`)
    #[serde(default)]
    pub mode: Option<String>,
    /// Initial NUTS location label
    #[serde(default)]
    pub location: Option<String>,
    /// Initial CPV code selection
    #[serde(default)]
    pub cpv: Option<String>,
    /// For `list`: materialize every result instead of the first page
    #[serde(default)]
    pub all: bool,
    /// Flattened resolved configuration with browser defaults
    #[serde(flatten)]
    pub resolved: ResolvedConfig,
}

impl ResolvedConfigFile {
    /// Loads and validates configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` if the TOML is malformed, required fields are
    /// missing, unknown keys are present, the command is not `list`/`browse`,
    /// or page_size/concurrent_fetches are not positive.
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: ResolvedConfigFile = toml::from_str(&contents)
            .map_err(|e| AppError::InvalidInput(format!("Failed to parse config: {e}")))?;

        if !matches!(config.command.as_str(), "list" | "browse") {
            return Err(AppError::InvalidInput(format!(
                "Command must be 'list' or 'browse', got: {}",
                config.command
            )));
        }
        if config.resolved.page_size == 0 {
            return Err(AppError::InvalidInput(
                "Page size must be greater than 0".into(),
            ));
        }
        if config.resolved.concurrent_fetches == 0 {
            return Err(AppError::InvalidInput(
                "Concurrent fetches must be greater than 0".into(),
            ));
        }

        Ok(config)
    }
}
