//! Store configuration.
//!
//! [`PailConfig`] is passed explicitly at construction time. Every field has
//! a documented default, and the serialized form uses the camelCase option
//! names (`dirPath`, `configFile`, `workspace`) so existing option objects
//! load unchanged.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Default root directory for the store.
pub const DEFAULT_DIR_PATH: &str = "/tmp/pail";

/// Default name of the per-pail JSON document.
pub const DEFAULT_CONFIG_FILE: &str = "config.json";

/// Default name of the workspace directory.
pub const DEFAULT_WORKSPACE: &str = "workspace";

/// Where workspace directories live relative to the store root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkspaceLayout {
    /// One workspace per pail at `<root>/<id>/<workspace>`.
    #[default]
    PerPail,
    /// A single shared workspace at `<root>/<workspace>`.
    Shared,
}

/// Behaviour of artifact copies whose target directory does not exist.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyPolicy {
    /// Log the missing target and skip the copy.
    #[default]
    Permissive,
    /// Fail with a target-missing error.
    Strict,
}

/// Errors returned while building or parsing a configuration.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    /// The options document could not be parsed.
    #[error("invalid pail options: {0}")]
    Parse(Arc<serde_json::Error>),

    /// A file or directory name option is not a single path segment.
    #[error("option {field} must be a single non-empty path segment, got '{value}'")]
    InvalidSegment {
        /// Option key that failed validation.
        field: &'static str,
        /// Rejected value.
        value: String,
    },
}

/// Configuration for a pail store rooted at a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PailConfig {
    /// Root directory owning every pail record and name.
    pub dir_path: Utf8PathBuf,
    /// File name of the JSON document inside each pail directory.
    pub config_file: String,
    /// Directory name used for workspaces.
    pub workspace: String,
    /// Placement of workspace directories.
    pub workspace_layout: WorkspaceLayout,
    /// Handling of artifact copies into a missing directory.
    pub copy_policy: CopyPolicy,
}

impl Default for PailConfig {
    fn default() -> Self {
        Self {
            dir_path: Utf8PathBuf::from(DEFAULT_DIR_PATH),
            config_file: DEFAULT_CONFIG_FILE.to_owned(),
            workspace: DEFAULT_WORKSPACE.to_owned(),
            workspace_layout: WorkspaceLayout::default(),
            copy_policy: CopyPolicy::default(),
        }
    }
}

impl PailConfig {
    /// Creates a configuration rooted at `dir_path` with default options.
    #[must_use]
    pub fn new(dir_path: impl Into<Utf8PathBuf>) -> Self {
        Self {
            dir_path: dir_path.into(),
            ..Self::default()
        }
    }

    /// Parses a JSON options object, filling absent keys with defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::InvalidSegment`] when a name option is unusable.
    pub fn from_json_str(options: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(options).map_err(|err| ConfigError::Parse(Arc::new(err)))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the document file name.
    #[must_use]
    pub fn with_config_file(mut self, config_file: impl Into<String>) -> Self {
        self.config_file = config_file.into();
        self
    }

    /// Sets the workspace directory name.
    #[must_use]
    pub fn with_workspace(mut self, workspace: impl Into<String>) -> Self {
        self.workspace = workspace.into();
        self
    }

    /// Sets the workspace layout.
    #[must_use]
    pub const fn with_workspace_layout(mut self, layout: WorkspaceLayout) -> Self {
        self.workspace_layout = layout;
        self
    }

    /// Sets the artifact copy policy.
    #[must_use]
    pub const fn with_copy_policy(mut self, policy: CopyPolicy) -> Self {
        self.copy_policy = policy;
        self
    }

    /// Returns the store root directory.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.dir_path
    }

    /// Checks that file and directory name options are single segments.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidSegment`] naming the offending option.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_segment("configFile", &self.config_file)?;
        check_segment("workspace", &self.workspace)?;
        Ok(())
    }
}

fn check_segment(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let is_segment = !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains(['/', '\\', '\0']);
    if is_segment {
        Ok(())
    } else {
        Err(ConfigError::InvalidSegment {
            field,
            value: value.to_owned(),
        })
    }
}
