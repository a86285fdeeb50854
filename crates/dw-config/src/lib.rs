//! Configuration management for Docweaver.
//!
//! Parses `docweaver.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

mod expand;

use expand::expand_env;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "docweaver.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Clone, Default)]
pub struct CliSettings {
    /// Override the workspace directory.
    pub workspace_dir: Option<PathBuf>,
    /// Override the public assets directory.
    pub assets_dir: Option<PathBuf>,
    /// Override the trunk branch name.
    pub trunk: Option<String>,
}

impl CliSettings {
    /// Check if all override fields are None (no overrides specified).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.workspace_dir.is_none() && self.assets_dir.is_none() && self.trunk.is_none()
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Environment variable expansion error.
    #[error("invalid value for {field}: {message}")]
    EnvVar {
        /// The configuration field being expanded.
        field: String,
        /// What went wrong.
        message: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Workspace configuration (paths are relative strings from TOML).
    #[serde(default)]
    workspace: WorkspaceConfigRaw,
    /// Version resolution configuration.
    pub versions: VersionsConfig,
    /// Public site configuration.
    pub site: SiteConfig,
    /// VCS invocation configuration.
    pub vcs: VcsConfig,

    /// Resolved workspace configuration (set after loading).
    #[serde(skip)]
    pub workspace_resolved: WorkspaceConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Raw workspace configuration as parsed from TOML (paths as strings).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct WorkspaceConfigRaw {
    dir: Option<String>,
    assets_dir: Option<String>,
}

/// Resolved workspace configuration with absolute paths.
#[derive(Debug, Clone, Default)]
pub struct WorkspaceConfig {
    /// Root directory holding one subdirectory per product.
    pub dir: PathBuf,
    /// Public directory receiving version image assets, if any.
    pub assets_dir: Option<PathBuf>,
}

/// Version resolution configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VersionsConfig {
    /// Trunk branch published alongside tags.
    pub trunk: String,
    /// Allow non-numeric tags (e.g. `master`) as a product's default version.
    pub allow_worded_default: bool,
}

impl Default for VersionsConfig {
    fn default() -> Self {
        Self {
            trunk: "master".to_owned(),
            allow_worded_default: false,
        }
    }
}

/// Public site configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Route prefix used when resolving relative metadata image URLs.
    pub route_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            route_prefix: "docs".to_owned(),
        }
    }
}

/// VCS invocation configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct VcsConfig {
    /// Git binary to invoke.
    pub binary: String,
    /// Per-command timeout in seconds.
    pub timeout_secs: u64,
}

impl VcsConfig {
    /// Per-command timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for VcsConfig {
    fn default() -> Self {
        Self {
            binary: "git".to_owned(),
            timeout_secs: 60,
        }
    }
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `docweaver.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Search for config file in current directory and parents.
    #[must_use]
    pub fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    #[must_use]
    pub fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    #[must_use]
    pub fn default_with_base(base: &Path) -> Self {
        Self {
            workspace: WorkspaceConfigRaw::default(),
            versions: VersionsConfig::default(),
            site: SiteConfig::default(),
            vcs: VcsConfig::default(),
            workspace_resolved: WorkspaceConfig {
                dir: base.join("workspace"),
                assets_dir: None,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir)?;
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) -> Result<(), ConfigError> {
        let dir = match &self.workspace.dir {
            Some(dir) => config_dir.join(expand_env(dir, "workspace.dir")?),
            None => config_dir.join("workspace"),
        };
        let assets_dir = match &self.workspace.assets_dir {
            Some(assets) => Some(config_dir.join(expand_env(assets, "workspace.assets_dir")?)),
            None => None,
        };

        self.workspace_resolved = WorkspaceConfig { dir, assets_dir };
        Ok(())
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(workspace_dir) = &settings.workspace_dir {
            self.workspace_resolved.dir.clone_from(workspace_dir);
        }
        if let Some(assets_dir) = &settings.assets_dir {
            self.workspace_resolved.assets_dir = Some(assets_dir.clone());
        }
        if let Some(trunk) = &settings.trunk {
            self.versions.trunk.clone_from(trunk);
        }
    }
}
