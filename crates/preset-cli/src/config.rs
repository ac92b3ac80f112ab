//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value.  The
//! CLI layer owns config; the core crate never sees it.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables: `PRESET_<SECTION>__<KEY>`, e.g.
//!    `PRESET_RESOLVER__REGISTRY_OWNER=acme` (a `.env` file is honoured)
//! 3. Config file (`--config`, `PRESET_CONFIG`, or the platform config dir)
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use preset_adapters::ResolverSettings;
use preset_adapters::resolver::DEFAULT_REGISTRY_OWNER;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Where and how presets are fetched.
    pub resolver: ResolverConfig,
    /// Apply behaviour.
    pub apply: ApplyConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ResolverConfig {
    /// Remote checkout cache; the platform cache dir when unset.
    pub cache_dir: Option<PathBuf>,
    /// GitHub owner for unscoped registry names.
    pub registry_owner: String,
    /// Clone GitHub sources over SSH.
    pub github_ssh: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApplyConfig {
    /// Overrides each preset's own `interactive` flag when set.
    pub interactive: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            cache_dir: None,
            registry_owner: DEFAULT_REGISTRY_OWNER.into(),
            github_ssh: false,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

/// Environment variable prefix.
const ENV_PREFIX: &str = "PRESET";

impl AppConfig {
    /// Load configuration, starting from defaults.
    ///
    /// An explicitly given `config_file` must exist; the default location is
    /// optional.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let path = config_file.cloned().unwrap_or_else(Self::config_path);

        let settings = config::Config::builder()
            .add_source(
                config::Config::try_from(&Self::default())
                    .context("Failed to encode default configuration")?,
            )
            .add_source(
                config::File::from(path.as_path())
                    .format(config::FileFormat::Toml)
                    .required(config_file.is_some()),
            )
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.preset.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("dev", "preset", "preset")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".preset.toml"))
    }

    /// Default cache location for remote presets.
    pub fn default_cache_dir() -> PathBuf {
        directories::ProjectDirs::from("dev", "preset", "preset")
            .map(|d| d.cache_dir().join("presets"))
            .unwrap_or_else(|| std::env::temp_dir().join("preset").join("cache"))
    }

    /// Resolver knobs for a run rooted at `working_dir`.
    pub fn resolver_settings(&self, working_dir: &Path) -> ResolverSettings {
        ResolverSettings {
            working_dir: working_dir.to_path_buf(),
            cache_dir: self
                .resolver
                .cache_dir
                .clone()
                .unwrap_or_else(Self::default_cache_dir),
            registry_owner: self.resolver.registry_owner.clone(),
            github_ssh: self.resolver.github_ssh,
        }
    }

    /// Value of a dotted key, rendered for display.
    pub fn get(&self, key: &str) -> Option<String> {
        let value = match key {
            "resolver.cache_dir" => self
                .resolver
                .cache_dir
                .clone()
                .unwrap_or_else(Self::default_cache_dir)
                .display()
                .to_string(),
            "resolver.registry_owner" => self.resolver.registry_owner.clone(),
            "resolver.github_ssh" => self.resolver.github_ssh.to_string(),
            "apply.interactive" => self
                .apply
                .interactive
                .map(|b| b.to_string())
                .unwrap_or_else(|| "preset".into()),
            "output.no_color" => self.output.no_color.to_string(),
            "output.format" => self.output.format.clone(),
            _ => return None,
        };
        Some(value)
    }

    /// Every key understood by [`get`](Self::get).
    pub const KEYS: [&'static str; 6] = [
        "resolver.cache_dir",
        "resolver.registry_owner",
        "resolver.github_ssh",
        "apply.interactive",
        "output.no_color",
        "output.format",
    ];
}
