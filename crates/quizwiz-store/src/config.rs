//! Configuration loading and store factory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizwiz_core::identity::{Identity, Role};
use quizwiz_core::statistics::DEFAULT_PASS_THRESHOLD;
use quizwiz_core::store::KeyValueStore;

use crate::file::JsonFileStore;

/// The default caller used when no identity is given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Student
}

impl IdentityConfig {
    /// The configured identity; the name falls back to the id.
    pub fn to_identity(&self) -> Identity {
        Identity::new(
            self.id.clone(),
            self.name.clone().unwrap_or_else(|| self.id.clone()),
            self.role,
        )
    }
}

/// Top-level quizwiz configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizwizConfig {
    /// JSON file holding every quiz and result.
    #[serde(default = "default_store_path")]
    pub store_path: PathBuf,
    /// Default caller identity.
    #[serde(default)]
    pub identity: Option<IdentityConfig>,
    /// Percentage at or above which an attempt counts as passed.
    #[serde(default = "default_pass_threshold")]
    pub pass_threshold: u32,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("./quizwiz-data/store.json")
}
fn default_pass_threshold() -> u32 {
    DEFAULT_PASS_THRESHOLD
}

impl Default for QuizwizConfig {
    fn default() -> Self {
        Self {
            store_path: default_store_path(),
            identity: None,
            pass_threshold: default_pass_threshold(),
        }
    }
}

impl QuizwizConfig {
    /// The configured default identity, if any.
    pub fn identity(&self) -> Option<Identity> {
        self.identity.as_ref().map(IdentityConfig::to_identity)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `quizwiz.toml` in the current directory
/// 2. `~/.config/quizwiz/config.toml`
///
/// Environment variable overrides: `QUIZWIZ_STORE`, `QUIZWIZ_USER_ID`,
/// `QUIZWIZ_USER_NAME`, `QUIZWIZ_USER_ROLE`.
pub fn load_config() -> Result<QuizwizConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizwizConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizwiz.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            toml::from_str::<QuizwizConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizwizConfig::default(),
    };

    apply_env_overrides(&mut config)?;

    config.store_path = PathBuf::from(resolve_env_vars(&config.store_path.to_string_lossy()));
    if let Some(identity) = &mut config.identity {
        identity.id = resolve_env_vars(&identity.id);
        identity.name = identity.name.as_deref().map(resolve_env_vars);
    }
    if config
        .identity
        .as_ref()
        .is_some_and(|identity| identity.id.trim().is_empty())
    {
        tracing::warn!("configured identity has an empty id, ignoring it");
        config.identity = None;
    }

    Ok(config)
}

fn apply_env_overrides(config: &mut QuizwizConfig) -> Result<()> {
    if let Ok(store) = std::env::var("QUIZWIZ_STORE") {
        config.store_path = PathBuf::from(store);
    }

    if let Ok(id) = std::env::var("QUIZWIZ_USER_ID") {
        config
            .identity
            .get_or_insert_with(|| IdentityConfig {
                id: String::new(),
                name: None,
                role: default_role(),
            })
            .id = id;
    }

    if let Some(identity) = &mut config.identity {
        if let Ok(name) = std::env::var("QUIZWIZ_USER_NAME") {
            identity.name = Some(name);
        }
        if let Ok(role) = std::env::var("QUIZWIZ_USER_ROLE") {
            identity.role = role
                .parse()
                .map_err(|e: String| anyhow::anyhow!("QUIZWIZ_USER_ROLE: {e}"))?;
        }
    }

    Ok(())
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizwiz"))
}

/// Open the store described by the configuration.
pub fn open_store(config: &QuizwizConfig) -> Result<Arc<dyn KeyValueStore>> {
    let store = JsonFileStore::open(&config.store_path)
        .with_context(|| format!("failed to open store: {}", config.store_path.display()))?;
    Ok(Arc::new(store))
}
