use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::{SelfCheckError, SelfCheckResult};

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub reviewer: ReviewerConfig,
    #[serde(default)]
    pub prompts: PromptsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewerConfig {
    /// Prediction endpoint that accepts `{"question": ...}` bodies.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Optional bearer key (falls back to env var SELFCHECK_API_KEY).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Send a short test question before the real analysis.
    #[serde(default = "default_true")]
    pub probe_connection: bool,
    /// Request timeout. Absent means the client waits indefinitely.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for ReviewerConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            api_key: None,
            probe_connection: true,
            timeout_secs: None,
        }
    }
}

fn default_endpoint() -> String {
    "http://localhost:3000/api/v1/prediction/selfcheck".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PromptsConfig {
    /// Path to a custom analysis template containing a `{report}` placeholder.
    #[serde(default)]
    pub analysis_template: Option<String>,
}

fn candidate_paths() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(exe) = std::env::current_exe() {
        if let Some(parent) = exe.parent() {
            candidates.push(parent.join(CONFIG_FILE));
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(CONFIG_FILE));
    }
    if let Some(dir) = dirs::config_dir() {
        candidates.push(dir.join("selfcheck").join(CONFIG_FILE));
    }
    candidates
}

fn resolve_config_path() -> Option<PathBuf> {
    let found = candidate_paths().into_iter().find(|p| p.exists());
    if let Some(path) = &found {
        tracing::debug!(path = %path.display(), "config file found");
    }
    found
}

/// Where `save_config` writes when no config file exists yet.
fn default_config_path() -> SelfCheckResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("selfcheck").join(CONFIG_FILE))
        .ok_or_else(|| SelfCheckError::Config("no user config directory available".into()))
}

pub fn load_config_from(path: &Path) -> SelfCheckResult<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    tracing::info!(path = %path.display(), endpoint = %config.reviewer.endpoint, "config loaded");
    Ok(config)
}

/// Loads `config.toml` from the first candidate location, falling back to
/// defaults when none exists, then applies environment overrides.
pub fn load_config() -> SelfCheckResult<AppConfig> {
    let mut config = match resolve_config_path() {
        Some(path) => load_config_from(&path)?,
        None => {
            tracing::info!("no config.toml found; using defaults");
            AppConfig::default()
        }
    };
    apply_env_overrides(&mut config);
    Ok(config)
}

pub fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(endpoint) = std::env::var("SELFCHECK_ENDPOINT") {
        if !endpoint.trim().is_empty() {
            config.reviewer.endpoint = endpoint;
        }
    }
    if let Ok(key) = std::env::var("SELFCHECK_API_KEY") {
        if !key.trim().is_empty() {
            config.reviewer.api_key = Some(key);
        }
    }
}

pub fn save_config_to(config: &AppConfig, path: &Path) -> SelfCheckResult<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    tracing::info!(path = %path.display(), "config saved");
    Ok(())
}

/// Writes over the config file `load_config` would read, or creates one in
/// the user config directory. Returns the path written.
pub fn save_config(config: &AppConfig) -> SelfCheckResult<PathBuf> {
    let path = match resolve_config_path() {
        Some(path) => path,
        None => default_config_path()?,
    };
    save_config_to(config, &path)?;
    Ok(path)
}
