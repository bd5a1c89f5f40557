use anyhow::{Context, Result, anyhow};
use config::{Config, FileFormat};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::constants;

/// Settings read from the global and repo-local config files.
///
/// Every key is optional; [`AppConfig::settings`] fills in the defaults.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    pub assistant_binary: Option<String>,
    pub review_model: Option<String>,
    pub errors_model: Option<String>,
    pub default_target: Option<String>,
    pub raygun_api_url: Option<String>,
    pub application_count: Option<u32>,
    pub default_project: Option<String>,
    pub open_output: Option<bool>,
    pub skip_permissions: Option<bool>,
}

/// Effective settings after defaults are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub assistant_binary: String,
    pub review_model: String,
    pub errors_model: String,
    pub default_target: String,
    pub raygun_api_url: String,
    pub application_count: u32,
    pub default_project: Option<String>,
    pub open_output: bool,
    pub skip_permissions: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ValueKind {
    Text,
    Integer,
    Boolean,
}

const KNOWN_KEYS: &[(&str, ValueKind)] = &[
    ("assistant_binary", ValueKind::Text),
    ("review_model", ValueKind::Text),
    ("errors_model", ValueKind::Text),
    ("default_target", ValueKind::Text),
    ("raygun_api_url", ValueKind::Text),
    ("application_count", ValueKind::Integer),
    ("default_project", ValueKind::Text),
    ("open_output", ValueKind::Boolean),
    ("skip_permissions", ValueKind::Boolean),
];

impl AppConfig {
    /// Load the global config, then the nearest repo-local file on top of it.
    pub fn load() -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;
        Self::load_from(global_config_path().as_deref(), &cwd)
    }

    fn load_from(global: Option<&Path>, start_dir: &Path) -> Result<Self> {
        let mut builder = Config::builder();

        // 1. Global config: ~/.config/ai-review-pr/config.toml
        if let Some(global_config_path) = global.filter(|p| p.exists()) {
            builder = builder.add_source(
                config::File::from(global_config_path.to_path_buf()).format(FileFormat::Toml),
            );
        }

        // 2. Local config: nearest .ai-review-pr.toml walking up; later sources win
        if let Some(local_config_path) = find_local_config(start_dir) {
            crate::utils::debug::log(&format!(
                "Using local config {}",
                local_config_path.display()
            ));
            builder =
                builder.add_source(config::File::from(local_config_path).format(FileFormat::Toml));
        }

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn settings(&self) -> Settings {
        Settings {
            assistant_binary: self
                .assistant_binary
                .clone()
                .unwrap_or_else(|| constants::DEFAULT_ASSISTANT_BINARY.to_string()),
            review_model: self
                .review_model
                .clone()
                .unwrap_or_else(|| constants::DEFAULT_REVIEW_MODEL.to_string()),
            errors_model: self
                .errors_model
                .clone()
                .unwrap_or_else(|| constants::DEFAULT_ERRORS_MODEL.to_string()),
            default_target: self
                .default_target
                .clone()
                .unwrap_or_else(|| constants::DEFAULT_TARGET_BRANCH.to_string()),
            raygun_api_url: self
                .raygun_api_url
                .clone()
                .unwrap_or_else(|| constants::DEFAULT_API_URL.to_string()),
            application_count: self
                .application_count
                .unwrap_or(constants::DEFAULT_APPLICATION_COUNT),
            default_project: self.default_project.clone(),
            open_output: self.open_output.unwrap_or(true),
            skip_permissions: self.skip_permissions.unwrap_or(true),
        }
    }
}

impl Settings {
    /// Key/value pairs in display order
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("assistant_binary", self.assistant_binary.clone()),
            ("review_model", self.review_model.clone()),
            ("errors_model", self.errors_model.clone()),
            ("default_target", self.default_target.clone()),
            ("raygun_api_url", self.raygun_api_url.clone()),
            ("application_count", self.application_count.to_string()),
            (
                "default_project",
                self.default_project.clone().unwrap_or_else(|| "-".to_string()),
            ),
            ("open_output", self.open_output.to_string()),
            ("skip_permissions", self.skip_permissions.to_string()),
        ]
    }
}

fn find_local_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current_dir = start_dir.to_path_buf();
    loop {
        let candidate = current_dir.join(constants::LOCAL_CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current_dir.pop() {
            return None;
        }
    }
}

pub fn get_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "macos")]
    {
        dirs::home_dir().map(|h| h.join(".config"))
    }
    #[cfg(not(target_os = "macos"))]
    {
        dirs::config_dir()
    }
}

pub fn global_config_path() -> Option<PathBuf> {
    get_config_dir().map(|dir| {
        dir.join(constants::CONFIG_DIR_NAME)
            .join(constants::CONFIG_FILE_NAME)
    })
}

/// Set `key` in the global config file, keeping existing formatting
pub fn set_config_value(key: &str, value: &str) -> Result<PathBuf> {
    let config_path =
        global_config_path().ok_or_else(|| anyhow!("Could not determine config directory"))?;
    write_config_value(&config_path, key, value)?;
    Ok(config_path)
}

fn write_config_value(config_path: &Path, key: &str, value: &str) -> Result<()> {
    let kind = KNOWN_KEYS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, kind)| *kind)
        .ok_or_else(|| {
            let names: Vec<&str> = KNOWN_KEYS.iter().map(|(name, _)| *name).collect();
            anyhow!("Unknown config key '{}'. Known keys: {}", key, names.join(", "))
        })?;

    let item_value = match kind {
        ValueKind::Text => toml_edit::Value::from(value),
        ValueKind::Integer => toml_edit::Value::from(
            value
                .parse::<i64>()
                .with_context(|| format!("'{}' expects a number, got '{}'", key, value))?,
        ),
        ValueKind::Boolean => toml_edit::Value::from(
            value
                .parse::<bool>()
                .with_context(|| format!("'{}' expects true or false, got '{}'", key, value))?,
        ),
    };

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    let config_content = if config_path.exists() {
        std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?
    } else {
        String::new()
    };

    let mut doc = config_content
        .parse::<toml_edit::DocumentMut>()
        .with_context(|| format!("Failed to parse {}", config_path.display()))?;
    doc[key] = toml_edit::Item::Value(item_value);

    std::fs::write(config_path, doc.to_string())
        .with_context(|| format!("Failed to write {}", config_path.display()))?;
    Ok(())
}
