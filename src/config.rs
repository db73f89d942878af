use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::core::diff::{DEFAULT_PLACEHOLDER_MARKERS, PlaceholderMarkers};

pub const CONFIG_FILE_NAME: &str = ".loctreerc.json";

/// Placeholder in `fillTemplate` replaced by the reference value.
pub const FILL_SOURCE_TOKEN: &str = "{source}";

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_locales_root")]
    pub locales_root: String,
    #[serde(default = "default_reference_locale")]
    pub reference_locale: String,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    /// Glob patterns matched against file names inside `localesRoot`.
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default = "default_placeholder_markers")]
    pub placeholder_markers: Vec<String>,
    #[serde(default = "default_fill_template")]
    pub fill_template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_dir: Option<String>,
}

fn default_locales_root() -> String {
    "./src/locales".to_string()
}

fn default_reference_locale() -> String {
    "en".to_string()
}

fn default_extensions() -> Vec<String> {
    ["ts", "js", "mjs"].map(String::from).to_vec()
}

fn default_ignores() -> Vec<String> {
    ["index.*", "*.d.ts"].map(String::from).to_vec()
}

fn default_placeholder_markers() -> Vec<String> {
    DEFAULT_PLACEHOLDER_MARKERS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_fill_template() -> String {
    format!("[TODO] {}", FILL_SOURCE_TOKEN)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locales_root: default_locales_root(),
            reference_locale: default_reference_locale(),
            extensions: default_extensions(),
            ignores: default_ignores(),
            placeholder_markers: default_placeholder_markers(),
            fill_template: default_fill_template(),
            backup_dir: None,
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Fails on invalid glob patterns in `ignores`, invalid regexes in
    /// `placeholderMarkers` and an empty `extensions` list.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            Pattern::new(pattern)
                .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", pattern))?;
        }

        for pattern in &self.placeholder_markers {
            regex::Regex::new(pattern).with_context(|| {
                format!("Invalid regex in 'placeholderMarkers': \"{}\"", pattern)
            })?;
        }

        if self.extensions.is_empty() {
            anyhow::bail!("'extensions' must list at least one file extension");
        }

        Ok(())
    }

    pub fn markers(&self) -> Result<PlaceholderMarkers> {
        PlaceholderMarkers::new(&self.placeholder_markers)
            .context("Invalid regex in 'placeholderMarkers'")
    }

    pub fn ignore_patterns(&self) -> Result<Vec<Pattern>> {
        self.ignores
            .iter()
            .map(|p| {
                Pattern::new(p)
                    .with_context(|| format!("Invalid glob pattern in 'ignores': \"{}\"", p))
            })
            .collect()
    }

    /// Render the fill template for one reference value.
    pub fn fill_value(&self, source: &str) -> String {
        self.fill_template.replace(FILL_SOURCE_TOKEN, source)
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
    /// Directory holding the config file, or the start directory. Relative
    /// paths in the config resolve against it.
    pub base_dir: PathBuf,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            tracing::debug!(path = %path.display(), "loaded config");
            Ok(ConfigLoadResult {
                config,
                from_file: true,
                base_dir,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
            base_dir: start_dir.to_path_buf(),
        }),
    }
}
