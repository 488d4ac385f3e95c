//! Configuration file loading with precedence handling.

use crate::input::decoder::DEFAULT_ESC_TIMEOUT;
use crate::model::KeyAction;
use serde::de::IntoDeserializer;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "MINIPAGER_CONFIG";
/// Environment variable overriding the ESC disambiguation timeout.
pub const ESC_TIMEOUT_ENV: &str = "MINIPAGER_ESC_TIMEOUT_MS";
/// Environment variable enabling chop mode (`1` or `true`).
pub const CHOP_ENV: &str = "MINIPAGER_CHOP_LONG_LINES";

/// Errors that can occur during config loading.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Failed to read config file (permission issues, not a file).
    #[error("Failed to read config file at {path}: {reason}")]
    ReadError {
        /// Path that failed to read.
        path: PathBuf,
        /// Reason for failure.
        reason: String,
    },

    /// Config file contains invalid TOML syntax or unknown fields.
    #[error("Invalid TOML in {path}: {reason}")]
    ParseError {
        /// Path with invalid TOML.
        path: PathBuf,
        /// Parse error details.
        reason: String,
    },

    /// A `[keybindings]` entry names an action that does not exist.
    #[error("Unknown action {name:?} in [keybindings] of {path}")]
    UnknownAction {
        /// Config file path.
        path: PathBuf,
        /// The unrecognised action name.
        name: String,
    },

    /// A `[keybindings]` entry binds a digit, which always starts a count.
    #[error("Digit key {key:?} bound to {action:?} in [keybindings] of {path}")]
    DigitKey {
        /// Config file path.
        path: PathBuf,
        /// The action the digit was bound to.
        action: String,
        /// The digit key.
        key: String,
    },
}

/// TOML configuration file structure.
///
/// All fields are optional; anything unset keeps its default.
/// Corresponds to `~/.config/minipager/config.toml`:
///
/// ```toml
/// chop_long_lines = true
/// esc_timeout_ms = 80
///
/// [keybindings]
/// line_forward = ["j", "^N"]
/// ```
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ConfigFile {
    /// Truncate long lines instead of wrapping them.
    #[serde(default)]
    pub chop_long_lines: Option<bool>,

    /// Indent width for pretty-printed JSON input.
    #[serde(default)]
    pub indentation: Option<usize>,

    /// Tab stop width.
    #[serde(default)]
    pub tab_width: Option<usize>,

    /// How long to wait after ESC for the rest of a sequence.
    #[serde(default)]
    pub esc_timeout_ms: Option<u64>,

    /// Path to log file for tracing output.
    #[serde(default)]
    pub log_file_path: Option<PathBuf>,

    /// Per-action key overrides, action name to key list.
    #[serde(default)]
    pub keybindings: Option<HashMap<String, Vec<String>>>,
}

/// Resolved configuration after applying precedence rules.
///
/// Created by merging defaults, config file, env vars, and CLI args.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedConfig {
    /// Chop instead of wrap.
    pub chop_long_lines: bool,
    /// Indent width for pretty-printed JSON.
    pub indentation: usize,
    /// Tab stop width.
    pub tab_width: usize,
    /// ESC disambiguation timeout.
    pub esc_timeout: Duration,
    /// Path to log file for tracing output.
    pub log_file_path: PathBuf,
    /// Key overrides applied on top of the default bindings.
    pub keybindings: HashMap<KeyAction, Vec<String>>,
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            chop_long_lines: false,
            indentation: 2,
            tab_width: 8,
            esc_timeout: DEFAULT_ESC_TIMEOUT,
            log_file_path: default_log_path(),
            keybindings: HashMap::new(),
        }
    }
}

/// Resolve default log file path.
///
/// Returns `~/.local/state/minipager/minipager.log` on Linux, or the
/// platform equivalent. Falls back to the current directory.
pub fn default_log_path() -> PathBuf {
    if let Some(state_dir) = dirs::state_dir() {
        state_dir.join("minipager").join("minipager.log")
    } else {
        PathBuf::from("minipager.log")
    }
}

/// Resolve default config file path.
///
/// Returns `None` if the config directory cannot be determined.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("minipager").join("config.toml"))
}

/// Parse an action name as written in `[keybindings]`.
pub fn parse_action(name: &str) -> Option<KeyAction> {
    let deserializer: serde::de::value::StrDeserializer<'_, serde::de::value::Error> =
        name.into_deserializer();
    KeyAction::deserialize(deserializer).ok()
}

/// Load configuration file from a specific path.
///
/// Returns `Ok(None)` if file doesn't exist (not an error - use defaults).
///
/// # Errors
///
/// Returns error if file exists but cannot be read or is not valid TOML, or
/// if `[keybindings]` names an unknown action or binds a digit key.
pub fn load_config_file(path: impl Into<PathBuf>) -> Result<Option<ConfigFile>, ConfigError> {
    let path = path.into();

    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    let config: ConfigFile = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    if let Some(name) = config
        .keybindings
        .iter()
        .flat_map(HashMap::keys)
        .find(|name| parse_action(name).is_none())
    {
        return Err(ConfigError::UnknownAction {
            path,
            name: name.clone(),
        });
    }

    let digit = config.keybindings.iter().flatten().find_map(|(action, keys)| {
        keys.iter()
            .find(|key| key.len() == 1 && key.chars().all(|c| c.is_ascii_digit()))
            .map(|key| (action, key))
    });
    if let Some((action, key)) = digit {
        return Err(ConfigError::DigitKey {
            path,
            action: action.clone(),
            key: key.clone(),
        });
    }

    Ok(Some(config))
}

/// Load configuration with precedence handling.
///
/// Precedence (highest to lowest):
/// 1. Explicit `config_path` argument (CLI `--config`)
/// 2. `MINIPAGER_CONFIG` environment variable
/// 3. Default path `~/.config/minipager/config.toml`
///
/// Missing config files are NOT errors - defaults are used.
pub fn load_config_with_precedence(
    config_path: Option<PathBuf>,
) -> Result<Option<ConfigFile>, ConfigError> {
    if let Some(path) = config_path {
        return load_config_file(path);
    }

    if let Ok(env_path) = std::env::var(CONFIG_ENV) {
        return load_config_file(PathBuf::from(env_path));
    }

    if let Some(default_path) = default_config_path() {
        return load_config_file(default_path);
    }

    Ok(None)
}

/// Merge config file into defaults to create resolved config.
pub fn merge_config(config_file: Option<ConfigFile>) -> ResolvedConfig {
    let defaults = ResolvedConfig::default();

    let Some(config) = config_file else {
        return defaults;
    };

    let keybindings = config
        .keybindings
        .unwrap_or_default()
        .into_iter()
        .filter_map(|(name, keys)| parse_action(&name).map(|action| (action, keys)))
        .collect();

    ResolvedConfig {
        chop_long_lines: config.chop_long_lines.unwrap_or(defaults.chop_long_lines),
        indentation: config.indentation.unwrap_or(defaults.indentation),
        tab_width: config.tab_width.unwrap_or(defaults.tab_width),
        esc_timeout: config
            .esc_timeout_ms
            .map(Duration::from_millis)
            .unwrap_or(defaults.esc_timeout),
        log_file_path: config.log_file_path.unwrap_or(defaults.log_file_path),
        keybindings,
    }
}

/// Apply environment variable overrides to resolved config.
///
/// Checks for:
/// - `MINIPAGER_ESC_TIMEOUT_MS`: ESC timeout in milliseconds
/// - `MINIPAGER_CHOP_LONG_LINES`: `1`/`true` to chop, `0`/`false` to wrap
///
/// Unparseable values are ignored.
pub fn apply_env_overrides(mut config: ResolvedConfig) -> ResolvedConfig {
    if let Some(ms) = std::env::var(ESC_TIMEOUT_ENV)
        .ok()
        .and_then(|v| v.trim().parse::<u64>().ok())
    {
        config.esc_timeout = Duration::from_millis(ms);
    }

    match std::env::var(CHOP_ENV).as_deref().map(str::trim) {
        Ok("1") | Ok("true") => config.chop_long_lines = true,
        Ok("0") | Ok("false") => config.chop_long_lines = false,
        _ => {}
    }

    config
}

/// Apply CLI argument overrides to resolved config.
///
/// Only flags the user actually passed are `Some`.
///
/// Precedence chain: Defaults → Config File → Env Vars → CLI Args (highest)
pub fn apply_cli_overrides(
    mut config: ResolvedConfig,
    chop_override: Option<bool>,
    indent_override: Option<usize>,
) -> ResolvedConfig {
    if let Some(chop) = chop_override {
        config.chop_long_lines = chop;
    }

    if let Some(indent) = indent_override {
        config.indentation = indent;
    }

    config
}

#[cfg(test)]
#[path = "loader_tests.rs"]
mod tests;
