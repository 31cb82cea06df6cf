//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.daybook/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//!
//! The notes directory itself is not configurable: it is always
//! `~/daybook`. Process environment is read once into an [`Environment`]
//! and handed to [`resolve`], so resolution is deterministic under test.

use clap::ValueEnum;
use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::editor::FALLBACK_EDITOR;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct DaybookConfig {
    #[serde(default)]
    pub general: GeneralConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub editor: Option<String>,
    pub render_markdown: Option<bool>,
    pub theme: Option<Theme>,
    pub log_level: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

// ============================================================================
// Defaults
// ============================================================================

/// Directory under `$HOME` holding one markdown file per day.
pub const NOTES_DIR_NAME: &str = "daybook";
/// Directory under `$HOME` holding config and logs.
pub const CONFIG_DIR_NAME: &str = ".daybook";
pub const CONFIG_FILE_NAME: &str = "config.toml";
pub const LOG_FILE_NAME: &str = "daybook.log";
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Info;

// ============================================================================
// Inputs from outside the config file
// ============================================================================

/// Snapshot of the process environment relevant to daybook.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub home: Option<PathBuf>,
    /// Value of `$EDITOR`, if set and non-blank.
    pub editor: Option<String>,
}

impl Environment {
    pub fn capture() -> Self {
        Self {
            home: dirs::home_dir(),
            editor: std::env::var("EDITOR")
                .ok()
                .filter(|value| !value.trim().is_empty()),
        }
    }
}

/// Settings given on the command line (None / false = not specified).
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub editor: Option<String>,
    pub raw: bool,
    pub theme: Option<Theme>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub notes_dir: PathBuf,
    pub config_dir: PathBuf,
    pub editor: String,
    pub render_markdown: bool,
    pub theme: Theme,
    pub log_level: LevelFilter,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine home directory")]
    NoHomeDir,
    #[error("config I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("config parse error in {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

// ============================================================================
// Loading
// ============================================================================

/// Returns `<home>/.daybook`.
pub fn config_dir(env: &Environment) -> Result<PathBuf, ConfigError> {
    env.home
        .as_ref()
        .map(|home| home.join(CONFIG_DIR_NAME))
        .ok_or(ConfigError::NoHomeDir)
}

/// Load config from `<dir>/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `DaybookConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config(dir: &Path) -> Result<DaybookConfig, ConfigError> {
    let path = dir.join(CONFIG_FILE_NAME);

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(DaybookConfig::default());
    }

    let contents = fs::read_to_string(&path)?;
    let config: DaybookConfig =
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

fn generate_default_config(path: &Path) {
    let default_content = r#"# Daybook Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.
# Notes always live in ~/daybook/<YYYY-MM-DD>.md.

# [general]
# editor = "nvim"            # $EDITOR and --editor take precedence
# render_markdown = true     # false (or --raw) shows the file as plain text
# theme = "dark"             # "dark" or "light"
# log_level = "info"         # off, error, warn, info, debug, trace
"#;

    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(
    config: &DaybookConfig,
    env: &Environment,
    cli: &CliOverrides,
) -> Result<ResolvedConfig, ConfigError> {
    let home = env.home.as_ref().ok_or(ConfigError::NoHomeDir)?;

    // Editor: CLI → env → config → fallback
    let editor = cli
        .editor
        .clone()
        .or_else(|| env.editor.clone())
        .or_else(|| config.general.editor.clone())
        .unwrap_or_else(|| FALLBACK_EDITOR.to_string());

    // --raw only ever turns rendering off
    let render_markdown = !cli.raw && config.general.render_markdown.unwrap_or(true);

    let theme = cli.theme.or(config.general.theme).unwrap_or_default();

    let log_level = match config.general.log_level.as_deref() {
        Some(level) => level.parse().unwrap_or_else(|_| {
            warn!("Unknown log level {:?}, using {}", level, DEFAULT_LOG_LEVEL);
            DEFAULT_LOG_LEVEL
        }),
        None => DEFAULT_LOG_LEVEL,
    };

    Ok(ResolvedConfig {
        notes_dir: home.join(NOTES_DIR_NAME),
        config_dir: home.join(CONFIG_DIR_NAME),
        editor,
        render_markdown,
        theme,
        log_level,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn env_with_home() -> Environment {
        Environment {
            home: Some(PathBuf::from("/home/someone")),
            editor: None,
        }
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved =
            resolve(&DaybookConfig::default(), &env_with_home(), &CliOverrides::default())
                .unwrap();
        assert_eq!(resolved.notes_dir, PathBuf::from("/home/someone/daybook"));
        assert_eq!(resolved.config_dir, PathBuf::from("/home/someone/.daybook"));
        assert_eq!(resolved.editor, "vim");
        assert!(resolved.render_markdown);
        assert_eq!(resolved.theme, Theme::Dark);
        assert_eq!(resolved.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_resolve_without_home_is_error() {
        let err = resolve(
            &DaybookConfig::default(),
            &Environment::default(),
            &CliOverrides::default(),
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NoHomeDir));
        assert!(config_dir(&Environment::default()).is_err());
    }

    #[test]
    fn test_editor_precedence() {
        let config = DaybookConfig {
            general: GeneralConfig {
                editor: Some("nano".to_string()),
                ..Default::default()
            },
        };
        let mut env = env_with_home();
        let mut cli = CliOverrides::default();
        assert_eq!(resolve(&config, &env, &cli).unwrap().editor, "nano");

        env.editor = Some("hx".to_string());
        assert_eq!(resolve(&config, &env, &cli).unwrap().editor, "hx");

        cli.editor = Some("code -w".to_string());
        assert_eq!(resolve(&config, &env, &cli).unwrap().editor, "code -w");
    }

    #[test]
    fn test_raw_flag_disables_markdown() {
        let config = DaybookConfig {
            general: GeneralConfig {
                render_markdown: Some(true),
                ..Default::default()
            },
        };
        let cli = CliOverrides {
            raw: true,
            ..Default::default()
        };
        assert!(!resolve(&config, &env_with_home(), &cli).unwrap().render_markdown);
    }

    #[test]
    fn test_cli_theme_wins() {
        let config = DaybookConfig {
            general: GeneralConfig {
                theme: Some(Theme::Light),
                ..Default::default()
            },
        };
        let resolved = resolve(&config, &env_with_home(), &CliOverrides::default()).unwrap();
        assert_eq!(resolved.theme, Theme::Light);

        let cli = CliOverrides {
            theme: Some(Theme::Dark),
            ..Default::default()
        };
        assert_eq!(resolve(&config, &env_with_home(), &cli).unwrap().theme, Theme::Dark);
    }

    #[test]
    fn test_bad_log_level_falls_back() {
        let config = DaybookConfig {
            general: GeneralConfig {
                log_level: Some("chatty".to_string()),
                ..Default::default()
            },
        };
        let resolved = resolve(&config, &env_with_home(), &CliOverrides::default()).unwrap();
        assert_eq!(resolved.log_level, DEFAULT_LOG_LEVEL);
    }

    #[test]
    fn test_toml_parses_all_fields() {
        let toml_str = r#"
[general]
editor = "nvim"
render_markdown = false
theme = "light"
log_level = "debug"
"#;
        let config: DaybookConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.general.editor.as_deref(), Some("nvim"));
        assert_eq!(config.general.render_markdown, Some(false));
        assert_eq!(config.general.theme, Some(Theme::Light));

        let resolved = resolve(&config, &env_with_home(), &CliOverrides::default()).unwrap();
        assert_eq!(resolved.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let config: DaybookConfig = toml::from_str("").unwrap();
        assert!(config.general.editor.is_none());
        assert!(config.general.theme.is_none());
    }

    #[test]
    fn test_load_config_generates_commented_default() {
        let dir = tempfile::tempdir().unwrap();
        let config_dir = dir.path().join(".daybook");

        let config = load_config(&config_dir).unwrap();
        assert!(config.general.editor.is_none());

        let written = fs::read_to_string(config_dir.join(CONFIG_FILE_NAME)).unwrap();
        assert!(written.starts_with("# Daybook Configuration"));
        // Everything is commented out, so it parses to defaults
        let reparsed: DaybookConfig = toml::from_str(&written).unwrap();
        assert!(reparsed.general.theme.is_none());
    }

    #[test]
    fn test_load_config_malformed_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(CONFIG_FILE_NAME), "[general\neditor = ").unwrap();
        let err = load_config(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }), "{err}");
    }
}
