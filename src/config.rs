//! Startup configuration.
//!
//! The gallery runs without any configuration. Pointing `FORMSFLOW_CONFIG` at a JSON
//! file lets a viewer start from other settings, load a different design-token file,
//! or resize the window.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use gpui::{App, Pixels, px};
use serde::Deserialize;
use thiserror::Error;

use crate::theme::{Theme, ThemeExt, ThemeSettings};

pub const CONFIG_ENV_VAR: &str = "FORMSFLOW_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not parse design tokens {path}: {source}")]
    Theme {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl WindowConfig {
    pub fn size(&self) -> gpui::Size<Pixels> {
        gpui::size(px(self.width), px(self.height))
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1280.,
            height: 860.,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Customization settings the store starts with.
    pub settings: ThemeSettings,
    /// Optional design-token file replacing the builtin one.
    pub theme: Option<PathBuf>,
    pub window: WindowConfig,
}

impl AppConfig {
    /// Loads the file named by [`CONFIG_ENV_VAR`], or the defaults when it is unset.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }

    /// Like [`AppConfig::load`], but logs failures and falls back to the defaults.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            log::warn!("{err}; starting with default configuration");
            Self::default()
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Resolves the design tokens this config asks for.
    pub fn design_tokens(&self) -> Result<Theme, ConfigError> {
        match &self.theme {
            Some(path) => Theme::from_path(path),
            None => Ok(Theme::DEFAULT.clone()),
        }
    }

    /// Installs the configured design tokens, falling back to the builtin ones.
    pub fn install_theme(&self, cx: &mut App) {
        match self.design_tokens() {
            Ok(theme) => cx.set_theme(theme),
            Err(err) => {
                log::warn!("{err}; using builtin design tokens");
                cx.set_theme(Theme::DEFAULT);
            }
        }
    }
}

impl FromStr for AppConfig {
    type Err = serde_json::Error;

    fn from_str(contents: &str) -> Result<Self, Self::Err> {
        serde_json::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{ButtonStyle, HexColor};

    #[test]
    fn empty_config_uses_defaults() {
        let config = AppConfig::from_str("{}").expect("empty object is valid");
        assert_eq!(config.settings, ThemeSettings::default());
        assert!(config.theme.is_none());
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn reads_partial_settings() {
        let config = AppConfig::from_str(
            r##"{
                "settings": { "buttonStyle": "pill", "backgroundColor": "#F0FDF4" },
                "window": { "width": 900 }
            }"##,
        )
        .expect("valid config");

        assert_eq!(config.settings.button_style, ButtonStyle::Pill);
        assert_eq!(config.settings.background_color, HexColor::from_u32(0xF0FDF4));
        assert_eq!(config.window.width, 900.);
        assert_eq!(config.window.height, WindowConfig::default().height);
    }

    #[test]
    fn parses_through_str_parse() {
        let config: AppConfig = r#"{ "window": { "height": 640 } }"#
            .parse()
            .expect("valid config");
        assert_eq!(config.window.height, 640.);

        assert!("{ not json".parse::<AppConfig>().is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = AppConfig::from_path("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn missing_theme_file_is_reported() {
        let config = AppConfig {
            theme: Some(PathBuf::from("/definitely/not/theme.json")),
            ..AppConfig::default()
        };
        assert!(matches!(config.design_tokens(), Err(ConfigError::Io { .. })));
    }

    #[test]
    fn builtin_tokens_without_override() {
        let theme = AppConfig::default().design_tokens().expect("builtin theme");
        assert_eq!(theme.name.to_string(), "formsflow");
    }
}
