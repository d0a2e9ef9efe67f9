//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/orgchart/orgchart.toml`
//! 3. Local config: `./.orgchart.toml`, or the file given with `--config`
//! 4. Environment variables: `ORGCHART__SECTION__KEY`

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, File, FileFormat};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;

/// What node cards show. Passed to the renderer explicitly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DisplaySettings {
    /// Show the tier name under the owner's name
    pub show_subtitle: bool,
    /// Show the owner's role titles
    pub show_titles: bool,
    /// Show the subordinate count on collapsed cards
    pub show_badge: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_subtitle: true,
            show_titles: false,
            show_badge: true,
        }
    }
}

/// Headless viewport used by `simulate`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewportSettings {
    pub width: f64,
    pub height: f64,
    /// Animate centering scrolls
    pub smooth_scroll: bool,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 800.0,
            smooth_scroll: true,
        }
    }
}

/// Card geometry for the headless grid layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LayoutSettings {
    pub card_width: f64,
    pub card_height: f64,
    pub h_gap: f64,
    pub v_gap: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            card_width: 240.0,
            card_height: 96.0,
            h_gap: 24.0,
            v_gap: 48.0,
        }
    }
}

/// Unified configuration for orgchart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Settings {
    pub display: DisplaySettings,
    pub viewport: ViewportSettings,
    pub layout: LayoutSettings,
}

/// Get the XDG config directory for orgchart.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "orgchart").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("orgchart.toml"))
}

/// Local config file, looked up in the working directory.
pub fn local_config_path() -> PathBuf {
    PathBuf::from(".orgchart.toml")
}

impl Settings {
    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - config file that replaces the local lookup; must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        let defaults = Config::try_from(&Settings::default()).map_err(config_err)?;
        let mut builder = Config::builder().add_source(defaults);

        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                builder = builder.add_source(File::from(global_path).format(FileFormat::Toml));
            }
        }

        match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(ApplicationError::Config {
                        message: format!("config file not found: {}", path.display()),
                    });
                }
                builder = builder.add_source(
                    File::from(path.to_path_buf())
                        .format(FileFormat::Toml)
                        .required(true),
                );
            }
            None => {
                builder = builder.add_source(
                    File::from(local_config_path())
                        .format(FileFormat::Toml)
                        .required(false),
                );
            }
        }

        builder = builder.add_source(
            Environment::with_prefix("ORGCHART")
                .separator("__")
                .try_parsing(true),
        );

        let settings: Self = builder
            .build()
            .map_err(config_err)?
            .try_deserialize()
            .map_err(config_err)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject geometry the layout cannot work with.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let checks = [
            ("viewport.width", self.viewport.width),
            ("viewport.height", self.viewport.height),
            ("layout.card_width", self.layout.card_width),
            ("layout.card_height", self.layout.card_height),
        ];
        for (key, value) in checks {
            if !(value > 0.0) {
                return Err(ApplicationError::Config {
                    message: format!("{key} must be positive, got {value}"),
                });
            }
        }
        if self.layout.h_gap < 0.0 || self.layout.v_gap < 0.0 {
            return Err(ApplicationError::Config {
                message: "layout gaps must not be negative".to_string(),
            });
        }
        Ok(())
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# orgchart configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/orgchart/orgchart.toml
#   Local:  ./.orgchart.toml (or --config <file>)
#   Env:    ORGCHART__<SECTION>__<KEY>, e.g. ORGCHART__VIEWPORT__WIDTH=1920

[display]
# Show the tier name next to the owner's name
# show_subtitle = true
# Show the owner's role titles
# show_titles = false
# Show the number of subordinates on collapsed cards
# show_badge = true

[viewport]
# Size of the simulated viewport in pixels
# width = 1280.0
# height = 800.0
# Animate centering scrolls
# smooth_scroll = true

[layout]
# Card size and spacing for the headless layout
# card_width = 240.0
# card_height = 96.0
# h_gap = 24.0
# v_gap = 48.0
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
