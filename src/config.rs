use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::utils;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_view")]
    pub default_view: String,
    #[serde(default = "default_cities")]
    pub cities: Vec<String>,
    #[serde(default = "default_moods")]
    pub default_moods: Vec<String>,
    #[serde(default)]
    pub key_bindings: KeyBindings,
    #[serde(default = "default_current_theme")]
    pub current_theme: String,
    #[serde(default)]
    pub themes: HashMap<String, Theme>,
    #[serde(default = "default_config_version")]
    pub config_version: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyBindings {
    #[serde(default = "default_quit")]
    pub quit: String,
    #[serde(default = "default_help")]
    pub help: String,
    #[serde(default = "default_search")]
    pub search: String,
    #[serde(default = "default_filter")]
    pub filter: String,
    #[serde(default = "default_clear_filters")]
    pub clear_filters: String,
    #[serde(default = "default_select")]
    pub select: String,
    #[serde(default = "default_list_up")]
    pub list_up: String,
    #[serde(default = "default_list_down")]
    pub list_down: String,
    #[serde(default = "default_tab_left")]
    pub tab_left: String,
    #[serde(default = "default_tab_right")]
    pub tab_right: String,
    #[serde(default = "default_prev_month")]
    pub prev_month: String,
    #[serde(default = "default_next_month")]
    pub next_month: String,
    #[serde(default = "default_today")]
    pub today: String,
    #[serde(default = "default_toggle_favorite")]
    pub toggle_favorite: String,
    #[serde(default = "default_delete")]
    pub delete: String,
    #[serde(default = "default_publish")]
    pub publish: String,
    #[serde(default = "default_new_mood")]
    pub new_mood: String,
    #[serde(default = "default_cycle_theme")]
    pub cycle_theme: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    #[serde(default = "default_fg")]
    pub fg: String,
    #[serde(default = "default_bg")]
    pub bg: String,
    #[serde(default = "default_highlight_bg")]
    pub highlight_bg: String,
    #[serde(default = "default_accent")]
    pub accent: String,
    #[serde(default = "default_muted")]
    pub muted: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            log_level: default_log_level(),
            default_view: default_view(),
            cities: default_cities(),
            default_moods: default_moods(),
            key_bindings: KeyBindings::default(),
            current_theme: default_current_theme(),
            themes: HashMap::new(),
            config_version: Some(CURRENT_CONFIG_VERSION),
        }
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            quit: default_quit(),
            help: default_help(),
            search: default_search(),
            filter: default_filter(),
            clear_filters: default_clear_filters(),
            select: default_select(),
            list_up: default_list_up(),
            list_down: default_list_down(),
            tab_left: default_tab_left(),
            tab_right: default_tab_right(),
            prev_month: default_prev_month(),
            next_month: default_next_month(),
            today: default_today(),
            toggle_favorite: default_toggle_favorite(),
            delete: default_delete(),
            publish: default_publish(),
            new_mood: default_new_mood(),
            cycle_theme: default_cycle_theme(),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            fg: default_fg(),
            bg: default_bg(),
            highlight_bg: default_highlight_bg(),
            accent: default_accent(),
            muted: default_muted(),
        }
    }
}

impl Theme {
    fn preset(fg: &str, bg: &str, highlight_bg: &str, accent: &str, muted: &str) -> Self {
        Self {
            fg: fg.to_string(),
            bg: bg.to_string(),
            highlight_bg: highlight_bg.to_string(),
            accent: accent.to_string(),
            muted: muted.to_string(),
        }
    }

    /// Preset themes that are always available
    pub fn get_preset_themes() -> HashMap<String, Theme> {
        let mut themes = HashMap::new();
        themes.insert("default".to_string(), Theme::default());
        themes.insert("indigo".to_string(), Theme::preset("white", "black", "#6d28d9", "lightmagenta", "darkgray"));
        themes.insert("light".to_string(), Theme::preset("black", "white", "blue", "magenta", "gray"));
        themes.insert("monochrome".to_string(), Theme::preset("white", "black", "white", "white", "gray"));
        themes
    }
}

// Default value functions
fn default_database_path() -> String {
    if let Some(data_dir) = utils::get_data_dir(utils::Profile::Prod) {
        data_dir.join("parchify.db").to_string_lossy().to_string()
    } else {
        "~/.local/share/parchify/parchify.db".to_string()
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_view() -> String {
    "cards".to_string()
}

fn default_cities() -> Vec<String> {
    ["Cali", "Bogotá", "Medellín", "Barranquilla", "Cartagena"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_moods() -> Vec<String> {
    ["party", "cultural", "family", "romantic", "adventure"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_quit() -> String {
    "q".to_string()
}

fn default_help() -> String {
    "F1".to_string()
}

fn default_search() -> String {
    "/".to_string()
}

fn default_filter() -> String {
    "f".to_string()
}

fn default_clear_filters() -> String {
    "c".to_string()
}

fn default_select() -> String {
    "Enter".to_string()
}

fn default_list_up() -> String {
    "k".to_string()
}

fn default_list_down() -> String {
    "j".to_string()
}

fn default_tab_left() -> String {
    "Left".to_string()
}

fn default_tab_right() -> String {
    "Right".to_string()
}

fn default_prev_month() -> String {
    "[".to_string()
}

fn default_next_month() -> String {
    "]".to_string()
}

fn default_today() -> String {
    "t".to_string()
}

fn default_toggle_favorite() -> String {
    "s".to_string()
}

fn default_delete() -> String {
    "d".to_string()
}

fn default_publish() -> String {
    "p".to_string()
}

fn default_new_mood() -> String {
    "n".to_string()
}

fn default_cycle_theme() -> String {
    "F2".to_string()
}

fn default_current_theme() -> String {
    "default".to_string()
}

fn default_fg() -> String {
    "white".to_string()
}

fn default_bg() -> String {
    "black".to_string()
}

fn default_highlight_bg() -> String {
    "blue".to_string()
}

fn default_accent() -> String {
    "cyan".to_string()
}

fn default_muted() -> String {
    "darkgray".to_string()
}

fn default_config_version() -> Option<u32> {
    Some(CURRENT_CONFIG_VERSION)
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config directory: {0}")]
    ConfigDirError(String),
    #[error("Failed to read config file: {0}")]
    ReadError(String),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to write config file: {0}")]
    WriteError(String),
    #[error("Theme not found: {0}")]
    ThemeNotFound(String),
}

impl Config {
    /// Load configuration for a profile, creating the default file if missing
    pub fn load_with_profile(profile: utils::Profile) -> Result<Self, ConfigError> {
        let config_path = Self::get_config_path(profile)?;
        Self::load_from_path(&config_path, profile)
    }

    /// Load configuration from an explicit path, creating it if missing
    pub fn load_from_path(config_path: &Path, profile: utils::Profile) -> Result<Self, ConfigError> {
        if config_path.exists() {
            let contents = fs::read_to_string(config_path)
                .map_err(|e| ConfigError::ReadError(e.to_string()))?;
            let config: Config = toml::from_str(&contents)?;
            log::debug!("event=config_load path={} status=ok", config_path.display());
            Ok(config)
        } else {
            let mut config = Config::default();
            config.database_path = Self::default_database_path_for_profile(profile);
            config.save_to_path(config_path)?;
            Ok(config)
        }
    }

    /// Save configuration to the profile's config file
    pub fn save_with_profile(&mut self, profile: utils::Profile) -> Result<(), ConfigError> {
        let config_path = Self::get_config_path(profile)?;
        self.save_to_path(&config_path)
    }

    pub fn save_to_path(&mut self, config_path: &Path) -> Result<(), ConfigError> {
        self.config_version = Some(CURRENT_CONFIG_VERSION);

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ConfigError::WriteError(e.to_string()))?;
        }

        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::WriteError(format!("Failed to serialize config: {}", e)))?;

        fs::write(config_path, toml_string)
            .map_err(|e| ConfigError::WriteError(e.to_string()))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn get_config_path(profile: utils::Profile) -> Result<PathBuf, ConfigError> {
        let config_dir = utils::get_config_dir(profile)
            .ok_or_else(|| ConfigError::ConfigDirError("Could not determine config directory".to_string()))?;
        Ok(config_dir.join("config.toml"))
    }

    fn default_database_path_for_profile(profile: utils::Profile) -> String {
        match utils::get_data_dir(profile) {
            Some(data_dir) => data_dir.join("parchify.db").to_string_lossy().to_string(),
            None => format!("~/.local/share/{}/parchify.db", profile.app_name()),
        }
    }

    /// Get the expanded database path (with ~ expansion)
    pub fn get_database_path(&self) -> PathBuf {
        utils::expand_path(&self.database_path)
    }

    /// Get the currently active theme, falling back to the default preset
    pub fn get_active_theme(&self) -> Theme {
        self.themes
            .get(&self.current_theme)
            .cloned()
            .or_else(|| Theme::get_preset_themes().remove(&self.current_theme))
            .unwrap_or_default()
    }

    /// Set the active theme by name
    pub fn set_theme(&mut self, name: &str) -> Result<(), ConfigError> {
        if !self.themes.contains_key(name) && !Theme::get_preset_themes().contains_key(name) {
            return Err(ConfigError::ThemeNotFound(name.to_string()));
        }
        self.current_theme = name.to_string();
        Ok(())
    }

    /// All available theme names (presets + user-defined), sorted
    pub fn get_available_themes(&self) -> Vec<String> {
        let mut themes: Vec<String> = Theme::get_preset_themes().into_keys().collect();
        for name in self.themes.keys() {
            if !themes.contains(name) {
                themes.push(name.clone());
            }
        }
        themes.sort();
        themes
    }

    /// Name of the theme after the current one, wrapping around
    pub fn next_theme_name(&self) -> String {
        let themes = self.get_available_themes();
        let idx = themes.iter().position(|t| *t == self.current_theme);
        match idx {
            Some(i) => themes[(i + 1) % themes.len()].clone(),
            None => themes.first().cloned().unwrap_or_else(default_current_theme),
        }
    }
}
