//! Configuration management module.
//!
//! This module handles loading and saving the application configuration:
//! the API location, the default feed query, the theme, the log level and
//! the geolocation settings used by the weather card.

mod error;

pub use error::ConfigError;

use crate::error::AppError;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
};

const FILE_NAME: &str = "config.yml";
const DEFAULT_DIRECTORY_PATH: &str = ".config/market-pulse";
const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
const DEFAULT_LOOKUP_URL: &str = "http://ip-api.com/json";

/// Whether the user allows the client to determine their location.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationAccess {
    Allow,
    Deny,
}

/// Geolocation settings. Fixed coordinates win over the lookup URL.
///
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    #[serde(default = "default_location_access")]
    pub access: LocationAccess,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
    #[serde(default = "default_lookup_url")]
    pub lookup_url: Option<String>,
}

impl Default for LocationConfig {
    fn default() -> Self {
        LocationConfig {
            access: default_location_access(),
            latitude: None,
            longitude: None,
            lookup_url: default_lookup_url(),
        }
    }
}

/// Oversees management of configuration file.
///
#[derive(Clone, Debug)]
pub struct Config {
    pub api_base_url: String,
    pub default_query: String,
    pub theme_name: String,
    pub log_level: String,
    pub location: LocationConfig,
    dir_path: Option<PathBuf>,
}

/// Define specification for configuration file.
///
#[derive(Serialize, Deserialize)]
struct FileSpec {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    #[serde(default = "default_query")]
    pub default_query: String,
    #[serde(default = "default_theme_name")]
    pub theme_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub location: LocationConfig,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_query() -> String {
    crate::api::DEFAULT_QUERY.to_string()
}

fn default_theme_name() -> String {
    "pulse-dark".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_location_access() -> LocationAccess {
    LocationAccess::Allow
}

fn default_lookup_url() -> Option<String> {
    Some(DEFAULT_LOOKUP_URL.to_string())
}

impl Default for Config {
    fn default() -> Self {
        Config::new()
    }
}

impl Config {
    /// Return a new instance with default settings and no directory.
    ///
    pub fn new() -> Config {
        Config {
            api_base_url: default_api_base_url(),
            default_query: default_query(),
            theme_name: default_theme_name(),
            log_level: default_log_level(),
            location: LocationConfig::default(),
            dir_path: None,
        }
    }

    /// Try to load an existing configuration from the disk using the custom
    /// directory if provided, creating the directory when missing. A missing
    /// file leaves the defaults in place.
    ///
    pub fn load(&mut self, custom_path: Option<&str>) -> Result<(), AppError> {
        // Use default path unless custom path provided
        let dir_path = match custom_path {
            Some(path) => Path::new(&path).to_path_buf(),
            None => Config::default_path()?,
        };

        if !dir_path.exists() {
            fs::create_dir_all(&dir_path).map_err(|e| ConfigError::CreateDirectoryFailed {
                path: dir_path.clone(),
                source: e,
            })?;
        }
        self.dir_path = Some(dir_path);

        let file_path = self.file_path().ok_or(ConfigError::FilePathNotSet)?;
        if file_path.exists() {
            let contents = fs::read_to_string(&file_path).map_err(|e| ConfigError::LoadFailed {
                path: file_path.clone(),
                message: format!("IO error: {}", e),
            })?;
            let data: FileSpec = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::DeserializationFailed(e.to_string()))?;
            self.api_base_url = data.api_base_url;
            self.default_query = data.default_query;
            self.theme_name = data.theme_name;
            self.log_level = data.log_level;
            self.location = data.location;
        }

        Ok(())
    }

    /// Save the current configuration to disk.
    ///
    pub fn save(&self) -> Result<(), AppError> {
        let file_path = self.file_path().ok_or(ConfigError::FilePathNotSet)?;
        let data = FileSpec {
            api_base_url: self.api_base_url.clone(),
            default_query: self.default_query.clone(),
            theme_name: self.theme_name.clone(),
            log_level: self.log_level.clone(),
            location: self.location.clone(),
        };
        let content = serde_yaml::to_string(&data)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;

        if let Some(parent) = file_path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| ConfigError::CreateDirectoryFailed {
                    path: parent.to_path_buf(),
                    source: e,
                })?;
            }
        }

        let mut file = fs::File::create(&file_path).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        write!(file, "{}", content).map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        file.flush().map_err(|e| ConfigError::SaveFailed {
            path: file_path.clone(),
            source: e,
        })?;
        Ok(())
    }

    /// Directory holding the configuration and session files, once loaded.
    ///
    pub fn dir_path(&self) -> Option<&Path> {
        self.dir_path.as_deref()
    }

    /// Whether a configuration file is present in the loaded directory.
    ///
    pub fn file_exists(&self) -> bool {
        self.file_path().map_or(false, |path| path.exists())
    }

    fn file_path(&self) -> Option<PathBuf> {
        self.dir_path.as_ref().map(|dir| dir.join(FILE_NAME))
    }

    /// Returns the path buffer for the default configuration directory or an
    /// error if the home directory could not be found.
    ///
    fn default_path() -> Result<PathBuf, AppError> {
        match dirs::home_dir() {
            Some(home) => Ok(home.join(DEFAULT_DIRECTORY_PATH)),
            None => Err(ConfigError::HomeDirectoryNotFound.into()),
        }
    }
}
