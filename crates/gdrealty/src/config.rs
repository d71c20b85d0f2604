//! Configuration management for gdrealty.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default configuration directory name.
const APP_DIR_NAME: &str = "gdrealty";

/// Prefix for environment overrides; nested keys are separated by `__`.
const ENV_PREFIX: &str = "GDREALTY_";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables (prefixed with `GDREALTY_`, e.g.
///    `GDREALTY_SERVER__BIND`)
/// 2. TOML config file at `~/.config/gdrealty/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration.
    pub server: ServerConfig,
    /// Agency contact details shown across the site.
    pub site: SiteConfig,
    /// Interactive behavior of pages.
    pub ui: UiConfig,
    /// Where content comes from.
    pub content: ContentConfig,
}

/// HTTP server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on.
    pub bind: String,
    /// Serve the WebSocket live channel that drives carousels and the navbar.
    /// Pages remain usable through plain links when disabled.
    pub live_updates: bool,
}

/// Agency details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Agency name.
    pub name: String,
    /// Hero line on the home page.
    pub tagline: String,
    /// Display phone number.
    pub phone: String,
    /// Contact email address.
    pub email: String,
    /// Office address.
    pub address: String,
    /// Opening hours, in display order.
    pub office_hours: Vec<OfficeHours>,
}

/// One row of the opening hours table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficeHours {
    /// Day range ("Monday - Friday").
    pub days: String,
    /// Hours ("9:00 AM - 6:00 PM").
    pub hours: String,
}

/// Interactive behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Gallery auto-advance period in milliseconds.
    pub auto_advance_ms: u64,
    /// Scroll offset in pixels past which the navbar changes treatment.
    pub scroll_threshold_px: u32,
}

/// Content source configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// JSON content file. The built-in catalog is used when unset.
    pub path: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            live_updates: true,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "GD RealState".to_string(),
            tagline: "We make real estate simple, personal, and stress-free.".to_string(),
            phone: "(555) 123-4567".to_string(),
            email: "hello@gdrealstate.com".to_string(),
            address: "123 Real Estate Ave, City, ST 12345".to_string(),
            office_hours: default_office_hours(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            auto_advance_ms: 4000,
            scroll_threshold_px: 20,
        }
    }
}

fn default_office_hours() -> Vec<OfficeHours> {
    [
        ("Monday - Friday", "9:00 AM - 6:00 PM"),
        ("Saturday", "10:00 AM - 4:00 PM"),
        ("Sunday", "By Appointment"),
    ]
    .into_iter()
    .map(|(days, hours)| OfficeHours {
        days: days.to_string(),
        hours: hours.to_string(),
    })
    .collect()
}

const EMAIL_PATTERN: &str = r"^[^@\s]+@[^@\s]+\.[^@\s]+$";
const PHONE_PATTERN: &str = r"^\+?[0-9(][0-9 ().-]{5,}[0-9]$";

impl Config {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading, parsing, or validation fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(APP_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        self.bind_addr()?;

        if self.ui.auto_advance_ms == 0 {
            return Err(Error::config_validation(
                "auto_advance_ms must be greater than 0",
            ));
        }

        let email = Regex::new(EMAIL_PATTERN).map_err(|e| Error::internal(e.to_string()))?;
        if !email.is_match(&self.site.email) {
            return Err(Error::config_validation(format!(
                "site.email is not an email address: {}",
                self.site.email
            )));
        }

        let phone = Regex::new(PHONE_PATTERN).map_err(|e| Error::internal(e.to_string()))?;
        if !phone.is_match(&self.site.phone) {
            return Err(Error::config_validation(format!(
                "site.phone is not a phone number: {}",
                self.site.phone
            )));
        }

        Ok(())
    }

    /// Parse the bind address.
    ///
    /// # Errors
    ///
    /// Returns an error if `server.bind` is not a socket address.
    pub fn bind_addr(&self) -> Result<SocketAddr> {
        self.server.bind.parse().map_err(|_| {
            Error::config_validation(format!(
                "server.bind is not a socket address: {}",
                self.server.bind
            ))
        })
    }
}

impl UiConfig {
    /// Gallery auto-advance period.
    #[must_use]
    pub fn auto_advance_interval(&self) -> Duration {
        Duration::from_millis(self.auto_advance_ms)
    }
}

impl SiteConfig {
    /// `tel:` link target for the display phone number.
    ///
    /// Ten-digit numbers are assumed to be North American.
    #[must_use]
    pub fn phone_href(&self) -> String {
        let digits: String = self.phone.chars().filter(char::is_ascii_digit).collect();
        if self.phone.trim_start().starts_with('+') {
            format!("tel:+{digits}")
        } else if digits.len() == 10 {
            format!("tel:+1{digits}")
        } else {
            format!("tel:{digits}")
        }
    }
}
