//! Configuration file support

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Configuration for teller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the assistant service
    pub endpoint: String,
    /// Greeting the conversation opens with (stock greeting when unset)
    pub greeting: Option<String>,
    /// Reply shown when the service can't be reached (stock text when unset)
    pub fallback_reply: Option<String>,
    /// Request timeout in seconds; 0 disables the timeout
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:8000".to_string(),
            greeting: None,
            fallback_reply: None,
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Get the config directory
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("teller")
    }

    /// Get the config file path
    pub fn config_path() -> PathBuf {
        // Check for TELLER_CONFIG_PATH env var first
        if let Ok(path) = std::env::var("TELLER_CONFIG_PATH") {
            return PathBuf::from(path);
        }
        Self::config_dir().join("config.toml")
    }

    /// Load config from file
    pub fn load() -> Self {
        let path = Self::config_path();
        if !path.exists() {
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("Warning: Failed to parse config file: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("Warning: Failed to read config file: {}", e);
                Self::default()
            }
        }
    }

    /// Save config to file
    pub fn save(&self) -> std::io::Result<()> {
        let path = Self::config_path();
        let dir = path.parent().unwrap();
        fs::create_dir_all(dir)?;

        let content = toml::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(path, content)
    }

    /// Create a default config file if it doesn't exist
    pub fn init() -> std::io::Result<PathBuf> {
        let path = Self::config_path();
        if path.exists() {
            return Ok(path);
        }

        Config::default().save()?;
        Ok(path)
    }
}

/// Generate example config content
pub fn example_config() -> &'static str {
    r#"# teller configuration file
# Place at ~/.config/teller/config.toml (Linux/Mac) or %APPDATA%\teller\config.toml (Windows)

# Base URL of the assistant service
endpoint = "http://localhost:8000"

# Request timeout in seconds (0 disables the timeout)
timeout_secs = 30

# Greeting the conversation opens with (optional)
# greeting = "Hello! I am your banking assistant. How can I help you today?"

# Reply shown when the service can't be reached (optional)
# fallback_reply = "Sorry, I couldn't reach the support service. Please try sending your message again."
"#
}
