//! Application configuration.

use crate::environment::Environment;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::{fs, path::Path};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Anonymous identifier sent as `X-Client-Id` on every request.
    pub client_id: String,
    /// Default environment used when none is given on the command line.
    #[serde(default)]
    pub environment: String,
}

impl Config {
    /// Create Config with the given client_id.
    pub fn new(client_id: String, environment: String) -> Self {
        Config {
            client_id,
            environment,
        }
    }

    /// Loads configuration from a JSON file at the given path.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if reading from file fails or JSON is invalid.
    pub fn load_from_file(path: &Path) -> Result<Self, std::io::Error> {
        let buf = fs::read(path)?;
        let config: Config = serde_json::from_slice(&buf)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        Ok(config)
    }

    /// Saves the configuration to a JSON file at the given path.
    ///
    /// Directories will be created if they don't exist. This method overwrites existing files.
    ///
    /// # Errors
    /// Returns an `std::io::Error` if writing to file fails or serialization fails.
    pub fn save(&self, path: &Path) -> Result<(), std::io::Error> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Serialization failed: {}", e),
            )
        })?;
        fs::write(path, json)?;
        Ok(())
    }

    /// The environment stored in the config file, if it parses.
    pub fn stored_environment(&self) -> Option<Environment> {
        self.environment.parse::<Environment>().ok()
    }
}

/// Path of the console's config file (`~/.trustlock/config.json`).
pub fn get_config_path() -> Result<PathBuf, std::io::Error> {
    let home = home::home_dir().ok_or_else(|| {
        std::io::Error::new(std::io::ErrorKind::NotFound, "Home directory not found")
    })?;
    Ok(home.join(".trustlock").join("config.json"))
}

/// Load the config file, or create one with a freshly generated client id.
pub fn load_or_create(path: &Path) -> Result<Config, std::io::Error> {
    if path.exists() {
        return Config::load_from_file(path);
    }
    let config = Config::new(uuid::Uuid::new_v4().to_string(), String::new());
    config.save(path)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    // Loading a saved configuration file should return the same configuration.
    fn test_load_recovers_saved_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let config = Config::new("test_client_id".to_string(), "local".to_string());
        config.save(&path).unwrap();

        let loaded_config = Config::load_from_file(&path).unwrap();
        assert_eq!(config, loaded_config);
        assert_eq!(loaded_config.stored_environment(), Some(Environment::Local));
    }

    #[test]
    // Saving a configuration should create directories if they don't exist.
    fn test_save_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nonexistent_dir").join("config.json");

        let config = Config::new("test_client_id".to_string(), String::new());
        let result = config.save(&path);

        assert!(result.is_ok(), "Failed to save config");
        assert!(
            path.parent().unwrap().exists(),
            "Parent directory does not exist"
        );
    }

    #[test]
    // load_or_create mints a client id once and then keeps it stable.
    fn test_load_or_create_is_stable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");

        let first = load_or_create(&path).unwrap();
        assert!(!first.client_id.is_empty());

        let second = load_or_create(&path).unwrap();
        assert_eq!(first.client_id, second.client_id);
    }

    #[test]
    // Loading an invalid JSON file should return an error.
    fn test_load_rejects_invalid_json() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("invalid_config.json");

        let mut file = File::create(&path).unwrap();
        writeln!(file, "invalid json").unwrap();

        let result = Config::load_from_file(&path);
        assert!(result.is_err());

        // An unknown stored environment is simply ignored.
        let config = Config::new("id".to_string(), "beta".to_string());
        assert_eq!(config.stored_environment(), None);
    }
}
