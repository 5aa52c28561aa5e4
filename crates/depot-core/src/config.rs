//! User configuration from ~/.config/depot/config.toml

use serde::Deserialize;
use std::path::PathBuf;

/// User configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    /// Executables used to drive each dependency manager.
    pub executables: ExecutablesConfig,
}

/// Executable names or paths for the dependency managers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ExecutablesConfig {
    pub carthage: String,
    /// `swift`, invoked as `swift package ...`.
    pub swift: String,
    pub pod: String,
}

impl Default for ExecutablesConfig {
    fn default() -> Self {
        Self {
            carthage: "carthage".to_string(),
            swift: "swift".to_string(),
            pod: "pod".to_string(),
        }
    }
}

impl UserConfig {
    /// Load user config from default path (~/.config/depot/config.toml).
    pub fn load() -> Self {
        Self::from_path(Self::default_path()).unwrap_or_default()
    }

    /// Load user config from a specific path.
    pub fn from_path(path: Option<PathBuf>) -> Option<Self> {
        let path = path?;
        let contents = std::fs::read_to_string(&path).ok()?;
        toml::from_str(&contents).ok()
    }

    /// Get the default config path.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("depot").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config() {
        let toml = r#"
            [executables]
            carthage = "/opt/homebrew/bin/carthage"
        "#;

        let config: UserConfig = toml::from_str(toml).unwrap();
        assert_eq!(config.executables.carthage, "/opt/homebrew/bin/carthage");
        assert_eq!(config.executables.swift, "swift");
        assert_eq!(config.executables.pod, "pod");
    }

    #[test]
    fn default_config() {
        let config = UserConfig::default();
        assert_eq!(config.executables, ExecutablesConfig::default());
    }

    #[test]
    fn missing_file_yields_none() {
        let temp = tempfile::tempdir().unwrap();
        assert!(UserConfig::from_path(Some(temp.path().join("config.toml"))).is_none());
        assert!(UserConfig::from_path(None).is_none());
    }

    #[test]
    fn read_from_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "[executables]\npod = \"bundle-pod\"\n").unwrap();

        let config = UserConfig::from_path(Some(path)).unwrap();
        assert_eq!(config.executables.pod, "bundle-pod");
    }
}
