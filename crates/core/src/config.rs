//! Application Configuration
//!
//! Manages the settings record a resolution runs against:
//! - Host and target settings (OS, architecture, API level, C++ runtime)
//! - NDK location override
//! - Output location and toolchain template

use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};
use directories::ProjectDirs;
use tracing::{info, debug};

use crate::error::{Result, WrapperError};

/// Raw build settings, spelled the way a dependency manager hands them over.
///
/// Values are kept as strings here; `ResolutionRequest::from_settings` in the
/// toolchain crate validates them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SettingsConfig {
    /// Build machine OS (`Windows`, `Linux`, `Macos`). Detected when unset.
    pub os_build: Option<String>,
    /// Build machine architecture (`x86`, `x86_64`). Detected when unset.
    pub arch_build: Option<String>,
    /// Compiler family, only `clang` is accepted
    pub compiler: String,
    /// C++ runtime passed through as `ANDROID_STL`
    pub compiler_libcxx: Option<String>,
    /// Target OS, only `Android` is accepted
    pub os: String,
    /// Target API level
    pub os_api_level: Option<u32>,
    /// Target architecture (`x86`, `x86_64`, `armv7`, `armv8`)
    pub arch: Option<String>,
}

impl Default for SettingsConfig {
    fn default() -> Self {
        Self {
            os_build: None,
            arch_build: None,
            compiler: "clang".to_string(),
            compiler_libcxx: None,
            os: "Android".to_string(),
            os_api_level: None,
            arch: None,
        }
    }
}

/// NDK location configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct NdkConfig {
    /// Explicit NDK path, takes precedence over `ANDROID_NDK_HOME`
    pub path: Option<PathBuf>,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the toolchain file is written into
    pub dir: PathBuf,
    /// Custom toolchain template; the bundled one is used when unset
    pub template: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("."),
            template: None,
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Configuration version for migrations
    pub version: u32,
    /// Build settings
    pub settings: SettingsConfig,
    /// NDK settings
    pub ndk: NdkConfig,
    /// Output settings
    pub output: OutputConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: 1,
            settings: SettingsConfig::default(),
            ndk: NdkConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl AppConfig {
    /// Get the configuration directory path
    pub fn config_dir() -> Option<PathBuf> {
        ProjectDirs::from("dev", "ndkwrap", "ndkwrap")
            .map(|dirs| dirs.config_dir().to_path_buf())
    }

    /// Get the configuration file path
    pub fn config_file() -> Option<PathBuf> {
        Self::config_dir().map(|dir| dir.join("config.toml"))
    }

    /// Load configuration from the per-user config file
    pub async fn load() -> Result<Self> {
        let config_file = Self::config_file()
            .ok_or_else(|| WrapperError::Config("Cannot determine config path".into()))?;
        Self::load_from(&config_file).await
    }

    /// Load configuration from `path`, falling back to defaults if it does not exist
    pub async fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            debug!("Loading config from {:?}", path);
            let contents = tokio::fs::read_to_string(path).await?;
            Self::from_toml(&contents)
        } else {
            info!("Config file {:?} not found, using defaults", path);
            Ok(AppConfig::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: AppConfig = toml::from_str(contents)?;
        if config.version != 1 {
            return Err(WrapperError::Config(format!(
                "unsupported config version {}",
                config.version
            )));
        }
        Ok(config)
    }

    /// Save configuration to the per-user config file
    pub async fn save(&self) -> Result<PathBuf> {
        let config_file = Self::config_file()
            .ok_or_else(|| WrapperError::Config("Cannot determine config path".into()))?;
        self.save_to(&config_file).await?;
        Ok(config_file)
    }

    /// Save configuration to `path`
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure directory exists
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let contents = toml::to_string_pretty(self)?;
        tokio::fs::write(path, contents).await?;

        debug!("Config saved to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.version, 1);
        assert_eq!(config.settings.compiler, "clang");
        assert_eq!(config.settings.os, "Android");
        assert!(config.settings.os_api_level.is_none());
        assert!(config.settings.compiler_libcxx.is_none());
        assert_eq!(config.output.dir, PathBuf::from("."));
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
[settings]
arch = "armv8"
os_api_level = 21

[ndk]
path = "/opt/android-ndk"
"#,
        )
        .unwrap();

        assert_eq!(config.settings.arch.as_deref(), Some("armv8"));
        assert_eq!(config.settings.os_api_level, Some(21));
        assert_eq!(config.settings.compiler, "clang");
        assert_eq!(config.ndk.path, Some(PathBuf::from("/opt/android-ndk")));
    }

    #[test]
    fn test_rejects_unknown_version() {
        let err = AppConfig::from_toml("version = 2").unwrap_err();
        assert!(matches!(err, WrapperError::Config(_)));
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = AppConfig::default();
        config.settings.arch = Some("armv7".to_string());
        config.settings.os_api_level = Some(19);
        config.save_to(&path).await.unwrap();

        let loaded = AppConfig::load_from(&path).await.unwrap();
        assert_eq!(loaded, config);
    }

    #[tokio::test]
    async fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = AppConfig::load_from(&dir.path().join("absent.toml")).await.unwrap();
        assert_eq!(loaded, AppConfig::default());
    }
}
