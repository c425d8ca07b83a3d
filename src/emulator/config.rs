// Configuration management
//
// Debugging switches for the emulation core, persisted as TOML.

use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Number of palettes a pattern table view can be drawn with
pub const PALETTE_COUNT: u8 = 8;

/// Errors loading or saving a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access configuration file: {0}")]
    Io(#[from] io::Error),

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Emulator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmulatorConfig {
    /// Trace settings
    pub trace: TraceConfig,

    /// Debug view settings
    pub debug: DebugConfig,
}

/// Trace configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraceConfig {
    /// Log one nestest-format line per executed instruction
    pub cpu: bool,
}

/// Debug view configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    /// Palette (0-7) used when drawing pattern tables
    pub palette: u8,
}

impl EmulatorConfig {
    /// Parse a configuration from TOML text
    ///
    /// Missing sections and keys take their default values. An out-of-range
    /// palette is wrapped into 0-7.
    ///
    /// # Example
    ///
    /// ```
    /// use nes_core::emulator::EmulatorConfig;
    ///
    /// let config = EmulatorConfig::from_toml_str("[trace]\ncpu = true\n").unwrap();
    /// assert!(config.trace.cpu);
    /// assert_eq!(config.debug.palette, 0);
    /// ```
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let mut config: EmulatorConfig = toml::from_str(contents)?;
        config.debug.palette %= PALETTE_COUNT;
        Ok(config)
    }

    /// Serialize to pretty-printed TOML
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Load configuration from file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Save configuration to file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }

    /// Load configuration from file, falling back to defaults
    ///
    /// A missing file is not an error. An unreadable or invalid one is logged
    /// and ignored.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            return Self::default();
        }

        Self::load(path).unwrap_or_else(|err| {
            warn!("Ignoring configuration {}: {}", path.display(), err);
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("nes_core_{}_{}.toml", name, std::process::id()))
    }

    #[test]
    fn test_default_config() {
        let config = EmulatorConfig::default();
        assert!(!config.trace.cpu);
        assert_eq!(config.debug.palette, 0);
    }

    #[test]
    fn test_config_serialization() {
        let mut config = EmulatorConfig::default();
        config.trace.cpu = true;
        config.debug.palette = 5;

        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("[trace]"));
        assert!(toml_str.contains("palette = 5"));

        let deserialized = EmulatorConfig::from_toml_str(&toml_str).unwrap();
        assert_eq!(deserialized, config);
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = EmulatorConfig::from_toml_str("").unwrap();
        assert_eq!(config, EmulatorConfig::default());

        let config = EmulatorConfig::from_toml_str("[debug]\npalette = 3\n").unwrap();
        assert!(!config.trace.cpu);
        assert_eq!(config.debug.palette, 3);
    }

    #[test]
    fn test_palette_wraps() {
        let config = EmulatorConfig::from_toml_str("[debug]\npalette = 9\n").unwrap();
        assert_eq!(config.debug.palette, 1);
    }

    #[test]
    fn test_invalid_toml_is_parse_error() {
        let err = EmulatorConfig::from_toml_str("[trace]\ncpu = \"yes\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("save_and_load");
        let mut config = EmulatorConfig::default();
        config.trace.cpu = true;

        config.save(&path).unwrap();
        let loaded = EmulatorConfig::load(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = EmulatorConfig::load(temp_path("does_not_exist")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_load_or_default_falls_back() {
        assert_eq!(
            EmulatorConfig::load_or_default(temp_path("also_missing")),
            EmulatorConfig::default()
        );

        let path = temp_path("broken");
        fs::write(&path, "not = [valid").unwrap();
        let config = EmulatorConfig::load_or_default(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(config, EmulatorConfig::default());
    }
}
