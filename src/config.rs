//! Host configuration: sample rate, block size, channel layout, and the
//! device sample format, loaded from a TOML file the example host reads at
//! startup. The core itself never touches the filesystem — this is ambient
//! configuration for the collaborator binary, not the CORE's own state.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::audio::SampleFormat;

fn default_sample_rate() -> u32 {
    44100
}

fn default_block_size() -> usize {
    256
}

fn default_channels() -> usize {
    2
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_sample_rate")]
    pub sample_rate: u32,

    #[serde(default = "default_block_size")]
    pub block_size: usize,

    #[serde(default = "default_channels")]
    pub channels: usize,

    #[serde(default)]
    pub format: ConfigSampleFormat,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: default_sample_rate(),
            block_size: default_block_size(),
            channels: default_channels(),
            format: ConfigSampleFormat::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(Self::from_toml_str(&text)?)
    }
}

/// Serializable mirror of [`SampleFormat`] — the wire/file form doesn't
/// carry the `big_endian` flag inline on every variant the way the runtime
/// enum does, to keep the TOML readable.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSampleFormat {
    I8,
    I16Le,
    I16Be,
    I24Le,
    I24Be,
    I32Le,
    I32Be,
    #[default]
    F32Le,
    F32Be,
    F64Le,
    F64Be,
}

impl From<ConfigSampleFormat> for SampleFormat {
    fn from(value: ConfigSampleFormat) -> Self {
        match value {
            ConfigSampleFormat::I8 => SampleFormat::I8,
            ConfigSampleFormat::I16Le => SampleFormat::I16 { big_endian: false },
            ConfigSampleFormat::I16Be => SampleFormat::I16 { big_endian: true },
            ConfigSampleFormat::I24Le => SampleFormat::I24 { big_endian: false },
            ConfigSampleFormat::I24Be => SampleFormat::I24 { big_endian: true },
            ConfigSampleFormat::I32Le => SampleFormat::I32 { big_endian: false },
            ConfigSampleFormat::I32Be => SampleFormat::I32 { big_endian: true },
            ConfigSampleFormat::F32Le => SampleFormat::F32 { big_endian: false },
            ConfigSampleFormat::F32Be => SampleFormat::F32 { big_endian: true },
            ConfigSampleFormat::F64Le => SampleFormat::F64 { big_endian: false },
            ConfigSampleFormat::F64Be => SampleFormat::F64 { big_endian: true },
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = EngineConfig::default();
        assert_eq!(cfg.sample_rate, 44100);
        assert_eq!(cfg.block_size, 256);
        assert_eq!(cfg.channels, 2);
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let cfg = EngineConfig::from_toml_str("sample_rate = 48000\n").unwrap();
        assert_eq!(cfg.sample_rate, 48000);
        assert_eq!(cfg.block_size, 256);
    }

    #[test]
    fn format_round_trips_through_sample_format() {
        let cfg = EngineConfig::from_toml_str("format = \"i16_be\"\n").unwrap();
        let format: SampleFormat = cfg.format.into();
        assert_eq!(format, SampleFormat::I16 { big_endian: true });
    }

    #[test]
    fn load_reads_a_config_file_from_disk() {
        use std::io::Write;
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "sample_rate = 96000\nblock_size = 128\n").unwrap();
        let cfg = EngineConfig::load(file.path()).unwrap();
        assert_eq!(cfg.sample_rate, 96000);
        assert_eq!(cfg.block_size, 128);
    }

    #[test]
    fn load_surfaces_io_error_for_missing_file() {
        let err = EngineConfig::load("/nonexistent/path/aurora.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
