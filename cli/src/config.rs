//! Script runner settings.
//!
//! Each setting has a built-in default and an allowed range. Values come
//! from, lowest priority first: defaults, an optional YAML file, then
//! command-line flags. Range checks run once, after all sources are merged.

use std::ops::RangeInclusive;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CliError, Result};

pub const DEPTH_RANGE: RangeInclusive<u32> = 1..=1024;
pub const TOP_RANGE: RangeInclusive<usize> = 0..=100_000;

/// How query results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One human-readable line per result.
    #[default]
    Text,
    /// One JSON object per result line.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Stop at the first failing command instead of reporting and continuing.
    pub strict: bool,
    /// Depth used by `within` and `subgraph` when the script omits one.
    pub default_depth: u32,
    /// Result limit used by `rank` when the script omits one. 0 = no limit.
    pub default_top: usize,
    pub format: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            strict: false,
            default_depth: 3,
            default_top: 10,
            format: OutputFormat::Text,
        }
    }
}

/// Command-line values that take precedence over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub strict: Option<bool>,
    pub default_depth: Option<u32>,
    pub default_top: Option<usize>,
    pub format: Option<OutputFormat>,
}

impl Settings {
    pub fn from_yaml_str(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        // An empty document means "all defaults".
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(text)
    }

    /// Read settings from a YAML file. Range checks are left to `validate`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&text).map_err(|source| CliError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_overrides(mut self, overrides: &Overrides) -> Self {
        if let Some(strict) = overrides.strict {
            self.strict = strict;
        }
        if let Some(depth) = overrides.default_depth {
            self.default_depth = depth;
        }
        if let Some(top) = overrides.default_top {
            self.default_top = top;
        }
        if let Some(format) = overrides.format {
            self.format = format;
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !DEPTH_RANGE.contains(&self.default_depth) {
            return Err(CliError::InvalidSetting {
                name: "default_depth",
                reason: format!(
                    "{} is outside {}..={}",
                    self.default_depth,
                    DEPTH_RANGE.start(),
                    DEPTH_RANGE.end()
                ),
            });
        }
        if !TOP_RANGE.contains(&self.default_top) {
            return Err(CliError::InvalidSetting {
                name: "default_top",
                reason: format!(
                    "{} is outside {}..={}",
                    self.default_top,
                    TOP_RANGE.start(),
                    TOP_RANGE.end()
                ),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.default_depth, 3);
        assert_eq!(settings.default_top, 10);
        assert_eq!(settings.format, OutputFormat::Text);
        assert!(!settings.strict);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(Settings::from_yaml_str("").unwrap(), Settings::default());
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let settings = Settings::from_yaml_str("strict: true\nformat: json\n").unwrap();
        assert!(settings.strict);
        assert_eq!(settings.format, OutputFormat::Json);
        assert_eq!(settings.default_depth, 3);
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Settings::from_yaml_str("max_memory_mb: 10\n").is_err());
    }

    #[test]
    fn test_overrides_win() {
        let base = Settings::from_yaml_str("default_depth: 7\ndefault_top: 4\n").unwrap();
        let merged = base.with_overrides(&Overrides {
            strict: Some(true),
            default_depth: Some(2),
            default_top: None,
            format: Some(OutputFormat::Json),
        });
        assert!(merged.strict);
        assert_eq!(merged.default_depth, 2);
        assert_eq!(merged.default_top, 4);
        assert_eq!(merged.format, OutputFormat::Json);
    }

    #[test]
    fn test_override_can_clear_strict() {
        let base = Settings::from_yaml_str("strict: true\n").unwrap();
        let unchanged = base.clone().with_overrides(&Overrides::default());
        assert!(unchanged.strict);
        let cleared = base.with_overrides(&Overrides {
            strict: Some(false),
            ..Overrides::default()
        });
        assert!(!cleared.strict);
    }

    #[test]
    fn test_depth_out_of_range() {
        let settings = Settings {
            default_depth: 0,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(CliError::InvalidSetting { name: "default_depth", .. })
        ));
    }

    #[test]
    fn test_top_out_of_range() {
        let settings = Settings {
            default_top: 200_000,
            ..Settings::default()
        };
        assert!(matches!(
            settings.validate(),
            Err(CliError::InvalidSetting { name: "default_top", .. })
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_top: 25").unwrap();
        let settings = Settings::load(file.path()).unwrap();
        assert_eq!(settings.default_top, 25);
    }

    #[test]
    fn test_load_bad_yaml_reports_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "default_depth: [not, a, number]").unwrap();
        let err = Settings::load(file.path()).unwrap_err();
        assert!(matches!(err, CliError::ConfigParse { .. }));
        assert!(err.to_string().contains("failed to parse config"));
    }
}
