use std::{collections::BTreeMap, fs, path::Path};

use mdprose_commonmark::{ClassifierOptions, HeadingLines};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration for mdprose.
///
/// Loaded from a TOML or JSON file. Every field is optional so that several
/// files can be layered with [`Config::merge`] and adjusted from the command
/// line with [`Config::apply_overrides`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Markdown classifier settings, the `[parser]` table.
  pub parser: ParserConfig,

  /// Top-level keys mdprose does not know. Kept only to warn about them.
  #[serde(flatten, skip_serializing)]
  pub unknown: BTreeMap<String, serde_json::Value>,
}

/// Settings for the Markdown classifier.
///
/// Unset fields fall back to the [`ClassifierOptions`] defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
  /// Enable GitHub Flavored Markdown extensions.
  pub gfm: Option<bool>,

  /// Remove a leading frontmatter block before parsing.
  pub strip_frontmatter: Option<bool>,

  /// Remove `!!!` admonition blocks before parsing.
  pub strip_admonitions: Option<bool>,

  /// Line numbering for headings, `"original"` or `"cleaned"`.
  pub heading_lines: Option<HeadingLines>,

  /// Keys of the `[parser]` table mdprose does not know.
  #[serde(flatten, skip_serializing)]
  pub unknown: BTreeMap<String, serde_json::Value>,
}

impl ParserConfig {
  /// Build classifier options, using defaults for unset fields.
  #[must_use]
  pub fn to_options(&self) -> ClassifierOptions {
    let defaults = ClassifierOptions::default();
    ClassifierOptions {
      gfm:               self.gfm.unwrap_or(defaults.gfm),
      strip_frontmatter: self
        .strip_frontmatter
        .unwrap_or(defaults.strip_frontmatter),
      strip_admonitions: self
        .strip_admonitions
        .unwrap_or(defaults.strip_admonitions),
      heading_lines:     self.heading_lines.unwrap_or(defaults.heading_lines),
    }
  }

  fn merge(&mut self, other: Self) {
    if other.gfm.is_some() {
      self.gfm = other.gfm;
    }
    if other.strip_frontmatter.is_some() {
      self.strip_frontmatter = other.strip_frontmatter;
    }
    if other.strip_admonitions.is_some() {
      self.strip_admonitions = other.strip_admonitions;
    }
    if other.heading_lines.is_some() {
      self.heading_lines = other.heading_lines;
    }
    self.unknown.extend(other.unknown);
  }
}

impl Config {
  /// Load configuration from a file.
  ///
  /// The format is picked from the file extension: `.toml` or `.json`.
  ///
  /// # Arguments
  ///
  /// * `path` - Path to the configuration file.
  ///
  /// # Errors
  ///
  /// Returns an error if the file cannot be read or parsed, or if the format is
  /// unsupported.
  pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let extension = path
      .extension()
      .and_then(|ext| ext.to_str())
      .map(str::to_lowercase)
      .ok_or_else(|| {
        ConfigError::Config(format!(
          "Config file has no extension: {}",
          path.display()
        ))
      })?;

    let config: Self = match extension.as_str() {
      "toml" => toml::from_str(&fs::read_to_string(path)?)?,
      "json" => serde_json::from_str(&fs::read_to_string(path)?)?,
      _ => {
        return Err(ConfigError::Config(format!(
          "Unsupported config file format: {}",
          path.display()
        )));
      },
    };

    log::debug!("Loaded config from {}", path.display());
    config.warn_ignored_keys(&path.display().to_string());
    Ok(config)
  }

  /// Parse configuration from a TOML string.
  ///
  /// # Errors
  ///
  /// Returns an error if the string is not valid TOML or does not match the
  /// configuration schema.
  pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
    let config: Self = toml::from_str(content)?;
    config.warn_ignored_keys("TOML input");
    Ok(config)
  }

  /// Dotted paths of every key that was present in the source but is not a
  /// known setting, e.g. `parser.strip_frontmater`.
  #[must_use]
  pub fn ignored_keys(&self) -> Vec<String> {
    self
      .unknown
      .keys()
      .cloned()
      .chain(self.parser.unknown.keys().map(|key| format!("parser.{key}")))
      .collect()
  }

  fn warn_ignored_keys(&self, source: &str) {
    for key in self.ignored_keys() {
      log::warn!("Ignoring unknown configuration key '{key}' in {source}");
    }
  }

  /// Load and merge config files in order, then apply `KEY=VALUE` overrides.
  ///
  /// With no files the defaults are used.
  ///
  /// # Errors
  ///
  /// Returns an error if any file fails to load or any override is invalid.
  pub fn load<P: AsRef<Path>>(
    config_files: &[P],
    config_overrides: &[String],
  ) -> Result<Self, ConfigError> {
    let mut config = Self::default();

    for config_path in config_files {
      let config_path = config_path.as_ref();
      let additional = Self::from_file(config_path).map_err(|e| {
        ConfigError::Config(format!(
          "Failed to load config from {}: {}",
          config_path.display(),
          e
        ))
      })?;
      config.merge(additional);
    }

    if config_files.len() > 1 {
      log::info!("Loaded and merged {} config files", config_files.len());
    }

    if !config_overrides.is_empty() {
      config.apply_overrides(config_overrides)?;
    }

    Ok(config)
  }

  /// Merge another config into this one, with the other config's values taking
  /// precedence.
  ///
  /// Only fields that are set in `other` replace this config's values.
  pub fn merge(&mut self, other: Self) {
    self.parser.merge(other.parser);
    self.unknown.extend(other.unknown);
  }

  /// Apply configuration overrides from KEY=VALUE strings.
  ///
  /// Keys use dotted paths, e.g. `parser.gfm=false`.
  ///
  /// # Errors
  ///
  /// Returns an error if:
  ///
  /// - An override string is not in KEY=VALUE format
  /// - A key is not recognized
  /// - A value cannot be parsed as the expected type
  ///
  /// # Example
  ///
  /// ```
  /// use mdprose_config::Config;
  ///
  /// let mut config = Config::default();
  /// config
  ///   .apply_overrides(&["parser.gfm=no".to_string()])
  ///   .expect("valid override");
  /// assert_eq!(config.parser.gfm, Some(false));
  /// ```
  pub fn apply_overrides(
    &mut self,
    overrides: &[String],
  ) -> Result<(), ConfigError> {
    for override_str in overrides {
      let (key, value) = override_str.split_once('=').ok_or_else(|| {
        ConfigError::Config(format!(
          "Invalid config override format: '{override_str}'. Expected \
           KEY=VALUE"
        ))
      })?;

      self.apply_override(key.trim(), value.trim())?;
    }

    Ok(())
  }

  /// Apply a single override.
  ///
  /// # Errors
  ///
  /// Returns an error if the key is unknown or the value does not parse.
  pub fn apply_override(
    &mut self,
    key: &str,
    value: &str,
  ) -> Result<(), ConfigError> {
    log::debug!("Applying config override {key}={value}");
    match key {
      "parser.gfm" => self.parser.gfm = Some(parse_bool(key, value)?),
      "parser.strip_frontmatter" => {
        self.parser.strip_frontmatter = Some(parse_bool(key, value)?);
      },
      "parser.strip_admonitions" => {
        self.parser.strip_admonitions = Some(parse_bool(key, value)?);
      },
      "parser.heading_lines" => {
        self.parser.heading_lines = Some(parse_heading_lines(key, value)?);
      },
      _ => {
        return Err(ConfigError::Config(format!(
          "Unknown configuration key: '{key}'. See documentation for \
           supported keys."
        )));
      },
    }
    Ok(())
  }

  /// Classifier options for this configuration.
  #[must_use]
  pub fn classifier_options(&self) -> ClassifierOptions {
    self.parser.to_options()
  }
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
  match value.to_lowercase().as_str() {
    "true" | "yes" | "1" | "on" => Ok(true),
    "false" | "no" | "0" | "off" => Ok(false),
    _ => {
      Err(ConfigError::Config(format!(
        "Invalid boolean value for '{key}': '{value}'. Expected true/false, \
         yes/no, on/off, or 1/0"
      )))
    },
  }
}

fn parse_heading_lines(
  key: &str,
  value: &str,
) -> Result<HeadingLines, ConfigError> {
  match value.to_lowercase().as_str() {
    "original" => Ok(HeadingLines::Original),
    "cleaned" => Ok(HeadingLines::Cleaned),
    _ => {
      Err(ConfigError::Config(format!(
        "Invalid value for '{key}': '{value}'. Expected original or cleaned"
      )))
    },
  }
}
