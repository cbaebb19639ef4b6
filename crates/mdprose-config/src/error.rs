use std::io;

use thiserror::Error;

/// Failure to load or adjust an mdprose configuration.
///
/// File and format problems keep their underlying error as the source.
/// Override and validation problems carry a message naming the offending
/// key or file.
#[derive(Debug, Error)]
pub enum ConfigError {
  /// Bad override, unknown key, or unsupported file extension.
  #[error("Configuration error: {0}")]
  Config(String),

  /// The config file could not be read.
  #[error("Cannot read config file: {0}")]
  Io(#[from] io::Error),

  /// A `.json` config file is malformed or has values of the wrong type.
  #[error("Invalid JSON config: {0}")]
  Serde(#[from] serde_json::Error),

  /// A `.toml` config file or string is malformed or has values of the wrong
  /// type.
  #[error("Invalid TOML config: {0}")]
  Toml(#[from] toml::de::Error),
}

#[cfg(test)]
mod tests {
  #![allow(clippy::unwrap_used, reason = "Fine in tests")]

  use super::*;

  #[test]
  fn test_messages_name_the_format() {
    let json = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
    assert!(
      ConfigError::from(json)
        .to_string()
        .starts_with("Invalid JSON config")
    );

    let toml = toml::from_str::<crate::Config>("[parser").unwrap_err();
    assert!(
      ConfigError::from(toml)
        .to_string()
        .starts_with("Invalid TOML config")
    );
  }
}
