#![allow(clippy::unwrap_used, clippy::panic, reason = "Fine in tests")]
use std::{fs, path::PathBuf};

use mdprose_commonmark::{Classifier, HeadingLines};
use mdprose_config::{Config, ConfigError};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
  let path = dir.path().join(name);
  fs::write(&path, content).unwrap();
  path
}

#[test]
fn test_load_toml_file() {
  let dir = TempDir::new().unwrap();
  let path = write(
    &dir,
    "mdprose.toml",
    "[parser]\nstrip_admonitions = false\nheading_lines = \"cleaned\"\n",
  );

  let config = Config::from_file(&path).unwrap();

  assert_eq!(config.parser.strip_admonitions, Some(false));
  assert_eq!(config.parser.heading_lines, Some(HeadingLines::Cleaned));
  assert_eq!(config.parser.gfm, None);
}

#[test]
fn test_load_json_file() {
  let dir = TempDir::new().unwrap();
  let path = write(
    &dir,
    "mdprose.JSON",
    r#"{ "parser": { "gfm": false, "strip_frontmatter": true } }"#,
  );

  let config = Config::from_file(&path).unwrap();

  assert_eq!(config.parser.gfm, Some(false));
  assert_eq!(config.parser.strip_frontmatter, Some(true));
}

#[test]
fn test_unsupported_extension() {
  let dir = TempDir::new().unwrap();
  let path = write(&dir, "mdprose.yaml", "parser: {}\n");

  let err = Config::from_file(&path).unwrap_err();
  assert!(err.to_string().contains("Unsupported config file format"));
}

#[test]
fn test_missing_extension() {
  let dir = TempDir::new().unwrap();
  let path = write(&dir, "mdprose", "");

  let err = Config::from_file(&path).unwrap_err();
  assert!(err.to_string().contains("has no extension"));
}

#[test]
fn test_missing_file_is_io_error() {
  let dir = TempDir::new().unwrap();
  let result = Config::from_file(dir.path().join("absent.toml"));
  assert!(matches!(result, Err(ConfigError::Io(_))));
}

#[test]
fn test_malformed_files() {
  let dir = TempDir::new().unwrap();

  let toml_path = write(&dir, "bad.toml", "[parser\ngfm = ");
  assert!(matches!(
    Config::from_file(&toml_path),
    Err(ConfigError::Toml(_))
  ));

  let json_path = write(&dir, "bad.json", "{ \"parser\": ");
  assert!(matches!(
    Config::from_file(&json_path),
    Err(ConfigError::Serde(_))
  ));
}

#[test]
fn test_load_merges_in_order_then_overrides() {
  let dir = TempDir::new().unwrap();
  let base = write(
    &dir,
    "base.toml",
    "[parser]\ngfm = false\nstrip_frontmatter = false\n",
  );
  let local = write(&dir, "local.json", r#"{ "parser": { "gfm": true } }"#);

  let config = Config::load(&[base, local], &[
    "parser.heading_lines=cleaned".to_string(),
  ])
  .unwrap();

  assert_eq!(config.parser.gfm, Some(true));
  assert_eq!(config.parser.strip_frontmatter, Some(false));
  assert_eq!(config.parser.heading_lines, Some(HeadingLines::Cleaned));
}

#[test]
fn test_load_without_files_uses_defaults() {
  let config = Config::load::<PathBuf>(&[], &[]).unwrap();
  assert_eq!(config, Config::default());
}

#[test]
fn test_load_reports_failing_file() {
  let dir = TempDir::new().unwrap();
  let bad = write(&dir, "bad.toml", "parser = 3");

  let err = Config::load(&[bad], &[]).unwrap_err();
  assert!(err.to_string().contains("Failed to load config from"));
}

#[test]
fn test_loaded_options_drive_classifier() {
  let dir = TempDir::new().unwrap();
  let path = write(
    &dir,
    "mdprose.toml",
    "[parser]\nstrip_admonitions = false\n",
  );

  let config = Config::from_file(&path).unwrap();
  let classifier = Classifier::new(config.classifier_options());
  let result = classifier.parse(b"!!! note\n\nVisible body.");

  assert!(result.prose.contains("Visible body"));
  assert_eq!(result.admonitions.len(), 1);
}

#[test]
fn test_unknown_keys_in_json_file_are_ignored() {
  let dir = TempDir::new().unwrap();
  let path = write(
    &dir,
    "mdprose.json",
    r#"{ "parser": { "strip_frontmater": false, "gfm": true }, "colour": "red" }"#,
  );

  let config = Config::from_file(&path).unwrap();

  assert_eq!(config.parser.gfm, Some(true));
  assert_eq!(config.parser.strip_frontmatter, None);
  assert_eq!(config.ignored_keys(), vec![
    "colour".to_string(),
    "parser.strip_frontmater".to_string(),
  ]);
  assert!(config.classifier_options().strip_frontmatter);
}
