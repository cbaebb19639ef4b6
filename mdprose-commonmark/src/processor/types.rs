//! Type definitions for the classifier.
//!
//! Contains the configuration options (`ClassifierOptions`), their builder,
//! and the `Classifier` itself.
//!
//! # Examples
//!
//! ```
//! use mdprose_commonmark::{Classifier, ClassifierOptions, HeadingLines};
//!
//! let options = ClassifierOptions {
//!   gfm: true,
//!   heading_lines: HeadingLines::Cleaned,
//!   ..Default::default()
//! };
//!
//! let classifier = Classifier::new(options);
//! ```

use serde::{Deserialize, Serialize};

/// Which line numbering headings are reported in.
///
/// Headings are located in the syntax tree of the cleaned document, after
/// frontmatter and admonition blocks have been removed. Every other line
/// number refers to the original document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingLines {
  /// Translate heading lines back to the original document.
  #[default]
  Original,
  /// Report lines within the cleaned document, as the tree sees them.
  Cleaned,
}

/// Options for configuring the classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifierOptions {
  /// Enable GitHub Flavored Markdown extensions (tables, strikethrough,
  /// autolinks, task lists).
  pub gfm: bool,

  /// Remove a leading `---`/`+++` frontmatter block before tree parsing.
  pub strip_frontmatter: bool,

  /// Remove `!!!` admonition blocks before tree parsing so their bodies stay
  /// out of the prose.
  pub strip_admonitions: bool,

  /// Line numbering used for headings.
  pub heading_lines: HeadingLines,
}

impl Default for ClassifierOptions {
  fn default() -> Self {
    Self {
      gfm:               true,
      strip_frontmatter: true,
      strip_admonitions: true,
      heading_lines:     HeadingLines::Original,
    }
  }
}

/// Builder for constructing `ClassifierOptions` with method chaining.
#[derive(Debug, Clone, Default)]
pub struct ClassifierOptionsBuilder {
  options: ClassifierOptions,
}

impl ClassifierOptionsBuilder {
  /// Create a new builder with default options.
  #[must_use]
  pub fn new() -> Self {
    Self::default()
  }

  /// Enable or disable GitHub Flavored Markdown.
  #[must_use]
  pub const fn gfm(mut self, enabled: bool) -> Self {
    self.options.gfm = enabled;
    self
  }

  /// Enable or disable frontmatter removal.
  #[must_use]
  pub const fn strip_frontmatter(mut self, enabled: bool) -> Self {
    self.options.strip_frontmatter = enabled;
    self
  }

  /// Enable or disable admonition block removal.
  #[must_use]
  pub const fn strip_admonitions(mut self, enabled: bool) -> Self {
    self.options.strip_admonitions = enabled;
    self
  }

  /// Set the line numbering used for headings.
  #[must_use]
  pub const fn heading_lines(mut self, mode: HeadingLines) -> Self {
    self.options.heading_lines = mode;
    self
  }

  /// Build the final `ClassifierOptions`.
  #[must_use]
  pub fn build(self) -> ClassifierOptions {
    self.options
  }
}

/// Markdown content classifier.
///
/// Holds no state besides its options, so it is cheap to clone and can be
/// shared between threads.
#[derive(Debug, Clone, Default)]
pub struct Classifier {
  pub(crate) options: ClassifierOptions,
}
