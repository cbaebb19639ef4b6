//! Types for mdprose-commonmark public API and internal use.
use serde::{Deserialize, Serialize};

/// A heading found in a Markdown document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Heading {
  /// 1-based line number of the heading.
  pub line:  usize,
  /// Heading level (1-6).
  pub level: u8,
  /// Literal text directly inside the heading, without inline markup.
  pub text:  String,
}

/// A MkDocs-style admonition (`!!! note "Title"`).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Admonition {
  /// 1-based line number of the `!!!` marker in the original document.
  pub line:  usize,
  /// Admonition type as written (`note`, `warning`, ...), minus any
  /// collapsible `+` marker.
  #[serde(rename = "type")]
  pub kind:  String,
  /// Quoted title, empty when absent.
  pub title: String,
}

/// Classification of a single Markdown document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParseResult {
  /// Whitespace-normalized prose, ready for readability scoring.
  pub prose: String,

  /// Text of every fenced or indented code block, in document order.
  pub code_blocks: Vec<String>,

  /// Headings in document order.
  pub headings: Vec<Heading>,

  /// Admonitions in document order.
  pub admonitions: Vec<Admonition>,

  /// Line count of the original document. Never zero.
  pub total_lines: usize,

  /// Lines inside (or delimiting) fenced code blocks.
  pub code_lines: usize,

  /// Blank lines outside fenced code blocks.
  pub empty_lines: usize,
}

impl Default for ParseResult {
  /// A one-line document with nothing classified.
  fn default() -> Self {
    Self {
      prose:       String::new(),
      code_blocks: Vec::new(),
      headings:    Vec::new(),
      admonitions: Vec::new(),
      total_lines: 1,
      code_lines:  0,
      empty_lines: 0,
    }
  }
}
