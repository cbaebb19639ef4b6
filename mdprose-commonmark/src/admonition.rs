//! Parsing of MkDocs-style admonition marker lines.
//!
//! Recognized forms:
//!
//! - `!!! note`
//! - `!!! warning "Custom Title"`
//! - `!!! tip inline` (modifiers after the type are dropped)
//! - `!!! note+` (collapsible marker, normalized to `note`)
use crate::types::Admonition;

/// Prefix that opens an admonition block.
pub const ADMONITION_PREFIX: &str = "!!!";

/// Type and title parsed from an admonition marker line, before it has been
/// placed at a line in a document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AdmonitionMarker {
  pub kind:  String,
  pub title: String,
}

impl AdmonitionMarker {
  /// Attach the 1-based line the marker was found on.
  #[must_use]
  pub fn at_line(self, line: usize) -> Admonition {
    Admonition {
      line,
      kind: self.kind,
      title: self.title,
    }
  }
}

/// Parse a single admonition marker line.
///
/// The line is expected to start with `!!!` once trimmed. Returns `None` when
/// nothing follows the prefix. Unterminated title quotes are tolerated and
/// yield an empty title.
///
/// # Examples
///
/// ```
/// use mdprose_commonmark::admonition::parse_admonition_line;
///
/// let marker = parse_admonition_line("!!! warning \"Watch Out\"").unwrap();
/// assert_eq!(marker.kind, "warning");
/// assert_eq!(marker.title, "Watch Out");
///
/// assert!(parse_admonition_line("!!!").is_none());
/// ```
#[must_use]
pub fn parse_admonition_line(line: &str) -> Option<AdmonitionMarker> {
  let trimmed = line.trim();
  let rest = trimmed
    .strip_prefix(ADMONITION_PREFIX)
    .unwrap_or(trimmed)
    .trim();

  if rest.is_empty() {
    return None;
  }

  let mut marker = AdmonitionMarker::default();

  if let Some((kind, after_quote)) = rest.split_once('"') {
    marker.kind = kind.trim().to_string();
    if let Some((title, _)) = after_quote.split_once('"') {
      marker.title = title.to_string();
    }
  } else if let Some(kind) = rest.split_whitespace().next() {
    marker.kind = kind.to_string();
  }

  if let Some(kind) = marker.kind.strip_suffix('+') {
    marker.kind = kind.to_string();
  }

  Some(marker)
}
