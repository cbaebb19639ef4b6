//! Removal of frontmatter and admonition blocks ahead of tree parsing.
//!
//! Both passes work on raw bytes and split on `\n` only. Alongside the
//! cleaned buffer they keep a line map from each surviving line back to its
//! 1-based line number in the original document, so positions reported by
//! the syntax tree can be translated back.
use std::borrow::Cow;

use log::{debug, trace};

use crate::admonition::ADMONITION_PREFIX;

const YAML_DELIMITER: &[u8] = b"---";
const TOML_DELIMITER: &[u8] = b"+++";

/// Split on `\n`. Empty input yields a single empty line.
pub(crate) fn split_lines(
  content: &[u8],
) -> std::slice::Split<'_, u8, impl FnMut(&u8) -> bool> {
  content.split(|byte| *byte == b'\n')
}

const fn is_space(byte: u8) -> bool {
  matches!(byte, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
}

/// Trim ASCII whitespace, vertical tab included, from both ends of a line.
pub(crate) fn trim_line(line: &[u8]) -> &[u8] {
  let start = line
    .iter()
    .position(|byte| !is_space(*byte))
    .unwrap_or(line.len());
  let end = line
    .iter()
    .rposition(|byte| !is_space(*byte))
    .map_or(start, |last| last + 1);
  &line[start..end]
}

fn blank_lone_carriage_returns(bytes: &[u8]) -> Cow<'_, [u8]> {
  let is_lone = |index: usize| {
    bytes.get(index) == Some(&b'\r') && bytes.get(index + 1) != Some(&b'\n')
  };

  if !(0..bytes.len()).any(is_lone) {
    return Cow::Borrowed(bytes);
  }

  Cow::Owned(
    bytes
      .iter()
      .enumerate()
      .map(|(index, byte)| if is_lone(index) { b' ' } else { *byte })
      .collect(),
  )
}

/// A document with frontmatter and/or admonition blocks removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedDocument<'a> {
  text:     Cow<'a, [u8]>,
  line_map: Vec<usize>,
}

impl<'a> CleanedDocument<'a> {
  /// Build a cleaned view of `content`, applying the requested passes.
  #[must_use]
  pub fn new(
    content: &'a [u8],
    strip_frontmatter: bool,
    strip_admonitions: bool,
  ) -> Self {
    let (body, first_line) = if strip_frontmatter {
      split_frontmatter(content)
    } else {
      (content, 1)
    };

    if strip_admonitions {
      strip_admonition_blocks(body, first_line)
    } else {
      let line_map = (first_line..).take(split_lines(body).count()).collect();
      Self {
        text: Cow::Borrowed(body),
        line_map,
      }
    }
  }

  /// The cleaned bytes.
  #[must_use]
  pub fn as_bytes(&self) -> &[u8] {
    &self.text
  }

  /// The cleaned text, decoded lossily for the Markdown parser.
  ///
  /// A `\r` not followed by `\n` becomes a space, so the parser sees the
  /// same line breaks as the line map and the line pass.
  #[must_use]
  pub fn to_text(&self) -> Cow<'_, str> {
    match blank_lone_carriage_returns(&self.text) {
      Cow::Borrowed(bytes) => String::from_utf8_lossy(bytes),
      Cow::Owned(bytes) => {
        Cow::Owned(String::from_utf8_lossy(&bytes).into_owned())
      },
    }
  }

  /// Translate a 1-based line in the cleaned buffer to the original document.
  ///
  /// Lines past the end of the map are returned unchanged.
  #[must_use]
  pub fn original_line(&self, cleaned_line: usize) -> usize {
    cleaned_line
      .checked_sub(1)
      .and_then(|index| self.line_map.get(index).copied())
      .unwrap_or(cleaned_line)
      .max(1)
  }
}

/// Remove a leading YAML (`---`) or TOML (`+++`) frontmatter block.
///
/// Returns everything after the closing delimiter line. Content without an
/// opening delimiter, or with an unterminated block, is returned unchanged.
/// The result is always a suffix of `content`.
///
/// # Examples
///
/// ```
/// use mdprose_commonmark::preprocess::strip_frontmatter;
///
/// let doc = b"---\ntitle: Test\n---\n# Heading";
/// assert_eq!(strip_frontmatter(doc), b"# Heading");
///
/// let unterminated = b"---\ntitle: Test\n# Heading";
/// assert_eq!(strip_frontmatter(unterminated), unterminated);
/// ```
#[must_use]
pub fn strip_frontmatter(content: &[u8]) -> &[u8] {
  split_frontmatter(content).0
}

/// Remove MkDocs-style admonition blocks.
///
/// A block starts at a line whose trimmed content begins with `!!!` and
/// extends over every following blank or indented line. The first line that
/// is neither ends the block and is kept.
#[must_use]
pub fn strip_admonitions(content: &[u8]) -> Vec<u8> {
  strip_admonition_blocks(content, 1).text.into_owned()
}

/// Split off frontmatter, returning the body and the original line number of
/// its first line.
fn split_frontmatter(content: &[u8]) -> (&[u8], usize) {
  let mut lines = split_lines(content);
  let delimiter = match lines.next().map(trim_line) {
    Some(first) if first == YAML_DELIMITER || first == TOML_DELIMITER => first,
    _ => return (content, 1),
  };

  trace!(
    "Frontmatter delimiter {:?} found",
    String::from_utf8_lossy(delimiter)
  );

  // Byte offset just past the line currently being inspected.
  let mut offset = content
    .iter()
    .position(|byte| *byte == b'\n')
    .map_or(content.len(), |newline| newline + 1);

  for (index, line) in lines.enumerate() {
    let line_end = offset + line.len();
    if trim_line(line) == delimiter {
      let body_start = (line_end + 1).min(content.len());
      // Opening delimiter is line 1, this one is line index + 2.
      return (&content[body_start..], index + 3);
    }
    offset = line_end + 1;
  }

  debug!("Unterminated frontmatter, keeping the document as is");
  (content, 1)
}

fn is_admonition_start(line: &[u8]) -> bool {
  trim_line(line).starts_with(ADMONITION_PREFIX.as_bytes())
}

fn is_block_continuation(line: &[u8]) -> bool {
  matches!(line.first(), Some(b' ' | b'\t')) || trim_line(line).is_empty()
}

fn strip_admonition_blocks(
  content: &[u8],
  first_line: usize,
) -> CleanedDocument<'_> {
  let lines: Vec<&[u8]> = split_lines(content).collect();
  let mut text = Vec::with_capacity(content.len());
  let mut line_map = Vec::with_capacity(lines.len());

  let mut index = 0;
  while index < lines.len() {
    if is_admonition_start(lines[index]) {
      let start = index;
      index += 1;
      while index < lines.len() && is_block_continuation(lines[index]) {
        index += 1;
      }
      trace!(
        "Removed admonition block at line {} ({} lines)",
        first_line + start,
        index - start
      );
      continue;
    }

    if !line_map.is_empty() {
      text.push(b'\n');
    }
    text.extend_from_slice(lines[index]);
    line_map.push(first_line + index);
    index += 1;
  }

  CleanedDocument {
    text: Cow::Owned(text),
    line_map,
  }
}
