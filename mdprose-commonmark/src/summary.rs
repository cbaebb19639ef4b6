//! Aggregate views over a [`ParseResult`].
//!
//! These are the structural figures threshold checks and reports work from:
//! heading counts per level, the line composition of the document, the
//! admonitions it uses, and word/sentence counts of its prose.
use serde::Serialize;

use crate::types::ParseResult;

/// Assumed reading speed for technical prose.
pub const WORDS_PER_MINUTE: usize = 200;

/// Number of headings at each level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct HeadingCounts {
  pub h1: usize,
  pub h2: usize,
  pub h3: usize,
  pub h4: usize,
  pub h5: usize,
  pub h6: usize,
}

impl HeadingCounts {
  /// Total number of headings.
  #[must_use]
  pub const fn total(&self) -> usize {
    self.h1 + self.h2 + self.h3 + self.h4 + self.h5 + self.h6
  }
}

/// How the lines of a document split between prose, code and blank lines.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Composition {
  pub total_lines:      usize,
  pub prose_lines:      usize,
  pub code_lines:       usize,
  pub empty_lines:      usize,
  /// Share of code lines in the document, `0.0` to `1.0`.
  pub code_block_ratio: f64,
}

/// Admonition usage in a document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AdmonitionSummary {
  pub count: usize,
  /// Distinct non-empty types, in order of first appearance.
  pub types: Vec<String>,
}

/// Word-level figures for the prose of a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Structure {
  pub words:                usize,
  /// Count of sentence terminators (`.`, `!`, `?`). Non-empty prose without
  /// any counts as one sentence.
  pub sentences:            usize,
  /// Length of the prose in bytes.
  pub characters:           usize,
  pub reading_time_minutes: usize,
}

impl ParseResult {
  /// Count headings by level.
  #[must_use]
  pub fn heading_counts(&self) -> HeadingCounts {
    let mut counts = HeadingCounts::default();
    for heading in &self.headings {
      match heading.level {
        1 => counts.h1 += 1,
        2 => counts.h2 += 1,
        3 => counts.h3 += 1,
        4 => counts.h4 += 1,
        5 => counts.h5 += 1,
        6 => counts.h6 += 1,
        _ => {},
      }
    }
    counts
  }

  /// Break the document's lines down by kind.
  ///
  /// Prose lines are whatever is neither code nor blank, so they include
  /// headings, tables, lists and admonitions.
  #[must_use]
  pub fn composition(&self) -> Composition {
    Composition {
      total_lines:      self.total_lines,
      prose_lines:      self
        .total_lines
        .saturating_sub(self.code_lines)
        .saturating_sub(self.empty_lines),
      code_lines:       self.code_lines,
      empty_lines:      self.empty_lines,
      code_block_ratio: ratio(self.code_lines, self.total_lines),
    }
  }

  /// Count admonitions and list the types in use.
  #[must_use]
  pub fn admonition_summary(&self) -> AdmonitionSummary {
    let mut types: Vec<String> = Vec::new();
    for admonition in &self.admonitions {
      if !admonition.kind.is_empty() && !types.contains(&admonition.kind) {
        types.push(admonition.kind.clone());
      }
    }
    AdmonitionSummary {
      count: self.admonitions.len(),
      types,
    }
  }

  /// Word, sentence and reading-time figures for the prose.
  #[must_use]
  pub fn structure(&self) -> Structure {
    let words = self.prose.split_whitespace().count();
    Structure {
      words,
      sentences: count_sentences(&self.prose),
      characters: self.prose.len(),
      reading_time_minutes: words.div_ceil(WORDS_PER_MINUTE),
    }
  }
}

fn count_sentences(text: &str) -> usize {
  let terminators = text.chars().filter(|c| matches!(c, '.' | '!' | '?')).count();
  if terminators == 0 && !text.is_empty() {
    1
  } else {
    terminators
  }
}

#[allow(
  clippy::cast_precision_loss,
  reason = "Line counts are far below 2^52"
)]
fn ratio(part: usize, total: usize) -> f64 {
  if total == 0 {
    0.0
  } else {
    part as f64 / total as f64
  }
}
