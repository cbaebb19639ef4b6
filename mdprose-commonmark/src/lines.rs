//! Line-oriented classification of the original document.
//!
//! Runs over the unmodified input so that every count and admonition line
//! refers to the file as the author sees it.
use log::debug;

use crate::{
  admonition::{ADMONITION_PREFIX, parse_admonition_line},
  preprocess::{split_lines, trim_line},
  types::Admonition,
};

const CODE_FENCE: &[u8] = b"```";

/// Line counts and admonitions for one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineStats {
  pub total_lines: usize,
  pub code_lines:  usize,
  pub empty_lines: usize,
  pub admonitions: Vec<Admonition>,
}

/// Count total, code and empty lines and collect admonition markers.
///
/// A line starting with a triple backtick toggles the in-fence state and
/// counts as code itself. Fences are not balanced: an unclosed fence leaves
/// the rest of the document classified as code.
#[must_use]
pub fn classify_lines(content: &[u8]) -> LineStats {
  let mut stats = LineStats::default();
  let mut in_fence = false;

  for (index, line) in split_lines(content).enumerate() {
    stats.total_lines += 1;
    let trimmed = trim_line(line);

    if trimmed.starts_with(CODE_FENCE) {
      in_fence = !in_fence;
      stats.code_lines += 1;
      continue;
    }

    if in_fence {
      stats.code_lines += 1;
      continue;
    }

    if trimmed.is_empty() {
      stats.empty_lines += 1;
      continue;
    }

    if trimmed.starts_with(ADMONITION_PREFIX.as_bytes()) {
      if let Some(marker) =
        parse_admonition_line(&String::from_utf8_lossy(trimmed))
      {
        stats.admonitions.push(marker.at_line(index + 1));
      }
    }
  }

  if in_fence {
    debug!("Unbalanced code fence, trailing lines counted as code");
  }

  stats
}
