//! Entry points for classifying one or many documents.
use log::error;
use rayon::prelude::*;

use super::types::Classifier;
use crate::{preprocess::split_lines, types::ParseResult};

/// Classify a document with the default options.
///
/// # Examples
///
/// ```
/// let result = mdprose_commonmark::parse(b"# Title\n\nSome prose.");
/// assert_eq!(result.headings[0].text, "Title");
/// assert_eq!(result.prose, "Title Some prose.");
/// ```
#[must_use]
pub fn parse(content: &[u8]) -> ParseResult {
  Classifier::default().parse(content)
}

/// Classify a document, recovering from a panic inside the classifier.
///
/// A panic is logged and replaced by a conservative result: correct line
/// total, everything else empty.
#[must_use]
pub fn parse_with_recovery(
  classifier: &Classifier,
  content: &[u8],
) -> ParseResult {
  parse_safe(content, |bytes| classifier.parse(bytes))
}

/// Run `parse_fn` over `content`, falling back to a minimal result if it
/// panics.
pub fn parse_safe<F>(content: &[u8], parse_fn: F) -> ParseResult
where
  F: FnOnce(&[u8]) -> ParseResult,
{
  let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
    parse_fn(content)
  }));

  match result {
    Ok(parsed) => parsed,
    Err(e) => {
      if let Some(error_msg) = e.downcast_ref::<String>() {
        error!("Panic while classifying document: {error_msg}");
      } else if let Some(error_msg) = e.downcast_ref::<&str>() {
        error!("Panic while classifying document: {error_msg}");
      } else {
        error!("Unknown panic while classifying document");
      }

      ParseResult {
        total_lines: split_lines(content).count(),
        ..ParseResult::default()
      }
    },
  }
}

/// Classify many documents in parallel.
///
/// Results are returned in input order. Each document goes through
/// [`parse_with_recovery`], so one bad document cannot take down the batch.
pub fn classify_batch<D>(
  classifier: &Classifier,
  documents: &[D],
) -> Vec<ParseResult>
where
  D: AsRef<[u8]> + Sync,
{
  documents
    .par_iter()
    .map(|document| parse_with_recovery(classifier, document.as_ref()))
    .collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::processor::types::ClassifierOptions;

  #[test]
  fn test_parse_safe_success() {
    let result = parse_safe(b"# Title", |bytes| {
      Classifier::new(ClassifierOptions::default()).parse(bytes)
    });
    assert_eq!(result.headings.len(), 1);
  }

  #[test]
  #[allow(clippy::panic, reason = "Exercises the recovery path")]
  fn test_parse_safe_fallback() {
    let result = parse_safe(b"one\ntwo\n\nthree", |_| panic!("test panic"));
    assert_eq!(result.total_lines, 4);
    assert_eq!(result.code_lines, 0);
    assert_eq!(result.empty_lines, 0);
    assert!(result.prose.is_empty());
    assert!(result.headings.is_empty());
  }

  #[test]
  #[allow(clippy::panic, reason = "Exercises the recovery path")]
  fn test_parse_safe_fallback_on_empty_input() {
    let result = parse_safe(b"", |_| panic!("test panic"));
    assert_eq!(result.total_lines, 1);
  }

  #[test]
  fn test_classify_batch_preserves_order() {
    let classifier = Classifier::default();
    let documents = vec![
      "# First".to_string(),
      String::new(),
      "## Second\n\n```\ncode\n```".to_string(),
    ];

    let results = classify_batch(&classifier, &documents);

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].headings[0].text, "First");
    assert_eq!(results[1].total_lines, 1);
    assert_eq!(results[2].headings[0].level, 2);
    assert_eq!(results[2].code_blocks, vec!["code".to_string()]);
  }

  #[test]
  fn test_classify_batch_matches_sequential() {
    let classifier = Classifier::default();
    let documents: [&[u8]; 3] =
      [b"Text.", b"!!! note\n    Body", b"| a |\n|---|\n| b |"];

    let parallel = classify_batch(&classifier, &documents);
    let sequential: Vec<_> =
      documents.iter().map(|doc| classifier.parse(doc)).collect();

    assert_eq!(parallel, sequential);
  }
}
