//! Core implementation of the classifier.
//!
//! This module contains the main implementation of `Classifier`: the
//! pipeline that merges the syntax-tree pass over the cleaned document with
//! the line pass over the original one.
use comrak::{
  Arena,
  nodes::{AstNode, NodeValue},
  options::Options,
  parse_document,
};
use log::trace;

use super::types::{Classifier, ClassifierOptions, HeadingLines};
use crate::{
  lines::classify_lines,
  preprocess::CleanedDocument,
  types::{Heading, ParseResult},
};

/// Output of a single walk over the syntax tree.
#[derive(Debug, Default)]
struct TreeContent {
  prose:       String,
  code_blocks: Vec<String>,
  headings:    Vec<Heading>,
}

impl Classifier {
  /// Create a new `Classifier` with the given options.
  #[must_use]
  pub const fn new(options: ClassifierOptions) -> Self {
    Self { options }
  }

  /// Access classifier options.
  #[must_use]
  pub const fn options(&self) -> &ClassifierOptions {
    &self.options
  }

  /// Classify a document into prose, code, headings and admonitions.
  ///
  /// Never fails: malformed or non-UTF-8 input degrades to whatever the
  /// passes can still recognize.
  #[must_use]
  pub fn parse(&self, content: &[u8]) -> ParseResult {
    let cleaned = CleanedDocument::new(
      content,
      self.options.strip_frontmatter,
      self.options.strip_admonitions,
    );

    let arena = Arena::new();
    let options = self.comrak_options();
    let text = cleaned.to_text();
    let root = parse_document(&arena, &text, &options);

    let tree = self.extract_tree(root, &cleaned);
    let lines = classify_lines(content);

    let result = ParseResult {
      prose:       normalize_whitespace(&tree.prose),
      code_blocks: tree.code_blocks,
      headings:    tree.headings,
      admonitions: lines.admonitions,
      total_lines: lines.total_lines,
      code_lines:  lines.code_lines,
      empty_lines: lines.empty_lines,
    };

    trace!(
      "Classified document: {} lines ({} code, {} empty), {} headings, {} \
       code blocks, {} admonitions",
      result.total_lines,
      result.code_lines,
      result.empty_lines,
      result.headings.len(),
      result.code_blocks.len(),
      result.admonitions.len()
    );

    result
  }

  /// Walk the tree once, collecting headings, code blocks and raw prose.
  fn extract_tree<'a>(
    &self,
    root: &'a AstNode<'a>,
    cleaned: &CleanedDocument<'_>,
  ) -> TreeContent {
    let mut content = TreeContent::default();

    for node in root.descendants() {
      let ast = node.data.borrow();
      match &ast.value {
        NodeValue::Heading(heading) => {
          let line = match self.options.heading_lines {
            HeadingLines::Original => {
              cleaned.original_line(ast.sourcepos.start.line)
            },
            HeadingLines::Cleaned => ast.sourcepos.start.line.max(1),
          };
          content.headings.push(Heading {
            line,
            level: heading.level,
            text: heading_text(node),
          });
        },
        NodeValue::CodeBlock(block) => {
          content.code_blocks.push(code_block_text(&block.literal));
        },
        NodeValue::Text(text) => {
          if !is_inside_non_prose(node) && !is_autolink_text(node, text) {
            content.prose.push_str(text);
            content.prose.push(' ');
          }
        },
        _ => {},
      }
    }

    content
  }

  /// Build comrak options from `ClassifierOptions`.
  fn comrak_options(&self) -> Options<'_> {
    let mut options = Options::default();
    if self.options.gfm {
      options.extension.table = true;
      options.extension.strikethrough = true;
      options.extension.autolink = true;
      options.extension.tasklist = true;
    }
    options
  }
}

/// Concatenate the text leaves directly under a heading node.
///
/// Text nested in emphasis, links or code spans is skipped.
fn heading_text<'a>(node: &'a AstNode<'a>) -> String {
  let mut text = String::new();
  for child in node.children() {
    if let NodeValue::Text(t) = &child.data.borrow().value {
      text.push_str(t);
    }
  }
  text
}

/// Code block literal without its final line terminator.
fn code_block_text(literal: &str) -> String {
  let text = literal.strip_suffix('\n').unwrap_or(literal);
  text.strip_suffix('\r').unwrap_or(text).to_string()
}

/// Whether any ancestor of `node` is code, a table or a list.
fn is_inside_non_prose<'a>(node: &'a AstNode<'a>) -> bool {
  node
    .ancestors()
    .skip(1)
    .any(|ancestor| excludes_prose(&ancestor.data.borrow().value))
}

/// Whether `text` is the visible URL of an autolink.
///
/// Bare URLs (`https://example.com`, `www.example.com`) and angle-bracket
/// autolinks parse as a link whose only text is the URL itself.
fn is_autolink_text<'a>(node: &'a AstNode<'a>, text: &str) -> bool {
  let Some(parent) = node.parent() else {
    return false;
  };
  let ast = parent.data.borrow();
  let NodeValue::Link(link) = &ast.value else {
    return false;
  };

  let url = link.url.as_str();
  url == text
    || ["mailto:", "http://", "https://"]
      .iter()
      .any(|scheme| url.strip_prefix(scheme) == Some(text))
}

fn excludes_prose(value: &NodeValue) -> bool {
  matches!(
    value,
    // code
    NodeValue::CodeBlock(..)
      | NodeValue::Code(..)
      // tables
      | NodeValue::Table(..)
      | NodeValue::TableRow(..)
      | NodeValue::TableCell
      // lists
      | NodeValue::List(..)
      | NodeValue::Item(..)
      | NodeValue::TaskItem(..)
  )
}

/// Collapse whitespace runs to a single space and trim both ends.
fn normalize_whitespace(text: &str) -> String {
  text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
  use super::*;

  fn with_tree<F>(markdown: &str, check: F)
  where
    F: for<'a> FnOnce(&'a AstNode<'a>),
  {
    let arena = Arena::new();
    let classifier = Classifier::default();
    let options = classifier.comrak_options();
    let root = parse_document(&arena, markdown, &options);
    check(root);
  }

  fn text_nodes<'a>(root: &'a AstNode<'a>) -> Vec<(String, bool)> {
    root
      .descendants()
      .filter_map(|node| {
        match &node.data.borrow().value {
          NodeValue::Text(t) => Some((t.to_string(), is_inside_non_prose(node))),
          _ => None,
        }
      })
      .collect()
  }

  #[test]
  fn test_paragraph_text_is_prose() {
    with_tree("Plain paragraph", |root| {
      assert_eq!(text_nodes(root), vec![("Plain paragraph".to_string(), false)]);
    });
  }

  #[test]
  fn test_table_cell_text_is_excluded() {
    with_tree("| A | B |\n|---|---|\n| 1 | 2 |", |root| {
      let nodes = text_nodes(root);
      assert!(!nodes.is_empty());
      assert!(nodes.iter().all(|(_, excluded)| *excluded));
    });
  }

  #[test]
  fn test_list_item_text_is_excluded() {
    with_tree("- one\n- two\n  - nested", |root| {
      let nodes = text_nodes(root);
      assert_eq!(nodes.len(), 3);
      assert!(nodes.iter().all(|(_, excluded)| *excluded));
    });
  }

  #[test]
  fn test_task_list_text_is_excluded() {
    with_tree("- [ ] todo\n- [x] done", |root| {
      assert!(text_nodes(root).iter().all(|(_, excluded)| *excluded));
    });
  }

  #[test]
  fn test_emphasis_text_is_prose() {
    with_tree("Some *emphasis* here", |root| {
      assert!(text_nodes(root).iter().all(|(_, excluded)| !excluded));
    });
  }

  #[test]
  fn test_heading_text_skips_wrappers() {
    with_tree("# **Bold** heading", |root| {
      let heading = root
        .descendants()
        .find(|node| matches!(node.data.borrow().value, NodeValue::Heading(..)));
      assert_eq!(heading.map(heading_text).as_deref(), Some(" heading"));
    });
  }

  #[test]
  fn test_autolink_text_is_detected() {
    with_tree(
      "Visit https://example.com/docs or <https://example.org> or \
       www.example.net or <me@example.com>.",
      |root| {
        let urls: Vec<String> = root
          .descendants()
          .filter_map(|node| {
            match &node.data.borrow().value {
              NodeValue::Text(t) if is_autolink_text(node, t) => {
                Some(t.to_string())
              },
              _ => None,
            }
          })
          .collect();
        assert_eq!(urls, vec![
          "https://example.com/docs".to_string(),
          "https://example.org".to_string(),
          "www.example.net".to_string(),
          "me@example.com".to_string(),
        ]);
      },
    );
  }

  #[test]
  fn test_inline_link_text_is_prose() {
    with_tree("Read [the guide](https://example.com) first.", |root| {
      assert!(text_nodes(root).iter().all(|(_, excluded)| !excluded));
      let link_text = root.descendants().find(|node| {
        matches!(
          &node.data.borrow().value,
          NodeValue::Text(t) if &**t == "the guide"
        )
      });
      assert!(
        link_text.is_some_and(|node| !is_autolink_text(node, "the guide"))
      );
    });
  }

  #[test]
  fn test_code_block_text() {
    assert_eq!(code_block_text("code\n"), "code");
    assert_eq!(code_block_text("a\nb\n"), "a\nb");
    assert_eq!(code_block_text("crlf\r\n"), "crlf");
    assert_eq!(code_block_text(""), "");
    assert_eq!(code_block_text("\n\n"), "\n");
  }

  #[test]
  fn test_normalize_whitespace() {
    assert_eq!(normalize_whitespace("  a \n\t b  c "), "a b c");
    assert_eq!(normalize_whitespace(" \n "), "");
  }

  #[test]
  fn test_gfm_disabled_keeps_pipes_as_text() {
    let classifier = Classifier::new(ClassifierOptions {
      gfm: false,
      ..Default::default()
    });
    let result = classifier.parse(b"| A | B |\n|---|---|\n| 1 | 2 |");
    assert!(result.prose.contains("| A | B |"));
  }
}
