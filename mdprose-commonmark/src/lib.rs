//! # mdprose-commonmark - content classification for Markdown documents
//!
//! Splits a CommonMark/GFM document into the parts readability tooling cares
//! about: the prose to be scored, code blocks, headings, blank lines, and
//! MkDocs-style admonitions. Tables, lists, code and frontmatter are kept out
//! of the prose stream.
//!
//! ## Quick Start
//!
//! ```rust
//! use mdprose_commonmark::{Classifier, ClassifierOptions};
//!
//! let classifier = Classifier::new(ClassifierOptions::default());
//! let result = classifier.parse(b"# Guide\n\nRead this first.\n\n- not prose");
//!
//! assert_eq!(result.prose, "Guide Read this first.");
//! assert_eq!(result.headings[0].level, 1);
//! assert_eq!(result.total_lines, 5);
//! ```
//!
//! ## How it works
//!
//! Two passes run over every document:
//!
//! - a **tree pass**: frontmatter and admonition blocks are removed, the rest
//!   is parsed with `comrak`, and one walk over the tree collects headings,
//!   code blocks and prose;
//! - a **line pass** over the untouched input counts total, code and empty
//!   lines and picks up `!!!` admonition markers.
//!
//! Heading lines are translated back to the original document by default;
//! see [`HeadingLines`].
//!
//! ## Configuration
//!
//! ```rust
//! use mdprose_commonmark::{Classifier, ClassifierOptionsBuilder};
//!
//! let options = ClassifierOptionsBuilder::new()
//!   .gfm(false) // pipe tables become ordinary paragraphs
//!   .strip_admonitions(true)
//!   .build();
//!
//! let classifier = Classifier::new(options);
//! ```

pub mod admonition;
pub mod lines;
pub mod preprocess;
pub mod processor;
pub mod summary;
mod types;

pub use crate::{
  processor::{
    Classifier,
    ClassifierOptions,
    ClassifierOptionsBuilder,
    HeadingLines,
    classify_batch,
    parse,
    parse_with_recovery,
  },
  summary::{AdmonitionSummary, Composition, HeadingCounts, Structure},
  types::{Admonition, Heading, ParseResult},
};
