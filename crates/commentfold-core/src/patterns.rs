//! Comment delimiter recognition for single lines of rendered text.
//!
//! Two delimiter styles are recognized: C-style `/* ... */` blocks and
//! `###` lines. A `###` line matches both patterns, so it always folds as
//! a block of its own. Matching is purely textual
//! and knows nothing about string literals; a `/*` inside a string on a
//! line of its own still opens a block.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex_lite::Regex;

/// Line opens a block: optional indentation, then `/*` or `###`.
static BLOCK_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[ \t]*(?:/\*|###)").expect("valid block start pattern"));

/// Line closes a block: `*/` anywhere, or an indented `###` fence.
static BLOCK_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*/|^[ \t]*###").expect("valid block end pattern"));

/// Closers, with at most one space in front.
static CLOSER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" ?\*+/").expect("valid closer pattern"));

/// Leading opener or continuation marker.
static OPENER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[ \t]*(?:/\*+|\*+|#{1,3})?[ \t]*").expect("valid opener pattern")
});

/// Whether `text` begins a block comment.
pub fn is_block_start(text: &str) -> bool {
    BLOCK_START.is_match(text)
}

/// Whether `text` ends a block comment.
pub fn is_block_end(text: &str) -> bool {
    BLOCK_END.is_match(text)
}

/// Whether an opening line also closes its own block, as in
/// `/* single line */`.
///
/// Any line matching both patterns counts. Every `###` line does, so a
/// `### Heading` banner folds alone and never swallows the code below it.
pub fn closes_on_opening_line(text: &str) -> bool {
    is_block_start(text) && is_block_end(text)
}

/// Strip comment syntax and surrounding whitespace from a line, for use as
/// a preview excerpt.
pub fn clean_excerpt(text: &str) -> String {
    let without_closers = CLOSER.replace_all(text, "");
    let without_opener: Cow<'_, str> = OPENER.replace(&without_closers, "");
    without_opener.trim_matches([' ', '\t']).to_string()
}
