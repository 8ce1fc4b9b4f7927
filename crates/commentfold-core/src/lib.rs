//! commentfold-core: block comment folding for rendered source listings,
//! without any browser dependency.
//!
//! This crate provides:
//! - `patterns` / `segment`: the line-oriented comment recognizer
//! - `LineModel`, `CommentBlock`, `ToggleControl`: per-block fold state
//! - `FileScanner`, `FileToggle`, `Extension`: page-level lifecycle
//! - `Page`: the platform trait every DOM operation goes through

pub mod block;
pub mod config;
pub mod error;
pub mod extension;
pub mod file;
pub mod file_toggle;
pub mod line;
pub mod page;
pub mod patterns;
pub mod segment;
pub mod target;
pub mod toggle;

#[cfg(test)]
pub(crate) mod testing;


pub use block::CommentBlock;
pub use config::{ExtensionConfig, PageSelectors};
pub use error::{ConfigError, PageError};
pub use extension::Extension;
pub use file::FileScanner;
pub use file_toggle::FileToggle;
pub use line::LineModel;
pub use page::{CodeLine, Page};
pub use patterns::{clean_excerpt, closes_on_opening_line, is_block_end, is_block_start};
pub use segment::{ScanState, Segmenter, segment};
pub use smol_str::SmolStr;
pub use target::parse_line_fragment;
pub use toggle::ToggleControl;
