//! Browser DOM layer for commentfold.
//!
//! Implements the core [`Page`] trait over `web-sys`, so the same fold
//! state machine that runs against the in-memory test page drives a live
//! code listing. It assumes a `wasm32-unknown-unknown` target environment.
//!
//! # Architecture
//!
//! - `page`: `BrowserPage`, element lookup and placeholder construction
//! - `observer`: `ContentObserver`, the MutationObserver guard
//!
//! # Re-exports
//!
//! This crate re-exports `commentfold-core` for convenience, so consumers
//! only need to depend on `commentfold-browser`.

// Re-export core crate
pub use commentfold_core;
pub use commentfold_core::*;

pub mod observer;
pub mod page;

pub use observer::ContentObserver;
pub use page::BrowserPage;
