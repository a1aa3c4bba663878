//! Store abstractions for Cursus data.
//!
//! Two read-side collaborators feed the engine: the [`ContentCatalog`]
//! (module/lesson/quiz/assignment definitions) and the [`ProgressStore`]
//! (per-learner completion records). Backends plug in behind the traits; a
//! JSON-file store and an in-memory store ship here.

#![warn(missing_docs)]

mod trait_;
mod json_store;
mod memory;

pub use trait_::{ContentCatalog, ProgressStore, QuizFilter, Result, StoreError};
pub use json_store::JsonStore;
pub use memory::MemoryStore;
