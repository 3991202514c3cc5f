//! Watch mode: continuous single-file redeploys
//!
//! After a batch deploy, armed sites keep their mapping sources under
//! filesystem observation. Content changes are debounced, traced back to the
//! owning mapping and pushed one file at a time without checkout.

mod engine;
mod event;

pub use engine::WatchEngine;
pub use event::{DebounceLatch, WatchEvent, DEBOUNCE_WINDOW};
