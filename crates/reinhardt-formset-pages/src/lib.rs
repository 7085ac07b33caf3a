//! Browser form replicator for Reinhardt formsets
//!
//! Wires an "add another" control to a Django-style formset rendered in the
//! page. Each activation deep-clones the first form block of the container,
//! rewrites the `<prefix>-<n>-` markers of its indexed attributes to the next
//! index, appends it and updates the `TOTAL_FORMS` input, so the submitted
//! data binds as one more form on the server.
//!
//! ## Usage
//!
//! From Rust compiled to WebAssembly:
//!
//! ```ignore
//! use reinhardt_formset_pages::{FormReplicator, FormsetConfig};
//!
//! FormReplicator::new(FormsetConfig::default().with_prefix("jobs")).install()?;
//! ```
//!
//! From JavaScript, through the exported `installFormReplicator`:
//!
//! ```js
//! import init, { installFormReplicator } from "./pkg/reinhardt_formset_pages.js";
//! await init();
//! installFormReplicator(JSON.stringify({ prefix: "jobs" }));
//! ```
//!
//! ## Features
//!
//! - `console_error_panic_hook`: readable panics in the browser console
//! - `debug-hooks`: per-activation debug logging in debug builds

pub mod dom;
pub mod error;
pub mod launcher;
pub mod logging;

pub use dom::{DomBlock, DomFormset, require_element};
pub use error::{ReplicatorError, ReplicatorResult};
pub use launcher::{FormReplicator, ReplicatorHandle, install_form_replicator};

pub use reinhardt_formset_core::{CounterPolicy, FormsetConfig, Replicator};

// Used by the logging macros
#[doc(hidden)]
pub use web_sys as __web_sys;
