//! Browser form replicator
//!
//! This module provides access to reinhardt-formset-pages, which drives the
//! formset replicator over the live DOM from WebAssembly.
//!
//! ## Page contract
//!
//! - **Add control**: element with id `add-form`; each click adds one form
//! - **Form container**: element with id `form-container`; its first element
//!   child is the clone source
//! - **Counter**: `<input id="id_form-TOTAL_FORMS">` from the management form
//!
//! Every id is configurable through [`FormsetConfig`](crate::FormsetConfig).
//!
//! ## Example
//!
//! ```rust,ignore
//! use reinhardt_formset::pages::FormReplicator;
//! use reinhardt_formset::FormsetConfig;
//!
//! let config = FormsetConfig::from_toml_str(r#"
//!     prefix = "jobs"
//!     add_button_id = "add-job"
//!     container_id = "jobs"
//! "#)?;
//! FormReplicator::new(config).install()?;
//! ```

// Re-export all reinhardt-formset-pages functionality
pub use reinhardt_formset_pages::*;
