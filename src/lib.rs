//! # Reinhardt Formset
//!
//! Dynamic Django-style formsets for Reinhardt.
//!
//! A formset renders N copies of one form under a shared prefix
//! (`form-0-title`, `form-1-title`, ...) plus a management form whose
//! `TOTAL_FORMS` field tells the server how many copies to bind. This crate
//! adds forms to such a formset without a round-trip: the first form block is
//! cloned, its index markers are rewritten to the next index, and the counter
//! is updated.
//!
//! ## Feature Flags
//!
//! - `pages` (default) - Browser form replicator compiled to WebAssembly
//! - `full` - All features enabled
//!
//! ## Quick Example
//!
//! ```rust
//! use reinhardt_formset::{BlockElement, FormBlock, FormPrefix, Formset};
//!
//! let prefix = FormPrefix::default();
//! let template = FormBlock::new(
//!     BlockElement::new("div")
//!         .child(BlockElement::label(&prefix, 0, "title", "Title"))
//!         .child(BlockElement::input(&prefix, 0, "title", "text")),
//! );
//! let mut formset = Formset::new(prefix, template);
//!
//! assert_eq!(formset.add_form().unwrap(), 1);
//! assert_eq!(formset.total_forms_raw(), "2");
//! assert!(formset.render().contains(r#"name="form-1-title""#));
//! ```
//!
//! In the browser, with the `pages` feature:
//!
//! ```rust,ignore
//! use reinhardt_formset::pages::FormReplicator;
//! use reinhardt_formset::FormsetConfig;
//!
//! FormReplicator::new(FormsetConfig::default()).install()?;
//! ```

#[cfg(feature = "pages")]
pub mod pages;

pub use reinhardt_formset_core::*;

/// Re-export commonly used types
pub mod prelude {
	pub use reinhardt_formset_core::{
		BoundFormset, CounterPolicy, FormBlock, FormPrefix, Formset, FormsetConfig, FormsetError,
		FormsetHost, ManagementForm, MarkupBlock, Reindex, RenderHtml, Replicator,
	};

	#[cfg(feature = "pages")]
	pub use crate::pages::{FormReplicator, ReplicatorError};
}
