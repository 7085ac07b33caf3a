//! Formset replication for Reinhardt
//!
//! This crate holds the platform-independent half of dynamic formsets:
//! - Prefixes and `<prefix>-<index>-<field>` index markers
//! - Typed form blocks and opaque markup blocks that can be reindexed
//! - The form replicator that clones the template block for a new form
//! - Counter policies for totals that disagree with the page
//! - The management form and submitted formset data
//!
//! The browser half lives in `reinhardt-formset-pages`, which drives the same
//! [`Replicator`] over the live DOM.

pub mod block;
pub mod bound;
pub mod config;
pub mod error;
pub mod formset;
pub mod host;
pub mod html;
pub mod management;
pub mod markup;
pub mod prefix;
pub mod replicator;

pub use block::{AttrValue, BlockElement, BlockNode, FormBlock, Reindex, RenderHtml};
pub use bound::BoundFormset;
pub use config::{ConfigError, CounterPolicy, FormsetConfig};
pub use error::{FormsetError, FormsetResult, ManagementFormError};
pub use formset::Formset;
pub use host::FormsetHost;
pub use management::{
	DEFAULT_MAX_NUM, INITIAL_FORM_COUNT, MAX_NUM_FORM_COUNT, MIN_NUM_FORM_COUNT, ManagementForm,
	TOTAL_FORM_COUNT,
};
pub use markup::MarkupBlock;
pub use prefix::{DEFAULT_PREFIX, FormPrefix, ID_LEAD, IndexedName};
pub use replicator::Replicator;
