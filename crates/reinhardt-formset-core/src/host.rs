//! The seam between the replicator and whatever owns the form container.
//!
//! A host is either the live page (see `reinhardt-formset-pages`) or an
//! in-memory [`Formset`](crate::Formset). The replicator only talks to the
//! container and the counter field through this trait.

use crate::block::Reindex;
use crate::error::FormsetResult;

/// Owner of a form container and its total forms counter.
pub trait FormsetHost {
	/// One form block as the host stores it.
	type Block: Reindex;

	/// Raw textual value of the total forms counter.
	fn total_forms(&self) -> FormsetResult<String>;

	/// Overwrite the total forms counter.
	fn set_total_forms(&mut self, value: usize) -> FormsetResult<()>;

	/// Number of blocks currently in the container.
	fn block_count(&self) -> FormsetResult<usize>;

	/// Deep copy of the first block, or `None` when the container is empty.
	fn clone_template(&self) -> FormsetResult<Option<Self::Block>>;

	/// Append a block as the last child of the container.
	fn append_block(&mut self, block: Self::Block) -> FormsetResult<()>;
}
