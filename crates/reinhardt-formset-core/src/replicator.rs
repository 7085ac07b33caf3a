//! Form replicator
//!
//! One call to [`Replicator::add_form`] is one activation of the "add"
//! control:
//!
//! 1. read the total forms counter and settle the new index through the
//!    [`CounterPolicy`];
//! 2. refuse the addition when `max_num` forms already exist;
//! 3. deep-copy the first block of the container;
//! 4. point every index marker of the copy at the new index;
//! 5. append the copy and write `index + 1` back to the counter.
//!
//! The host is left untouched when any step before the append fails.

use crate::block::Reindex;
use crate::config::{CounterPolicy, FormsetConfig};
use crate::error::{FormsetError, FormsetResult};
use crate::host::FormsetHost;
use crate::prefix::FormPrefix;

/// Adds forms to a formset host by cloning its template block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Replicator {
	prefix: FormPrefix,
	policy: CounterPolicy,
	max_num: Option<usize>,
}

impl Replicator {
	pub fn new(prefix: FormPrefix) -> Self {
		Self {
			prefix,
			policy: CounterPolicy::default(),
			max_num: None,
		}
	}

	pub fn from_config(config: &FormsetConfig) -> FormsetResult<Self> {
		Ok(Self {
			prefix: config.form_prefix()?,
			policy: config.counter_policy,
			max_num: config.max_num,
		})
	}

	pub fn with_policy(mut self, policy: CounterPolicy) -> Self {
		self.policy = policy;
		self
	}

	pub fn with_max_num(mut self, max_num: Option<usize>) -> Self {
		self.max_num = max_num;
		self
	}

	pub fn prefix(&self) -> &FormPrefix {
		&self.prefix
	}

	pub fn policy(&self) -> CounterPolicy {
		self.policy
	}

	pub fn max_num(&self) -> Option<usize> {
		self.max_num
	}

	/// Index the next added form would receive.
	pub fn next_index<H: FormsetHost>(&self, host: &H) -> FormsetResult<usize> {
		let raw = host.total_forms()?;
		let blocks = host.block_count()?;
		let counter = raw.trim().parse::<usize>();

		match (self.policy, counter) {
			(CounterPolicy::Reconcile, Ok(counter)) if counter == blocks => Ok(counter),
			(CounterPolicy::Reconcile, _) => {
				tracing::warn!(
					prefix = %self.prefix,
					counter = %raw,
					blocks,
					"Total forms counter out of sync, using block count"
				);
				Ok(blocks)
			}
			(CounterPolicy::Trust, Ok(counter)) => Ok(counter),
			(CounterPolicy::Strict, Ok(counter)) if counter == blocks => Ok(counter),
			(CounterPolicy::Strict, Ok(counter)) => {
				Err(FormsetError::CounterMismatch { counter, blocks })
			}
			(CounterPolicy::Trust | CounterPolicy::Strict, Err(_)) => {
				Err(FormsetError::InvalidTotalForms { value: raw })
			}
		}
	}

	/// Append a copy of the template block reindexed to the next index and
	/// bump the counter. Returns the index assigned to the new form.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_formset_core::{BlockElement, FormBlock, FormPrefix, Formset};
	///
	/// let prefix = FormPrefix::default();
	/// let template = FormBlock::new(
	///     BlockElement::new("div").child(BlockElement::input(&prefix, 0, "jobId", "text")),
	/// );
	/// let mut formset = Formset::new(prefix, template);
	///
	/// assert_eq!(formset.add_form().unwrap(), 1);
	/// assert_eq!(formset.len(), 2);
	/// assert_eq!(formset.total_forms_raw(), "2");
	/// assert!(formset.blocks()[1].render_to_string().contains(r#"name="form-1-jobId""#));
	/// ```
	pub fn add_form<H: FormsetHost>(&self, host: &mut H) -> FormsetResult<usize> {
		let index = self.next_index(host)?;
		let next_total = index
			.checked_add(1)
			.ok_or_else(|| FormsetError::InvalidTotalForms {
				value: index.to_string(),
			})?;

		if let Some(max_num) = self.max_num
			&& index >= max_num
		{
			tracing::warn!(prefix = %self.prefix, max_num, "Formset is full");
			return Err(FormsetError::MaxFormsReached { max_num });
		}

		let mut block = host.clone_template()?.ok_or(FormsetError::MissingTemplate)?;
		let markers = block.reindex(&self.prefix, index);
		if markers == 0 {
			tracing::debug!(prefix = %self.prefix, "Template block carries no index markers");
		}

		host.append_block(block)?;
		host.set_total_forms(next_total)?;

		tracing::debug!(prefix = %self.prefix, index, markers, "Added form");
		Ok(index)
	}
}
