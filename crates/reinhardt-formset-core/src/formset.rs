//! In-memory formset
//!
//! [`Formset`] owns its container and counter as plain Rust values. It is the
//! server-side counterpart of the page: forms are added through the same
//! [`Replicator`] the browser uses, and [`Formset::render`] produces the
//! container markup together with the management form.

use crate::block::{Reindex, RenderHtml};
use crate::config::FormsetConfig;
use crate::error::FormsetResult;
use crate::host::FormsetHost;
use crate::html::html_escape;
use crate::management::ManagementForm;
use crate::prefix::FormPrefix;
use crate::replicator::Replicator;

const DEFAULT_CONTAINER_ID: &str = "form-container";

/// Ordered form blocks plus the total forms counter.
#[derive(Debug, Clone)]
pub struct Formset<B> {
	replicator: Replicator,
	container_id: String,
	blocks: Vec<B>,
	/// Counter as the page would hold it: raw text.
	total_forms: String,
	initial_forms: usize,
	min_num: usize,
}

impl<B: Reindex + Clone> Formset<B> {
	/// Formset holding only the template block, counter `1`.
	pub fn new(prefix: FormPrefix, template: B) -> Self {
		Self::from_blocks(prefix, vec![template])
	}

	/// Formset over already-rendered blocks; the counter starts at their count.
	pub fn from_blocks(prefix: FormPrefix, blocks: Vec<B>) -> Self {
		Self {
			replicator: Replicator::new(prefix),
			container_id: DEFAULT_CONTAINER_ID.to_string(),
			total_forms: blocks.len().to_string(),
			blocks,
			initial_forms: 0,
			min_num: 0,
		}
	}

	pub fn from_config(config: &FormsetConfig, template: B) -> FormsetResult<Self> {
		Ok(Self {
			replicator: Replicator::from_config(config)?,
			container_id: config.container_id.clone(),
			..Self::from_blocks(FormPrefix::default(), vec![template])
		})
	}

	pub fn with_replicator(mut self, replicator: Replicator) -> Self {
		self.replicator = replicator;
		self
	}

	pub fn with_initial_forms(mut self, initial_forms: usize) -> Self {
		self.initial_forms = initial_forms;
		self
	}

	pub fn with_min_num(mut self, min_num: usize) -> Self {
		self.min_num = min_num;
		self
	}

	/// Add one form cloned from the first block. Returns its index.
	pub fn add_form(&mut self) -> FormsetResult<usize> {
		let replicator = self.replicator.clone();
		replicator.add_form(self)
	}

	pub fn prefix(&self) -> &FormPrefix {
		self.replicator.prefix()
	}

	pub fn replicator(&self) -> &Replicator {
		&self.replicator
	}

	pub fn blocks(&self) -> &[B] {
		&self.blocks
	}

	pub fn len(&self) -> usize {
		self.blocks.len()
	}

	pub fn is_empty(&self) -> bool {
		self.blocks.is_empty()
	}

	pub fn total_forms_raw(&self) -> &str {
		&self.total_forms
	}

	/// Overwrite the counter text, as a script or a user could on the page.
	pub fn set_total_forms_raw(&mut self, value: impl Into<String>) {
		self.total_forms = value.into();
	}

	/// Management form describing the current state. A counter that does
	/// not parse is reported as the block count.
	pub fn management_form(&self) -> ManagementForm {
		let total_forms = self
			.total_forms
			.trim()
			.parse()
			.unwrap_or(self.blocks.len());
		ManagementForm::new(total_forms, self.initial_forms)
			.with_min_num(self.min_num)
			.with_max_num(self.replicator.max_num().or(ManagementForm::default().max_num))
	}
}

impl<B: Reindex + Clone + RenderHtml> Formset<B> {
	/// Render the container with every block, followed by the management form.
	pub fn render(&self) -> String {
		let mut html = format!(r#"<div id="{}">"#, html_escape(&self.container_id));
		for block in &self.blocks {
			html.push_str(&block.to_html());
		}
		html.push_str("</div>");
		html.push_str(&self.management_form().render(self.prefix()));
		html
	}
}

impl<B: Reindex + Clone> FormsetHost for Formset<B> {
	type Block = B;

	fn total_forms(&self) -> FormsetResult<String> {
		Ok(self.total_forms.clone())
	}

	fn set_total_forms(&mut self, value: usize) -> FormsetResult<()> {
		self.total_forms = value.to_string();
		Ok(())
	}

	fn block_count(&self) -> FormsetResult<usize> {
		Ok(self.blocks.len())
	}

	fn clone_template(&self) -> FormsetResult<Option<B>> {
		Ok(self.blocks.first().cloned())
	}

	fn append_block(&mut self, block: B) -> FormsetResult<()> {
		self.blocks.push(block);
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::block::{BlockElement, FormBlock};
	use crate::config::CounterPolicy;
	use crate::markup::MarkupBlock;
	use rstest::{fixture, rstest};

	#[fixture]
	fn job_formset() -> Formset<FormBlock> {
		let prefix = FormPrefix::default();
		let template = FormBlock::new(
			BlockElement::new("div")
				.attr("class", "job-form")
				.child(BlockElement::input(&prefix, 0, "jobId", "text"))
				.child(BlockElement::input(&prefix, 0, "dateRangeStart", "datetime-local")),
		);
		Formset::new(prefix, template)
	}

	#[rstest]
	fn test_new_formset_counts_template(job_formset: Formset<FormBlock>) {
		assert_eq!(job_formset.len(), 1);
		assert_eq!(job_formset.total_forms_raw(), "1");
		assert_eq!(job_formset.management_form().total_forms, 1);
	}

	#[rstest]
	fn test_add_form_keeps_counter_equal_to_blocks(mut job_formset: Formset<FormBlock>) {
		for expected in 1..=4 {
			assert_eq!(job_formset.add_form().unwrap(), expected);
			assert_eq!(job_formset.total_forms_raw(), (expected + 1).to_string());
			assert_eq!(job_formset.len(), expected + 1);
		}
		let prefix = job_formset.prefix().clone();
		let indices: Vec<_> = job_formset
			.blocks()
			.iter()
			.map(|b| b.index(&prefix))
			.collect();
		assert_eq!(indices, vec![Some(0), Some(1), Some(2), Some(3), Some(4)]);
	}

	#[rstest]
	fn test_tampered_counter_is_reconciled(mut job_formset: Formset<FormBlock>) {
		job_formset.set_total_forms_raw("7");
		assert_eq!(job_formset.add_form().unwrap(), 1);
		assert_eq!(job_formset.total_forms_raw(), "2");
	}

	#[rstest]
	fn test_render_container_and_management_form() {
		let prefix = FormPrefix::default();
		let mut formset = Formset::new(
			prefix,
			MarkupBlock::new(r#"<p><input name="form-0-code"></p>"#),
		);
		formset.add_form().unwrap();

		assert_eq!(
			formset.render(),
			concat!(
				r#"<div id="form-container"><p><input name="form-0-code"></p><p><input name="form-1-code"></p></div>"#,
				r#"<input type="hidden" name="form-TOTAL_FORMS" value="2" id="id_form-TOTAL_FORMS" />"#,
				r#"<input type="hidden" name="form-INITIAL_FORMS" value="0" id="id_form-INITIAL_FORMS" />"#,
				r#"<input type="hidden" name="form-MIN_NUM_FORMS" value="0" id="id_form-MIN_NUM_FORMS" />"#,
				r#"<input type="hidden" name="form-MAX_NUM_FORMS" value="1000" id="id_form-MAX_NUM_FORMS" />"#,
			)
		);
	}

	#[rstest]
	fn test_from_config() {
		let config = FormsetConfig::new()
			.with_prefix("jobs")
			.with_container_id("job-container")
			.with_counter_policy(CounterPolicy::Strict)
			.with_max_num(2);
		let prefix = config.form_prefix().unwrap();
		let mut formset =
			Formset::from_config(&config, FormBlock::new(BlockElement::input(&prefix, 0, "jobId", "text")))
				.unwrap();

		assert_eq!(formset.prefix().as_str(), "jobs");
		assert_eq!(formset.add_form().unwrap(), 1);
		assert!(formset.add_form().is_err());
		assert_eq!(formset.management_form().max_num, Some(2));
		assert!(formset.render().starts_with(r#"<div id="job-container">"#));
	}
}
