//! Submitted formset data
//!
//! When the page posts a formset, each replicated block arrives as
//! `<prefix>-<index>-<field>` pairs next to the management form.
//! [`BoundFormset`] reads the management form and groups the field values
//! per form. Field values are not validated here.

use crate::error::FormsetResult;
use crate::management::{ManagementForm, absolute_max};
use crate::prefix::FormPrefix;
use crate::replicator::Replicator;
use std::collections::HashMap;

/// Formset data grouped per form.
///
/// # Examples
///
/// ```
/// use reinhardt_formset_core::{BoundFormset, FormPrefix};
///
/// let prefix = FormPrefix::default();
/// let formset = BoundFormset::from_pairs(&prefix, [
///     ("form-TOTAL_FORMS", "2"),
///     ("form-INITIAL_FORMS", "0"),
///     ("form-0-jobId", "first"),
///     ("form-1-jobId", "second"),
/// ]).unwrap();
///
/// assert_eq!(formset.total_form_count(), 2);
/// assert_eq!(formset.form(1).unwrap().get("jobId").map(String::as_str), Some("second"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundFormset {
	prefix: FormPrefix,
	management: ManagementForm,
	forms: Vec<HashMap<String, String>>,
}

impl BoundFormset {
	/// Bind submitted data under the default `max_num`. Fails when the
	/// management form is missing or malformed.
	pub fn from_data(prefix: &FormPrefix, data: &HashMap<String, String>) -> FormsetResult<Self> {
		Self::from_data_with_max_num(prefix, data, None)
	}

	/// Bind submitted data, reading at most `max_num + 1000` forms
	/// (`max_num` defaults to 1000). The posted `MAX_NUM_FORMS` never
	/// raises this cap.
	pub fn from_data_with_max_num(
		prefix: &FormPrefix,
		data: &HashMap<String, String>,
		max_num: Option<usize>,
	) -> FormsetResult<Self> {
		let management = ManagementForm::from_data(prefix, data)?;

		let absolute_max = absolute_max(max_num);
		let count = if management.total_forms > absolute_max {
			tracing::warn!(
				prefix = %prefix,
				total_forms = management.total_forms,
				absolute_max,
				"TOTAL_FORMS exceeds the absolute maximum, truncating"
			);
			absolute_max
		} else {
			management.total_forms
		};

		let mut forms = vec![HashMap::new(); count];
		let mut ignored = 0usize;
		for (key, value) in data {
			match prefix.parse(key) {
				Some(name) if !name.id_lead && name.index < count => {
					forms[name.index].insert(name.field, value.clone());
				}
				Some(_) => ignored += 1,
				None => {}
			}
		}
		if ignored > 0 {
			tracing::debug!(prefix = %prefix, ignored, "Ignored fields outside TOTAL_FORMS");
		}

		Ok(Self {
			prefix: prefix.clone(),
			management,
			forms,
		})
	}

	/// Bind data given as key/value pairs (e.g. a decoded request body).
	pub fn from_pairs<I, K, V>(prefix: &FormPrefix, pairs: I) -> FormsetResult<Self>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		let data = pairs
			.into_iter()
			.map(|(k, v)| (k.into(), v.into()))
			.collect();
		Self::from_data(prefix, &data)
	}

	/// Bind submitted data with the prefix and `max_num` of a replicator.
	pub fn from_replicator(
		replicator: &Replicator,
		data: &HashMap<String, String>,
	) -> FormsetResult<Self> {
		Self::from_data_with_max_num(replicator.prefix(), data, replicator.max_num())
	}

	pub fn prefix(&self) -> &FormPrefix {
		&self.prefix
	}

	pub fn management_form(&self) -> &ManagementForm {
		&self.management
	}

	/// Number of forms bound, after the absolute maximum is applied.
	pub fn total_form_count(&self) -> usize {
		self.forms.len()
	}

	pub fn initial_form_count(&self) -> usize {
		self.management.initial_forms.min(self.forms.len())
	}

	pub fn forms(&self) -> &[HashMap<String, String>] {
		&self.forms
	}

	pub fn form(&self, index: usize) -> Option<&HashMap<String, String>> {
		self.forms.get(index)
	}

	/// Forms added on the page after the initial ones.
	pub fn extra_forms(&self) -> &[HashMap<String, String>] {
		&self.forms[self.initial_form_count()..]
	}
}
