//! Management form for tracking formset state
//!
//! The management form is the set of hidden inputs that travels with every
//! formset: `TOTAL_FORMS` (the counter the replicator increments),
//! `INITIAL_FORMS`, `MIN_NUM_FORMS` and `MAX_NUM_FORMS`.

use crate::error::ManagementFormError;
use crate::html::html_escape;
use crate::prefix::FormPrefix;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const TOTAL_FORM_COUNT: &str = "TOTAL_FORMS";
pub const INITIAL_FORM_COUNT: &str = "INITIAL_FORMS";
pub const MIN_NUM_FORM_COUNT: &str = "MIN_NUM_FORMS";
pub const MAX_NUM_FORM_COUNT: &str = "MAX_NUM_FORMS";

/// Default upper bound on the number of forms.
pub const DEFAULT_MAX_NUM: usize = 1000;

/// Management form data
///
/// # Examples
///
/// ```
/// use reinhardt_formset_core::{FormPrefix, ManagementForm};
/// use std::collections::HashMap;
///
/// let prefix = FormPrefix::default();
/// let mut data = HashMap::new();
/// data.insert("form-TOTAL_FORMS".to_string(), "3".to_string());
/// data.insert("form-INITIAL_FORMS".to_string(), "1".to_string());
///
/// let management = ManagementForm::from_data(&prefix, &data).unwrap();
/// assert_eq!(management.total_forms, 3);
/// assert_eq!(management.initial_forms, 1);
/// assert_eq!(management.max_num, Some(1000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagementForm {
	/// Total number of forms in formset
	pub total_forms: usize,
	/// Number of initial forms (existing objects)
	pub initial_forms: usize,
	/// Minimum number of required forms
	pub min_num: usize,
	/// Maximum number of allowed forms
	pub max_num: Option<usize>,
}

impl Default for ManagementForm {
	fn default() -> Self {
		Self {
			total_forms: 0,
			initial_forms: 0,
			min_num: 0,
			max_num: Some(DEFAULT_MAX_NUM),
		}
	}
}

impl ManagementForm {
	pub fn new(total_forms: usize, initial_forms: usize) -> Self {
		Self {
			total_forms,
			initial_forms,
			..Self::default()
		}
	}

	pub fn with_min_num(mut self, min_num: usize) -> Self {
		self.min_num = min_num;
		self
	}

	pub fn with_max_num(mut self, max_num: Option<usize>) -> Self {
		self.max_num = max_num;
		self
	}

	/// Hard cap derived from this form's `max_num`.
	///
	/// Only trust this on a management form built server side; a submitted
	/// `MAX_NUM_FORMS` is chosen by the client. [`BoundFormset`] caps with
	/// [`absolute_max`](crate::management::absolute_max) over the server's own `max_num` instead.
	///
	/// [`BoundFormset`]: crate::BoundFormset
	pub fn absolute_max(&self) -> usize {
		absolute_max(self.max_num)
	}

	/// Read the management form out of submitted data.
	///
	/// `TOTAL_FORMS` and `INITIAL_FORMS` are required; `MIN_NUM_FORMS` and
	/// `MAX_NUM_FORMS` fall back to their defaults when absent.
	pub fn from_data(
		prefix: &FormPrefix,
		data: &HashMap<String, String>,
	) -> Result<Self, ManagementFormError> {
		let required = |key: &str| {
			let field = prefix.management_name(key);
			match data.get(&field) {
				Some(raw) => parse_count(&field, raw),
				None => Err(ManagementFormError::Missing { field }),
			}
		};
		let optional = |key: &str| {
			let field = prefix.management_name(key);
			match data.get(&field) {
				Some(raw) if !raw.trim().is_empty() => parse_count(&field, raw).map(Some),
				_ => Ok(None),
			}
		};

		Ok(Self {
			total_forms: required(TOTAL_FORM_COUNT)?,
			initial_forms: required(INITIAL_FORM_COUNT)?,
			min_num: optional(MIN_NUM_FORM_COUNT)?.unwrap_or(0),
			max_num: Some(optional(MAX_NUM_FORM_COUNT)?.unwrap_or(DEFAULT_MAX_NUM)),
		})
	}

	/// Render the management form as hidden inputs.
	pub fn render(&self, prefix: &FormPrefix) -> String {
		let max_num = self.max_num.map(|n| n.to_string()).unwrap_or_default();
		[
			(TOTAL_FORM_COUNT, self.total_forms.to_string()),
			(INITIAL_FORM_COUNT, self.initial_forms.to_string()),
			(MIN_NUM_FORM_COUNT, self.min_num.to_string()),
			(MAX_NUM_FORM_COUNT, max_num),
		]
		.iter()
		.map(|(key, value)| {
			format!(
				r#"<input type="hidden" name="{}" value="{}" id="{}" />"#,
				html_escape(&prefix.management_name(key)),
				html_escape(value),
				html_escape(&prefix.management_id(key)),
			)
		})
		.collect()
	}
}

/// Hard cap on the number of forms read from submitted data, whatever
/// `TOTAL_FORMS` claims: `max_num` (default [`DEFAULT_MAX_NUM`]) plus
/// [`DEFAULT_MAX_NUM`], saturating.
pub fn absolute_max(max_num: Option<usize>) -> usize {
	max_num
		.unwrap_or(DEFAULT_MAX_NUM)
		.saturating_add(DEFAULT_MAX_NUM)
}

/// Parse a management form count, tolerating surrounding whitespace.
pub fn parse_count(field: &str, raw: &str) -> Result<usize, ManagementFormError> {
	raw.trim()
		.parse()
		.map_err(|_| ManagementFormError::Invalid {
			field: field.to_string(),
			value: raw.to_string(),
		})
}
