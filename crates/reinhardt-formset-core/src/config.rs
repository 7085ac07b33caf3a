//! Formset replicator configuration
//!
//! Settings can be built in code with the `with_*` setters, or loaded from a
//! TOML or JSON document. Every key is optional; missing keys take the
//! defaults matching Django's formset markup:
//!
//! ```toml
//! prefix = "form"
//! add_button_id = "add-form"
//! container_id = "form-container"
//! # total_forms_id defaults to "id_<prefix>-TOTAL_FORMS"
//! counter_policy = "reconcile"
//! max_num = 1000
//! # indexed_attributes = ["id", "name", "for"] limits the rewrite; every
//! # attribute is rewritten when absent
//! ```

use crate::error::FormsetError;
use crate::management::TOTAL_FORM_COUNT;
use crate::prefix::{DEFAULT_PREFIX, FormPrefix};
use serde::{Deserialize, Serialize};

/// How the replicator treats a counter that cannot be trusted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CounterPolicy {
	/// Replace a missing, non-numeric or mismatched counter with the number
	/// of blocks actually present.
	#[default]
	Reconcile,
	/// Use the parsed counter even when it disagrees with the block count.
	Trust,
	/// Reject non-numeric and mismatched counters.
	Strict,
}

/// Error type for configuration loading
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("Invalid configuration: {0}")]
	Invalid(String),
}

/// Page contract and replication behavior of one formset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsetConfig {
	pub prefix: String,
	pub add_button_id: String,
	pub container_id: String,
	/// Id of the counter field; `None` derives `id_<prefix>-TOTAL_FORMS`.
	pub total_forms_id: Option<String>,
	pub counter_policy: CounterPolicy,
	/// Refuse additions once this many forms exist.
	pub max_num: Option<usize>,
	/// DOM attributes whose values carry index markers; `None` rewrites
	/// every attribute, so references such as `list` or `aria-labelledby`
	/// follow the renumbered ids.
	pub indexed_attributes: Option<Vec<String>>,
}

impl Default for FormsetConfig {
	fn default() -> Self {
		Self {
			prefix: DEFAULT_PREFIX.to_string(),
			add_button_id: "add-form".to_string(),
			container_id: "form-container".to_string(),
			total_forms_id: None,
			counter_policy: CounterPolicy::default(),
			max_num: None,
			indexed_attributes: None,
		}
	}
}

impl FormsetConfig {
	pub fn new() -> Self {
		Self::default()
	}

	/// Load settings from a TOML document.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_formset_core::{CounterPolicy, FormsetConfig};
	///
	/// let config = FormsetConfig::from_toml_str(r#"
	///     prefix = "jobs"
	///     counter_policy = "strict"
	///     max_num = 5
	/// "#).unwrap();
	///
	/// assert_eq!(config.prefix, "jobs");
	/// assert_eq!(config.counter_policy, CounterPolicy::Strict);
	/// assert_eq!(config.total_forms_id(), "id_jobs-TOTAL_FORMS");
	/// assert_eq!(config.add_button_id, "add-form");
	/// ```
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	/// Load settings from a JSON document.
	pub fn from_json_str(source: &str) -> Result<Self, ConfigError> {
		let config: Self = serde_json::from_str(source)?;
		config.validate()?;
		Ok(config)
	}

	pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.prefix = prefix.into();
		self
	}

	pub fn with_add_button_id(mut self, id: impl Into<String>) -> Self {
		self.add_button_id = id.into();
		self
	}

	pub fn with_container_id(mut self, id: impl Into<String>) -> Self {
		self.container_id = id.into();
		self
	}

	pub fn with_total_forms_id(mut self, id: impl Into<String>) -> Self {
		self.total_forms_id = Some(id.into());
		self
	}

	pub fn with_counter_policy(mut self, policy: CounterPolicy) -> Self {
		self.counter_policy = policy;
		self
	}

	pub fn with_max_num(mut self, max_num: usize) -> Self {
		self.max_num = Some(max_num);
		self
	}

	pub fn with_indexed_attributes<I, S>(mut self, attributes: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.indexed_attributes = Some(attributes.into_iter().map(Into::into).collect());
		self
	}

	/// Id of the counter field.
	pub fn total_forms_id(&self) -> String {
		self.total_forms_id
			.clone()
			.unwrap_or_else(|| format!("id_{}-{}", self.prefix, TOTAL_FORM_COUNT))
	}

	/// Compiled prefix.
	pub fn form_prefix(&self) -> Result<FormPrefix, FormsetError> {
		FormPrefix::new(self.prefix.as_str())
	}

	/// Check the settings for values that can never match a page.
	pub fn validate(&self) -> Result<(), ConfigError> {
		self.form_prefix()
			.map_err(|e| ConfigError::Invalid(e.to_string()))?;

		let ids = [
			("add_button_id", Some(self.add_button_id.as_str())),
			("container_id", Some(self.container_id.as_str())),
			("total_forms_id", self.total_forms_id.as_deref()),
		];
		for (key, id) in ids {
			if let Some(id) = id
				&& (id.is_empty() || id.chars().any(char::is_whitespace))
			{
				return Err(ConfigError::Invalid(format!(
					"{key} must be a non-empty id without whitespace, got {id:?}"
				)));
			}
		}

		if self.max_num == Some(0) {
			return Err(ConfigError::Invalid(
				"max_num must allow at least one form".to_string(),
			));
		}
		if self
			.indexed_attributes
			.as_ref()
			.is_some_and(|attributes| attributes.is_empty())
		{
			return Err(ConfigError::Invalid(
				"indexed_attributes must name at least one attribute".to_string(),
			));
		}
		Ok(())
	}
}
