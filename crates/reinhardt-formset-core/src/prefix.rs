//! Formset prefixes and index markers
//!
//! Every field that belongs to a formset form is named
//! `<prefix>-<index>-<field>` and its element id carries Django's `id_` lead
//! (`id_<prefix>-<index>-<field>`). [`FormPrefix`] builds those names, parses
//! them back into [`IndexedName`] values, and rewrites the index of every
//! marker found in a piece of markup.

use crate::error::{FormsetError, FormsetResult};
use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Prefix Django uses when a formset is created without one.
pub const DEFAULT_PREFIX: &str = "form";

/// Lead Django puts in front of auto-generated element ids.
pub const ID_LEAD: &str = "id_";

/// A validated formset prefix together with its compiled marker patterns.
#[derive(Debug, Clone)]
pub struct FormPrefix {
	prefix: String,
	marker: Regex,
	name: Regex,
}

impl FormPrefix {
	/// Create a prefix, rejecting empty values and characters that would
	/// break the `<prefix>-<index>-<field>` convention.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_formset_core::FormPrefix;
	///
	/// let prefix = FormPrefix::new("items").unwrap();
	/// assert_eq!(prefix.field_name(2, "title"), "items-2-title");
	/// assert_eq!(prefix.field_id(2, "title"), "id_items-2-title");
	///
	/// assert!(FormPrefix::new("").is_err());
	/// assert!(FormPrefix::new("bad prefix").is_err());
	/// ```
	pub fn new(prefix: impl Into<String>) -> FormsetResult<Self> {
		let prefix = prefix.into();
		if !is_valid_prefix(&prefix) {
			return Err(FormsetError::InvalidPrefix { prefix });
		}

		let escaped = regex::escape(&prefix);
		// A marker must not be glued to a preceding identifier character,
		// otherwise `myform-0-` would be rewritten along with `form-0-`.
		let marker = Regex::new(&format!(
			r"(?P<lead>^|[^A-Za-z0-9_\-])(?P<id>{ID_LEAD})?{escaped}-(?P<index>[0-9]+)-"
		))
		.map_err(|_| FormsetError::InvalidPrefix {
			prefix: prefix.clone(),
		})?;
		let name = Regex::new(&format!(
			r"^(?P<id>{ID_LEAD})?{escaped}-(?P<index>[0-9]+)-(?P<field>.+)$"
		))
		.map_err(|_| FormsetError::InvalidPrefix {
			prefix: prefix.clone(),
		})?;

		Ok(Self {
			prefix,
			marker,
			name,
		})
	}

	/// The raw prefix string.
	pub fn as_str(&self) -> &str {
		&self.prefix
	}

	/// `<prefix>-<index>-<field>`
	pub fn field_name(&self, index: usize, field: &str) -> String {
		format!("{}-{}-{}", self.prefix, index, field)
	}

	/// `id_<prefix>-<index>-<field>`
	pub fn field_id(&self, index: usize, field: &str) -> String {
		format!("{}{}", ID_LEAD, self.field_name(index, field))
	}

	/// Name of a management form field, e.g. `form-TOTAL_FORMS`.
	pub fn management_name(&self, key: &str) -> String {
		format!("{}-{}", self.prefix, key)
	}

	/// Element id of a management form field, e.g. `id_form-TOTAL_FORMS`.
	pub fn management_id(&self, key: &str) -> String {
		format!("{}{}", ID_LEAD, self.management_name(key))
	}

	/// Typed name marker for a field of the form at `index`.
	pub fn indexed(&self, index: usize, field: impl Into<String>) -> IndexedName {
		IndexedName {
			prefix: self.prefix.clone(),
			index,
			field: field.into(),
			id_lead: false,
		}
	}

	/// Typed id marker for a field of the form at `index`.
	pub fn indexed_id(&self, index: usize, field: impl Into<String>) -> IndexedName {
		IndexedName {
			id_lead: true,
			..self.indexed(index, field)
		}
	}

	/// Parse a complete field name or id belonging to this prefix.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_formset_core::FormPrefix;
	///
	/// let prefix = FormPrefix::default();
	/// let parsed = prefix.parse("id_form-3-email").unwrap();
	/// assert_eq!(parsed.index, 3);
	/// assert_eq!(parsed.field, "email");
	/// assert!(parsed.id_lead);
	///
	/// assert!(prefix.parse("form-TOTAL_FORMS").is_none());
	/// assert!(prefix.parse("other-0-email").is_none());
	/// ```
	pub fn parse(&self, value: &str) -> Option<IndexedName> {
		let caps = self.name.captures(value)?;
		let index = caps["index"].parse().ok()?;
		Some(IndexedName {
			prefix: self.prefix.clone(),
			index,
			field: caps["field"].to_string(),
			id_lead: caps.name("id").is_some(),
		})
	}

	/// Rewrite every index marker of this prefix found in `text` to `index`.
	///
	/// Only the numeric segment between `<prefix>-` and the trailing `-`
	/// changes. Text without markers is returned borrowed.
	///
	/// # Examples
	///
	/// ```
	/// use reinhardt_formset_core::FormPrefix;
	///
	/// let prefix = FormPrefix::default();
	/// let html = r#"<label for="id_form-0-title">Title</label><input name="form-0-title" id="id_form-0-title">"#;
	/// assert_eq!(
	///     prefix.rewrite(html, 4),
	///     r#"<label for="id_form-4-title">Title</label><input name="form-4-title" id="id_form-4-title">"#
	/// );
	/// ```
	pub fn rewrite<'a>(&self, text: &'a str, index: usize) -> Cow<'a, str> {
		self.marker.replace_all(text, |caps: &Captures<'_>| {
			format!(
				"{}{}{}-{}-",
				&caps["lead"],
				caps.name("id").map_or("", |m| m.as_str()),
				self.prefix,
				index
			)
		})
	}

	/// Number of index markers of this prefix found in `text`.
	pub fn count_markers(&self, text: &str) -> usize {
		self.marker.find_iter(text).count()
	}
}

impl Default for FormPrefix {
	/// The `form` prefix.
	///
	/// Patterns are built from `regex::escape` of a prefix that passed
	/// [`is_valid_prefix`], so compilation cannot fail for a constant valid
	/// prefix such as [`DEFAULT_PREFIX`].
	fn default() -> Self {
		Self::new(DEFAULT_PREFIX).expect("DEFAULT_PREFIX is a valid prefix")
	}
}

impl PartialEq for FormPrefix {
	fn eq(&self, other: &Self) -> bool {
		self.prefix == other.prefix
	}
}

impl Eq for FormPrefix {}

impl fmt::Display for FormPrefix {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.prefix)
	}
}

/// Returns true when `prefix` can be used in `<prefix>-<index>-<field>` names.
pub fn is_valid_prefix(prefix: &str) -> bool {
	!prefix.is_empty()
		&& prefix
			.chars()
			.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

/// A typed `<prefix>-<index>-<field>` marker.
///
/// Attributes holding an `IndexedName` are reindexed by setting
/// [`IndexedName::index`], never by text substitution.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IndexedName {
	pub prefix: String,
	pub index: usize,
	pub field: String,
	/// Whether the rendered value carries the `id_` lead.
	pub id_lead: bool,
}

impl IndexedName {
	/// Same marker pointing at another form index.
	pub fn with_index(&self, index: usize) -> Self {
		Self {
			index,
			..self.clone()
		}
	}
}

impl fmt::Display for IndexedName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.id_lead {
			f.write_str(ID_LEAD)?;
		}
		write!(f, "{}-{}-{}", self.prefix, self.index, self.field)
	}
}
