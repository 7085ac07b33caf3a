//! Server-rendered form blocks kept as opaque markup.

use crate::block::{Reindex, RenderHtml};
use crate::prefix::FormPrefix;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A form block whose markup was rendered elsewhere (a template engine, a
/// cached fragment). Reindexing rewrites `<prefix>-<digits>-` markers that
/// are not glued to a preceding identifier character.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkupBlock {
	html: String,
}

impl MarkupBlock {
	pub fn new(html: impl Into<String>) -> Self {
		Self { html: html.into() }
	}

	pub fn as_str(&self) -> &str {
		&self.html
	}

	pub fn into_inner(self) -> String {
		self.html
	}
}

impl Reindex for MarkupBlock {
	fn reindex(&mut self, prefix: &FormPrefix, index: usize) -> usize {
		let count = prefix.count_markers(&self.html);
		let rewritten = match prefix.rewrite(&self.html, index) {
			Cow::Owned(html) => Some(html),
			Cow::Borrowed(_) => None,
		};
		if let Some(html) = rewritten {
			self.html = html;
		}
		count
	}
}

impl RenderHtml for MarkupBlock {
	fn to_html(&self) -> Cow<'_, str> {
		Cow::Borrowed(&self.html)
	}
}

impl From<String> for MarkupBlock {
	fn from(html: String) -> Self {
		Self::new(html)
	}
}

impl From<&str> for MarkupBlock {
	fn from(html: &str) -> Self {
		Self::new(html)
	}
}
