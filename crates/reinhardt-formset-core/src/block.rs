//! Typed form blocks
//!
//! A [`FormBlock`] is the element tree of one formset form. Attributes that
//! carry the form index (`name`, `id`, `for`, ...) are stored as typed
//! [`IndexedName`] values, so cloning a block for a new form sets the index
//! explicitly instead of substituting text in serialized markup. Text nodes
//! and plain attributes are never touched by reindexing.
//!
//! ## Example
//!
//! ```
//! use reinhardt_formset_core::{BlockElement, FormBlock, FormPrefix, Reindex};
//!
//! let prefix = FormPrefix::default();
//! let mut block = FormBlock::new(
//!     BlockElement::new("div")
//!         .attr("class", "job-form")
//!         .child(BlockElement::label(&prefix, 0, "jobId", "Job ID"))
//!         .child(BlockElement::input(&prefix, 0, "jobId", "text")),
//! );
//!
//! assert_eq!(block.reindex(&prefix, 3), 3);
//! assert_eq!(
//!     block.render_to_string(),
//!     r#"<div class="job-form"><label for="id_form-3-jobId">Job ID</label><input type="text" name="form-3-jobId" id="id_form-3-jobId" /></div>"#
//! );
//! ```

use crate::html::{html_escape, is_void_element};
use crate::prefix::{FormPrefix, IndexedName};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Value of an element attribute.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttrValue {
	/// Rendered verbatim (escaped).
	Plain(String),
	/// A `<prefix>-<index>-<field>` marker.
	Indexed(IndexedName),
}

impl AttrValue {
	/// Rendered attribute value before escaping.
	pub fn render(&self) -> String {
		match self {
			AttrValue::Plain(value) => value.clone(),
			AttrValue::Indexed(name) => name.to_string(),
		}
	}
}

impl From<&str> for AttrValue {
	fn from(value: &str) -> Self {
		AttrValue::Plain(value.to_string())
	}
}

impl From<String> for AttrValue {
	fn from(value: String) -> Self {
		AttrValue::Plain(value)
	}
}

impl From<IndexedName> for AttrValue {
	fn from(value: IndexedName) -> Self {
		AttrValue::Indexed(value)
	}
}

/// A node in a form block tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockNode {
	Element(BlockElement),
	Text(String),
	Fragment(Vec<BlockNode>),
}

impl From<BlockElement> for BlockNode {
	fn from(element: BlockElement) -> Self {
		BlockNode::Element(element)
	}
}

impl From<&str> for BlockNode {
	fn from(text: &str) -> Self {
		BlockNode::Text(text.to_string())
	}
}

impl From<String> for BlockNode {
	fn from(text: String) -> Self {
		BlockNode::Text(text)
	}
}

/// An element of a form block tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockElement {
	tag: String,
	attrs: Vec<(String, AttrValue)>,
	children: Vec<BlockNode>,
}

impl BlockElement {
	/// Creates a new element.
	pub fn new(tag: impl Into<String>) -> Self {
		Self {
			tag: tag.into(),
			attrs: Vec::new(),
			children: Vec::new(),
		}
	}

	/// `<input type=".." name="<prefix>-<index>-<field>" id="id_<prefix>-<index>-<field>" />`
	pub fn input(prefix: &FormPrefix, index: usize, field: &str, input_type: &str) -> Self {
		Self::new("input")
			.attr("type", input_type)
			.attr("name", prefix.indexed(index, field))
			.attr("id", prefix.indexed_id(index, field))
	}

	/// `<label for="id_<prefix>-<index>-<field>">text</label>`
	pub fn label(prefix: &FormPrefix, index: usize, field: &str, text: &str) -> Self {
		Self::new("label")
			.attr("for", prefix.indexed_id(index, field))
			.child(text)
	}

	/// Adds an attribute. Repeated names are kept in insertion order.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Adds a child node.
	pub fn child(mut self, child: impl Into<BlockNode>) -> Self {
		self.children.push(child.into());
		self
	}

	/// Adds multiple child nodes.
	pub fn children(mut self, children: impl IntoIterator<Item = impl Into<BlockNode>>) -> Self {
		self.children.extend(children.into_iter().map(Into::into));
		self
	}

	pub fn tag_name(&self) -> &str {
		&self.tag
	}

	pub fn attrs(&self) -> &[(String, AttrValue)] {
		&self.attrs
	}

	/// First attribute value with the given name.
	pub fn get_attr(&self, name: &str) -> Option<&AttrValue> {
		self.attrs
			.iter()
			.find(|(attr, _)| attr == name)
			.map(|(_, value)| value)
	}

	pub fn child_nodes(&self) -> &[BlockNode] {
		&self.children
	}

	fn for_each_indexed<'a>(&'a self, f: &mut impl FnMut(&'a IndexedName)) {
		for (_, value) in &self.attrs {
			if let AttrValue::Indexed(name) = value {
				f(name);
			}
		}
		for child in &self.children {
			child.for_each_indexed(&mut *f);
		}
	}

	fn reindex_in_place(&mut self, prefix: &str, index: usize) -> usize {
		let mut rewritten = 0;
		for (_, value) in &mut self.attrs {
			if let AttrValue::Indexed(name) = value
				&& name.prefix == prefix
			{
				name.index = index;
				rewritten += 1;
			}
		}
		for child in &mut self.children {
			rewritten += child.reindex_in_place(prefix, index);
		}
		rewritten
	}

	fn render_into(&self, output: &mut String) {
		output.push('<');
		output.push_str(&self.tag);
		for (name, value) in &self.attrs {
			output.push(' ');
			output.push_str(name);
			output.push_str("=\"");
			output.push_str(&html_escape(&value.render()));
			output.push('"');
		}
		if is_void_element(&self.tag) {
			output.push_str(" />");
			return;
		}
		output.push('>');
		for child in &self.children {
			child.render_into(output);
		}
		output.push_str("</");
		output.push_str(&self.tag);
		output.push('>');
	}
}

impl BlockNode {
	fn for_each_indexed<'a>(&'a self, f: &mut impl FnMut(&'a IndexedName)) {
		match self {
			BlockNode::Element(el) => el.for_each_indexed(f),
			BlockNode::Fragment(nodes) => {
				for node in nodes {
					node.for_each_indexed(&mut *f);
				}
			}
			BlockNode::Text(_) => {}
		}
	}

	fn reindex_in_place(&mut self, prefix: &str, index: usize) -> usize {
		match self {
			BlockNode::Element(el) => el.reindex_in_place(prefix, index),
			BlockNode::Fragment(nodes) => nodes
				.iter_mut()
				.map(|n| n.reindex_in_place(prefix, index))
				.sum(),
			BlockNode::Text(_) => 0,
		}
	}

	fn render_into(&self, output: &mut String) {
		match self {
			BlockNode::Element(el) => el.render_into(output),
			BlockNode::Text(text) => output.push_str(&html_escape(text)),
			BlockNode::Fragment(nodes) => nodes.iter().for_each(|n| n.render_into(output)),
		}
	}
}

/// Reindexing of one form block.
pub trait Reindex {
	/// Points every index marker of `prefix` at `index` and returns the
	/// number of markers rewritten.
	fn reindex(&mut self, prefix: &FormPrefix, index: usize) -> usize;
}

/// HTML rendering of a form block.
pub trait RenderHtml {
	fn to_html(&self) -> Cow<'_, str>;
}

/// One formset form as a typed element tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormBlock {
	root: BlockElement,
}

impl FormBlock {
	pub fn new(root: BlockElement) -> Self {
		Self { root }
	}

	pub fn root(&self) -> &BlockElement {
		&self.root
	}

	/// Every indexed marker in document order.
	pub fn indexed_names(&self) -> Vec<&IndexedName> {
		let mut names = Vec::new();
		self.root.for_each_indexed(&mut |name| names.push(name));
		names
	}

	/// The index shared by all markers of `prefix`, or `None` when the block
	/// has no such markers or they disagree.
	pub fn index(&self, prefix: &FormPrefix) -> Option<usize> {
		let mut indices = self
			.indexed_names()
			.into_iter()
			.filter(|name| name.prefix == prefix.as_str())
			.map(|name| name.index);
		let first = indices.next()?;
		indices.all(|index| index == first).then_some(first)
	}

	/// Renders the block as HTML.
	pub fn render_to_string(&self) -> String {
		let mut output = String::new();
		self.root.render_into(&mut output);
		output
	}
}

impl RenderHtml for FormBlock {
	fn to_html(&self) -> Cow<'_, str> {
		Cow::Owned(self.render_to_string())
	}
}

impl Reindex for FormBlock {
	fn reindex(&mut self, prefix: &FormPrefix, index: usize) -> usize {
		self.root.reindex_in_place(prefix.as_str(), index)
	}
}
