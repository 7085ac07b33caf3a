//! The live page as a formset host
//!
//! [`DomFormset`] exposes the container element and the total forms input
//! of a page to the core replicator. Cloned blocks are reindexed attribute by
//! attribute on the clone and its descendants, never in text content. Every
//! attribute is rewritten unless the configuration names the indexed ones.

use crate::error::{ReplicatorError, ReplicatorResult, js_error_message};
use reinhardt_formset_core::{
	FormPrefix, FormsetConfig, FormsetError, FormsetHost, FormsetResult, Reindex,
};
use std::borrow::Cow;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

/// Look up a required element by id.
pub fn require_element(document: &Document, id: &str) -> ReplicatorResult<Element> {
	document
		.get_element_by_id(id)
		.ok_or_else(|| ReplicatorError::MissingElement { id: id.to_string() })
}

/// Attributes rewritten in a cloned block; `None` means all of them.
type IndexedAttributes = Option<Rc<[String]>>;

/// A cloned form block, detached until appended.
#[derive(Debug, Clone)]
pub struct DomBlock {
	element: Element,
	indexed_attributes: IndexedAttributes,
}

impl DomBlock {
	pub fn element(&self) -> &Element {
		&self.element
	}

	fn selector(&self) -> String {
		match &self.indexed_attributes {
			Some(attributes) => attributes
				.iter()
				.map(|attr| format!("[{attr}]"))
				.collect::<Vec<_>>()
				.join(","),
			None => "*".to_string(),
		}
	}

	/// Name and value of each attribute of `element` that may carry markers.
	fn attribute_values(&self, element: &Element) -> Vec<(String, String)> {
		match &self.indexed_attributes {
			Some(attributes) => attributes
				.iter()
				.filter_map(|attr| element.get_attribute(attr).map(|value| (attr.clone(), value)))
				.collect(),
			None => {
				let attributes = element.attributes();
				(0..attributes.length())
					.filter_map(|i| attributes.item(i))
					.map(|attr| (attr.name(), attr.value()))
					.collect()
			}
		}
	}

	fn reindex_element(&self, element: &Element, prefix: &FormPrefix, index: usize) -> usize {
		let mut rewritten = 0;
		for (attr, value) in self.attribute_values(element) {
			let markers = prefix.count_markers(&value);
			if let Cow::Owned(new_value) = prefix.rewrite(&value, index) {
				match element.set_attribute(&attr, &new_value) {
					Ok(()) => rewritten += markers,
					Err(err) => {
						crate::warn_log!(
							"Could not rewrite {}={:?}: {}",
							attr,
							value,
							js_error_message(&err)
						);
					}
				}
			}
		}
		rewritten
	}
}

impl Reindex for DomBlock {
	fn reindex(&mut self, prefix: &FormPrefix, index: usize) -> usize {
		let mut rewritten = self.reindex_element(&self.element, prefix, index);

		let descendants = match self.element.query_selector_all(&self.selector()) {
			Ok(list) => list,
			Err(err) => {
				crate::error_log!("Could not walk cloned block: {}", js_error_message(&err));
				return rewritten;
			}
		};
		for i in 0..descendants.length() {
			if let Some(element) = descendants
				.item(i)
				.and_then(|node| node.dyn_into::<Element>().ok())
			{
				rewritten += self.reindex_element(&element, prefix, index);
			}
		}
		rewritten
	}
}

/// Form container and total forms input of a page.
#[derive(Debug, Clone)]
pub struct DomFormset {
	container: Element,
	total_forms: HtmlInputElement,
	indexed_attributes: IndexedAttributes,
}

impl DomFormset {
	/// Host rewriting every attribute of cloned blocks.
	pub fn new(container: Element, total_forms: HtmlInputElement) -> Self {
		Self {
			container,
			total_forms,
			indexed_attributes: None,
		}
	}

	/// Restrict the rewrite to the named attributes.
	pub fn with_indexed_attributes(
		mut self,
		attributes: impl IntoIterator<Item = String>,
	) -> Self {
		self.indexed_attributes = Some(attributes.into_iter().collect());
		self
	}

	/// Resolve the container and counter ids of `config` in `document`.
	pub fn from_document(document: &Document, config: &FormsetConfig) -> ReplicatorResult<Self> {
		let container = require_element(document, &config.container_id)?;
		let total_forms_id = config.total_forms_id();
		let total_forms = require_element(document, &total_forms_id)?
			.dyn_into::<HtmlInputElement>()
			.map_err(|_| ReplicatorError::NotAnInput { id: total_forms_id })?;

		let host = Self::new(container, total_forms);
		Ok(match &config.indexed_attributes {
			Some(attributes) => host.with_indexed_attributes(attributes.iter().cloned()),
			None => host,
		})
	}

	pub fn container(&self) -> &Element {
		&self.container
	}

	pub fn total_forms_input(&self) -> &HtmlInputElement {
		&self.total_forms
	}
}

impl FormsetHost for DomFormset {
	type Block = DomBlock;

	fn total_forms(&self) -> FormsetResult<String> {
		Ok(self.total_forms.value())
	}

	fn set_total_forms(&mut self, value: usize) -> FormsetResult<()> {
		self.total_forms.set_value(&value.to_string());
		Ok(())
	}

	fn block_count(&self) -> FormsetResult<usize> {
		Ok(self.container.child_element_count() as usize)
	}

	fn clone_template(&self) -> FormsetResult<Option<DomBlock>> {
		let Some(first) = self.container.first_element_child() else {
			return Ok(None);
		};
		let element = first
			.clone_node_with_deep(true)
			.map_err(|err| FormsetError::Host(js_error_message(&err)))?
			.dyn_into::<Element>()
			.map_err(|_| FormsetError::Host("Cloned template is not an element".to_string()))?;

		Ok(Some(DomBlock {
			element,
			indexed_attributes: self.indexed_attributes.clone(),
		}))
	}

	fn append_block(&mut self, block: DomBlock) -> FormsetResult<()> {
		self.container
			.append_child(&block.element)
			.map(|_| ())
			.map_err(|err| FormsetError::Host(js_error_message(&err)))
	}
}
