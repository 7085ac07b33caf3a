//! Page wiring for the form replicator
//!
//! [`FormReplicator::install`] waits for `DOMContentLoaded` (or runs at once
//! when the document is already parsed), resolves the add control, the form
//! container and the total forms input, and registers the click handler.
//! Every click runs one [`Replicator::add_form`] over the live DOM.
//!
//! ## Example
//!
//! ```ignore
//! use reinhardt_formset_pages::FormReplicator;
//! use reinhardt_formset_core::FormsetConfig;
//!
//! FormReplicator::new(FormsetConfig::default()).install()?;
//! ```

use crate::dom::{DomFormset, require_element};
use crate::error::{ReplicatorError, ReplicatorResult, js_error_message};
use reinhardt_formset_core::{FormsetConfig, Replicator};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event};

type EventClosure = Closure<dyn FnMut(Event)>;

/// Builds and attaches the click handler of one formset.
#[derive(Debug, Clone, Default)]
pub struct FormReplicator {
	config: FormsetConfig,
}

impl FormReplicator {
	pub fn new(config: FormsetConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &FormsetConfig {
		&self.config
	}

	/// Attach once the page's structure has loaded. The handler stays
	/// registered for the lifetime of the page.
	pub fn install(self) -> ReplicatorResult<()> {
		self.config.validate()?;
		let document = web_sys::window()
			.ok_or(ReplicatorError::NoWindow)?
			.document()
			.ok_or(ReplicatorError::NoDocument)?;

		if document.ready_state() != "loading" {
			return self.attach(&document).map(ReplicatorHandle::forget);
		}

		let target = document.clone();
		let on_ready: EventClosure = Closure::once(move |_event: Event| {
			match self.attach(&target) {
				Ok(handle) => handle.forget(),
				Err(err) => crate::error_log!("Form replicator not attached: {}", err),
			}
		});
		document
			.add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
			.map_err(|err| ReplicatorError::Dom(js_error_message(&err)))?;
		on_ready.forget();
		Ok(())
	}

	/// Resolve the page elements in `document` and register the click
	/// handler. Fails when any of the three elements is absent.
	pub fn attach(&self, document: &Document) -> ReplicatorResult<ReplicatorHandle> {
		self.config.validate()?;
		let button = require_element(document, &self.config.add_button_id)?;
		let host = Rc::new(RefCell::new(DomFormset::from_document(
			document,
			&self.config,
		)?));
		let replicator = Rc::new(Replicator::from_config(&self.config)?);

		let on_click: EventClosure = {
			let host = Rc::clone(&host);
			let replicator = Rc::clone(&replicator);
			Closure::wrap(Box::new(move |event: Event| {
				// The add control is often a button inside the form.
				event.prevent_default();
				if let Err(err) = add_form(&replicator, &host) {
					crate::error_log!("Failed to add form: {}", err);
				}
			}) as Box<dyn FnMut(_)>)
		};
		button
			.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
			.map_err(|err| ReplicatorError::Dom(js_error_message(&err)))?;

		crate::info_log!(
			"Form replicator attached to #{} (container #{})",
			self.config.add_button_id,
			self.config.container_id
		);

		Ok(ReplicatorHandle {
			button,
			host,
			replicator,
			on_click: Some(on_click),
		})
	}
}

fn add_form(replicator: &Replicator, host: &RefCell<DomFormset>) -> ReplicatorResult<usize> {
	let mut host = host
		.try_borrow_mut()
		.map_err(|_| ReplicatorError::Dom("Form container is busy".to_string()))?;
	let index = replicator.add_form(&mut *host)?;
	crate::debug_log!("Added form {} to #{}", index, host.container().id());
	Ok(index)
}

/// A registered click handler. Dropping the handle removes the listener;
/// [`ReplicatorHandle::forget`] keeps it for the lifetime of the page.
#[derive(Debug)]
pub struct ReplicatorHandle {
	button: Element,
	host: Rc<RefCell<DomFormset>>,
	replicator: Rc<Replicator>,
	on_click: Option<EventClosure>,
}

impl ReplicatorHandle {
	/// Run one activation without a click, returning the new form's index.
	pub fn add_form(&self) -> ReplicatorResult<usize> {
		add_form(&self.replicator, &self.host)
	}

	pub fn host(&self) -> Rc<RefCell<DomFormset>> {
		Rc::clone(&self.host)
	}

	/// Keep the listener registered after the handle is gone.
	pub fn forget(mut self) {
		if let Some(on_click) = self.on_click.take() {
			on_click.forget();
		}
	}
}

impl Drop for ReplicatorHandle {
	fn drop(&mut self) {
		if let Some(on_click) = self.on_click.take() {
			if let Err(err) = self
				.button
				.remove_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())
			{
				crate::warn_log!(
					"Could not remove click listener from #{}: {}",
					self.button.id(),
					js_error_message(&err)
				);
			}
		}
	}
}

/// Install the replicator from JavaScript. `config_json` uses the same keys
/// as the TOML settings; `undefined` keeps the defaults.
#[wasm_bindgen(js_name = installFormReplicator)]
pub fn install_form_replicator(config_json: Option<String>) -> Result<(), JsValue> {
	#[cfg(feature = "console_error_panic_hook")]
	console_error_panic_hook::set_once();

	let config = match config_json {
		Some(json) => FormsetConfig::from_json_str(&json).map_err(ReplicatorError::from)?,
		None => FormsetConfig::default(),
	};
	FormReplicator::new(config).install()?;
	Ok(())
}
