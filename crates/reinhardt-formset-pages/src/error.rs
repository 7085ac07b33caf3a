//! Errors raised while wiring the replicator to the page.

use reinhardt_formset_core::{ConfigError, FormsetError};
use wasm_bindgen::JsValue;

#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum ReplicatorError {
	#[error("Window object not available")]
	NoWindow,
	#[error("Document object not available")]
	NoDocument,
	#[error("Element #{id} not found")]
	MissingElement { id: String },
	#[error("Element #{id} is not an input element")]
	NotAnInput { id: String },
	#[error("DOM error: {0}")]
	Dom(String),
	#[error(transparent)]
	Formset(#[from] FormsetError),
	#[error(transparent)]
	Config(#[from] ConfigError),
}

pub type ReplicatorResult<T> = Result<T, ReplicatorError>;

impl From<ReplicatorError> for JsValue {
	fn from(err: ReplicatorError) -> Self {
		JsValue::from_str(&err.to_string())
	}
}

/// Readable message for an exception thrown by a DOM call.
pub(crate) fn js_error_message(err: &JsValue) -> String {
	err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
