//! Error types for formset replication and management form handling.

/// Errors raised while reading or writing the management form.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ManagementFormError {
	#[error("ManagementForm data is missing or has been tampered with: {field} is missing")]
	Missing { field: String },
	#[error("ManagementForm field {field} has invalid value {value:?}")]
	Invalid { field: String, value: String },
}

/// Errors raised by the form replicator and formset hosts.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormsetError {
	#[error("Invalid formset prefix {prefix:?}")]
	InvalidPrefix { prefix: String },
	#[error("Form container has no template block to clone")]
	MissingTemplate,
	#[error("Total forms counter has non-numeric value {value:?}")]
	InvalidTotalForms { value: String },
	#[error("Total forms counter ({counter}) does not match the {blocks} blocks present")]
	CounterMismatch { counter: usize, blocks: usize },
	#[error("Formset already holds the maximum of {max_num} forms")]
	MaxFormsReached { max_num: usize },
	#[error(transparent)]
	Management(#[from] ManagementFormError),
	#[error("Formset host error: {0}")]
	Host(String),
}

pub type FormsetResult<T> = Result<T, FormsetError>;
