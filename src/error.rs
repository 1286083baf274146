use thiserror::Error;

/// The ways a mapping file can be rejected.
///
/// These are wrapped into an [`anyhow::Error`], use [`anyhow::Error::downcast_ref`] to get them back.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MappingError {
	#[error("invalid line {line_number} in mapping file: {line:?}")]
	InvalidLine {
		line_number: usize,
		line: String,
	},
	#[error("class {class:?} must be declared with a `CL:` line before any of its members")]
	MissingClass {
		class: String,
	},
	#[error("mapping file was made for a different jar, refusing to use it:\n   jar     {expected}\n   mapping {found}")]
	HashMismatch {
		/// The hash of the jar.
		expected: String,
		/// The hash given in the mapping file.
		found: String,
	},
	#[error("class {class:?} is declared more than once")]
	DuplicateClass {
		class: String,
	},
}
