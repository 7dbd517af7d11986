use thiserror::Error;

pub type Result<T> = std::result::Result<T, SplayError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SplayError {
	/// An absent key was handed to an operation that requires one.
	#[error("Invalid argument: {0}")]
	InvalidArgument(&'static str),

	#[error("Unsupported operation: {0} is not supported")]
	Unsupported(&'static str),

	/// A lookup and the mutation that followed it disagreed about the tree contents.
	#[error("Internal invariant violated: {0}")]
	InvariantViolation(String),

	#[error("Invalid stress configuration: {0}")]
	Config(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_error_messages() {
		assert_eq!(SplayError::InvalidArgument("null key").to_string(), "Invalid argument: null key");
		assert_eq!(SplayError::Unsupported("clear").to_string(), "Unsupported operation: clear is not supported");
		assert_eq!(
			SplayError::InvariantViolation("lookup and insert disagree".into()).to_string(),
			"Internal invariant violated: lookup and insert disagree"
		);
	}
}
