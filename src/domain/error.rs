//! Error types for mock generation

use thiserror::Error;

/// Errors that abort a `create` call. No partial object is ever returned alongside one of these.
#[derive(Debug, Error)]
pub enum MockError {
    /// A class-type property would re-enter a class that is already being expanded
    #[error("Circular class-type mock detected! Target: {target}; Property: {property}")]
    CircularMock { target: String, property: String },

    /// No handler in the dispatcher claimed the property
    #[error("No value handler claimed property '{property}' of class '{class}'")]
    UnhandledProperty { class: String, property: String },

    /// Class metadata could not be read
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Caller supplied options that cannot be honoured
    #[error("Invalid generation options: {0}")]
    InvalidOptions(String),

    /// Generated value did not match the requested Rust type
    #[error("Failed to convert generated mock: {0}")]
    Conversion(#[from] serde_json::Error),
}

/// Errors raised while reading class metadata
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetadataError {
    /// Class name is not registered
    #[error("Unknown class '{0}': no mock metadata registered")]
    UnknownClass(String),

    /// Class is registered but declares no mock directives
    #[error("Class '{0}' declares no mock properties")]
    NoDirectives(String),
}

/// Result type alias for generation
pub type MockResult<T> = Result<T, MockError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circular_message_names_target_and_property() {
        let err = MockError::CircularMock {
            target: "Man".to_string(),
            property: "son".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Circular class-type mock detected! Target: Man; Property: son"
        );
    }

    #[test]
    fn test_metadata_error_is_transparent() {
        let err: MockError = MetadataError::UnknownClass("Ghost".to_string()).into();
        assert_eq!(err.to_string(), "Unknown class 'Ghost': no mock metadata registered");
    }
}
