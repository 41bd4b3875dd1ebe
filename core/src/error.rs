//! Error type for manifest handling, circuit lookup and witness encoding.
use thiserror::Error;

/// Errors returned by the registry and the witness encoder
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WitgenError {
    /// Manifest source could not be read
    #[error("Error loading manifest: {0}")]
    ManifestLoad(String),

    /// Manifest JSON is malformed or describes an invalid ABI
    #[error("Error parsing manifest: {0}")]
    ManifestParse(String),

    /// Manifest bytecode is not valid base64
    #[error("Invalid base64 bytecode in manifest: {0}")]
    InvalidBytecodeEncoding(String),

    #[error("No circuit with key {0} found")]
    CircuitNotFound(String),

    #[error("Missing witness input: {0}")]
    MissingInput(String),

    /// Array input length differs from the declared length
    #[error("Length mismatch for {name}. Input length is {got} but circuit expects {want}")]
    LengthMismatch { name: String, got: usize, want: usize },

    /// Input value tag does not fit the parameter type
    #[error("Type mismatch for {name}: expected {expected}, got {found}")]
    TypeMismatch {
        name: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Negative value for {0}: only non-negative integers can be encoded")]
    NegativeValue(String),

    /// Value needs more hex digits than the slot holds
    #[error("Value for {name} needs {digits} hex digits but the slot holds {max_digits}")]
    WidthOverflow {
        name: String,
        digits: usize,
        max_digits: usize,
    },

    /// Circuit could not be written back out as manifest JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Input document entry that cannot be turned into a value
    #[error("Invalid input {name}: {reason}")]
    InvalidInput { name: String, reason: String },
}

/// Result type for witness generation
pub type Result<T> = std::result::Result<T, WitgenError>;
