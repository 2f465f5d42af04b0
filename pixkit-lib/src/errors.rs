//! Error types for Pix payload operations.
//!
//! Every error in this crate describes bad input data. None of them are
//! transient, so nothing here is worth retrying.

/// Error codes for FFI and mobile integration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum PixErrorCode {
    /// A required text field is blank
    MissingField = 1000,
    /// A text field exceeds its limit
    FieldTooLong = 1001,
    /// Amount is zero or negative
    NonPositiveAmount = 2000,
    /// Amount text is not a decimal number
    InvalidAmount = 2001,
    /// Transaction id exceeds its limit
    TransactionIdTooLong = 3000,
    /// A serialized field does not fit a two-digit length
    SerializedFieldOverflow = 4000,
    /// Payload text is not a valid TLV sequence
    MalformedPayload = 4001,
    /// Serialization/deserialization error
    Serialization = 5000,
    /// Symbol renderer failure
    Render = 6000,
}

/// Error type for Pix payload construction and encoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PixError {
    /// A required text field is empty or blank after trimming.
    #[error("missing required field: {field}")]
    MissingField {
        /// Field name
        field: &'static str,
    },

    /// A text field exceeds its length limit after trimming.
    #[error("{field} must have at most {limit} characters, '{value}' has {actual}")]
    FieldTooLong {
        /// Field name
        field: &'static str,
        /// Maximum number of characters
        limit: usize,
        /// Actual number of characters
        actual: usize,
        /// The offending (trimmed or formatted) value
        value: String,
    },

    /// Amount is zero or negative.
    #[error("amount must be greater than zero, got {amount}")]
    NonPositiveAmount {
        /// The rejected amount as text
        amount: String,
    },

    /// Amount text could not be parsed as a decimal.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// Transaction id exceeds 25 characters.
    #[error("transaction id must have at most {limit} characters, '{value}' has {actual}")]
    TransactionIdTooLong {
        /// Maximum number of characters
        limit: usize,
        /// Actual number of characters
        actual: usize,
        /// The rejected transaction id
        value: String,
    },

    /// A serialized field value cannot be length-prefixed with two digits.
    #[error("field {code} value has {actual} characters, the maximum is 99")]
    SerializedFieldOverflow {
        /// Two-digit field code
        code: String,
        /// Actual number of characters
        actual: usize,
    },

    /// Payload text could not be read back as TLV fields.
    #[error("malformed payload at position {position}: {reason}")]
    MalformedPayload {
        /// Character offset where reading failed
        position: usize,
        /// What was wrong
        reason: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// The symbol renderer rejected the payload.
    #[error("render error: {0}")]
    Render(String),
}

impl PixError {
    /// Get the error code for FFI/mobile integration.
    pub fn code(&self) -> PixErrorCode {
        match self {
            Self::MissingField { .. } => PixErrorCode::MissingField,
            Self::FieldTooLong { .. } => PixErrorCode::FieldTooLong,
            Self::NonPositiveAmount { .. } => PixErrorCode::NonPositiveAmount,
            Self::InvalidAmount(_) => PixErrorCode::InvalidAmount,
            Self::TransactionIdTooLong { .. } => PixErrorCode::TransactionIdTooLong,
            Self::SerializedFieldOverflow { .. } => PixErrorCode::SerializedFieldOverflow,
            Self::MalformedPayload { .. } => PixErrorCode::MalformedPayload,
            Self::Serialization(_) => PixErrorCode::Serialization,
            Self::Render(_) => PixErrorCode::Render,
        }
    }

    /// Get the error message as an owned String (useful for FFI).
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Always false: these are input errors and retrying yields the same result.
    pub fn is_retryable(&self) -> bool {
        false
    }

    /// Name of the offending field, when the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::MissingField { field } | Self::FieldTooLong { field, .. } => Some(*field),
            Self::NonPositiveAmount { .. } | Self::InvalidAmount(_) => Some("amount"),
            Self::TransactionIdTooLong { .. } => Some("transaction_id"),
            Self::SerializedFieldOverflow { code, .. } => Some(code.as_str()),
            _ => None,
        }
    }

    /// Create a missing field error.
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Create a field too long error.
    pub fn field_too_long(field: &'static str, limit: usize, value: impl Into<String>) -> Self {
        let value = value.into();
        Self::FieldTooLong {
            field,
            limit,
            actual: value.chars().count(),
            value,
        }
    }

    pub(crate) fn malformed(position: usize, reason: impl Into<String>) -> Self {
        Self::MalformedPayload {
            position,
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for PixError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
