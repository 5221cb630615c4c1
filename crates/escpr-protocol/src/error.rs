//! Error types for ESC/P-R command decoding and encoding

use thiserror::Error;

/// Errors raised by the command registry and codec
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    /// A command type declares a parameter length that its field layout does not add up to
    #[error("layout mismatch for {command}: declared {declared} parameter bytes, fields use {computed}")]
    LayoutMismatch {
        command: &'static str,
        declared: usize,
        computed: usize,
    },

    /// Field name is not part of the command's layout
    #[error("{command} has no field named {field}")]
    UnknownField {
        command: &'static str,
        field: String,
    },

    /// Value does not fit the field's width or signedness
    #[error("value {value} does not fit field {field}")]
    ValueOutOfRange { field: &'static str, value: i64 },
}
