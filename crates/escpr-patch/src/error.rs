//! Error types for the patch engine

use thiserror::Error;

/// Errors that can occur while rewriting a print job
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// No print-quality command to read the media type from
    #[error("could not determine media type id")]
    MediaTypeUnresolved,

    /// Paper geometry missing from the job or absent from the paper-size table
    #[error("could not determine paper size{}", describe_dimensions(.width, .length))]
    PaperSizeUnresolved {
        /// Paper width from the job-start command, if one was found
        width: Option<u32>,
        /// Paper length from the job-start command, if one was found
        length: Option<u32>,
    },

    /// Protocol error
    #[error("protocol error: {0}")]
    Protocol(#[from] escpr_protocol::ProtocolError),
}

fn describe_dimensions(width: &Option<u32>, length: &Option<u32>) -> String {
    match (width, length) {
        (Some(w), Some(l)) => format!(" for {}x{}", w, l),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paper_size_message() {
        let err = PatchError::PaperSizeUnresolved {
            width: Some(9999),
            length: Some(9999),
        };
        assert_eq!(err.to_string(), "could not determine paper size for 9999x9999");

        let err = PatchError::PaperSizeUnresolved {
            width: None,
            length: None,
        };
        assert_eq!(err.to_string(), "could not determine paper size");
    }
}
