//! ESC/P-R command header
//!
//! Every command on the wire is prefixed by the escape byte followed by a
//! 9-byte header that doubles as the command's identity:
//!
//! ```text
//! 1B [class] [len] 00 00 00 [n0] [n1] [n2] [n3] [params...]
//! ```
//!
//! - `class`: lowercase ASCII command-class letter (`j`, `m`, `p`, `q`, `u`, ...)
//! - `len`: parameter length in bytes, followed by three zero bytes
//! - `n0..n3`: 4-byte ASCII command name (`setj`, `sttp`, ...)
//!
//! Tokens cut short by the next escape byte still get a header: it holds
//! whatever bytes were present and never matches a registered command.

use std::fmt;

/// Escape byte that introduces every command
pub const ESC: u8 = 0x1B;

/// Length of a command header, not counting the escape byte
pub const HEADER_LEN: usize = 9;

/// Command header used as the unique key of a command type
///
/// Complete headers are [`HEADER_LEN`] bytes long. Unused bytes of a short
/// header are zero and excluded from [`as_bytes`](Self::as_bytes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CommandHeader {
    bytes: [u8; HEADER_LEN],
    len: u8,
}

impl CommandHeader {
    /// Build a header from its class letter, parameter length and 4-byte name
    pub const fn new(class: u8, parameter_length: u8, name: [u8; 4]) -> Self {
        Self {
            bytes: [
                class,
                parameter_length,
                0x00,
                0x00,
                0x00,
                name[0],
                name[1],
                name[2],
                name[3],
            ],
            len: HEADER_LEN as u8,
        }
    }

    /// Take the first [`HEADER_LEN`] bytes of a token as a header
    ///
    /// Returns `None` if the token is too short to carry a header.
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        let header = Self::from_token(bytes.get(..HEADER_LEN)?);
        Some(header)
    }

    /// Header of a token, keeping at most [`HEADER_LEN`] bytes
    ///
    /// Shorter tokens yield a short header.
    pub fn from_token(token: &[u8]) -> Self {
        let len = token.len().min(HEADER_LEN);
        let mut bytes = [0u8; HEADER_LEN];
        bytes[..len].copy_from_slice(&token[..len]);
        Self {
            bytes,
            len: len as u8,
        }
    }

    /// Whether the header has all [`HEADER_LEN`] bytes
    pub const fn is_complete(&self) -> bool {
        self.len as usize == HEADER_LEN
    }

    /// Raw header bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..usize::from(self.len)]
    }

    /// Command-class letter
    pub const fn class(&self) -> u8 {
        self.bytes[0]
    }

    /// Declared parameter length
    pub const fn parameter_length(&self) -> u8 {
        self.bytes[1]
    }

    /// 4-byte command name, or what is left of it in a short header
    pub fn name(&self) -> &[u8] {
        self.as_bytes().get(5..).unwrap_or(&[])
    }

    /// Escape byte followed by the header, as it appears in a stream
    pub fn to_esc_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(HEADER_LEN + 1);
        out.push(ESC);
        out.extend_from_slice(self.as_bytes());
        out
    }
}

impl fmt::Display for CommandHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b\"{}\"", self.as_bytes().escape_ascii())
    }
}
