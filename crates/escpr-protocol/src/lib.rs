//! ESC/P-R 2 Protocol Library
//!
//! This crate decodes and encodes the binary command stream that Epson ESC/P-R 2
//! inkjet printers receive inside an IPP print job. A stream is a sequence of
//! escape-prefixed commands interleaved with raw raster data blocks:
//!
//! ```text
//! 1B 'j' 16 00 00 00 "setj" [22 parameter bytes]   job start
//! 1B 'p' 00 00 00 00 "sttp"                        page start
//! 1B 'd' ... raster payload ... "ESCPR" trailer    data block
//! ```
//!
//! # Architecture
//!
//! - [`header`]: the 9-byte command header used as the command's key
//! - [`layout`]: fixed-width big-endian parameter field layouts
//! - [`command`]: the command registry, typed decode/encode, the unknown-command fallback
//! - [`scanner`]: splits a raw buffer into commands, skipping raster blocks
//! - [`inspect`]: rendering and directional diffs of decoded collections
//!
//! Decoding never fails: headers missing from the registry decode as
//! [`UnknownCommand`].
//!
//! # Example
//!
//! ```rust
//! use escpr_protocol::{fields, CommandCollection, CommandKind, EncodeCommand, KnownCommand};
//!
//! let check = KnownCommand::new(CommandKind::CheckPrintSetting)
//!     .with(fields::NON_CHECK_PRINT_MODE, 1)
//!     .unwrap();
//! let bytes = check.encode();
//!
//! let collection = CommandCollection::from_bytes(&bytes);
//! let decoded = collection.get(&CommandKind::CheckPrintSetting.header()).unwrap();
//! assert_eq!(decoded.as_known(), Some(&check));
//! ```

pub mod command;
pub mod error;
pub mod header;
pub mod inspect;
pub mod layout;
pub mod scanner;

pub use command::{fields, registry, Command, CommandKind, KnownCommand, UnknownCommand};
pub use error::ProtocolError;
pub use header::{CommandHeader, ESC, HEADER_LEN};
pub use layout::{Field, FieldFormat, ParameterLayout};
pub use scanner::{find_subslice, scan, CommandCollection, ScanState, StreamScanner};

/// Trait for commands that can be encoded to bytes
pub trait EncodeCommand {
    /// Encode this command to its wire format, escape byte included
    fn encode(&self) -> Vec<u8>;
}
