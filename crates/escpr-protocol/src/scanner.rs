//! Stream scanner
//!
//! Walks a captured ESC/P-R stream and separates command tokens from embedded
//! raster payloads. The buffer is split on the escape byte; each piece is a
//! token that either starts a command, starts a raw data block, or is an
//! artifact of the split (binary payload that happened to contain `0x1B`).
//!
//! ```text
//!            first byte 'd' or "(d"
//!  Commands ─────────────────────────▶ DataBlock
//!     ▲                                    │
//!     └──── token contains "ESCPR" ◀───────┘
//! ```
//!
//! Raster payloads are never tokenized. The block ends at the first later
//! token containing the `ESCPR` trailer marker; the token that opened the
//! block is never checked for the marker.

use std::collections::HashMap;

use tracing::{debug, trace};

use crate::command::Command;
use crate::header::{CommandHeader, ESC, HEADER_LEN};

/// Maximum number of bytes after the header considered as parameters
pub const MAX_PARAMETER_WINDOW: usize = 41;

/// Marker that terminates a raw data block
pub const DATA_END_MARKER: &[u8] = b"ESCPR";

/// Scanner state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanState {
    /// Tokens are decoded as commands
    #[default]
    ScanningCommands,
    /// Tokens belong to an opaque raster payload
    InsideDataBlock,
}

/// Whether a token opens a raw data block
fn is_data_start(token: &[u8]) -> bool {
    token.starts_with(b"d") || token.starts_with(b"(d")
}

/// Whether a token looks like a command (first byte is a lowercase letter)
fn is_command_token(token: &[u8]) -> bool {
    token.first().is_some_and(|b| b.is_ascii_lowercase())
}

/// Locate the first occurrence of `needle` in `haystack`
pub fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Iterator over the commands of one buffer, in stream order
pub struct StreamScanner<'a> {
    tokens: std::slice::Split<'a, u8, fn(&u8) -> bool>,
    state: ScanState,
}

impl<'a> StreamScanner<'a> {
    /// Start scanning a buffer
    pub fn new(buffer: &'a [u8]) -> Self {
        let is_esc: fn(&u8) -> bool = |b| *b == ESC;
        Self {
            tokens: buffer.split(is_esc),
            state: ScanState::default(),
        }
    }

    /// Current state
    pub fn state(&self) -> ScanState {
        self.state
    }

    /// Advance the state machine by one token
    ///
    /// Returns the decoded command if the token was one.
    fn step(&mut self, token: &[u8]) -> Option<Command> {
        match self.state {
            ScanState::InsideDataBlock => {
                if find_subslice(token, DATA_END_MARKER).is_some() {
                    trace!("Leaving data block");
                    self.state = ScanState::ScanningCommands;
                }
                None
            }
            ScanState::ScanningCommands => {
                if is_data_start(token) {
                    trace!("Entering data block");
                    self.state = ScanState::InsideDataBlock;
                    return None;
                }
                if !is_command_token(token) {
                    return None;
                }
                let header = CommandHeader::from_token(token);
                if !header.is_complete() {
                    debug!("{}-byte token shorter than a header", token.len());
                }
                let end = token.len().min(HEADER_LEN + MAX_PARAMETER_WINDOW);
                let params = token.get(HEADER_LEN..end).unwrap_or_default();
                Some(Command::decode(header, params))
            }
        }
    }
}

impl Iterator for StreamScanner<'_> {
    type Item = Command;

    fn next(&mut self) -> Option<Command> {
        loop {
            let token = self.tokens.next()?;
            if let Some(cmd) = self.step(token) {
                return Some(cmd);
            }
        }
    }
}

/// Every command in a buffer, in stream order, repeated headers included
pub fn scan(buffer: &[u8]) -> Vec<Command> {
    StreamScanner::new(buffer).collect()
}

/// Decoded commands of one buffer keyed by header
///
/// Iteration follows first-insertion order; a later command with the same
/// header replaces the earlier one in place, so only the last occurrence's
/// parameters survive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandCollection {
    entries: Vec<Command>,
    index: HashMap<CommandHeader, usize>,
}

impl CommandCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan a buffer into a collection
    pub fn from_bytes(buffer: &[u8]) -> Self {
        StreamScanner::new(buffer).collect()
    }

    /// Insert a command, replacing any previous one with the same header
    pub fn insert(&mut self, cmd: Command) {
        let header = cmd.header();
        match self.index.get(&header) {
            Some(&pos) => self.entries[pos] = cmd,
            None => {
                self.index.insert(header, self.entries.len());
                self.entries.push(cmd);
            }
        }
    }

    pub fn get(&self, header: &CommandHeader) -> Option<&Command> {
        self.index.get(header).map(|&pos| &self.entries[pos])
    }

    pub fn contains(&self, header: &CommandHeader) -> bool {
        self.index.contains_key(header)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (CommandHeader, &Command)> {
        self.entries.iter().map(|cmd| (cmd.header(), cmd))
    }

    pub fn commands(&self) -> &[Command] {
        &self.entries
    }
}

impl FromIterator<Command> for CommandCollection {
    fn from_iter<I: IntoIterator<Item = Command>>(iter: I) -> Self {
        let mut collection = Self::new();
        for cmd in iter {
            collection.insert(cmd);
        }
        collection
    }
}
