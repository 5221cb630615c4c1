//! Identifier derivation from a raw job buffer
//!
//! These read commands at fixed offsets after the first occurrence of their
//! escape-prefixed header, without scanning the whole stream. A window cut
//! short by the end of the buffer decodes its missing fields as zero.

use escpr_protocol::{fields, find_subslice, CommandKind, KnownCommand};
use tracing::{debug, info};

use crate::error::PatchError;
use crate::tables;

/// Decode the first command of `kind` found in `buffer`
fn first_command(buffer: &[u8], kind: CommandKind) -> Option<KnownCommand> {
    let marker = kind.esc_header();
    let start = find_subslice(buffer, &marker)? + marker.len();
    let end = buffer
        .len()
        .min(start + usize::from(kind.parameter_length()));
    Some(KnownCommand::decode(kind, &buffer[start..end]))
}

/// (PaperWidth, PaperLength) of the first job-start command
pub fn paper_dimensions(buffer: &[u8]) -> Option<(u32, u32)> {
    let job = first_command(buffer, CommandKind::JobStart)?;
    let width = u32::try_from(job.get(fields::PAPER_WIDTH)?).ok()?;
    let length = u32::try_from(job.get(fields::PAPER_LENGTH)?).ok()?;
    Some((width, length))
}

/// Media-size identifier of the job's paper, `None` when unresolved
pub fn paper_size_id(buffer: &[u8]) -> Option<u8> {
    resolve_paper_size(buffer).ok()
}

/// Media-size identifier of the job's paper
pub fn resolve_paper_size(buffer: &[u8]) -> Result<u8, PatchError> {
    let Some((width, length)) = paper_dimensions(buffer) else {
        debug!("No job-start command in buffer");
        return Err(PatchError::PaperSizeUnresolved {
            width: None,
            length: None,
        });
    };
    info!("Paper size: {}x{}", width, length);
    tables::paper_size_for(width, length).ok_or(PatchError::PaperSizeUnresolved {
        width: Some(width),
        length: Some(length),
    })
}

/// MediaTypeID of the first print-quality command
pub fn media_type_id(buffer: &[u8]) -> Option<u8> {
    let quality = first_command(buffer, CommandKind::PrintQuality)?;
    let id = u8::try_from(quality.get(fields::MEDIA_TYPE_ID)?).ok()?;
    info!("Media type id: {}", id);
    Some(id)
}

/// Color lookup table for the job's media type
pub fn resolve_media_lut(buffer: &[u8]) -> Result<u8, PatchError> {
    media_type_id(buffer)
        .map(tables::lut_for_media)
        .ok_or(PatchError::MediaTypeUnresolved)
}
