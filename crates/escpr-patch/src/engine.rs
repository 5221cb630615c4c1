//! Patch engine
//!
//! Rewrites a captured job in two stages, each anchored on the first
//! occurrence of an escape-prefixed command header:
//!
//! 1. After the page-start marker, insert a page-quality command whose LUT
//!    follows the print mode.
//! 2. Before the job-start command, insert the mechanical settings for the
//!    job's paper size (plus an ABWP calibration command in monochrome mode).
//!
//! Stage 1 output is what stage 2 searches. A missing marker skips its stage.
//! Every byte outside the two insertion points is carried through unchanged.

use escpr_protocol::inspect::describe_buffer;
use escpr_protocol::{fields, find_subslice, CommandKind, EncodeCommand, KnownCommand};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::PatchError;
use crate::lookup;
use crate::mode::PrintMode;
use crate::tables::DEFAULT_LUT;

/// ColorPlane forced into the page-quality command
pub const PAGE_COLOR_PLANE: i64 = 0x03;

/// GammaCorrect forced into the page-quality command
pub const PAGE_GAMMA_CORRECT: i64 = 0xDC;

/// MonoGamma of the ABWP calibration command
pub const CALIBRATION_MONO_GAMMA: i64 = 0xDC;

/// DocumentType of the injected mechanical setting
pub const MECHA_DOCUMENT_TYPE: i64 = 0x63;

/// Patch engine configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchConfig {
    /// Selected print mode
    pub print_mode: PrintMode,
}

/// What a patch run changed
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PatchSummary {
    /// Mode the job was patched with
    pub mode: PrintMode,
    /// LUT of the inserted page-quality command, if stage 1 ran
    pub lut: Option<u8>,
    /// Media-size identifier of the inserted mechanical setting, if stage 2 ran
    pub media_size_id: Option<u8>,
    /// Inserted command types in stream order
    pub injected: Vec<CommandKind>,
}

/// Rewritten buffer and what was done to it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Patched {
    pub buffer: Vec<u8>,
    pub summary: PatchSummary,
}

/// The patch engine
#[derive(Debug, Clone, Default)]
pub struct PatchEngine {
    config: PatchConfig,
}

impl PatchEngine {
    /// Create an engine for the given print mode
    pub fn new(print_mode: PrintMode) -> Self {
        Self::with_config(PatchConfig { print_mode })
    }

    /// Create with custom configuration
    pub fn with_config(config: PatchConfig) -> Self {
        Self { config }
    }

    /// Get the current configuration
    pub fn config(&self) -> &PatchConfig {
        &self.config
    }

    /// Get the print mode
    pub fn print_mode(&self) -> PrintMode {
        self.config.print_mode
    }

    /// Set the print mode
    pub fn set_print_mode(&mut self, mode: PrintMode) {
        self.config.print_mode = mode;
    }

    /// Rewrite a job buffer
    pub fn patch(&self, buffer: &[u8]) -> Result<Vec<u8>, PatchError> {
        self.patch_with_summary(buffer).map(|patched| patched.buffer)
    }

    /// Rewrite a job buffer, reporting what was inserted
    ///
    /// Fails with [`PatchError::PaperSizeUnresolved`] when the job-start
    /// command is present but its geometry is not in the paper-size table.
    pub fn patch_with_summary(&self, buffer: &[u8]) -> Result<Patched, PatchError> {
        debug!("Commands before patching:\n{}", describe_buffer(buffer));

        let mut summary = PatchSummary {
            mode: self.config.print_mode,
            ..Default::default()
        };
        let (buffer, quality_at) = self.insert_page_quality(buffer.to_vec(), &mut summary)?;
        let buffer = self.insert_mecha_settings(buffer, quality_at, &mut summary)?;

        debug!("Commands after patching:\n{}", describe_buffer(&buffer));
        Ok(Patched { buffer, summary })
    }

    /// LUT for the page-quality command
    ///
    /// `Auto` falls back to [`DEFAULT_LUT`] when the media type cannot be read.
    fn page_lut(&self, buffer: &[u8]) -> u8 {
        if let Some(lut) = self.config.print_mode.fixed_lut() {
            return lut;
        }
        match lookup::resolve_media_lut(buffer) {
            Ok(lut) => lut,
            Err(e) => {
                warn!("{}, using LUT {}", e, DEFAULT_LUT);
                DEFAULT_LUT
            }
        }
    }

    /// Stage 1: page-quality command right after the page-start marker
    ///
    /// Also returns the offset of the inserted command.
    fn insert_page_quality(
        &self,
        buffer: Vec<u8>,
        summary: &mut PatchSummary,
    ) -> Result<(Vec<u8>, Option<usize>), PatchError> {
        let marker = CommandKind::PageStart.esc_header();
        let Some(pos) = find_subslice(&buffer, &marker) else {
            debug!("No page-start command, skipping page quality");
            return Ok((buffer, None));
        };
        info!("Page start found at offset {}", pos);

        let lut = self.page_lut(&buffer);
        let page_quality = KnownCommand::new(CommandKind::PageQuality)
            .with(fields::COLOR_PLANE, PAGE_COLOR_PLANE)?
            .with(fields::GAMMA_CORRECT, PAGE_GAMMA_CORRECT)?
            .with(fields::LUT, i64::from(lut))?;
        info!("Inserting {}", page_quality);

        summary.lut = Some(lut);
        summary.injected.push(CommandKind::PageQuality);
        let at = pos + marker.len();
        Ok((splice(&buffer, at, &[page_quality]), Some(at)))
    }

    /// Stage 2: mechanical settings right before the job-start command
    fn insert_mecha_settings(
        &self,
        buffer: Vec<u8>,
        quality_at: Option<usize>,
        summary: &mut PatchSummary,
    ) -> Result<Vec<u8>, PatchError> {
        let marker = CommandKind::JobStart.esc_header();
        let Some(pos) = find_subslice(&buffer, &marker) else {
            debug!("No job-start command, skipping mechanical settings");
            return Ok(buffer);
        };
        info!("Job start found at offset {}", pos);

        let media_size_id = lookup::resolve_paper_size(&buffer)?;
        info!("Media size id: {}", media_size_id);

        let mut commands = Vec::with_capacity(4);
        if self.config.print_mode == PrintMode::MonochromeCalibrated {
            commands.push(
                KnownCommand::new(CommandKind::AbwpSetting)
                    .with(fields::MONO_GAMMA, CALIBRATION_MONO_GAMMA)?,
            );
        }
        // The printer only honours these three together
        commands.push(KnownCommand::new(CommandKind::MechaAdditionalInfo));
        commands.push(
            KnownCommand::new(CommandKind::MechaSetting)
                .with(fields::MEDIA_SIZE_ID, i64::from(media_size_id))?
                .with(fields::DOCUMENT_TYPE, MECHA_DOCUMENT_TYPE)?,
        );
        commands.push(
            KnownCommand::new(CommandKind::CheckPrintSetting)
                .with(fields::NON_CHECK_PRINT_MODE, 1)?,
        );

        summary.media_size_id = Some(media_size_id);
        let kinds = commands.iter().map(KnownCommand::kind);
        // Offsets index the same buffer; a job start ahead of the page start
        // puts these commands before the page-quality one
        if quality_at.is_some_and(|at| pos < at) {
            summary.injected.splice(0..0, kinds);
        } else {
            summary.injected.extend(kinds);
        }
        Ok(splice(&buffer, pos, &commands))
    }
}

/// Copy `buffer` with the encoded commands inserted at `at`
fn splice(buffer: &[u8], at: usize, commands: &[KnownCommand]) -> Vec<u8> {
    let (before, after) = buffer.split_at(at);
    let mut out = Vec::with_capacity(buffer.len() + commands.len() * 48);
    out.extend_from_slice(before);
    for cmd in commands {
        out.extend(cmd.encode());
    }
    out.extend_from_slice(after);
    out
}
