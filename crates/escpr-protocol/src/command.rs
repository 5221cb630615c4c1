//! Command registry and typed codec
//!
//! The registry is the static catalogue of command types this crate knows how
//! to name. Each [`CommandKind`] carries its class letter, 4-byte name,
//! declared parameter length and [`ParameterLayout`]. Anything not in the
//! catalogue still decodes, as an [`UnknownCommand`].
//!
//! Decoded values are held as an ordered association between field name and
//! integer, built once from the layout. Equality is defined on the raw
//! parameter bytes, not on the decoded values.

use std::fmt;

use tracing::warn;

use crate::error::ProtocolError;
use crate::header::{CommandHeader, ESC, HEADER_LEN};
use crate::layout::{Field, FieldFormat, ParameterLayout};
use crate::EncodeCommand;

/// Field names referenced outside the registry
pub mod fields {
    pub const PAPER_WIDTH: &str = "PaperWidth";
    pub const PAPER_LENGTH: &str = "PaperLength";
    pub const MEDIA_TYPE_ID: &str = "MediaTypeID";
    pub const MEDIA_SIZE_ID: &str = "MediaSizeID";
    pub const DOCUMENT_TYPE: &str = "DocumentType";
    pub const COLOR_PLANE: &str = "ColorPlane";
    pub const LUT: &str = "LUT";
    pub const GAMMA_CORRECT: &str = "GammaCorrect";
    pub const MONO_GAMMA: &str = "MonoGamma";
    pub const NON_CHECK_PRINT_MODE: &str = "NonCheckPrintMode";
    pub const NEXT_PAGE: &str = "NextPage";
}

use FieldFormat::{I16Be, U16Be, U32Be, U64Be};

const JOB_START: ParameterLayout = ParameterLayout::new(&[
    Field::with_format(fields::PAPER_WIDTH, U32Be),
    Field::with_format(fields::PAPER_LENGTH, U32Be),
    Field::with_format("TopMargin", I16Be),
    Field::with_format("LeftMargin", I16Be),
    Field::with_format("PrintableAreaWidth", U32Be),
    Field::with_format("PrintableAreaLength", U32Be),
    Field::byte("InResolution"),
    Field::byte("PrintDirection"),
]);

const CUSTOM_PRINT_SETTING: ParameterLayout =
    ParameterLayout::new(&[Field::byte(fields::MEDIA_SIZE_ID)]);

const MECHA_ADDITIONAL_INFO: ParameterLayout = ParameterLayout::new(&[
    Field::byte("SingleBkPrintModePermission"),
    Field::with_format("PrintDensityForRubbingReductionPriority", U16Be),
    Field::byte("BottomEdgePrintQualityPriority"),
]);

const MECHA_ADDITIONAL_INFO_SHORT: ParameterLayout =
    ParameterLayout::new(&[Field::byte("SingleBkPrintModePermission")]);

const MECHA_SETTING: ParameterLayout = ParameterLayout::new(&[
    Field::byte(fields::MEDIA_SIZE_ID),
    Field::byte("BorderlessMode"),
    Field::byte("SkipBlankPage"),
    Field::byte(fields::DOCUMENT_TYPE),
    Field::byte("BkPrintMode"),
    Field::byte("BkInkSaveMode"),
    Field::byte("CrossDirectionMode"),
]);

const PAGE_IMAGE_PROCESSING: ParameterLayout = ParameterLayout::new(&[
    Field::with_format("MaxBottomY", U32Be),
    Field::byte("IDCardData"),
]);

const PAGE_NUM: ParameterLayout = ParameterLayout::new(&[Field::byte(fields::NEXT_PAGE)]);

const PAGE_QUALITY: ParameterLayout = ParameterLayout::new(&[
    Field::byte("ColorMono"),
    Field::byte(fields::COLOR_PLANE),
    Field::byte(fields::LUT),
    Field::with_format(fields::GAMMA_CORRECT, U16Be),
    Field::byte("PrintDuty"),
    Field::byte("Brightness"),
    Field::byte("Contrast"),
    Field::byte("Saturation"),
    Field::byte("R_Adjustment"),
    Field::byte("G_Adjustment"),
    Field::byte("B_Adjustment"),
]);

const PAGE_START: ParameterLayout = ParameterLayout::new(&[]);

const ABWP_SETTING: ParameterLayout = ParameterLayout::new(&[
    Field::with_format("CircleX", U32Be),
    Field::with_format("CircleY", U32Be),
    Field::with_format(fields::MONO_GAMMA, U32Be),
    Field::with_format("MonoBrightness", U32Be),
    Field::with_format("ShadowTonality", U32Be),
    Field::with_format("HighlightTonality", U32Be),
    Field::with_format("MaxOpticalDensity", U32Be),
    Field::with_format("HighlightPoint", U64Be),
]);

const IMAGE_PROCESSING: ParameterLayout = ParameterLayout::new(&[
    Field::byte("CompressMode"),
    Field::byte("StaticAPFSetting"),
    Field::byte("ConvertColorSpaceSetting"),
    Field::byte("BarcodeMode"),
    Field::byte("FaceOrder"),
    Field::byte("StandardFastMode"),
    Field::byte("OverCoatSetting"),
    Field::byte("GlossPrioritySetting"),
    Field::byte("HostAPFSetting"),
    Field::byte("BindingPosition"),
]);

const USER_MEDIA_ID_SETTING: ParameterLayout =
    ParameterLayout::new(&[Field::with_format("UserMediaTypeID", U32Be)]);

const PRINT_QUALITY: ParameterLayout = ParameterLayout::new(&[
    Field::byte(fields::MEDIA_TYPE_ID),
    Field::byte("PrintQuality"),
    Field::byte("ColorMono"),
    Field::byte("Brightness"),
    Field::byte("Contrast"),
    Field::byte("Saturation"),
    Field::byte(fields::COLOR_PLANE),
    Field::with_format("PaletteSize", U16Be),
]);

const CHECK_PRINT_SETTING: ParameterLayout = ParameterLayout::new(&[
    Field::byte(fields::NON_CHECK_PRINT_MODE),
    Field::byte("OffsetPrintingMode"),
]);

/// Registered command types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CommandKind {
    /// `j setj`: job start, paper geometry
    JobStart,
    /// `m setc`
    CustomPrintSetting,
    /// `m seti`, 4-byte form
    MechaAdditionalInfo,
    /// `m seti`, 1-byte form
    MechaAdditionalInfoShort,
    /// `m setm`: media size and document type
    MechaSetting,
    /// `p seti`
    PageImageProcessing,
    /// `p setn`
    PageNum,
    /// `p setq`: per-page color and LUT selection
    PageQuality,
    /// `p sttp`: page start marker, no parameters
    PageStart,
    /// `q setb`: advanced black-and-white photo settings
    AbwpSetting,
    /// `q seti`
    ImageProcessing,
    /// `q setl`
    UserMediaIdSetting,
    /// `q setq`: media type and print quality
    PrintQuality,
    /// `u chku`
    CheckPrintSetting,
}

impl CommandKind {
    /// Every registered command type
    pub const ALL: [CommandKind; 14] = [
        Self::JobStart,
        Self::CustomPrintSetting,
        Self::MechaAdditionalInfo,
        Self::MechaAdditionalInfoShort,
        Self::MechaSetting,
        Self::PageImageProcessing,
        Self::PageNum,
        Self::PageQuality,
        Self::PageStart,
        Self::AbwpSetting,
        Self::ImageProcessing,
        Self::UserMediaIdSetting,
        Self::PrintQuality,
        Self::CheckPrintSetting,
    ];

    /// Friendly name
    pub const fn name(self) -> &'static str {
        match self {
            Self::JobStart => "JobStart",
            Self::CustomPrintSetting => "CustomPrintSetting",
            Self::MechaAdditionalInfo => "MechaAdditionalInfo",
            Self::MechaAdditionalInfoShort => "MechaAdditionalInfoShort",
            Self::MechaSetting => "MechaSetting",
            Self::PageImageProcessing => "PageImageProcessing",
            Self::PageNum => "PageNum",
            Self::PageQuality => "PageQuality",
            Self::PageStart => "PageStart",
            Self::AbwpSetting => "ABWPSetting",
            Self::ImageProcessing => "ImageProcessing",
            Self::UserMediaIdSetting => "UserMediaIDSetting",
            Self::PrintQuality => "PrintQuality",
            Self::CheckPrintSetting => "CheckPrintSetting",
        }
    }

    /// Command-class letter
    pub const fn class(self) -> u8 {
        match self {
            Self::JobStart => b'j',
            Self::CustomPrintSetting
            | Self::MechaAdditionalInfo
            | Self::MechaAdditionalInfoShort
            | Self::MechaSetting => b'm',
            Self::PageImageProcessing | Self::PageNum | Self::PageQuality | Self::PageStart => {
                b'p'
            }
            Self::AbwpSetting
            | Self::ImageProcessing
            | Self::UserMediaIdSetting
            | Self::PrintQuality => b'q',
            Self::CheckPrintSetting => b'u',
        }
    }

    /// 4-byte ASCII command name
    pub const fn command_name(self) -> [u8; 4] {
        match self {
            Self::JobStart => *b"setj",
            Self::CustomPrintSetting => *b"setc",
            Self::MechaAdditionalInfo | Self::MechaAdditionalInfoShort => *b"seti",
            Self::MechaSetting => *b"setm",
            Self::PageImageProcessing => *b"seti",
            Self::PageNum => *b"setn",
            Self::PageQuality => *b"setq",
            Self::PageStart => *b"sttp",
            Self::AbwpSetting => *b"setb",
            Self::ImageProcessing => *b"seti",
            Self::UserMediaIdSetting => *b"setl",
            Self::PrintQuality => *b"setq",
            Self::CheckPrintSetting => *b"chku",
        }
    }

    /// Parameter length declared in the header
    pub const fn parameter_length(self) -> u8 {
        match self {
            Self::JobStart => 22,
            Self::CustomPrintSetting => 1,
            Self::MechaAdditionalInfo => 4,
            Self::MechaAdditionalInfoShort => 1,
            Self::MechaSetting => 7,
            Self::PageImageProcessing => 5,
            Self::PageNum => 1,
            Self::PageQuality => 12,
            Self::PageStart => 0,
            Self::AbwpSetting => 36,
            Self::ImageProcessing => 10,
            Self::UserMediaIdSetting => 4,
            Self::PrintQuality => 9,
            Self::CheckPrintSetting => 2,
        }
    }

    /// Field layout of the parameter block
    pub const fn layout(self) -> ParameterLayout {
        match self {
            Self::JobStart => JOB_START,
            Self::CustomPrintSetting => CUSTOM_PRINT_SETTING,
            Self::MechaAdditionalInfo => MECHA_ADDITIONAL_INFO,
            Self::MechaAdditionalInfoShort => MECHA_ADDITIONAL_INFO_SHORT,
            Self::MechaSetting => MECHA_SETTING,
            Self::PageImageProcessing => PAGE_IMAGE_PROCESSING,
            Self::PageNum => PAGE_NUM,
            Self::PageQuality => PAGE_QUALITY,
            Self::PageStart => PAGE_START,
            Self::AbwpSetting => ABWP_SETTING,
            Self::ImageProcessing => IMAGE_PROCESSING,
            Self::UserMediaIdSetting => USER_MEDIA_ID_SETTING,
            Self::PrintQuality => PRINT_QUALITY,
            Self::CheckPrintSetting => CHECK_PRINT_SETTING,
        }
    }

    /// 9-byte header identifying this command type
    pub const fn header(self) -> CommandHeader {
        CommandHeader::new(self.class(), self.parameter_length(), self.command_name())
    }

    /// Escape byte plus header, the byte pattern used to locate the command in a stream
    pub fn esc_header(self) -> [u8; HEADER_LEN + 1] {
        let mut out = [ESC; HEADER_LEN + 1];
        out[1..].copy_from_slice(self.header().as_bytes());
        out
    }

    /// Look up the command type for a header
    pub fn from_header(header: &CommandHeader) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.header() == *header)
    }

    /// Check that the layout adds up to the declared parameter length
    pub fn validate_layout(self) -> Result<(), ProtocolError> {
        self.layout()
            .validate(self.name(), usize::from(self.parameter_length()))
    }

    /// `class-name (FriendlyName)`, e.g. `j-setj (JobStart)`
    pub fn description(self) -> String {
        format!(
            "{}-{} ({})",
            char::from(self.class()),
            String::from_utf8_lossy(&self.command_name()),
            self.name()
        )
    }
}

// Layouts are static data; a mismatch is a build failure rather than a runtime fault.
const _: () = {
    let mut i = 0;
    while i < CommandKind::ALL.len() {
        let kind = CommandKind::ALL[i];
        assert!(kind.layout().width() == kind.parameter_length() as usize);
        i += 1;
    }
};

/// Registry-wide checks
pub mod registry {
    use super::CommandKind;
    use crate::error::ProtocolError;

    /// Validate every registered layout against its declared parameter length
    pub fn validate() -> Result<(), ProtocolError> {
        for kind in CommandKind::ALL {
            kind.validate_layout()?;
        }
        Ok(())
    }

    /// Number of registered command types
    pub fn len() -> usize {
        CommandKind::ALL.len()
    }
}

/// A command of a registered type with its decoded field values
#[derive(Debug, Clone)]
pub struct KnownCommand {
    kind: CommandKind,
    raw: Vec<u8>,
    values: Vec<i64>,
}

impl KnownCommand {
    /// New command of `kind` with every parameter zero
    pub fn new(kind: CommandKind) -> Self {
        let raw = vec![0u8; usize::from(kind.parameter_length())];
        Self {
            kind,
            values: vec![0; kind.layout().fields().len()],
            raw,
        }
    }

    /// Decode the parameter bytes of a known command
    ///
    /// Fields are unpacked in declaration order at increasing offsets. Bytes past
    /// the layout are kept in [`raw`](Self::raw) but not named; fields that the
    /// supplied bytes do not cover decode as zero.
    pub fn decode(kind: CommandKind, params: &[u8]) -> Self {
        let layout = kind.layout();
        let values: Vec<i64> = layout
            .offsets()
            .map(|(offset, field)| {
                params
                    .get(offset..offset + field.format.width())
                    .and_then(|bytes| field.format.read(bytes))
                    .unwrap_or(0)
            })
            .collect();

        let width = layout.width();
        if params.len() > width {
            warn!(
                "Unused bytes remaining in {}: {} byte(s) {:02X?}",
                kind.description(),
                params.len() - width,
                &params[width..]
            );
        } else if params.len() < width {
            warn!(
                "Truncated parameters for {}: got {} of {} bytes",
                kind.description(),
                params.len(),
                width
            );
        }

        Self {
            kind,
            raw: params.to_vec(),
            values,
        }
    }

    pub fn kind(&self) -> CommandKind {
        self.kind
    }

    pub fn header(&self) -> CommandHeader {
        self.kind.header()
    }

    /// Parameter bytes as received (or as last encoded)
    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Bytes beyond the layout that were not assigned to any field
    pub fn trailing(&self) -> &[u8] {
        self.raw.get(self.kind.layout().width()..).unwrap_or(&[])
    }

    /// Value of a field by name
    pub fn get(&self, name: &str) -> Option<i64> {
        self.kind
            .layout()
            .index_of(name)
            .map(|index| self.values[index])
    }

    /// Assign a field by name
    ///
    /// The raw parameter bytes are rebuilt from the field values, keeping any
    /// trailing bytes.
    pub fn set(&mut self, name: &str, value: i64) -> Result<(), ProtocolError> {
        let layout = self.kind.layout();
        let index = layout
            .index_of(name)
            .ok_or_else(|| ProtocolError::UnknownField {
                command: self.kind.name(),
                field: name.to_string(),
            })?;
        let field = layout.fields()[index];
        if !field.format.fits(value) {
            return Err(ProtocolError::ValueOutOfRange {
                field: field.name,
                value,
            });
        }

        self.values[index] = value;
        let trailing = self.trailing().to_vec();
        self.raw = self.encode_params();
        self.raw.extend_from_slice(&trailing);
        Ok(())
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, name: &str, value: i64) -> Result<Self, ProtocolError> {
        self.set(name, value)?;
        Ok(self)
    }

    /// `(name, value)` pairs in layout order
    pub fn fields(&self) -> impl Iterator<Item = (&'static str, i64)> + '_ {
        self.kind
            .layout()
            .fields()
            .iter()
            .zip(self.values.iter())
            .map(|(field, value)| (field.name, *value))
    }

    /// Field values packed according to the layout
    fn encode_params(&self) -> Vec<u8> {
        let layout = self.kind.layout();
        let mut out = Vec::with_capacity(layout.width());
        for (field, value) in layout.fields().iter().zip(&self.values) {
            field.format.write(*value, &mut out);
        }
        out
    }
}

impl PartialEq for KnownCommand {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind && self.raw == other.raw
    }
}

impl Eq for KnownCommand {}

impl EncodeCommand for KnownCommand {
    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + self.raw.len() + 9);
        out.push(ESC);
        out.extend_from_slice(self.kind.header().as_bytes());
        out.extend(self.encode_params());
        out
    }
}

impl fmt::Display for KnownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {{", self.kind.description())?;
        let layout = self.kind.layout();
        for (i, (field, value)) in layout.fields().iter().zip(&self.values).enumerate() {
            let sep = if i == 0 { " " } else { ", " };
            write!(f, "{}{}={}", sep, field.name, field.format.render(*value))?;
        }
        write!(f, " }}")
    }
}

/// A command whose header is not in the registry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand {
    pub header: CommandHeader,
    pub raw: Vec<u8>,
}

impl UnknownCommand {
    pub fn new(header: CommandHeader, raw: Vec<u8>) -> Self {
        Self { header, raw }
    }

    pub fn description(&self) -> String {
        format!("{} (Unknown)", self.header)
    }
}

impl EncodeCommand for UnknownCommand {
    fn encode(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(1 + HEADER_LEN + self.raw.len());
        out.push(ESC);
        out.extend_from_slice(self.header.as_bytes());
        out.extend_from_slice(&self.raw);
        out
    }
}

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "UnknownCommand ({}): b\"{}\"",
            self.header,
            self.raw.escape_ascii()
        )
    }
}

/// A decoded command, known or not
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Known(KnownCommand),
    Unknown(UnknownCommand),
}

impl Command {
    /// Decode a header and its parameter window
    ///
    /// Never fails: unregistered headers become [`Command::Unknown`].
    pub fn decode(header: CommandHeader, params: &[u8]) -> Self {
        match CommandKind::from_header(&header) {
            Some(kind) => Self::Known(KnownCommand::decode(kind, params)),
            None => Self::Unknown(UnknownCommand::new(header, params.to_vec())),
        }
    }

    pub fn header(&self) -> CommandHeader {
        match self {
            Self::Known(cmd) => cmd.header(),
            Self::Unknown(cmd) => cmd.header,
        }
    }

    pub fn raw(&self) -> &[u8] {
        match self {
            Self::Known(cmd) => cmd.raw(),
            Self::Unknown(cmd) => &cmd.raw,
        }
    }

    /// Registered type, if any
    pub fn kind(&self) -> Option<CommandKind> {
        match self {
            Self::Known(cmd) => Some(cmd.kind()),
            Self::Unknown(_) => None,
        }
    }

    /// Short description used in diff reports
    pub fn description(&self) -> String {
        match self {
            Self::Known(cmd) => cmd.kind().description(),
            Self::Unknown(cmd) => cmd.description(),
        }
    }

    pub fn as_known(&self) -> Option<&KnownCommand> {
        match self {
            Self::Known(cmd) => Some(cmd),
            Self::Unknown(_) => None,
        }
    }
}

impl From<KnownCommand> for Command {
    fn from(cmd: KnownCommand) -> Self {
        Self::Known(cmd)
    }
}

impl EncodeCommand for Command {
    fn encode(&self) -> Vec<u8> {
        match self {
            Self::Known(cmd) => cmd.encode(),
            Self::Unknown(cmd) => cmd.encode(),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Known(cmd) => cmd.fmt(f),
            Self::Unknown(cmd) => cmd.fmt(f),
        }
    }
}
