//! Print mode selection

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Color lookup table forcing color management off
pub const LUT_COLOR_MANAGEMENT_OFF: u8 = 0x04;

/// Color lookup table for calibrated monochrome output
pub const LUT_MONOCHROME_CALIBRATED: u8 = 0x07;

/// Operator-selected policy for the injected color and calibration commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PrintMode {
    /// LUT follows the job's media type
    #[default]
    Auto,
    /// Fixed LUT with the printer's color management disabled
    #[serde(alias = "CmOff")]
    ColorManagementOff,
    /// Fixed monochrome LUT plus an ABWP calibration override
    #[serde(alias = "ABW")]
    MonochromeCalibrated,
}

impl PrintMode {
    pub const ALL: [PrintMode; 3] = [
        Self::Auto,
        Self::ColorManagementOff,
        Self::MonochromeCalibrated,
    ];

    /// Get human-readable name
    pub fn name(&self) -> &'static str {
        match self {
            Self::Auto => "Auto",
            Self::ColorManagementOff => "ColorManagementOff",
            Self::MonochromeCalibrated => "MonochromeCalibrated",
        }
    }

    /// Get description
    pub fn description(&self) -> &'static str {
        match self {
            Self::Auto => "Pick the color lookup table from the media type",
            Self::ColorManagementOff => "Print without printer-side color management",
            Self::MonochromeCalibrated => "Calibrated black-and-white photo output",
        }
    }

    /// LUT that does not depend on the job, if this mode has one
    pub fn fixed_lut(&self) -> Option<u8> {
        match self {
            Self::Auto => None,
            Self::ColorManagementOff => Some(LUT_COLOR_MANAGEMENT_OFF),
            Self::MonochromeCalibrated => Some(LUT_MONOCHROME_CALIBRATED),
        }
    }
}

impl fmt::Display for PrintMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unrecognized print mode name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown print mode '{0}' (expected Auto, ColorManagementOff or MonochromeCalibrated)")]
pub struct ParsePrintModeError(pub String);

impl FromStr for PrintMode {
    type Err = ParsePrintModeError;

    /// Case-insensitive; accepts the short names `CmOff` and `ABW`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "colormanagementoff" | "cmoff" => Ok(Self::ColorManagementOff),
            "monochromecalibrated" | "abw" => Ok(Self::MonochromeCalibrated),
            _ => Err(ParsePrintModeError(s.to_string())),
        }
    }
}
