//! ESC/P-R 2 Job Patching Engine
//!
//! This crate rewrites print jobs captured on their way to an Epson printer
//! so that the printer applies a chosen color-management and media policy.
//!
//! # Architecture
//!
//! - [`tables`]: paper geometry to media-size id, media type to color LUT
//! - [`lookup`]: reads paper and media identifiers out of a raw job buffer
//! - [`mode`]: the operator-selected [`PrintMode`]
//! - [`engine`]: the two-stage [`PatchEngine`]
//! - [`interceptor`]: the request hook a proxy calls for every submission
//!
//! Print modes:
//!
//! - **Auto**: LUT picked from the job's media type (default)
//! - **ColorManagementOff**: fixed LUT, printer color management disabled
//! - **MonochromeCalibrated**: fixed monochrome LUT plus an ABWP calibration command
//!
//! # Example
//!
//! ```rust
//! use escpr_patch::{Interception, PrintMode, RequestInterceptor, SendDocumentInterceptor};
//!
//! let interceptor = SendDocumentInterceptor::new(PrintMode::ColorManagementOff);
//!
//! // Not an IPP Send-Document request: forwarded as is
//! let outcome = interceptor.intercept_request("POST", b"GET /ipp/print");
//! assert_eq!(outcome, Interception::PassThrough);
//! ```

pub mod engine;
pub mod error;
pub mod interceptor;
pub mod lookup;
pub mod mode;
pub mod tables;

pub use engine::{PatchConfig, PatchEngine, PatchSummary, Patched};
pub use error::PatchError;
pub use interceptor::{
    Interception, IppVersion, RequestInterceptor, SendDocumentInterceptor, IPP_1_1_SEND_DOCUMENT,
    IPP_2_0_SEND_DOCUMENT,
};
pub use lookup::{media_type_id, paper_dimensions, paper_size_id};
pub use mode::{ParsePrintModeError, PrintMode};
pub use tables::{msid, mtid, DEFAULT_LUT};
