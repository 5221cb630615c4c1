//! Request interception boundary
//!
//! The host proxy hands over each request's method and body and applies the
//! returned [`Interception`]. Only IPP Send-Document submissions are touched.

use escpr_protocol::find_subslice;
use tracing::{debug, error, info};

use crate::engine::PatchEngine;
use crate::mode::PrintMode;

/// Send-Document operation marker of IPP 1.1 requests (Windows clients)
pub const IPP_1_1_SEND_DOCUMENT: [u8; 4] = [0x01, 0x01, 0x00, 0x06];

/// Send-Document operation marker of IPP 2.0 requests (Linux clients)
pub const IPP_2_0_SEND_DOCUMENT: [u8; 4] = [0x02, 0x00, 0x00, 0x06];

/// IPP version of a recognized Send-Document request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IppVersion {
    V1_1,
    V2_0,
}

impl IppVersion {
    /// Detect a Send-Document request by its operation marker
    pub fn detect(body: &[u8]) -> Option<Self> {
        if find_subslice(body, &IPP_1_1_SEND_DOCUMENT).is_some() {
            Some(Self::V1_1)
        } else if find_subslice(body, &IPP_2_0_SEND_DOCUMENT).is_some() {
            Some(Self::V2_0)
        } else {
            None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::V1_1 => "IPPv1.1",
            Self::V2_0 => "IPPv2",
        }
    }
}

/// What to do with an intercepted request body
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Interception {
    /// Forward the body unchanged
    PassThrough,
    /// Forward this body instead (possibly empty)
    Replace(Vec<u8>),
}

impl Interception {
    /// Body to forward given the original one
    pub fn apply(self, original: Vec<u8>) -> Vec<u8> {
        match self {
            Self::PassThrough => original,
            Self::Replace(body) => body,
        }
    }
}

/// Hook invoked by the host proxy for every request
pub trait RequestInterceptor {
    fn intercept_request(&self, method: &str, body: &[u8]) -> Interception;
}

/// Rewrites print jobs submitted with IPP Send-Document
#[derive(Debug, Clone, Default)]
pub struct SendDocumentInterceptor {
    engine: PatchEngine,
}

impl SendDocumentInterceptor {
    pub fn new(print_mode: PrintMode) -> Self {
        Self::with_engine(PatchEngine::new(print_mode))
    }

    pub fn with_engine(engine: PatchEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &PatchEngine {
        &self.engine
    }
}

impl RequestInterceptor for SendDocumentInterceptor {
    fn intercept_request(&self, method: &str, body: &[u8]) -> Interception {
        if method != "POST" {
            return Interception::PassThrough;
        }
        debug!("Detected POST");

        let Some(version) = IppVersion::detect(body) else {
            return Interception::PassThrough;
        };
        info!("Detected Send-Document {}", version.name());

        match self.engine.patch(body) {
            Ok(patched) => Interception::Replace(patched),
            Err(e) => {
                // Unresolved jobs are dropped, never forwarded unpatched
                error!("{}, dropping document", e);
                Interception::Replace(Vec::new())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use escpr_protocol::{fields, CommandKind, EncodeCommand, KnownCommand};

    fn send_document(marker: [u8; 4], width: i64, length: i64) -> Vec<u8> {
        let mut body = marker.to_vec();
        body.extend(
            KnownCommand::new(CommandKind::JobStart)
                .with(fields::PAPER_WIDTH, width)
                .unwrap()
                .with(fields::PAPER_LENGTH, length)
                .unwrap()
                .encode(),
        );
        body
    }

    #[test]
    fn test_detect_versions() {
        assert_eq!(
            IppVersion::detect(&[0x00, 0x01, 0x01, 0x00, 0x06]),
            Some(IppVersion::V1_1)
        );
        assert_eq!(
            IppVersion::detect(&[0x02, 0x00, 0x00, 0x06]),
            Some(IppVersion::V2_0)
        );
        assert_eq!(IppVersion::detect(&[0x02, 0x00, 0x00, 0x0B]), None);
    }

    #[test]
    fn test_only_post_is_patched() {
        let interceptor = SendDocumentInterceptor::default();
        let body = send_document(IPP_2_0_SEND_DOCUMENT, 2976, 4209);
        assert_eq!(
            interceptor.intercept_request("GET", &body),
            Interception::PassThrough
        );
        assert!(matches!(
            interceptor.intercept_request("POST", &body),
            Interception::Replace(b) if b.len() > body.len()
        ));
    }

    #[test]
    fn test_both_ipp_versions_patched() {
        let interceptor = SendDocumentInterceptor::new(PrintMode::ColorManagementOff);
        for marker in [IPP_1_1_SEND_DOCUMENT, IPP_2_0_SEND_DOCUMENT] {
            let body = send_document(marker, 3060, 3960);
            assert!(matches!(
                interceptor.intercept_request("POST", &body),
                Interception::Replace(_)
            ));
        }
    }

    #[test]
    fn test_non_ipp_post_passes_through() {
        let interceptor = SendDocumentInterceptor::default();
        assert_eq!(
            interceptor.intercept_request("POST", b"hello"),
            Interception::PassThrough
        );
    }

    #[test]
    fn test_unresolved_paper_size_drops_document() {
        let interceptor = SendDocumentInterceptor::default();
        let body = send_document(IPP_2_0_SEND_DOCUMENT, 9999, 9999);
        let outcome = interceptor.intercept_request("POST", &body);
        assert_eq!(outcome, Interception::Replace(Vec::new()));
        assert!(outcome.apply(body).is_empty());
    }
}
