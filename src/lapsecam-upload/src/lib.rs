//! lapsecam-upload - Frame upload for Lapsecam
//!
//! One POST per wake cycle, fixed content type, bounded timeout. No retry
//! and no resumable upload: a failed attempt is reported and the next wake
//! tries again with a fresh frame.

pub mod error;

use std::time::Duration;

use tracing::{debug, info};

use lapsecam_capture::CaptureFrame;

pub use error::TransportError;

/// Hard cap on one upload attempt.
const UPLOAD_TIMEOUT: Duration = Duration::from_millis(5000);

/// Where the frame goes.
#[derive(Debug, Clone, Default)]
pub struct UploadTarget {
    pub url: String,

    /// Optional bearer credential for the endpoint.
    pub auth_token: Option<String>,
}

/// Transport seam for the controller; the HTTP implementation below is the
/// only production one.
#[allow(async_fn_in_trait)]
pub trait UploadSink {
    /// Transmit `frame` once. Returns the HTTP status on success.
    async fn upload(
        &self,
        frame: &CaptureFrame,
        target: &UploadTarget,
    ) -> Result<u16, TransportError>;
}

/// Single-POST uploader over reqwest.
pub struct HttpUploader {
    client: reqwest::Client,
}

impl HttpUploader {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .timeout(UPLOAD_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }
}

impl UploadSink for HttpUploader {
    async fn upload(
        &self,
        frame: &CaptureFrame,
        target: &UploadTarget,
    ) -> Result<u16, TransportError> {
        debug!("posting {} bytes to {}", frame.len(), target.url);

        let mut request = self
            .client
            .post(&target.url)
            .header("Content-Type", frame.format().content_type())
            .body(frame.bytes().to_vec());

        if let Some(token) = &target.auth_token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            info!("upload accepted with http status {}", status.as_u16());
            Ok(status.as_u16())
        } else {
            Err(TransportError::Status(status.as_u16()))
        }
    }
}
