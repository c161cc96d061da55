//! Captured frame buffer

/// On-wire format of a captured frame. The sensor delivers compressed
/// frames only; there is exactly one format today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameFormat {
    Jpeg,
}

impl FrameFormat {
    /// Content type used when the frame is handed to an upload transport.
    pub fn content_type(&self) -> &'static str {
        match self {
            FrameFormat::Jpeg => "image/jpg",
        }
    }
}

/// A single captured frame.
///
/// There is at most one `CaptureFrame` alive at a time: the capture service
/// hands ownership to the caller, the uploader borrows it for the transmit
/// call, and it is dropped immediately after regardless of outcome.
#[derive(Debug)]
pub struct CaptureFrame {
    bytes: Vec<u8>,
    format: FrameFormat,
}

impl CaptureFrame {
    pub fn new(bytes: Vec<u8>, format: FrameFormat) -> Self {
        Self { bytes, format }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn format(&self) -> FrameFormat {
        self.format
    }
}
