//! Capture error types

use thiserror::Error;

/// Sensor driver failure causes.
///
/// The taxonomy is closed and exhaustively matched by callers; each variant
/// keeps a distinct display string so telemetry can tell them apart.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    #[error("out of memory")]
    OutOfMemory,

    #[error("invalid argument")]
    InvalidArgument,

    #[error("invalid state")]
    InvalidState,

    #[error("invalid size")]
    InvalidSize,

    #[error("requested resource not found")]
    NotFound,

    #[error("operation or feature not supported")]
    Unsupported,

    #[error("operation timed out")]
    Timeout,

    #[error("received response was invalid")]
    InvalidResponse,

    #[error("crc or checksum was invalid")]
    ChecksumInvalid,

    #[error("version was invalid")]
    VersionMismatch,

    #[error("mac address was invalid")]
    MacInvalid,

    #[error("generic sensor failure")]
    Failure,
}

/// Frame acquisition failure.
#[derive(Error, Debug)]
pub enum AcquireError {
    #[error("sensor read failed: {0}")]
    SensorReadFailed(#[source] SensorError),
}
