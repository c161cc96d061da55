//! Connectivity error types

use thiserror::Error;

/// Single link-layer connection attempt failure.
#[derive(Error, Debug, Clone)]
#[error("{0}")]
pub struct LinkError(pub String);

/// Failure to bring up the link or the control-plane session.
#[derive(Error, Debug)]
pub enum ConnectError {
    #[error("gave up after {attempts} connection attempts")]
    AttemptsExhausted { attempts: u32 },

    #[error("control session rejected: {0}")]
    Session(String),
}

/// Control-plane channel failure during an open session.
#[derive(Error, Debug)]
pub enum ControlError {
    #[error("control session is not open")]
    Closed,

    #[error("control transport error: {0}")]
    Transport(String),
}
