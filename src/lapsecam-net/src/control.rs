//! Control-plane channel boundary
//!
//! Inbound events carry remote configuration writes and free-text terminal
//! input; outbound updates mirror the dashboard fields the device keeps
//! current while it is awake.

use crate::error::{ConnectError, ControlError};

/// Inbound event from the control plane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ControlEvent {
    /// New deep-sleep interval in seconds.
    SetSleepInterval(u32),

    /// New capture window bounds as (hour, minute) pairs.
    SetCaptureWindow { start: (u8, u8), end: (u8, u8) },

    /// One-shot request to light the assist output on the next capture.
    /// Acknowledged back to the dashboard so the trigger resets.
    TriggerIllumination,

    /// Enable or disable the time gate.
    SetTimeGate(bool),

    /// Free-text terminal input, parsed with [`TerminalCommand::parse`].
    Terminal(String),
}

/// Recognized terminal commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    /// Clear the remote diagnostic log.
    Clear,

    /// Abort the cycle and boot again.
    Restart,

    /// Anything else, echoed back verbatim.
    Unknown(String),
}

impl TerminalCommand {
    /// Parse one line of terminal input. Blank input is ignored.
    pub fn parse(input: &str) -> Option<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return None;
        }

        Some(match trimmed {
            "clear" => TerminalCommand::Clear,
            "restart" | "reset" => TerminalCommand::Restart,
            other => TerminalCommand::Unknown(other.to_string()),
        })
    }
}

/// Outbound status push.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusUpdate {
    /// Current status string ("OK" or a diagnostic error).
    Status(String),

    /// Local network identity description.
    Identity(String),

    /// Link signal strength in dBm.
    SignalStrength(i32),

    FirmwareVersion(String),

    /// Current device time as "H:MM".
    CurrentTime(String),

    /// Configured capture window as "H:MM H:MM".
    CaptureWindow(String),

    /// Effective sleep interval echoed after a remote write.
    SleepInterval(u32),

    /// Resets the one-shot illumination trigger on the dashboard.
    IlluminationAck,

    /// Line appended to the remote terminal.
    Terminal(String),

    /// Clears the remote terminal/diagnostic log.
    ClearLog,
}

/// Control-plane session transport.
#[allow(async_fn_in_trait)]
pub trait ControlChannel {
    /// Authenticate and open the session on top of an established link.
    async fn open(&mut self, auth: &str) -> Result<(), ConnectError>;

    /// Fetch the next pending inbound event, if any.
    async fn poll_event(&mut self) -> Result<Option<ControlEvent>, ControlError>;

    async fn push(&mut self, update: StatusUpdate) -> Result<(), ControlError>;

    /// Close the session. Must be safe to call when already closed.
    async fn close(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_recognizes_clear() {
        assert_eq!(TerminalCommand::parse("clear"), Some(TerminalCommand::Clear));
    }

    #[test]
    fn parse_accepts_both_restart_spellings() {
        assert_eq!(
            TerminalCommand::parse("restart"),
            Some(TerminalCommand::Restart)
        );
        assert_eq!(
            TerminalCommand::parse("reset"),
            Some(TerminalCommand::Restart)
        );
    }

    #[test]
    fn parse_ignores_blank_input() {
        assert_eq!(TerminalCommand::parse(""), None);
        assert_eq!(TerminalCommand::parse("\r\n"), None);
        assert_eq!(TerminalCommand::parse("   "), None);
    }

    #[test]
    fn parse_falls_back_to_unknown() {
        assert_eq!(
            TerminalCommand::parse("selfdestruct"),
            Some(TerminalCommand::Unknown("selfdestruct".to_string()))
        );
    }
}
