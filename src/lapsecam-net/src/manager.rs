//! Connectivity manager: bounded-retry connect, session pump, teardown

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::control::{ControlChannel, ControlEvent, StatusUpdate, TerminalCommand};
use crate::error::{ConnectError, ControlError};
use crate::link::{LinkIdentity, NetworkLink};

/// Pause after the session opens so the server side finishes syncing its
/// state down to us before we start pulling events.
const SESSION_SYNC_DELAY: Duration = Duration::from_millis(2000);

/// Idle wait between event polls inside the session pump.
const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Fixed-count, fixed-delay connection retry budget.
///
/// No backoff: a bounded wake-cycle duration matters more than politeness
/// to the access point.
#[derive(Debug, Clone, Copy)]
pub struct RetryBudget {
    pub attempts: u32,
    pub delay: Duration,
}

impl Default for RetryBudget {
    fn default() -> Self {
        Self {
            attempts: 20,
            delay: Duration::from_millis(500),
        }
    }
}

/// What a control session produced.
#[derive(Debug, Default)]
pub struct SessionReport {
    /// Configuration writes received, in arrival order.
    pub config_events: Vec<ControlEvent>,

    /// A remote `restart` arrived; the cycle must abort and re-enter boot.
    pub restart_requested: bool,
}

/// Owns the link and the control-plane session layered on top of it.
pub struct Connectivity<N, C> {
    link: N,
    control: C,
    link_up: bool,
    session_open: bool,
}

impl<N: NetworkLink, C: ControlChannel> Connectivity<N, C> {
    pub fn new(link: N, control: C) -> Self {
        Self {
            link,
            control,
            link_up: false,
            session_open: false,
        }
    }

    /// Bring the link up, retrying within `budget`.
    pub async fn connect(
        &mut self,
        ssid: &str,
        secret: &str,
        budget: RetryBudget,
    ) -> Result<(), ConnectError> {
        info!("connecting to {}", ssid);

        for attempt in 1..=budget.attempts {
            match self.link.connect(ssid, secret).await {
                Ok(()) => {
                    self.link_up = true;
                    info!("connected to {} after {} attempt(s)", ssid, attempt);
                    return Ok(());
                }
                Err(e) => {
                    debug!("connection attempt {} failed: {}", attempt, e);
                    tokio::time::sleep(budget.delay).await;
                }
            }
        }

        warn!("giving up on {} after {} attempts", ssid, budget.attempts);
        Err(ConnectError::AttemptsExhausted {
            attempts: budget.attempts,
        })
    }

    /// Open the control-plane session and wait out the sync settle.
    pub async fn open_session(&mut self, auth: &str) -> Result<(), ConnectError> {
        self.control.open(auth).await?;
        self.session_open = true;

        debug!("control session open, waiting {:?} for sync", SESSION_SYNC_DELAY);
        tokio::time::sleep(SESSION_SYNC_DELAY).await;
        Ok(())
    }

    /// Pump the control session for at most `budget`.
    ///
    /// Terminal commands are handled here (clear, restart, unknown-echo);
    /// configuration writes are collected for the caller to apply and
    /// persist. A restart request ends the pump immediately.
    pub async fn run_session(&mut self, budget: Duration) -> SessionReport {
        let mut report = SessionReport::default();
        if !self.session_open {
            return report;
        }

        let deadline = tokio::time::Instant::now() + budget;

        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            if remaining.is_zero() {
                break;
            }

            let polled = tokio::time::timeout(remaining, self.control.poll_event()).await;
            match polled {
                Err(_) => break, // budget exhausted mid-poll
                Ok(Err(e)) => {
                    warn!("control channel error, ending session: {}", e);
                    break;
                }
                Ok(Ok(None)) => {
                    tokio::time::sleep(POLL_INTERVAL).await;
                }
                Ok(Ok(Some(ControlEvent::Terminal(text)))) => {
                    match TerminalCommand::parse(&text) {
                        None => {}
                        Some(TerminalCommand::Clear) => {
                            let _ = self.control.push(StatusUpdate::ClearLog).await;
                            let _ = self
                                .control
                                .push(StatusUpdate::Terminal("CLEARED".to_string()))
                                .await;
                        }
                        Some(TerminalCommand::Restart) => {
                            info!("remote restart requested");
                            let _ = self
                                .control
                                .push(StatusUpdate::Terminal("Restart, bye".to_string()))
                                .await;
                            report.restart_requested = true;
                            break;
                        }
                        Some(TerminalCommand::Unknown(cmd)) => {
                            let _ = self
                                .control
                                .push(StatusUpdate::Terminal(format!("unknown command: {}", cmd)))
                                .await;
                        }
                    }
                }
                Ok(Ok(Some(event))) => {
                    if event == ControlEvent::TriggerIllumination {
                        // one-shot trigger, reset the dashboard toggle
                        let _ = self.control.push(StatusUpdate::IlluminationAck).await;
                    }
                    report.config_events.push(event);
                }
            }
        }

        report
    }

    /// Best-effort status push; fails with [`ControlError::Closed`] when no
    /// session is open.
    pub async fn push(&mut self, update: StatusUpdate) -> Result<(), ControlError> {
        if !self.session_open {
            return Err(ControlError::Closed);
        }
        self.control.push(update).await
    }

    pub fn is_connected(&self) -> bool {
        self.link_up
    }

    pub fn has_session(&self) -> bool {
        self.session_open
    }

    pub fn rssi(&self) -> i32 {
        self.link.rssi()
    }

    pub fn identity(&self) -> LinkIdentity {
        self.link.identity()
    }

    /// Tear down session then link. Idempotent: a second call is a no-op.
    pub async fn disconnect(&mut self) {
        if self.session_open {
            self.control.close().await;
            self.session_open = false;
        }
        if self.link_up {
            self.link.disconnect().await;
            self.link_up = false;
            info!("link down");
        }
    }
}
