//! Duty-cycle controller
//!
//! One wake cycle: boot, camera init, connectivity, control session,
//! window decision, capture, upload, report, sleep. Every path ends in
//! sleep entry (or an explicit restart back to boot); no failure is
//! allowed to keep the device awake.

use std::time::Duration;

use tracing::{debug, info, warn};

use lapsecam_capture::CaptureService;
use lapsecam_net::{Connectivity, ControlChannel, ControlEvent, NetworkLink, RetryBudget, StatusUpdate};
use lapsecam_upload::{UploadSink, UploadTarget};

use crate::config::{CaptureWindow, DeviceConfig};
use crate::platform::Platform;
use crate::store::ConfigStore;
use crate::window::{is_within_window, TimeSource};

/// Version tag pushed to the control plane.
const FIRMWARE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// How long the control session is pumped for pending writes each cycle.
const CONTROL_SESSION_BUDGET: Duration = Duration::from_secs(5);

/// States of one wake cycle, in order. The terminal state is always
/// `SleepEntry`; there is no stay-awake state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleState {
    Boot,
    CameraInit,
    ConnectivityInit,
    ConfiguredAwait,
    WindowDecision,
    Capturing,
    Uploading,
    Reporting,
    SleepEntry,
}

/// Upload result recorded in the wake outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStatus {
    Ok,
    TransportError(u16),
    NoConnection,
    CameraUnavailable,
}

/// What one wake cycle accomplished. Transient: built at boot, recorded
/// at sleep entry, gone after that.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WakeOutcome {
    pub connected: bool,
    pub captured: bool,
    pub upload: UploadStatus,

    /// Window gate verdict, when one was computed. Advisory only.
    pub in_window: Option<bool>,

    /// Seconds until the next wake.
    pub next_sleep_secs: u32,
}

/// How the cycle ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleExit {
    /// Power down for this long, then boot again.
    Sleep(Duration),

    /// Remote restart: boot again immediately, no sleep.
    Restart,
}

/// Sequences one wake cycle over the hardware and network seams.
pub struct Controller<N, C, U> {
    config: DeviceConfig,
    store: Box<dyn ConfigStore>,
    clock: Box<dyn TimeSource>,
    platform: Box<dyn Platform>,
    capture: CaptureService,
    connectivity: Connectivity<N, C>,
    uploader: U,
    retry_budget: RetryBudget,
    session_budget: Duration,
    enforce_window: bool,
    state: CycleState,
}

impl<N, C, U> Controller<N, C, U>
where
    N: NetworkLink,
    C: ControlChannel,
    U: UploadSink,
{
    pub fn new(
        store: Box<dyn ConfigStore>,
        clock: Box<dyn TimeSource>,
        platform: Box<dyn Platform>,
        capture: CaptureService,
        connectivity: Connectivity<N, C>,
        uploader: U,
    ) -> Self {
        Self {
            config: DeviceConfig::default(),
            store,
            clock,
            platform,
            capture,
            connectivity,
            uploader,
            retry_budget: RetryBudget::default(),
            session_budget: CONTROL_SESSION_BUDGET,
            enforce_window: false,
            state: CycleState::Boot,
        }
    }

    pub fn set_retry_budget(&mut self, budget: RetryBudget) {
        self.retry_budget = budget;
    }

    pub fn set_session_budget(&mut self, budget: Duration) {
        self.session_budget = budget;
    }

    /// Make the window gate actually suppress capture.
    ///
    /// Off by default, deliberately: fielded devices capture on every wake
    /// and only record the gate verdict. Turning this on changes device
    /// behavior in the field; do it only on explicit product request.
    pub fn set_enforce_window(&mut self, enforce: bool) {
        self.enforce_window = enforce;
    }

    pub fn state(&self) -> CycleState {
        self.state
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    /// Run one full wake cycle. Always reaches sleep entry: peripherals
    /// and the link are released on every path before this returns.
    pub async fn run_cycle(&mut self) -> (WakeOutcome, CycleExit) {
        self.enter(CycleState::Boot);
        self.platform.disable_brownout_detector();

        self.config = match self.store.load() {
            Ok(config) => config,
            Err(e) => {
                warn!("persisted config unusable, using defaults: {}", e);
                DeviceConfig::default()
            }
        };

        let mut outcome = WakeOutcome {
            connected: false,
            captured: false,
            upload: UploadStatus::NoConnection,
            in_window: None,
            next_sleep_secs: self.config.sleep_interval_secs,
        };
        let mut diagnostic: Option<String> = None;

        self.enter(CycleState::CameraInit);
        let camera_ok = match self.capture.initialize() {
            Ok(()) => true,
            Err(e) => {
                warn!("camera init failed: {}", e);
                diagnostic = Some(e.to_string());
                false
            }
        };

        // Attempted even when the camera failed, so the failure can still
        // be reported upstream.
        self.enter(CycleState::ConnectivityInit);
        let ssid = self.config.wifi_ssid.clone();
        let secret = self.config.wifi_secret.clone();
        match self.connectivity.connect(&ssid, &secret, self.retry_budget).await {
            Ok(()) => outcome.connected = true,
            Err(e) => warn!("connectivity failed: {}", e),
        }

        let mut restart = false;
        if outcome.connected {
            let auth = self.config.control_auth.clone();
            match self.connectivity.open_session(&auth).await {
                Ok(()) => {
                    self.enter(CycleState::ConfiguredAwait);
                    let report = self.connectivity.run_session(self.session_budget).await;
                    self.apply_config_events(&report.config_events).await;
                    outcome.next_sleep_secs = self.config.sleep_interval_secs;

                    if let Err(e) = self.store.write_setup_marker(true) {
                        debug!("setup marker write failed: {}", e);
                    }

                    restart = report.restart_requested;
                }
                Err(e) => {
                    warn!("control session failed: {}", e);
                    diagnostic.get_or_insert(e.to_string());
                }
            }
        }

        if restart {
            info!("aborting cycle for remote restart");
            self.sleep_entry().await;
            return (outcome, CycleExit::Restart);
        }

        if outcome.connected && camera_ok {
            self.enter(CycleState::WindowDecision);
            let within = is_within_window(
                self.clock.now(),
                &self.config.capture_window,
                self.config.use_time_gate,
            );
            outcome.in_window = Some(within);

            // The gate verdict is advisory: capture proceeds regardless
            // unless enforcement was explicitly switched on.
            if !within {
                info!(
                    "outside capture window {}, capturing anyway",
                    self.config.capture_window.describe()
                );
            }

            if within || !self.enforce_window {
                self.enter(CycleState::Capturing);
                match self.capture.acquire(self.config.use_illumination_assist).await {
                    Ok(frame) => {
                        outcome.captured = true;

                        self.enter(CycleState::Uploading);
                        let target = UploadTarget {
                            url: self.config.endpoint_url.clone(),
                            auth_token: self.config.upload_auth.clone(),
                        };
                        match self.uploader.upload(&frame, &target).await {
                            Ok(code) => {
                                debug!("upload accepted, http status {}", code);
                                outcome.upload = UploadStatus::Ok;
                            }
                            Err(e) => {
                                warn!("upload failed: {}", e);
                                outcome.upload = UploadStatus::TransportError(e.code());
                                diagnostic.get_or_insert(e.to_string());
                            }
                        }
                        // frame dropped here: no retry buffer survives the cycle
                    }
                    Err(e) => {
                        warn!("capture failed: {}", e);
                        outcome.upload = UploadStatus::CameraUnavailable;
                        diagnostic.get_or_insert(e.to_string());
                    }
                }
            }
        } else if outcome.connected {
            // camera never came up; there is nothing to upload
            outcome.upload = UploadStatus::CameraUnavailable;
        }

        self.enter(CycleState::Reporting);
        self.report(diagnostic.as_deref()).await;

        self.sleep_entry().await;
        let sleep = Duration::from_secs(u64::from(outcome.next_sleep_secs));
        (outcome, CycleExit::Sleep(sleep))
    }

    /// Apply remote configuration writes and persist if anything changed.
    async fn apply_config_events(&mut self, events: &[ControlEvent]) {
        let mut changed = false;

        for event in events {
            match event {
                ControlEvent::SetSleepInterval(secs) => {
                    if *secs > 0 {
                        info!("sleep interval set to {} seconds", secs);
                        self.config.sleep_interval_secs = *secs;
                        changed = true;
                        let _ = self
                            .connectivity
                            .push(StatusUpdate::SleepInterval(*secs))
                            .await;
                    } else {
                        warn!("ignoring zero sleep interval");
                    }
                }
                ControlEvent::SetCaptureWindow { start, end } => {
                    let window = CaptureWindow {
                        start_hour: start.0,
                        start_minute: start.1,
                        end_hour: end.0,
                        end_minute: end.1,
                    };
                    if window.is_valid() {
                        info!("capture window set to {}", window.describe());
                        self.config.capture_window = window;
                        changed = true;
                    } else {
                        warn!("ignoring out-of-range capture window {}", window.describe());
                    }
                }
                ControlEvent::TriggerIllumination => {
                    info!("illumination assist enabled");
                    if !self.config.use_illumination_assist {
                        self.config.use_illumination_assist = true;
                        changed = true;
                    }
                }
                ControlEvent::SetTimeGate(enabled) => {
                    if self.config.use_time_gate != *enabled {
                        info!("time gate {}", if *enabled { "enabled" } else { "disabled" });
                        self.config.use_time_gate = *enabled;
                        changed = true;
                    }
                }
                // terminal input is consumed by the session pump
                ControlEvent::Terminal(_) => {}
            }
        }

        if changed {
            if let Err(e) = self.store.save(&self.config) {
                warn!("failed to persist config: {}", e);
            }
        }
    }

    /// Best-effort status pushes; failures here never block sleep.
    async fn report(&mut self, diagnostic: Option<&str>) {
        if !self.connectivity.has_session() {
            return;
        }

        let status = diagnostic.unwrap_or("OK").to_string();
        let _ = self.connectivity.push(StatusUpdate::Status(status)).await;

        let identity = self.connectivity.identity().describe();
        let _ = self.connectivity.push(StatusUpdate::Identity(identity)).await;

        let rssi = self.connectivity.rssi();
        let _ = self
            .connectivity
            .push(StatusUpdate::SignalStrength(rssi))
            .await;

        let _ = self
            .connectivity
            .push(StatusUpdate::FirmwareVersion(FIRMWARE_VERSION.to_string()))
            .await;

        if let Some(now) = self.clock.now() {
            let _ = self
                .connectivity
                .push(StatusUpdate::CurrentTime(now.to_string()))
                .await;
        }

        let window = self.config.capture_window.describe();
        let _ = self
            .connectivity
            .push(StatusUpdate::CaptureWindow(window))
            .await;
    }

    /// Tear everything down before power-down. Runs on every exit path,
    /// including restart; all releases are idempotent.
    async fn sleep_entry(&mut self) {
        self.enter(CycleState::SleepEntry);
        self.connectivity.disconnect().await;
        self.capture.release();
        self.platform.release_adc_power();
    }

    fn enter(&mut self, state: CycleState) {
        debug!("state -> {:?}", state);
        self.state = state;
    }
}
