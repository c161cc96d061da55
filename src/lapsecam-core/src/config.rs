//! Device configuration

use serde::{Deserialize, Serialize};

use crate::store::ConfigError;
use crate::window::TimeOfDay;

/// Daily time-of-day interval during which capture is nominally permitted.
///
/// Advisory only today: the controller records the verdict but captures
/// regardless unless window enforcement is switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptureWindow {
    pub start_hour: u8,
    pub start_minute: u8,
    pub end_hour: u8,
    pub end_minute: u8,
}

impl Default for CaptureWindow {
    fn default() -> Self {
        Self {
            start_hour: 6,
            start_minute: 0,
            end_hour: 22,
            end_minute: 0,
        }
    }
}

impl CaptureWindow {
    pub fn start(&self) -> TimeOfDay {
        TimeOfDay::new(self.start_hour, self.start_minute)
    }

    pub fn end(&self) -> TimeOfDay {
        TimeOfDay::new(self.end_hour, self.end_minute)
    }

    pub fn is_valid(&self) -> bool {
        self.start_hour < 24 && self.end_hour < 24 && self.start_minute < 60 && self.end_minute < 60
    }

    /// "start end" description pushed to the control plane.
    pub fn describe(&self) -> String {
        format!("{} {}", self.start(), self.end())
    }
}

/// User-tunable device configuration.
///
/// Owned exclusively by the duty-cycle controller; mutated only during the
/// awake control session and persisted on change. Deep sleep does not keep
/// RAM alive, so everything here must survive through the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    /// Deep sleep interval between wake cycles, in seconds. Must be > 0.
    pub sleep_interval_secs: u32,

    pub capture_window: CaptureWindow,

    /// Light the assist output during capture.
    pub use_illumination_assist: bool,

    /// Consult the wall clock for the capture-window verdict.
    pub use_time_gate: bool,

    /// Frame upload endpoint.
    pub endpoint_url: String,

    /// Optional bearer credential for the upload endpoint.
    pub upload_auth: Option<String>,

    pub wifi_ssid: String,
    pub wifi_secret: String,

    /// Control-plane session credential.
    pub control_auth: String,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            sleep_interval_secs: 10,
            capture_window: CaptureWindow::default(),
            use_illumination_assist: false,
            use_time_gate: true,
            endpoint_url: String::new(),
            upload_auth: None,
            wifi_ssid: String::new(),
            wifi_secret: String::new(),
            control_auth: String::new(),
        }
    }
}

impl DeviceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sleep_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "sleep_interval_secs must be greater than zero".to_string(),
            ));
        }
        if !self.capture_window.is_valid() {
            return Err(ConfigError::Invalid(format!(
                "capture window bounds out of range: {}",
                self.capture_window.describe()
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        DeviceConfig::default().validate().unwrap();
    }

    #[test]
    fn zero_sleep_interval_is_rejected() {
        let config = DeviceConfig {
            sleep_interval_secs: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_window_is_rejected() {
        let config = DeviceConfig {
            capture_window: CaptureWindow {
                start_hour: 25,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn window_describes_both_bounds() {
        assert_eq!(CaptureWindow::default().describe(), "6:00 22:00");
    }
}
