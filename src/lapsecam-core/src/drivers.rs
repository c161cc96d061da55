//! Hosted stand-ins for the device peripherals
//!
//! The real sensor, radio, and control-plane drivers live in the board
//! support package. These implementations keep the host binary runnable:
//! the sensor serves a canned (or on-disk) frame, the link assumes the OS
//! network is already up, and the control channel is silent.

use std::path::PathBuf;

use tracing::{debug, info};

use lapsecam_capture::{IlluminationOutput, SensorDriver, SensorError, SensorProfile};
use lapsecam_net::{
    ConnectError, ControlChannel, ControlError, ControlEvent, LinkError, LinkIdentity, NetworkLink,
    StatusUpdate,
};

/// Minimal JPEG served when no source file is configured.
const PLACEHOLDER_JPEG: &[u8] = &[
    0xff, 0xd8, 0xff, 0xe0, 0x00, 0x10, b'J', b'F', b'I', b'F', 0x00, 0xff, 0xd9,
];

#[derive(Default)]
pub struct HostedSensor {
    source: Option<PathBuf>,
    powered: bool,
}

impl HostedSensor {
    /// Serve frames from a JPEG on disk instead of the placeholder.
    pub fn with_source(path: PathBuf) -> Self {
        Self {
            source: Some(path),
            powered: false,
        }
    }
}

impl SensorDriver for HostedSensor {
    fn init(&mut self, profile: &SensorProfile) -> Result<(), SensorError> {
        debug!("hosted sensor up at {:?}", profile.frame_size);
        self.powered = true;
        Ok(())
    }

    fn acquire(&mut self) -> Result<Vec<u8>, SensorError> {
        if !self.powered {
            return Err(SensorError::InvalidState);
        }
        match &self.source {
            Some(path) => std::fs::read(path).map_err(|_| SensorError::NotFound),
            None => Ok(PLACEHOLDER_JPEG.to_vec()),
        }
    }

    fn power_down(&mut self) {
        self.powered = false;
    }

    fn has_highmem_buffer(&self) -> bool {
        true
    }
}

pub struct HostedIllumination;

impl IlluminationOutput for HostedIllumination {
    fn set(&mut self, on: bool) {
        debug!("illumination {}", if on { "on" } else { "off" });
    }

    fn hold(&mut self, latched: bool) {
        debug!("illumination hold {}", if latched { "latched" } else { "released" });
    }
}

/// Assumes the host OS network is already associated.
#[derive(Default)]
pub struct HostedLink {
    up: bool,
}

impl NetworkLink for HostedLink {
    async fn connect(&mut self, ssid: &str, _secret: &str) -> Result<(), LinkError> {
        debug!("hosted link: assuming OS networking covers {:?}", ssid);
        self.up = true;
        Ok(())
    }

    fn is_up(&self) -> bool {
        self.up
    }

    fn rssi(&self) -> i32 {
        0
    }

    fn identity(&self) -> LinkIdentity {
        LinkIdentity {
            ip: "127.0.0.1".to_string(),
            gateway: "127.0.0.1".to_string(),
            netmask: "255.0.0.0".to_string(),
            dns: "127.0.0.1".to_string(),
        }
    }

    async fn disconnect(&mut self) {
        self.up = false;
    }
}

/// Control plane without a server: accepts the session, never delivers
/// events, routes status pushes to the log.
pub struct HostedControl;

impl ControlChannel for HostedControl {
    async fn open(&mut self, _auth: &str) -> Result<(), ConnectError> {
        Ok(())
    }

    async fn poll_event(&mut self) -> Result<Option<ControlEvent>, ControlError> {
        Ok(None)
    }

    async fn push(&mut self, update: StatusUpdate) -> Result<(), ControlError> {
        info!("status push: {:?}", update);
        Ok(())
    }

    async fn close(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hosted_sensor_requires_power() {
        let mut sensor = HostedSensor::default();
        assert_eq!(sensor.acquire(), Err(SensorError::InvalidState));

        sensor.init(&SensorProfile::default()).unwrap();
        let frame = sensor.acquire().unwrap();
        assert_eq!(&frame[..2], &[0xff, 0xd8]);

        sensor.power_down();
        assert_eq!(sensor.acquire(), Err(SensorError::InvalidState));
    }
}
