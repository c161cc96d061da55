//! Capture orchestration: power-up, settle, acquire, power-down

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{AcquireError, SensorError};
use crate::frame::{CaptureFrame, FrameFormat};
use crate::illumination::{AssistLight, IlluminationOutput};
use crate::sensor::{FrameSize, SensorDriver, SensorProfile};

/// Wait after sensor power-up before reading a frame, so auto-exposure has
/// converged and the picture is not dark.
const SETTLE_DELAY: Duration = Duration::from_millis(1000);

/// Wait after switching the assist light on before capturing, so it reaches
/// full brightness.
const ASSIST_WARMUP: Duration = Duration::from_millis(500);

/// Owns the sensor lifecycle for one wake cycle.
pub struct CaptureService {
    sensor: Box<dyn SensorDriver>,
    illumination: Box<dyn IlluminationOutput>,
    profile: SensorProfile,
    ready: bool,
}

impl CaptureService {
    pub fn new(
        sensor: Box<dyn SensorDriver>,
        illumination: Box<dyn IlluminationOutput>,
        profile: SensorProfile,
    ) -> Self {
        Self {
            sensor,
            illumination,
            profile,
            ready: false,
        }
    }

    /// Power up and configure the sensor.
    ///
    /// If the board lacks the high-memory frame buffer the profile is
    /// downgraded to a size that fits internal RAM instead of failing.
    pub fn initialize(&mut self) -> Result<(), SensorError> {
        if !self.sensor.has_highmem_buffer() && needs_highmem(self.profile.frame_size) {
            warn!(
                "no high-memory frame buffer found, downgrading {:?} to {:?}",
                self.profile.frame_size,
                FrameSize::Vga
            );
            self.profile.frame_size = FrameSize::Vga;
        }

        self.sensor.init(&self.profile)?;
        self.ready = true;

        info!("sensor initialized at {:?}", self.profile.frame_size);
        Ok(())
    }

    /// Whether `initialize` has succeeded this cycle.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Acquire one frame, optionally under the assist light.
    ///
    /// Waits the fixed settle delay first. With assist, the light is held
    /// high only for the warm-up and the read itself; the hold latch is
    /// restored before returning on every path.
    pub async fn acquire(&mut self, use_assist: bool) -> Result<CaptureFrame, AcquireError> {
        if !self.ready {
            return Err(AcquireError::SensorReadFailed(SensorError::InvalidState));
        }

        debug!("waiting {:?} for exposure to settle", SETTLE_DELAY);
        tokio::time::sleep(SETTLE_DELAY).await;

        let read = if use_assist {
            let _light = AssistLight::on(&mut *self.illumination);
            tokio::time::sleep(ASSIST_WARMUP).await;
            self.sensor.acquire()
        } else {
            self.sensor.acquire()
        };
        let bytes = read.map_err(AcquireError::SensorReadFailed)?;

        debug!("captured frame, {} bytes", bytes.len());
        Ok(CaptureFrame::new(bytes, FrameFormat::Jpeg))
    }

    /// Drop sensor power. Safe to call at any point, including before a
    /// successful `initialize` or twice in a row.
    pub fn release(&mut self) {
        if self.ready {
            debug!("powering sensor down");
        }
        self.sensor.power_down();
        self.ready = false;
    }

    /// Frame size actually in effect (after any downgrade).
    pub fn frame_size(&self) -> FrameSize {
        self.profile.frame_size
    }
}

fn needs_highmem(size: FrameSize) -> bool {
    matches!(size, FrameSize::Sxga | FrameSize::Uxga)
}
