//! lapsecam-capture - Image sensor lifecycle for Lapsecam
//!
//! Owns the sensor power-up/configure/acquire/power-down sequence and the
//! illumination-assist output, behind driver traits so the same service runs
//! against real silicon or test doubles.

pub mod error;
pub mod frame;
pub mod illumination;
pub mod sensor;
pub mod service;

pub use error::{AcquireError, SensorError};
pub use frame::{CaptureFrame, FrameFormat};
pub use illumination::IlluminationOutput;
pub use sensor::{FrameSize, SensorDriver, SensorPins, SensorProfile};
pub use service::CaptureService;
