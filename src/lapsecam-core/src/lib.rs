//! lapsecam-core - Duty-cycle controller for Lapsecam
//!
//! Sequences one wake cycle (boot, camera init, connectivity, control
//! session, capture, upload, report) and computes the next deep-sleep
//! interval. Hardware and network specifics stay behind the trait seams
//! in the sibling crates.

pub mod config;
pub mod controller;
pub mod drivers;
pub mod platform;
pub mod store;
pub mod window;

pub use config::{CaptureWindow, DeviceConfig};
pub use controller::{Controller, CycleExit, CycleState, UploadStatus, WakeOutcome};
pub use store::{ConfigError, ConfigStore, FileStore};
pub use window::{is_within_window, SystemClock, TimeOfDay, TimeSource};
