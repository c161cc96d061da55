//! Image sensor driver boundary

use crate::error::SensorError;

/// Frame sizes the sensor can be configured for.
///
/// Only the sizes the device actually uses are listed; SXGA needs the
/// high-memory frame buffer, VGA fits in internal RAM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameSize {
    Qvga,
    Vga,
    Svga,
    Xga,
    Sxga,
    Uxga,
}

/// Sensor wiring for the board.
///
/// Defaults match the AI-Thinker module layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorPins {
    pub power_down: i8,
    pub reset: i8,
    pub xclk: i8,
    pub sda: i8,
    pub scl: i8,
    pub data: [i8; 8],
    pub vsync: i8,
    pub href: i8,
    pub pixel_clock: i8,
    /// Output driving the illumination-assist light.
    pub illumination: i8,
}

impl Default for SensorPins {
    fn default() -> Self {
        Self {
            power_down: 32,
            reset: -1, // not wired
            xclk: 0,
            sda: 26,
            scl: 27,
            data: [5, 18, 19, 21, 36, 39, 34, 35],
            vsync: 25,
            href: 23,
            pixel_clock: 22,
            illumination: 4,
        }
    }
}

/// Sensor configuration applied at init.
#[derive(Debug, Clone, Copy)]
pub struct SensorProfile {
    pub pins: SensorPins,
    pub frame_size: FrameSize,
    /// 0-63, lower is higher quality. Too low can fail capture at large sizes.
    pub jpeg_quality: u8,
    pub xclk_freq_hz: u32,
    /// More than one buffer puts the bus in continuous mode; keep at 1.
    pub frame_buffer_count: u8,
}

impl Default for SensorProfile {
    fn default() -> Self {
        Self {
            pins: SensorPins::default(),
            frame_size: FrameSize::Sxga,
            jpeg_quality: 20,
            xclk_freq_hz: 20_000_000,
            frame_buffer_count: 1,
        }
    }
}

/// Register-level sensor driver.
///
/// Implementations wrap the actual camera stack; tests substitute doubles.
pub trait SensorDriver {
    /// Power the sensor up and apply `profile`.
    fn init(&mut self, profile: &SensorProfile) -> Result<(), SensorError>;

    /// Read one compressed frame out of the sensor.
    fn acquire(&mut self) -> Result<Vec<u8>, SensorError>;

    /// Drop sensor power. Must be safe to call when already powered down.
    fn power_down(&mut self);

    /// Whether the board has the optional high-memory frame buffer
    /// required for the largest frame sizes.
    fn has_highmem_buffer(&self) -> bool;
}
