//! Platform quirk hooks
//!
//! One-shot register pokes that are board mitigation, not controller
//! logic: the brown-out detector trips spuriously when the sensor rail
//! powers up, and the ADC power domain has to be released by hand before
//! deep sleep.

use tracing::debug;

pub trait Platform {
    /// Disarm the brown-out detector. Called once at boot, before sensor
    /// power-up.
    fn disable_brownout_detector(&mut self);

    /// Release the ADC power domain held for sensor operation. Called at
    /// sleep entry on every exit path.
    fn release_adc_power(&mut self);
}

/// Host build: nothing to poke, just trace the calls.
pub struct HostPlatform;

impl Platform for HostPlatform {
    fn disable_brownout_detector(&mut self) {
        debug!("platform: brown-out detector disabled (no-op on host)");
    }

    fn release_adc_power(&mut self) {
        debug!("platform: adc power released (no-op on host)");
    }
}
