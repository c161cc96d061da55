//! Illumination-assist output with a sleep-safe hold latch
//!
//! The assist light shares a pin with a power domain that survives deep
//! sleep. The hold latch must be re-engaged whenever the light is off,
//! otherwise the pin floats during sleep and the light flickers.

pub trait IlluminationOutput {
    /// Drive the output high or low.
    fn set(&mut self, on: bool);

    /// Engage or release the hold latch that freezes the pin state across
    /// the sleep boundary.
    fn hold(&mut self, latched: bool);
}

/// Scoped assist-light activation.
///
/// Construction releases the latch and drives the output high; drop drives
/// it low and re-engages the latch. Dropping on every path (including
/// acquisition failure) is what keeps the hardware contract honest.
pub struct AssistLight<'a> {
    output: &'a mut dyn IlluminationOutput,
}

impl<'a> AssistLight<'a> {
    pub fn on(output: &'a mut dyn IlluminationOutput) -> Self {
        output.hold(false);
        output.set(true);
        Self { output }
    }
}

impl Drop for AssistLight<'_> {
    fn drop(&mut self) {
        self.output.set(false);
        self.output.hold(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingOutput {
        events: Vec<&'static str>,
    }

    impl IlluminationOutput for RecordingOutput {
        fn set(&mut self, on: bool) {
            self.events.push(if on { "high" } else { "low" });
        }

        fn hold(&mut self, latched: bool) {
            self.events.push(if latched { "latch" } else { "unlatch" });
        }
    }

    #[test]
    fn assist_light_unlatches_then_relatches() {
        let mut out = RecordingOutput::default();

        {
            let _light = AssistLight::on(&mut out);
        }

        assert_eq!(out.events, vec!["unlatch", "high", "low", "latch"]);
    }
}
