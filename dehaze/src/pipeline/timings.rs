//! Per-call stage timings.

use std::fmt;
use std::time::Duration;

/// Wall-clock time spent in each pipeline stage of one [`crate::Dehazer::dehaze`] call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageTimings {
    pub normalize: Duration,
    pub dark_channel: Duration,
    pub atmospheric_light: Duration,
    pub transmission: Duration,
    pub refinement: Duration,
    pub reconstruction: Duration,
    /// Whole call, including validation.
    pub total: Duration,
}

impl StageTimings {
    /// `(label, duration)` for every stage in pipeline order, excluding the total.
    pub fn stages(&self) -> [(&'static str, Duration); 6] {
        [
            ("normalize", self.normalize),
            ("dark channel", self.dark_channel),
            ("atmospheric light", self.atmospheric_light),
            ("transmission", self.transmission),
            ("refinement", self.refinement),
            ("reconstruction", self.reconstruction),
        ]
    }
}

fn millis(d: Duration) -> f64 {
    d.as_secs_f64() * 1000.0
}

impl fmt::Display for StageTimings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Dehaze timings:")?;
        for (label, duration) in self.stages() {
            writeln!(f, "  {:<18} {:>9.3} ms", label, millis(duration))?;
        }
        write!(f, "  {:<18} {:>9.3} ms", "total", millis(self.total))
    }
}
