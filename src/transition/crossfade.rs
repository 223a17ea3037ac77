use std::sync::Arc;
use std::time::Duration;

use crate::geometry::figure::Geometry;

/// A geometry revision and the opacity it is drawn with.
#[derive(Clone, Debug, PartialEq)]
pub struct TransitionFrame {
    pub geometry: Arc<Geometry>,
    pub opacity: f64,
}

/// Ramp pacing. `step` is clamped to `(0, 1]` when used.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RampOpts {
    pub step: f64,
    pub interval: Duration,
}

impl Default for RampOpts {
    fn default() -> Self {
        Self {
            step: 0.1,
            interval: Duration::from_millis(30),
        }
    }
}

impl RampOpts {
    pub(crate) fn effective_step(self) -> f64 {
        if self.step.is_finite() && self.step > 0.0 {
            self.step.min(1.0)
        } else {
            RampOpts::default().step
        }
    }
}

/// Identifies the transition a ramp belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RampTicket(u64);

/// Outcome of one ramp step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RampStep {
    /// Opacity increased and is still below 1.
    Advanced(f64),
    /// Opacity reached 1; the previous frame has been dropped.
    Completed,
    /// A newer transition (or a teardown) replaced this one.
    Superseded,
}

// Snap to 1 when accumulated float steps land just short of it.
const OPACITY_EPSILON: f64 = 1e-9;

/// Two-slot crossfade state: `previous` is the static backdrop, `current` fades in over it.
#[derive(Debug, Default)]
pub struct Crossfade {
    previous: Option<TransitionFrame>,
    current: Option<TransitionFrame>,
    generation: u64,
}

impl Crossfade {
    /// Start a transition to `geometry`, superseding any ramp in flight.
    ///
    /// The old `current` becomes the backdrop at full opacity, whatever point its own ramp had
    /// reached. A backdrop left over from an interrupted transition is dropped, so at most two
    /// frames are ever live.
    pub fn begin(&mut self, geometry: Arc<Geometry>) -> RampTicket {
        self.generation += 1;
        self.previous = self
            .current
            .take()
            .map(|frame| TransitionFrame { opacity: 1.0, ..frame });
        self.current = Some(TransitionFrame {
            geometry,
            opacity: 0.0,
        });
        RampTicket(self.generation)
    }

    /// Raise `current` by `step`, capped at 1.
    pub fn advance(&mut self, ticket: RampTicket, step: f64) -> RampStep {
        if ticket.0 != self.generation {
            return RampStep::Superseded;
        }
        let Some(current) = self.current.as_mut() else {
            return RampStep::Superseded;
        };
        let next = (current.opacity + step).min(1.0);
        if next >= 1.0 - OPACITY_EPSILON {
            current.opacity = 1.0;
            self.previous = None;
            return RampStep::Completed;
        }
        current.opacity = next;
        RampStep::Advanced(next)
    }

    /// Cleanup for a ramp that stopped before completing.
    ///
    /// When the ramp is still the live one (cancelled without a replacement) the backdrop is
    /// released and `current` is shown fully. A superseded ramp has nothing left to clean.
    pub fn release(&mut self, ticket: RampTicket) {
        if ticket.0 != self.generation {
            return;
        }
        self.previous = None;
        if let Some(current) = self.current.as_mut() {
            current.opacity = 1.0;
        }
    }

    /// Drop both frames and invalidate every outstanding ticket.
    pub fn clear(&mut self) {
        self.generation += 1;
        self.previous = None;
        self.current = None;
    }

    pub fn previous(&self) -> Option<&TransitionFrame> {
        self.previous.as_ref()
    }

    pub fn current(&self) -> Option<&TransitionFrame> {
        self.current.as_ref()
    }

    /// Steady state: nothing fading, no backdrop.
    pub fn is_settled(&self) -> bool {
        self.previous.is_none() && self.current.as_ref().is_none_or(|c| c.opacity >= 1.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/crossfade.rs"]
mod tests;
