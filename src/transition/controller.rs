use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::geometry::figure::Geometry;
use crate::transition::crossfade::{Crossfade, RampOpts, RampStep, RampTicket, TransitionFrame};

/// Called after every opacity change with the new opacity of the current frame.
pub type RedrawHook = Arc<dyn Fn(f64) + Send + Sync>;

/// Cooperative cancellation flag for one ramp task.
#[derive(Debug)]
struct CancelHandle {
    cancelled: Arc<AtomicBool>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl CancelHandle {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::Release);
    }
}

/// Drives a [`Crossfade`] whenever a new geometry arrives.
///
/// Inside a tokio runtime each transition runs as one spawned ramp task that sleeps
/// `interval` between steps; starting a new transition flags the old task, which exits at its
/// next step boundary. Outside a runtime nothing is spawned and the host paces the ramp by
/// calling [`TransitionController::tick`] from its own timer.
pub struct TransitionController {
    state: Arc<Mutex<Crossfade>>,
    in_flight: Option<CancelHandle>,
    ticket: Option<RampTicket>,
    opts: RampOpts,
    redraw: RedrawHook,
    runtime: Option<tokio::runtime::Handle>,
}

impl std::fmt::Debug for TransitionController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitionController")
            .field("opts", &self.opts)
            .field("in_flight", &self.in_flight.is_some())
            .field("spawns", &self.runtime.is_some())
            .finish_non_exhaustive()
    }
}

fn lock(state: &Mutex<Crossfade>) -> MutexGuard<'_, Crossfade> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

impl TransitionController {
    /// Picks up the ambient tokio runtime if there is one.
    pub fn new(opts: RampOpts, redraw: RedrawHook) -> Self {
        Self::with_runtime(opts, redraw, tokio::runtime::Handle::try_current().ok())
    }

    /// Never spawns; the host must call [`TransitionController::tick`].
    pub fn manual(opts: RampOpts, redraw: RedrawHook) -> Self {
        Self::with_runtime(opts, redraw, None)
    }

    pub fn with_runtime(
        opts: RampOpts,
        redraw: RedrawHook,
        runtime: Option<tokio::runtime::Handle>,
    ) -> Self {
        Self {
            state: Arc::new(Mutex::new(Crossfade::default())),
            in_flight: None,
            ticket: None,
            opts,
            redraw,
            runtime,
        }
    }

    /// Demote `current` to `previous`, show `geometry` at opacity 0 and start a new ramp.
    #[tracing::instrument(skip_all)]
    pub fn on_new_geometry(&mut self, geometry: Arc<Geometry>) {
        self.cancel_in_flight();
        let ticket = lock(&self.state).begin(geometry);
        self.ticket = Some(ticket);

        let Some(runtime) = self.runtime.as_ref() else {
            return;
        };
        let cancelled = Arc::new(AtomicBool::new(false));
        let task = runtime.spawn(run_ramp(
            Arc::clone(&self.state),
            ticket,
            Arc::clone(&cancelled),
            self.opts,
            Arc::clone(&self.redraw),
        ));
        self.in_flight = Some(CancelHandle {
            cancelled,
            task: Some(task),
        });
    }

    /// Advance the current ramp by one step (manual pacing).
    ///
    /// Returns `None` without touching the state when a spawned task owns the ramp.
    pub fn tick(&mut self) -> Option<RampStep> {
        if self.in_flight.is_some() {
            return None;
        }
        let ticket = self.ticket?;
        let step = lock(&self.state).advance(ticket, self.opts.effective_step());
        match step {
            RampStep::Advanced(opacity) => (self.redraw)(opacity),
            RampStep::Completed => {
                (self.redraw)(1.0);
                self.ticket = None;
            }
            RampStep::Superseded => self.ticket = None,
        }
        Some(step)
    }

    /// Stop the ramp in flight, showing the current frame fully.
    pub fn cancel(&mut self) {
        self.cancel_in_flight();
        if let Some(ticket) = self.ticket.take() {
            lock(&self.state).release(ticket);
        }
    }

    /// Teardown: cancel any ramp and drop both frames.
    pub fn detach(&mut self) {
        self.cancel_in_flight();
        self.ticket = None;
        lock(&self.state).clear();
    }

    pub fn previous(&self) -> Option<TransitionFrame> {
        lock(&self.state).previous().cloned()
    }

    pub fn current(&self) -> Option<TransitionFrame> {
        lock(&self.state).current().cloned()
    }

    /// `(previous, current)` read under one lock.
    pub fn frames(&self) -> (Option<TransitionFrame>, Option<TransitionFrame>) {
        let state = lock(&self.state);
        (state.previous().cloned(), state.current().cloned())
    }

    pub fn is_settled(&self) -> bool {
        lock(&self.state).is_settled()
    }

    /// `true` while a spawned ramp task has not exited.
    pub fn is_ramping(&self) -> bool {
        self.in_flight
            .as_ref()
            .and_then(|h| h.task.as_ref())
            .is_some_and(|t| !t.is_finished())
    }

    fn cancel_in_flight(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.cancel();
        }
    }
}

impl Drop for TransitionController {
    fn drop(&mut self) {
        self.cancel_in_flight();
    }
}

async fn run_ramp(
    state: Arc<Mutex<Crossfade>>,
    ticket: RampTicket,
    cancelled: Arc<AtomicBool>,
    opts: RampOpts,
    redraw: RedrawHook,
) {
    let step = opts.effective_step();
    loop {
        if cancelled.load(Ordering::Acquire) {
            lock(&state).release(ticket);
            tracing::trace!("crossfade ramp cancelled");
            return;
        }
        let outcome = lock(&state).advance(ticket, step);
        match outcome {
            RampStep::Advanced(opacity) => {
                redraw(opacity);
                tokio::time::sleep(opts.interval).await;
            }
            RampStep::Completed => {
                redraw(1.0);
                tracing::trace!("crossfade ramp completed");
                return;
            }
            RampStep::Superseded => return,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/controller.rs"]
mod tests;
