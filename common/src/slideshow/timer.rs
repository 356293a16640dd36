use std::time::Duration;

/// Starts repeating timers for the slideshow controller.
///
/// Each timer must deliver its `generation` back to
/// [`SlideshowController::tick`](super::SlideshowController::tick) once per
/// `period` until its handle is dropped. Dropping the handle cancels the
/// timer; the controller relies on this to never keep two timers alive.
pub trait TimerFactory {
    type Handle;

    fn start(&mut self, period: Duration, generation: u64) -> Self::Handle;
}
