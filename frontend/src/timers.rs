use std::time::Duration;

use common::slideshow::TimerFactory;
use gloo_timers::callback::Interval;
use yew::Callback;

/// Slideshow timers backed by `setInterval`. Each tick is delivered to the
/// component as a message carrying the timer's generation; dropping the
/// returned [`Interval`] clears it.
pub struct IntervalTimers {
    on_tick: Callback<u64>,
}

impl IntervalTimers {
    pub fn new(on_tick: Callback<u64>) -> Self {
        Self { on_tick }
    }
}

impl TimerFactory for IntervalTimers {
    type Handle = Interval;

    fn start(&mut self, period: Duration, generation: u64) -> Interval {
        let on_tick = self.on_tick.clone();
        let millis = u32::try_from(period.as_millis()).unwrap_or(u32::MAX);
        Interval::new(millis, move || on_tick.emit(generation))
    }
}
