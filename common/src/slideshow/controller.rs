use std::time::Duration;

use log::debug;

use super::timer::TimerFactory;
use crate::model::slideshow::SlideshowState;

/// Owns the slideshow state and the single timer that advances it.
///
/// Two counters guard against late asynchronous results:
/// - `timer_generation` changes whenever the timer is started or cancelled,
///   so a tick queued by a timer that no longer exists is ignored;
/// - `load_generation` changes on every [`begin_load`](Self::begin_load), so
///   a load or render result for a previous document is ignored.
pub struct SlideshowController<T: TimerFactory> {
    state: SlideshowState,
    timers: T,
    timer: Option<T::Handle>,
    timer_generation: u64,
    load_generation: u64,
}

impl<T: TimerFactory> SlideshowController<T> {
    pub fn new(timers: T, duration_secs: u32) -> Self {
        Self {
            state: SlideshowState::new(duration_secs),
            timers,
            timer: None,
            timer_generation: 0,
            load_generation: 0,
        }
    }

    pub fn state(&self) -> &SlideshowState {
        &self.state
    }

    pub fn is_timer_running(&self) -> bool {
        self.timer.is_some()
    }

    pub fn load_generation(&self) -> u64 {
        self.load_generation
    }

    /// Starts loading a new document: stops playback, resets to page one with
    /// no pages, and returns the generation that the load result must carry.
    pub fn begin_load(&mut self) -> u64 {
        self.cancel_timer();
        self.load_generation += 1;
        let duration_secs = self.state.duration_secs;
        let is_fullscreen = self.state.is_fullscreen;
        self.state = SlideshowState {
            is_fullscreen,
            ..SlideshowState::new(duration_secs)
        };
        self.load_generation
    }

    /// The renderer opened the document.
    pub fn document_loaded(&mut self, generation: u64, page_count: u32) -> bool {
        if !self.is_current_load(generation) {
            return false;
        }
        self.cancel_timer();
        self.state.page_count = page_count;
        self.state.current_page = 1;
        self.state.is_playing = false;
        self.state.is_loading = false;
        self.state.error = None;
        true
    }

    /// The document could not be downloaded or opened.
    pub fn document_failed(&mut self, generation: u64, message: impl Into<String>) -> bool {
        if !self.is_current_load(generation) {
            return false;
        }
        self.cancel_timer();
        self.state.page_count = 0;
        self.state.current_page = 1;
        self.state.is_playing = false;
        self.state.is_loading = false;
        self.state.error = Some(message.into());
        true
    }

    /// A page failed to render. Playback and the current page are left alone.
    pub fn render_failed(&mut self, generation: u64, message: impl Into<String>) -> bool {
        if !self.is_current_load(generation) {
            return false;
        }
        self.state.error = Some(message.into());
        true
    }

    pub fn render_succeeded(&mut self, generation: u64) -> bool {
        if !self.is_current_load(generation) {
            return false;
        }
        self.state.error = None;
        true
    }

    pub fn play(&mut self) -> bool {
        if self.state.is_playing || !self.state.can_play() {
            return false;
        }
        self.start_timer();
        self.state.is_playing = true;
        true
    }

    pub fn pause(&mut self) -> bool {
        if !self.state.is_playing {
            return false;
        }
        self.cancel_timer();
        self.state.is_playing = false;
        true
    }

    pub fn toggle(&mut self) -> bool {
        if self.state.is_playing {
            self.pause()
        } else {
            self.play()
        }
    }

    /// Jumps to `page`. While playing, the countdown restarts so the page
    /// stays up for a full period.
    pub fn go_to_page(&mut self, page: u32) -> bool {
        if self.state.is_loading || page < 1 || page > self.state.page_count {
            return false;
        }
        self.state.current_page = page;
        if self.state.is_playing {
            self.start_timer();
        }
        true
    }

    pub fn next(&mut self) -> bool {
        self.go_to_page(self.state.current_page.saturating_add(1))
    }

    pub fn previous(&mut self) -> bool {
        self.go_to_page(self.state.current_page.saturating_sub(1))
    }

    /// Changes the per-page duration. While playing, the timer restarts with
    /// the new period; the current page does not change.
    pub fn set_duration(&mut self, duration_secs: u32) -> bool {
        if duration_secs == 0 {
            return false;
        }
        self.state.duration_secs = duration_secs;
        if self.state.is_playing {
            self.start_timer();
        }
        true
    }

    /// One period elapsed on the timer started with `generation`.
    pub fn tick(&mut self, generation: u64) -> bool {
        if !self.state.is_playing || self.timer.is_none() || generation != self.timer_generation {
            debug!("ignoring stale slideshow tick {generation}");
            return false;
        }
        if self.state.current_page >= self.state.page_count {
            self.cancel_timer();
            self.state.is_playing = false;
        } else {
            self.state.current_page += 1;
        }
        true
    }

    /// Delayed automatic start after a load; ignored if another document has
    /// started loading since.
    pub fn autoplay(&mut self, load_generation: u64) -> bool {
        self.is_current_load(load_generation) && self.play()
    }

    pub fn set_fullscreen(&mut self, fullscreen: bool) {
        self.state.is_fullscreen = fullscreen;
    }

    fn is_current_load(&self, generation: u64) -> bool {
        let current = generation == self.load_generation;
        if !current {
            debug!(
                "discarding result of load {generation}, current load is {}",
                self.load_generation
            );
        }
        current
    }

    fn start_timer(&mut self) {
        // The old handle is dropped, and with it the old timer, before the
        // new one exists.
        self.timer = None;
        self.timer_generation += 1;
        let period = Duration::from_secs(u64::from(self.state.duration_secs));
        debug!("starting slideshow timer {} every {period:?}", self.timer_generation);
        self.timer = Some(self.timers.start(period, self.timer_generation));
    }

    fn cancel_timer(&mut self) {
        if self.timer.take().is_some() {
            debug!("cancelled slideshow timer {}", self.timer_generation);
        }
        self.timer_generation += 1;
    }
}
