//! Slideshow state shared between the controller and the viewer, with the
//! predicates the top bar renders from.

use serde::{Deserialize, Serialize};

/// Observable state of a slideshow, owned by
/// [`crate::slideshow::SlideshowController`].
///
/// `current_page` always satisfies `1 <= current_page <= max(page_count, 1)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlideshowState {
    pub current_page: u32,
    /// Zero until the document has been loaded.
    pub page_count: u32,
    /// Seconds each page stays on screen while playing. Never zero.
    pub duration_secs: u32,
    pub is_playing: bool,
    pub is_loading: bool,
    pub is_fullscreen: bool,
    pub error: Option<String>,
}

impl SlideshowState {
    pub fn new(duration_secs: u32) -> Self {
        Self {
            current_page: 1,
            page_count: 0,
            duration_secs: duration_secs.max(1),
            is_playing: false,
            is_loading: true,
            is_fullscreen: false,
            error: None,
        }
    }

    /// Fraction of the document shown so far, between 0 and 1.
    pub fn progress(&self) -> f64 {
        if self.page_count == 0 {
            return 0.0;
        }
        f64::from(self.current_page) / f64::from(self.page_count)
    }

    pub fn can_play(&self) -> bool {
        self.page_count > 0 && !self.is_loading
    }

    pub fn has_previous(&self) -> bool {
        !self.is_loading && self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        !self.is_loading && self.current_page < self.page_count
    }

    pub fn page_label(&self) -> Option<String> {
        (self.page_count > 0).then(|| format!("Page {} of {}", self.current_page, self.page_count))
    }
}
