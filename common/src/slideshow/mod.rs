//! Slideshow playback: page state, the advance timer and keyboard commands.

mod controller;
mod keys;
mod timer;

pub use controller::SlideshowController;
pub use keys::KeyCommand;
pub use timer::TimerFactory;
