//! Decision logic for the QR-to-slideshow reader.
//!
//! Everything in this crate is free of browser APIs: the network, timer and
//! camera primitives are ports (`http::HttpClient`, `slideshow::TimerFactory`,
//! `camera::CameraStream`) that the front end implements with `gloo-net`,
//! `gloo-timers` and the ZXing bridge, and that the tests replace with
//! scripted fakes.

pub mod camera;
pub mod embed;
pub mod error;
pub mod fetcher;
pub mod http;
pub mod links;
pub mod model;
pub mod scanner;
pub mod session;
pub mod slideshow;

#[cfg(any(test, feature = "test-utils"))]
pub mod testing;

pub use error::{ConfigError, Result, ScanError};
