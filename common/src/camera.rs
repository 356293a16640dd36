//! Camera lifecycle for the scanner.
//!
//! The camera is opened asynchronously, so a stream can arrive after the
//! user already closed the scanner or the scanner went away. [`CameraLifecycle`]
//! tags every open request with a generation and stops any stream that shows
//! up for an outdated one. Once closed, decoded, torn down or failed, no
//! stream is left running.

use log::debug;

/// A running camera stream feeding the decoder.
///
/// `stop` ends decoding and stops every media track; it may be called more
/// than once. Implementations also stop when dropped.
pub trait CameraStream {
    fn stop(&mut self);
}

#[derive(Debug)]
pub struct CameraLifecycle<S: CameraStream> {
    active: bool,
    generation: u64,
    stream: Option<S>,
}

impl<S: CameraStream> Default for CameraLifecycle<S> {
    fn default() -> Self {
        Self {
            active: false,
            generation: 0,
            stream: None,
        }
    }
}

impl<S: CameraStream> CameraLifecycle<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scanner is showing its video pane (starting or streaming).
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_streaming(&self) -> bool {
        self.stream.is_some()
    }

    /// Begins a new open request, releasing whatever ran before. The
    /// returned generation has to come back with the stream.
    pub fn open(&mut self) -> u64 {
        self.release();
        self.active = true;
        self.generation
    }

    /// Whether a pending start for `generation` should still ask for the
    /// camera.
    pub fn wants_start(&self, generation: u64) -> bool {
        self.active && generation == self.generation && self.stream.is_none()
    }

    /// A stream became available. Kept if it answers the current open
    /// request, stopped otherwise. Returns whether it was kept.
    pub fn started(&mut self, generation: u64, mut stream: S) -> bool {
        if !self.wants_start(generation) {
            debug!("stopping camera stream of stale open request {generation}");
            stream.stop();
            return false;
        }
        self.stream = Some(stream);
        true
    }

    /// The camera could not be opened. Returns whether the failure belongs
    /// to the current open request.
    pub fn failed(&mut self, generation: u64) -> bool {
        if generation != self.generation || !self.active {
            return false;
        }
        self.release();
        true
    }

    /// A code was decoded. Accepted only while a stream is live; the camera
    /// is stopped before the result is handed on.
    pub fn decoded(&mut self) -> bool {
        if self.stream.is_none() {
            debug!("ignoring decode from a stopped camera");
            return false;
        }
        self.release();
        true
    }

    /// User closed the scanner, or the scanner is going away.
    pub fn close(&mut self) {
        self.release();
    }

    fn release(&mut self) {
        self.generation += 1;
        self.active = false;
        if let Some(mut stream) = self.stream.take() {
            debug!("camera released");
            stream.stop();
        }
    }
}

impl<S: CameraStream> Drop for CameraLifecycle<S> {
    fn drop(&mut self) {
        self.release();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{VirtualCamera, VirtualStream};

    fn streaming(camera: &VirtualCamera) -> CameraLifecycle<VirtualStream> {
        let mut lifecycle = CameraLifecycle::new();
        let generation = lifecycle.open();
        assert!(lifecycle.started(generation, camera.stream()));
        assert_eq!(camera.live_tracks(), 1);
        lifecycle
    }

    #[test]
    fn close_stops_the_camera() {
        let camera = VirtualCamera::new();
        let mut lifecycle = streaming(&camera);

        lifecycle.close();
        assert_eq!(camera.live_tracks(), 0);
        assert!(!lifecycle.is_active());
    }

    #[test]
    fn decode_stops_the_camera_and_late_frames_are_ignored() {
        let camera = VirtualCamera::new();
        let mut lifecycle = streaming(&camera);

        assert!(lifecycle.decoded());
        assert_eq!(camera.live_tracks(), 0);
        assert!(!lifecycle.decoded());
    }

    #[test]
    fn teardown_while_streaming_stops_the_camera() {
        let camera = VirtualCamera::new();
        let lifecycle = streaming(&camera);

        drop(lifecycle);
        assert_eq!(camera.live_tracks(), 0);
    }

    #[test]
    fn stream_arriving_after_close_is_stopped() {
        let camera = VirtualCamera::new();
        let mut lifecycle = CameraLifecycle::new();
        let generation = lifecycle.open();
        lifecycle.close();

        assert!(!lifecycle.wants_start(generation));
        assert!(!lifecycle.started(generation, camera.stream()));
        assert_eq!(camera.live_tracks(), 0);
        assert!(!lifecycle.is_streaming());
    }

    #[test]
    fn reopening_drops_the_previous_request() {
        let camera = VirtualCamera::new();
        let mut lifecycle = CameraLifecycle::new();
        let first = lifecycle.open();
        let second = lifecycle.open();

        assert!(!lifecycle.started(first, camera.stream()));
        assert!(lifecycle.started(second, camera.stream()));
        assert_eq!(camera.live_tracks(), 1);
        assert_eq!(camera.started_count(), 2);

        lifecycle.close();
        assert_eq!(camera.live_tracks(), 0);
    }

    #[test]
    fn failure_only_counts_for_the_current_request() {
        let mut lifecycle = CameraLifecycle::<VirtualStream>::new();
        let stale = lifecycle.open();
        let current = lifecycle.open();

        assert!(!lifecycle.failed(stale));
        assert!(lifecycle.is_active());
        assert!(lifecycle.failed(current));
        assert!(!lifecycle.is_active());
    }
}
