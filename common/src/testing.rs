//! Scripted stand-ins for the network, timer and camera ports.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;

use async_trait::async_trait;

use crate::camera::CameraStream;
use crate::http::{HttpClient, HttpResponse, ProbeResponse, TransportError};
use crate::slideshow::TimerFactory;

/// `HttpClient` answering from per-URL scripts and recording every request as
/// `"HEAD <url>"` or `"GET <url>"`. Unscripted URLs fail like an unreachable
/// host.
#[derive(Clone, Default)]
pub struct ScriptedHttp {
    inner: Rc<RefCell<Script>>,
}

#[derive(Default)]
struct Script {
    probes: HashMap<String, Result<ProbeResponse, TransportError>>,
    gets: HashMap<String, Result<HttpResponse, TransportError>>,
    requests: Vec<String>,
}

impl ScriptedHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_probe(&self, url: &str, answer: Result<ProbeResponse, TransportError>) {
        self.inner.borrow_mut().probes.insert(url.to_string(), answer);
    }

    pub fn on_get(&self, url: &str, answer: Result<HttpResponse, TransportError>) {
        self.inner.borrow_mut().gets.insert(url.to_string(), answer);
    }

    pub fn requests(&self) -> Vec<String> {
        self.inner.borrow().requests.clone()
    }
}

fn unreachable_host() -> TransportError {
    TransportError::new("TypeError: Failed to fetch")
}

#[async_trait(?Send)]
impl HttpClient for ScriptedHttp {
    async fn probe(&self, url: &str) -> Result<ProbeResponse, TransportError> {
        let mut script = self.inner.borrow_mut();
        script.requests.push(format!("HEAD {url}"));
        script
            .probes
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(unreachable_host()))
    }

    async fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        let mut script = self.inner.borrow_mut();
        script.requests.push(format!("GET {url}"));
        script
            .gets
            .get(url)
            .cloned()
            .unwrap_or_else(|| Err(unreachable_host()))
    }
}

pub fn pdf_response(bytes: &[u8]) -> HttpResponse {
    HttpResponse {
        status: 200,
        content_type: Some("application/pdf".to_string()),
        body: bytes.to_vec(),
    }
}

pub fn html_response(body: &str) -> HttpResponse {
    HttpResponse {
        status: 200,
        content_type: Some("text/html; charset=utf-8".to_string()),
        body: body.as_bytes().to_vec(),
    }
}

pub fn http_status(status: u16) -> HttpResponse {
    HttpResponse {
        status,
        content_type: None,
        body: Vec::new(),
    }
}

/// Timer port on a virtual clock. Repeating timers fire at
/// `start + k * period`; dropping a handle cancels its timer.
#[derive(Clone, Default)]
pub struct VirtualTimers {
    clock: Rc<RefCell<Clock>>,
}

#[derive(Default)]
struct Clock {
    now: Duration,
    next_id: u64,
    live: Vec<LiveTimer>,
    started: usize,
}

struct LiveTimer {
    id: u64,
    generation: u64,
    period: Duration,
    next_fire: Duration,
}

pub struct VirtualTimerHandle {
    id: u64,
    clock: Rc<RefCell<Clock>>,
}

impl Drop for VirtualTimerHandle {
    fn drop(&mut self) {
        self.clock.borrow_mut().live.retain(|timer| timer.id != self.id);
    }
}

impl TimerFactory for VirtualTimers {
    type Handle = VirtualTimerHandle;

    fn start(&mut self, period: Duration, generation: u64) -> Self::Handle {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        clock.started += 1;
        let next_fire = clock.now + period;
        clock.live.push(LiveTimer {
            id,
            generation,
            period,
            next_fire,
        });
        VirtualTimerHandle {
            id,
            clock: Rc::clone(&self.clock),
        }
    }
}

impl VirtualTimers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now(&self) -> Duration {
        self.clock.borrow().now
    }

    /// Timers that have been started and not yet cancelled.
    pub fn active_count(&self) -> usize {
        self.clock.borrow().live.len()
    }

    /// Total number of timers ever started.
    pub fn started_count(&self) -> usize {
        self.clock.borrow().started
    }

    /// Period of the single live timer, if exactly one is running.
    pub fn active_period(&self) -> Option<Duration> {
        match self.clock.borrow().live.as_slice() {
            [timer] => Some(timer.period),
            _ => None,
        }
    }

    /// Moves the clock forward by `step`, calling `on_tick` with the
    /// generation of every timer firing on the way, in time order. Timers
    /// started or cancelled inside `on_tick` are taken into account.
    pub fn advance(&self, step: Duration, mut on_tick: impl FnMut(u64)) {
        let target = self.now() + step;
        loop {
            let due = {
                let mut clock = self.clock.borrow_mut();
                let next = clock
                    .live
                    .iter_mut()
                    .filter(|timer| timer.next_fire <= target)
                    .min_by_key(|timer| timer.next_fire);
                match next {
                    Some(timer) => {
                        let fired_at = timer.next_fire;
                        timer.next_fire += timer.period;
                        let generation = timer.generation;
                        clock.now = fired_at;
                        Some(generation)
                    }
                    None => None,
                }
            };
            match due {
                Some(generation) => on_tick(generation),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }
}

/// Camera that hands out streams and counts the live ones.
#[derive(Clone, Default)]
pub struct VirtualCamera {
    rig: Rc<RefCell<CameraRig>>,
}

#[derive(Default)]
struct CameraRig {
    next_id: u64,
    live: Vec<u64>,
    started: usize,
}

impl VirtualCamera {
    pub fn new() -> Self {
        Self::default()
    }

    /// A newly opened stream with one live track.
    pub fn stream(&self) -> VirtualStream {
        let mut rig = self.rig.borrow_mut();
        let id = rig.next_id;
        rig.next_id += 1;
        rig.started += 1;
        rig.live.push(id);
        VirtualStream {
            id,
            rig: Rc::clone(&self.rig),
        }
    }

    pub fn live_tracks(&self) -> usize {
        self.rig.borrow().live.len()
    }

    pub fn started_count(&self) -> usize {
        self.rig.borrow().started
    }
}

pub struct VirtualStream {
    id: u64,
    rig: Rc<RefCell<CameraRig>>,
}

impl CameraStream for VirtualStream {
    fn stop(&mut self) {
        self.rig.borrow_mut().live.retain(|id| *id != self.id);
    }
}

impl Drop for VirtualStream {
    fn drop(&mut self) {
        self.stop();
    }
}
