//! Update logic for the scanner: camera lifecycle plus decoder callbacks.

use common::scanner::is_benign_decode_error;
use common::ScanError;
use gloo_timers::future::TimeoutFuture;
use web_sys::HtmlVideoElement;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::bridge::zxing::CameraSession;

use super::messages::Msg;
use super::state::QrScanner;

/// Gives Yew one frame to mount the `<video>` element before it is used.
const VIDEO_MOUNT_DELAY_MS: u32 = 50;

pub fn update(component: &mut QrScanner, ctx: &Context<QrScanner>, msg: Msg) -> bool {
    match msg {
        Msg::Open => {
            let generation = component.camera.open();
            component.result = None;
            component.error = None;

            let link = ctx.link().clone();
            spawn_local(async move {
                TimeoutFuture::new(VIDEO_MOUNT_DELAY_MS).await;
                link.send_message(Msg::StartCamera(generation));
            });
            true
        }
        Msg::StartCamera(generation) => {
            if !component.camera.wants_start(generation) {
                return false;
            }
            let Some(video) = component.video_ref.cast::<HtmlVideoElement>() else {
                component.camera.close();
                report_device_error(ctx, ScanError::DeviceUnavailable("video element not available".into()));
                return true;
            };

            let link = ctx.link().clone();
            let on_scan = ctx.link().callback(Msg::Decoded);
            let on_error = ctx.link().callback(Msg::DecodeFailed);
            spawn_local(async move {
                let started = CameraSession::start(video, on_scan, on_error).await;
                link.send_message(Msg::CameraStarted(generation, started));
            });
            false
        }
        Msg::CameraStarted(generation, Ok(session)) => {
            if component.camera.started(generation, session) {
                log::info!("camera started");
            }
            false
        }
        Msg::CameraStarted(generation, Err(err)) => {
            if !component.camera.failed(generation) {
                return false;
            }
            report_device_error(ctx, err);
            true
        }
        Msg::Decoded(payload) => {
            if !component.camera.decoded() {
                return false;
            }
            log::info!("decoded {:?} ({:?})", payload.text, payload.format);
            component.result = Some(payload.clone());
            ctx.props().on_scan.emit(payload);
            true
        }
        Msg::DecodeFailed(err) => {
            if is_benign_decode_error(&err.name) {
                return false;
            }
            log::warn!("decoder error {}: {}", err.name, err.message);
            component.error = Some(format!("Scanning error: {}", err.message));
            true
        }
        Msg::Close => {
            component.camera.close();
            true
        }
    }
}

/// Device failures are reported to the parent, which owns the error display.
fn report_device_error(ctx: &Context<QrScanner>, err: ScanError) {
    log::error!("{err}");
    let detail = match err {
        ScanError::DeviceUnavailable(detail) => detail,
        other => other.to_string(),
    };
    ctx.props().on_device_error.emit(detail);
}
