//! Camera-driven barcode / QR scanner.
//!
//! Responsibilities
//! - Open the rear camera on request and feed frames to the decoder.
//! - Report each decoded payload to the parent, then release the camera.
//! - Keep frame-level decoder noise away from the user; surface real failures.
//!
//! The running [`CameraSession`](crate::bridge::zxing::CameraSession) lives in
//! a [`CameraLifecycle`](common::camera::CameraLifecycle); stop, decode and
//! unmount all release it there.

use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::QrScannerProps;
pub use state::QrScanner;

impl Component for QrScanner {
    type Message = Msg;
    type Properties = QrScannerProps;

    fn create(_ctx: &Context<Self>) -> Self {
        QrScanner::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        self.camera.close();
    }
}
