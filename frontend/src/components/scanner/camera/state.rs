use common::camera::CameraLifecycle;
use common::model::link::ScanPayload;
use yew::prelude::*;

use crate::bridge::zxing::CameraSession;

pub struct QrScanner {
    /// Open requests and the running stream. Closing, decoding and unmounting
    /// all go through it, which is what turns the camera off.
    pub camera: CameraLifecycle<CameraSession>,

    pub video_ref: NodeRef,

    /// Last decoded payload, shown under the scanner.
    pub result: Option<ScanPayload>,

    pub error: Option<String>,
}

impl QrScanner {
    pub fn new() -> Self {
        Self {
            camera: CameraLifecycle::new(),
            video_ref: NodeRef::default(),
            result: None,
            error: None,
        }
    }
}
