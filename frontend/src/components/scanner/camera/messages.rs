use common::model::link::ScanPayload;
use common::ScanError;

use crate::bridge::zxing::{CameraSession, DecodeError};

pub enum Msg {
    /// User pressed the scan button.
    Open,
    /// The `<video>` element is mounted; ask for the camera.
    StartCamera(u64),
    CameraStarted(u64, Result<CameraSession, ScanError>),
    Decoded(ScanPayload),
    DecodeFailed(DecodeError),
    Close,
}
