use common::model::link::ScanPayload;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct QrScannerProps {
    /// Fired once per decoded code; the camera is already stopped by then.
    pub on_scan: Callback<ScanPayload>,
    /// Fired when the camera cannot be opened (permission, no device, ...).
    pub on_device_error: Callback<String>,
}
