use common::camera::CameraStream;
use common::model::link::ScanPayload;
use common::ScanError;
use wasm_bindgen::prelude::*;
use web_sys::HtmlVideoElement;
use yew::Callback;

use super::{js_error_name, js_error_text};

#[wasm_bindgen(module = "/js/scanner_bridge.js")]
extern "C" {
    #[wasm_bindgen(js_name = startDecoding, catch)]
    async fn start_decoding(
        video: &HtmlVideoElement,
        on_result: &js_sys::Function,
        on_error: &js_sys::Function,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = stopDecoding)]
    fn stop_decoding(controls: &JsValue, video: &HtmlVideoElement);
}

/// Error reported by the decoder for a single frame.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    pub name: String,
    pub message: String,
}

/// A running camera stream feeding the ZXing decoder.
///
/// Stopping (or dropping) the session stops decoding and every media track
/// and detaches the stream from the `<video>` element.
pub struct CameraSession {
    /// Decoder controls; `NULL` once stopped.
    controls: JsValue,
    video: HtmlVideoElement,
    _on_result: Closure<dyn FnMut(String, String)>,
    _on_error: Closure<dyn FnMut(String, String)>,
}

impl CameraSession {
    pub async fn start(
        video: HtmlVideoElement,
        on_result: Callback<ScanPayload>,
        on_error: Callback<DecodeError>,
    ) -> Result<Self, ScanError> {
        let on_result = Closure::<dyn FnMut(String, String)>::new(move |text: String, format: String| {
            on_result.emit(ScanPayload::with_format(text, format));
        });
        let on_error = Closure::<dyn FnMut(String, String)>::new(move |name: String, message: String| {
            on_error.emit(DecodeError { name, message });
        });

        match start_decoding(
            &video,
            on_result.as_ref().unchecked_ref(),
            on_error.as_ref().unchecked_ref(),
        )
        .await
        {
            Ok(controls) => Ok(Self {
                controls,
                video,
                _on_result: on_result,
                _on_error: on_error,
            }),
            Err(err) => {
                // A stream may have been attached before the failure.
                stop_decoding(&JsValue::NULL, &video);
                let name = js_error_name(&err);
                let text = js_error_text(&err);
                let detail = if name.is_empty() { text } else { format!("{name}: {text}") };
                Err(ScanError::DeviceUnavailable(detail))
            }
        }
    }
}

impl CameraStream for CameraSession {
    fn stop(&mut self) {
        if self.controls.is_null() {
            return;
        }
        stop_decoding(&self.controls, &self.video);
        self.controls = JsValue::NULL;
    }
}

impl Drop for CameraSession {
    fn drop(&mut self) {
        self.stop();
    }
}
