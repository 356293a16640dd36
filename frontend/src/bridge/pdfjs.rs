use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use super::js_error_text;

#[wasm_bindgen(module = "/js/pdf_bridge.js")]
extern "C" {
    #[wasm_bindgen(js_name = openDocument, catch)]
    async fn open_document(data: Uint8Array) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = pageCount)]
    fn page_count(document: &JsValue) -> u32;

    #[wasm_bindgen(js_name = renderPage, catch)]
    async fn render_page(
        document: &JsValue,
        page: u32,
        canvas: &HtmlCanvasElement,
        max_height: f64,
    ) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(js_name = closeDocument)]
    fn close_document(document: &JsValue);
}

/// A parsed pdf.js document. Dropping it releases the worker-side copy.
pub struct PdfDocument {
    handle: JsValue,
    pages: u32,
}

impl PdfDocument {
    pub async fn open(bytes: &[u8]) -> Result<Self, String> {
        let data = Uint8Array::from(bytes);
        let handle = open_document(data)
            .await
            .map_err(|err| js_error_text(&err))?;
        let pages = page_count(&handle);
        Ok(Self { handle, pages })
    }

    pub fn page_count(&self) -> u32 {
        self.pages
    }

    /// Handle that can outlive a borrow of `self` inside a spawned render.
    pub fn renderer(&self) -> PageRenderer {
        PageRenderer {
            handle: self.handle.clone(),
        }
    }
}

impl Drop for PdfDocument {
    fn drop(&mut self) {
        close_document(&self.handle);
    }
}

/// Renders pages of an open document. If the document was closed in the
/// meantime, pdf.js rejects and the error comes back as `Err`.
#[derive(Clone)]
pub struct PageRenderer {
    handle: JsValue,
}

impl PageRenderer {
    /// Draws `page` (1-based) into `canvas`, scaled to fit `max_height` CSS
    /// pixels.
    pub async fn render(
        &self,
        page: u32,
        canvas: &HtmlCanvasElement,
        max_height: f64,
    ) -> Result<(), String> {
        render_page(&self.handle, page, canvas, max_height)
            .await
            .map(|_| ())
            .map_err(|err| js_error_text(&err))
    }
}
