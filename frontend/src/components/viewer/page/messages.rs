use common::model::fetch::FetchOutcome;
use common::slideshow::KeyCommand;

use crate::bridge::pdfjs::PdfDocument;

pub enum Msg {
    Fetched(u64, FetchOutcome),
    FileRead(u64, Result<Vec<u8>, String>),
    Opened(u64, Result<PdfDocument, String>),
    PageRendered(u64, u32, Result<(), String>),
    /// Slideshow timer fired; carries the timer generation.
    Tick(u64),
    /// Delayed start after a successful load; carries the load generation.
    Autoplay(u64),
    TransitionDone(u64),
    TogglePlay,
    Previous,
    Next,
    SetDuration(String),
    ToggleFullscreen,
    FullscreenChanged(bool),
    Key(KeyCommand),
    OpenFilePicker,
    FileSelected(web_sys::File),
    Back,
}
