use std::rc::Rc;

use common::model::config::AppConfig;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ScannerPageProps {
    pub config: Rc<AppConfig>,
    /// Receives the URL of the document to open.
    pub on_pdf_scanned: Callback<String>,
}
