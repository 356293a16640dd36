use std::rc::Rc;

use common::model::config::AppConfig;
use common::session::{LinkPipeline, ScanSession};

use crate::net::GlooHttpClient;

pub struct ScannerPage {
    /// Processing flag, last scan and last error.
    pub session: ScanSession,

    /// Shared with the task resolving the current scan.
    pub pipeline: Rc<LinkPipeline<GlooHttpClient>>,
}

impl ScannerPage {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            session: ScanSession::new(),
            pipeline: Rc::new(LinkPipeline::new(GlooHttpClient, config)),
        }
    }
}
