use common::model::link::ScanPayload;

pub enum Msg {
    Scanned(ScanPayload),
    Resolved(u64, common::Result<String>),
    DeviceFailed(String),
    ScanAgain,
}
