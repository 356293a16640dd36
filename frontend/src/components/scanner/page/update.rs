use common::session::ScanOutcome;
use yew::platform::spawn_local;
use yew::prelude::*;

use super::messages::Msg;
use super::state::ScannerPage;

pub fn update(component: &mut ScannerPage, ctx: &Context<ScannerPage>, msg: Msg) -> bool {
    match msg {
        Msg::Scanned(payload) => {
            let Some(ticket) = component.session.begin(payload) else {
                return false;
            };
            let pipeline = component.pipeline.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = pipeline.run(&ticket.payload).await;
                link.send_message(Msg::Resolved(ticket.generation, result));
            });
            true
        }
        Msg::Resolved(generation, result) => match component.session.complete(generation, result) {
            ScanOutcome::Navigate(url) => {
                ctx.props().on_pdf_scanned.emit(url);
                true
            }
            ScanOutcome::Failed(_) => true,
            ScanOutcome::Ignored => false,
        },
        Msg::DeviceFailed(detail) => {
            component.session.device_failed(detail);
            true
        }
        Msg::ScanAgain => {
            component.session.reset();
            true
        }
    }
}
