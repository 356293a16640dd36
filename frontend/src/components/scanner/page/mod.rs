//! Scanner screen: camera, scan status and instructions.
//!
//! Each decoded payload goes through the [`LinkPipeline`](common::session::LinkPipeline)
//! (classify, resolve shortened links, probe). A successful scan hands the
//! final URL to the parent, which switches to the viewer.

use std::rc::Rc;

use common::session::LinkPipeline;
use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::ScannerPageProps;
pub use state::ScannerPage;

use crate::net::GlooHttpClient;

impl Component for ScannerPage {
    type Message = Msg;
    type Properties = ScannerPageProps;

    fn create(ctx: &Context<Self>) -> Self {
        ScannerPage::new(&ctx.props().config)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().config != old_props.config {
            self.pipeline = Rc::new(LinkPipeline::new(GlooHttpClient, &ctx.props().config));
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }
}
