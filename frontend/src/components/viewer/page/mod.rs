//! Viewer screen: downloads the scanned document and plays it as a
//! slideshow.
//!
//! Responsibilities
//! - Fetch the document through [`DocumentFetcher`](common::fetcher::DocumentFetcher)
//!   (direct download, proxies for Drive, embedded preview as last resort).
//! - Open it with pdf.js and draw the current page onto a canvas.
//! - Drive page changes from the [`SlideshowController`](common::slideshow::SlideshowController):
//!   timer ticks, controls, keyboard shortcuts and the delayed autoplay.
//! - Offer a local file upload when the download fails.
//!
//! Every asynchronous result carries the load generation it was started
//! under; results from a previous document are dropped by the controller.

use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::ViewerPageProps;
pub use state::ViewerPage;

impl Component for ViewerPage {
    type Message = Msg;
    type Properties = ViewerPageProps;

    fn create(ctx: &Context<Self>) -> Self {
        ViewerPage::new(ctx)
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn changed(&mut self, ctx: &Context<Self>, old_props: &Self::Properties) -> bool {
        if ctx.props().url != old_props.url {
            update::start_fetch(self, ctx);
        }
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render {
            self.listen_to_document(ctx);
            update::start_fetch(self, ctx);
            return;
        }
        update::render_current_page(self, ctx);
    }

    fn destroy(&mut self, _ctx: &Context<Self>) {
        // Detach listeners before the rest of the state goes away so no
        // event reaches a dead component.
        self.listeners.clear();
        self.document = None;
    }
}
