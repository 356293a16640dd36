use crate::app::App;

mod app;
mod bridge;
mod components;
mod logger;
mod net;
mod timers;

fn main() {
    logger::init();
    yew::Renderer::<App>::new().render();
}
