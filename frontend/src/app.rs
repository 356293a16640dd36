//! Root component: switches between the scanner and the viewer and owns the
//! runtime configuration.

use std::rc::Rc;

use common::model::config::AppConfig;
use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::{html, Component, Context, Html};

use crate::components::scanner::page::ScannerPage;
use crate::components::viewer::page::ViewerPage;

const CONFIG_PATH: &str = "config.json";

#[derive(Debug, Clone, PartialEq)]
pub enum Screen {
    Scanner,
    Viewer(String),
}

pub enum Msg {
    ConfigLoaded(AppConfig),
    PdfScanned(String),
    BackToScanner,
}

pub struct App {
    screen: Screen,
    config: Rc<AppConfig>,
}

impl Component for App {
    type Message = Msg;
    type Properties = ();

    fn create(ctx: &Context<Self>) -> Self {
        let link = ctx.link().clone();
        spawn_local(async move {
            link.send_message(Msg::ConfigLoaded(load_config().await));
        });
        Self {
            screen: Screen::Scanner,
            config: Rc::new(AppConfig::default()),
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ConfigLoaded(config) => {
                if *self.config == config {
                    return false;
                }
                self.config = Rc::new(config);
                true
            }
            Msg::PdfScanned(url) => {
                log::info!("opening viewer for {url}");
                self.screen = Screen::Viewer(url);
                true
            }
            Msg::BackToScanner => {
                self.screen = Screen::Scanner;
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        match &self.screen {
            Screen::Scanner => html! {
                <ScannerPage
                    config={self.config.clone()}
                    on_pdf_scanned={link.callback(Msg::PdfScanned)}
                />
            },
            Screen::Viewer(url) => html! {
                <ViewerPage
                    key={url.clone()}
                    url={url.clone()}
                    config={self.config.clone()}
                    on_back={link.callback(|_| Msg::BackToScanner)}
                />
            },
        }
    }
}

/// Reads `config.json` next to the app. A missing or invalid file falls
/// back to the built-in defaults.
async fn load_config() -> AppConfig {
    let response = match Request::get(CONFIG_PATH).send().await {
        Ok(response) if response.ok() => response,
        Ok(response) => {
            log::info!("no {CONFIG_PATH} (HTTP {}), using defaults", response.status());
            return AppConfig::default();
        }
        Err(err) => {
            log::warn!("could not fetch {CONFIG_PATH}: {err}");
            return AppConfig::default();
        }
    };
    let body = match response.text().await {
        Ok(body) => body,
        Err(err) => {
            log::warn!("could not read {CONFIG_PATH}: {err}");
            return AppConfig::default();
        }
    };
    match AppConfig::from_json_str(&body) {
        Ok(config) => {
            log::debug!("loaded {CONFIG_PATH}");
            config
        }
        Err(err) => {
            log::error!("ignoring {CONFIG_PATH}: {err}");
            AppConfig::default()
        }
    }
}
