use std::rc::Rc;

use common::model::config::AppConfig;
use yew::prelude::*;

#[derive(Properties, PartialEq, Clone)]
pub struct ViewerPageProps {
    /// Resolved document URL: a direct PDF link or a Drive download URL.
    pub url: String,
    pub config: Rc<AppConfig>,
    pub on_back: Callback<()>,
}
