pub mod config;
pub mod fetch;
pub mod link;
pub mod slideshow;
