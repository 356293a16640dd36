//! Turning scanned text into a downloadable link.

pub mod classifier;
pub mod resolver;
pub mod urls;

pub use classifier::classify;
pub use resolver::RedirectResolver;
