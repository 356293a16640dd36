pub mod scanner;
pub mod viewer;
