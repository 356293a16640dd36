pub mod camera;
pub mod page;
