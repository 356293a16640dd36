pub mod page;

mod drive_embed;
mod file_upload;
mod top_bar;
