pub mod bmfont;
pub mod config;
