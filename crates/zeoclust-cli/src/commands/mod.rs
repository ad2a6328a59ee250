pub mod catalog;
pub mod screen;
