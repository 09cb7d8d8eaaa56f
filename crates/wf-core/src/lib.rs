pub mod bookmarks;
pub mod catalog;
pub mod config;
pub mod selection;
pub mod settings;
