pub mod config;
pub mod gallery;
pub mod menu;
pub mod summary;
