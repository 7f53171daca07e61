//! Server-rendered HTML pages

pub mod pages;
pub mod templates;
pub mod views;
