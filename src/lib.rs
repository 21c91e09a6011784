pub mod app;
pub mod braille;
pub mod data;
pub mod globe;
mod hash;
pub mod ui;
