pub mod app;
pub mod calendar;
pub mod components;
pub mod persistence;
pub mod theme;
pub mod tui;
