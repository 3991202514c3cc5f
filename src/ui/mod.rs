//! Terminal output: capability detection, design tokens and line renderers.

mod console;
mod icon;
mod text;
mod theme;
mod views;

pub use console::Console;
