pub mod catalog;
pub mod classifier;
pub mod commands;
pub mod error;
pub mod fs;
pub mod models;
pub mod validation;

/// ASCII art logo for harrow CLI
pub const LOGO: &str = "\
   ┬ ┬┌─┐┬─┐┬─┐┌─┐┬ ┬
   ├─┤├─┤├┬┘├┬┘│ ││││
   ┴ ┴┴ ┴┴└─┴└─└─┘└┴┘";
