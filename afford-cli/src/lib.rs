//! Command-line front end for the affordability calculator.

pub mod cli;
pub mod config;
pub mod input;
pub mod logging;
pub mod render;
pub mod repl;
