/// Display utilities for user-facing output
use crossterm::style::{Color, Stylize};

use crate::utils::debug;

/// Print a success message with green text
pub fn success(message: &str) {
    if !debug::is_quiet() {
        println!("{} {}", "SUCCESS:".with(Color::Green).bold(), message);
    }
}

/// Print an error message with red text
pub fn error(message: &str) {
    eprintln!("{}   {}", "ERROR:".with(Color::Red).bold(), message);
}

/// Print a warning message with yellow text
pub fn warning(message: &str) {
    eprintln!("{} {}", "WARNING:".with(Color::Yellow).bold(), message);
}

/// Print an info message
pub fn info(message: &str) {
    if !debug::is_quiet() {
        println!("{}    {}", "INFO:".with(Color::Blue).bold(), message);
    }
}
