// Thu Oct 15 2026 - Alex

pub mod cli;
pub mod notify;

pub use cli::{Args, Command, CommandHandler};
pub use notify::ConsoleNotifier;

use colored::Colorize;

pub fn print_info(message: &str) {
    println!("{} {}", "[INFO]".cyan(), message);
}

pub fn print_success(message: &str) {
    println!("{} {}", "[OK]".green(), message);
}

pub fn print_warning(message: &str) {
    println!("{} {}", "[WARN]".yellow(), message);
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "[ERROR]".red(), message);
}
