pub mod commands;
pub mod core;
pub mod help;
pub mod io;
pub mod output;
mod shell;
pub mod table;

pub use shell::run_cli;
