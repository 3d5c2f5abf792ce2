use crate::cli::commands::{CommandDefinition, CommandRegistry};
use crate::cli::io;
use crate::cli::output::section as output_section;

pub fn print_overview(registry: &CommandRegistry) {
    output_section("Available commands");
    for definition in registry.iter() {
        io::print_info(format!("  {:<12} {}", definition.name, definition.description));
    }
    io::print_info("Use `help <command>` for details.");
}

pub fn print_command(definition: &CommandDefinition) {
    output_section(format!("Help: {}", definition.name));
    io::print_info(format!("  Description: {}", definition.description));
    io::print_info(format!("  Usage: {}", definition.usage));
}
