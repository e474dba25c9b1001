use std::fmt::Write;
use crate::datapack::{Datapack, McFunction, Repeat};

impl std::fmt::Display for McFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for line in self.render() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}

pub fn format_datapack(datapack: &Datapack) -> String {
    let mut output = String::new();
    writeln!(output, "Datapack: {}", datapack.namespace).unwrap();

    writeln!(output, "Load:").unwrap();
    for command in datapack.load_commands() {
        writeln!(output, "  {}", command).unwrap();
    }

    writeln!(output, "Tick:").unwrap();
    for location in datapack.tick_functions() {
        writeln!(output, "  {}", location).unwrap();
    }

    writeln!(output, "Functions:").unwrap();
    for function in datapack.functions() {
        output.push_str(&format_function(function));
    }
    output
}

pub fn format_function(function: &McFunction) -> String {
    let mut output = String::new();
    let repeat = match function.repeat {
        Repeat::Once => String::new(),
        Repeat::EachTick => " (each tick)".to_string(),
        Repeat::Every(ticks) => format!(" (every {} ticks)", ticks),
    };
    writeln!(output, "  {}{}", function.path, repeat).unwrap();
    for line in function.render() {
        writeln!(output, "    {}", line).unwrap();
    }
    output
}

pub fn format_json_datapack(datapack: &Datapack) -> String {
    match datapack.get_json_string() {
        Ok(json) => json,
        Err(e) => format!("Failed to serialize: {}", e),
    }
}
