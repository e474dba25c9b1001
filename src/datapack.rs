use std::collections::BTreeMap;
use log::debug;
use serde::{Deserialize, Serialize};
use crate::error::Result;
use crate::objective::{Criteria, Objective};
use crate::score::Condition;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OnConflict {
    #[serde(alias = "replace")]
    Overwrite,
    Append,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Repeat {
    Once,
    EachTick,
    Every(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionOptions {
    pub on_conflict: OnConflict,
    pub repeat: Repeat,
}

impl FunctionOptions {
    pub fn append() -> Self {
        FunctionOptions { on_conflict: OnConflict::Append, repeat: Repeat::Once }
    }

    pub fn overwrite() -> Self {
        FunctionOptions { on_conflict: OnConflict::Overwrite, repeat: Repeat::Once }
    }

    pub fn each_tick() -> Self {
        FunctionOptions { on_conflict: OnConflict::Append, repeat: Repeat::EachTick }
    }

    /// `ticks` below 1 is raised to 1; the game rejects `0t` schedules.
    pub fn every(ticks: u32) -> Self {
        FunctionOptions { on_conflict: OnConflict::Append, repeat: Repeat::Every(ticks.max(1)) }
    }
}

impl Default for FunctionOptions {
    fn default() -> Self {
        FunctionOptions::append()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McFunction {
    pub path: String,
    pub commands: Vec<String>,
    pub repeat: Repeat,
}

impl McFunction {
    fn new(path: String, repeat: Repeat) -> Self {
        McFunction { path, commands: Vec::new(), repeat }
    }

    /// Commands as they would be written out, including the self-schedule
    /// line of an interval loop.
    pub fn render(&self) -> Vec<String> {
        let mut lines = self.commands.clone();
        if let Repeat::Every(ticks) = self.repeat {
            lines.push(schedule_command(&self.path, ticks));
        }
        lines
    }
}

fn schedule_command(location: &str, ticks: u32) -> String {
    format!("schedule function {} {}t replace", location, ticks)
}

/// In-memory record of generated commands, keyed by function resource location.
///
/// Commands emitted while no function block is open go to the load function,
/// which is also where objectives are created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Datapack {
    pub namespace: String,
    functions: BTreeMap<String, McFunction>,
    load: Vec<String>,
    tick: Vec<String>,
    #[serde(skip)]
    stack: Vec<String>,
}

impl Datapack {
    pub fn new(namespace: &str) -> Self {
        Datapack {
            namespace: namespace.to_string(),
            functions: BTreeMap::new(),
            load: Vec::new(),
            tick: Vec::new(),
            stack: Vec::new(),
        }
    }

    pub fn resource_location(&self, path: &str) -> String {
        if path.contains(':') {
            path.to_string()
        } else {
            format!("{}:{}", self.namespace, path)
        }
    }

    pub fn begin_function(&mut self, path: &str, options: FunctionOptions) {
        let location = self.resource_location(path);
        let repeat = match options.repeat {
            Repeat::Every(ticks) => Repeat::Every(ticks.max(1)),
            other => other,
        };
        debug!("Defining function {} ({:?}, {:?})", location, options.on_conflict, repeat);

        let function = self
            .functions
            .entry(location.clone())
            .or_insert_with(|| McFunction::new(location.clone(), repeat));

        if options.on_conflict == OnConflict::Overwrite {
            function.commands.clear();
        }
        if repeat != Repeat::Once {
            function.repeat = repeat;
        }

        match repeat {
            Repeat::EachTick => {
                if !self.tick.contains(&location) {
                    self.tick.push(location.clone());
                }
            }
            Repeat::Every(ticks) => self.start_loop(&location, ticks),
            Repeat::Once => {}
        }

        self.stack.push(location);
    }

    // One load-time schedule per loop, kept on the same tick count as the
    // self-schedule line the function renders.
    fn start_loop(&mut self, location: &str, ticks: u32) {
        let command = schedule_command(location, ticks);
        let prefix = format!("schedule function {} ", location);
        match self.load.iter_mut().find(|line| line.starts_with(&prefix)) {
            Some(line) => *line = command,
            None => self.load.push(command),
        }
    }

    pub fn end_function(&mut self) -> Option<String> {
        self.stack.pop()
    }

    /// Runs `body` with every emitted command going into the function at `path`.
    /// The block is closed again even when `body` fails.
    pub fn mc_function<F>(&mut self, path: &str, options: FunctionOptions, body: F) -> Result<()>
    where
        F: FnOnce(&mut Datapack) -> Result<()>,
    {
        self.begin_function(path, options);
        let result = body(self);
        self.end_function();
        result
    }

    pub fn current_function(&self) -> Option<&str> {
        self.stack.last().map(String::as_str)
    }

    pub fn create_objective(&mut self, name: &str, criteria: Criteria) -> Objective {
        debug!("Creating objective {} ({})", name, criteria);
        self.load.push(format!("scoreboard objectives add {} {}", name, criteria));
        Objective::new(name.to_string(), criteria)
    }

    pub fn emit(&mut self, command: impl Into<String>) {
        let command = command.into();
        match self.stack.last() {
            Some(location) => {
                if let Some(function) = self.functions.get_mut(location) {
                    function.commands.push(command);
                }
            }
            None => self.load.push(command),
        }
    }

    pub fn execute_if(&mut self, condition: &Condition, command: &str) {
        self.emit(format!("execute {} {} run {}", condition.keyword(), condition, command));
    }

    pub fn tellraw<T: Serialize>(&mut self, target: &str, components: &T) -> Result<()> {
        let json = serde_json::to_string(components)?;
        self.emit(format!("tellraw {} {}", target, json));
        Ok(())
    }

    pub fn function(&self, path: &str) -> Option<&McFunction> {
        self.functions.get(&self.resource_location(path))
    }

    pub fn functions(&self) -> impl Iterator<Item = &McFunction> {
        self.functions.values()
    }

    pub fn load_commands(&self) -> &[String] {
        &self.load
    }

    pub fn tick_functions(&self) -> &[String] {
        &self.tick
    }

    pub fn get_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_commands_land_in_open_function() {
        let mut datapack = Datapack::new("demo");
        datapack.emit("say loading");

        datapack
            .mc_function("main", FunctionOptions::append(), |dp| {
                dp.emit("say hello");
                Ok(())
            })
            .unwrap();

        assert_eq!(datapack.load_commands(), &["say loading".to_string()]);
        let main = datapack.function("main").unwrap();
        assert_eq!(main.path, "demo:main");
        assert_eq!(main.commands, vec!["say hello".to_string()]);
        assert_eq!(datapack.current_function(), None);
    }

    #[test]
    fn test_append_and_overwrite() {
        let mut datapack = Datapack::new("demo");
        for word in ["a", "b"] {
            datapack
                .mc_function("words", FunctionOptions::append(), |dp| {
                    dp.emit(format!("say {}", word));
                    Ok(())
                })
                .unwrap();
        }
        assert_eq!(datapack.function("words").unwrap().commands.len(), 2);

        datapack
            .mc_function("words", FunctionOptions::overwrite(), |dp| {
                dp.emit("say c");
                Ok(())
            })
            .unwrap();
        assert_eq!(datapack.function("words").unwrap().commands, vec!["say c".to_string()]);
    }

    #[test]
    fn test_nested_functions() {
        let mut datapack = Datapack::new("demo");
        datapack
            .mc_function("outer", FunctionOptions::append(), |dp| {
                dp.emit("say outer");
                dp.mc_function("inner", FunctionOptions::append(), |dp| {
                    dp.emit("say inner");
                    Ok(())
                })?;
                dp.emit("function demo:inner");
                Ok(())
            })
            .unwrap();

        assert_eq!(
            datapack.function("outer").unwrap().commands,
            vec!["say outer".to_string(), "function demo:inner".to_string()]
        );
        assert_eq!(datapack.function("inner").unwrap().commands, vec!["say inner".to_string()]);
    }

    #[test]
    fn test_tick_registered_once() {
        let mut datapack = Datapack::new("demo");
        for _ in 0..3 {
            datapack.mc_function("loop", FunctionOptions::each_tick(), |_| Ok(())).unwrap();
        }
        assert_eq!(datapack.tick_functions(), &["demo:loop".to_string()]);
    }

    #[test]
    fn test_interval_loop_schedules_itself() {
        let mut datapack = Datapack::new("demo");
        for _ in 0..2 {
            datapack
                .mc_function("slow", FunctionOptions::every(20), |dp| {
                    dp.emit("say tick");
                    Ok(())
                })
                .unwrap();
        }

        assert_eq!(
            datapack.load_commands(),
            &["schedule function demo:slow 20t replace".to_string()]
        );
        assert_eq!(
            datapack.function("slow").unwrap().render(),
            vec![
                "say tick".to_string(),
                "say tick".to_string(),
                "schedule function demo:slow 20t replace".to_string(),
            ]
        );
    }

    #[test]
    fn test_append_then_loop_starts_from_load() {
        let mut datapack = Datapack::new("demo");
        datapack
            .mc_function("timer", FunctionOptions::append(), |dp| {
                dp.emit("say setup");
                Ok(())
            })
            .unwrap();
        datapack
            .mc_function("timer", FunctionOptions::every(20), |dp| {
                dp.emit("say tick");
                Ok(())
            })
            .unwrap();

        assert_eq!(
            datapack.load_commands(),
            &["schedule function demo:timer 20t replace".to_string()]
        );
        assert_eq!(
            datapack.function("timer").unwrap().render(),
            vec![
                "say setup".to_string(),
                "say tick".to_string(),
                "schedule function demo:timer 20t replace".to_string(),
            ]
        );
    }

    #[test]
    fn test_loop_interval_change_keeps_load_in_sync() {
        let mut datapack = Datapack::new("demo");
        datapack.emit("say load");
        datapack.mc_function("slow", FunctionOptions::every(20), |_| Ok(())).unwrap();
        datapack.mc_function("slow", FunctionOptions::every(40), |_| Ok(())).unwrap();

        assert_eq!(
            datapack.load_commands(),
            &[
                "say load".to_string(),
                "schedule function demo:slow 40t replace".to_string(),
            ]
        );
        assert_eq!(
            datapack.function("slow").unwrap().render(),
            vec!["schedule function demo:slow 40t replace".to_string()]
        );
    }

    #[test]
    fn test_zero_tick_loop_raised_to_one() {
        let mut datapack = Datapack::new("demo");
        datapack.mc_function("fast", FunctionOptions::every(0), |_| Ok(())).unwrap();
        let direct = FunctionOptions { on_conflict: OnConflict::Append, repeat: Repeat::Every(0) };
        datapack.mc_function("direct", direct, |_| Ok(())).unwrap();

        assert_eq!(FunctionOptions::every(0).repeat, Repeat::Every(1));
        assert_eq!(datapack.function("fast").unwrap().repeat, Repeat::Every(1));
        assert_eq!(
            datapack.load_commands(),
            &[
                "schedule function demo:fast 1t replace".to_string(),
                "schedule function demo:direct 1t replace".to_string(),
            ]
        );
    }

    #[test]
    fn test_failing_body_closes_block() {
        let mut datapack = Datapack::new("demo");
        let result = datapack.mc_function("broken", FunctionOptions::append(), |dp| {
            dp.emit("say before");
            Err(Error::UnknownOperation("^=".to_string()))
        });

        assert!(matches!(result, Err(Error::UnknownOperation(_))));
        assert_eq!(datapack.current_function(), None);
        datapack.emit("say after");
        assert_eq!(datapack.load_commands(), &["say after".to_string()]);
    }

    #[test]
    fn test_explicit_namespace_kept() {
        let datapack = Datapack::new("demo");
        assert_eq!(datapack.resource_location("other:path/fn"), "other:path/fn");
        assert_eq!(datapack.resource_location("path/fn"), "demo:path/fn");
    }

    #[test]
    fn test_objective_creation_goes_to_load() {
        let mut datapack = Datapack::new("demo");
        datapack
            .mc_function("main", FunctionOptions::append(), |dp| {
                dp.create_objective("kills", Criteria::PlayerKillCount);
                Ok(())
            })
            .unwrap();

        assert_eq!(
            datapack.load_commands(),
            &["scoreboard objectives add kills playerKillCount".to_string()]
        );
        assert!(datapack.function("main").unwrap().commands.is_empty());
    }

    #[test]
    fn test_json_dump() {
        let mut datapack = Datapack::new("demo");
        datapack.mc_function("main", FunctionOptions::append(), |dp| {
            dp.emit("say hi");
            Ok(())
        }).unwrap();

        let json: serde_json::Value = serde_json::from_str(&datapack.get_json_string().unwrap()).unwrap();
        assert_eq!(json["namespace"], "demo");
        assert_eq!(json["functions"]["demo:main"]["commands"][0], "say hi");
        assert!(json.get("stack").is_none());
    }
}
