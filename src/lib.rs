//! Helpers for generating Minecraft datapacks: function blocks registered
//! through controllers, and a scoreboard wrapper with shorthand operations.

mod datapack;
mod objective;
mod score;
mod scoreboard;
mod controller;
mod error;
mod print_utils;
mod wasm;

// Public re-exports
pub use datapack::{Datapack, FunctionOptions, McFunction, OnConflict, Repeat};
pub use objective::{Criteria, Objective};
pub use score::{Comparison, Condition, Operation, Score};
pub use scoreboard::{IntoOperand, Operand, ScoreComponent, Scoreboard, TextComponent};
pub use controller::{function_block, loop_block, tick_block, Controller};
pub use error::{Error, Result};
pub use print_utils::{format_datapack as print_datapack, format_function, format_json_datapack as print_json_datapack};
pub use wasm::{ConditionWrapper, DatapackWrapper, ScoreboardWrapper};
