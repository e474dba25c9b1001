use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::datapack::Datapack;
use crate::error::Error;

/// One target's score on one objective.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Score {
    pub target: String,
    pub objective: String,
}

impl Score {
    pub fn new(target: String, objective: String) -> Self {
        Score { target, objective }
    }

    pub fn set(&self, datapack: &mut Datapack, value: i32) {
        datapack.emit(format!("scoreboard players set {} {}", self, value));
    }

    pub fn add(&self, datapack: &mut Datapack, value: i32) {
        if value < 0 {
            datapack.emit(format!("scoreboard players remove {} {}", self, value.unsigned_abs()));
        } else {
            datapack.emit(format!("scoreboard players add {} {}", self, value));
        }
    }

    pub fn remove(&self, datapack: &mut Datapack, value: i32) {
        if value < 0 {
            datapack.emit(format!("scoreboard players add {} {}", self, value.unsigned_abs()));
        } else {
            datapack.emit(format!("scoreboard players remove {} {}", self, value));
        }
    }

    pub fn operation(&self, datapack: &mut Datapack, operation: Operation, other: &Score) {
        datapack.emit(format!("scoreboard players operation {} {} {}", self, operation, other));
    }

    pub fn equal_to(&self, other: &Score) -> Condition {
        Condition::new(self.clone(), Comparison::Equal, other.clone())
    }

    pub fn not_equal_to(&self, other: &Score) -> Condition {
        Condition::new(self.clone(), Comparison::NotEqual, other.clone())
    }

    pub fn greater_than(&self, other: &Score) -> Condition {
        Condition::new(self.clone(), Comparison::Greater, other.clone())
    }

    pub fn greater_or_equal(&self, other: &Score) -> Condition {
        Condition::new(self.clone(), Comparison::GreaterOrEqual, other.clone())
    }

    pub fn less_than(&self, other: &Score) -> Condition {
        Condition::new(self.clone(), Comparison::Less, other.clone())
    }

    pub fn less_or_equal(&self, other: &Score) -> Condition {
        Condition::new(self.clone(), Comparison::LessOrEqual, other.clone())
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.target, self.objective)
    }
}

/// `scoreboard players operation` operators. Only the five arithmetic
/// operators parse from text; `Assign` is used for copying scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Assign,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
}

impl Operation {
    pub fn symbol(self) -> &'static str {
        match self {
            Operation::Assign => "=",
            Operation::Add => "+=",
            Operation::Subtract => "-=",
            Operation::Multiply => "*=",
            Operation::Divide => "/=",
            Operation::Modulo => "%=",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+=" => Ok(Operation::Add),
            "-=" => Ok(Operation::Subtract),
            "*=" => Ok(Operation::Multiply),
            "/=" => Ok(Operation::Divide),
            "%=" => Ok(Operation::Modulo),
            other => Err(Error::UnknownOperation(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Less,
    LessOrEqual,
    Greater,
    Equal,
    GreaterOrEqual,
    NotEqual,
}

impl FromStr for Comparison {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "<" => Ok(Comparison::Less),
            "<=" => Ok(Comparison::LessOrEqual),
            ">" => Ok(Comparison::Greater),
            "==" | "><" => Ok(Comparison::Equal),
            ">=" => Ok(Comparison::GreaterOrEqual),
            "!=" => Ok(Comparison::NotEqual),
            other => Err(Error::UnknownComparison(other.to_string())),
        }
    }
}

/// A score comparison usable in `execute if|unless`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Condition {
    pub left: Score,
    pub comparison: Comparison,
    pub right: Score,
}

impl Condition {
    pub fn new(left: Score, comparison: Comparison, right: Score) -> Self {
        Condition { left, comparison, right }
    }

    // The game has no `!=` relation; not-equal is `unless ... =`.
    pub fn keyword(&self) -> &'static str {
        match self.comparison {
            Comparison::NotEqual => "unless",
            _ => "if",
        }
    }

    fn relation(&self) -> &'static str {
        match self.comparison {
            Comparison::Less => "<",
            Comparison::LessOrEqual => "<=",
            Comparison::Greater => ">",
            Comparison::GreaterOrEqual => ">=",
            Comparison::Equal | Comparison::NotEqual => "=",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "score {} {} {}", self.left, self.relation(), self.right)
    }
}
