use std::collections::HashSet;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use crate::datapack::Datapack;
use crate::error::{Error, Result};
use crate::objective::{Criteria, Objective};
use crate::score::{Comparison, Condition, Operation, Score};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    Score(Score),
    Literal(i32),
}

/// Conversion into an [`Operand`]. The error carries a description of the
/// rejected value.
pub trait IntoOperand {
    fn into_operand(self) -> std::result::Result<Operand, String>;
}

impl IntoOperand for Operand {
    fn into_operand(self) -> std::result::Result<Operand, String> {
        Ok(self)
    }
}

impl IntoOperand for i32 {
    fn into_operand(self) -> std::result::Result<Operand, String> {
        Ok(Operand::Literal(self))
    }
}

impl IntoOperand for Score {
    fn into_operand(self) -> std::result::Result<Operand, String> {
        Ok(Operand::Score(self))
    }
}

impl IntoOperand for &Score {
    fn into_operand(self) -> std::result::Result<Operand, String> {
        Ok(Operand::Score(self.clone()))
    }
}

impl IntoOperand for &Value {
    fn into_operand(self) -> std::result::Result<Operand, String> {
        match self {
            Value::Number(number) => {
                if let Some(value) = number.as_i64().and_then(|v| i32::try_from(v).ok()) {
                    return Ok(Operand::Literal(value));
                }
                // JS numbers arrive as floats
                match number.as_f64() {
                    Some(f) if f.fract() == 0.0 && f >= i32::MIN as f64 && f <= i32::MAX as f64 => {
                        Ok(Operand::Literal(f as i32))
                    }
                    _ => Err(format!("non-integer number {}", number)),
                }
            }
            Value::Object(_) => serde_json::from_value::<Score>(self.clone())
                .map(Operand::Score)
                .map_err(|_| format!("object {}", self)),
            other => Err(other.to_string()),
        }
    }
}

impl IntoOperand for Value {
    fn into_operand(self) -> std::result::Result<Operand, String> {
        (&self).into_operand()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub name: String,
    pub objective: String,
}

/// Text component showing a score, as used by `tellraw`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextComponent {
    pub score: ScoreComponent,
}

/// Shorthand over a single objective.
///
/// Integer literals used in `calculate` and `compare` are stored on fake
/// players named `#<value>`; each value is set at most once per instance.
#[derive(Debug, Clone)]
pub struct Scoreboard {
    name: String,
    criteria: Criteria,
    objective: Objective,
    literals: HashSet<i32>,
}

impl Scoreboard {
    pub fn new(datapack: &mut Datapack, name: &str, criteria: Criteria) -> Self {
        let objective = datapack.create_objective(name, criteria.clone());
        Scoreboard {
            name: name.to_string(),
            criteria,
            objective,
            literals: HashSet::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn criteria(&self) -> &Criteria {
        &self.criteria
    }

    pub fn objective(&self) -> &Objective {
        &self.objective
    }

    pub fn selector(&self, target: &str) -> Score {
        self.objective.score(target)
    }

    pub fn is_literal_registered(&self, value: i32) -> bool {
        self.literals.contains(&value)
    }

    pub fn set_absolute(&mut self, datapack: &mut Datapack, value: i32) -> Score {
        let literal = self.selector(&format!("#{}", value));
        if self.literals.insert(value) {
            debug!("Registering literal {} on {}", value, self.name);
            literal.set(datapack, value);
        }
        literal
    }

    pub fn set(&self, datapack: &mut Datapack, target: &str, value: i32) {
        self.selector(target).set(datapack, value);
    }

    pub fn add(&self, datapack: &mut Datapack, target: &str, value: i32) {
        self.selector(target).add(datapack, value);
    }

    pub fn remove(&self, datapack: &mut Datapack, target: &str, value: i32) {
        self.selector(target).remove(datapack, value);
    }

    pub fn set_from(&self, datapack: &mut Datapack, target: &str, other: &Score) {
        self.selector(target).operation(datapack, Operation::Assign, other);
    }

    pub fn add_from(&self, datapack: &mut Datapack, target: &str, other: &Score) {
        self.selector(target).operation(datapack, Operation::Add, other);
    }

    fn resolve(&mut self, datapack: &mut Datapack, operand: Operand) -> Score {
        match operand {
            Operand::Score(score) => score,
            Operand::Literal(value) => self.set_absolute(datapack, value),
        }
    }

    pub fn calculate<O: IntoOperand>(
        &mut self,
        datapack: &mut Datapack,
        target: &str,
        operation: Operation,
        operand: O,
    ) -> Result<()> {
        let operand = operand.into_operand().map_err(Error::InvalidCalculateOperand)?;
        let other = self.resolve(datapack, operand);
        self.selector(target).operation(datapack, operation, &other);
        Ok(())
    }

    #[doc(alias = "if")]
    pub fn compare<O: IntoOperand>(
        &mut self,
        datapack: &mut Datapack,
        target: &str,
        comparison: Comparison,
        operand: O,
    ) -> Result<Condition> {
        let operand = operand.into_operand().map_err(Error::InvalidConditionOperand)?;
        let other = self.resolve(datapack, operand);
        let score = self.selector(target);
        Ok(match comparison {
            Comparison::Less => score.less_than(&other),
            Comparison::LessOrEqual => score.less_or_equal(&other),
            Comparison::Greater => score.greater_than(&other),
            Comparison::Equal => score.equal_to(&other),
            Comparison::GreaterOrEqual => score.greater_or_equal(&other),
            Comparison::NotEqual => score.not_equal_to(&other),
        })
    }

    #[doc(alias = "tellraw")]
    pub fn tellraw_score(&self, target: &str) -> TextComponent {
        TextComponent {
            score: ScoreComponent {
                name: target.to_string(),
                objective: self.name.clone(),
            },
        }
    }
}
