use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use crate::score::Score;

/// What an objective tracks. Anything not listed here (stat criteria such as
/// `minecraft.killed:minecraft.zombie`) goes through `Custom`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum Criteria {
    #[default]
    Dummy,
    Trigger,
    DeathCount,
    PlayerKillCount,
    TotalKillCount,
    Health,
    Xp,
    Level,
    Food,
    Air,
    Armor,
    Custom(String),
}

impl Criteria {
    pub fn as_str(&self) -> &str {
        match self {
            Criteria::Dummy => "dummy",
            Criteria::Trigger => "trigger",
            Criteria::DeathCount => "deathCount",
            Criteria::PlayerKillCount => "playerKillCount",
            Criteria::TotalKillCount => "totalKillCount",
            Criteria::Health => "health",
            Criteria::Xp => "xp",
            Criteria::Level => "level",
            Criteria::Food => "food",
            Criteria::Air => "air",
            Criteria::Armor => "armor",
            Criteria::Custom(criteria) => criteria,
        }
    }
}

impl fmt::Display for Criteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Criteria {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "dummy" => Criteria::Dummy,
            "trigger" => Criteria::Trigger,
            "deathCount" => Criteria::DeathCount,
            "playerKillCount" => Criteria::PlayerKillCount,
            "totalKillCount" => Criteria::TotalKillCount,
            "health" => Criteria::Health,
            "xp" => Criteria::Xp,
            "level" => Criteria::Level,
            "food" => Criteria::Food,
            "air" => Criteria::Air,
            "armor" => Criteria::Armor,
            other => Criteria::Custom(other.to_string()),
        })
    }
}

// Criteria travel as their in-game text in the JSON dump and across the wasm boundary.
impl Serialize for Criteria {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Criteria {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Ok(text.parse().unwrap_or_else(|never| match never {}))
    }
}

/// Handle to an objective created on a [`Datapack`](crate::Datapack).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Objective {
    pub name: String,
    pub criteria: Criteria,
}

impl Objective {
    pub(crate) fn new(name: String, criteria: Criteria) -> Self {
        Objective { name, criteria }
    }

    pub fn score(&self, target: &str) -> Score {
        Score::new(target.to_string(), self.name.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_criteria_text() {
        assert_eq!(Criteria::Dummy.to_string(), "dummy");
        assert_eq!(Criteria::default(), Criteria::Dummy);
        assert_eq!(Criteria::DeathCount.to_string(), "deathCount");
        assert_eq!("playerKillCount".parse::<Criteria>().unwrap(), Criteria::PlayerKillCount);
        assert_eq!(
            "minecraft.killed:minecraft.zombie".parse::<Criteria>().unwrap(),
            Criteria::Custom("minecraft.killed:minecraft.zombie".to_string())
        );
    }

    #[test]
    fn test_objective_score() {
        let objective = Objective::new("kills".to_string(), Criteria::TotalKillCount);
        let score = objective.score("@s");
        assert_eq!(score.target, "@s");
        assert_eq!(score.objective, "kills");
    }

    #[test]
    fn test_criteria_serializes_as_text() {
        let objective = Objective::new("hp".to_string(), Criteria::Health);
        let json = serde_json::to_string(&objective).unwrap();
        assert_eq!(json, r#"{"name":"hp","criteria":"health"}"#);
    }
}
