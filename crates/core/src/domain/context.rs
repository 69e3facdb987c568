use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mood {
    Relaxed,
    Focused,
    Inspired,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingGoal {
    Learning,
    Entertainment,
    PersonalGrowth,
    Relaxation,
}

/// Signals a shopper supplies to steer recommendations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationContext {
    pub mood: Mood,
    pub time_of_day: TimeOfDay,
    pub reading_goal: ReadingGoal,
}

impl RecommendationContext {
    pub fn new(mood: Mood, time_of_day: TimeOfDay, reading_goal: ReadingGoal) -> Self {
        Self { mood, time_of_day, reading_goal }
    }

    /// Parses the three raw signals, rejecting any value outside its enumeration.
    pub fn parse(mood: &str, time_of_day: &str, reading_goal: &str) -> Result<Self, DomainError> {
        Ok(Self { mood: mood.parse()?, time_of_day: time_of_day.parse()?, reading_goal: reading_goal.parse()? })
    }
}

impl Mood {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Relaxed => "relaxed",
            Mood::Focused => "focused",
            Mood::Inspired => "inspired",
        }
    }
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        }
    }
}

impl ReadingGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReadingGoal::Learning => "learning",
            ReadingGoal::Entertainment => "entertainment",
            ReadingGoal::PersonalGrowth => "personal_growth",
            ReadingGoal::Relaxation => "relaxation",
        }
    }
}

impl FromStr for Mood {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "relaxed" => Ok(Self::Relaxed),
            "focused" => Ok(Self::Focused),
            "inspired" => Ok(Self::Inspired),
            other => Err(DomainError::UnrecognizedValue {
                field: "mood",
                value: other.to_owned(),
                expected: "relaxed|focused|inspired",
            }),
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            other => Err(DomainError::UnrecognizedValue {
                field: "time of day",
                value: other.to_owned(),
                expected: "morning|afternoon|evening",
            }),
        }
    }
}

impl FromStr for ReadingGoal {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "learning" => Ok(Self::Learning),
            "entertainment" => Ok(Self::Entertainment),
            "personal_growth" => Ok(Self::PersonalGrowth),
            "relaxation" => Ok(Self::Relaxation),
            other => Err(DomainError::UnrecognizedValue {
                field: "reading goal",
                value: other.to_owned(),
                expected: "learning|entertainment|personal_growth|relaxation",
            }),
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ReadingGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::{Mood, ReadingGoal, RecommendationContext, TimeOfDay};
    use crate::errors::DomainError;

    #[test]
    fn parses_all_signals() {
        let context = RecommendationContext::parse("Inspired", " evening", "personal_growth")
            .expect("valid context");

        assert_eq!(
            context,
            RecommendationContext::new(Mood::Inspired, TimeOfDay::Evening, ReadingGoal::PersonalGrowth)
        );
    }

    #[test]
    fn unknown_signal_fails_fast_instead_of_defaulting() {
        let error = RecommendationContext::parse("relaxed", "midnight", "learning")
            .expect_err("unknown time of day must be rejected");

        assert!(matches!(
            error,
            DomainError::UnrecognizedValue { field: "time of day", ref value, .. } if value == "midnight"
        ));
        assert!("sleepy".parse::<Mood>().is_err());
        assert!("growth".parse::<ReadingGoal>().is_err());
    }
}
