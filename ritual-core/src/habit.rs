//! Habit and completion documents as the backend stores them.

use crate::identity::Timestamp;
use crate::ids::{CompletionId, HabitId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How often a habit is meant to recur.
///
/// Stored lowercase on the wire; [`Frequency::label`] is the capitalized
/// form the views render on the badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Daily,
    Weekly,
    Monthly,
}

impl Frequency {
    /// All variants in the order the add-habit selector cycles through.
    pub const ALL: [Frequency; 3] = [Frequency::Daily, Frequency::Weekly, Frequency::Monthly];

    pub fn label(&self) -> &'static str {
        match self {
            Frequency::Daily => "Daily",
            Frequency::Weekly => "Weekly",
            Frequency::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = match self {
            Frequency::Daily => "daily",
            Frequency::Weekly => "weekly",
            Frequency::Monthly => "monthly",
        };
        write!(f, "{}", value)
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(Frequency::Daily),
            "weekly" => Ok(Frequency::Weekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(format!("Unknown frequency: {}", other)),
        }
    }
}

/// A recurring task owned by one user, with a denormalized streak counter.
///
/// `streak_count` and `last_completed` are maintained by the client on each
/// completion; the backend stores them verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: HabitId,
    pub user_id: UserId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub frequency: Frequency,
    pub streak_count: u32,
    #[serde(default)]
    pub last_completed: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Append-only record that a habit was performed at one point in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Completion {
    pub id: CompletionId,
    pub habit_id: HabitId,
    pub user_id: UserId,
    pub completed_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sample_habit() -> Habit {
        Habit {
            id: HabitId::new("habit-1"),
            user_id: UserId::new("user-1"),
            title: "Morning run".to_string(),
            description: Some("Around the block".to_string()),
            frequency: Frequency::Daily,
            streak_count: 3,
            last_completed: Some(Utc::now()),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn frequency_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Frequency::Daily).unwrap(), "\"daily\"");
        assert_eq!(
            serde_json::to_string(&Frequency::Monthly).unwrap(),
            "\"monthly\""
        );
    }

    #[test]
    fn frequency_label_is_capitalized() {
        assert_eq!(Frequency::Weekly.label(), "Weekly");
        assert_eq!(Frequency::Weekly.to_string(), "weekly");
    }

    #[test]
    fn frequency_parses_case_insensitively() {
        assert_eq!("Daily".parse::<Frequency>().unwrap(), Frequency::Daily);
        assert_eq!(" weekly ".parse::<Frequency>().unwrap(), Frequency::Weekly);
        assert!("yearly".parse::<Frequency>().is_err());
    }

    #[test]
    fn habit_round_trips_through_json() {
        let habit = sample_habit();
        let json = serde_json::to_string(&habit).unwrap();
        let back: Habit = serde_json::from_str(&json).unwrap();
        assert_eq!(back, habit);
    }

    #[test]
    fn habit_tolerates_missing_optional_fields() {
        let json = r#"{
            "id": "habit-2",
            "user_id": "user-1",
            "title": "Read",
            "frequency": "weekly",
            "streak_count": 0,
            "created_at": "2025-01-15T08:00:00Z"
        }"#;
        let habit: Habit = serde_json::from_str(json).unwrap();
        assert_eq!(habit.description, None);
        assert_eq!(habit.last_completed, None);
    }

    mod prop_tests {
        use super::*;
        use proptest::prelude::*;

        fn frequency_strategy() -> impl Strategy<Value = Frequency> {
            prop_oneof![
                Just(Frequency::Daily),
                Just(Frequency::Weekly),
                Just(Frequency::Monthly),
            ]
        }

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn frequency_display_parses_back(freq in frequency_strategy()) {
                let parsed: Frequency = freq.to_string().parse().unwrap();
                prop_assert_eq!(parsed, freq);
            }

            #[test]
            fn frequency_label_starts_with_display(freq in frequency_strategy()) {
                let label = freq.label().to_ascii_lowercase();
                prop_assert_eq!(label, freq.to_string());
            }
        }
    }
}
