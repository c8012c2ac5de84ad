use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::{Exercise, FromSqliteRow};

/// A persisted workout. The owner never changes after insert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workout {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Workout {
    pub fn is_owned_by(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

impl FromSqliteRow for Workout {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            created_at: row.get("created_at")?,
        })
    }
}

/// A workout that has not been saved and so has no id.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WorkoutDraft {
    pub name: String,
    pub exercises: Vec<Exercise>,
}

/// Form body of `POST /workouts`. Repeated keys collect into the vectors.
#[derive(Debug, Default, Deserialize)]
pub struct CreateWorkout {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub exercise_ids: Vec<String>,
    #[serde(default)]
    pub swap_ids: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_owned_by() {
        let workout = Workout {
            id: "w1".to_string(),
            user_id: "user1".to_string(),
            name: "Push day".to_string(),
            created_at: Utc::now(),
        };

        assert!(workout.is_owned_by("user1"));
        assert!(!workout.is_owned_by("user2"));
    }

    #[test]
    fn test_draft_default_is_empty() {
        let draft = WorkoutDraft::default();
        assert!(draft.name.is_empty());
        assert!(draft.exercises.is_empty());
    }
}
