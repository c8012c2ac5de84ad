use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseKind {
    Cardio,
    Standard,
}

impl ExerciseKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseKind::Cardio => "cardio",
            ExerciseKind::Standard => "standard",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cardio" => Some(ExerciseKind::Cardio),
            "standard" => Some(ExerciseKind::Standard),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub kind: ExerciseKind,
}

impl Exercise {
    pub fn is_cardio(&self) -> bool {
        self.kind == ExerciseKind::Cardio
    }
}

impl FromSqliteRow for Exercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        let kind: String = row.get("kind")?;
        let kind = ExerciseKind::parse(&kind).ok_or_else(|| {
            rusqlite::Error::FromSqlConversionFailure(
                0,
                rusqlite::types::Type::Text,
                format!("unknown exercise kind: {}", kind).into(),
            )
        })?;
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            kind,
        })
    }
}

/// Catalog inserted into an empty database on startup.
pub const DEFAULT_CATALOG: &[(&str, ExerciseKind)] = &[
    ("Bench Press", ExerciseKind::Standard),
    ("Back Squat", ExerciseKind::Standard),
    ("Deadlift", ExerciseKind::Standard),
    ("Overhead Press", ExerciseKind::Standard),
    ("Barbell Row", ExerciseKind::Standard),
    ("Pull Up", ExerciseKind::Standard),
    ("Lunges", ExerciseKind::Standard),
    ("Bicep Curls", ExerciseKind::Standard),
    ("Tricep Dips", ExerciseKind::Standard),
    ("Plank", ExerciseKind::Standard),
    ("Running", ExerciseKind::Cardio),
    ("Rowing Machine", ExerciseKind::Cardio),
    ("Jump Rope", ExerciseKind::Cardio),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_kind_round_trips_through_str() {
        assert_eq!(ExerciseKind::parse("cardio"), Some(ExerciseKind::Cardio));
        assert_eq!(ExerciseKind::parse("standard"), Some(ExerciseKind::Standard));
        assert_eq!(ExerciseKind::Cardio.as_str(), "cardio");
        assert_eq!(ExerciseKind::Standard.as_str(), "standard");
    }

    #[test]
    fn test_exercise_kind_rejects_unknown() {
        assert_eq!(ExerciseKind::parse("Cardio"), None);
        assert_eq!(ExerciseKind::parse(""), None);
    }

    #[test]
    fn test_default_catalog_has_both_kinds() {
        assert!(DEFAULT_CATALOG
            .iter()
            .any(|(_, kind)| *kind == ExerciseKind::Cardio));
        assert!(DEFAULT_CATALOG
            .iter()
            .any(|(_, kind)| *kind == ExerciseKind::Standard));
    }
}
