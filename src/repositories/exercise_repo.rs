use std::collections::HashMap;

use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::exercise::DEFAULT_CATALOG;
use crate::models::{Exercise, ExerciseKind, FromSqliteRow};

#[derive(Clone)]
pub struct ExerciseRepository {
    pool: DbPool,
}

impl ExerciseRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self) -> Result<Vec<Exercise>> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM exercises ORDER BY name, id")?;
            let exercises = stmt
                .query_map([], Exercise::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(exercises)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Look up exercises by id, returned in the order of `ids`.
    ///
    /// Unknown ids are skipped; a repeated id yields the exercise each time.
    pub async fn find_many(&self, ids: &[String]) -> Result<Vec<Exercise>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let pool = self.pool.clone();
        let ids = ids.to_vec();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let placeholders = vec!["?"; ids.len()].join(", ");
            let sql = format!("SELECT * FROM exercises WHERE id IN ({})", placeholders);
            let mut stmt = conn.prepare(&sql)?;
            let found: HashMap<String, Exercise> = stmt
                .query_map(rusqlite::params_from_iter(ids.iter()), Exercise::from_row)?
                .map(|row| row.map(|e| (e.id.clone(), e)))
                .collect::<rusqlite::Result<_>>()?;

            Ok(ids.iter().filter_map(|id| found.get(id).cloned()).collect())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn count(&self) -> Result<i64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn create(&self, name: &str, kind: ExerciseKind) -> Result<Exercise> {
        let exercise = Exercise {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            kind,
        };
        let exercise_clone = exercise.clone();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO exercises (id, name, kind) VALUES (?, ?, ?)",
                rusqlite::params![
                    exercise_clone.id,
                    exercise_clone.name,
                    exercise_clone.kind.as_str()
                ],
            )?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(exercise)
    }

    /// Insert the built-in catalog when the table is empty. Returns how many
    /// exercises were added.
    pub async fn seed_defaults(&self) -> Result<usize> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;

            let existing: i64 = tx.query_row("SELECT COUNT(*) FROM exercises", [], |row| row.get(0))?;
            if existing > 0 {
                return Ok(0);
            }

            for (name, kind) in DEFAULT_CATALOG {
                tx.execute(
                    "INSERT INTO exercises (id, name, kind) VALUES (?, ?, ?)",
                    rusqlite::params![Uuid::new_v4().to_string(), name, kind.as_str()],
                )?;
            }
            tx.commit()?;

            Ok(DEFAULT_CATALOG.len())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
