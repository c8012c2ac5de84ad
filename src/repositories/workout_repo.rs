use chrono::Utc;
use rusqlite::{ffi, OptionalExtension, Transaction};
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{Exercise, FromSqliteRow, Workout};

#[derive(Clone)]
pub struct WorkoutRepository {
    pool: DbPool,
}

fn insert_workout(tx: &Transaction, workout: &Workout) -> Result<()> {
    let inserted = tx.execute(
        "INSERT INTO workouts (id, user_id, name, created_at) VALUES (?, ?, ?, ?)",
        rusqlite::params![workout.id, workout.user_id, workout.name, workout.created_at],
    );

    match inserted {
        Ok(_) => Ok(()),
        Err(rusqlite::Error::SqliteFailure(e, _)) if e.extended_code == ffi::SQLITE_CONSTRAINT_UNIQUE => {
            Err(AppError::Validation(format!(
                "You already have a workout named \"{}\"",
                workout.name
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// Replace the exercise list of a workout, keeping the given order.
///
/// `create` calls this as its second step, after the workout row exists.
fn link_exercises(tx: &Transaction, workout_id: &str, exercise_ids: &[String]) -> Result<()> {
    tx.execute(
        "DELETE FROM workout_exercises WHERE workout_id = ?",
        [workout_id],
    )?;

    let mut stmt = tx.prepare(
        "INSERT INTO workout_exercises (workout_id, exercise_id, position) VALUES (?, ?, ?)",
    )?;
    for (position, exercise_id) in exercise_ids.iter().enumerate() {
        stmt.execute(rusqlite::params![workout_id, exercise_id, position as i64])?;
    }

    Ok(())
}

impl WorkoutRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Insert a workout owned by `user_id` and link its exercises in one
    /// transaction. A name the user already uses fails with
    /// `AppError::Validation` and leaves nothing behind.
    pub async fn create(
        &self,
        user_id: &str,
        name: &str,
        exercise_ids: &[String],
    ) -> Result<Workout> {
        let workout = Workout {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name: name.to_string(),
            created_at: Utc::now(),
        };
        let workout_clone = workout.clone();
        let exercise_ids = exercise_ids.to_vec();

        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            insert_workout(&tx, &workout_clone)?;
            link_exercises(&tx, &workout_clone.id, &exercise_ids)?;
            tx.commit()?;
            Ok(())
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

        Ok(workout)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Workout>> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM workouts WHERE id = ?")?;
            let result = stmt.query_row([&id], Workout::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Workouts owned by `user_id`, oldest first.
    pub async fn find_by_user(&self, user_id: &str) -> Result<Vec<Workout>> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT * FROM workouts WHERE user_id = ? ORDER BY created_at, rowid",
            )?;
            let workouts = stmt
                .query_map([&user_id], Workout::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(workouts)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn count_by_user(&self, user_id: &str) -> Result<i64> {
        let pool = self.pool.clone();
        let user_id = user_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 = conn.query_row(
                "SELECT COUNT(*) FROM workouts WHERE user_id = ?",
                [&user_id],
                |row| row.get(0),
            )?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn count(&self) -> Result<i64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM workouts", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Exercises linked to a workout in stored order.
    pub async fn find_exercises(&self, workout_id: &str) -> Result<Vec<Exercise>> {
        let pool = self.pool.clone();
        let workout_id = workout_id.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare(
                "SELECT e.* FROM workout_exercises we
                 JOIN exercises e ON we.exercise_id = e.id
                 WHERE we.workout_id = ?
                 ORDER BY we.position",
            )?;
            let exercises = stmt
                .query_map([&workout_id], Exercise::from_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(exercises)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Delete a workout and its exercise links. Exercises themselves stay.
    pub async fn delete(&self, id: &str) -> Result<bool> {
        let pool = self.pool.clone();
        let id = id.to_string();
        tokio::task::spawn_blocking(move || {
            let mut conn = pool.get()?;
            let tx = conn.transaction()?;
            tx.execute("DELETE FROM workout_exercises WHERE workout_id = ?", [&id])?;
            let rows = tx.execute("DELETE FROM workouts WHERE id = ?", [&id])?;
            tx.commit()?;
            Ok(rows > 0)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}
