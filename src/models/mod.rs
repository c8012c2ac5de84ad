pub mod exercise;
pub mod from_row;
pub mod user;
pub mod workout;

pub use exercise::{Exercise, ExerciseKind};
pub use from_row::FromSqliteRow;
pub use user::{CreateUser, LoginCredentials, User};
pub use workout::{CreateWorkout, Workout, WorkoutDraft};
