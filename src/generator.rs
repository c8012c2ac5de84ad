//! Random workout generation.
//!
//! A draw takes `requested` distinct exercises from the pool, at most one of
//! them cardio. A drawn cardio exercise becomes the whole draft; every
//! standard exercise drawn is offered back to the user as a swap candidate,
//! so there are `requested - 1` swaps with cardio and `requested` without.

use rand::seq::{index, SliceRandom};
use rand::Rng;
use thiserror::Error;

use crate::models::{Exercise, WorkoutDraft};

/// Read-only source of exercises to draw from.
pub trait ExercisePool {
    fn all_exercises(&self) -> &[Exercise];
}

impl ExercisePool for [Exercise] {
    fn all_exercises(&self) -> &[Exercise] {
        self
    }
}

impl ExercisePool for Vec<Exercise> {
    fn all_exercises(&self) -> &[Exercise] {
        self
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("A workout needs at least one exercise")]
    EmptyRequest,

    #[error("Requested {requested} exercises but only {available} are available")]
    InsufficientPool { requested: usize, available: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedWorkout {
    pub draft: WorkoutDraft,
    pub swaps: Vec<Exercise>,
}

/// Draw `requested` exercises from `pool` and split them into a draft and
/// swap candidates.
pub fn generate<P, R>(
    pool: &P,
    requested: usize,
    rng: &mut R,
) -> Result<GeneratedWorkout, GeneratorError>
where
    P: ExercisePool + ?Sized,
    R: Rng + ?Sized,
{
    let drawn = draw(pool, requested, rng)?;
    Ok(split_drawn(drawn))
}

/// Sample `requested` distinct exercises without replacement.
///
/// At most one cardio exercise is drawn: when the pool has any, one is picked
/// at random and the remaining slots are filled from standard exercises only.
pub fn draw<P, R>(pool: &P, requested: usize, rng: &mut R) -> Result<Vec<Exercise>, GeneratorError>
where
    P: ExercisePool + ?Sized,
    R: Rng + ?Sized,
{
    if requested == 0 {
        return Err(GeneratorError::EmptyRequest);
    }

    let (cardio, standard): (Vec<&Exercise>, Vec<&Exercise>) = pool
        .all_exercises()
        .iter()
        .partition(|e| e.is_cardio());

    let available = standard.len() + usize::from(!cardio.is_empty());
    if available < requested {
        return Err(GeneratorError::InsufficientPool {
            requested,
            available,
        });
    }

    let mut drawn = Vec::with_capacity(requested);
    if let Some(pick) = cardio.choose(rng) {
        drawn.push((*pick).clone());
    }

    let standard_slots = requested - drawn.len();
    drawn.extend(
        index::sample(rng, standard.len(), standard_slots)
            .into_iter()
            .map(|i| standard[i].clone()),
    );

    Ok(drawn)
}

/// Split an already drawn set.
///
/// With a cardio exercise present the draft holds only the first one drawn
/// and any further cardio is discarded. Without one the draft holds every
/// standard exercise. Swaps are always the standard exercises in drawn order.
pub fn split_drawn(drawn: Vec<Exercise>) -> GeneratedWorkout {
    let (cardio, swaps): (Vec<Exercise>, Vec<Exercise>) =
        drawn.into_iter().partition(Exercise::is_cardio);

    let exercises = match cardio.into_iter().next() {
        Some(first) => vec![first],
        None => swaps.clone(),
    };

    GeneratedWorkout {
        draft: WorkoutDraft {
            name: String::new(),
            exercises,
        },
        swaps,
    }
}
