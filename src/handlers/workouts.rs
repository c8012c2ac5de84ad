use askama::Template;
use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Response},
};
use axum_extra::extract::Form;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{AppError, Result};
use crate::generator;
use crate::handlers::found;
use crate::middleware::AuthUser;
use crate::models::{CreateWorkout, Exercise, Workout, WorkoutDraft};
use crate::repositories::{ExerciseRepository, WorkoutRepository};

pub const MAX_NAME_LEN: usize = 100;

#[derive(Clone)]
pub struct WorkoutsState {
    pub workout_repo: WorkoutRepository,
    pub exercise_repo: ExerciseRepository,
    pub workout_size: usize,
    pub swap_count: usize,
}

/// A workout the caller owns, with its exercises in stored order.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutDetail {
    pub workout: Workout,
    pub exercises: Vec<Exercise>,
}

/// Everything the new-workout form shows.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationForm {
    pub draft: WorkoutDraft,
    pub swaps: Vec<Exercise>,
    /// Exercise ids that start out selected in the form.
    pub selected_ids: Vec<String>,
    pub error: Option<String>,
}

impl GenerationForm {
    /// Draft exercises that are not offered as swaps, i.e. always submitted.
    pub fn fixed(&self) -> Vec<Exercise> {
        self.draft
            .exercises
            .iter()
            .filter(|e| !self.swaps.iter().any(|s| s.id == e.id))
            .cloned()
            .collect()
    }
}

#[derive(Debug)]
pub enum CreateOutcome {
    Created(Workout),
    Rejected(GenerationForm),
}

impl WorkoutsState {
    /// How many exercises a single generation draws.
    pub fn requested_size(&self) -> usize {
        self.workout_size + self.swap_count
    }

    pub async fn list(&self, user: &AuthUser) -> Result<Vec<Workout>> {
        self.workout_repo.find_by_user(&user.id).await
    }

    /// Load a workout the caller owns.
    ///
    /// A missing id is `NotFound`; someone else's workout is `Forbidden`.
    pub async fn retrieve(&self, user: &AuthUser, id: &str) -> Result<WorkoutDetail> {
        let workout = self.owned_workout(user, id).await?;
        let exercises = self.workout_repo.find_exercises(&workout.id).await?;
        Ok(WorkoutDetail { workout, exercises })
    }

    pub async fn generation_form<R>(&self, _user: &AuthUser, rng: &mut R) -> Result<GenerationForm>
    where
        R: Rng + Send,
    {
        let pool = self.exercise_repo.find_all().await?;
        let generated = generator::generate(&pool, self.requested_size(), rng)?;

        let mut form = GenerationForm {
            draft: generated.draft,
            swaps: generated.swaps,
            selected_ids: Vec::new(),
            error: None,
        };

        let fixed = form.fixed();
        let open_slots = self.workout_size.saturating_sub(fixed.len());
        form.selected_ids = fixed
            .iter()
            .chain(form.swaps.iter().take(open_slots))
            .map(|e| e.id.clone())
            .collect();

        Ok(form)
    }

    pub async fn create(&self, user: &AuthUser, params: CreateWorkout) -> Result<CreateOutcome> {
        let name = params.name.trim().to_string();

        if let Some(message) = self.validate(&name, &params.exercise_ids).await? {
            return self.reject(params, message).await;
        }

        match self
            .workout_repo
            .create(&user.id, &name, &params.exercise_ids)
            .await
        {
            Ok(workout) => {
                tracing::info!(
                    "User {} created workout {} with {} exercises",
                    user.username,
                    workout.id,
                    params.exercise_ids.len()
                );
                Ok(CreateOutcome::Created(workout))
            }
            Err(AppError::Validation(message)) => self.reject(params, message).await,
            Err(e) => Err(e),
        }
    }

    pub async fn destroy(&self, user: &AuthUser, id: &str) -> Result<()> {
        let workout = self.owned_workout(user, id).await?;
        self.workout_repo.delete(&workout.id).await?;
        tracing::info!("User {} deleted workout {}", user.username, workout.id);
        Ok(())
    }

    async fn owned_workout(&self, user: &AuthUser, id: &str) -> Result<Workout> {
        let workout = self
            .workout_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Workout not found".to_string()))?;

        if !workout.is_owned_by(&user.id) {
            tracing::warn!("User {} denied access to workout {}", user.username, id);
            return Err(AppError::Forbidden);
        }

        Ok(workout)
    }

    async fn validate(&self, name: &str, exercise_ids: &[String]) -> Result<Option<String>> {
        if name.is_empty() {
            return Ok(Some("Name is required".to_string()));
        }

        if name.chars().count() > MAX_NAME_LEN {
            return Ok(Some(format!(
                "Name must be at most {} characters",
                MAX_NAME_LEN
            )));
        }

        if exercise_ids.is_empty() {
            return Ok(Some("Pick at least one exercise".to_string()));
        }

        let found = self.exercise_repo.find_many(exercise_ids).await?;
        if found.len() != exercise_ids.len() {
            return Ok(Some("Some of the selected exercises do not exist".to_string()));
        }

        Ok(None)
    }

    /// Rebuild the form from what was submitted so the user's swaps survive.
    async fn reject(&self, params: CreateWorkout, message: String) -> Result<CreateOutcome> {
        let exercises = self.exercise_repo.find_many(&params.exercise_ids).await?;
        let swaps = self.exercise_repo.find_many(&params.swap_ids).await?;

        Ok(CreateOutcome::Rejected(GenerationForm {
            draft: WorkoutDraft {
                name: params.name,
                exercises,
            },
            swaps,
            selected_ids: params.exercise_ids,
            error: Some(message),
        }))
    }
}

// Templates
#[derive(Template)]
#[template(path = "workouts/list.html")]
struct WorkoutsListTemplate {
    user: AuthUser,
    workouts: Vec<Workout>,
}

#[derive(Template)]
#[template(path = "workouts/show.html")]
struct ShowWorkoutTemplate {
    user: AuthUser,
    workout: Workout,
    exercises: Vec<Exercise>,
}

struct SwapOption {
    exercise: Exercise,
    checked: bool,
}

#[derive(Template)]
#[template(path = "workouts/new.html")]
struct NewWorkoutTemplate {
    user: AuthUser,
    name: String,
    fixed: Vec<Exercise>,
    swaps: Vec<SwapOption>,
    error: Option<String>,
}

impl NewWorkoutTemplate {
    fn new(user: AuthUser, form: GenerationForm) -> Self {
        let fixed = form.fixed();
        let selected_ids = form.selected_ids;
        let swaps = form
            .swaps
            .into_iter()
            .map(|exercise| SwapOption {
                checked: selected_ids.contains(&exercise.id),
                exercise,
            })
            .collect();

        Self {
            user,
            name: form.draft.name,
            fixed,
            swaps,
            error: form.error,
        }
    }
}

fn render(template: impl Template) -> Result<Response> {
    Ok(Html(
        template
            .render()
            .map_err(|e| AppError::Internal(e.to_string()))?,
    )
    .into_response())
}

// Handlers
pub async fn list(State(state): State<WorkoutsState>, auth_user: AuthUser) -> Result<Response> {
    let workouts = state.list(&auth_user).await?;

    render(WorkoutsListTemplate {
        user: auth_user,
        workouts,
    })
}

pub async fn show(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    let detail = state.retrieve(&auth_user, &id).await?;

    render(ShowWorkoutTemplate {
        user: auth_user,
        workout: detail.workout,
        exercises: detail.exercises,
    })
}

pub async fn new_page(State(state): State<WorkoutsState>, auth_user: AuthUser) -> Result<Response> {
    let mut rng = StdRng::from_entropy();
    let form = state.generation_form(&auth_user, &mut rng).await?;

    render(NewWorkoutTemplate::new(auth_user, form))
}

pub async fn create(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Form(form): Form<CreateWorkout>,
) -> Result<Response> {
    match state.create(&auth_user, form).await? {
        CreateOutcome::Created(workout) => {
            Ok(found(&format!("/workouts/{}", workout.id)))
        }
        CreateOutcome::Rejected(form) => render(NewWorkoutTemplate::new(auth_user, form)),
    }
}

pub async fn destroy(
    State(state): State<WorkoutsState>,
    auth_user: AuthUser,
    Path(id): Path<String>,
) -> Result<Response> {
    state.destroy(&auth_user, &id).await?;
    Ok(found("/workouts"))
}
