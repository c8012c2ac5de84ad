use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use liftplan::config::Config;
use liftplan::handlers::{auth, workouts};
use liftplan::repositories::{
    ExerciseRepository, SessionRepository, UserRepository, WorkoutRepository,
};
use liftplan::{db, migrations, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "liftplan=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    tracing::info!("Connecting to database: {}", config.database_url);

    let pool = db::create_pool(&config.database_url)?;

    migrations::run_migrations(&pool)?;

    // Create repositories
    let user_repo = UserRepository::new(pool.clone());
    let session_repo = SessionRepository::new(pool.clone());
    let exercise_repo = ExerciseRepository::new(pool.clone());
    let workout_repo = WorkoutRepository::new(pool.clone());

    if config.seed_exercises {
        let seeded = exercise_repo.seed_defaults().await?;
        if seeded > 0 {
            tracing::info!("Seeded {} default exercises", seeded);
        }
    }

    let expired = session_repo.cleanup_expired().await?;
    if expired > 0 {
        tracing::info!("Removed {} expired sessions", expired);
    }

    tracing::info!(
        "Database holds {} users, {} exercises and {} workouts",
        user_repo.count().await?,
        exercise_repo.count().await?,
        workout_repo.count().await?
    );

    tracing::info!(
        "Generating workouts of {} exercises with {} extra swaps",
        config.workout_size,
        config.swap_count
    );

    // Create handler states
    let auth_state = auth::AuthState {
        user_repo,
        session_repo,
    };
    let workouts_state = workouts::WorkoutsState {
        workout_repo,
        exercise_repo,
        workout_size: config.workout_size,
        swap_count: config.swap_count,
    };

    let app = routes::create_router(auth_state, workouts_state, pool);

    let addr = config.server_addr();
    tracing::info!("Starting server at http://{}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutting down"),
        Err(e) => {
            tracing::error!("Failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await
        }
    }
}
