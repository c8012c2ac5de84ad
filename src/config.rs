use std::env;

pub const DEFAULT_WORKOUT_SIZE: usize = 5;
pub const DEFAULT_SWAP_COUNT: usize = 3;

#[derive(Clone, Debug)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    /// Exercises a finished workout is meant to hold.
    pub workout_size: usize,
    /// Extra exercises drawn on top of `workout_size` to offer as swaps.
    pub swap_count: usize,
    pub seed_exercises: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            database_url: lookup("DATABASE_URL")
                .unwrap_or_else(|| "sqlite:liftplan.db?mode=rwc".to_string()),
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: lookup("PORT").and_then(|v| v.parse().ok()).unwrap_or(3000),
            workout_size: lookup("WORKOUT_SIZE")
                .and_then(|v| v.parse().ok())
                .filter(|size: &usize| *size > 0)
                .unwrap_or(DEFAULT_WORKOUT_SIZE),
            swap_count: lookup("SWAP_COUNT")
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SWAP_COUNT),
            seed_exercises: lookup("SEED_EXERCISES")
                .map(|v| !matches!(v.to_ascii_lowercase().as_str(), "0" | "false" | "no"))
                .unwrap_or(true),
        }
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
