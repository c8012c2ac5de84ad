use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use rusqlite::OptionalExtension;
use uuid::Uuid;

use crate::db::DbPool;
use crate::error::{AppError, Result};
use crate::models::{FromSqliteRow, User};

#[derive(Clone)]
pub struct UserRepository {
    pool: DbPool,
}

impl UserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64> {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let count: i64 = conn.query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
            Ok(count)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let pool = self.pool.clone();
        let username = username.to_string();
        tokio::task::spawn_blocking(move || {
            let conn = pool.get()?;
            let mut stmt = conn.prepare("SELECT * FROM users WHERE username = ?")?;
            let result = stmt.query_row([&username], User::from_row).optional()?;
            Ok(result)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Create a user. Hashing runs on the blocking pool with the insert.
    pub async fn create(&self, username: &str, password: &str) -> Result<User> {
        let pool = self.pool.clone();
        let username = username.to_string();
        let password = password.to_string();

        tokio::task::spawn_blocking(move || {
            let user = User {
                id: Uuid::new_v4().to_string(),
                username,
                password_hash: hash_password(&password)?,
                created_at: Utc::now(),
            };

            let conn = pool.get()?;
            conn.execute(
                "INSERT INTO users (id, username, password_hash, created_at) VALUES (?, ?, ?, ?)",
                rusqlite::params![user.id, user.username, user.password_hash, user.created_at],
            )?;
            Ok(user)
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }

    /// Return the user when `password` matches, `None` otherwise.
    pub async fn verify_password(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.find_by_username(username).await? else {
            return Ok(None);
        };

        let password = password.to_string();
        tokio::task::spawn_blocking(move || {
            if verify_password(&password, &user.password_hash)? {
                Ok(Some(user))
            } else {
                Ok(None)
            }
        })
        .await
        .map_err(|e| AppError::Internal(e.to_string()))?
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|_| AppError::PasswordHash)?
        .to_string();
    Ok(password_hash)
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AppError::PasswordHash)?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::create_memory_pool;
    use crate::migrations::run_migrations_for_tests;

    fn setup_test_db() -> DbPool {
        let pool = create_memory_pool().expect("Failed to create test database");
        run_migrations_for_tests(&pool).expect("Failed to run migrations");
        pool
    }

    #[tokio::test]
    async fn test_create_hashes_password() {
        let repo = UserRepository::new(setup_test_db());

        let user = repo.create("alice", "secret123").await.unwrap();

        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "secret123");
        assert_eq!(repo.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_find_by_username() {
        let repo = UserRepository::new(setup_test_db());
        let user = repo.create("alice", "secret123").await.unwrap();

        let by_name = repo.find_by_username("alice").await.unwrap().unwrap();

        assert_eq!(by_name.id, user.id);
        assert!(repo.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_verify_password() {
        let repo = UserRepository::new(setup_test_db());
        repo.create("alice", "secret123").await.unwrap();

        assert!(repo
            .verify_password("alice", "secret123")
            .await
            .unwrap()
            .is_some());
        assert!(repo
            .verify_password("alice", "wrong")
            .await
            .unwrap()
            .is_none());
        assert!(repo
            .verify_password("nobody", "secret123")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = UserRepository::new(setup_test_db());
        repo.create("alice", "secret123").await.unwrap();

        let result = repo.create("alice", "another1").await;

        assert!(matches!(result, Err(AppError::Database(_))));
    }
}
