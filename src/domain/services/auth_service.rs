use std::sync::Arc;
use crate::domain::{
    models::user::{NewUser, User},
    ports::UserRepository,
};
use crate::error::AppError;
use argon2::{
    password_hash::SaltString, Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
};
use tracing::info;

pub const ADMIN_ACCESS_LEVEL: i32 = 3;

pub struct AuthService {
    repo: Arc<dyn UserRepository>,
}

impl AuthService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Returns the user when the email exists and the password matches its hash.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self.repo.find_by_email(email).await?
            .ok_or(AppError::Unauthorized)?;

        let parsed_hash = PasswordHash::new(&user.password_hash)
            .map_err(|e| AppError::Internal(format!("Stored password hash unreadable: {}", e)))?;

        Argon2::default().verify_password(password.as_bytes(), &parsed_hash)
            .map_err(|_| AppError::Unauthorized)?;

        Ok(user)
    }

    pub fn hash_password(password: &str) -> Result<String, AppError> {
        let salt = SaltString::generate(&mut rand::thread_rng());
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Creates the admin account on first start; an existing account is left untouched.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<User, AppError> {
        if let Some(existing) = self.repo.find_by_email(email).await? {
            return Ok(existing);
        }

        let user = self.repo.create(&NewUser {
            first_name: "Admin".to_string(),
            last_name: "User".to_string(),
            email: email.to_string(),
            password_hash: Self::hash_password(password)?,
            access_level: ADMIN_ACCESS_LEVEL,
        }).await?;

        info!("Seeded admin user {}", user.email);
        Ok(user)
    }
}
