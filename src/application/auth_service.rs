use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{CreateUser, LoginRequest, NewUser, User};
use crate::domain::validation::{validate_email, validate_password};
use crate::infrastructure::security::{hash_password, verify_against_dummy, verify_password};
use anyhow::Result;
use std::sync::Arc;
use tokio::task;
use tracing::{debug, error, info, instrument, trace, warn};

/// Runs CPU-heavy argon2 work on the blocking pool instead of the worker.
async fn run_blocking<T, F>(what: &'static str, f: F) -> Result<T, DomainError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    task::spawn_blocking(f).await.map_err(|e| {
        error!(error = %e, task = what, "Blocking task failed");
        DomainError::Internal(format!("{} task failed: {}", what, e))
    })
}

pub struct AuthService<R: UserRepository> {
    user_repository: Arc<R>,
}

impl<R: UserRepository> AuthService<R> {
    pub fn new(user_repository: Arc<R>) -> Self {
        Self { user_repository }
    }

    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn register_user(&self, req: CreateUser) -> Result<User> {
        trace!("Starting user registration");

        validate_email(&req.email).inspect_err(|e| warn!(error = %e, "Email rejected"))?;
        validate_password(&req.password).inspect_err(|e| warn!(error = %e, "Password rejected"))?;

        if self
            .user_repository
            .find_user_by_email(&req.email)
            .await?
            .is_some()
        {
            warn!("User already exists");
            return Err(DomainError::DuplicateEmail.into());
        }

        let password = req.password;
        let password_hash = run_blocking("hash", move || hash_password(&password))
            .await?
            .map_err(|e| {
                error!(error = %e, "Failed to hash password");
                DomainError::Internal(format!("Failed to hash password: {}", e))
            })?;

        debug!("Saving user to repository");
        // The store re-checks the email under its write lock, covering a
        // concurrent registration that slipped in after the lookup above.
        let user = self
            .user_repository
            .insert_user(NewUser {
                email: req.email,
                password_hash,
            })
            .await?;

        info!(user_id = user.id, email = %user.email, "New user registered");
        Ok(user)
    }

    /// Returns the matching user, or `InvalidCredentials` whether the email
    /// is unknown or the password is wrong.
    #[instrument(skip(self, req), fields(email = %req.email))]
    pub async fn login(&self, req: LoginRequest) -> Result<User> {
        trace!("Starting login");

        let password = req.password;
        let Some(user) = self.user_repository.find_user_by_email(&req.email).await? else {
            // Same argon2 cost as a wrong password, so timing does not reveal
            // whether the email is registered.
            run_blocking("verify", move || verify_against_dummy(&password)).await?;
            warn!("User not found during login");
            return Err(DomainError::InvalidCredentials.into());
        };

        let stored_hash = user.password_hash.clone();
        let is_valid = run_blocking("verify", move || verify_password(&password, &stored_hash))
            .await?
            .map_err(|e| {
                error!(user_id = user.id, error = %e, "Failed to verify password");
                DomainError::Internal(format!("Failed to verify password: {}", e))
            })?;

        if !is_valid {
            warn!(user_id = user.id, "Invalid password during login");
            return Err(DomainError::InvalidCredentials.into());
        }

        info!(user_id = user.id, "Login successful");
        Ok(user)
    }

    pub async fn user_count(&self) -> Result<usize> {
        self.user_repository.count_users().await
    }
}
