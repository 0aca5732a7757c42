use crate::domain::error::DomainError;
use crate::domain::repository::UserRepository;
use crate::domain::user::{NewUser, User};
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument, trace, warn};

/// User store keyed by email.
#[derive(Clone)]
pub struct InMemoryUserRepository {
    storage: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            storage: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    #[instrument(skip(self), fields(email = email))]
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        trace!("Acquiring read lock for user storage");
        let storage = self.storage.read().await;
        let user = storage.get(email).cloned();
        match &user {
            Some(u) => debug!(user_id = u.id, "User found in storage"),
            None => trace!("User not found in storage"),
        }
        Ok(user)
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn insert_user(&self, user: NewUser) -> Result<User> {
        trace!("Acquiring write lock for user storage");
        let mut storage = self.storage.write().await;

        // Checked under the write lock so two registrations of the same
        // email cannot both pass.
        if storage.contains_key(&user.email) {
            warn!("Email already present in storage");
            return Err(DomainError::DuplicateEmail.into());
        }

        let stored = User {
            id: storage.len() as u64 + 1,
            email: user.email,
            password_hash: user.password_hash,
        };
        storage.insert(stored.email.clone(), stored.clone());
        debug!(user_id = stored.id, total = storage.len(), "User saved to memory storage");
        Ok(stored)
    }

    async fn count_users(&self) -> Result<usize> {
        Ok(self.storage.read().await.len())
    }
}
