use crate::domain::user::{NewUser, User};
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
    /// Stores `user` under a freshly assigned sequential id.
    ///
    /// Fails with `DomainError::DuplicateEmail` if the email is already taken.
    async fn insert_user(&self, user: NewUser) -> Result<User>;
    async fn count_users(&self) -> Result<usize>;
}
