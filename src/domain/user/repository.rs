//! User repository trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{User, UserId};
use crate::domain::DomainError;

/// Storage for user accounts
#[async_trait]
pub trait UserRepository: Send + Sync + Debug {
    async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError>;

    /// Look a user up by login name
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError>;

    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Stamp the last login time
    async fn record_login(&self, id: &UserId) -> Result<(), DomainError>;

    async fn count(&self) -> Result<usize, DomainError>;

    async fn username_exists(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.get_by_username(username).await?.is_some())
    }
}

#[cfg(test)]
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::RwLock;

    /// Mock user repository that can be switched into a failing state
    #[derive(Debug, Default)]
    pub struct MockUserRepository {
        users: Arc<RwLock<HashMap<String, User>>>,
        should_fail: Arc<RwLock<bool>>,
    }

    impl MockUserRepository {
        pub fn new() -> Self {
            Self::default()
        }

        pub async fn set_should_fail(&self, fail: bool) {
            *self.should_fail.write().await = fail;
        }

        async fn check_should_fail(&self) -> Result<(), DomainError> {
            if *self.should_fail.read().await {
                return Err(DomainError::storage("Mock repository configured to fail"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl UserRepository for MockUserRepository {
        async fn get(&self, id: &UserId) -> Result<Option<User>, DomainError> {
            self.check_should_fail().await?;
            Ok(self.users.read().await.get(id.as_str()).cloned())
        }

        async fn get_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
            self.check_should_fail().await?;
            let users = self.users.read().await;
            Ok(users.values().find(|u| u.username() == username).cloned())
        }

        async fn create(&self, user: User) -> Result<User, DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;

            if users.values().any(|u| u.username() == user.username()) {
                return Err(DomainError::conflict(format!(
                    "Username '{}' already exists",
                    user.username()
                )));
            }

            users.insert(user.id().as_str().to_string(), user.clone());
            Ok(user)
        }

        async fn record_login(&self, id: &UserId) -> Result<(), DomainError> {
            self.check_should_fail().await?;
            let mut users = self.users.write().await;

            match users.get_mut(id.as_str()) {
                Some(user) => {
                    user.record_login();
                    Ok(())
                }
                None => Err(DomainError::not_found(format!("User '{}' not found", id))),
            }
        }

        async fn count(&self) -> Result<usize, DomainError> {
            self.check_should_fail().await?;
            Ok(self.users.read().await.len())
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        fn create_test_user(id: &str, username: &str) -> User {
            User::new(UserId::new(id).unwrap(), username, "hashed_password")
        }

        #[tokio::test]
        async fn test_create_and_lookup() {
            let repo = MockUserRepository::new();
            repo.create(create_test_user("user-1", "alice")).await.unwrap();

            let by_name = repo.get_by_username("alice").await.unwrap().unwrap();
            assert_eq!(by_name.id().as_str(), "user-1");
            assert!(repo.username_exists("alice").await.unwrap());
            assert!(!repo.username_exists("bob").await.unwrap());
            assert_eq!(repo.count().await.unwrap(), 1);
        }

        #[tokio::test]
        async fn test_should_fail() {
            let repo = MockUserRepository::new();
            repo.set_should_fail(true).await;

            let result = repo.get_by_username("alice").await;
            assert!(matches!(result, Err(DomainError::Storage { .. })));
        }
    }
}
