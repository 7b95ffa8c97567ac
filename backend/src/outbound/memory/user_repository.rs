//! `UserRepository` backed by a process-local map.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::ports::{UserRepository, UserRepositoryError};
use crate::domain::{PasswordHash, User, UserId};

const POISONED: &str = "user store lock poisoned";

#[derive(Default)]
struct Records {
    next_id: i64,
    by_email: HashMap<String, UserId>,
    users: HashMap<UserId, StoredUser>,
}

struct StoredUser {
    user: User,
    is_admin: bool,
}

/// In-memory user store assigning sequential ids from 1.
///
/// # Examples
/// ```
/// use sso::domain::ports::UserRepository;
/// use sso::domain::PasswordHash;
/// use sso::outbound::memory::InMemoryUserRepository;
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let repo = InMemoryUserRepository::default();
/// let hash = PasswordHash::from_bytes(b"hash".to_vec());
/// let id = repo.save_user("a@x.com", &hash).await.unwrap();
/// assert_eq!(id.get(), 1);
/// assert_eq!(repo.is_admin(id).await.unwrap(), Some(false));
/// # });
/// ```
#[derive(Default)]
pub struct InMemoryUserRepository {
    records: RwLock<Records>,
}

impl InMemoryUserRepository {
    /// Set the admin flag for an existing user.
    ///
    /// Returns `Ok(false)` when `id` is unknown.
    pub fn grant_admin(&self, id: UserId) -> Result<bool, UserRepositoryError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| UserRepositoryError::query(POISONED))?;
        Ok(match records.users.get_mut(&id) {
            Some(stored) => {
                stored.is_admin = true;
                true
            }
            None => false,
        })
    }

    /// Number of stored users.
    pub fn user_count(&self) -> Result<usize, UserRepositoryError> {
        self.records
            .read()
            .map(|records| records.users.len())
            .map_err(|_| UserRepositoryError::query(POISONED))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn save_user(
        &self,
        email: &str,
        pass_hash: &PasswordHash,
    ) -> Result<UserId, UserRepositoryError> {
        let mut records = self
            .records
            .write()
            .map_err(|_| UserRepositoryError::query(POISONED))?;
        if records.by_email.contains_key(email) {
            return Err(UserRepositoryError::duplicate());
        }

        records.next_id += 1;
        let id = UserId::new(records.next_id);
        records.by_email.insert(email.to_owned(), id);
        records.users.insert(
            id,
            StoredUser {
                user: User::new(id, email, pass_hash.clone()),
                is_admin: false,
            },
        );
        Ok(id)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserRepositoryError> {
        let records = self
            .records
            .read()
            .map_err(|_| UserRepositoryError::query(POISONED))?;
        Ok(records
            .by_email
            .get(email)
            .and_then(|id| records.users.get(id))
            .map(|stored| stored.user.clone()))
    }

    async fn is_admin(&self, id: UserId) -> Result<Option<bool>, UserRepositoryError> {
        let records = self
            .records
            .read()
            .map_err(|_| UserRepositoryError::query(POISONED))?;
        Ok(records.users.get(&id).map(|stored| stored.is_admin))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use std::sync::Arc;

    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn repo() -> InMemoryUserRepository {
        InMemoryUserRepository::default()
    }

    fn hash() -> PasswordHash {
        PasswordHash::from_bytes(b"$2b$04$fixture".to_vec())
    }

    #[rstest]
    #[tokio::test]
    async fn ids_are_sequential_from_one(repo: InMemoryUserRepository) {
        let first = repo.save_user("a@x.com", &hash()).await.expect("save a");
        let second = repo.save_user("b@x.com", &hash()).await.expect("save b");
        assert_eq!((first.get(), second.get()), (1, 2));
        assert_eq!(repo.user_count().expect("count"), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn duplicate_email_is_rejected_without_overwrite(repo: InMemoryUserRepository) {
        repo.save_user("a@x.com", &hash()).await.expect("first save");
        let other = PasswordHash::from_bytes(b"other".to_vec());

        let err = repo
            .save_user("a@x.com", &other)
            .await
            .expect_err("duplicate must fail");

        assert_eq!(err, UserRepositoryError::Duplicate);
        let stored = repo
            .find_by_email("a@x.com")
            .await
            .expect("lookup")
            .expect("user present");
        assert_eq!(stored.pass_hash(), &hash());
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_lookups_return_none(repo: InMemoryUserRepository) {
        assert_eq!(repo.find_by_email("ghost@x.com").await.expect("lookup"), None);
        assert_eq!(repo.is_admin(UserId::new(9)).await.expect("lookup"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn grant_admin_flips_the_flag(repo: InMemoryUserRepository) {
        let id = repo.save_user("a@x.com", &hash()).await.expect("save");
        assert_eq!(repo.is_admin(id).await.expect("lookup"), Some(false));

        assert!(repo.grant_admin(id).expect("grant"));
        assert_eq!(repo.is_admin(id).await.expect("lookup"), Some(true));
        assert!(!repo.grant_admin(UserId::new(99)).expect("grant unknown"));
    }

    #[rstest]
    fn poisoned_lock_is_reported_instead_of_an_empty_count(repo: InMemoryUserRepository) {
        let repo = Arc::new(repo);
        let holder = Arc::clone(&repo);
        let outcome = std::thread::spawn(move || {
            let _guard = holder.records.write().expect("lock is healthy");
            panic!("writer panics while holding the lock");
        })
        .join();
        assert!(outcome.is_err());

        assert!(matches!(
            repo.user_count(),
            Err(UserRepositoryError::Query { .. })
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_registrations_with_one_email_admit_exactly_one() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let tasks: Vec<_> = (0..16)
            .map(|_| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move { repo.save_user("race@x.com", &hash()).await })
            })
            .collect();

        let mut successes = 0;
        for task in tasks {
            if task.await.expect("task joins").is_ok() {
                successes += 1;
            }
        }
        assert_eq!(successes, 1);
        assert_eq!(repo.user_count().expect("count"), 1);
    }
}
