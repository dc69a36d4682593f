use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{Error, Result};
use crate::model::User;
use crate::store::UserStore;

/// User CRUD plus the credential check behind login.
#[derive(Clone)]
pub struct UserService {
    store: Arc<dyn UserStore>,
    // Serializes the exists-then-insert sequence in create; the store is
    // only atomic per call.
    write_lock: Arc<Mutex<()>>,
}

impl UserService {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub async fn create(&self, user: User) -> Result<User> {
        let _guard = self.write_lock.lock().await;
        if self.store.exists(&user.user_id).await? {
            return Err(Error::UserIdAlreadyExists);
        }
        let stored = self.store.put(user.user_id, user).await?;
        debug!(user_id = %stored.user_id, "user created");
        Ok(stored)
    }

    pub async fn get_all(&self) -> Result<Vec<User>> {
        Ok(self.store.list().await?)
    }

    pub async fn get(&self, user_id: i64) -> Result<User> {
        self.store.get(&user_id).await?.ok_or(Error::UserNotFound)
    }

    /// Id lookup shaped as a zero- or one-element list; the login
    /// aggregation consumes this form.
    pub async fn list_by_id(&self, user_id: i64) -> Result<Vec<User>> {
        Ok(self.store.get(&user_id).await?.into_iter().collect())
    }

    pub async fn get_by_email(&self, email: &str) -> Result<User> {
        self.store
            .find_by_email(email)
            .await?
            .ok_or(Error::UserNotFound)
    }

    /// Full replace keyed by the payload's email. The record stays under its
    /// pre-existing id even when the payload carries a different one.
    pub async fn update_by_email(&self, mut details: User) -> Result<User> {
        let _guard = self.write_lock.lock().await;
        let existing = self
            .store
            .find_by_email(&details.email)
            .await?
            .ok_or(Error::UserNotFound)?;
        details.user_id = existing.user_id;
        let stored = self.store.put(existing.user_id, details).await?;
        debug!(user_id = %stored.user_id, "user updated");
        Ok(stored)
    }

    pub async fn delete_by_email(&self, email: &str) -> Result<User> {
        let _guard = self.write_lock.lock().await;
        let existing = self
            .store
            .find_by_email(email)
            .await?
            .ok_or(Error::UserNotFound)?;
        let removed = self
            .store
            .delete(&existing.user_id)
            .await?
            .ok_or(Error::UserNotFound)?;
        debug!(user_id = %removed.user_id, "user deleted");
        Ok(removed)
    }

    /// The sole authentication check: exact match on the stored
    /// (email, password) pair. A wrong password and an unknown email are
    /// indistinguishable to the caller.
    pub async fn verify_credentials(&self, email: &str, password: &str) -> Result<User> {
        self.store
            .find_by_credentials(email, password)
            .await?
            .ok_or(Error::UserNotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::MemoryUserStore;

    fn service() -> UserService {
        UserService::new(Arc::new(MemoryUserStore::default()))
    }

    fn user(user_id: i64, email: &str) -> User {
        User {
            user_id,
            name: "Jane Doe".into(),
            email: email.into(),
            password: "s3cret".into(),
            contact_number: "42".into(),
        }
    }

    #[tokio::test]
    async fn create_rejects_duplicate_id() {
        let svc = service();
        svc.create(user(1, "jane@example.org")).await.unwrap();

        // Same id under a different email still collides.
        let err = svc.create(user(1, "other@example.org")).await.unwrap_err();
        assert!(matches!(err, Error::UserIdAlreadyExists));
        assert_eq!(svc.get(1).await.unwrap().email, "jane@example.org");
    }

    #[tokio::test]
    async fn duplicate_emails_are_allowed() {
        let svc = service();
        svc.create(user(1, "jane@example.org")).await.unwrap();
        svc.create(user(2, "jane@example.org")).await.unwrap();
        assert_eq!(svc.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn get_missing_user_fails() {
        let svc = service();
        assert!(matches!(svc.get(99).await.unwrap_err(), Error::UserNotFound));
        assert!(matches!(
            svc.get_by_email("nobody@example.org").await.unwrap_err(),
            Error::UserNotFound
        ));
    }

    #[tokio::test]
    async fn list_by_id_is_empty_or_single() {
        let svc = service();
        assert!(svc.list_by_id(1).await.unwrap().is_empty());
        svc.create(user(1, "jane@example.org")).await.unwrap();
        let listed = svc.list_by_id(1).await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].user_id, 1);
    }

    #[tokio::test]
    async fn update_by_email_keeps_the_existing_id() {
        let svc = service();
        svc.create(user(1, "jane@example.org")).await.unwrap();

        let mut details = user(99, "jane@example.org");
        details.name = "Jane Updated".into();
        let updated = svc.update_by_email(details).await.unwrap();

        assert_eq!(updated.user_id, 1);
        assert_eq!(updated.name, "Jane Updated");
        assert!(matches!(svc.get(99).await.unwrap_err(), Error::UserNotFound));
    }

    #[tokio::test]
    async fn update_unknown_email_fails() {
        let svc = service();
        assert!(matches!(
            svc.update_by_email(user(1, "nobody@example.org"))
                .await
                .unwrap_err(),
            Error::UserNotFound
        ));
    }

    #[tokio::test]
    async fn delete_by_email_twice_fails_the_second_time() {
        let svc = service();
        svc.create(user(1, "jane@example.org")).await.unwrap();

        let removed = svc.delete_by_email("jane@example.org").await.unwrap();
        assert_eq!(removed.user_id, 1);
        assert!(matches!(
            svc.delete_by_email("jane@example.org").await.unwrap_err(),
            Error::UserNotFound
        ));
    }

    #[tokio::test]
    async fn verify_credentials_requires_the_exact_pair() {
        let svc = service();
        svc.create(user(1, "jane@example.org")).await.unwrap();

        let found = svc
            .verify_credentials("jane@example.org", "s3cret")
            .await
            .unwrap();
        assert_eq!(found.user_id, 1);

        assert!(matches!(
            svc.verify_credentials("jane@example.org", "wrong")
                .await
                .unwrap_err(),
            Error::UserNotFound
        ));
        assert!(matches!(
            svc.verify_credentials("nobody@example.org", "s3cret")
                .await
                .unwrap_err(),
            Error::UserNotFound
        ));
        // Case matters on both fields.
        assert!(matches!(
            svc.verify_credentials("Jane@example.org", "s3cret")
                .await
                .unwrap_err(),
            Error::UserNotFound
        ));
    }
}
