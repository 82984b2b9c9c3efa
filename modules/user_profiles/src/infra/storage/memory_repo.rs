use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use parking_lot::RwLock;

use crate::contract::model::{ProfileData, UserProfile};
use crate::domain::repo::{ProfilesRepository, StoreError};

/// In-process profile store for `--mock` runs and tests.
///
/// Keeps insertion order and enforces the same rule as the unique sparse index:
/// a non-empty `msisdn` may appear at most once, empty ones are unconstrained.
#[derive(Default)]
pub struct InMemoryProfilesRepository {
    rows: RwLock<Vec<UserProfile>>,
}

impl InMemoryProfilesRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Index violation check, skipping the row at `except`.
fn check_unique(
    rows: &[UserProfile],
    msisdn: &str,
    except: Option<usize>,
) -> Result<(), StoreError> {
    if msisdn.is_empty() {
        return Ok(());
    }
    let taken = rows
        .iter()
        .enumerate()
        .any(|(i, p)| Some(i) != except && p.msisdn == msisdn);
    if taken {
        return Err(StoreError::DuplicateMsisdn {
            msisdn: msisdn.to_string(),
        });
    }
    Ok(())
}

/// An empty `msisdn` is never stored, so it matches nothing.
fn position_by_msisdn(rows: &[UserProfile], msisdn: &str) -> Option<usize> {
    if msisdn.is_empty() {
        return None;
    }
    rows.iter().position(|p| p.msisdn == msisdn)
}

#[async_trait]
impl ProfilesRepository for InMemoryProfilesRepository {
    async fn ensure_indexes(&self) -> Result<(), StoreError> {
        Ok(())
    }

    async fn find_all(&self) -> Result<Vec<UserProfile>, StoreError> {
        Ok(self.rows.read().clone())
    }

    async fn find_by_msisdn(&self, msisdn: &str) -> Result<Option<UserProfile>, StoreError> {
        let rows = self.rows.read();
        Ok(position_by_msisdn(&rows, msisdn).map(|i| rows[i].clone()))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.rows.read().iter().find(|p| p.id == id).cloned())
    }

    async fn insert(&self, data: &ProfileData) -> Result<String, StoreError> {
        let mut rows = self.rows.write();
        check_unique(&rows, &data.msisdn, None)?;

        let id = ObjectId::new().to_hex();
        rows.push(UserProfile::from_data(id.clone(), data.clone()));
        Ok(id)
    }

    async fn replace_by_msisdn(
        &self,
        msisdn: &str,
        data: &ProfileData,
    ) -> Result<Option<String>, StoreError> {
        let mut rows = self.rows.write();
        let Some(i) = position_by_msisdn(&rows, msisdn) else {
            return Ok(None);
        };
        check_unique(&rows, &data.msisdn, Some(i))?;

        let id = std::mem::take(&mut rows[i].id);
        rows[i] = UserProfile::from_data(id.clone(), data.clone());
        Ok(Some(id))
    }

    async fn delete_by_msisdn(&self, msisdn: &str) -> Result<bool, StoreError> {
        let mut rows = self.rows.write();
        match position_by_msisdn(&rows, msisdn) {
            Some(i) => {
                rows.remove(i);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(msisdn: &str) -> ProfileData {
        ProfileData {
            msisdn: msisdn.into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn duplicate_msisdn_is_rejected_but_empty_is_not() {
        let repo = InMemoryProfilesRepository::new();
        repo.insert(&data("555")).await.unwrap();

        let err = repo.insert(&data("555")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateMsisdn { msisdn } if msisdn == "555"));

        repo.insert(&data("")).await.unwrap();
        repo.insert(&data("")).await.unwrap();
        assert_eq!(repo.find_all().await.unwrap().len(), 3);
    }

    #[tokio::test]
    async fn replace_keeps_id_and_checks_other_rows() {
        let repo = InMemoryProfilesRepository::new();
        let id = repo.insert(&data("555")).await.unwrap();
        repo.insert(&data("777")).await.unwrap();

        // replacing onto itself is fine
        let replaced = repo.replace_by_msisdn("555", &data("555")).await.unwrap();
        assert_eq!(replaced.as_deref(), Some(id.as_str()));
        assert_eq!(repo.find_by_msisdn("555").await.unwrap().unwrap().id, id);

        let err = repo.replace_by_msisdn("555", &data("777")).await.unwrap_err();
        assert!(matches!(err, StoreError::DuplicateMsisdn { .. }));

        assert!(repo.replace_by_msisdn("999", &data("999")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn replace_can_drop_msisdn() {
        let repo = InMemoryProfilesRepository::new();
        let id = repo.insert(&data("555")).await.unwrap();

        let replaced = repo.replace_by_msisdn("555", &data("")).await.unwrap();
        assert_eq!(replaced.as_deref(), Some(id.as_str()));
        assert!(repo.find_by_msisdn("555").await.unwrap().is_none());
        assert_eq!(repo.find_by_id(&id).await.unwrap().unwrap().msisdn, "");
    }

    #[tokio::test]
    async fn empty_msisdn_matches_nothing() {
        let repo = InMemoryProfilesRepository::new();
        repo.insert(&data("")).await.unwrap();

        assert!(repo.find_by_msisdn("").await.unwrap().is_none());
        assert!(!repo.delete_by_msisdn("").await.unwrap());
        assert!(repo.replace_by_msisdn("", &data("1")).await.unwrap().is_none());
        assert_eq!(repo.find_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn delete_then_find() {
        let repo = InMemoryProfilesRepository::new();
        repo.insert(&data("555")).await.unwrap();

        assert!(repo.delete_by_msisdn("555").await.unwrap());
        assert!(repo.find_all().await.unwrap().is_empty());
        assert!(!repo.delete_by_msisdn("555").await.unwrap());
    }

    #[tokio::test]
    async fn unknown_id_finds_nothing() {
        let repo = InMemoryProfilesRepository::new();
        assert!(repo.find_by_id("not-an-id").await.unwrap().is_none());
    }
}
