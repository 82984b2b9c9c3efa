#![cfg(feature = "integration")]

mod common;
use anyhow::Result;

use runtime::DatabaseConfig;
use user_profiles::contract::model::ProfileData;
use user_profiles::domain::error::DomainError;
use user_profiles::domain::repo::{ProfilesRepository, StoreError};
use user_profiles::infra::storage::MongoProfilesRepository;
use user_profiles::{UserProfiles, UserProfilesConfig};

fn db_config(url: &str) -> DatabaseConfig {
    DatabaseConfig {
        url: url.to_string(),
        name: "usergo_it".to_string(),
        ..Default::default()
    }
}

fn data(firstname: &str, msisdn: &str) -> ProfileData {
    ProfileData {
        firstname: firstname.into(),
        msisdn: msisdn.into(),
        ..Default::default()
    }
}

#[tokio::test]
async fn user_profiles_works_with_mongo() -> Result<()> {
    let mongo = common::bring_up_mongo().await?;
    let db = db_config(&mongo.url);

    test_repository_operations(&db).await?;
    test_service_operations(&db).await?;
    Ok(())
}

async fn test_repository_operations(db: &DatabaseConfig) -> Result<()> {
    let repo = MongoProfilesRepository::connect(db, "profiles_repo").await?;
    repo.ensure_indexes().await?;
    // idempotent
    repo.ensure_indexes().await?;

    let id = repo.insert(&data("Ana", "555")).await?;
    let found = repo.find_by_id(&id).await?.expect("inserted profile");
    assert_eq!(found.firstname, "Ana");
    assert_eq!(found.msisdn, "555");

    let dup = repo.insert(&data("Bob", "555")).await;
    assert!(matches!(dup, Err(StoreError::DuplicateMsisdn { .. })));

    // sparse index: documents without msisdn do not collide
    repo.insert(&data("NoPhone1", "")).await?;
    repo.insert(&data("NoPhone2", "")).await?;
    assert_eq!(repo.find_all().await?.len(), 3);

    let replaced = repo.replace_by_msisdn("555", &data("Ana", "556")).await?;
    assert_eq!(replaced.as_deref(), Some(id.as_str()));
    let moved = repo.find_by_msisdn("556").await?.expect("replaced profile");
    assert_eq!(moved.id, id);
    assert!(repo.replace_by_msisdn("555", &data("x", "555")).await?.is_none());

    // a replacement without msisdn leaves the field out, so the sparse index skips it
    repo.replace_by_msisdn("556", &data("Ana", "")).await?;
    let dropped = repo.find_by_id(&id).await?.expect("profile without msisdn");
    assert_eq!(dropped.msisdn, "");
    repo.insert(&data("Ana2", "556")).await?;
    assert_eq!(repo.find_all().await?.len(), 4);

    assert!(repo.delete_by_msisdn("556").await?);
    assert!(!repo.delete_by_msisdn("556").await?);
    assert!(repo.find_by_id(&id).await?.is_some());
    assert!(repo.find_by_id("not-an-object-id").await?.is_none());

    repo.close().await;
    Ok(())
}

async fn test_service_operations(db: &DatabaseConfig) -> Result<()> {
    let cfg = UserProfilesConfig {
        collection: "profiles_service".to_string(),
        ensure_indexes: true,
    };
    let module = UserProfiles::connect(db, &cfg).await?;
    let svc = module.service();

    let created = svc.create_profile(data("Ana", "555")).await?;
    assert!(created.last_update.is_some());

    let conflict = svc.create_profile(data("Bob", "555")).await;
    assert!(matches!(conflict, Err(DomainError::MsisdnConflict { .. })));

    let mut patch = data("Ana", "555");
    patch.lastname = "Lee".into();
    let updated = svc.update_profile("555", patch).await?;
    assert_eq!(updated.lastname, "Lee");
    assert_eq!(updated.id, created.id);

    svc.delete_profile("555").await?;
    assert!(matches!(
        svc.get_profile("555").await,
        Err(DomainError::ProfileNotFound { .. })
    ));

    module.shutdown().await;
    Ok(())
}
