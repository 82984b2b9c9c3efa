pub mod document;
pub mod memory_repo;
pub mod mongo_repo;

pub use memory_repo::InMemoryProfilesRepository;
pub use mongo_repo::MongoProfilesRepository;

/// Name of the unique sparse index on `msisdn`.
pub const MSISDN_INDEX: &str = "msisdn_unique";
