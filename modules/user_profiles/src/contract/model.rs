use chrono::{DateTime, Utc};

/// Stored user profile as seen by other modules (no serde, no schema).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UserProfile {
    /// Store-assigned identifier (ObjectId hex).
    pub id: String,
    pub firstname: String,
    pub lastname: String,
    pub age: i64,
    /// Phone number; unique among profiles that have one.
    pub msisdn: String,
    pub inserted_at: Option<DateTime<Utc>>,
    pub last_update: Option<DateTime<Utc>>,
}

/// Client-supplied profile fields. Used for both create and full replace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProfileData {
    pub firstname: String,
    pub lastname: String,
    pub age: i64,
    pub msisdn: String,
    pub inserted_at: Option<DateTime<Utc>>,
    pub last_update: Option<DateTime<Utc>>,
}

impl UserProfile {
    /// Attach a store id to profile fields.
    pub fn from_data(id: impl Into<String>, data: ProfileData) -> Self {
        Self {
            id: id.into(),
            firstname: data.firstname,
            lastname: data.lastname,
            age: data.age,
            msisdn: data.msisdn,
            inserted_at: data.inserted_at,
            last_update: data.last_update,
        }
    }
}
