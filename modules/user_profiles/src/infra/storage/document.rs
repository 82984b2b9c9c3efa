//! BSON shape of a stored profile.

use chrono::{DateTime, Utc};
use mongodb::bson::{self, oid::ObjectId};
use serde::{Deserialize, Serialize};

use crate::contract::model::{ProfileData, UserProfile};

/// Document in the `profiles` collection.
///
/// Empty values are left out on write. For `msisdn` this is what lets the sparse
/// unique index skip profiles without a phone number.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub firstname: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub lastname: String,
    #[serde(default, skip_serializing_if = "is_zero")]
    pub age: i64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub msisdn: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inserted_at: Option<bson::DateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<bson::DateTime>,
}

fn is_zero(v: &i64) -> bool {
    *v == 0
}

fn to_bson_time(t: Option<DateTime<Utc>>) -> Option<bson::DateTime> {
    t.map(|t| bson::DateTime::from_millis(t.timestamp_millis()))
}

fn from_bson_time(t: Option<bson::DateTime>) -> Option<DateTime<Utc>> {
    t.and_then(|t| DateTime::<Utc>::from_timestamp_millis(t.timestamp_millis()))
}

impl From<&ProfileData> for ProfileDocument {
    /// Never carries `_id`, so the result is safe as a replacement document.
    fn from(d: &ProfileData) -> Self {
        Self {
            id: None,
            firstname: d.firstname.clone(),
            lastname: d.lastname.clone(),
            age: d.age,
            msisdn: d.msisdn.clone(),
            inserted_at: to_bson_time(d.inserted_at),
            last_update: to_bson_time(d.last_update),
        }
    }
}

impl From<ProfileDocument> for UserProfile {
    fn from(doc: ProfileDocument) -> Self {
        Self {
            id: doc.id.map(|oid| oid.to_hex()).unwrap_or_default(),
            firstname: doc.firstname,
            lastname: doc.lastname,
            age: doc.age,
            msisdn: doc.msisdn,
            inserted_at: from_bson_time(doc.inserted_at),
            last_update: from_bson_time(doc.last_update),
        }
    }
}
