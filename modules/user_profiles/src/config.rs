use serde::{Deserialize, Serialize};

/// Configuration for the user_profiles module (`modules.user_profiles`)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserProfilesConfig {
    /// Collection holding profile documents
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Create the unique `msisdn` index at startup
    #[serde(default = "default_ensure_indexes")]
    pub ensure_indexes: bool,
}

impl Default for UserProfilesConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            ensure_indexes: default_ensure_indexes(),
        }
    }
}

fn default_collection() -> String {
    "profiles".to_string()
}

fn default_ensure_indexes() -> bool {
    true
}
