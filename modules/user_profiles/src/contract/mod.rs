pub mod client;
pub mod error;
pub mod model;

pub use client::UserProfilesApi;
pub use error::UserProfilesError;
pub use model::{ProfileData, UserProfile};
