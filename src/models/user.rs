//! Creator/supporter summary model matching the frontend User interface.

use serde::{Deserialize, Serialize};

/// Account role. Only creators can answer QnA threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Creator,
    Supporter,
}

/// Display-only user summary embedded in listings. There is no auth
/// identity behind this record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    pub role: UserRole,
    pub followers: u32,
    pub following: u32,
    pub likes: u32,
}
