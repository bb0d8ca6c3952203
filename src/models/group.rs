//! Group (organization) and its members.

use crate::models::user::UserId;
use serde::{Deserialize, Serialize};

/// Identifier of a group (organization) on the remote API.
pub type GroupId = i64;

/// A recurring group of players. The API calls it an organization and flags admin rights as `admin`.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, alias = "admin")]
    pub is_admin: bool,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub member_count: Option<u32>,
}

/// A user listed as member of a group.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GroupMember {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub admin: bool,
}
