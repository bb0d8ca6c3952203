//! Profile of the signed-in user.

use crate::client::{endpoints, ApiClient, ApiError};
use crate::models::UserId;
use reqwest::Method;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    #[serde(default)]
    pub cpf: Option<i64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// Fields to change; absent fields are left as they are.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ApiClient {
    pub async fn profile(&self, token: &str) -> Result<UserProfile, ApiError> {
        self.get_json(Some(token), endpoints::USERS_PROFILE).await
    }

    pub async fn update_profile(
        &self,
        token: &str,
        update: &ProfileUpdate,
    ) -> Result<UserProfile, ApiError> {
        let profile = self
            .send_json(Method::PUT, Some(token), endpoints::USERS_UPDATE, update)
            .await?;
        self.cache.invalidate(&self.url(endpoints::USERS_PROFILE));
        Ok(profile)
    }
}
