//! Groups (organizations) and their membership.

use crate::client::{endpoints, ApiClient, ApiError};
use crate::models::{Group, GroupId, GroupMember, UserId};
use reqwest::Method;
use serde::Serialize;

#[derive(Serialize)]
struct GroupNameBody<'a> {
    name: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MemberEmailBody<'a> {
    email: &'a str,
    organization_id: GroupId,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MemberBody {
    user_id: UserId,
    organization_id: GroupId,
}

impl ApiClient {
    /// Groups the user belongs to.
    pub async fn list_groups(&self, token: &str) -> Result<Vec<Group>, ApiError> {
        self.get_json(Some(token), endpoints::ORGANIZATIONS).await
    }

    /// Groups the user administers.
    pub async fn admin_groups(&self, token: &str) -> Result<Vec<Group>, ApiError> {
        self.get_json(Some(token), endpoints::ORGANIZATIONS_ADMIN).await
    }

    /// Create a group; the creator becomes its admin.
    pub async fn create_group(&self, token: &str, name: &str) -> Result<Group, ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput("Group name"));
        }
        let mut group: Group = self
            .send_json(
                Method::POST,
                Some(token),
                endpoints::ORGANIZATIONS,
                &GroupNameBody { name },
            )
            .await?;
        group.is_admin = true;
        self.invalidate_groups();
        Ok(group)
    }

    pub async fn rename_group(&self, token: &str, id: GroupId, name: &str) -> Result<(), ApiError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput("Group name"));
        }
        self.send_empty(
            Method::PUT,
            Some(token),
            &endpoints::organization(id),
            Some(&GroupNameBody { name }),
        )
        .await?;
        self.invalidate_groups();
        Ok(())
    }

    pub async fn delete_group(&self, token: &str, id: GroupId) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, Some(token), &endpoints::organization(id), None::<&()>)
            .await?;
        self.invalidate_groups();
        Ok(())
    }

    pub async fn group_members(
        &self,
        token: &str,
        group_id: GroupId,
    ) -> Result<Vec<GroupMember>, ApiError> {
        self.get_json(Some(token), &endpoints::organization_users(group_id))
            .await
    }

    /// Add a member by e-mail and return the refreshed member list.
    pub async fn add_member(
        &self,
        token: &str,
        group_id: GroupId,
        email: &str,
    ) -> Result<Vec<GroupMember>, ApiError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ApiError::InvalidInput("E-mail"));
        }
        let body = MemberEmailBody {
            email,
            organization_id: group_id,
        };
        self.member_mutation(token, group_id, endpoints::ORGANIZATION_ADD_MEMBER, &body)
            .await
    }

    pub async fn remove_member(
        &self,
        token: &str,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<Vec<GroupMember>, ApiError> {
        let body = MemberBody {
            user_id,
            organization_id: group_id,
        };
        self.member_mutation(token, group_id, endpoints::ORGANIZATION_REMOVE_MEMBER, &body)
            .await
    }

    pub async fn set_admin(
        &self,
        token: &str,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<Vec<GroupMember>, ApiError> {
        let body = MemberBody {
            user_id,
            organization_id: group_id,
        };
        self.member_mutation(token, group_id, endpoints::ORGANIZATION_SET_ADMIN, &body)
            .await
    }

    /// Revoke admin rights. Refused when it would leave the group with no admin.
    pub async fn remove_admin(
        &self,
        token: &str,
        group_id: GroupId,
        user_id: UserId,
    ) -> Result<Vec<GroupMember>, ApiError> {
        let members = self.group_members(token, group_id).await?;
        if members.iter().filter(|m| m.admin).count() <= 1 {
            return Err(ApiError::LastAdmin);
        }
        let body = MemberBody {
            user_id,
            organization_id: group_id,
        };
        self.member_mutation(token, group_id, endpoints::ORGANIZATION_REMOVE_ADMIN, &body)
            .await
    }

    async fn member_mutation<B: Serialize>(
        &self,
        token: &str,
        group_id: GroupId,
        path: &str,
        body: &B,
    ) -> Result<Vec<GroupMember>, ApiError> {
        self.send_empty(Method::POST, Some(token), path, Some(body))
            .await?;
        self.cache
            .invalidate(&self.url(&endpoints::organization_users(group_id)));
        self.group_members(token, group_id).await
    }

    fn invalidate_groups(&self) {
        self.cache.invalidate(&self.url(endpoints::ORGANIZATIONS));
        self.cache.invalidate(&self.url(endpoints::ORGANIZATIONS_ADMIN));
    }
}
