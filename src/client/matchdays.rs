//! Matchday scheduling: list, next, create, edit, delete.

use crate::client::{endpoints, ApiClient, ApiError};
use crate::models::{GroupId, Matchday, MatchdayDraft, MatchdayId};
use reqwest::Method;
use serde::Serialize;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MatchdayBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<MatchdayId>,
    organization_id: GroupId,
    #[serde(flatten)]
    draft: &'a MatchdayDraft,
}

impl ApiClient {
    /// All matchdays of a group, as the API orders them.
    pub async fn list_matchdays(
        &self,
        token: &str,
        group_id: GroupId,
    ) -> Result<Vec<Matchday>, ApiError> {
        let matchdays: Option<Vec<Matchday>> = self
            .get_json(Some(token), &endpoints::group_matchdays(group_id))
            .await?;
        Ok(matchdays.unwrap_or_default())
    }

    /// The group's upcoming matchday, if any is scheduled.
    pub async fn next_matchday(
        &self,
        token: &str,
        group_id: GroupId,
    ) -> Result<Option<Matchday>, ApiError> {
        self.get_optional_json(Some(token), &endpoints::next_matchday(group_id))
            .await
    }

    pub async fn get_matchday(&self, token: &str, id: MatchdayId) -> Result<Matchday, ApiError> {
        self.get_json(Some(token), &endpoints::matchday(id)).await
    }

    pub async fn create_matchday(
        &self,
        token: &str,
        group_id: GroupId,
        draft: &MatchdayDraft,
    ) -> Result<(), ApiError> {
        let draft = draft.clone().normalized();
        let body = MatchdayBody {
            id: None,
            organization_id: group_id,
            draft: &draft,
        };
        self.send_empty(Method::POST, Some(token), endpoints::MATCHDAYS, Some(&body))
            .await?;
        self.invalidate_matchdays(group_id, None);
        Ok(())
    }

    pub async fn update_matchday(
        &self,
        token: &str,
        group_id: GroupId,
        id: MatchdayId,
        draft: &MatchdayDraft,
    ) -> Result<(), ApiError> {
        let draft = draft.clone().normalized();
        let body = MatchdayBody {
            id: Some(id),
            organization_id: group_id,
            draft: &draft,
        };
        self.send_empty(Method::PUT, Some(token), endpoints::MATCHDAYS, Some(&body))
            .await?;
        self.invalidate_matchdays(group_id, Some(id));
        Ok(())
    }

    pub async fn delete_matchday(
        &self,
        token: &str,
        group_id: GroupId,
        id: MatchdayId,
    ) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, Some(token), &endpoints::matchday(id), None::<&()>)
            .await?;
        self.invalidate_matchdays(group_id, Some(id));
        Ok(())
    }

    /// Whether teams have been drawn for a matchday.
    pub async fn has_teams(&self, token: &str, id: MatchdayId) -> Result<bool, ApiError> {
        let teams: Option<Vec<serde_json::Value>> = self
            .get_json(Some(token), &endpoints::matchday_teams(id))
            .await?;
        Ok(teams.is_some_and(|t| !t.is_empty()))
    }

    fn invalidate_matchdays(&self, group_id: GroupId, id: Option<MatchdayId>) {
        self.cache
            .invalidate(&self.url(&endpoints::group_matchdays(group_id)));
        self.cache
            .invalidate(&self.url(&endpoints::next_matchday(group_id)));
        if let Some(id) = id {
            self.cache.invalidate(&self.url(&endpoints::matchday(id)));
        }
    }
}
