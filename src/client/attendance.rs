//! Attendance list of a matchday: fetch and rank, plus the mutations.
//!
//! Every call is scoped to a group: the matchday must belong to it, and mutated
//! records must be on that matchday's list.
//!
//! Every mutation is one REST call followed by invalidate -> refetch -> reclassify,
//! so callers always get a board ranked from the server's current list.

use crate::client::{endpoints, ApiClient, ApiError};
use crate::logic::{validate_level, AttendanceBoard};
use crate::models::{
    parse_timestamp, AttendanceError, AttendanceId, AttendanceRecord, GroupId, Matchday, MatchdayId,
    UserId,
};
use log::debug;
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// Player to add to a matchday's list.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAttendance {
    pub user_id: UserId,
    #[serde(default)]
    pub goalkeeper: bool,
    #[serde(default = "default_confirmed")]
    pub confirmed: bool,
}

fn default_confirmed() -> bool {
    true
}

/// Admin correction of a record's name and confirmation time.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceEdit {
    pub player_name: String,
    pub time_confirmed: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NewAttendanceBody<'a> {
    matchday_id: MatchdayId,
    #[serde(flatten)]
    attendance: &'a NewAttendance,
}

#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct AttendancePatch<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    player_name: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    time_confirmed: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    confirmed: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    level: Option<u8>,
}

impl ApiClient {
    /// Raw attendance records of a matchday.
    pub async fn attendance_records(
        &self,
        token: &str,
        matchday_id: MatchdayId,
    ) -> Result<Vec<AttendanceRecord>, ApiError> {
        let records: Option<Vec<AttendanceRecord>> = self
            .get_json(Some(token), &endpoints::matchday_attendance(matchday_id))
            .await?;
        Ok(records.unwrap_or_default())
    }

    /// Fetch a group's matchday and its list together and rank the list against its capacity.
    pub async fn attendance_board(
        &self,
        token: &str,
        group_id: GroupId,
        matchday_id: MatchdayId,
    ) -> Result<AttendanceBoard, ApiError> {
        let (matchday, records) = self.group_attendance(token, group_id, matchday_id).await?;
        Ok(AttendanceBoard::for_matchday(&matchday, &records)?)
    }

    pub async fn add_attendance(
        &self,
        token: &str,
        group_id: GroupId,
        matchday_id: MatchdayId,
        attendance: &NewAttendance,
    ) -> Result<AttendanceBoard, ApiError> {
        self.group_matchday(token, group_id, matchday_id).await?;
        let body = NewAttendanceBody {
            matchday_id,
            attendance,
        };
        self.send_empty(Method::POST, Some(token), endpoints::ATTENDANCE_LIST, Some(&body))
            .await?;
        self.reload_board(token, group_id, matchday_id).await
    }

    /// Rename a record and/or move its confirmation time. The new time must parse.
    pub async fn edit_attendance(
        &self,
        token: &str,
        group_id: GroupId,
        matchday_id: MatchdayId,
        id: AttendanceId,
        edit: &AttendanceEdit,
    ) -> Result<AttendanceBoard, ApiError> {
        if parse_timestamp(&edit.time_confirmed).is_none() {
            return Err(AttendanceError::MalformedTimestamp {
                id,
                value: edit.time_confirmed.clone(),
            }
            .into());
        }
        self.resolve_record(token, group_id, matchday_id, id).await?;
        let patch = AttendancePatch {
            player_name: Some(edit.player_name.trim()),
            time_confirmed: Some(edit.time_confirmed.trim()),
            ..AttendancePatch::default()
        };
        self.patch_attendance(token, group_id, matchday_id, id, &patch)
            .await
    }

    /// Flip a record between confirmed and canceled, based on the server's current value.
    pub async fn toggle_confirmation(
        &self,
        token: &str,
        group_id: GroupId,
        matchday_id: MatchdayId,
        id: AttendanceId,
    ) -> Result<AttendanceBoard, ApiError> {
        let current = self.resolve_record(token, group_id, matchday_id, id).await?;
        let patch = AttendancePatch {
            confirmed: Some(!current.confirmed),
            ..AttendancePatch::default()
        };
        self.patch_attendance(token, group_id, matchday_id, id, &patch)
            .await
    }

    pub async fn set_confirmed(
        &self,
        token: &str,
        group_id: GroupId,
        matchday_id: MatchdayId,
        id: AttendanceId,
        confirmed: bool,
    ) -> Result<AttendanceBoard, ApiError> {
        self.resolve_record(token, group_id, matchday_id, id).await?;
        let patch = AttendancePatch {
            confirmed: Some(confirmed),
            ..AttendancePatch::default()
        };
        self.patch_attendance(token, group_id, matchday_id, id, &patch)
            .await
    }

    /// Set a skill level (1..=5).
    pub async fn set_level(
        &self,
        token: &str,
        group_id: GroupId,
        matchday_id: MatchdayId,
        id: AttendanceId,
        level: u8,
    ) -> Result<AttendanceBoard, ApiError> {
        let level = validate_level(level)?;
        self.resolve_record(token, group_id, matchday_id, id).await?;
        let patch = AttendancePatch {
            level: Some(level),
            ..AttendancePatch::default()
        };
        self.patch_attendance(token, group_id, matchday_id, id, &patch)
            .await
    }

    pub async fn remove_attendance(
        &self,
        token: &str,
        group_id: GroupId,
        matchday_id: MatchdayId,
        id: AttendanceId,
    ) -> Result<AttendanceBoard, ApiError> {
        self.resolve_record(token, group_id, matchday_id, id).await?;
        self.send_empty(Method::DELETE, Some(token), &endpoints::attendance(id), None::<&()>)
            .await?;
        self.reload_board(token, group_id, matchday_id).await
    }

    /// The matchday, only if it belongs to `group_id`.
    async fn group_matchday(
        &self,
        token: &str,
        group_id: GroupId,
        matchday_id: MatchdayId,
    ) -> Result<Matchday, ApiError> {
        let matchday = self.get_matchday(token, matchday_id).await?;
        if matchday.organization_id != group_id {
            return Err(AttendanceError::MatchdayNotFound(matchday_id).into());
        }
        Ok(matchday)
    }

    async fn group_attendance(
        &self,
        token: &str,
        group_id: GroupId,
        matchday_id: MatchdayId,
    ) -> Result<(Matchday, Vec<AttendanceRecord>), ApiError> {
        tokio::try_join!(
            self.group_matchday(token, group_id, matchday_id),
            self.attendance_records(token, matchday_id),
        )
    }

    /// Current server copy of a record, which must be on this matchday's list.
    async fn resolve_record(
        &self,
        token: &str,
        group_id: GroupId,
        matchday_id: MatchdayId,
        id: AttendanceId,
    ) -> Result<AttendanceRecord, ApiError> {
        let (_, records) = self.group_attendance(token, group_id, matchday_id).await?;
        records
            .into_iter()
            .find(|r| r.id == id)
            .ok_or_else(|| AttendanceError::AttendanceNotFound(id).into())
    }

    async fn patch_attendance(
        &self,
        token: &str,
        group_id: GroupId,
        matchday_id: MatchdayId,
        id: AttendanceId,
        patch: &AttendancePatch<'_>,
    ) -> Result<AttendanceBoard, ApiError> {
        self.send_empty(Method::PATCH, Some(token), &endpoints::attendance(id), Some(patch))
            .await?;
        self.reload_board(token, group_id, matchday_id).await
    }

    /// Invalidate the cached list, refetch it and rank it again.
    async fn reload_board(
        &self,
        token: &str,
        group_id: GroupId,
        matchday_id: MatchdayId,
    ) -> Result<AttendanceBoard, ApiError> {
        debug!("attendance of matchday {} changed, reloading", matchday_id);
        self.cache
            .invalidate(&self.url(&endpoints::matchday_attendance(matchday_id)));
        self.attendance_board(token, group_id, matchday_id).await
    }
}
