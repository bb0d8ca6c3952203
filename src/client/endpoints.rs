//! Endpoint paths of the remote API, relative to the base URL.

use crate::models::{AttendanceId, GroupId, MatchId, MatchdayId};

pub const AUTH_SIGN_IN: &str = "auth/signin";
pub const AUTH_SIGN_OUT: &str = "auth/signout";
pub const AUTH_VALIDATE: &str = "auth/validate";
pub const AUTH_SEND_CODE: &str = "auth/send-code";
pub const AUTH_VERIFY_CODE: &str = "auth/verify-code";
pub const AUTH_GOOGLE_LOGIN: &str = "auth/google/login";

pub const USERS_PROFILE: &str = "users/profile";
pub const USERS_UPDATE: &str = "users/update";

pub const ORGANIZATIONS: &str = "organization";
pub const ORGANIZATIONS_ADMIN: &str = "organization/admin";
pub const ORGANIZATION_ADD_MEMBER: &str = "organization/add-member";
pub const ORGANIZATION_REMOVE_MEMBER: &str = "organization/remove-member";
pub const ORGANIZATION_SET_ADMIN: &str = "organization/set-admin";
pub const ORGANIZATION_REMOVE_ADMIN: &str = "organization/remove-admin";

pub const MATCHDAYS: &str = "matchday";
pub const ATTENDANCE_LIST: &str = "attendance-list";

pub fn organization(id: GroupId) -> String {
    format!("organization/{}", id)
}

pub fn organization_users(id: GroupId) -> String {
    format!("organization/users/{}", id)
}

pub fn matchday(id: MatchdayId) -> String {
    format!("matchday/{}", id)
}

pub fn group_matchdays(group_id: GroupId) -> String {
    format!("matchday/get-all-matchdays/{}", group_id)
}

pub fn next_matchday(group_id: GroupId) -> String {
    format!("matchday/get-next-matchdays/{}", group_id)
}

pub fn matchday_teams(id: MatchdayId) -> String {
    format!("teams/{}", id)
}

pub fn matchday_attendance(id: MatchdayId) -> String {
    format!("attendance-list/matchday/{}", id)
}

pub fn attendance(id: AttendanceId) -> String {
    format!("attendance-list/{}", id)
}

pub fn matchday_player_stats(id: MatchdayId) -> String {
    format!("player-stats/matchday/{}", id)
}

pub fn matchday_matches(id: MatchdayId) -> String {
    format!("matches/matchday/{}", id)
}

pub fn match_participations(id: MatchId) -> String {
    format!("player-participation/match/{}", id)
}

pub fn match_goals(id: MatchId) -> String {
    format!("goals/match/{}", id)
}
