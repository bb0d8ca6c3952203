//! Signed-in session: token, user and group selection.
//!
//! A `Session` is created by a successful sign-in and consumed by `sign_out`;
//! everything that needs the token or the active group takes it explicitly.

use crate::models::{Group, GroupId, User};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Errors raised by session operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionError {
    /// The user is not a member of this group.
    GroupNotFound(GroupId),
    /// The action needs an active group and none is selected.
    NoActiveGroup,
    /// The action needs admin rights on the active group.
    NotGroupAdmin,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::GroupNotFound(_) => write!(f, "Group not found"),
            SessionError::NoActiveGroup => write!(f, "No group selected"),
            SessionError::NotGroupAdmin => write!(f, "Only group admins can do this"),
        }
    }
}

impl std::error::Error for SessionError {}

/// Public view of a session (never includes the token).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub user: User,
    pub groups: Vec<Group>,
    pub active_group: Option<Group>,
    pub signed_in_at: DateTime<Utc>,
}

/// An authenticated session against the remote API.
#[derive(Clone, Debug)]
pub struct Session {
    token: String,
    user: User,
    groups: Vec<Group>,
    active_group: Option<GroupId>,
    signed_in_at: DateTime<Utc>,
}

impl Session {
    /// Start a session with no groups loaded yet.
    pub fn new(token: impl Into<String>, user: User) -> Self {
        Self {
            token: token.into(),
            user,
            groups: Vec::new(),
            active_group: None,
            signed_in_at: Utc::now(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> &User {
        &self.user
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Replace the user's groups. Keeps the active group if still a member; auto-selects when
    /// there is exactly one group.
    pub fn set_groups(&mut self, groups: Vec<Group>) {
        self.groups = groups;
        if let Some(id) = self.active_group {
            if !self.groups.iter().any(|g| g.id == id) {
                self.active_group = None;
            }
        }
        if self.active_group.is_none() && self.groups.len() == 1 {
            self.active_group = self.groups.first().map(|g| g.id);
        }
    }

    /// Make a group active. It must be one of the user's groups.
    pub fn select_group(&mut self, id: GroupId) -> Result<&Group, SessionError> {
        let group = self
            .groups
            .iter()
            .find(|g| g.id == id)
            .ok_or(SessionError::GroupNotFound(id))?;
        self.active_group = Some(group.id);
        Ok(group)
    }

    pub fn clear_group(&mut self) {
        self.active_group = None;
    }

    pub fn active_group(&self) -> Option<&Group> {
        let id = self.active_group?;
        self.groups.iter().find(|g| g.id == id)
    }

    pub fn require_active_group(&self) -> Result<&Group, SessionError> {
        self.active_group().ok_or(SessionError::NoActiveGroup)
    }

    /// Active group, only if the user administers it.
    pub fn require_admin_group(&self) -> Result<&Group, SessionError> {
        let id = self.require_active_group()?.id;
        self.require_admin_of(id)
    }

    /// One of the user's groups, only if the user administers it.
    pub fn require_admin_of(&self, id: GroupId) -> Result<&Group, SessionError> {
        let group = self
            .groups
            .iter()
            .find(|g| g.id == id)
            .ok_or(SessionError::GroupNotFound(id))?;
        if group.is_admin {
            Ok(group)
        } else {
            Err(SessionError::NotGroupAdmin)
        }
    }

    pub fn is_admin_of_active_group(&self) -> bool {
        self.active_group().is_some_and(|g| g.is_admin)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            user: self.user.clone(),
            groups: self.groups.clone(),
            active_group: self.active_group().cloned(),
            signed_in_at: self.signed_in_at,
        }
    }

    /// End the session, handing back the token so the caller can revoke it remotely.
    pub fn sign_out(self) -> String {
        self.token
    }
}
