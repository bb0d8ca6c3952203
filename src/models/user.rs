//! User, UserSummary and the collaborator record attached on CPF sign-in.

use serde::{Deserialize, Serialize};

/// Identifier of a user on the remote API.
pub type UserId = i64;

/// Collaborator data returned alongside a CPF/password sign-in.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct Collaborator {
    pub numemp: i64,
    pub tipcol: i64,
    pub numcad: i64,
    pub nomfun: String,
    #[serde(default)]
    pub apefun: Option<String>,
}

/// The signed-in user.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    #[serde(default)]
    pub cpf: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Nickname.
    #[serde(default)]
    pub apelido: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub collaborator: Option<Collaborator>,
}

impl User {
    /// Merge collaborator info into the user, as the CPF sign-in does.
    pub fn with_collaborator(mut self, collaborator: Option<Collaborator>) -> Self {
        if let Some(c) = &collaborator {
            self.name = Some(c.nomfun.clone());
            self.apelido = c.apefun.clone();
        }
        self.collaborator = collaborator;
        self
    }
}

/// User embedded in other records (attendance, participation).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    #[serde(default)]
    pub id: Option<UserId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}
