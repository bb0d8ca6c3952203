//! Sign-in flows (CPF/password, e-mail code), token validation and sign-out.

use crate::client::{endpoints, ApiClient, ApiError};
use crate::models::{Collaborator, User, UserId};
use crate::session::Session;
use log::{debug, info, warn};
use reqwest::Method;
use serde::{Deserialize, Serialize};

/// CPF and password, as typed on the login screen.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SignInCredentials {
    pub cpf: String,
    pub password: String,
}

#[derive(Deserialize)]
struct SignInUser {
    id: UserId,
    #[serde(default)]
    cpf: Option<i64>,
}

#[derive(Deserialize)]
struct SignInResponse {
    token: String,
    user: SignInUser,
    #[serde(default)]
    colaborador: Option<Collaborator>,
}

#[derive(Serialize)]
struct SendCodeRequest<'a> {
    email: &'a str,
}

#[derive(Serialize)]
struct VerifyCodeRequest<'a> {
    email: &'a str,
    code: &'a str,
}

#[derive(Deserialize)]
struct VerifyCodeResponse {
    token: String,
    user: User,
}

#[derive(Deserialize)]
struct MessageResponse {
    #[serde(default)]
    message: String,
}

impl ApiClient {
    /// Sign in with CPF and password; loads the user's groups into the new session.
    pub async fn sign_in(&self, credentials: &SignInCredentials) -> Result<Session, ApiError> {
        if credentials.cpf.trim().is_empty() {
            return Err(ApiError::InvalidInput("CPF"));
        }
        if credentials.password.is_empty() {
            return Err(ApiError::InvalidInput("Password"));
        }
        let resp: SignInResponse = self
            .send_json(Method::POST, None, endpoints::AUTH_SIGN_IN, credentials)
            .await?;
        let user = User {
            id: resp.user.id,
            cpf: resp.user.cpf,
            name: None,
            email: None,
            apelido: None,
            collaborator: None,
        }
        .with_collaborator(resp.colaborador);
        self.open_session(resp.token, user).await
    }

    /// Ask the API to e-mail a verification code. Returns the API's message.
    pub async fn send_code(&self, email: &str) -> Result<String, ApiError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ApiError::InvalidInput("E-mail"));
        }
        let resp: MessageResponse = self
            .send_json(
                Method::POST,
                None,
                endpoints::AUTH_SEND_CODE,
                &SendCodeRequest { email },
            )
            .await?;
        Ok(resp.message)
    }

    /// Exchange an e-mailed code for a session.
    pub async fn verify_code(&self, email: &str, code: &str) -> Result<Session, ApiError> {
        let (email, code) = (email.trim(), code.trim());
        if email.is_empty() {
            return Err(ApiError::InvalidInput("E-mail"));
        }
        if code.is_empty() {
            return Err(ApiError::InvalidInput("Code"));
        }
        let resp: VerifyCodeResponse = self
            .send_json(
                Method::POST,
                None,
                endpoints::AUTH_VERIFY_CODE,
                &VerifyCodeRequest { email, code },
            )
            .await?;
        self.open_session(resp.token, resp.user).await
    }

    /// URL the user must visit to sign in with Google (after redirects).
    pub async fn google_login_url(&self) -> Result<String, ApiError> {
        let resp = self
            .request(Method::GET, endpoints::AUTH_GOOGLE_LOGIN, None)
            .send()
            .await?;
        Ok(resp.url().to_string())
    }

    /// Whether the API still accepts this token. `Ok(false)` only when the API rejects it;
    /// transport and other failures are returned as errors.
    pub async fn validate_token(&self, token: &str) -> Result<bool, ApiError> {
        match self
            .send_empty(Method::GET, Some(token), endpoints::AUTH_VALIDATE, None::<&()>)
            .await
        {
            Ok(()) => Ok(true),
            Err(ApiError::Unauthorized) => {
                debug!("token rejected by the API");
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Reload the session user's groups, keeping the active group when still a member.
    pub async fn refresh_groups(&self, session: &mut Session) -> Result<(), ApiError> {
        let groups = self.list_groups(session.token()).await?;
        session.set_groups(groups);
        Ok(())
    }

    /// End a session: drops its cached responses and tells the API. Remote failures are only logged.
    pub async fn sign_out(&self, session: Session) {
        self.discard_session(&session);
        let user_id = session.user().id;
        let token = session.sign_out();
        if let Err(e) = self
            .send_empty(Method::POST, Some(&token), endpoints::AUTH_SIGN_OUT, None::<&()>)
            .await
        {
            warn!("remote sign-out failed for user {}: {}", user_id, e);
        }
        info!("user {} signed out", user_id);
    }

    /// Drop everything cached for a session that ended without a remote sign-out
    /// (expired, or its token was rejected).
    pub fn discard_session(&self, session: &Session) {
        self.cache.forget_token(session.token());
    }

    async fn open_session(&self, token: String, user: User) -> Result<Session, ApiError> {
        let mut session = Session::new(token, user);
        self.refresh_groups(&mut session).await?;
        info!(
            "user {} signed in ({} group(s))",
            session.user().id,
            session.groups().len()
        );
        Ok(session)
    }
}
