//! Endpoint handlers. Each one resolves the caller's session, checks group rights,
//! calls the remote API and replies with JSON.

use crate::client::{AttendanceEdit, NewAttendance, ProfileUpdate, SignInCredentials};
use crate::client::{ApiClient, ApiError};
use crate::logic::{MonthKey, PeriodFilter};
use crate::models::{AttendanceError, AttendanceId, GroupId, MatchdayDraft, MatchdayId, UserId};
use crate::server::sessions::{SessionId, SessionStore};
use crate::session::{Session, SessionError};
use actix_session::Session as CookieSession;
use actix_web::{
    delete, get,
    http::StatusCode,
    patch, post, put,
    web::{Data, Json, Path, Query},
    HttpResponse, Responder,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Key of the server-side session id inside the signed cookie.
const SESSION_KEY: &str = "sid";

type Store = Data<SessionStore>;

type Api = Data<ApiClient>;

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct SendCodeBody {
    email: String,
}

#[derive(Deserialize)]
struct VerifyCodeBody {
    email: String,
    code: String,
}

#[derive(Deserialize)]
struct GroupNameBody {
    name: String,
}

#[derive(Deserialize)]
struct SelectGroupBody {
    group_id: GroupId,
}

#[derive(Deserialize)]
struct AddMemberBody {
    email: String,
}

#[derive(Deserialize)]
struct SetLevelBody {
    level: u8,
}

#[derive(Deserialize)]
struct PeriodQuery {
    /// `YYYY-MM`; absent means the recent window.
    month: Option<String>,
}

/// Path segment: group id (e.g. /api/groups/{id})
#[derive(Deserialize)]
struct GroupPath {
    id: GroupId,
}

/// Path segment: member user id (e.g. /api/groups/members/{user_id})
#[derive(Deserialize)]
struct MemberPath {
    user_id: UserId,
}

/// Path segment: matchday id (e.g. /api/matchdays/{id})
#[derive(Deserialize)]
struct MatchdayPath {
    id: MatchdayId,
}

/// Path segments: matchday id and attendance id (e.g. /api/matchdays/{id}/attendance/{attendance_id})
#[derive(Deserialize)]
struct AttendancePath {
    id: MatchdayId,
    attendance_id: AttendanceId,
}

fn json_error(status: StatusCode, message: impl std::fmt::Display) -> HttpResponse {
    HttpResponse::build(status).json(serde_json::json!({ "error": message.to_string() }))
}

fn not_signed_in() -> HttpResponse {
    json_error(StatusCode::UNAUTHORIZED, "Not signed in")
}

fn session_error(e: SessionError) -> HttpResponse {
    let status = match e {
        SessionError::GroupNotFound(_) => StatusCode::NOT_FOUND,
        SessionError::NoActiveGroup => StatusCode::BAD_REQUEST,
        SessionError::NotGroupAdmin => StatusCode::FORBIDDEN,
    };
    json_error(status, e)
}

fn status_for(e: &ApiError) -> StatusCode {
    match e {
        ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
        ApiError::Status { status: 404, .. } => StatusCode::NOT_FOUND,
        ApiError::Status { status, .. } if (400..500).contains(status) => StatusCode::BAD_REQUEST,
        ApiError::Transport(_) | ApiError::Decode(_) | ApiError::Status { .. } => {
            StatusCode::BAD_GATEWAY
        }
        ApiError::Attendance(AttendanceError::AttendanceNotFound(_))
        | ApiError::Attendance(AttendanceError::MatchdayNotFound(_)) => StatusCode::NOT_FOUND,
        ApiError::LastAdmin | ApiError::InvalidInput(_) | ApiError::Attendance(_) => {
            StatusCode::BAD_REQUEST
        }
        ApiError::Session(SessionError::NotGroupAdmin) => StatusCode::FORBIDDEN,
        ApiError::Session(_) => StatusCode::BAD_REQUEST,
    }
}

/// End a session locally: forget it, its cached responses and the cookie.
fn end_session(store: &Store, api: &Api, cookie: &CookieSession, id: SessionId) {
    if let Some(session) = store.remove(&id) {
        api.discard_session(&session);
        log::info!("session {} of user {} ended", id, session.user().id);
    }
    cookie.purge();
}

/// Error reply for a signed-in call. A rejected token ends the session.
fn api_error(
    store: &Store,
    api: &Api,
    cookie: &CookieSession,
    id: SessionId,
    e: ApiError,
) -> HttpResponse {
    if matches!(e, ApiError::Unauthorized) {
        end_session(store, api, cookie, id);
    }
    json_error(status_for(&e), e)
}

/// Look up the caller's session and refresh its activity time.
fn current_session(
    store: &Store,
    cookie: &CookieSession,
) -> Result<(SessionId, Session), HttpResponse> {
    let id = match cookie.get::<SessionId>(SESSION_KEY) {
        Ok(Some(id)) => id,
        _ => return Err(not_signed_in()),
    };
    match store.touch(&id) {
        Some(session) => Ok((id, session)),
        None => Err(not_signed_in()),
    }
}

/// Apply a change to the stored session and reply with its summary.
fn update_session(store: &Store, id: SessionId, change: impl FnOnce(&mut Session)) -> HttpResponse {
    match store.modify(&id, |s| {
        change(s);
        s.summary()
    }) {
        Some(summary) => HttpResponse::Ok().json(summary),
        None => not_signed_in(),
    }
}

/// Register a new session and hand its id to the client in the signed cookie.
fn start_session(store: &Store, cookie: &CookieSession, session: Session) -> HttpResponse {
    let summary = session.summary();
    let id = store.open(session);
    cookie.renew();
    if let Err(e) = cookie.insert(SESSION_KEY, id) {
        store.remove(&id);
        return json_error(StatusCode::INTERNAL_SERVER_ERROR, e);
    }
    HttpResponse::Ok().json(summary)
}

fn period_filter(query: &PeriodQuery) -> Result<PeriodFilter, HttpResponse> {
    match query.month.as_deref() {
        None | Some("") => Ok(PeriodFilter::Recent),
        Some(month) => month
            .parse::<MonthKey>()
            .map(PeriodFilter::Month)
            .map_err(|e| json_error(StatusCode::BAD_REQUEST, e)),
    }
}

#[get("/api/health")]
pub(super) async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "pelada-web",
    })
}

/// Sign in with CPF and password.
#[post("/api/auth/signin")]
pub(super) async fn api_sign_in(
    store: Store,
    api: Api,
    cookie: CookieSession,
    body: Json<SignInCredentials>,
) -> HttpResponse {
    match api.sign_in(&body).await {
        Ok(session) => start_session(&store, &cookie, session),
        Err(e) => json_error(status_for(&e), e),
    }
}

/// E-mail a sign-in code.
#[post("/api/auth/send-code")]
pub(super) async fn api_send_code(api: Api, body: Json<SendCodeBody>) -> HttpResponse {
    match api.send_code(&body.email).await {
        Ok(message) => HttpResponse::Ok().json(serde_json::json!({ "message": message })),
        Err(e) => json_error(status_for(&e), e),
    }
}

/// Sign in with an e-mailed code.
#[post("/api/auth/verify-code")]
pub(super) async fn api_verify_code(
    store: Store,
    api: Api,
    cookie: CookieSession,
    body: Json<VerifyCodeBody>,
) -> HttpResponse {
    match api.verify_code(&body.email, &body.code).await {
        Ok(session) => start_session(&store, &cookie, session),
        Err(e) => json_error(status_for(&e), e),
    }
}

/// Where to send the user for Google sign-in.
#[get("/api/auth/google-url")]
pub(super) async fn api_google_url(api: Api) -> HttpResponse {
    match api.google_login_url().await {
        Ok(url) => HttpResponse::Ok().json(serde_json::json!({ "url": url })),
        Err(e) => json_error(status_for(&e), e),
    }
}

/// Sign out: drops the session here and revokes the token remotely.
#[post("/api/auth/signout")]
pub(super) async fn api_sign_out(store: Store, api: Api, cookie: CookieSession) -> HttpResponse {
    let id = match cookie.get::<SessionId>(SESSION_KEY) {
        Ok(Some(id)) => id,
        _ => return not_signed_in(),
    };
    let session = store.remove(&id);
    cookie.purge();
    match session {
        Some(session) => {
            api.sign_out(session).await;
            HttpResponse::Ok().json(serde_json::json!({ "ok": true }))
        }
        None => not_signed_in(),
    }
}

/// Current user, groups and active group. Checks the token is still accepted.
#[get("/api/me")]
pub(super) async fn api_me(store: Store, api: Api, cookie: CookieSession) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match api.validate_token(session.token()).await {
        Ok(true) => HttpResponse::Ok().json(session.summary()),
        Ok(false) => api_error(&store, &api, &cookie, sid, ApiError::Unauthorized),
        Err(e) => {
            log::warn!("could not validate session {}: {}", sid, e);
            HttpResponse::Ok().json(session.summary())
        }
    }
}

#[get("/api/profile")]
pub(super) async fn api_profile(store: Store, api: Api, cookie: CookieSession) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match api.profile(session.token()).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

#[put("/api/profile")]
pub(super) async fn api_update_profile(
    store: Store,
    api: Api,
    cookie: CookieSession,
    body: Json<ProfileUpdate>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match api.update_profile(session.token(), &body).await {
        Ok(profile) => HttpResponse::Ok().json(profile),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Reload the user's groups from the API and return the session view.
#[get("/api/groups")]
pub(super) async fn api_groups(store: Store, api: Api, cookie: CookieSession) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match api.list_groups(session.token()).await {
        Ok(groups) => update_session(&store, sid, |s| s.set_groups(groups)),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Create a group and make it the active one.
#[post("/api/groups")]
pub(super) async fn api_create_group(
    store: Store,
    api: Api,
    cookie: CookieSession,
    body: Json<GroupNameBody>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group = match api.create_group(session.token(), &body.name).await {
        Ok(g) => g,
        Err(e) => return api_error(&store, &api, &cookie, sid, e),
    };
    match api.list_groups(session.token()).await {
        Ok(groups) => update_session(&store, sid, |s| {
            s.set_groups(groups);
            if let Err(e) = s.select_group(group.id) {
                log::warn!("new group {} missing from the user's groups: {}", group.id, e);
            }
        }),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Rename a group (admins only).
#[put("/api/groups/{id}")]
pub(super) async fn api_rename_group(
    store: Store,
    api: Api,
    cookie: CookieSession,
    path: Path<GroupPath>,
    body: Json<GroupNameBody>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    if let Err(e) = session.require_admin_of(path.id) {
        return session_error(e);
    }
    if let Err(e) = api.rename_group(session.token(), path.id, &body.name).await {
        return api_error(&store, &api, &cookie, sid, e);
    }
    match api.list_groups(session.token()).await {
        Ok(groups) => update_session(&store, sid, |s| s.set_groups(groups)),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Delete a group (admins only).
#[delete("/api/groups/{id}")]
pub(super) async fn api_delete_group(
    store: Store,
    api: Api,
    cookie: CookieSession,
    path: Path<GroupPath>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    if let Err(e) = session.require_admin_of(path.id) {
        return session_error(e);
    }
    if let Err(e) = api.delete_group(session.token(), path.id).await {
        return api_error(&store, &api, &cookie, sid, e);
    }
    match api.list_groups(session.token()).await {
        Ok(groups) => update_session(&store, sid, |s| s.set_groups(groups)),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Switch the active group.
#[post("/api/groups/select")]
pub(super) async fn api_select_group(
    store: Store,
    cookie: CookieSession,
    body: Json<SelectGroupBody>,
) -> HttpResponse {
    let (sid, _) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let selected = store.modify(&sid, |s| {
        let result = s.select_group(body.group_id).map(|g| g.id);
        result.map(|_| s.summary())
    });
    match selected {
        Some(Ok(summary)) => HttpResponse::Ok().json(summary),
        Some(Err(e)) => session_error(e),
        None => not_signed_in(),
    }
}

/// Leave the active group (back to the group picker).
#[delete("/api/groups/select")]
pub(super) async fn api_clear_group(store: Store, cookie: CookieSession) -> HttpResponse {
    let (sid, _) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    update_session(&store, sid, Session::clear_group)
}

/// Members of the active group.
#[get("/api/groups/members")]
pub(super) async fn api_members(store: Store, api: Api, cookie: CookieSession) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_active_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    match api.group_members(session.token(), group_id).await {
        Ok(members) => HttpResponse::Ok().json(members),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Add a member to the active group by e-mail (admins only).
#[post("/api/groups/members")]
pub(super) async fn api_add_member(
    store: Store,
    api: Api,
    cookie: CookieSession,
    body: Json<AddMemberBody>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_admin_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    match api.add_member(session.token(), group_id, &body.email).await {
        Ok(members) => HttpResponse::Ok().json(members),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Remove a member from the active group (admins only).
#[delete("/api/groups/members/{user_id}")]
pub(super) async fn api_remove_member(
    store: Store,
    api: Api,
    cookie: CookieSession,
    path: Path<MemberPath>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_admin_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    match api.remove_member(session.token(), group_id, path.user_id).await {
        Ok(members) => HttpResponse::Ok().json(members),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Grant admin rights in the active group (admins only).
#[post("/api/groups/members/{user_id}/admin")]
pub(super) async fn api_set_admin(
    store: Store,
    api: Api,
    cookie: CookieSession,
    path: Path<MemberPath>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_admin_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    match api.set_admin(session.token(), group_id, path.user_id).await {
        Ok(members) => HttpResponse::Ok().json(members),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Revoke admin rights in the active group; the last admin cannot be removed.
#[delete("/api/groups/members/{user_id}/admin")]
pub(super) async fn api_remove_admin(
    store: Store,
    api: Api,
    cookie: CookieSession,
    path: Path<MemberPath>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_admin_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    match api.remove_admin(session.token(), group_id, path.user_id).await {
        Ok(members) => HttpResponse::Ok().json(members),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Matchdays of the active group.
#[get("/api/matchdays")]
pub(super) async fn api_matchdays(store: Store, api: Api, cookie: CookieSession) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_active_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    match api.list_matchdays(session.token(), group_id).await {
        Ok(matchdays) => HttpResponse::Ok().json(matchdays),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Next matchday of the active group, with teams/admin flags for the home screen.
#[get("/api/matchdays/next")]
pub(super) async fn api_next_matchday(
    store: Store,
    api: Api,
    cookie: CookieSession,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_active_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    match api.home(session.token(), group_id).await {
        Ok(card) => HttpResponse::Ok().json(card),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Schedule a matchday in the active group (admins only).
#[post("/api/matchdays")]
pub(super) async fn api_create_matchday(
    store: Store,
    api: Api,
    cookie: CookieSession,
    body: Json<MatchdayDraft>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_admin_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    let token = session.token();
    if let Err(e) = api.create_matchday(token, group_id, &body).await {
        return api_error(&store, &api, &cookie, sid, e);
    }
    match api.list_matchdays(token, group_id).await {
        Ok(matchdays) => HttpResponse::Ok().json(matchdays),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Edit a matchday of the active group (admins only).
#[put("/api/matchdays/{id}")]
pub(super) async fn api_update_matchday(
    store: Store,
    api: Api,
    cookie: CookieSession,
    path: Path<MatchdayPath>,
    body: Json<MatchdayDraft>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_admin_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    let token = session.token();
    if let Err(e) = api.update_matchday(token, group_id, path.id, &body).await {
        return api_error(&store, &api, &cookie, sid, e);
    }
    match api.list_matchdays(token, group_id).await {
        Ok(matchdays) => HttpResponse::Ok().json(matchdays),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Delete a matchday of the active group (admins only).
#[delete("/api/matchdays/{id}")]
pub(super) async fn api_delete_matchday(
    store: Store,
    api: Api,
    cookie: CookieSession,
    path: Path<MatchdayPath>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_admin_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    let token = session.token();
    if let Err(e) = api.delete_matchday(token, group_id, path.id).await {
        return api_error(&store, &api, &cookie, sid, e);
    }
    match api.list_matchdays(token, group_id).await {
        Ok(matchdays) => HttpResponse::Ok().json(matchdays),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Ranked attendance list of a matchday of the active group.
#[get("/api/matchdays/{id}/attendance")]
pub(super) async fn api_attendance(
    store: Store,
    api: Api,
    cookie: CookieSession,
    path: Path<MatchdayPath>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_active_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    match api.attendance_board(session.token(), group_id, path.id).await {
        Ok(board) => HttpResponse::Ok().json(board),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Add a player to the list (admins only). Returns the re-ranked list.
#[post("/api/matchdays/{id}/attendance")]
pub(super) async fn api_add_attendance(
    store: Store,
    api: Api,
    cookie: CookieSession,
    path: Path<MatchdayPath>,
    body: Json<NewAttendance>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_admin_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    match api
        .add_attendance(session.token(), group_id, path.id, &body)
        .await
    {
        Ok(board) => HttpResponse::Ok().json(board),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Edit name and confirmation time of a record (admins only).
#[patch("/api/matchdays/{id}/attendance/{attendance_id}")]
pub(super) async fn api_edit_attendance(
    store: Store,
    api: Api,
    cookie: CookieSession,
    path: Path<AttendancePath>,
    body: Json<AttendanceEdit>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_admin_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    match api
        .edit_attendance(session.token(), group_id, path.id, path.attendance_id, &body)
        .await
    {
        Ok(board) => HttpResponse::Ok().json(board),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Flip a record between confirmed and canceled (admins only).
#[post("/api/matchdays/{id}/attendance/{attendance_id}/toggle")]
pub(super) async fn api_toggle_attendance(
    store: Store,
    api: Api,
    cookie: CookieSession,
    path: Path<AttendancePath>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_admin_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    match api
        .toggle_confirmation(session.token(), group_id, path.id, path.attendance_id)
        .await
    {
        Ok(board) => HttpResponse::Ok().json(board),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Set a record's skill level 1..=5 (admins only).
#[put("/api/matchdays/{id}/attendance/{attendance_id}/level")]
pub(super) async fn api_set_level(
    store: Store,
    api: Api,
    cookie: CookieSession,
    path: Path<AttendancePath>,
    body: Json<SetLevelBody>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_admin_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    match api
        .set_level(session.token(), group_id, path.id, path.attendance_id, body.level)
        .await
    {
        Ok(board) => HttpResponse::Ok().json(board),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Remove a record from the list (admins only).
#[delete("/api/matchdays/{id}/attendance/{attendance_id}")]
pub(super) async fn api_remove_attendance(
    store: Store,
    api: Api,
    cookie: CookieSession,
    path: Path<AttendancePath>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_admin_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    match api
        .remove_attendance(session.token(), group_id, path.id, path.attendance_id)
        .await
    {
        Ok(board) => HttpResponse::Ok().json(board),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Months with matchdays in the active group, plus the preselected one.
#[get("/api/dashboard/months")]
pub(super) async fn api_dashboard_months(
    store: Store,
    api: Api,
    cookie: CookieSession,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_active_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    match api
        .dashboard_months(session.token(), group_id, Utc::now())
        .await
    {
        Ok(card) => HttpResponse::Ok().json(card),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Top scorers and assists for a month (or the recent window).
#[get("/api/dashboard/leaders")]
pub(super) async fn api_dashboard_leaders(
    store: Store,
    api: Api,
    cookie: CookieSession,
    query: Query<PeriodQuery>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_active_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    let filter = match period_filter(&query) {
        Ok(f) => f,
        Err(resp) => return resp,
    };
    match api
        .leaders(session.token(), group_id, filter, Utc::now())
        .await
    {
        Ok(card) => HttpResponse::Ok().json(card),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}

/// Top performers for a month (or the recent window).
#[get("/api/dashboard/performers")]
pub(super) async fn api_dashboard_performers(
    store: Store,
    api: Api,
    cookie: CookieSession,
    query: Query<PeriodQuery>,
) -> HttpResponse {
    let (sid, session) = match current_session(&store, &cookie) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let group_id = match session.require_active_group() {
        Ok(g) => g.id,
        Err(e) => return session_error(e),
    };
    let filter = match period_filter(&query) {
        Ok(f) => f,
        Err(resp) => return resp,
    };
    match api
        .performers(session.token(), group_id, filter, Utc::now())
        .await
    {
        Ok(card) => HttpResponse::Ok().json(card),
        Err(e) => api_error(&store, &api, &cookie, sid, e),
    }
}
