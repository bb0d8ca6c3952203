//! Local stand-in for the remote pelada API, served by actix-web on a random port.
//!
//! Matchday 1 of group 7 has two seats and three confirmed players (ids 1..=3,
//! earliest first). The attendance list carries an ETag that changes on every mutation.

#![allow(dead_code)]

use actix_web::http::header::{AUTHORIZATION, ETAG, IF_NONE_MATCH};
use actix_web::web::{self, Data, Json, Path};
use actix_web::{App, HttpRequest, HttpResponse, HttpServer};
use pelada::{ApiClient, AttendanceRecord, Config, Matchday};
use serde_json::{json, Value};
use std::sync::Mutex;

pub const TOKEN: &str = "good";
/// Token the stand-in answers with 304 and no body.
pub const STALE_TOKEN: &str = "stale";
pub const GROUP_ID: i64 = 7;
pub const MATCHDAY_ID: i64 = 1;
/// Exists, but belongs to another group.
pub const FOREIGN_MATCHDAY_ID: i64 = 2;

pub struct Remote {
    pub matchday: Matchday,
    pub records: Vec<AttendanceRecord>,
    pub list_version: u32,
    /// `If-None-Match` sent with each attendance list GET, in order.
    pub list_revalidations: Vec<Option<String>>,
    /// Writes applied to the attendance list.
    pub mutations: usize,
    /// When set, every token is rejected with 401.
    pub revoked: bool,
    /// Whether the user administers group 7.
    pub admin: bool,
}

impl Remote {
    pub fn new() -> Self {
        let records = (1..=3)
            .map(|i| {
                AttendanceRecord::new(i, MATCHDAY_ID, 100 + i, format!("2025-03-01T10:0{}:00Z", i), true)
                    .with_name(format!("P{}", i))
            })
            .collect();
        Self {
            matchday: Matchday {
                id: MATCHDAY_ID,
                organization_id: GROUP_ID,
                date: "2025-03-08T09:00:00Z".to_string(),
                number_players: Some(2),
                players_teams: None,
                number_teams: None,
                dedicated_goal_keeper: false,
                location: Some("Arena".to_string()),
                list_released: Some(true),
            },
            records,
            list_version: 0,
            list_revalidations: Vec::new(),
            mutations: 0,
            revoked: false,
            admin: true,
        }
    }

    fn bump(&mut self) {
        self.list_version += 1;
        self.mutations += 1;
    }
}

type Shared = Data<Mutex<Remote>>;

/// Start the stand-in and a client pointed at it. Must run inside an actix runtime.
pub fn start(remote: Remote) -> (Shared, ApiClient) {
    let shared = Data::new(Mutex::new(remote));
    let app_shared = shared.clone();
    let server = HttpServer::new(move || App::new().app_data(app_shared.clone()).configure(routes))
        .workers(1)
        .bind(("127.0.0.1", 0))
        .expect("bind stand-in API");
    let addr = server.addrs()[0];
    actix_web::rt::spawn(server.run());

    let config = Config {
        api_url: format!("http://{}", addr),
        ..Config::default()
    };
    (shared, ApiClient::new(&config).expect("build client"))
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/auth/signin", web::post().to(sign_in))
        .route("/auth/signout", web::post().to(sign_out))
        .route("/auth/validate", web::get().to(validate))
        .route("/organization", web::get().to(groups))
        .route("/users/profile", web::get().to(profile))
        .route("/matchday/get-all-matchdays/{group}", web::get().to(matchdays))
        .route("/matchday/{id}", web::get().to(matchday))
        .route("/attendance-list/matchday/{id}", web::get().to(attendance_list))
        .route("/attendance-list", web::post().to(add_attendance))
        .service(
            web::resource("/attendance-list/{id}")
                .route(web::patch().to(patch_attendance))
                .route(web::delete().to(delete_attendance)),
        )
        .route("/matches/matchday/{id}", web::get().to(matches))
        .route("/player-participation/match/{id}", web::get().to(participations))
        .route("/goals/match/{id}", web::get().to(goals));
}

fn bearer(req: &HttpRequest) -> Option<&str> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn authorized(req: &HttpRequest, remote: &Remote) -> bool {
    !remote.revoked && bearer(req) == Some(TOKEN)
}

fn if_none_match(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(IF_NONE_MATCH)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(json!({ "message": "Unauthorized" }))
}

async fn sign_in() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "token": TOKEN,
        "user": { "id": 1, "cpf": 12345678900i64 },
        "colaborador": null
    }))
}

async fn sign_out() -> HttpResponse {
    HttpResponse::Ok().finish()
}

async fn validate(remote: Shared, req: HttpRequest) -> HttpResponse {
    let remote = remote.lock().expect("remote state");
    if authorized(&req, &remote) {
        HttpResponse::Ok().finish()
    } else {
        unauthorized()
    }
}

async fn groups(remote: Shared, req: HttpRequest) -> HttpResponse {
    let remote = remote.lock().expect("remote state");
    if !authorized(&req, &remote) {
        return unauthorized();
    }
    let tag = "\"groups-1\"";
    if if_none_match(&req).as_deref() == Some(tag) {
        return HttpResponse::NotModified().finish();
    }
    HttpResponse::Ok()
        .insert_header((ETAG, tag))
        .json(json!([{ "id": GROUP_ID, "name": "Quinta", "admin": remote.admin }]))
}

async fn profile(remote: Shared, req: HttpRequest) -> HttpResponse {
    let remote = remote.lock().expect("remote state");
    if bearer(&req) == Some(STALE_TOKEN) {
        return HttpResponse::NotModified().finish();
    }
    if !authorized(&req, &remote) {
        return unauthorized();
    }
    HttpResponse::Ok().json(json!({ "id": 1, "name": "Ana", "email": "ana@example.com" }))
}

async fn matchdays(remote: Shared, req: HttpRequest) -> HttpResponse {
    let remote = remote.lock().expect("remote state");
    if !authorized(&req, &remote) {
        return unauthorized();
    }
    HttpResponse::Ok().json(vec![&remote.matchday])
}

async fn matchday(remote: Shared, req: HttpRequest, path: Path<i64>) -> HttpResponse {
    let remote = remote.lock().expect("remote state");
    if !authorized(&req, &remote) {
        return unauthorized();
    }
    match path.into_inner() {
        MATCHDAY_ID => HttpResponse::Ok().json(&remote.matchday),
        FOREIGN_MATCHDAY_ID => {
            let mut other = remote.matchday.clone();
            other.id = FOREIGN_MATCHDAY_ID;
            other.organization_id = 99;
            HttpResponse::Ok().json(other)
        }
        _ => HttpResponse::NotFound().json(json!({ "message": "Matchday not found" })),
    }
}

async fn attendance_list(remote: Shared, req: HttpRequest, path: Path<i64>) -> HttpResponse {
    let mut remote = remote.lock().expect("remote state");
    if !authorized(&req, &remote) {
        return unauthorized();
    }
    let sent = if_none_match(&req);
    remote.list_revalidations.push(sent.clone());
    let tag = format!("\"v{}\"", remote.list_version);
    if sent.as_deref() == Some(tag.as_str()) {
        return HttpResponse::NotModified().finish();
    }
    let records = if path.into_inner() == MATCHDAY_ID {
        remote.records.clone()
    } else {
        Vec::new()
    };
    HttpResponse::Ok().insert_header((ETAG, tag)).json(records)
}

async fn add_attendance(remote: Shared, req: HttpRequest, body: Json<Value>) -> HttpResponse {
    let mut remote = remote.lock().expect("remote state");
    if !authorized(&req, &remote) {
        return unauthorized();
    }
    let id = remote.records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
    let mut record = AttendanceRecord::new(
        id,
        MATCHDAY_ID,
        body["userId"].as_i64().unwrap_or(0),
        format!("2025-03-01T11:{:02}:00Z", id),
        body["confirmed"].as_bool().unwrap_or(true),
    );
    record.goalkeeper = body["goalkeeper"].as_bool().unwrap_or(false);
    remote.records.push(record);
    remote.bump();
    HttpResponse::Created().json(json!({ "id": id }))
}

async fn patch_attendance(
    remote: Shared,
    req: HttpRequest,
    path: Path<i64>,
    body: Json<Value>,
) -> HttpResponse {
    let mut remote = remote.lock().expect("remote state");
    if !authorized(&req, &remote) {
        return unauthorized();
    }
    let id = path.into_inner();
    let Some(record) = remote.records.iter_mut().find(|r| r.id == id) else {
        return HttpResponse::NotFound().json(json!({ "message": "Attendance not found" }));
    };
    if let Some(confirmed) = body.get("confirmed").and_then(Value::as_bool) {
        record.confirmed = confirmed;
    }
    if let Some(level) = body.get("level").and_then(Value::as_u64) {
        record.level = u8::try_from(level).ok();
    }
    if let Some(name) = body.get("playerName").and_then(Value::as_str) {
        record.player_name = Some(name.to_string());
    }
    if let Some(time) = body.get("timeConfirmed").and_then(Value::as_str) {
        record.time_confirmed = time.to_string();
    }
    remote.bump();
    HttpResponse::Ok().finish()
}

async fn delete_attendance(remote: Shared, req: HttpRequest, path: Path<i64>) -> HttpResponse {
    let mut remote = remote.lock().expect("remote state");
    if !authorized(&req, &remote) {
        return unauthorized();
    }
    let id = path.into_inner();
    remote.records.retain(|r| r.id != id);
    remote.bump();
    HttpResponse::Ok().finish()
}

/// Match 5 is finished with an id; the second finished match has none.
async fn matches() -> HttpResponse {
    HttpResponse::Ok().json(json!([
        { "id": 5, "team1": 1, "team2": 2, "scoreTeam1": 2, "scoreTeam2": 0,
          "endTime": "2025-03-08T10:00:00Z" },
        { "team1": 1, "team2": 2, "scoreTeam1": 1, "scoreTeam2": 1 }
    ]))
}

async fn participations() -> HttpResponse {
    HttpResponse::Ok().json(json!([
        { "id": 50, "userId": 1, "userName": "Ana", "team": { "team": 1 } },
        { "id": 51, "userId": 2, "userName": "Bia", "team": { "team": 2 } }
    ]))
}

async fn goals() -> HttpResponse {
    HttpResponse::Ok().json(json!([
        { "scorerParticipationId": 50, "assistParticipationId": null, "isOwnGoal": false }
    ]))
}
