//! Single binary web server: padel tournament API via REST.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default so the app is reachable via DNS on a VPS.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080).

use actix_web::{
    delete, get, post, put,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use padel_tournament_web::{
    advance_if_ready, pair_individuals, record_result, register_couple, register_individual,
    start_tournament, unregister, zone_standings, Category, ErrorKind, KnockoutRound, MatchId,
    MatchScore, MatchStatus, Player, PlayerId, Roster, Round, SetScore, Side, Tournament,
    TournamentConfig, TournamentError, TournamentId, ZoneId,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// Per-tournament entry: tournament data + last activity time (for auto-cleanup).
struct TournamentEntry {
    tournament: Tournament,
    last_activity: Instant,
}

/// In-memory state: the club roster plus tournaments by id. A mutating
/// handler holds the write lock for its whole operation, so each request
/// is atomic against the others.
struct AppData {
    roster: Roster,
    tournaments: HashMap<TournamentId, TournamentEntry>,
}

type AppState = Data<RwLock<AppData>>;

/// Inactivity threshold: finished or abandoned tournaments are removed
/// after this long without any request touching them.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

/// Map an engine error to an HTTP response by its kind.
fn error_response(e: &TournamentError) -> HttpResponse {
    let body = serde_json::json!({ "error": e.to_string() });
    match e.kind() {
        ErrorKind::Validation => HttpResponse::BadRequest().json(body),
        ErrorKind::Conflict => HttpResponse::Conflict().json(body),
        ErrorKind::NotFound => HttpResponse::NotFound().json(body),
        ErrorKind::Invariant => {
            log::error!("engine invariant violated: {e}");
            HttpResponse::InternalServerError().json(body)
        }
    }
}

fn no_tournament() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "error": "No tournament" }))
}

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreatePlayerBody {
    name: String,
}

#[derive(Deserialize)]
struct CreateTournamentBody {
    name: String,
    category: Category,
    #[serde(default = "default_max_players")]
    max_players: usize,
    #[serde(default)]
    config: TournamentConfig,
}

fn default_max_players() -> usize {
    32
}

#[derive(Deserialize)]
struct RegisterIndividualBody {
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct RegisterCoupleBody {
    player_a: PlayerId,
    player_b: PlayerId,
}

#[derive(Deserialize)]
struct RecordResultBody {
    sets: Vec<SetScore>,
}

/// Path segment: tournament id (e.g. /api/tournaments/{id})
#[derive(Deserialize)]
struct TournamentPath {
    id: TournamentId,
}

#[derive(Deserialize)]
struct TournamentPlayerPath {
    id: TournamentId,
    player_id: PlayerId,
}

#[derive(Deserialize)]
struct TournamentZonePath {
    id: TournamentId,
    zone_id: ZoneId,
}

#[derive(Deserialize)]
struct TournamentMatchPath {
    id: TournamentId,
    match_id: MatchId,
}

/// Status read model: lifecycle, current round, champion display name.
#[derive(Serialize)]
struct StatusView {
    status: padel_tournament_web::TournamentStatus,
    current_round: Option<KnockoutRound>,
    champion: Option<String>,
}

/// A knockout match annotated with display names for presentation.
#[derive(Serialize)]
struct BracketMatchView {
    id: MatchId,
    round: KnockoutRound,
    order: u32,
    status: MatchStatus,
    side_a: String,
    side_b: String,
    winner: Option<String>,
}

/// Human-readable label for a match side.
fn side_label(roster: &Roster, side: &Side) -> String {
    match side {
        Side::Couple(id) => roster
            .couple_name(*id)
            .unwrap_or_else(|| id.to_string()),
        Side::Bye => "BYE".to_string(),
        Side::AwaitingWinner(_) => "TBD".to_string(),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-tournament-web",
    })
}

/// Create a player in the club roster.
#[post("/api/players")]
async fn api_create_player(state: AppState, body: Json<CreatePlayerBody>) -> HttpResponse {
    let name = body.name.trim();
    if name.is_empty() {
        return HttpResponse::BadRequest()
            .json(serde_json::json!({ "error": "Player name must not be empty" }));
    }
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let player = Player::new(name);
    let id = player.id;
    g.roster.add_player(player);
    HttpResponse::Ok().json(&g.roster.players[&id])
}

/// List all players in the roster.
#[get("/api/players")]
async fn api_list_players(state: AppState) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let mut players: Vec<&Player> = g.roster.players.values().collect();
    players.sort_by(|x, y| x.name.cmp(&y.name));
    HttpResponse::Ok().json(players)
}

/// Create a new tournament (returns it with id; client stores id for subsequent requests).
#[post("/api/tournaments")]
async fn api_create_tournament(state: AppState, body: Json<CreateTournamentBody>) -> HttpResponse {
    let body = body.into_inner();
    let tournament =
        Tournament::with_config(body.name, body.category, body.max_players, body.config);
    let id = tournament.id;
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    g.tournaments.insert(
        id,
        TournamentEntry {
            tournament,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(&g.tournaments[&id].tournament)
}

/// Get a tournament by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/tournaments/{id}")]
async fn api_get_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.tournaments.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(&entry.tournament)
        }
        None => no_tournament(),
    }
}

/// Lifecycle status, current round, and champion (if decided).
#[get("/api/tournaments/{id}/status")]
async fn api_tournament_status(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.tournaments.get(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    let t = &entry.tournament;
    HttpResponse::Ok().json(StatusView {
        status: t.status,
        current_round: t.current_round,
        champion: t.champion.and_then(|c| g.roster.couple_name(c)),
    })
}

/// Register a single player looking for a partner (tournament must not have started).
#[post("/api/tournaments/{id}/registrations/individual")]
async fn api_register_individual(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RegisterIndividualBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let AppData { roster, tournaments } = &mut *g;
    let entry = match tournaments.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    match register_individual(roster, &mut entry.tournament, body.player_id) {
        Ok(()) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => error_response(&e),
    }
}

/// Register two players as a couple, converting a lone individual registration if present.
#[post("/api/tournaments/{id}/registrations/couple")]
async fn api_register_couple(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RegisterCoupleBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let AppData { roster, tournaments } = &mut *g;
    let entry = match tournaments.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    match register_couple(roster, &mut entry.tournament, body.player_a, body.player_b) {
        Ok(()) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => error_response(&e),
    }
}

/// Club-only: merge two individual registrations into one couple registration.
#[post("/api/tournaments/{id}/registrations/pair")]
async fn api_pair_individuals(
    state: AppState,
    path: Path<TournamentPath>,
    body: Json<RegisterCoupleBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let AppData { roster, tournaments } = &mut *g;
    let entry = match tournaments.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    match pair_individuals(roster, &mut entry.tournament, body.player_a, body.player_b) {
        Ok(()) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => error_response(&e),
    }
}

/// Remove a player's registration (individual or couple).
#[delete("/api/tournaments/{id}/registrations/{player_id}")]
async fn api_unregister(state: AppState, path: Path<TournamentPlayerPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let AppData { roster, tournaments } = &mut *g;
    let entry = match tournaments.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    match unregister(roster, &mut entry.tournament, path.player_id) {
        Ok(()) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => error_response(&e),
    }
}

/// Start the tournament: freeze registrations, build zones (or seed the
/// bracket directly when the field is small), open play.
#[post("/api/tournaments/{id}/start")]
async fn api_start_tournament(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.tournaments.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    match start_tournament(&mut entry.tournament) {
        Ok(()) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => error_response(&e),
    }
}

/// Record the score of one match (zone or knockout).
#[put("/api/tournaments/{id}/matches/{match_id}/result")]
async fn api_record_result(
    state: AppState,
    path: Path<TournamentMatchPath>,
    body: Json<RecordResultBody>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.tournaments.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    let score = MatchScore::new(body.sets.clone());
    match record_result(&mut entry.tournament, path.match_id, score) {
        Ok(_) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => error_response(&e),
    }
}

/// Opportunistic advancement; idempotent, safe to call after any result.
#[post("/api/tournaments/{id}/advance")]
async fn api_advance(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.tournaments.get_mut(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    entry.last_activity = Instant::now();
    match advance_if_ready(&mut entry.tournament) {
        Ok(()) => HttpResponse::Ok().json(&entry.tournament),
        Err(e) => error_response(&e),
    }
}

/// List the tournament's zones.
#[get("/api/tournaments/{id}/zones")]
async fn api_zones(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.tournaments.get(&path.id) {
        Some(entry) => HttpResponse::Ok().json(&entry.tournament.zones),
        None => no_tournament(),
    }
}

/// Current standings of one zone.
#[get("/api/tournaments/{id}/zones/{zone_id}/standings")]
async fn api_zone_standings(state: AppState, path: Path<TournamentZonePath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.tournaments.get(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    match zone_standings(&entry.tournament, path.zone_id) {
        Ok(rows) => HttpResponse::Ok().json(rows),
        Err(e) => error_response(&e),
    }
}

/// Knockout bracket with couple display names resolved.
#[get("/api/tournaments/{id}/bracket")]
async fn api_bracket(state: AppState, path: Path<TournamentPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.tournaments.get(&path.id) {
        Some(e) => e,
        None => return no_tournament(),
    };
    let t = &entry.tournament;
    let mut views: Vec<BracketMatchView> = t
        .matches
        .iter()
        .filter_map(|m| match m.round {
            Round::Knockout(round) => Some(BracketMatchView {
                id: m.id,
                round,
                order: m.order,
                status: m.status,
                side_a: side_label(&g.roster, &m.side_a),
                side_b: side_label(&g.roster, &m.side_b),
                winner: m.winner_couple().and_then(|c| g.roster.couple_name(c)),
            }),
            Round::Zone => None,
        })
        .collect();
    views.sort_by_key(|v| (v.round, v.order));
    HttpResponse::Ok().json(views)
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    let state = Data::new(RwLock::new(AppData {
        roster: Roster::new(),
        tournaments: HashMap::new(),
    }));

    // Background task: every 30 minutes, remove tournaments inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = actix_web::rt::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.tournaments.len();
            g.tournaments
                .retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.tournaments.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive tournament(s) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(api_health)
            .service(api_create_player)
            .service(api_list_players)
            .service(api_create_tournament)
            .service(api_get_tournament)
            .service(api_tournament_status)
            .service(api_register_individual)
            .service(api_register_couple)
            .service(api_pair_individuals)
            .service(api_unregister)
            .service(api_start_tournament)
            .service(api_record_result)
            .service(api_advance)
            .service(api_zones)
            .service(api_zone_standings)
            .service(api_bracket)
    })
    .bind(bind)?
    .run()
    .await
}
