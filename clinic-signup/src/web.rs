use actix_web::{web, App, HttpServer, HttpResponse, Result, HttpRequest, middleware};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::config::resolve_capacity;
use crate::error::SignupError;
use crate::parser::load_roster_from_reader;
use crate::schedule::{
    build_schedule, format_date, format_full_date, DuplicateIdentity, Person, Schedule,
};

pub struct AppState {
    pub admin_password: String,
}

#[derive(Debug, Deserialize)]
pub struct ScheduleQuery {
    capacity: Option<String>,
    seed: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ScheduleResponse {
    pub capacity: usize,
    pub dates: Vec<DateResponse>,
    pub waitlist: Vec<WaitlistEntry>,
    pub duplicate_identities: Vec<DuplicateIdentity>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DateResponse {
    pub date: String,
    pub label: String,
    pub signup_count: u32,
    pub volunteers: Vec<VolunteerEntry>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct VolunteerEntry {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub name: String,
    pub email: String,
    pub dates: String,
}

impl From<&Person> for VolunteerEntry {
    fn from(person: &Person) -> Self {
        VolunteerEntry {
            name: person.name.clone(),
            email: person.email.clone(),
        }
    }
}

impl From<Schedule> for ScheduleResponse {
    fn from(schedule: Schedule) -> Self {
        ScheduleResponse {
            capacity: schedule.capacity.get(),
            dates: schedule
                .slots
                .iter()
                .map(|slot| DateResponse {
                    date: format_full_date(slot.date),
                    label: format_date(slot.date),
                    signup_count: slot.signup_count,
                    volunteers: slot.assigned_volunteers.iter().map(VolunteerEntry::from).collect(),
                })
                .collect(),
            waitlist: schedule
                .waitlist
                .iter()
                .map(|person| WaitlistEntry {
                    name: person.name.clone(),
                    email: person.email.clone(),
                    dates: person.formatted_dates(),
                })
                .collect(),
            duplicate_identities: schedule.duplicate_identities,
        }
    }
}

/// Runs one allocation over an uploaded roster; nothing is kept afterwards
fn schedule_from_upload(body: &[u8], query: &ScheduleQuery) -> Result<Schedule, SignupError> {
    let roster = load_roster_from_reader(body)?;
    let capacity = resolve_capacity(query.capacity.as_deref(), roster.capacity_cell.as_deref())?;
    let mut rng = match query.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(build_schedule(roster.people, capacity, &mut rng))
}

// Schedule endpoint: CSV body in, JSON schedule out
async fn create_schedule(
    req: HttpRequest,
    body: web::Bytes,
    query: web::Query<ScheduleQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    // Check password from header
    let password = req
        .headers()
        .get("X-Admin-Password")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if password != state.admin_password {
        return Ok(HttpResponse::Unauthorized()
            .json(serde_json::json!({"success": false, "error": "Unauthorized"})));
    }

    match schedule_from_upload(&body, &query) {
        Ok(schedule) => {
            info!(
                dates = schedule.slots.len(),
                waitlisted = schedule.waitlist.len(),
                "schedule generated from upload"
            );
            Ok(HttpResponse::Ok().json(ScheduleResponse::from(schedule)))
        }
        Err(e) => {
            warn!(error = %e, "rejected roster upload");
            Ok(HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "error": e.to_string()
            })))
        }
    }
}

async fn health() -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(serde_json::json!({"status": "ok"})))
}

fn routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/health", web::get().to(health))
        .route("/api/schedule", web::post().to(create_schedule));
}

pub async fn start_server(port: u16, admin_password: String) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState { admin_password });

    info!(port, "starting web server");
    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(routes)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
