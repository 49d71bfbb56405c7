use std::sync::Mutex;

use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, Result};
use serde::{Deserialize, Serialize};

use crate::parser::{load_activity_definitions, load_camper_requests};
use crate::scheduler::{
    generate_camper_mate_groups, schedule_activities, ActivityDefinition, CamperRequests,
};

// In-memory storage for the current scheduling run (in production, use a
// database)
pub struct AppState {
    pub activities: Mutex<Option<Vec<ActivityDefinition>>>,
    pub camper_requests: Mutex<Option<Vec<CamperRequests>>>,
    pub unsatisfied: Mutex<Vec<String>>,
    pub admin_password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    password: String,
}

#[derive(Serialize)]
pub struct ScheduleResponse {
    activities: Vec<ActivityView>,
    unsatisfied: Vec<String>,
}

#[derive(Serialize)]
pub struct ActivityView {
    name: String,
    blocks: Vec<BlockView>,
}

#[derive(Serialize)]
pub struct BlockView {
    time_slot: usize,
    campers: Vec<String>,
}

fn check_admin_password(req: &HttpRequest, state: &AppState) -> bool {
    let password = req
        .headers()
        .get("X-Admin-Password")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");
    password == state.admin_password
}

// Admin login endpoint
async fn admin_login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if req.password == state.admin_password {
        Ok(HttpResponse::Ok().json(serde_json::json!({"success": true})))
    } else {
        Ok(HttpResponse::Unauthorized()
            .json(serde_json::json!({"success": false, "error": "Invalid password"})))
    }
}

// Activity definitions CSV upload endpoint
async fn upload_activities(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !check_admin_password(&req, &state) {
        return Ok(HttpResponse::Unauthorized()
            .json(serde_json::json!({"success": false, "error": "Unauthorized"})));
    }

    let csv_path = "uploaded_activities.csv";
    std::fs::write(csv_path, &body)
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to save file: {}", e)))?;

    match load_activity_definitions(csv_path) {
        Ok(definitions) => {
            let count = definitions.len();
            *state.activities.lock().unwrap() = Some(definitions);
            // A new activity set invalidates any previous run.
            *state.camper_requests.lock().unwrap() = None;
            state.unsatisfied.lock().unwrap().clear();
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "activities": count
            })))
        }
        Err(e) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": format!("Failed to process CSV: {}", e)
        }))),
    }
}

// Camper requests CSV upload endpoint
async fn upload_campers(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !check_admin_password(&req, &state) {
        return Ok(HttpResponse::Unauthorized()
            .json(serde_json::json!({"success": false, "error": "Unauthorized"})));
    }

    let activities = state.activities.lock().unwrap();
    let Some(ref definitions) = *activities else {
        return Ok(HttpResponse::BadRequest()
            .json(serde_json::json!({"success": false, "error": "Upload activities first"})));
    };

    let csv_path = "uploaded_campers.csv";
    std::fs::write(csv_path, &body)
        .map_err(|e| actix_web::error::ErrorInternalServerError(format!("Failed to save file: {}", e)))?;

    match load_camper_requests(csv_path, definitions) {
        Ok(requests) => {
            let count = requests.len();
            *state.camper_requests.lock().unwrap() = Some(requests);
            state.unsatisfied.lock().unwrap().clear();
            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "campers": count
            })))
        }
        Err(e) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": format!("Failed to process CSV: {}", e)
        }))),
    }
}

// Runs the scheduling algorithm over the uploaded data
async fn run_schedule(req: HttpRequest, state: web::Data<AppState>) -> Result<HttpResponse> {
    if !check_admin_password(&req, &state) {
        return Ok(HttpResponse::Unauthorized()
            .json(serde_json::json!({"success": false, "error": "Unauthorized"})));
    }

    let mut activities = state.activities.lock().unwrap();
    let mut camper_requests = state.camper_requests.lock().unwrap();
    let (Some(definitions), Some(requests)) = (activities.as_mut(), camper_requests.as_mut())
    else {
        return Ok(HttpResponse::BadRequest().json(
            serde_json::json!({"success": false, "error": "Upload activities and campers first"}),
        ));
    };

    let unsatisfied_indices = schedule_activities(requests, definitions);
    let unsatisfied: Vec<String> = unsatisfied_indices
        .iter()
        .map(|&index| requests[index].camper.full_name())
        .collect();
    let unsatisfied_count = unsatisfied.len();
    *state.unsatisfied.lock().unwrap() = unsatisfied;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "campers": requests.len(),
        "unsatisfied": unsatisfied_count
    })))
}

// Schedule grid endpoint
async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let activities = state.activities.lock().unwrap();

    if let Some(ref definitions) = *activities {
        let views = definitions
            .iter()
            .map(|definition| ActivityView {
                name: definition.name.clone(),
                blocks: definition
                    .blocks
                    .iter()
                    .map(|block| BlockView {
                        time_slot: block.time_slot,
                        campers: block.assigned_campers.clone(),
                    })
                    .collect(),
            })
            .collect();

        Ok(HttpResponse::Ok().json(ScheduleResponse {
            activities: views,
            unsatisfied: state.unsatisfied.lock().unwrap().clone(),
        }))
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No schedule available"})))
    }
}

// Cabin-mate groups endpoint
async fn get_groups(state: web::Data<AppState>) -> Result<HttpResponse> {
    let camper_requests = state.camper_requests.lock().unwrap();

    if let Some(ref requests) = *camper_requests {
        let groups: Vec<Vec<String>> = generate_camper_mate_groups(requests)
            .into_iter()
            .map(|group| {
                let mut members: Vec<String> = group.into_iter().collect();
                members.sort_unstable();
                members
            })
            .collect();
        Ok(HttpResponse::Ok().json(serde_json::json!({ "groups": groups })))
    } else {
        Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No camper data available"})))
    }
}

pub async fn start_server(port: u16, admin_password: String) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState {
        activities: Mutex::new(None),
        camper_requests: Mutex::new(None),
        unsatisfied: Mutex::new(Vec::new()),
        admin_password,
    });

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .route("/api/login", web::post().to(admin_login))
            .route("/api/activities", web::post().to(upload_activities))
            .route("/api/campers", web::post().to(upload_campers))
            .route("/api/schedule/run", web::post().to(run_schedule))
            .route("/api/schedule", web::get().to(get_schedule))
            .route("/api/groups", web::get().to(get_groups))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
