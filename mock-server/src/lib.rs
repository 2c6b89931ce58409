//! In-memory stand-in for the career tracker backend.
//!
//! Covers the routes the client integration tests drive: offers (with
//! export), career simulations, and progress-sharing links. Every route
//! except the public shared-progress view requires a bearer token.
//! Simulations advance one lifecycle step per poll (pending, running, then
//! completed or failed) so clients can exercise their polling paths.

use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{delete, get},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

const DEFAULT_STARTING_SALARY: f64 = 100_000.0;
const DEFAULT_RAISE_PERCENT: f64 = 3.0;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulationRecord {
    pub simulation_id: String,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computation_time_seconds: Option<f64>,
    pub request: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateSimulation {
    pub offer_id: String,
    #[serde(default)]
    pub simulation_years: Option<u32>,
    #[serde(default)]
    pub starting_salary: Option<f64>,
    #[serde(default)]
    pub annual_raise_percent: Option<f64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShareLink {
    pub token: String,
    pub revoked: bool,
    #[serde(flatten)]
    pub scope: Map<String, Value>,
}

#[derive(Default)]
pub struct Store {
    offers: RwLock<HashMap<String, Value>>,
    simulations: RwLock<HashMap<String, SimulationRecord>>,
    links: RwLock<HashMap<String, ShareLink>>,
}

pub type Db = Arc<Store>;

type ApiResult<T> = Result<T, (StatusCode, Json<Value>)>;

fn detail(status: StatusCode, message: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": message })))
}

pub fn app() -> Router {
    let db: Db = Arc::new(Store::default());

    let protected = Router::new()
        .route("/offers", get(list_offers).post(create_offer))
        .route("/offers/{id}", get(get_offer).put(update_offer).delete(delete_offer))
        .route("/offers/{id}/export/{format}", get(export_offer))
        .route("/career-simulation", get(list_simulations).post(create_simulation))
        .route("/career-simulation/{id}", get(get_simulation).delete(delete_simulation))
        .route("/career-simulation/offer/{offer_id}", get(list_offer_simulations))
        .route("/progress-sharing/links", get(list_links).post(create_link))
        .route("/progress-sharing/links/{token}", delete(revoke_link))
        .route_layer(middleware::from_fn(require_auth));

    let public = Router::new().route("/progress-sharing/shared/{token}", get(view_shared));

    protected
        .merge(public)
        .with_state(db)
        .layer(TraceLayer::new_for_http())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn require_auth(req: Request, next: Next) -> Response {
    let authorized = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .is_some_and(|token| !token.trim().is_empty());
    if !authorized {
        return detail(StatusCode::UNAUTHORIZED, "Not authenticated").into_response();
    }
    next.run(req).await
}

fn now() -> String {
    // Fixed clock keeps responses reproducible across test runs.
    "2026-01-01T00:00:00Z".to_string()
}

// --- offers ---

async fn list_offers(State(db): State<Db>) -> Json<Vec<Value>> {
    Json(db.offers.read().await.values().cloned().collect())
}

async fn create_offer(State(db): State<Db>, Json(input): Json<Value>) -> ApiResult<(StatusCode, Json<Value>)> {
    let Value::Object(mut offer) = input else {
        return Err(detail(StatusCode::UNPROCESSABLE_ENTITY, "offer must be an object"));
    };
    let id = Uuid::new_v4().to_string();
    offer.insert("id".into(), Value::String(id.clone()));
    let offer = Value::Object(offer);
    db.offers.write().await.insert(id, offer.clone());
    Ok((StatusCode::CREATED, Json(offer)))
}

async fn get_offer(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<Value>> {
    db.offers
        .read()
        .await
        .get(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Offer not found"))
}

async fn update_offer(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(input): Json<Value>,
) -> ApiResult<Json<Value>> {
    let mut offers = db.offers.write().await;
    let offer = offers
        .get_mut(&id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Offer not found"))?;
    if let (Some(target), Value::Object(changes)) = (offer.as_object_mut(), input) {
        for (k, v) in changes {
            if k != "id" {
                target.insert(k, v);
            }
        }
    }
    Ok(Json(offer.clone()))
}

async fn delete_offer(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    db.offers
        .write()
        .await
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Offer not found"))
}

async fn export_offer(State(db): State<Db>, Path((id, format)): Path<(String, String)>) -> ApiResult<Response> {
    let offer = db
        .offers
        .read()
        .await
        .get(&id)
        .cloned()
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Offer not found"))?;
    let (content_type, body) = match format.as_str() {
        "pdf" => ("application/pdf", format!("%PDF-1.4\n% offer {id}\n").into_bytes()),
        "docx" => (
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            b"PK\x03\x04mock-docx".to_vec(),
        ),
        "json" => ("application/json", offer.to_string().into_bytes()),
        _ => return Err(detail(StatusCode::BAD_REQUEST, "Unsupported export format")),
    };
    let disposition = format!("attachment; filename=\"offer-{id}.{format}\"");
    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response())
}

// --- career simulation ---

async fn create_simulation(
    State(db): State<Db>,
    Json(input): Json<Value>,
) -> ApiResult<(StatusCode, Json<SimulationRecord>)> {
    let parsed: CreateSimulation = serde_json::from_value(input.clone())
        .map_err(|e| (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({"detail": [{"msg": e.to_string()}]}))))?;
    tracing::debug!(offer_id = %parsed.offer_id, "simulation queued");
    let record = SimulationRecord {
        simulation_id: Uuid::new_v4().to_string(),
        status: "pending".into(),
        created_at: now(),
        updated_at: now(),
        completed_at: None,
        computation_time_seconds: None,
        request: input,
        response: None,
        error_message: None,
    };
    db.simulations
        .write()
        .await
        .insert(record.simulation_id.clone(), record.clone());
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_simulation(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<Json<SimulationRecord>> {
    let offers = db.offers.read().await;
    let mut sims = db.simulations.write().await;
    let record = sims
        .get_mut(&id)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Simulation not found"))?;
    advance(record, &offers);
    Ok(Json(record.clone()))
}

async fn list_simulations(State(db): State<Db>) -> Json<Vec<SimulationRecord>> {
    Json(db.simulations.read().await.values().cloned().collect())
}

async fn list_offer_simulations(State(db): State<Db>, Path(offer_id): Path<String>) -> Json<Vec<SimulationRecord>> {
    Json(
        db.simulations
            .read()
            .await
            .values()
            .filter(|r| r.request["offer_id"] == offer_id.as_str())
            .cloned()
            .collect(),
    )
}

async fn delete_simulation(State(db): State<Db>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    db.simulations
        .write()
        .await
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Simulation not found"))
}

/// Move a record one step along pending -> running -> completed|failed.
fn advance(record: &mut SimulationRecord, offers: &HashMap<String, Value>) {
    record.updated_at = now();
    match record.status.as_str() {
        "pending" => record.status = "running".into(),
        "running" => {
            let Ok(req) = serde_json::from_value::<CreateSimulation>(record.request.clone()) else {
                record.status = "failed".into();
                record.error_message = Some("malformed request".into());
                return;
            };
            let Some(offer) = offers.get(&req.offer_id) else {
                record.status = "failed".into();
                record.error_message = Some(format!("offer {} not found", req.offer_id));
                return;
            };
            record.status = "completed".into();
            record.completed_at = Some(now());
            record.computation_time_seconds = Some(1.5);
            record.response = Some(project(&req, offer));
        }
        _ => {}
    }
}

/// Placeholder projection: compound raises on the starting salary.
fn project(req: &CreateSimulation, offer: &Value) -> Value {
    let salary = req
        .starting_salary
        .or_else(|| offer["base_salary"].as_f64())
        .unwrap_or(DEFAULT_STARTING_SALARY);
    let rate = req.annual_raise_percent.unwrap_or(DEFAULT_RAISE_PERCENT) / 100.0;
    let years = req.simulation_years.unwrap_or(5).max(1);
    let earnings = |n: u32| (0..n).map(|y| salary * (1.0 + rate).powi(y as i32)).sum::<f64>();

    json!({
        "career_paths": [{"path_id": "stay", "name": "Stay and grow"}],
        "optimal_path": {
            "path_id": "stay",
            "total_earnings_5yr": earnings(5),
            "total_earnings_10yr": earnings(10),
            "peak_salary": salary * (1.0 + rate).powi(years as i32 - 1),
            "career_growth_rate": rate,
            "overall_score": 75.0,
            "title_progression": [offer["title"].clone()],
            "companies_worked": [offer["company"].clone()]
        },
        "path_rankings": [{"path_id": "stay", "rank": 1}],
        "confidence_level": 0.6,
        "data_sources": ["mock"]
    })
}

// --- progress sharing ---

async fn create_link(State(db): State<Db>, Json(input): Json<Value>) -> (StatusCode, Json<ShareLink>) {
    let link = ShareLink {
        token: Uuid::new_v4().simple().to_string(),
        revoked: false,
        scope: input.as_object().cloned().unwrap_or_default(),
    };
    db.links.write().await.insert(link.token.clone(), link.clone());
    (StatusCode::CREATED, Json(link))
}

async fn list_links(State(db): State<Db>) -> Json<Vec<ShareLink>> {
    Json(db.links.read().await.values().cloned().collect())
}

async fn revoke_link(State(db): State<Db>, Path(token): Path<String>) -> ApiResult<StatusCode> {
    let mut links = db.links.write().await;
    let link = links
        .get_mut(&token)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Share link not found"))?;
    link.revoked = true;
    Ok(StatusCode::NO_CONTENT)
}

async fn view_shared(State(db): State<Db>, Path(token): Path<String>) -> ApiResult<Json<Value>> {
    let links = db.links.read().await;
    let link = links
        .get(&token)
        .ok_or_else(|| detail(StatusCode::NOT_FOUND, "Share link not found"))?;
    if link.revoked {
        return Err(detail(StatusCode::FORBIDDEN, "This share link has been revoked"));
    }
    let applications = db.offers.read().await.len();
    Ok(Json(json!({
        "token": link.token,
        "scope": link.scope,
        "progress": {"offers_received": applications}
    })))
}
