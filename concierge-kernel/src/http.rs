/**
 * API REST CONCIERGE - Serveur HTTP principal du kernel
 *
 * RÔLE :
 * Ce module expose l'API REST sécurisée consommée par le dashboard
 * analytics. Interface principale entre frontend/CLI et kernel backend.
 *
 * FONCTIONNEMENT :
 * - Serveur Axum avec middleware auth API key
 * - Routes organisées : /health, /system, /connections, /sync, /records
 * - Sérialisation JSON automatique des réponses
 * - Gestion erreurs HTTP standardisée (400, 401, 404, 502...)
 *
 * SÉCURITÉ :
 * - Header x-api-key obligatoire sur toutes routes sauf /health
 * - Validation côté middleware avant traitement métier
 */

use crate::health::AggregatorHealth;
use crate::models::{AuthKind, ConnectionStatus, PmsConnection, SyncFrequency, VendorKind};
use crate::ports::{JsonFilePort, RecordPort, StoredRecord};
use crate::registry::{ConnectionDraft, RegistryError, SharedConnectionRegistry};
use crate::sync::{SyncOrchestrator, SyncReport};
use crate::vendors::ResourceKind;
use axum::extract::{Path, Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::{Json, Router};
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

#[derive(serde::Serialize)]
struct ConnectionView {
    id: String,
    name: String,
    vendor: VendorKind,
    status: ConnectionStatus,
    last_sync: String,       // format RFC3339 pour l'API
    stale: bool,             // true si > 24h sans sync
    stale_for_seconds: i64,  // âge en secondes
    api_endpoint: String,
    auth_type: AuthKind,
    sync_frequency: SyncFrequency,
}

fn to_view(c: &PmsConnection) -> ConnectionView {
    let age_seconds = OffsetDateTime::parse(&c.last_sync, &Rfc3339)
        .map(|t| (OffsetDateTime::now_utc() - t).whole_seconds().max(0))
        .unwrap_or(0);

    ConnectionView {
        id: c.id.clone(),
        name: c.name.clone(),
        vendor: c.vendor,
        status: c.status,
        last_sync: c.last_sync.clone(),
        stale: age_seconds > Duration::hours(24).whole_seconds(),
        stale_for_seconds: age_seconds,
        api_endpoint: c.api_endpoint.clone(),
        auth_type: c.auth_type,
        sync_frequency: c.sync_frequency,
    }
}

async fn require_api_key(req: Request, next: Next) -> Result<Response, StatusCode> {
    let path = req.uri().path();

    // Health check toujours accessible
    if path.starts_with("/health") {
        return Ok(next.run(req).await);
    }

    let expected = std::env::var("CONCIERGE_API_KEY").unwrap_or_default();
    if expected.is_empty() {
        eprintln!("SECURITY: CONCIERGE_API_KEY not set - API access denied");
        return Err(StatusCode::UNAUTHORIZED);
    }

    let ok = req
        .headers()
        .get("x-api-key")
        .and_then(|v| v.to_str().ok())
        .map(|v| v == expected)
        .unwrap_or(false);

    if !ok {
        return Err(StatusCode::UNAUTHORIZED);
    }
    Ok(next.run(req).await)
}

#[derive(Clone)]
pub struct AppState {
    pub registry: SharedConnectionRegistry,
    pub orchestrator: Arc<SyncOrchestrator>,
    pub ports: Arc<JsonFilePort>,
    pub health_tracker: crate::health::HealthTracker,
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/system/health", get(get_system_health))
        .route("/connections", get(list_connections).post(add_connection))
        .route(
            "/connections/{id}",
            get(get_connection).delete(remove_connection),
        )
        .route("/connections/{id}/sync", post(sync_connection))
        .route("/sync", post(sync_all))
        .route("/records/{kind}", get(read_records))
        .with_state(app_state)
        .layer(middleware::from_fn(require_api_key))
}

// GET /system/health (état agrégateur)
async fn get_system_health(State(app): State<AppState>) -> Json<AggregatorHealth> {
    Json(app.health_tracker.get_health(&app.registry).await)
}

// GET /connections (liste)
async fn list_connections(State(app): State<AppState>) -> Json<Vec<ConnectionView>> {
    let list: Vec<ConnectionView> = app.registry.list().await.iter().map(to_view).collect();
    Json(list)
}

// GET /connections/:id (détail)
async fn get_connection(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ConnectionView>, StatusCode> {
    match app.registry.get(&id).await {
        Some(c) => Ok(Json(to_view(&c))),
        None => Err(StatusCode::NOT_FOUND),
    }
}

// POST /connections (ajout)
async fn add_connection(
    State(app): State<AppState>,
    Json(draft): Json<ConnectionDraft>,
) -> (StatusCode, Json<serde_json::Value>) {
    match app.registry.add(draft).await {
        Ok(conn) => (StatusCode::CREATED, Json(serde_json::json!(conn))),
        Err(RegistryError::MissingField(field)) => (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": format!("missing required field: {field}") })),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
    }
}

// DELETE /connections/:id (retrait, sans cascade sur les records)
async fn remove_connection(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    match app.registry.remove(&id).await {
        Ok(true) => (StatusCode::OK, Json(serde_json::json!({"removed": id}))),
        Ok(false) => (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({"error": "unknown connection"})),
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": e.to_string() })),
        ),
    }
}

// POST /connections/:id/sync (sync d'une connexion)
async fn sync_connection(
    State(app): State<AppState>,
    Path(id): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    match app.orchestrator.sync_connection(&id).await {
        Ok(data) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "connection_id": id,
                "status": "connected",
                "records": data.total_records(),
                "reservations": data.reservations.len(),
                "guests": data.guests.len(),
                "rooms": data.rooms.len(),
                "revenue": data.revenue.len(),
                "occupancy": data.occupancy.len(),
            })),
        ),
        Err(e) => (
            StatusCode::BAD_GATEWAY,
            Json(serde_json::json!({ "ok": false, "error": format!("{e:#}") })),
        ),
    }
}

// POST /sync (sync de tout le registre + agrégat)
async fn sync_all(State(app): State<AppState>) -> Json<SyncReport> {
    Json(app.orchestrator.sync_all().await)
}

// GET /records/:kind (relecture des records persistés)
async fn read_records(
    State(app): State<AppState>,
    Path(kind): Path<String>,
) -> Result<Json<Vec<StoredRecord>>, StatusCode> {
    let kind = ResourceKind::parse(&kind).ok_or(StatusCode::NOT_FOUND)?;
    match app.ports.read_all(kind) {
        Ok(records) => Ok(Json(records)),
        Err(e) => {
            eprintln!("[http] failed to read {} records: {e}", kind.as_str());
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
