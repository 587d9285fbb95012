//! Stub PMS HTTP : un faux vendeur complet pour développer et tester les
//! syncs sans API réelle.
//!
//! Expose /health et répond à n'importe quel chemin de ressource en
//! reconnaissant le suffixe (reservations, guests/customers/profiles,
//! rooms/spaces, revenue/accounting, occupancy), ce qui couvre les tables
//! de routes de tous les vendeurs connus. Le health-check peut être mis
//! en échec pour tester les chemins d'erreur.

use crate::fixtures;
use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use tokio::net::TcpListener;

struct StubState {
    healthy: AtomicBool,
    requests: AtomicU32,
}

pub struct StubPms {
    state: Arc<StubState>,
}

impl Default for StubPms {
    fn default() -> Self {
        Self::new()
    }
}

impl StubPms {
    pub fn new() -> Self {
        env_logger::try_init().ok(); // Init logging pour tests
        Self {
            state: Arc::new(StubState {
                healthy: AtomicBool::new(true),
                requests: AtomicU32::new(0),
            }),
        }
    }

    /// Fait répondre /health en 503 pour tester les chemins d'erreur.
    pub fn with_failing_health(self) -> Self {
        self.state.healthy.store(false, Ordering::Relaxed);
        self
    }

    /// Nombre de requêtes reçues depuis le démarrage.
    pub fn request_count(&self) -> u32 {
        self.state.requests.load(Ordering::Relaxed)
    }

    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(health))
            .fallback(serve_resource)
            .with_state(self.state.clone())
    }

    /// Démarre le stub sur un port éphémère et retourne son adresse.
    pub async fn spawn(&self) -> anyhow::Result<SocketAddr> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = self.router();

        tokio::spawn(async move {
            if let Err(e) = axum::serve(listener, app).await {
                log::error!("stub PMS server stopped: {e}");
            }
        });

        log::info!("stub PMS listening on http://{addr}");
        Ok(addr)
    }
}

async fn health(State(state): State<Arc<StubState>>) -> Result<&'static str, StatusCode> {
    state.requests.fetch_add(1, Ordering::Relaxed);
    if state.healthy.load(Ordering::Relaxed) {
        Ok("ok")
    } else {
        Err(StatusCode::SERVICE_UNAVAILABLE)
    }
}

/// Toutes les routes de ressources des vendeurs connus atterrissent ici.
async fn serve_resource(State(state): State<Arc<StubState>>, req: Request) -> Json<Value> {
    state.requests.fetch_add(1, Ordering::Relaxed);
    let path = req.uri().path().to_lowercase();
    log::info!("stub PMS serving {path}");

    let payload = if path.contains("reservation") {
        fixtures::generic_reservations()
    } else if path.contains("guest") || path.contains("customer") || path.contains("profile") {
        fixtures::generic_guests()
    } else if path.contains("room") || path.contains("space") {
        fixtures::generic_rooms()
    } else if path.contains("revenue") || path.contains("accounting") {
        fixtures::generic_revenue()
    } else if path.contains("occupancy") {
        fixtures::generic_occupancy()
    } else {
        json!([])
    };

    Json(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_serves_health_and_fixtures() {
        let stub = StubPms::new();
        let addr = stub.spawn().await.unwrap();
        let base = format!("http://{addr}");

        let health = reqwest::get(format!("{base}/health")).await.unwrap();
        assert!(health.status().is_success());

        // route Cloudbeds et route générique : même fixture
        let body: Value = reqwest::get(format!("{base}/api/v1.1/getReservations"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body.as_array().unwrap().len(), 2);

        let body: Value = reqwest::get(format!("{base}/fidelio/v1/occupancy"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert!(body.is_array());

        assert!(stub.request_count() >= 3);
    }

    #[tokio::test]
    async fn test_stub_failing_health() {
        let stub = StubPms::new().with_failing_health();
        let addr = stub.spawn().await.unwrap();

        let health = reqwest::get(format!("http://{addr}/health")).await.unwrap();
        assert_eq!(health.status(), reqwest::StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_unknown_resource_is_empty_array() {
        let stub = StubPms::new();
        let addr = stub.spawn().await.unwrap();

        let body: Value = reqwest::get(format!("http://{addr}/api/folios"))
            .await
            .unwrap()
            .json()
            .await
            .unwrap();
        assert_eq!(body, json!([]));
    }
}
