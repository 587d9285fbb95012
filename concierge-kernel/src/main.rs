/**
 * CONCIERGE KERNEL - Point d'entrée principal du serveur Concierge
 *
 * RÔLE : Orchestration de tous les modules : config, registre de
 * connexions, client PMS, orchestrateur de sync, record ports, HTTP.
 * Bootstrap du système complet avec gestion d'erreurs et logging.
 *
 * ARCHITECTURE : Agrégation multi-PMS : chaque connexion configurée est
 * synchronisée (health-check + cinq ressources), normalisée en schéma
 * canonique et persistée. API REST pour le dashboard analytics.
 */

mod auth;
mod client;
mod config;
mod demo;
mod health;
mod http;
mod models;
mod ports;
mod registry;
mod sync;
mod vendors;

use crate::auth::PassthroughResolver;
use crate::client::PmsClient;
use crate::config::load_config;
use crate::health::HealthTracker;
use crate::http::AppState;
use crate::ports::JsonFilePort;
use crate::registry::{ConnectionRegistry, SharedConnectionRegistry};
use crate::sync::SyncOrchestrator;

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    // Charger les variables d'environnement depuis .env (si présent)
    dotenvy::dotenv().ok(); // Ok si .env n'existe pas

    // Logging du client PMS et de l'orchestrateur
    tracing_subscriber::fmt().init();

    let cfg = load_config().await;
    let sync_cfg = cfg.sync();

    std::fs::create_dir_all(&cfg.data_dir).unwrap_or_else(|e| {
        eprintln!("[kernel] warning: failed to create data dir: {}", e);
    });

    // registre des connexions PMS avec persistance par utilisateur
    let registry: SharedConnectionRegistry =
        Arc::new(ConnectionRegistry::new(&cfg.data_dir, &cfg.user_id));
    if let Err(e) = registry.load().await {
        eprintln!("[kernel] failed to load connections: {}", e);
    }

    // record ports (un fichier JSON par type de ressource)
    let ports = Arc::new(JsonFilePort::new(&cfg.data_dir));

    // health tracker
    let health_tracker = HealthTracker::new();

    // client HTTP sortant; les secrets restent des jetons opaques résolus
    // par la couche d'injection externe
    let pms_client = match PmsClient::new(&sync_cfg, Arc::new(PassthroughResolver)) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("[kernel] failed to create PMS client: {}", e);
            std::process::exit(1);
        }
    };

    let orchestrator = Arc::new(SyncOrchestrator::new(
        Arc::new(pms_client),
        registry.clone(),
        ports.clone(),
        cfg.user_id.clone(),
        health_tracker.clone(),
        sync_cfg.clone(),
    ));

    // démarre les syncs automatiques selon la fréquence par connexion
    sync::spawn_sync_scheduler(orchestrator.clone(), sync_cfg.scheduler_interval_seconds);

    // fabrique l'état unique pour Axum
    let app_state = AppState {
        registry,
        orchestrator,
        ports,
        health_tracker,
    };

    // HTTP
    let app = http::build_router(app_state);

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.http_port()));
    println!("[kernel] listening on http://{addr}");
    let listener = TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
