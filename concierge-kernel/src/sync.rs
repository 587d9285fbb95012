/**
 * SYNC ORCHESTRATOR - Cycle de synchronisation des connexions PMS
 *
 * RÔLE :
 * Pilote le cycle complet par connexion : syncing -> health-check ->
 * cinq fetches concurrents -> normalisation -> persistance -> connected,
 * ou error au premier échec (pas de succès partiel par connexion).
 *
 * FONCTIONNEMENT :
 * - sync_connection : machine d'états d'UNE connexion, statut mis à jour
 *   en place dans le registre
 * - sync_all : itère séquentiellement sur le registre; l'échec d'une
 *   connexion est toléré (warning) et n'empêche pas les autres
 * - agrégat multi-connexions par concaténation, ids préfixés par connexion
 * - fallback démo quand aucune connexion n'a produit de données
 * - scheduler : tâche de fond déclenchant les syncs selon la fréquence
 *   configurée par connexion (real_time / hourly / daily, jamais manual)
 */

use crate::client::PmsGateway;
use crate::config::SyncConf;
use crate::demo;
use crate::health::HealthTracker;
use crate::models::{composite_id, ConnectionStatus, PmsConnection, PmsData, SyncFrequency};
use crate::ports::{RecordPort, StoredRecord};
use crate::registry::SharedConnectionRegistry;
use crate::vendors::{adapter_for, ResourceKind};
use anyhow::{bail, Context, Result};
use serde::Serialize;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tracing::{info, warn};

/// Résultat d'une passe de sync sur tout le registre.
#[derive(Debug, Default, Serialize)]
pub struct SyncReport {
    pub data: PmsData,
    pub synced: Vec<String>,
    pub failed: Vec<String>,
    pub warnings: Vec<String>,
    pub demo_data: bool,
}

pub struct SyncOrchestrator {
    gateway: Arc<dyn PmsGateway>,
    registry: SharedConnectionRegistry,
    ports: Arc<dyn RecordPort>,
    user_id: String,
    health: HealthTracker,
    cfg: SyncConf,
}

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

impl SyncOrchestrator {
    pub fn new(
        gateway: Arc<dyn PmsGateway>,
        registry: SharedConnectionRegistry,
        ports: Arc<dyn RecordPort>,
        user_id: String,
        health: HealthTracker,
        cfg: SyncConf,
    ) -> Self {
        Self {
            gateway,
            registry,
            ports,
            user_id,
            health,
            cfg,
        }
    }

    /// Synchronise UNE connexion. Le statut passe par syncing puis
    /// connected ou error; last_sync est horodaté dans les deux cas.
    pub async fn sync_connection(&self, id: &str) -> Result<PmsData> {
        let Some(conn) = self.registry.get(id).await else {
            bail!("unknown connection: {id}");
        };

        self.registry
            .update_status(id, ConnectionStatus::Syncing, false)
            .await;

        let outcome = match self.run_sync(&conn).await {
            Ok(data) => match self.persist(&conn, &data) {
                Ok(stored) => {
                    info!(connection = %conn.id, records = stored, "sync completed");
                    Ok(data)
                }
                Err(e) => Err(e).context("failed to persist synced records"),
            },
            Err(e) => Err(e),
        };

        match outcome {
            Ok(data) => {
                self.registry
                    .update_status(id, ConnectionStatus::Connected, true)
                    .await;
                self.health.record_sync_success(now_rfc3339());
                Ok(data)
            }
            Err(e) => {
                self.registry
                    .update_status(id, ConnectionStatus::Error, true)
                    .await;
                self.health.record_sync_failure(now_rfc3339());
                warn!(connection = %conn.id, error = %format!("{e:#}"), "sync failed");
                Err(e)
            }
        }
    }

    /// Health-check puis les cinq ressources en concurrence. Le premier
    /// échec fait tout échouer pour cette connexion.
    async fn run_sync(&self, conn: &PmsConnection) -> Result<PmsData> {
        self.gateway
            .health_check(conn)
            .await
            .with_context(|| format!("failed to sync data from {}", conn.name))?;

        let (reservations, guests, rooms, revenue, occupancy) = tokio::try_join!(
            self.gateway.fetch_resource(conn, ResourceKind::Reservations),
            self.gateway.fetch_resource(conn, ResourceKind::Guests),
            self.gateway.fetch_resource(conn, ResourceKind::Rooms),
            self.gateway.fetch_resource(conn, ResourceKind::Revenue),
            self.gateway.fetch_resource(conn, ResourceKind::Occupancy),
        )
        .with_context(|| format!("failed to sync data from {}", conn.name))?;

        let adapter = adapter_for(conn.vendor);
        let data = PmsData {
            reservations: adapter.normalize_reservations(&reservations),
            guests: adapter.normalize_guests(&guests),
            rooms: adapter.normalize_rooms(&rooms),
            revenue: adapter.normalize_revenue(&revenue),
            occupancy: adapter.normalize_occupancy(&occupancy),
        };

        let missing_ids = data.reservations.iter().filter(|r| r.id.is_empty()).count()
            + data.guests.iter().filter(|g| g.id.is_empty()).count()
            + data.rooms.iter().filter(|r| r.id.is_empty()).count();
        if missing_ids > 0 {
            warn!(connection = %conn.id, count = missing_ids, "records kept without any known id field");
        }

        Ok(data)
    }

    /// Persistance par batch : un write par type de ressource, records
    /// tagués connexion + utilisateur + horodatage de sync.
    fn persist(&self, conn: &PmsConnection, data: &PmsData) -> Result<usize> {
        let synced_at = now_rfc3339();

        let stored = |key: &str, value: serde_json::Value| StoredRecord {
            id: composite_id(&conn.id, key),
            connection_id: conn.id.clone(),
            user_id: self.user_id.clone(),
            synced_at: synced_at.clone(),
            data: value,
        };

        let mut total = 0;
        for kind in ResourceKind::ALL {
            let batch: Vec<StoredRecord> = match kind {
                ResourceKind::Reservations => data
                    .reservations
                    .iter()
                    .map(|r| Ok(stored(&r.id, serde_json::to_value(r)?)))
                    .collect::<Result<_>>()?,
                ResourceKind::Guests => data
                    .guests
                    .iter()
                    .map(|g| Ok(stored(&g.id, serde_json::to_value(g)?)))
                    .collect::<Result<_>>()?,
                ResourceKind::Rooms => data
                    .rooms
                    .iter()
                    .map(|r| Ok(stored(&r.id, serde_json::to_value(r)?)))
                    .collect::<Result<_>>()?,
                // revenus et occupation sont indexés par date
                ResourceKind::Revenue => data
                    .revenue
                    .iter()
                    .map(|r| Ok(stored(&r.date, serde_json::to_value(r)?)))
                    .collect::<Result<_>>()?,
                ResourceKind::Occupancy => data
                    .occupancy
                    .iter()
                    .map(|o| Ok(stored(&o.date, serde_json::to_value(o)?)))
                    .collect::<Result<_>>()?,
            };
            total += self.ports.write_batch(kind, &batch)?;
        }

        Ok(total)
    }

    /// Passe de sync sur tout le registre, séquentielle. Une connexion en
    /// échec est sautée avec un warning, les autres continuent.
    pub async fn sync_all(&self) -> SyncReport {
        let mut report = SyncReport::default();

        for conn in self.registry.list().await {
            match self.sync_connection(&conn.id).await {
                Ok(data) => {
                    report.data.merge(data.namespaced(&conn.id));
                    report.synced.push(conn.id);
                }
                Err(e) => {
                    report.warnings.push(format!("{}: {e:#}", conn.name));
                    report.failed.push(conn.id);
                }
            }
        }

        if report.synced.is_empty() && self.cfg.demo_fallback {
            info!("no connection produced data, serving demo dataset");
            report.data = demo::demo_dataset();
            report.demo_data = true;
        }

        report
    }
}

/// Âge en secondes d'un horodatage RFC3339. Illisible -> très vieux,
/// la connexion redevient éligible à la sync.
fn last_sync_age_seconds(last_sync: &str) -> i64 {
    match OffsetDateTime::parse(last_sync, &Rfc3339) {
        Ok(t) => (OffsetDateTime::now_utc() - t).whole_seconds(),
        Err(_) => i64::MAX,
    }
}

fn is_due(conn: &PmsConnection) -> bool {
    match conn.sync_frequency {
        SyncFrequency::Manual => false,
        SyncFrequency::RealTime => true,
        SyncFrequency::Hourly => last_sync_age_seconds(&conn.last_sync) >= 3600,
        SyncFrequency::Daily => last_sync_age_seconds(&conn.last_sync) >= 86_400,
    }
}

/// Déclenche périodiquement les syncs dues selon la fréquence configurée.
pub fn spawn_sync_scheduler(orchestrator: Arc<SyncOrchestrator>, interval_seconds: u64) {
    println!("[sync] starting sync scheduler (tick: {interval_seconds}s)");

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(std::time::Duration::from_secs(interval_seconds));

        loop {
            interval.tick().await;

            for conn in orchestrator.registry.list().await {
                if !is_due(&conn) {
                    continue;
                }
                if let Err(e) = orchestrator.sync_connection(&conn.id).await {
                    warn!(connection = %conn.id, error = %format!("{e:#}"), "scheduled sync failed");
                }
            }
        }
    });
}
