use crate::models::{ConnectionStatus, SyncFrequency};
use crate::registry::ConnectionRegistry;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// État de l'agrégateur tel qu'exposé par GET /system/health.
/// Reprend les compteurs de la vue d'ensemble du dashboard : connexions
/// actives, sources totales, sync auto, erreurs.
#[derive(Debug, Serialize, Deserialize)]
pub struct AggregatorHealth {
    pub uptime_seconds: u64,
    pub connections_total: u32,
    pub connections_connected: u32,
    pub connections_error: u32,
    pub auto_sync_enabled: u32,
    pub syncs_completed: u32,
    pub syncs_failed: u32,
    pub memory_usage_mb: f32,
    pub last_sync: Option<String>,
}

#[derive(Clone)]
pub struct HealthTracker {
    start_time: Instant,
    syncs_completed: Arc<AtomicU32>,
    syncs_failed: Arc<AtomicU32>,
    last_sync: Arc<parking_lot::Mutex<Option<String>>>,
}

impl HealthTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            syncs_completed: Arc::new(AtomicU32::new(0)),
            syncs_failed: Arc::new(AtomicU32::new(0)),
            last_sync: Arc::new(parking_lot::Mutex::new(None)),
        }
    }

    pub fn record_sync_success(&self, at: String) {
        self.syncs_completed.fetch_add(1, Ordering::Relaxed);
        *self.last_sync.lock() = Some(at);
    }

    pub fn record_sync_failure(&self, at: String) {
        self.syncs_failed.fetch_add(1, Ordering::Relaxed);
        *self.last_sync.lock() = Some(at);
    }

    pub async fn get_health(&self, registry: &ConnectionRegistry) -> AggregatorHealth {
        let connections = registry.list().await;

        AggregatorHealth {
            uptime_seconds: self.start_time.elapsed().as_secs(),
            connections_total: connections.len() as u32,
            connections_connected: connections
                .iter()
                .filter(|c| c.status == ConnectionStatus::Connected)
                .count() as u32,
            connections_error: connections
                .iter()
                .filter(|c| c.status == ConnectionStatus::Error)
                .count() as u32,
            auto_sync_enabled: connections
                .iter()
                .filter(|c| c.sync_frequency != SyncFrequency::Manual)
                .count() as u32,
            syncs_completed: self.syncs_completed.load(Ordering::Relaxed),
            syncs_failed: self.syncs_failed.load(Ordering::Relaxed),
            memory_usage_mb: get_memory_usage_mb(),
            last_sync: self.last_sync.lock().clone(),
        }
    }
}

fn get_memory_usage_mb() -> f32 {
    let pid = std::process::id();

    #[cfg(target_os = "linux")]
    {
        if let Ok(status) = std::fs::read_to_string(format!("/proc/{}/status", pid)) {
            for line in status.lines() {
                if line.starts_with("VmRSS:") {
                    if let Some(kb_str) = line.split_whitespace().nth(1) {
                        if let Ok(kb) = kb_str.parse::<u64>() {
                            return (kb as f32) / 1024.0; // KB -> MB
                        }
                    }
                }
            }
        }
    }

    #[cfg(not(target_os = "linux"))]
    let _ = pid;

    // Fallback approximatif
    12.0
}
