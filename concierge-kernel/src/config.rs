use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ConciergeConfig {
    /// Propriétaire des données (cloisonnement des fichiers de stockage)
    pub user_id: String,
    /// Répertoire des fichiers de persistance (connexions + records)
    pub data_dir: String,
    pub http: Option<HttpConf>,
    pub sync: Option<SyncConf>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HttpConf {
    pub port: u16,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SyncConf {
    /// Borne unique pour le health-check et les fetches de ressources
    pub request_timeout_seconds: u64,
    /// Fenêtre de dates des requêtes réservations/revenus/occupation
    pub window_days: i64,
    /// Pagination de la ressource clients
    pub guest_page_limit: u32,
    /// Tick du scheduler de sync automatique
    pub scheduler_interval_seconds: u64,
    /// Substituer le jeu de données de démonstration quand aucune
    /// connexion n'a produit de données
    pub demo_fallback: bool,
}

impl Default for SyncConf {
    fn default() -> Self {
        Self {
            request_timeout_seconds: 10,
            window_days: 30,
            guest_page_limit: 1000,
            scheduler_interval_seconds: 60,
            demo_fallback: true,
        }
    }
}

impl Default for ConciergeConfig {
    fn default() -> Self {
        Self {
            user_id: "local".into(),
            data_dir: "./data".into(),
            http: Some(HttpConf { port: 8080 }),
            sync: Some(SyncConf::default()),
        }
    }
}

impl ConciergeConfig {
    pub fn http_port(&self) -> u16 {
        self.http.as_ref().map(|h| h.port).unwrap_or(8080)
    }

    pub fn sync(&self) -> SyncConf {
        self.sync.clone().unwrap_or_default()
    }
}

pub async fn load_config() -> ConciergeConfig {
    let path = std::env::var("CONCIERGE_KERNEL_CONFIG").unwrap_or_else(|_| "concierge.yaml".into());
    if Path::new(&path).exists() {
        let txt = fs::read_to_string(&path).await.unwrap_or_default();
        if txt.trim().is_empty() { return ConciergeConfig::default(); }
        serde_yaml::from_str(&txt).unwrap_or_else(|e| {
            eprintln!("[kernel] config invalide: {e}");
            ConciergeConfig::default()
        })
    } else {
        eprintln!("[kernel] pas de concierge.yaml, usage config par défaut");
        ConciergeConfig::default()
    }
}
