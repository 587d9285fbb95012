/**
 * CONNECTION REGISTRY - Registre des connexions PMS configurées
 *
 * RÔLE : Source de vérité unique des connexions (ajout, retrait, statut).
 * Toute mutation passe par ici, pas d'état partagé caché côté UI.
 *
 * ARCHITECTURE : Liste en mémoire sous RwLock + persistance JSON par
 * utilisateur (pms_connections_{user_id}.json), rechargée au démarrage et
 * sauvegardée après chaque mutation.
 * UTILITÉ : Le cycle de sync met à jour chaque connexion en place par id,
 * jamais par remplacement de liste entière (pas de pertes croisées).
 */

use crate::models::{AuthKind, ConnectionStatus, PmsConnection, SyncFrequency, VendorKind};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::sync::RwLock;
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("missing required field: {0}")]
    MissingField(&'static str),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Demande d'ajout d'une connexion (les champs optionnels prennent les
/// mêmes défauts que le formulaire d'origine : custom / api_key / hourly).
#[derive(Debug, Clone, Deserialize)]
pub struct ConnectionDraft {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub vendor: VendorKind,
    #[serde(default)]
    pub api_endpoint: String,
    #[serde(default)]
    pub auth_type: AuthKind,
    #[serde(default)]
    pub sync_frequency: SyncFrequency,
}

pub struct ConnectionRegistry {
    connections: RwLock<Vec<PmsConnection>>,
    data_file: PathBuf,
}

pub type SharedConnectionRegistry = Arc<ConnectionRegistry>;

fn now_rfc3339() -> String {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_default()
}

impl ConnectionRegistry {
    pub fn new(data_dir: &str, user_id: &str) -> Self {
        Self {
            connections: RwLock::new(Vec::new()),
            data_file: PathBuf::from(data_dir).join(format!("pms_connections_{user_id}.json")),
        }
    }

    /// Charge la liste depuis le fichier JSON de persistance
    pub async fn load(&self) -> Result<(), RegistryError> {
        if !self.data_file.exists() {
            println!("[registry] no existing connections file, starting fresh");
            return Ok(());
        }

        let content = tokio::fs::read_to_string(&self.data_file).await?;
        let loaded: Vec<PmsConnection> = serde_json::from_str(&content)?;

        let mut connections = self.connections.write().await;
        let count = loaded.len();
        *connections = loaded;

        println!(
            "[registry] loaded {} connections from {}",
            count,
            self.data_file.display()
        );
        Ok(())
    }

    /// Sauvegarde la liste dans le fichier JSON
    pub async fn save(&self) -> Result<(), RegistryError> {
        let connections = self.connections.read().await;
        let content = serde_json::to_string_pretty(&*connections)?;
        tokio::fs::write(&self.data_file, content).await?;
        Ok(())
    }

    /// Ajoute une connexion. Nom et endpoint sont obligatoires; l'id est
    /// généré et le statut initial est toujours disconnected.
    pub async fn add(&self, draft: ConnectionDraft) -> Result<PmsConnection, RegistryError> {
        if draft.name.trim().is_empty() {
            return Err(RegistryError::MissingField("name"));
        }
        if draft.api_endpoint.trim().is_empty() {
            return Err(RegistryError::MissingField("api_endpoint"));
        }

        let connection = PmsConnection {
            id: format!("conn_{}", Uuid::new_v4()),
            name: draft.name,
            vendor: draft.vendor,
            status: ConnectionStatus::Disconnected,
            last_sync: now_rfc3339(),
            api_endpoint: draft.api_endpoint,
            auth_type: draft.auth_type,
            sync_frequency: draft.sync_frequency,
        };

        {
            let mut connections = self.connections.write().await;
            connections.push(connection.clone());
        }

        self.save().await?;
        println!("[registry] added connection {} ({})", connection.id, connection.name);
        Ok(connection)
    }

    /// Retire une connexion par id. No-op (false) si l'id est inconnu.
    /// Les records déjà persistés ne sont pas supprimés en cascade.
    pub async fn remove(&self, id: &str) -> Result<bool, RegistryError> {
        let removed = {
            let mut connections = self.connections.write().await;
            let before = connections.len();
            connections.retain(|c| c.id != id);
            connections.len() < before
        };

        if removed {
            self.save().await?;
            println!("[registry] removed connection {id}");
        }
        Ok(removed)
    }

    /// Mise à jour du statut d'UNE connexion, en place, par id.
    pub async fn update_status(&self, id: &str, status: ConnectionStatus, touch_sync: bool) {
        {
            let mut connections = self.connections.write().await;
            if let Some(conn) = connections.iter_mut().find(|c| c.id == id) {
                conn.status = status;
                if touch_sync {
                    conn.last_sync = now_rfc3339();
                }
                println!("[registry] connection {} -> {}", id, status.as_str());
            } else {
                println!("[registry] status update for unknown connection {id}");
                return;
            }
        }

        if let Err(e) = self.save().await {
            eprintln!("[registry] failed to save after status update: {e}");
        }
    }

    pub async fn list(&self) -> Vec<PmsConnection> {
        self.connections.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<PmsConnection> {
        self.connections
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, endpoint: &str) -> ConnectionDraft {
        ConnectionDraft {
            name: name.to_string(),
            vendor: VendorKind::Opera,
            api_endpoint: endpoint.to_string(),
            auth_type: AuthKind::ApiKey,
            sync_frequency: SyncFrequency::Hourly,
        }
    }

    #[tokio::test]
    async fn test_add_assigns_id_and_disconnected_status() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ConnectionRegistry::new(dir.path().to_str().unwrap(), "u1");

        let conn = registry.add(draft("Main Hotel", "https://pms.example.com")).await.unwrap();
        assert!(conn.id.starts_with("conn_"));
        assert_eq!(conn.status, ConnectionStatus::Disconnected);
        assert_eq!(registry.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_add_without_endpoint_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ConnectionRegistry::new(dir.path().to_str().unwrap(), "u1");

        let err = registry.add(draft("Main Hotel", "")).await.unwrap_err();
        assert!(matches!(err, RegistryError::MissingField("api_endpoint")));
        assert_eq!(registry.list().await.len(), 0);

        let err = registry.add(draft("", "https://pms.example.com")).await.unwrap_err();
        assert!(matches!(err, RegistryError::MissingField("name")));
        assert_eq!(registry.list().await.len(), 0);
    }

    #[tokio::test]
    async fn test_remove_unknown_id_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ConnectionRegistry::new(dir.path().to_str().unwrap(), "u1");
        registry.add(draft("Main Hotel", "https://pms.example.com")).await.unwrap();

        assert!(!registry.remove("conn_inconnue").await.unwrap());
        assert_eq!(registry.list().await.len(), 1);
    }

    #[tokio::test]
    async fn test_round_trip_through_storage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().to_str().unwrap();

        let registry = ConnectionRegistry::new(path, "u1");
        registry.add(draft("Main Hotel", "https://pms.example.com")).await.unwrap();
        registry.add(draft("Resort", "https://resort.example.com")).await.unwrap();
        let saved = registry.list().await;

        let reloaded = ConnectionRegistry::new(path, "u1");
        reloaded.load().await.unwrap();
        assert_eq!(reloaded.list().await, saved);
    }

    #[tokio::test]
    async fn test_update_status_touches_single_connection() {
        let dir = tempfile::tempdir().unwrap();
        let registry = ConnectionRegistry::new(dir.path().to_str().unwrap(), "u1");
        let a = registry.add(draft("A", "https://a.example.com")).await.unwrap();
        let b = registry.add(draft("B", "https://b.example.com")).await.unwrap();

        registry.update_status(&a.id, ConnectionStatus::Error, true).await;

        assert_eq!(registry.get(&a.id).await.unwrap().status, ConnectionStatus::Error);
        assert_eq!(registry.get(&b.id).await.unwrap().status, ConnectionStatus::Disconnected);
    }
}
