/**
 * RECORD PORTS - Persistance unifiée des données normalisées
 *
 * RÔLE :
 * Ce module définit l'interface de stockage des cinq types de records
 * produits par les syncs (réservations, clients, chambres, revenus,
 * occupation) de manière cohérente.
 *
 * FONCTIONNEMENT :
 * - RecordPort trait = interface commune (write_batch/read_all)
 * - StoredRecord = format standardisé : clé composite
 *   {connection_id}_{id d'origine} (ou _{date} pour revenus/occupation),
 *   tagué connection_id + user_id + synced_at
 * - JsonFilePort = implémentation fichier JSON, un fichier par type
 * - Chaque sync est un append : pas de contrat update/delete, la
 *   déduplication inter-syncs est l'affaire du consommateur
 *
 * UTILITÉ POUR CONCIERGE :
 * ✅ Écritures par batch : un write par type de ressource et par sync
 * ✅ Clés composites : pas de collision d'ids entre vendeurs
 * ✅ API /records/{kind} : relecture directe par le dashboard
 */

use crate::vendors::ResourceKind;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Erreurs possibles lors des opérations sur les record ports
#[derive(Debug, thiserror::Error)]
pub enum PortError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Format standardisé des records persistés
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    /// Clé composite {connection_id}_{id ou date d'origine}
    pub id: String,
    /// Connexion d'où provient le record
    pub connection_id: String,
    /// Propriétaire des données
    pub user_id: String,
    /// Horodatage de la sync qui a produit ce record
    pub synced_at: String,
    /// Contenu normalisé au format JSON
    pub data: serde_json::Value,
}

/// Interface commune des stores de records. Implémentée ici en fichier
/// JSON; la même interface couvre un vrai backend base de données.
pub trait RecordPort: Send + Sync {
    /// Écrit un batch entier pour un type de ressource.
    /// Retourne le nombre de records ajoutés.
    fn write_batch(&self, kind: ResourceKind, batch: &[StoredRecord]) -> Result<usize, PortError>;

    /// Relit tous les records persistés d'un type.
    fn read_all(&self, kind: ResourceKind) -> Result<Vec<StoredRecord>, PortError>;
}

/// Store fichier : {data_dir}/{kind}.json, liste JSON append-only
pub struct JsonFilePort {
    data_dir: PathBuf,
    io_lock: Mutex<()>,
}

impl JsonFilePort {
    pub fn new(data_dir: &str) -> Self {
        Self {
            data_dir: PathBuf::from(data_dir),
            io_lock: Mutex::new(()),
        }
    }

    fn kind_file(&self, kind: ResourceKind) -> PathBuf {
        self.data_dir.join(format!("{}.json", kind.as_str()))
    }

    fn read_file(&self, kind: ResourceKind) -> Result<Vec<StoredRecord>, PortError> {
        let path = self.kind_file(kind);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = std::fs::read_to_string(&path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&content)?)
    }
}

impl RecordPort for JsonFilePort {
    fn write_batch(&self, kind: ResourceKind, batch: &[StoredRecord]) -> Result<usize, PortError> {
        if batch.is_empty() {
            return Ok(0);
        }

        let _guard = self.io_lock.lock();
        let mut records = self.read_file(kind)?;
        records.extend_from_slice(batch);

        let content = serde_json::to_string_pretty(&records)?;
        std::fs::write(self.kind_file(kind), content)?;

        eprintln!("[ports] appended {} {} records", batch.len(), kind.as_str());
        Ok(batch.len())
    }

    fn read_all(&self, kind: ResourceKind) -> Result<Vec<StoredRecord>, PortError> {
        let _guard = self.io_lock.lock();
        self.read_file(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(id: &str, connection_id: &str) -> StoredRecord {
        StoredRecord {
            id: id.to_string(),
            connection_id: connection_id.to_string(),
            user_id: "u1".to_string(),
            synced_at: "2024-01-16T12:00:00Z".to_string(),
            data: json!({"room_number": "101"}),
        }
    }

    #[test]
    fn test_write_batch_then_read_all() {
        let dir = tempfile::tempdir().unwrap();
        let port = JsonFilePort::new(dir.path().to_str().unwrap());

        let batch = vec![record("conn_a_res_1", "conn_a"), record("conn_a_res_2", "conn_a")];
        let written = port.write_batch(ResourceKind::Reservations, &batch).unwrap();
        assert_eq!(written, 2);

        let stored = port.read_all(ResourceKind::Reservations).unwrap();
        assert_eq!(stored, batch);
    }

    #[test]
    fn test_batches_append_across_syncs() {
        let dir = tempfile::tempdir().unwrap();
        let port = JsonFilePort::new(dir.path().to_str().unwrap());

        port.write_batch(ResourceKind::Revenue, &[record("conn_a_2024-01-15", "conn_a")])
            .unwrap();
        port.write_batch(ResourceKind::Revenue, &[record("conn_b_2024-01-15", "conn_b")])
            .unwrap();

        let stored = port.read_all(ResourceKind::Revenue).unwrap();
        assert_eq!(stored.len(), 2);
        assert_eq!(stored[1].connection_id, "conn_b");
    }

    #[test]
    fn test_empty_batch_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let port = JsonFilePort::new(dir.path().to_str().unwrap());

        assert_eq!(port.write_batch(ResourceKind::Rooms, &[]).unwrap(), 0);
        assert!(!dir.path().join("rooms.json").exists());
    }

    #[test]
    fn test_read_all_on_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let port = JsonFilePort::new(dir.path().to_str().unwrap());
        assert!(port.read_all(ResourceKind::Occupancy).unwrap().is_empty());
    }
}
