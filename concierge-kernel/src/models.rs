use serde::{Deserialize, Serialize};

/// Types de PMS supportés par les connecteurs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorKind {
    Opera,
    Fidelio,
    Protel,
    Mews,
    Cloudbeds,
    Rms,
    Custom,
}

impl Default for VendorKind {
    fn default() -> Self {
        VendorKind::Custom
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Connected,
    Disconnected,
    Error,
    Syncing,
}

impl ConnectionStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            ConnectionStatus::Connected => "connected",
            ConnectionStatus::Disconnected => "disconnected",
            ConnectionStatus::Error => "error",
            ConnectionStatus::Syncing => "syncing",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthKind {
    ApiKey,
    Oauth,
    BasicAuth,
}

impl Default for AuthKind {
    fn default() -> Self {
        AuthKind::ApiKey
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncFrequency {
    RealTime,
    Hourly,
    Daily,
    Manual,
}

impl Default for SyncFrequency {
    fn default() -> Self {
        SyncFrequency::Hourly
    }
}

/// Connexion configurée vers un PMS. Le statut ne change que via le cycle
/// de sync (disconnected -> syncing -> connected | error).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PmsConnection {
    pub id: String,
    pub name: String,
    pub vendor: VendorKind,
    pub status: ConnectionStatus,
    pub last_sync: String, // format RFC3339
    pub api_endpoint: String,
    pub auth_type: AuthKind,
    pub sync_frequency: SyncFrequency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Confirmed,
    CheckedIn,
    CheckedOut,
    Cancelled,
    NoShow,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    Occupied,
    Maintenance,
    OutOfOrder,
}

/// Réservation normalisée. `guest_id` est un lien faible vers la collection
/// clients, jamais une relation de possession.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: String,
    pub guest_id: String,
    pub room_number: String,
    pub check_in: String,
    pub check_out: String,
    pub status: ReservationStatus,
    pub total_amount: f64,
    pub currency: String,
    pub source: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Guest {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub nationality: String,
    pub vip_status: bool,
    pub total_stays: u32,
    pub total_spent: f64,
    pub last_stay: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub number: String,
    #[serde(rename = "type")]
    pub room_type: String,
    pub status: RoomStatus,
    pub floor: i64,
    pub capacity: i64,
    pub rate: f64,
}

/// Revenus journaliers. total_revenue = room + fb + other dès que les
/// composantes sont non nulles (recalculé à la normalisation).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueData {
    pub date: String,
    pub room_revenue: f64,
    pub fb_revenue: f64,
    pub other_revenue: f64,
    pub total_revenue: f64,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyData {
    pub date: String,
    pub total_rooms: u32,
    pub occupied_rooms: u32,
    pub occupancy_rate: f64,
    pub adr: f64,
    pub revpar: f64,
}

/// Les cinq collections produites par une sync.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PmsData {
    pub reservations: Vec<Reservation>,
    pub guests: Vec<Guest>,
    pub rooms: Vec<Room>,
    pub revenue: Vec<RevenueData>,
    pub occupancy: Vec<OccupancyData>,
}

/// Clé composite utilisée partout où des données de plusieurs connexions
/// peuvent se croiser (agrégat mémoire et record ports).
pub fn composite_id(connection_id: &str, id: &str) -> String {
    format!("{connection_id}_{id}")
}

impl PmsData {
    pub fn is_empty(&self) -> bool {
        self.reservations.is_empty()
            && self.guests.is_empty()
            && self.rooms.is_empty()
            && self.revenue.is_empty()
            && self.occupancy.is_empty()
    }

    pub fn total_records(&self) -> usize {
        self.reservations.len()
            + self.guests.len()
            + self.rooms.len()
            + self.revenue.len()
            + self.occupancy.len()
    }

    /// Concatène les cinq collections d'une autre sync dans celle-ci.
    pub fn merge(&mut self, other: PmsData) {
        self.reservations.extend(other.reservations);
        self.guests.extend(other.guests);
        self.rooms.extend(other.rooms);
        self.revenue.extend(other.revenue);
        self.occupancy.extend(other.occupancy);
    }

    /// Préfixe les ids (et les références client des réservations) par l'id
    /// de connexion. Les ids de deux vendeurs différents peuvent entrer en
    /// collision, le préfixe rend l'agrégat sûr.
    pub fn namespaced(&self, connection_id: &str) -> PmsData {
        let mut out = self.clone();
        for r in &mut out.reservations {
            r.id = composite_id(connection_id, &r.id);
            if !r.guest_id.is_empty() {
                r.guest_id = composite_id(connection_id, &r.guest_id);
            }
        }
        for g in &mut out.guests {
            g.id = composite_id(connection_id, &g.id);
        }
        for room in &mut out.rooms {
            room.id = composite_id(connection_id, &room.id);
        }
        // revenue/occupancy restent indexés par date
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reservation(id: &str, guest_id: &str) -> Reservation {
        Reservation {
            id: id.to_string(),
            guest_id: guest_id.to_string(),
            room_number: "101".to_string(),
            check_in: "2024-01-15".to_string(),
            check_out: "2024-01-18".to_string(),
            status: ReservationStatus::Confirmed,
            total_amount: 450.0,
            currency: "USD".to_string(),
            source: "Direct".to_string(),
            created_at: "2024-01-10T10:00:00Z".to_string(),
            updated_at: "2024-01-10T10:00:00Z".to_string(),
        }
    }

    #[test]
    fn test_namespacing_prefixes_ids_and_guest_refs() {
        let data = PmsData {
            reservations: vec![reservation("res_1", "guest_1")],
            ..Default::default()
        };

        let scoped = data.namespaced("conn_a");
        assert_eq!(scoped.reservations[0].id, "conn_a_res_1");
        assert_eq!(scoped.reservations[0].guest_id, "conn_a_guest_1");
    }

    #[test]
    fn test_namespacing_keeps_empty_guest_ref_empty() {
        let data = PmsData {
            reservations: vec![reservation("res_1", "")],
            ..Default::default()
        };

        let scoped = data.namespaced("conn_a");
        assert_eq!(scoped.reservations[0].guest_id, "");
    }

    #[test]
    fn test_merge_concatenates_collections() {
        let mut left = PmsData {
            reservations: vec![reservation("a", "g1")],
            ..Default::default()
        };
        let right = PmsData {
            reservations: vec![reservation("b", "g2")],
            ..Default::default()
        };

        left.merge(right);
        assert_eq!(left.reservations.len(), 2);
        assert_eq!(left.total_records(), 2);
        assert!(!left.is_empty());
    }
}
