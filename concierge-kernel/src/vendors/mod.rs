/**
 * VENDOR ADAPTERS - Normalisation des réponses PMS en schéma canonique
 *
 * RÔLE :
 * Ce module définit l'interface commune que chaque connecteur PMS implémente
 * pour transformer les réponses brutes (JSON hétérogène) en entités
 * canoniques : réservations, clients, chambres, revenus, occupation.
 *
 * FONCTIONNEMENT :
 * - VendorAdapter trait = interface commune (chemins + normalize par ressource)
 * - adapter_for() = table de dispatch par type de vendeur
 * - Les normalisations tolèrent tout : entrée non-tableau -> vide, champ
 *   absent -> défaut littéral. Jamais d'erreur sur un record malformé.
 * - Opera et Mews portent leurs propres variantes de champs; Fidelio,
 *   Protel, Cloudbeds, RMS et custom partagent les alias génériques et ne
 *   diffèrent que par leurs tables de routes.
 *
 * UTILITÉ POUR CONCIERGE :
 * 🎯 Un seul schéma côté dashboard quel que soit le PMS branché
 * 🎯 Ajouter un vendeur = une implémentation + une entrée de dispatch
 * 🎯 Données best-effort : un PMS bavard ou lacunaire ne casse jamais la sync
 */

pub mod fields;
pub mod generic;
pub mod mews;
pub mod opera;
pub mod status;

use crate::models::{
    Guest, OccupancyData, Reservation, RevenueData, Room, VendorKind,
};
use serde_json::Value;

/// Les cinq types de ressources synchronisées depuis chaque PMS
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Reservations,
    Guests,
    Rooms,
    Revenue,
    Occupancy,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Reservations,
        ResourceKind::Guests,
        ResourceKind::Rooms,
        ResourceKind::Revenue,
        ResourceKind::Occupancy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Reservations => "reservations",
            ResourceKind::Guests => "guests",
            ResourceKind::Rooms => "rooms",
            ResourceKind::Revenue => "revenue",
            ResourceKind::Occupancy => "occupancy",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "reservations" => Some(ResourceKind::Reservations),
            "guests" => Some(ResourceKind::Guests),
            "rooms" => Some(ResourceKind::Rooms),
            "revenue" => Some(ResourceKind::Revenue),
            "occupancy" => Some(ResourceKind::Occupancy),
            _ => None,
        }
    }
}

/// Interface commune que TOUS les connecteurs PMS implémentent.
/// Les impls par défaut couvrent le cas générique; un vendeur ne
/// redéfinit que ce qui diffère chez lui.
pub trait VendorAdapter: Send + Sync {
    fn kind(&self) -> VendorKind;

    /// Chemin relatif de la ressource chez ce vendeur.
    /// Ressource inconnue -> chemin générique `/{resource}`.
    fn resource_path(&self, resource: ResourceKind) -> String {
        format!("/{}", resource.as_str())
    }

    fn normalize_reservations(&self, raw: &Value) -> Vec<Reservation> {
        generic_reservations(raw)
    }

    fn normalize_guests(&self, raw: &Value) -> Vec<Guest> {
        generic_guests(raw)
    }

    fn normalize_rooms(&self, raw: &Value) -> Vec<Room> {
        shared_rooms(raw)
    }

    fn normalize_revenue(&self, raw: &Value) -> Vec<RevenueData> {
        shared_revenue(raw)
    }

    fn normalize_occupancy(&self, raw: &Value) -> Vec<OccupancyData> {
        shared_occupancy(raw)
    }
}

static OPERA: opera::OperaAdapter = opera::OperaAdapter;
static MEWS: mews::MewsAdapter = mews::MewsAdapter;

/// Table de dispatch vendeur -> connecteur.
pub fn adapter_for(kind: VendorKind) -> &'static dyn VendorAdapter {
    match kind {
        VendorKind::Opera => &OPERA,
        VendorKind::Mews => &MEWS,
        VendorKind::Fidelio => &generic::FIDELIO,
        VendorKind::Protel => &generic::PROTEL,
        VendorKind::Cloudbeds => &generic::CLOUDBEDS,
        VendorKind::Rms => &generic::RMS,
        VendorKind::Custom => &generic::CUSTOM,
    }
}

// ============ NORMALISATIONS PARTAGÉES ============
//
// Alias testés dans l'ordre de priorité : variante vendeur d'abord,
// puis snake_case, puis camelCase.

pub(crate) fn generic_reservations(raw: &Value) -> Vec<Reservation> {
    fields::records(raw)
        .iter()
        .map(|item| Reservation {
            id: fields::pick_str(item, &["id", "reservation_id"]).unwrap_or_default(),
            guest_id: fields::pick_str(item, &["guest_id", "guestId"]).unwrap_or_default(),
            room_number: fields::pick_str(item, &["room_number", "roomNumber"]).unwrap_or_default(),
            check_in: fields::pick_str(item, &["check_in", "checkIn"]).unwrap_or_default(),
            check_out: fields::pick_str(item, &["check_out", "checkOut"]).unwrap_or_default(),
            status: status::map_reservation_status(
                &fields::pick_str(item, &["status"]).unwrap_or_default(),
            ),
            total_amount: fields::pick_f64(item, &["total_amount", "totalAmount"]).unwrap_or(0.0),
            currency: fields::pick_str(item, &["currency"]).unwrap_or_else(|| "USD".into()),
            source: fields::pick_str(item, &["source"]).unwrap_or_else(|| "Direct".into()),
            created_at: fields::pick_str(item, &["created_at", "createdAt"])
                .unwrap_or_else(fields::now_rfc3339),
            updated_at: fields::pick_str(item, &["updated_at", "updatedAt"])
                .unwrap_or_else(fields::now_rfc3339),
        })
        .collect()
}

pub(crate) fn generic_guests(raw: &Value) -> Vec<Guest> {
    fields::records(raw)
        .iter()
        .map(|item| Guest {
            id: fields::pick_str(item, &["id", "guest_id"]).unwrap_or_default(),
            first_name: fields::pick_str(item, &["first_name", "firstName"]).unwrap_or_default(),
            last_name: fields::pick_str(item, &["last_name", "lastName"]).unwrap_or_default(),
            email: fields::pick_str(item, &["email"]).unwrap_or_default(),
            phone: fields::pick_str(item, &["phone"]).unwrap_or_default(),
            nationality: fields::pick_str(item, &["nationality"])
                .unwrap_or_else(|| "Unknown".into()),
            vip_status: fields::pick_bool(item, &["vip_status", "vipStatus"]).unwrap_or(false),
            total_stays: fields::pick_u32(item, &["total_stays", "totalStays"]).unwrap_or(0),
            total_spent: fields::pick_f64(item, &["total_spent", "totalSpent"]).unwrap_or(0.0),
            last_stay: fields::pick_str(item, &["last_stay", "lastStay"])
                .unwrap_or_else(fields::now_rfc3339),
        })
        .collect()
}

// Chambres, revenus et occupation : mêmes alias pour tous les vendeurs.

pub(crate) fn shared_rooms(raw: &Value) -> Vec<Room> {
    fields::records(raw)
        .iter()
        .map(|item| Room {
            id: fields::pick_str(item, &["id", "room_id", "Id"]).unwrap_or_default(),
            number: fields::pick_str(item, &["number", "room_number", "Number"])
                .unwrap_or_default(),
            room_type: fields::pick_str(item, &["type", "room_type", "Type"]).unwrap_or_default(),
            status: status::map_room_status(
                &fields::pick_str(item, &["status", "Status"]).unwrap_or_default(),
            ),
            floor: fields::pick_i64(item, &["floor", "Floor"]).unwrap_or(1),
            capacity: fields::pick_i64(item, &["capacity", "Capacity"]).unwrap_or(2),
            rate: fields::pick_f64(item, &["rate", "Rate"]).unwrap_or(0.0),
        })
        .collect()
}

pub(crate) fn shared_revenue(raw: &Value) -> Vec<RevenueData> {
    fields::records(raw)
        .iter()
        .map(|item| {
            let mut rec = RevenueData {
                date: fields::pick_str(item, &["date", "Date"]).unwrap_or_default(),
                room_revenue: fields::pick_f64(item, &["room_revenue", "roomRevenue", "RoomRevenue"])
                    .unwrap_or(0.0),
                fb_revenue: fields::pick_f64(item, &["fb_revenue", "fbRevenue", "FBRevenue"])
                    .unwrap_or(0.0),
                other_revenue: fields::pick_f64(
                    item,
                    &["other_revenue", "otherRevenue", "OtherRevenue"],
                )
                .unwrap_or(0.0),
                total_revenue: fields::pick_f64(
                    item,
                    &["total_revenue", "totalRevenue", "TotalRevenue"],
                )
                .unwrap_or(0.0),
                currency: fields::pick_str(item, &["currency", "Currency"])
                    .unwrap_or_else(|| "USD".into()),
            };
            // les totaux vendeurs divergent parfois des composantes
            let computed = rec.room_revenue + rec.fb_revenue + rec.other_revenue;
            if computed > 0.0 {
                rec.total_revenue = computed;
            }
            rec
        })
        .collect()
}

pub(crate) fn shared_occupancy(raw: &Value) -> Vec<OccupancyData> {
    fields::records(raw)
        .iter()
        .map(|item| {
            let mut rec = OccupancyData {
                date: fields::pick_str(item, &["date", "Date"]).unwrap_or_default(),
                total_rooms: fields::pick_u32(item, &["total_rooms", "totalRooms", "TotalRooms"])
                    .unwrap_or(0),
                occupied_rooms: fields::pick_u32(
                    item,
                    &["occupied_rooms", "occupiedRooms", "OccupiedRooms"],
                )
                .unwrap_or(0),
                occupancy_rate: fields::pick_f64(
                    item,
                    &["occupancy_rate", "occupancyRate", "OccupancyRate"],
                )
                .unwrap_or(0.0),
                adr: fields::pick_f64(item, &["adr", "ADR"]).unwrap_or(0.0),
                revpar: fields::pick_f64(item, &["revpar", "RevPAR"]).unwrap_or(0.0),
            };
            if rec.total_rooms > 0 {
                rec.occupancy_rate = rec.occupied_rooms as f64 / rec.total_rooms as f64 * 100.0;
            }
            rec
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ReservationStatus, RoomStatus};
    use serde_json::json;

    #[test]
    fn test_dispatch_covers_every_vendor() {
        for kind in [
            VendorKind::Opera,
            VendorKind::Fidelio,
            VendorKind::Protel,
            VendorKind::Mews,
            VendorKind::Cloudbeds,
            VendorKind::Rms,
            VendorKind::Custom,
        ] {
            assert_eq!(adapter_for(kind).kind(), kind);
        }
    }

    #[test]
    fn test_normalize_tolerates_degenerate_inputs() {
        let adapter = adapter_for(VendorKind::Custom);
        for raw in [json!([]), json!(null), json!({"unexpected": "object"})] {
            assert!(adapter.normalize_reservations(&raw).is_empty());
            assert!(adapter.normalize_guests(&raw).is_empty());
            assert!(adapter.normalize_rooms(&raw).is_empty());
            assert!(adapter.normalize_revenue(&raw).is_empty());
            assert!(adapter.normalize_occupancy(&raw).is_empty());
        }
    }

    #[test]
    fn test_record_with_no_known_field_gets_defaults() {
        let raw = json!([{"champ_inconnu": 42}]);
        let reservations = generic_reservations(&raw);

        assert_eq!(reservations.len(), 1);
        let r = &reservations[0];
        assert_eq!(r.id, "");
        assert_eq!(r.status, ReservationStatus::Confirmed);
        assert_eq!(r.total_amount, 0.0);
        assert_eq!(r.currency, "USD");
        assert_eq!(r.source, "Direct");
        assert!(!r.created_at.is_empty());
    }

    #[test]
    fn test_shared_rooms_defaults_and_status() {
        let raw = json!([
            {"id": "r1", "number": "101", "type": "Suite", "status": "OUT_OF_ORDER", "floor": 3, "capacity": 4, "rate": 300},
            {"room_id": "r2"}
        ]);
        let rooms = shared_rooms(&raw);

        assert_eq!(rooms[0].status, RoomStatus::OutOfOrder);
        assert_eq!(rooms[0].floor, 3);
        assert_eq!(rooms[1].id, "r2");
        assert_eq!(rooms[1].status, RoomStatus::Available);
        assert_eq!(rooms[1].floor, 1);
        assert_eq!(rooms[1].capacity, 2);
    }

    #[test]
    fn test_revenue_total_recomputed_from_components() {
        let raw = json!([
            {"date": "2024-01-16", "room_revenue": 2400, "fb_revenue": 800, "other_revenue": 200, "total_revenue": 9999},
            {"date": "2024-01-17", "total_revenue": 500}
        ]);
        let revenue = shared_revenue(&raw);

        assert_eq!(revenue[0].total_revenue, 3400.0);
        // composantes toutes nulles : on garde le total vendeur
        assert_eq!(revenue[1].total_revenue, 500.0);
    }

    #[test]
    fn test_occupancy_rate_recomputed_when_rooms_known() {
        let raw = json!([
            {"date": "2024-01-16", "total_rooms": 12, "occupied_rooms": 9, "occupancy_rate": 1.0},
            {"date": "2024-01-17", "occupancy_rate": 42.0}
        ]);
        let occupancy = shared_occupancy(&raw);

        assert_eq!(occupancy[0].occupancy_rate, 75.0);
        assert_eq!(occupancy[1].occupancy_rate, 42.0);
    }

    #[test]
    fn test_resource_kind_parse_round_trip() {
        for kind in ResourceKind::ALL {
            assert_eq!(ResourceKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ResourceKind::parse("folios"), None);
    }
}
