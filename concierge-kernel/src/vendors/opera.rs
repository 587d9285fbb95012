//! Connecteur Oracle Opera : champs PascalCase "maison" (ReservationId,
//! ProfileId, ArrivalDate...) et profils clients au lieu de guests.

use super::{fields, status, ResourceKind, VendorAdapter};
use crate::models::{Guest, Reservation, VendorKind};
use serde_json::Value;

pub struct OperaAdapter;

impl VendorAdapter for OperaAdapter {
    fn kind(&self) -> VendorKind {
        VendorKind::Opera
    }

    fn resource_path(&self, resource: ResourceKind) -> String {
        match resource {
            ResourceKind::Reservations => "/reservations".into(),
            ResourceKind::Guests => "/profiles".into(),
            ResourceKind::Rooms => "/rooms".into(),
            ResourceKind::Revenue => "/revenue".into(),
            ResourceKind::Occupancy => "/occupancy".into(),
        }
    }

    fn normalize_reservations(&self, raw: &Value) -> Vec<Reservation> {
        fields::records(raw)
            .iter()
            .map(|item| Reservation {
                id: fields::pick_str(item, &["ReservationId", "id"]).unwrap_or_default(),
                guest_id: fields::pick_str(item, &["ProfileId", "guest_id"]).unwrap_or_default(),
                room_number: fields::pick_str(item, &["RoomNumber", "room_number"])
                    .unwrap_or_default(),
                check_in: fields::pick_str(item, &["ArrivalDate", "check_in"]).unwrap_or_default(),
                check_out: fields::pick_str(item, &["DepartureDate", "check_out"])
                    .unwrap_or_default(),
                status: status::map_reservation_status(
                    &fields::pick_str(item, &["ReservationStatus", "status"]).unwrap_or_default(),
                ),
                total_amount: fields::pick_f64(item, &["TotalAmount", "total_amount"])
                    .unwrap_or(0.0),
                currency: fields::pick_str(item, &["Currency", "currency"])
                    .unwrap_or_else(|| "USD".into()),
                source: fields::pick_str(item, &["Source", "source"])
                    .unwrap_or_else(|| "Direct".into()),
                created_at: fields::pick_str(item, &["CreatedDate", "created_at"])
                    .unwrap_or_else(fields::now_rfc3339),
                updated_at: fields::pick_str(item, &["ModifiedDate", "updated_at"])
                    .unwrap_or_else(fields::now_rfc3339),
            })
            .collect()
    }

    fn normalize_guests(&self, raw: &Value) -> Vec<Guest> {
        fields::records(raw)
            .iter()
            .map(|item| Guest {
                id: fields::pick_str(item, &["ProfileId", "id"]).unwrap_or_default(),
                first_name: fields::pick_str(item, &["FirstName", "first_name"])
                    .unwrap_or_default(),
                last_name: fields::pick_str(item, &["LastName", "last_name"]).unwrap_or_default(),
                email: fields::pick_str(item, &["EmailAddress", "email"]).unwrap_or_default(),
                phone: fields::pick_str(item, &["PhoneNumber", "phone"]).unwrap_or_default(),
                nationality: fields::pick_str(item, &["Nationality", "nationality"])
                    .unwrap_or_else(|| "Unknown".into()),
                vip_status: fields::pick_bool(item, &["VipStatus"]).unwrap_or(false),
                total_stays: fields::pick_u32(item, &["TotalStays"]).unwrap_or(0),
                // Opera expose la dépense cumulée sous TotalRevenue
                total_spent: fields::pick_f64(item, &["TotalRevenue"]).unwrap_or(0.0),
                last_stay: fields::pick_str(item, &["LastStayDate"])
                    .unwrap_or_else(fields::now_rfc3339),
            })
            .collect()
    }
}
