//! Connecteur Mews : API "connector" (getAll), montants imbriqués dans
//! TotalAmount.{Value,Currency}, VIP porté par la liste Classifications.

use super::{fields, status, ResourceKind, VendorAdapter};
use crate::models::{Guest, Reservation, VendorKind};
use serde_json::Value;

pub struct MewsAdapter;

fn has_vip_classification(item: &Value) -> bool {
    item.get("Classifications")
        .and_then(Value::as_array)
        .map(|classes| classes.iter().any(|c| c.as_str() == Some("Vip")))
        .unwrap_or(false)
}

impl VendorAdapter for MewsAdapter {
    fn kind(&self) -> VendorKind {
        VendorKind::Mews
    }

    fn resource_path(&self, resource: ResourceKind) -> String {
        match resource {
            ResourceKind::Reservations => "/api/connector/v1/reservations/getAll".into(),
            ResourceKind::Guests => "/api/connector/v1/customers/getAll".into(),
            ResourceKind::Rooms => "/api/connector/v1/spaces/getAll".into(),
            ResourceKind::Revenue => "/api/connector/v1/accountingItems/getAll".into(),
            ResourceKind::Occupancy => "/api/connector/v1/reports/getOccupancy".into(),
        }
    }

    fn normalize_reservations(&self, raw: &Value) -> Vec<Reservation> {
        fields::records(raw)
            .iter()
            .map(|item| Reservation {
                id: fields::pick_str(item, &["Id", "id"]).unwrap_or_default(),
                guest_id: fields::pick_str(item, &["CustomerId", "customer_id"])
                    .unwrap_or_default(),
                room_number: fields::pick_str(item, &["AssignedSpaceNumber", "room_number"])
                    .unwrap_or_default(),
                check_in: fields::pick_str(item, &["StartUtc", "check_in"]).unwrap_or_default(),
                check_out: fields::pick_str(item, &["EndUtc", "check_out"]).unwrap_or_default(),
                status: status::map_reservation_status(
                    &fields::pick_str(item, &["State", "status"]).unwrap_or_default(),
                ),
                total_amount: fields::pick_f64(item, &["TotalAmount.Value", "total_amount"])
                    .unwrap_or(0.0),
                currency: fields::pick_str(item, &["TotalAmount.Currency", "currency"])
                    .unwrap_or_else(|| "USD".into()),
                source: fields::pick_str(item, &["Origin", "source"])
                    .unwrap_or_else(|| "Direct".into()),
                created_at: fields::pick_str(item, &["CreatedUtc", "created_at"])
                    .unwrap_or_else(fields::now_rfc3339),
                updated_at: fields::pick_str(item, &["UpdatedUtc", "updated_at"])
                    .unwrap_or_else(fields::now_rfc3339),
            })
            .collect()
    }

    fn normalize_guests(&self, raw: &Value) -> Vec<Guest> {
        fields::records(raw)
            .iter()
            .map(|item| Guest {
                id: fields::pick_str(item, &["Id", "id"]).unwrap_or_default(),
                first_name: fields::pick_str(item, &["FirstName", "first_name"])
                    .unwrap_or_default(),
                last_name: fields::pick_str(item, &["LastName", "last_name"]).unwrap_or_default(),
                email: fields::pick_str(item, &["Email", "email"]).unwrap_or_default(),
                phone: fields::pick_str(item, &["Phone", "phone"]).unwrap_or_default(),
                nationality: fields::pick_str(item, &["NationalityCode", "nationality"])
                    .unwrap_or_else(|| "Unknown".into()),
                vip_status: has_vip_classification(item),
                total_stays: fields::pick_u32(item, &["TotalStays"]).unwrap_or(0),
                total_spent: fields::pick_f64(item, &["TotalSpent"]).unwrap_or(0.0),
                last_stay: fields::pick_str(item, &["LastStay"])
                    .unwrap_or_else(fields::now_rfc3339),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReservationStatus;
    use concierge_devkit::fixtures;
    use serde_json::json;

    #[test]
    fn test_mews_nested_amount_and_currency() {
        let adapter = MewsAdapter;
        let reservations = adapter.normalize_reservations(&fixtures::mews_reservations());

        let r = &reservations[0];
        assert_eq!(r.id, "MW-1");
        assert_eq!(r.guest_id, "CUST-9");
        assert_eq!(r.total_amount, 890.0);
        assert_eq!(r.currency, "GBP");
        assert_eq!(r.status, ReservationStatus::Confirmed);
        assert_eq!(r.source, "Channel");
    }

    #[test]
    fn test_mews_vip_from_classifications() {
        let adapter = MewsAdapter;
        let guests = adapter.normalize_guests(&fixtures::mews_guests());

        assert!(guests[0].vip_status);
        assert!(!guests[1].vip_status);
        assert_eq!(guests[0].nationality, "GB");
    }

    #[test]
    fn test_mews_snake_case_fallback_aliases() {
        let adapter = MewsAdapter;
        let raw = json!([{
            "id": "low-1",
            "customer_id": "c-2",
            "total_amount": 120.0,
            "status": "Canceled"
        }]);
        let reservations = adapter.normalize_reservations(&raw);

        let r = &reservations[0];
        assert_eq!(r.id, "low-1");
        assert_eq!(r.guest_id, "c-2");
        assert_eq!(r.total_amount, 120.0);
        assert_eq!(r.status, ReservationStatus::Cancelled);
    }

    #[test]
    fn test_mews_paths() {
        let adapter = MewsAdapter;
        assert_eq!(
            adapter.resource_path(ResourceKind::Occupancy),
            "/api/connector/v1/reports/getOccupancy"
        );
    }
}
