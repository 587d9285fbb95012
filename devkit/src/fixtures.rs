//! Payloads vendeurs réalistes pour tests et développement.
//!
//! Les formes reproduisent ce que renvoient les API réelles : PascalCase
//! maison chez Opera, montants imbriqués chez Mews, snake_case chez les
//! PMS génériques. Chaque builder renvoie le corps JSON brut tel que le
//! client l'aurait décodé.

use serde_json::{json, Value};

// ============ MEWS ============

pub fn mews_reservations() -> Value {
    json!([
        {
            "Id": "MW-1",
            "CustomerId": "CUST-9",
            "AssignedSpaceNumber": "12",
            "StartUtc": "2024-02-10T14:00:00Z",
            "EndUtc": "2024-02-13T10:00:00Z",
            "State": "Confirmed",
            "TotalAmount": { "Value": 890.0, "Currency": "GBP" },
            "Origin": "Channel",
            "CreatedUtc": "2024-01-28T09:12:00Z",
            "UpdatedUtc": "2024-02-01T16:40:00Z"
        },
        {
            "Id": "MW-2",
            "CustomerId": "CUST-10",
            "AssignedSpaceNumber": "31",
            "StartUtc": "2024-02-11T14:00:00Z",
            "EndUtc": "2024-02-12T10:00:00Z",
            "State": "Started",
            "TotalAmount": { "Value": 145.0, "Currency": "GBP" },
            "Origin": "Direct",
            "CreatedUtc": "2024-02-05T11:00:00Z",
            "UpdatedUtc": "2024-02-11T14:05:00Z"
        }
    ])
}

pub fn mews_guests() -> Value {
    json!([
        {
            "Id": "CUST-9",
            "FirstName": "Oliver",
            "LastName": "Hart",
            "Email": "oliver.hart@example.com",
            "Phone": "+44-7700-900123",
            "NationalityCode": "GB",
            "Classifications": ["Returning", "Vip"],
            "TotalStays": 4,
            "TotalSpent": 2300.0,
            "LastStay": "2024-01-12"
        },
        {
            "Id": "CUST-10",
            "FirstName": "Priya",
            "LastName": "Nair",
            "Email": "priya.nair@example.com",
            "Phone": "+44-7700-900456",
            "NationalityCode": "IN",
            "Classifications": [],
            "TotalStays": 1,
            "TotalSpent": 145.0,
            "LastStay": "2024-02-12"
        }
    ])
}

// ============ OPERA ============

pub fn opera_reservations() -> Value {
    json!([
        {
            "ReservationId": "OP-1001",
            "ProfileId": "PRF-7",
            "RoomNumber": "204",
            "ArrivalDate": "2024-02-01",
            "DepartureDate": "2024-02-04",
            "ReservationStatus": "CheckedIn",
            "TotalAmount": 612.5,
            "Currency": "EUR",
            "Source": "GDS",
            "CreatedDate": "2024-01-20T08:30:00Z",
            "ModifiedDate": "2024-02-01T15:10:00Z"
        },
        {
            // enregistrement minimal : les alias snake_case prennent le relais
            "id": "OP-1002",
            "guest_id": "PRF-8",
            "room_number": "110",
            "check_in": "2024-02-03",
            "check_out": "2024-02-05",
            "status": "No Show"
        }
    ])
}

pub fn opera_guests() -> Value {
    json!([
        {
            "ProfileId": "PRF-7",
            "FirstName": "Amélie",
            "LastName": "Laurent",
            "EmailAddress": "amelie@example.com",
            "PhoneNumber": "+33-6-12-34-56-78",
            "Nationality": "FR",
            "VipStatus": true,
            "TotalStays": 9,
            "TotalRevenue": 4350.0,
            "LastStayDate": "2024-01-28"
        }
    ])
}

// ============ PMS GÉNÉRIQUES (Fidelio, Protel, Cloudbeds, RMS, custom) ============

pub fn generic_reservations() -> Value {
    json!([
        {
            "id": "res_100",
            "guest_id": "guest_31",
            "room_number": "305",
            "check_in": "2024-01-20",
            "check_out": "2024-01-23",
            "status": "confirmed",
            "total_amount": 510.0,
            "currency": "USD",
            "source": "Direct",
            "created_at": "2024-01-15T10:00:00Z",
            "updated_at": "2024-01-15T10:00:00Z"
        },
        {
            "id": "res_101",
            "guest_id": "guest_32",
            "room_number": "118",
            "check_in": "2024-01-19",
            "check_out": "2024-01-21",
            "status": "Checked In",
            "total_amount": 276.0,
            "currency": "USD",
            "source": "Booking.com",
            "created_at": "2024-01-11T09:30:00Z",
            "updated_at": "2024-01-19T15:02:00Z"
        }
    ])
}

pub fn generic_guests() -> Value {
    json!([
        {
            "id": "guest_31",
            "first_name": "Laura",
            "last_name": "Meyer",
            "email": "laura.meyer@example.com",
            "phone": "+49-151-23456789",
            "nationality": "DE",
            "vip_status": false,
            "total_stays": 2,
            "total_spent": 830.0,
            "last_stay": "2023-11-03"
        },
        {
            "id": "guest_32",
            "first_name": "Ken",
            "last_name": "Tanaka",
            "email": "ken.tanaka@example.com",
            "phone": "+81-90-1234-5678",
            "nationality": "JP",
            "vip_status": true,
            "total_stays": 6,
            "total_spent": 4100.0,
            "last_stay": "2024-01-21"
        }
    ])
}

pub fn generic_rooms() -> Value {
    json!([
        {
            "id": "room_305",
            "number": "305",
            "type": "Deluxe",
            "status": "occupied",
            "floor": 3,
            "capacity": 3,
            "rate": 170.0
        },
        {
            "id": "room_118",
            "number": "118",
            "type": "Standard",
            "status": "clean",
            "floor": 1,
            "capacity": 2,
            "rate": 120.0
        }
    ])
}

pub fn generic_revenue() -> Value {
    json!([
        {
            "date": "2024-01-16",
            "room_revenue": 2400.0,
            "fb_revenue": 800.0,
            "other_revenue": 200.0,
            "total_revenue": 3400.0,
            "currency": "USD"
        },
        {
            "date": "2024-01-15",
            "room_revenue": 2200.0,
            "fb_revenue": 750.0,
            "other_revenue": 150.0,
            "total_revenue": 3100.0,
            "currency": "USD"
        }
    ])
}

pub fn generic_occupancy() -> Value {
    json!([
        {
            "date": "2024-01-16",
            "total_rooms": 40,
            "occupied_rooms": 31,
            "occupancy_rate": 77.5,
            "adr": 182.0,
            "revpar": 141.0
        },
        {
            "date": "2024-01-15",
            "total_rooms": 40,
            "occupied_rooms": 27,
            "occupancy_rate": 67.5,
            "adr": 175.0,
            "revpar": 118.1
        }
    ])
}

// ============ PAYLOADS DÉGÉNÉRÉS ============

/// Réponse qui n'est pas un tableau (certains PMS enveloppent ou se
/// trompent de forme) : la normalisation doit rendre une liste vide.
pub fn not_an_array() -> Value {
    json!({ "data": { "reservations": [] }, "ok": true })
}

/// Enregistrement sans aucun champ connu : la normalisation doit rendre
/// un record par défaut, jamais une erreur.
pub fn record_with_no_known_fields() -> Value {
    json!([{ "x_vendor_blob": { "deeply": ["nested", 42] } }])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixtures_are_arrays() {
        for payload in [
            mews_reservations(),
            mews_guests(),
            opera_reservations(),
            opera_guests(),
            generic_reservations(),
            generic_guests(),
            generic_rooms(),
            generic_revenue(),
            generic_occupancy(),
        ] {
            assert!(payload.is_array());
            assert!(!payload.as_array().unwrap().is_empty());
        }
    }

    #[test]
    fn test_degenerate_payloads() {
        assert!(!not_an_array().is_array());
        let weird = record_with_no_known_fields();
        assert_eq!(weird.as_array().unwrap().len(), 1);
    }
}
