//! Jeu de données de démonstration.
//!
//! Servi à la place d'un agrégat vide quand aucune connexion n'a produit
//! de données (aucune configurée, ou toutes en échec) : le dashboard ne
//! doit jamais afficher un écran vide.

use crate::models::{
    Guest, OccupancyData, PmsData, Reservation, ReservationStatus, RevenueData, Room, RoomStatus,
};

#[allow(clippy::too_many_arguments)]
fn reservation(
    id: &str,
    guest_id: &str,
    room: &str,
    check_in: &str,
    check_out: &str,
    status: ReservationStatus,
    amount: f64,
    source: &str,
    created: &str,
    updated: &str,
) -> Reservation {
    Reservation {
        id: id.into(),
        guest_id: guest_id.into(),
        room_number: room.into(),
        check_in: check_in.into(),
        check_out: check_out.into(),
        status,
        total_amount: amount,
        currency: "USD".into(),
        source: source.into(),
        created_at: created.into(),
        updated_at: updated.into(),
    }
}

#[allow(clippy::too_many_arguments)]
fn guest(
    id: &str,
    first: &str,
    last: &str,
    email: &str,
    phone: &str,
    nationality: &str,
    vip: bool,
    stays: u32,
    spent: f64,
    last_stay: &str,
) -> Guest {
    Guest {
        id: id.into(),
        first_name: first.into(),
        last_name: last.into(),
        email: email.into(),
        phone: phone.into(),
        nationality: nationality.into(),
        vip_status: vip,
        total_stays: stays,
        total_spent: spent,
        last_stay: last_stay.into(),
    }
}

fn room(id: &str, number: &str, kind: &str, status: RoomStatus, floor: i64, capacity: i64, rate: f64) -> Room {
    Room {
        id: id.into(),
        number: number.into(),
        room_type: kind.into(),
        status,
        floor,
        capacity,
        rate,
    }
}

fn revenue(date: &str, rooms: f64, fb: f64, other: f64) -> RevenueData {
    RevenueData {
        date: date.into(),
        room_revenue: rooms,
        fb_revenue: fb,
        other_revenue: other,
        total_revenue: rooms + fb + other,
        currency: "USD".into(),
    }
}

fn occupancy(date: &str, total: u32, occupied: u32, adr: f64, revpar: f64) -> OccupancyData {
    OccupancyData {
        date: date.into(),
        total_rooms: total,
        occupied_rooms: occupied,
        occupancy_rate: occupied as f64 / total as f64 * 100.0,
        adr,
        revpar,
    }
}

/// Données fixes de démonstration : un petit hôtel plausible sur une
/// semaine de janvier 2024.
pub fn demo_dataset() -> PmsData {
    use ReservationStatus::*;
    use RoomStatus::*;

    PmsData {
        reservations: vec![
            reservation("res_1", "guest_1", "101", "2024-01-15", "2024-01-18", Confirmed, 450.0, "Booking.com", "2024-01-10T10:00:00Z", "2024-01-10T10:00:00Z"),
            reservation("res_2", "guest_2", "205", "2024-01-16", "2024-01-20", CheckedIn, 680.0, "Direct", "2024-01-12T14:30:00Z", "2024-01-16T15:00:00Z"),
            reservation("res_3", "guest_3", "312", "2024-01-14", "2024-01-16", CheckedOut, 320.0, "Expedia", "2024-01-08T09:15:00Z", "2024-01-16T11:00:00Z"),
            reservation("res_4", "guest_4", "408", "2024-01-17", "2024-01-19", Confirmed, 380.0, "Airbnb", "2024-01-13T16:45:00Z", "2024-01-13T16:45:00Z"),
            reservation("res_5", "guest_5", "501", "2024-01-18", "2024-01-22", Confirmed, 720.0, "Direct", "2024-01-14T11:20:00Z", "2024-01-14T11:20:00Z"),
        ],
        guests: vec![
            guest("guest_1", "John", "Smith", "john.smith@email.com", "+1-555-0123", "US", false, 3, 1250.0, "2024-01-18"),
            guest("guest_2", "Sarah", "Johnson", "sarah.j@email.com", "+1-555-0456", "CA", true, 8, 4200.0, "2024-01-20"),
            guest("guest_3", "Michael", "Brown", "mike.brown@email.com", "+44-20-7946-0958", "UK", false, 1, 320.0, "2024-01-16"),
            guest("guest_4", "Emma", "Davis", "emma.davis@email.com", "+33-1-42-86-83-26", "FR", false, 2, 760.0, "2024-01-19"),
            guest("guest_5", "David", "Wilson", "david.wilson@email.com", "+1-555-0789", "US", true, 12, 8900.0, "2024-01-22"),
        ],
        rooms: vec![
            room("room_1", "101", "Standard", Available, 1, 2, 150.0),
            room("room_2", "102", "Standard", Occupied, 1, 2, 150.0),
            room("room_3", "201", "Deluxe", Occupied, 2, 3, 200.0),
            room("room_4", "202", "Deluxe", Available, 2, 3, 200.0),
            room("room_5", "205", "Deluxe", Occupied, 2, 3, 200.0),
            room("room_6", "301", "Suite", Available, 3, 4, 300.0),
            room("room_7", "312", "Suite", Maintenance, 3, 4, 300.0),
            room("room_8", "401", "Premium", Available, 4, 2, 250.0),
            room("room_9", "408", "Premium", Occupied, 4, 2, 250.0),
            room("room_10", "501", "Penthouse", Occupied, 5, 6, 500.0),
            room("room_11", "502", "Penthouse", OutOfOrder, 5, 6, 500.0),
            room("room_12", "103", "Standard", Available, 1, 2, 150.0),
        ],
        revenue: vec![
            revenue("2024-01-16", 2400.0, 800.0, 200.0),
            revenue("2024-01-15", 2200.0, 750.0, 150.0),
            revenue("2024-01-14", 2600.0, 900.0, 300.0),
            revenue("2024-01-13", 2100.0, 650.0, 100.0),
            revenue("2024-01-12", 2800.0, 950.0, 250.0),
            revenue("2024-01-11", 2300.0, 700.0, 180.0),
            revenue("2024-01-10", 2500.0, 820.0, 220.0),
        ],
        occupancy: vec![
            occupancy("2024-01-16", 12, 8, 225.0, 150.0),
            occupancy("2024-01-15", 12, 7, 210.0, 122.5),
            occupancy("2024-01-14", 12, 9, 240.0, 180.0),
            occupancy("2024-01-13", 12, 6, 195.0, 97.5),
            occupancy("2024-01-12", 12, 10, 260.0, 216.7),
            occupancy("2024-01-11", 12, 7, 215.0, 125.4),
            occupancy("2024-01-10", 12, 8, 230.0, 153.3),
        ],
    }
}
