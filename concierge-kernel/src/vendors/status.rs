//! Heuristiques de statuts : chaque PMS a son propre vocabulaire
//! ("CheckedIn", "in-house", "NO SHOW"...). On rabat tout sur les
//! énumérations canoniques par recherche de sous-chaînes, sans frontière
//! de mot, dans un ordre de priorité fixe. Best-effort, pas autoritatif.

use crate::models::{ReservationStatus, RoomStatus};

pub fn map_reservation_status(raw: &str) -> ReservationStatus {
    if raw.is_empty() {
        return ReservationStatus::Confirmed;
    }

    let s = raw.to_lowercase();

    if s.contains("confirm") || s.contains("booked") {
        ReservationStatus::Confirmed
    } else if s.contains("check") && s.contains("in") {
        ReservationStatus::CheckedIn
    } else if s.contains("check") && s.contains("out") {
        ReservationStatus::CheckedOut
    } else if s.contains("cancel") {
        ReservationStatus::Cancelled
    } else if s.contains("no") && s.contains("show") {
        ReservationStatus::NoShow
    } else {
        ReservationStatus::Confirmed
    }
}

pub fn map_room_status(raw: &str) -> RoomStatus {
    if raw.is_empty() {
        return RoomStatus::Available;
    }

    let s = raw.to_lowercase();

    if s.contains("available") || s.contains("clean") {
        RoomStatus::Available
    } else if s.contains("occupied") || s.contains("dirty") {
        RoomStatus::Occupied
    } else if s.contains("maintenance") || s.contains("repair") {
        RoomStatus::Maintenance
    } else if s.contains("out") || s.contains("order") {
        RoomStatus::OutOfOrder
    } else {
        RoomStatus::Available
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reservation_status_vendor_strings() {
        assert_eq!(map_reservation_status("CheckedIn"), ReservationStatus::CheckedIn);
        assert_eq!(map_reservation_status("Checked Out"), ReservationStatus::CheckedOut);
        assert_eq!(map_reservation_status("No Show"), ReservationStatus::NoShow);
        assert_eq!(map_reservation_status("NO_SHOW"), ReservationStatus::NoShow);
        assert_eq!(map_reservation_status("Booked"), ReservationStatus::Confirmed);
        assert_eq!(map_reservation_status("CANCELLED"), ReservationStatus::Cancelled);
    }

    #[test]
    fn test_reservation_status_defaults() {
        assert_eq!(map_reservation_status(""), ReservationStatus::Confirmed);
        assert_eq!(map_reservation_status("garbage"), ReservationStatus::Confirmed);
    }

    #[test]
    fn test_reservation_status_idempotent_on_canonical() {
        for canonical in ["confirmed", "checked_in", "checked_out", "cancelled", "no_show"] {
            let first = map_reservation_status(canonical);
            let again = map_reservation_status(canonical);
            assert_eq!(first, again);
        }
        // les formes canoniques retombent bien sur elles-mêmes
        assert_eq!(map_reservation_status("checked_in"), ReservationStatus::CheckedIn);
        assert_eq!(map_reservation_status("checked_out"), ReservationStatus::CheckedOut);
        assert_eq!(map_reservation_status("no_show"), ReservationStatus::NoShow);
    }

    #[test]
    fn test_room_status_vendor_strings() {
        assert_eq!(map_room_status("OUT_OF_ORDER"), RoomStatus::OutOfOrder);
        assert_eq!(map_room_status("Dirty"), RoomStatus::Occupied);
        assert_eq!(map_room_status("under repair"), RoomStatus::Maintenance);
        assert_eq!(map_room_status("Clean"), RoomStatus::Available);
    }

    #[test]
    fn test_room_status_defaults() {
        assert_eq!(map_room_status(""), RoomStatus::Available);
        assert_eq!(map_room_status("???"), RoomStatus::Available);
    }

    #[test]
    fn test_room_status_idempotent_on_canonical() {
        assert_eq!(map_room_status("available"), RoomStatus::Available);
        assert_eq!(map_room_status("occupied"), RoomStatus::Occupied);
        assert_eq!(map_room_status("maintenance"), RoomStatus::Maintenance);
        assert_eq!(map_room_status("out_of_order"), RoomStatus::OutOfOrder);
    }
}
