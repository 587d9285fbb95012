//! Connecteurs à table de routes : Fidelio, Protel, Cloudbeds et RMS
//! parlent tous les alias génériques, seuls leurs chemins d'API diffèrent.
//! Le vendeur custom n'a aucune route propre et retombe toujours sur
//! le chemin générique `/{resource}`.

use super::{ResourceKind, VendorAdapter};
use crate::models::VendorKind;

pub struct GenericAdapter {
    kind: VendorKind,
    routes: &'static [(ResourceKind, &'static str)],
}

impl VendorAdapter for GenericAdapter {
    fn kind(&self) -> VendorKind {
        self.kind
    }

    fn resource_path(&self, resource: ResourceKind) -> String {
        self.routes
            .iter()
            .find(|(r, _)| *r == resource)
            .map(|(_, path)| (*path).to_string())
            .unwrap_or_else(|| format!("/{}", resource.as_str()))
    }
}

pub static FIDELIO: GenericAdapter = GenericAdapter {
    kind: VendorKind::Fidelio,
    routes: &[
        (ResourceKind::Reservations, "/fidelio/v1/reservations"),
        (ResourceKind::Guests, "/fidelio/v1/guests"),
        (ResourceKind::Rooms, "/fidelio/v1/rooms"),
        (ResourceKind::Revenue, "/fidelio/v1/revenue"),
        (ResourceKind::Occupancy, "/fidelio/v1/occupancy"),
    ],
};

pub static PROTEL: GenericAdapter = GenericAdapter {
    kind: VendorKind::Protel,
    routes: &[
        (ResourceKind::Reservations, "/pms/v1/reservations"),
        (ResourceKind::Guests, "/pms/v1/guests"),
        (ResourceKind::Rooms, "/pms/v1/rooms"),
        (ResourceKind::Revenue, "/pms/v1/revenue"),
        (ResourceKind::Occupancy, "/pms/v1/occupancy"),
    ],
};

pub static CLOUDBEDS: GenericAdapter = GenericAdapter {
    kind: VendorKind::Cloudbeds,
    routes: &[
        (ResourceKind::Reservations, "/api/v1.1/getReservations"),
        (ResourceKind::Guests, "/api/v1.1/getGuests"),
        (ResourceKind::Rooms, "/api/v1.1/getRooms"),
        (ResourceKind::Revenue, "/api/v1.1/getRevenue"),
        (ResourceKind::Occupancy, "/api/v1.1/getOccupancy"),
    ],
};

pub static RMS: GenericAdapter = GenericAdapter {
    kind: VendorKind::Rms,
    routes: &[
        (ResourceKind::Reservations, "/api/reservations"),
        (ResourceKind::Guests, "/api/guests"),
        (ResourceKind::Rooms, "/api/rooms"),
        (ResourceKind::Revenue, "/api/revenue"),
        (ResourceKind::Occupancy, "/api/occupancy"),
    ],
};

pub static CUSTOM: GenericAdapter = GenericAdapter {
    kind: VendorKind::Custom,
    routes: &[],
};
