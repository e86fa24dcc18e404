//! Store metadata.

use crate::checkout::haversine_km;
use crate::ids::StoreId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A physical store products ship from.
///
/// `distance_km` and `shipping_fee` start out unknown and are filled in as
/// geolocation and fee estimation resolve; `None` means "pending", never a
/// computed zero.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Store {
    /// Unique store identifier.
    pub id: StoreId,
    /// Display name.
    pub name: String,
    /// Street address.
    pub address: Option<String>,
    /// City.
    pub city: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Latitude, when the store is geocoded.
    pub latitude: Option<f64>,
    /// Longitude, when the store is geocoded.
    pub longitude: Option<f64>,
    /// Whether the store is currently operating.
    pub active: bool,
    /// Distance from the customer in km, once geolocation resolves.
    pub distance_km: Option<f64>,
    /// Shipping fee from this store, once computed or fetched.
    pub shipping_fee: Option<Money>,
}

impl Store {
    /// Create a new active store with the given ID and name.
    pub fn new(id: StoreId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            address: None,
            city: None,
            phone: None,
            latitude: None,
            longitude: None,
            active: true,
            distance_km: None,
            shipping_fee: None,
        }
    }

    /// Set the store's coordinates.
    pub fn with_location(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    /// Set the street address.
    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    /// Great-circle distance from this store to a point, in km.
    ///
    /// `None` until the store has been geocoded.
    pub fn distance_to(&self, latitude: f64, longitude: f64) -> Option<f64> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => Some(haversine_km(lat, lon, latitude, longitude)),
            _ => None,
        }
    }

    /// Record the resolved distance from the customer.
    pub fn set_distance(&mut self, distance_km: f64) {
        self.distance_km = Some(distance_km);
    }
}
