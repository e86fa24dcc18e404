//! Shipping fee resolution.
//!
//! Fees are distance-based. The admin-managed [`RateTable`] prices each
//! distance band separately and accumulates segment by segment; [`FlatRate`]
//! is the simple per-km fallback used when no table is configured. Both
//! implement [`ShippingResolver`], the hook the row builder calls.

use crate::error::CommerceError;
use crate::ids::StoreId;
use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Resolves a shipping fee for a store at a known distance.
///
/// `None` means the fee cannot be determined yet; the caller surfaces that
/// as a pending state, never as a zero fee. Implemented for closures so
/// callers can pass a lambda.
pub trait ShippingResolver {
    /// Fee to ship this store's parcel over the given distance.
    fn fee_for(&self, store_id: &StoreId, distance_km: f64) -> Option<Money>;
}

impl<F> ShippingResolver for F
where
    F: Fn(&StoreId, f64) -> Option<Money>,
{
    fn fee_for(&self, store_id: &StoreId, distance_km: f64) -> Option<Money> {
        self(store_id, distance_km)
    }
}

/// One distance band of the rate table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShippingRate {
    /// Band start in km (inclusive).
    pub min_km: f64,
    /// Band end in km; `None` is open-ended.
    pub max_km: Option<f64>,
    /// Price per km inside this band.
    pub price_per_km: Money,
    /// Inactive bands are kept for admin history but never price anything.
    pub active: bool,
    /// Admin note.
    pub note: Option<String>,
}

impl ShippingRate {
    /// Create an active band.
    ///
    /// Fails when the range is negative or inverted.
    pub fn new(
        min_km: f64,
        max_km: Option<f64>,
        price_per_km: Money,
    ) -> Result<Self, CommerceError> {
        if min_km < 0.0 || max_km.is_some_and(|max| max <= min_km) {
            return Err(CommerceError::InvalidRateBand {
                band: range_label(min_km, max_km),
            });
        }
        Ok(Self {
            min_km,
            max_km,
            price_per_km,
            active: true,
            note: None,
        })
    }

    /// Attach an admin note.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Human-readable range, e.g. "3-10 km" or "10+ km".
    pub fn range_label(&self) -> String {
        range_label(self.min_km, self.max_km)
    }

    fn upper(&self) -> f64 {
        self.max_km.unwrap_or(f64::INFINITY)
    }

    /// Whether two bands cover any common distance. Bands sharing only an
    /// endpoint (0-3 and 3-10) do not overlap.
    pub fn overlaps(&self, other: &ShippingRate) -> bool {
        self.min_km < other.upper() && other.min_km < self.upper()
    }
}

fn range_label(min_km: f64, max_km: Option<f64>) -> String {
    match max_km {
        Some(max) => format!("{}-{} km", min_km, max),
        None => format!("{}+ km", min_km),
    }
}

/// Distance-banded shipping rates with tiered pricing.
///
/// The fee for a distance is accumulated per band: 30 km against bands
/// 0-3 @ 5000, 3-10 @ 3000, 10+ @ 2000 prices as 3×5000 + 7×3000 + 20×2000.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RateTable {
    currency: Currency,
    rates: Vec<ShippingRate>,
}

impl RateTable {
    /// Create an empty table pricing in the given currency.
    pub fn new(currency: Currency) -> Self {
        Self {
            currency,
            rates: Vec::new(),
        }
    }

    /// Insert a band, keeping the table sorted by band start.
    ///
    /// An active band that overlaps an existing active band is rejected;
    /// so is a band priced in a different currency than the table.
    pub fn insert(&mut self, rate: ShippingRate) -> Result<(), CommerceError> {
        if rate.price_per_km.currency != self.currency {
            return Err(CommerceError::CurrencyMismatch {
                expected: self.currency.code().to_string(),
                got: rate.price_per_km.currency.code().to_string(),
            });
        }

        if rate.active {
            if let Some(existing) = self.rates.iter().find(|r| r.active && r.overlaps(&rate)) {
                tracing::warn!(
                    band = %rate.range_label(),
                    existing = %existing.range_label(),
                    "rejected overlapping shipping rate band"
                );
                return Err(CommerceError::RateBandOverlap {
                    band: rate.range_label(),
                    existing: existing.range_label(),
                });
            }
        }

        let pos = self.rates.partition_point(|r| r.min_km <= rate.min_km);
        self.rates.insert(pos, rate);
        Ok(())
    }

    /// The bands, sorted by start distance.
    pub fn rates(&self) -> &[ShippingRate] {
        &self.rates
    }

    /// Whether the table has any active band.
    pub fn is_empty(&self) -> bool {
        !self.rates.iter().any(|r| r.active)
    }

    /// Price a distance against the active bands.
    ///
    /// The distance is rounded up to the next whole km, then each band
    /// prices the kilometers it covers. `None` when the table has no
    /// active bands (callers fall back to [`FlatRate`]) or on overflow.
    pub fn fee_for_distance(&self, distance_km: f64) -> Option<Money> {
        if self.is_empty() {
            return None;
        }

        let rounded = distance_km.max(0.0).ceil();
        let mut total = Money::zero(self.currency);
        for rate in self.rates.iter().filter(|r| r.active) {
            if rounded <= rate.min_km {
                continue;
            }
            let covered = rounded.min(rate.upper()) - rate.min_km;
            if covered > 0.0 {
                total = total.try_add(&rate.price_per_km.multiply_decimal(covered))?;
            }
        }
        Some(total)
    }
}

impl ShippingResolver for RateTable {
    /// Table rates do not vary by store.
    fn fee_for(&self, _store_id: &StoreId, distance_km: f64) -> Option<Money> {
        self.fee_for_distance(distance_km)
    }
}

/// Flat per-km pricing, the fallback when no rate table is configured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlatRate {
    /// Price per km.
    pub per_km: Money,
    /// Floor applied after the distance multiplication.
    pub min_fee: Money,
    /// Round the distance up to whole km; otherwise keep one decimal.
    pub round_up: bool,
}

impl Default for FlatRate {
    fn default() -> Self {
        Self::new(Money::new(5000, Currency::VND))
    }
}

impl FlatRate {
    /// Flat pricing at the given per-km rate, no minimum, rounding up.
    pub fn new(per_km: Money) -> Self {
        Self {
            per_km,
            min_fee: Money::zero(per_km.currency),
            round_up: true,
        }
    }

    /// Set a minimum fee.
    pub fn with_min_fee(mut self, min_fee: Money) -> Self {
        self.min_fee = min_fee;
        self
    }

    /// Enable or disable rounding the distance up.
    pub fn with_round_up(mut self, round_up: bool) -> Self {
        self.round_up = round_up;
        self
    }

    /// Price a distance.
    pub fn fee_for_distance(&self, distance_km: f64) -> Money {
        let distance = distance_km.max(0.0);
        let effective = if self.round_up {
            distance.ceil()
        } else {
            (distance * 10.0).round() / 10.0
        };
        let fee = self.per_km.multiply_decimal(effective);
        if fee.amount_minor < self.min_fee.amount_minor {
            self.min_fee
        } else {
            fee
        }
    }
}

impl ShippingResolver for FlatRate {
    fn fee_for(&self, _store_id: &StoreId, distance_km: f64) -> Option<Money> {
        Some(self.fee_for_distance(distance_km))
    }
}

/// Great-circle distance between two coordinates, in km.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    const EARTH_RADIUS_KM: f64 = 6371.0;

    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}
