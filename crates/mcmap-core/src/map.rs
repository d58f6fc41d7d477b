//! Initial map viewport.

use serde::Serialize;

use crate::establishment::Establishment;

/// Geographic centre of metropolitan France.
pub const FRANCE_CENTER: (f64, f64) = (46.603_354, 1.888_334);
pub const COUNTRY_ZOOM: u8 = 6;
pub const REGION_ZOOM: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapView {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: u8,
}

impl MapView {
    /// Choose where the map opens.
    ///
    /// With a region selected, the view centres on the mean position of the
    /// mappable rows at region zoom. Otherwise, or when nothing is mappable,
    /// it shows the whole country.
    #[must_use]
    pub fn fit<'a, I>(rows: I, region_selected: bool) -> Self
    where
        I: IntoIterator<Item = &'a Establishment>,
    {
        let country = Self {
            latitude: FRANCE_CENTER.0,
            longitude: FRANCE_CENTER.1,
            zoom: COUNTRY_ZOOM,
        };
        if !region_selected {
            return country;
        }

        let (count, lat_sum, lon_sum) = rows
            .into_iter()
            .filter_map(Establishment::coordinates)
            .fold((0u32, 0.0f64, 0.0f64), |(n, lat, lon), (y, x)| {
                (n + 1, lat + y, lon + x)
            });
        if count == 0 {
            return country;
        }

        Self {
            latitude: lat_sum / f64::from(count),
            longitude: lon_sum / f64::from(count),
            zoom: REGION_ZOOM,
        }
    }
}
