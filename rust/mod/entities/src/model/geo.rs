use bizmodel_macro::entity;
use bizmodel_types::{Emptyful, ModelError, Normalizable, normalize_by_properties};
use tracing::{debug, warn};

/// Geographic point in degrees.
///
/// Normalization brings the point into canonical range: latitude folded
/// over the poles into [-90, 90] and longitude wrapped into [-180, 180).
/// Points already in range are left bit-for-bit unchanged. Non-finite
/// components count as absent.
#[entity(module = "core", custom_empty, custom_normalize)]
pub struct Coordinate {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude: Some(latitude),
            longitude: Some(longitude),
        }
    }

    /// Parse `"lat, lon"` (comma and optional whitespace).
    pub fn parse(s: &str) -> Result<Self, ModelError> {
        let (lat, lon) = s
            .split_once(',')
            .ok_or_else(|| ModelError::InvalidCoordinate(format!("expected \"lat, lon\": {s}")))?;
        let parse = |part: &str| {
            part.trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| ModelError::InvalidCoordinate(format!("bad number: {}", part.trim())))
        };
        Ok(Self::new(parse(lat)?, parse(lon)?))
    }
}

impl Emptyful for Coordinate {
    fn is_empty(&self) -> bool {
        [self.latitude, self.longitude]
            .into_iter()
            .flatten()
            .all(|v| !v.is_finite())
    }
}

impl Normalizable for Coordinate {
    fn normalize(&mut self) {
        normalize_by_properties(self);

        for (axis, value) in [("latitude", &mut self.latitude), ("longitude", &mut self.longitude)] {
            if value.is_some_and(|v| !v.is_finite()) {
                warn!(axis, "dropping non-finite coordinate component");
                *value = None;
            }
        }

        if let Some(lat) = self.latitude {
            if !(-90.0..=90.0).contains(&lat) {
                let (folded, flipped) = fold_latitude(lat);
                debug!(from = lat, to = folded, "folded latitude over the pole");
                self.latitude = Some(folded);
                if flipped {
                    self.longitude = self.longitude.map(|lon| lon + 180.0);
                }
            }
        }

        if let Some(lon) = self.longitude {
            if !(-180.0..180.0).contains(&lon) {
                let wrapped = wrap_longitude(lon);
                debug!(from = lon, to = wrapped, "wrapped longitude");
                self.longitude = Some(wrapped);
            }
        }
    }
}

/// Fold a latitude into [-90, 90]. Returns the folded value and whether the
/// point crossed a pole, which moves it to the opposite meridian.
fn fold_latitude(lat: f64) -> (f64, bool) {
    let lat = wrap_longitude(lat);
    if lat > 90.0 {
        (180.0 - lat, true)
    } else if lat < -90.0 {
        (-180.0 - lat, true)
    } else {
        (lat, false)
    }
}

/// Wrap an angle into [-180, 180).
fn wrap_longitude(lon: f64) -> f64 {
    let wrapped = (lon + 180.0).rem_euclid(360.0) - 180.0;
    // rem_euclid rounds up to 360 for inputs just below -180.
    if wrapped >= 180.0 { wrapped - 360.0 } else { wrapped }
}
