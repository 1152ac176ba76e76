//! Static pin locations drawn above the land layer.

use geo_types::Coord;

/// A labeled point of interest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pin {
    pub label: &'static str,
    /// Longitude in degrees (east positive)
    pub lon: f64,
    /// Latitude in degrees (north positive)
    pub lat: f64,
}

impl Pin {
    pub const fn new(label: &'static str, lon: f64, lat: f64) -> Self {
        Self { label, lon, lat }
    }

    /// Geographic position as a `(lon, lat)` coordinate.
    pub fn coord(&self) -> Coord<f64> {
        Coord {
            x: self.lon,
            y: self.lat,
        }
    }

    /// Whether the coordinates are finite and within lon/lat range.
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

/// Pins shown on every map.
pub static PINS: &[Pin] = &[
    Pin::new("San Francisco", -122.4194, 37.7749),
    Pin::new("New York", -74.0060, 40.7128),
    Pin::new("Mexico City", -99.1332, 19.4326),
    Pin::new("Sao Paulo", -46.6333, -23.5505),
    Pin::new("London", -0.1276, 51.5072),
    Pin::new("Berlin", 13.4050, 52.5200),
    Pin::new("Nairobi", 36.8219, -1.2921),
    Pin::new("Mumbai", 72.8777, 19.0760),
    Pin::new("Singapore", 103.8198, 1.3521),
    Pin::new("Tokyo", 139.6503, 35.6762),
    Pin::new("Sydney", 151.2093, -33.8688),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_pins_are_valid() {
        assert!(!PINS.is_empty());
        assert!(PINS.iter().all(Pin::is_valid));
    }

    #[test]
    fn test_invalid_pins() {
        assert!(!Pin::new("nan", f64::NAN, 0.0).is_valid());
        assert!(!Pin::new("lon", 181.0, 0.0).is_valid());
        assert!(!Pin::new("lat", 0.0, -90.5).is_valid());
        assert!(Pin::new("", 0.0, 0.0).is_valid());
    }

    #[test]
    fn test_pin_coord() {
        let pin = Pin::new("Tokyo", 139.6503, 35.6762);
        assert_eq!(pin.coord(), Coord { x: 139.6503, y: 35.6762 });
    }
}
