//! Land boundary data parsed from GeoJSON.

use geo_types::Coord;
use geojson::{Feature, GeoJson, Geometry, PolygonType, Value};

/// A polygon ring as (lon, lat) coordinates.
pub type Ring = Vec<Coord<f64>>;

/// A land polygon: exterior ring plus holes.
#[derive(Debug, Clone, PartialEq)]
pub struct LandPolygon {
    pub exterior: Ring,
    pub holes: Vec<Ring>,
}

/// A land feature (country, island group) made of one or more polygons.
#[derive(Debug, Clone, PartialEq)]
pub struct LandFeature {
    pub polygons: Vec<LandPolygon>,
    /// Feature name from its `name`/`NAME` property, if any
    pub label: Option<String>,
}

/// All land features of the world dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandLayer {
    pub features: Vec<LandFeature>,
    /// Number of features dropped because they were malformed
    pub skipped: usize,
}

impl LandLayer {
    /// Parses a GeoJSON FeatureCollection.
    ///
    /// Features without polygonal geometry, or whose rings are degenerate,
    /// are skipped and counted rather than failing the whole document.
    pub fn from_geojson(geojson_str: &str) -> Result<Self, String> {
        let geojson: GeoJson = geojson_str
            .parse()
            .map_err(|e| format!("Failed to parse GeoJSON: {}", e))?;

        let fc = match geojson {
            GeoJson::FeatureCollection(fc) => fc,
            _ => return Err("GeoJSON document is not a FeatureCollection".to_string()),
        };

        let mut layer = LandLayer::default();
        for feature in &fc.features {
            match convert_feature(feature) {
                Some(land) => layer.features.push(land),
                None => layer.skipped += 1,
            }
        }

        if layer.skipped > 0 {
            log::warn!("Skipped {} malformed land features", layer.skipped);
        }

        Ok(layer)
    }

    /// Total number of polygons across all features.
    pub fn polygon_count(&self) -> usize {
        self.features.iter().map(|f| f.polygons.len()).sum()
    }
}

fn convert_feature(feature: &Feature) -> Option<LandFeature> {
    let label = feature
        .properties
        .as_ref()
        .and_then(|p| p.get("name").or_else(|| p.get("NAME")))
        .and_then(|v| v.as_str())
        .map(|s| s.to_string());

    let polygons = convert_geometry(feature.geometry.as_ref()?);
    if polygons.is_empty() {
        return None;
    }

    Some(LandFeature { polygons, label })
}

fn convert_geometry(geometry: &Geometry) -> Vec<LandPolygon> {
    match &geometry.value {
        Value::Polygon(rings) => convert_polygon(rings).into_iter().collect(),
        Value::MultiPolygon(polygons) => polygons.iter().filter_map(convert_polygon).collect(),
        Value::GeometryCollection(geometries) => {
            geometries.iter().flat_map(convert_geometry).collect()
        }
        // Points and lines have no area to fill
        _ => Vec::new(),
    }
}

fn convert_polygon(rings: &PolygonType) -> Option<LandPolygon> {
    let (exterior, holes) = rings.split_first()?;
    let exterior = convert_ring(exterior)?;
    let holes = holes.iter().filter_map(|ring| convert_ring(ring)).collect();
    Some(LandPolygon { exterior, holes })
}

fn convert_ring(positions: &[Vec<f64>]) -> Option<Ring> {
    let ring: Ring = positions
        .iter()
        .map(|c| match c.as_slice() {
            [x, y, ..] if x.is_finite() && y.is_finite() => Some(Coord { x: *x, y: *y }),
            _ => None,
        })
        .collect::<Option<_>>()?;

    // GeoJSON rings repeat the first position at the end
    let distinct = if ring.len() > 1 && ring.first() == ring.last() {
        ring.len() - 1
    } else {
        ring.len()
    };
    if distinct < 3 {
        return None;
    }

    Some(ring)
}
