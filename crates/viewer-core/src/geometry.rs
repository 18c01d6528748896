use geo::Rect;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

/// Axis-aligned extent in map coordinates, ordered the way tiled map
/// libraries expect it (south-west corner first).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLngBounds {
    pub south_west: LatLng,
    pub north_east: LatLng,
}

impl LatLngBounds {
    pub fn new(south_west: LatLng, north_east: LatLng) -> Self {
        Self { south_west, north_east }
    }

    /// `[[south, west], [north, east]]`, the array form map libraries accept.
    pub fn to_corners(&self) -> [[f64; 2]; 2] {
        [
            [self.south_west.lat, self.south_west.lng],
            [self.north_east.lat, self.north_east.lng],
        ]
    }
}

// GeoJSON positions are x = longitude, y = latitude.
impl From<Rect<f64>> for LatLngBounds {
    fn from(rect: Rect<f64>) -> Self {
        let min = rect.min();
        let max = rect.max();
        Self {
            south_west: LatLng::new(min.y, min.x),
            north_east: LatLng::new(max.y, max.x),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::coord;

    #[test]
    fn rect_axes_map_to_lat_lng() {
        let rect = Rect::new(coord! { x: 10.0, y: 50.0 }, coord! { x: 12.5, y: 54.0 });
        let bounds = LatLngBounds::from(rect);
        assert_eq!(bounds.south_west, LatLng::new(50.0, 10.0));
        assert_eq!(bounds.north_east, LatLng::new(54.0, 12.5));
        assert_eq!(bounds.to_corners(), [[50.0, 10.0], [54.0, 12.5]]);
    }
}
