//! Geographic bounding box with antimeridian handling.
//!
//! Latitude is a plain closed interval. Longitude is an arc on the circle:
//! when `west > east` the box crosses the antimeridian. Extending the box with
//! a point outside it grows whichever side needs the smaller eastward sweep,
//! so a set of points on both sides of ±180° yields a narrow box instead of
//! one spanning the whole globe.

use super::{normalize_longitude, LatLng};

/// Bounding box over a set of lat/lng points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLngBounds {
    /// Southernmost latitude.
    pub south: f64,
    /// Northernmost latitude.
    pub north: f64,
    /// Western edge longitude, in [-180, 180).
    pub west: f64,
    /// Eastern edge longitude, in [-180, 180).
    pub east: f64,
}

/// Eastward sweep in degrees needed to go from `from` to `to`.
fn eastward_sweep(from: f64, to: f64) -> f64 {
    let d = to - from;
    if d >= 0.0 {
        d
    } else {
        d + 360.0
    }
}

impl LatLngBounds {
    /// Create a bounding box from a single point.
    pub fn from_point(point: LatLng) -> Self {
        let lat = point.lat.clamp(-90.0, 90.0);
        let lng = normalize_longitude(point.lng);
        Self {
            south: lat,
            north: lat,
            west: lng,
            east: lng,
        }
    }

    /// Build the smallest box covering every point, or `None` if there are none.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = LatLng>,
    {
        let mut iter = points.into_iter();
        let mut bounds = Self::from_point(iter.next()?);
        for point in iter {
            bounds.extend(point);
        }
        Some(bounds)
    }

    /// Expand this bounding box to include a point.
    pub fn extend(&mut self, point: LatLng) {
        let lat = point.lat.clamp(-90.0, 90.0);
        self.south = self.south.min(lat);
        self.north = self.north.max(lat);

        let lng = normalize_longitude(point.lng);
        if !self.contains_lng(lng) {
            if eastward_sweep(lng, self.west) < eastward_sweep(self.east, lng) {
                self.west = lng;
            } else {
                self.east = lng;
            }
        }
    }

    /// Whether the box crosses the antimeridian.
    pub fn crosses_antimeridian(&self) -> bool {
        self.west > self.east
    }

    /// Whether the longitude arc of the box contains `lng`.
    pub fn contains_lng(&self, lng: f64) -> bool {
        let lng = normalize_longitude(lng);
        if self.crosses_antimeridian() {
            lng >= self.west || lng <= self.east
        } else {
            self.west <= lng && lng <= self.east
        }
    }

    /// Whether the box contains the point.
    pub fn contains(&self, point: LatLng) -> bool {
        self.south <= point.lat && point.lat <= self.north && self.contains_lng(point.lng)
    }

    /// Get the center point of the bounds.
    ///
    /// The longitude center is the midpoint of the arc, not the average of
    /// the edge values.
    pub fn center(&self) -> LatLng {
        let lat = (self.south + self.north) / 2.0;
        let mut lng = (self.west + self.east) / 2.0;
        if self.crosses_antimeridian() {
            lng = normalize_longitude(lng + 180.0);
        }
        LatLng::new(lat, lng)
    }

    /// South-west corner.
    pub fn south_west(&self) -> LatLng {
        LatLng::new(self.south, self.west)
    }

    /// North-east corner.
    pub fn north_east(&self) -> LatLng {
        LatLng::new(self.north, self.east)
    }

    /// Get the width of the bounds in degrees of longitude.
    pub fn width(&self) -> f64 {
        eastward_sweep(self.west, self.east)
    }

    /// Get the height of the bounds in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.north - self.south
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_point() {
        let bounds = LatLngBounds::from_point(LatLng::new(53.5, 9.7));
        let center = bounds.center();
        assert!((center.lat - 53.5).abs() < 0.0001);
        assert!((center.lng - 9.7).abs() < 0.0001);
        assert_eq!(bounds.width(), 0.0);
        assert_eq!(bounds.height(), 0.0);
    }

    #[test]
    fn test_from_points_empty() {
        assert!(LatLngBounds::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_extend() {
        let mut bounds = LatLngBounds::from_point(LatLng::new(53.5, 9.7));
        bounds.extend(LatLng::new(54.0, 10.5));

        assert!((bounds.south - 53.5).abs() < 0.0001);
        assert!((bounds.north - 54.0).abs() < 0.0001);
        assert!((bounds.west - 9.7).abs() < 0.0001);
        assert!((bounds.east - 10.5).abs() < 0.0001);
        assert!(!bounds.crosses_antimeridian());
    }

    #[test]
    fn test_extend_westward() {
        let mut bounds = LatLngBounds::from_point(LatLng::new(0.0, 10.0));
        bounds.extend(LatLng::new(0.0, 5.0));
        assert_eq!(bounds.west, 5.0);
        assert_eq!(bounds.east, 10.0);
    }

    #[test]
    fn test_center() {
        let bounds = LatLngBounds::from_points([LatLng::new(53.0, 9.0), LatLng::new(54.0, 11.0)])
            .unwrap();
        let center = bounds.center();
        assert!((center.lat - 53.5).abs() < 0.0001);
        assert!((center.lng - 10.0).abs() < 0.0001);
    }

    #[test]
    fn test_width_and_height() {
        let bounds = LatLngBounds::from_points([LatLng::new(53.0, 9.0), LatLng::new(54.0, 11.0)])
            .unwrap();
        assert!((bounds.width() - 2.0).abs() < 0.0001);
        assert!((bounds.height() - 1.0).abs() < 0.0001);
    }

    #[test]
    fn test_antimeridian_crossing() {
        let bounds =
            LatLngBounds::from_points([LatLng::new(-10.0, 170.0), LatLng::new(10.0, -170.0)])
                .unwrap();

        assert!(bounds.crosses_antimeridian());
        assert_eq!(bounds.west, 170.0);
        assert_eq!(bounds.east, -170.0);
        assert!((bounds.width() - 20.0).abs() < 1e-9);

        let center = bounds.center();
        assert!(center.lat.abs() < 1e-9);
        assert!((center.lng.abs() - 180.0).abs() < 1e-9, "got {}", center.lng);
    }

    #[test]
    fn test_antimeridian_center_off_dateline() {
        let bounds =
            LatLngBounds::from_points([LatLng::new(0.0, 160.0), LatLng::new(0.0, -170.0)])
                .unwrap();
        // Arc from 160 east to 190 (= -170), midpoint 175
        assert!((bounds.center().lng - 175.0).abs() < 1e-9);
    }

    #[test]
    fn test_contains() {
        let bounds =
            LatLngBounds::from_points([LatLng::new(-10.0, 170.0), LatLng::new(10.0, -170.0)])
                .unwrap();
        assert!(bounds.contains(LatLng::new(0.0, 179.0)));
        assert!(bounds.contains(LatLng::new(0.0, -179.0)));
        assert!(!bounds.contains(LatLng::new(0.0, 0.0)));
        assert!(!bounds.contains(LatLng::new(20.0, 175.0)));
    }

    #[test]
    fn test_corners() {
        let bounds = LatLngBounds::from_points([LatLng::new(1.0, 2.0), LatLng::new(3.0, 4.0)])
            .unwrap();
        assert_eq!(bounds.south_west(), LatLng::new(1.0, 2.0));
        assert_eq!(bounds.north_east(), LatLng::new(3.0, 4.0));
    }

    #[test]
    fn test_point_inside_does_not_grow() {
        let mut bounds = LatLngBounds::from_points([LatLng::new(0.0, 0.0), LatLng::new(10.0, 10.0)])
            .unwrap();
        let before = bounds;
        bounds.extend(LatLng::new(5.0, 5.0));
        assert_eq!(bounds, before);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_bounds_contain_all_points(
                points in proptest::collection::vec(
                    (-90.0..90.0_f64, -180.0..180.0_f64),
                    1..20,
                )
            ) {
                let bounds = LatLngBounds::from_points(
                    points.iter().map(|&(lat, lng)| LatLng::new(lat, lng)),
                ).unwrap();

                for &(lat, lng) in &points {
                    prop_assert!(
                        bounds.contains(LatLng::new(lat, lng)),
                        "({}, {}) not in {:?}",
                        lat, lng, bounds
                    );
                }
            }

            #[test]
            fn test_center_inside_bounds(
                points in proptest::collection::vec(
                    (-90.0..90.0_f64, -180.0..180.0_f64),
                    1..20,
                )
            ) {
                let bounds = LatLngBounds::from_points(
                    points.iter().map(|&(lat, lng)| LatLng::new(lat, lng)),
                ).unwrap();
                prop_assert!(bounds.contains(bounds.center()));
            }
        }
    }
}
