//! The LookAt camera view.

use serde::{Deserialize, Serialize};

use crate::coord::LatLng;
use crate::document::AltitudeMode;

/// A camera looking at a point on the globe from a distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LookAt {
    /// Latitude of the point looked at, in degrees.
    pub latitude: f64,
    /// Longitude of the point looked at, in degrees.
    pub longitude: f64,
    /// Altitude of the point looked at, in meters.
    #[serde(default)]
    pub altitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_mode: Option<AltitudeMode>,
    /// Degrees from vertical.
    #[serde(default)]
    pub tilt: f64,
    /// Degrees clockwise from north.
    #[serde(default)]
    pub heading: f64,
    /// Distance from the point to the camera, in meters.
    pub range: f64,
}

impl LookAt {
    /// A top-down view of `center` from `range` meters away.
    pub fn overhead(center: LatLng, range: f64) -> Self {
        Self {
            latitude: center.lat,
            longitude: center.lng,
            altitude: 0.0,
            altitude_mode: None,
            tilt: 0.0,
            heading: 0.0,
            range,
        }
    }

    /// The point looked at.
    pub fn center(&self) -> LatLng {
        LatLng::new(self.latitude, self.longitude)
    }

    /// Render as a KML `<LookAt>` element.
    pub fn to_kml(&self) -> String {
        let mut kml = format!(
            "<LookAt>\n  <longitude>{}</longitude>\n  <latitude>{}</latitude>\n  \
             <altitude>{}</altitude>\n  <heading>{}</heading>\n  <tilt>{}</tilt>\n  \
             <range>{}</range>\n",
            self.longitude, self.latitude, self.altitude, self.heading, self.tilt, self.range
        );
        if let Some(mode) = self.altitude_mode {
            let tag = if mode.is_sea_floor() {
                "gx:altitudeMode"
            } else {
                "altitudeMode"
            };
            kml.push_str(&format!("  <{tag}>{mode}</{tag}>\n"));
        }
        kml.push_str("</LookAt>");
        kml
    }
}
