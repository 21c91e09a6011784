use glam::DVec3;

/// Radius of the earth surface (limb, coastlines) in world units
pub const GLOBE_RADIUS: f64 = 2.0;

/// Radius of the shell the station markers sit on, slightly above the surface
pub const MARKER_RADIUS: f64 = 2.2;

/// A geographic coordinate in degrees.
/// Latitude in [-90, 90], longitude in [-180, 180]; not validated —
/// the data source is responsible for well-formed coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GeoPoint {
    pub lat_deg: f64,
    pub lon_deg: f64,
}

impl GeoPoint {
    pub const fn new(lat_deg: f64, lon_deg: f64) -> Self {
        Self { lat_deg, lon_deg }
    }
}

/// Convert a geographic coordinate to a Cartesian position on a sphere
/// of the given radius. Y is up: latitude is elevation toward +y,
/// longitude is measured from the x axis in the x-z plane.
/// The result always lies exactly on the sphere: |project(p, r)| == r.
#[inline(always)]
pub fn project(point: GeoPoint, radius: f64) -> DVec3 {
    let lat = point.lat_deg.to_radians();
    let lon = point.lon_deg.to_radians();
    DVec3::new(
        radius * lat.cos() * lon.cos(),
        radius * lat.sin(),
        radius * lat.cos() * lon.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_prime_meridian_equator() {
        let p = project(GeoPoint::new(0.0, 0.0), 2.2);
        assert!((p - DVec3::new(2.2, 0.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_north_pole() {
        let p = project(GeoPoint::new(90.0, 0.0), 2.2);
        assert!((p - DVec3::new(0.0, 2.2, 0.0)).length() < EPS);
    }

    #[test]
    fn test_east_90() {
        let p = project(GeoPoint::new(0.0, 90.0), 2.2);
        assert!((p - DVec3::new(0.0, 0.0, 2.2)).length() < EPS);
    }

    #[test]
    fn test_norm_equals_radius() {
        for lat in (-90..=90).step_by(15) {
            for lon in (-180..=180).step_by(30) {
                for r in [0.5, 2.0, 2.2, 100.0] {
                    let p = project(GeoPoint::new(lat as f64, lon as f64), r);
                    assert!(
                        (p.length() - r).abs() < 1e-9,
                        "norm off sphere at lat={lat} lon={lon} r={r}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_southern_hemisphere_negative_y() {
        let p = project(GeoPoint::new(-33.9, 151.2), 2.2);
        assert!(p.y < 0.0);
    }
}
