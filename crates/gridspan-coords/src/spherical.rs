//! Unit-sphere helpers for geographic coordinates.
//!
//! Longitudes and latitudes are in degrees. Points on the sphere are
//! represented as `[x, y, z]` unit vectors with `z` along the polar axis
//! and `x` through longitude 0.

/// Unit vector for a `(longitude, latitude)` pair in degrees.
pub fn to_unit_vector(longitude: f64, latitude: f64) -> [f64; 3] {
    let (sin_lon, cos_lon) = longitude.to_radians().sin_cos();
    let (sin_lat, cos_lat) = latitude.to_radians().sin_cos();
    [cos_lat * cos_lon, cos_lat * sin_lon, sin_lat]
}

/// `(longitude, latitude)` in degrees for a (not necessarily unit) vector.
///
/// Longitude is in `(-180, 180]`.
pub fn from_unit_vector(v: [f64; 3]) -> (f64, f64) {
    let horizontal = v[0].hypot(v[1]);
    let longitude = v[1].atan2(v[0]).to_degrees();
    let latitude = v[2].atan2(horizontal).to_degrees();
    (longitude, latitude)
}

#[inline]
pub(crate) fn dot(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

#[inline]
pub(crate) fn cross(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

#[inline]
pub(crate) fn norm(a: [f64; 3]) -> f64 {
    dot(a, a).sqrt()
}

/// Central angle between two unit vectors in radians.
///
/// Uses `atan2(|a x b|, a . b)`, which stays accurate for nearly
/// coincident and nearly antipodal points.
pub fn central_angle(a: [f64; 3], b: [f64; 3]) -> f64 {
    norm(cross(a, b)).atan2(dot(a, b))
}

/// Great-circle angular distance in degrees between two
/// `(longitude, latitude)` points, by the haversine formula.
///
/// # Examples
///
/// ```
/// use gridspan_coords::spherical::angular_distance;
///
/// assert!((angular_distance((0.0, 0.0), (90.0, 0.0)) - 90.0).abs() < 1e-12);
/// assert!((angular_distance((10.0, 90.0), (-170.0, 90.0))).abs() < 1e-12);
/// ```
pub fn angular_distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    let (lon1, lat1) = (a.0.to_radians(), a.1.to_radians());
    let (lon2, lat2) = (b.0.to_radians(), b.1.to_radians());
    let half_dlat = ((lat2 - lat1) / 2.0).sin();
    let half_dlon = ((lon2 - lon1) / 2.0).sin();
    let h = half_dlat * half_dlat + lat1.cos() * lat2.cos() * half_dlon * half_dlon;
    (2.0 * h.sqrt().clamp(0.0, 1.0).asin()).to_degrees()
}

/// Wrap a longitude into `[0, 360)`.
pub fn wrap_360(longitude: f64) -> f64 {
    let wrapped = longitude.rem_euclid(360.0);
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Wrap a longitude into `(-180, 180]`.
pub fn wrap_180(longitude: f64) -> f64 {
    let wrapped = wrap_360(longitude);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}
