/// Offset for the distance-from-target encoding used by low-is-better events.
///
/// A raw value written with a leading zero (`"050"`) is a distance short of a
/// target, not a time. It is stored as `DISTANCE_TARGET_OFFSET - distance` so
/// the event can keep using the plain ascending comparator.
pub const DISTANCE_TARGET_OFFSET: f64 = 10000.0;

pub const SECONDS_PER_MINUTE: f64 = 60.0;

/// Points are fixed-point with two decimals.
pub const POINTS_SCALE: i64 = 100;
