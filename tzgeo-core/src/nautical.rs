//! Longitude-only `Etc/GMT±N` zones for the open sea.

use crate::geometry::Point;

/// Width in degrees of one nautical timezone.
const ZONE_WIDTH: f64 = 7.5;

/// The nautical timezone for `point`, derived from its longitude alone.
///
/// Zones are 15° wide and centred on multiples of 15°. Following the POSIX `Etc`
/// convention, the sign is inverted: places east of Greenwich get `Etc/GMT-N`.
///
/// ```
/// use tzgeo_core::{Point, nautical_zone};
///
/// assert_eq!(nautical_zone(Point::new(0.0, 0.0)), "Etc/GMT");
/// assert_eq!(nautical_zone(Point::new(7.5, 0.0)), "Etc/GMT-1");
/// assert_eq!(nautical_zone(Point::new(-180.0, 0.0)), "Etc/GMT+12");
/// ```
#[must_use]
pub fn nautical_zone(point: Point) -> String {
    #[expect(
        clippy::cast_sign_loss,
        reason = "the offset is an absolute value, NaN saturates to zero"
    )]
    let offset = (((point.lon / ZONE_WIDTH).abs() + 1.0) / 2.0).floor() as u32;
    if offset == 0 {
        "Etc/GMT".to_string()
    } else if point.lon < 0.0 {
        format!("Etc/GMT+{offset}")
    } else {
        format!("Etc/GMT-{offset}")
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(-180.0, "Etc/GMT+12")]
    #[case(180.0, "Etc/GMT-12")]
    #[case(-172.5, "Etc/GMT+12")]
    #[case(172.5, "Etc/GMT-12")]
    #[case(-172.0, "Etc/GMT+11")]
    #[case(172.0, "Etc/GMT-11")]
    #[case(0.0, "Etc/GMT")]
    #[case(-0.0, "Etc/GMT")]
    #[case(7.49, "Etc/GMT")]
    #[case(-7.49, "Etc/GMT")]
    #[case(7.5, "Etc/GMT-1")]
    #[case(-7.5, "Etc/GMT+1")]
    #[case(-176.474_331_436, "Etc/GMT+12")]
    #[case(22.5, "Etc/GMT-2")]
    #[case(-97.0, "Etc/GMT+6")]
    fn nautical_offsets(#[case] lon: f64, #[case] expected: &str) {
        assert_eq!(nautical_zone(Point::new(lon, 0.0)), expected);
    }

    #[test]
    fn latitude_is_ignored() {
        assert_eq!(
            nautical_zone(Point::new(45.0, 89.9)),
            nautical_zone(Point::new(45.0, -89.9))
        );
    }
}
