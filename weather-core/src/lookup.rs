//! Static tables: WMO weather codes to text and glyphs, degrees to compass points.
//!
//! See <https://open-meteo.com/en/docs#weathervariables> for the code list.

pub const UNKNOWN_DESCRIPTION: &str = "Unknown";
pub const UNKNOWN_ICON: &str = "❓";

/// Every WMO code the tables know about.
pub const KNOWN_CODES: [i32; 24] = [
    0, 1, 2, 3, 45, 48, 51, 53, 55, 61, 63, 65, 71, 73, 75, 77, 80, 81, 82, 85, 86, 95, 96, 99,
];

const COMPASS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];

pub fn description(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Foggy",
        48 => "Depositing rime fog",
        51 => "Light drizzle",
        53 => "Moderate drizzle",
        55 => "Dense drizzle",
        61 => "Slight rain",
        63 => "Moderate rain",
        65 => "Heavy rain",
        71 => "Slight snow",
        73 => "Moderate snow",
        75 => "Heavy snow",
        77 => "Snow grains",
        80 => "Slight rain showers",
        81 => "Moderate rain showers",
        82 => "Violent rain showers",
        85 => "Slight snow showers",
        86 => "Heavy snow showers",
        95 => "Thunderstorm",
        96 => "Thunderstorm with slight hail",
        99 => "Thunderstorm with heavy hail",
        _ => UNKNOWN_DESCRIPTION,
    }
}

/// Glyph for a code. Only clear (0) and mainly clear (1) have a night variant.
pub fn icon(code: i32, is_day: bool) -> &'static str {
    match code {
        0 if is_day => "☀️",
        1 if is_day => "🌤️",
        0 | 1 => "🌙",
        2 => "⛅",
        3 => "☁️",
        45 | 48 => "🌫️",
        51 | 53 | 80 => "🌦️",
        55 | 61 | 63 | 65 | 81 => "🌧️",
        71 | 73 | 85 => "🌨️",
        75 | 77 | 86 => "❄️",
        82 | 95 | 96 | 99 => "⛈️",
        _ => UNKNOWN_ICON,
    }
}

/// Wall-clock day window used when the payload carries no day flag.
pub fn is_daytime_hour(hour: u32) -> bool {
    (6..18).contains(&hour)
}

/// Eight-point compass label. Negative and >360 inputs are normalised first.
///
/// Each label covers the 45° sector starting at its bearing, so 44° is still
/// `N` and 46° is `NE`.
pub fn compass_label(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return COMPASS[0];
    }
    let normalized = degrees.rem_euclid(360.0);
    let index = ((normalized / 45.0).floor() as usize) % COMPASS.len();
    COMPASS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_are_described() {
        for code in KNOWN_CODES {
            assert_ne!(description(code), UNKNOWN_DESCRIPTION, "code {code}");
            assert_ne!(icon(code, true), UNKNOWN_ICON, "code {code}");
            assert_ne!(icon(code, false), UNKNOWN_ICON, "code {code}");
        }
        assert_eq!(description(2), "Partly cloudy");
        assert_eq!(description(96), "Thunderstorm with slight hail");
    }

    #[test]
    fn unknown_codes_map_to_sentinels() {
        for code in [-1, 4, 56, 66, 100, 999] {
            assert_eq!(description(code), UNKNOWN_DESCRIPTION);
            assert_eq!(icon(code, true), UNKNOWN_ICON);
            assert_eq!(icon(code, false), UNKNOWN_ICON);
        }
    }

    #[test]
    fn night_variant_only_for_clear_codes() {
        assert_eq!(icon(0, true), "☀️");
        assert_eq!(icon(0, false), "🌙");
        assert_eq!(icon(1, true), "🌤️");
        assert_eq!(icon(1, false), "🌙");
        for code in KNOWN_CODES.iter().copied().filter(|c| *c > 1) {
            assert_eq!(icon(code, true), icon(code, false), "code {code}");
        }
    }

    #[test]
    fn daytime_window() {
        assert!(!is_daytime_hour(5));
        assert!(is_daytime_hour(6));
        assert!(is_daytime_hour(17));
        assert!(!is_daytime_hour(18));
        assert!(!is_daytime_hour(0));
    }

    #[test]
    fn compass_points() {
        assert_eq!(compass_label(0.0), "N");
        assert_eq!(compass_label(360.0), "N");
        assert_eq!(compass_label(44.0), "N");
        assert_eq!(compass_label(46.0), "NE");
        assert_eq!(compass_label(90.0), "E");
        assert_eq!(compass_label(225.0), "SW");
        assert_eq!(compass_label(314.9), "W");
        assert_eq!(compass_label(359.9), "NW");
    }

    #[test]
    fn compass_is_periodic_and_normalises_negatives() {
        for deg in [0.0, 10.0, 46.0, 135.0, 200.0, 300.0, 359.0] {
            assert_eq!(compass_label(deg), compass_label(deg + 360.0), "{deg}");
            assert_eq!(compass_label(deg), compass_label(deg - 360.0), "{deg}");
        }
        assert_eq!(compass_label(-90.0), "W");
        assert_eq!(compass_label(-1.0), "NW");
        assert_eq!(compass_label(f64::NAN), "N");
    }
}
