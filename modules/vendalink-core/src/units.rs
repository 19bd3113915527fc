//! Sensor-type → physical-unit mapping.

/// Unit when no rule matches.
pub const UNKNOWN_UNIT: &str = "desconocida";

/// Case-sensitive substring rules, first match wins. This table is
/// append-only: new sensor kinds get a new row at the end, existing rows
/// are never edited.
const UNIT_RULES: &[(&str, &str)] = &[
    ("temperatura", "°C"),
    ("humedad", "%"),
    ("ph", "pH"),
    ("ultrasonico", "cm"),
    ("moneda", "mxn"),
];

pub fn unit_for(sensor_type: &str) -> &'static str {
    UNIT_RULES
        .iter()
        .find(|(needle, _)| sensor_type.contains(needle))
        .map_or(UNKNOWN_UNIT, |(_, unit)| unit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_sensor_types_resolve() {
        assert_eq!(unit_for("temperatura"), "°C");
        assert_eq!(unit_for("humedad"), "%");
        assert_eq!(unit_for("ph"), "pH");
        assert_eq!(unit_for("ultrasonico"), "cm");
        assert_eq!(unit_for("moneda"), "mxn");
    }

    #[test]
    fn substring_match_is_enough() {
        assert_eq!(unit_for("temperatura/interna"), "°C");
        assert_eq!(unit_for("sensor-ph-2"), "pH");
    }

    #[test]
    fn unknown_types_get_the_sentinel() {
        assert_eq!(unit_for("unknownkind"), UNKNOWN_UNIT);
        assert_eq!(unit_for(""), UNKNOWN_UNIT);
    }

    #[test]
    fn matching_is_case_sensitive() {
        assert_eq!(unit_for("Temperatura"), UNKNOWN_UNIT);
    }
}
