//! Topic classification.
//!
//! A raw topic is trimmed of leading/trailing separators, split, and run
//! through an ordered rule table. The table order is load-bearing: the
//! sensor shape has the loosest arity check and must be tried first, or a
//! sensor topic that happens to have five segments would be captured by
//! one of the fixed-arity shapes.

use crate::error::DispatchError;

pub const SEPARATOR: char = '/';

/// Shape of one inbound message, with the fields that live in the topic
/// itself. Payload fields are decoded separately per shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// `{machine}/sensor/{type...}` — the type may span several segments.
    Sensor {
        machine_id: String,
        sensor_type: String,
    },
    /// `maquina/{id}/venta/dispensado`
    Dispensing { machine_id: u32 },
    /// `maquina/{id}/valvula/{pin}/confirmacion`
    ValveConfirmation { machine_id: u32, valve_pin: u32 },
    /// No rule matched. Reported as a classification miss, never an error.
    Unrecognized,
}

struct ShapeRule {
    matches: fn(&[&str]) -> bool,
    extract: fn(&[&str], &str) -> Result<Route, DispatchError>,
}

/// First match wins. Append new shapes, never reorder.
const RULES: &[ShapeRule] = &[
    ShapeRule {
        matches: |seg| seg.len() >= 2 && seg[1] == "sensor",
        extract: |seg, _topic| {
            Ok(Route::Sensor {
                machine_id: seg[0].to_string(),
                sensor_type: seg[2..].join("/"),
            })
        },
    },
    ShapeRule {
        matches: |seg| seg.len() == 4 && seg[0] == "maquina" && seg[2] == "venta",
        extract: |seg, topic| {
            Ok(Route::Dispensing {
                machine_id: int_segment(seg[1], topic)?,
            })
        },
    },
    ShapeRule {
        matches: |seg| {
            seg.len() == 5 && seg[0] == "maquina" && seg[2] == "valvula" && seg[4] == "confirmacion"
        },
        extract: |seg, topic| {
            Ok(Route::ValveConfirmation {
                machine_id: int_segment(seg[1], topic)?,
                valve_pin: int_segment(seg[3], topic)?,
            })
        },
    },
];

/// Classify a raw topic into a [`Route`].
///
/// An unparseable id segment in an otherwise matching shape is a hard
/// rejection (`MalformedTopic`), not a fall-through to the next rule.
pub fn classify(topic: &str) -> Result<Route, DispatchError> {
    let trimmed = topic.trim_matches(SEPARATOR);
    let segments: Vec<&str> = trimmed.split(SEPARATOR).collect();

    for rule in RULES {
        if (rule.matches)(&segments) {
            return (rule.extract)(&segments, topic);
        }
    }
    Ok(Route::Unrecognized)
}

fn int_segment(segment: &str, topic: &str) -> Result<u32, DispatchError> {
    segment
        .parse::<u32>()
        .map_err(|_| DispatchError::MalformedTopic {
            topic: topic.to_string(),
            reason: format!("segment '{segment}' is not a non-negative integer"),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensor_topic_classifies_with_machine_and_type() {
        let route = classify("rpi1/sensor/temperatura").unwrap();
        assert_eq!(
            route,
            Route::Sensor {
                machine_id: "rpi1".to_string(),
                sensor_type: "temperatura".to_string(),
            }
        );
    }

    #[test]
    fn sensor_type_may_span_segments() {
        let route = classify("rpi1/sensor/ph/probe2").unwrap();
        assert_eq!(
            route,
            Route::Sensor {
                machine_id: "rpi1".to_string(),
                sensor_type: "ph/probe2".to_string(),
            }
        );
    }

    #[test]
    fn sensor_type_is_empty_when_absent() {
        let route = classify("rpi1/sensor").unwrap();
        assert_eq!(
            route,
            Route::Sensor {
                machine_id: "rpi1".to_string(),
                sensor_type: String::new(),
            }
        );
    }

    #[test]
    fn sensor_rule_has_priority_over_fixed_shapes() {
        // Five segments that would satisfy the valve arity, but segment 1
        // says sensor — the sensor rule must win.
        let route = classify("maquina/sensor/valvula/3/confirmacion").unwrap();
        assert_eq!(
            route,
            Route::Sensor {
                machine_id: "maquina".to_string(),
                sensor_type: "valvula/3/confirmacion".to_string(),
            }
        );
    }

    #[test]
    fn dispensing_topic_classifies() {
        let route = classify("maquina/7/venta/dispensado").unwrap();
        assert_eq!(route, Route::Dispensing { machine_id: 7 });
    }

    #[test]
    fn leading_separator_is_trimmed() {
        let route = classify("/maquina/7/venta/dispensado").unwrap();
        assert_eq!(route, Route::Dispensing { machine_id: 7 });
    }

    #[test]
    fn valve_topic_classifies() {
        let route = classify("maquina/7/valvula/2/confirmacion").unwrap();
        assert_eq!(
            route,
            Route::ValveConfirmation {
                machine_id: 7,
                valve_pin: 2,
            }
        );
    }

    #[test]
    fn non_numeric_machine_id_is_malformed() {
        let err = classify("maquina/abc/venta/dispensado").unwrap_err();
        assert!(matches!(err, DispatchError::MalformedTopic { .. }));
    }

    #[test]
    fn non_numeric_valve_pin_is_malformed() {
        let err = classify("maquina/7/valvula/x/confirmacion").unwrap_err();
        assert!(matches!(err, DispatchError::MalformedTopic { .. }));
    }

    #[test]
    fn negative_machine_id_is_malformed() {
        let err = classify("maquina/-1/venta/dispensado").unwrap_err();
        assert!(matches!(err, DispatchError::MalformedTopic { .. }));
    }

    #[test]
    fn unmatched_four_segment_topic_is_unrecognized() {
        assert_eq!(classify("foo/bar/baz/qux").unwrap(), Route::Unrecognized);
    }

    #[test]
    fn empty_topic_is_unrecognized() {
        assert_eq!(classify("").unwrap(), Route::Unrecognized);
        assert_eq!(classify("/").unwrap(), Route::Unrecognized);
    }
}
