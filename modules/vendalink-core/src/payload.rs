//! Payload decoders, one per message shape.
//!
//! Sensor payloads are bare numeric scalars, not JSON. Dispensing and
//! valve payloads are JSON objects, decoded through `serde_json::Value`
//! so missing keys, wrong types and syntax errors stay distinguishable.
//! No numeric-string coercion is attempted anywhere.

use serde_json::{Map, Value};

use crate::error::DispatchError;

/// `estado` when the valve hardware omits it.
pub const DEFAULT_VALVE_STATE: &str = "completado";

/// Common fields of the dispensing and valve JSON payloads.
#[derive(Debug, Clone, PartialEq)]
pub struct DispensePayload {
    pub product_id: u32,
    pub quantity: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValvePayload {
    pub product_id: u32,
    pub quantity: f64,
    pub state: String,
}

/// Decode a sensor scalar: UTF-8 text holding one float.
pub fn decode_sensor_value(payload: &[u8]) -> Result<f64, DispatchError> {
    let text = std::str::from_utf8(payload)
        .map_err(|_| DispatchError::InvalidPayload("not valid UTF-8".to_string()))?;
    let text = text.trim();
    text.parse::<f64>()
        .map_err(|_| DispatchError::InvalidPayload(format!("'{text}' is not a numeric reading")))
}

/// Decode a dispensing-event payload.
pub fn decode_dispense(payload: &[u8]) -> Result<DispensePayload, DispatchError> {
    let object = parse_object(payload)?;
    Ok(DispensePayload {
        product_id: u32_field(&object, "id_producto")?,
        quantity: quantity_field(&object)?,
    })
}

/// Decode a valve-confirmation payload. Same required keys as a
/// dispensing event plus the optional `estado` string.
pub fn decode_valve(payload: &[u8]) -> Result<ValvePayload, DispatchError> {
    let object = parse_object(payload)?;
    let state = match object.get("estado") {
        None => DEFAULT_VALVE_STATE.to_string(),
        Some(Value::String(s)) => s.clone(),
        Some(_) => {
            return Err(DispatchError::MalformedPayload(
                "field 'estado' must be a string".to_string(),
            ))
        }
    };
    Ok(ValvePayload {
        product_id: u32_field(&object, "id_producto")?,
        quantity: quantity_field(&object)?,
        state,
    })
}

fn parse_object(payload: &[u8]) -> Result<Map<String, Value>, DispatchError> {
    let value: Value =
        serde_json::from_slice(payload).map_err(|e| DispatchError::InvalidJson(e.to_string()))?;
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(DispatchError::MalformedPayload(
            "expected a JSON object".to_string(),
        )),
    }
}

fn u32_field(object: &Map<String, Value>, key: &'static str) -> Result<u32, DispatchError> {
    let value = object.get(key).ok_or(DispatchError::MissingField(key))?;
    value
        .as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| {
            DispatchError::MalformedPayload(format!("field '{key}' must be a non-negative integer"))
        })
}

fn quantity_field(object: &Map<String, Value>) -> Result<f64, DispatchError> {
    let value = object
        .get("cantidad_dispensada")
        .ok_or(DispatchError::MissingField("cantidad_dispensada"))?;
    let quantity = value.as_f64().ok_or_else(|| {
        DispatchError::MalformedPayload("field 'cantidad_dispensada' must be a number".to_string())
    })?;
    // The hardware's reported quantity is never rewritten, only rejected.
    if quantity < 0.0 {
        return Err(DispatchError::MalformedPayload(
            "field 'cantidad_dispensada' must not be negative".to_string(),
        ));
    }
    Ok(quantity)
}
