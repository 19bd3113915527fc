use serde::Serialize;

/// Raw outcome of an API call. The backend's success criterion differs per
/// endpoint (201 for sensor readings and sales, 200 for dispenses), so the
/// client hands back status and body and lets the caller judge.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_status(&self, expected: u16) -> bool {
        self.status == expected
    }
}

/// Body for `POST /sensores`.
#[derive(Debug, Clone, Serialize)]
pub struct NewSensorReading {
    pub machine_id: String,
    pub sensor_type: String,
    pub value_numeric: f64,
    pub unit: String,
}

/// Body for `POST /contenedores/dispensar`. Wire names are the backend's
/// Spanish schema.
#[derive(Debug, Clone, Serialize)]
pub struct ContainerDispense {
    #[serde(rename = "id_maquina")]
    pub machine_id: u32,
    #[serde(rename = "id_producto")]
    pub product_id: u32,
    #[serde(rename = "cantidad_dispensada")]
    pub quantity: f64,
}

/// Body for `POST /ventas`.
#[derive(Debug, Clone, Serialize)]
pub struct NewSale {
    #[serde(rename = "id_maquina")]
    pub machine_id: u32,
    #[serde(rename = "id_producto")]
    pub product_id: u32,
    #[serde(rename = "cantidad_dispensada")]
    pub quantity: f64,
    #[serde(rename = "pin_valvula")]
    pub valve_pin: u32,
    #[serde(rename = "metodo_dispensado")]
    pub dispense_method: String,
}
